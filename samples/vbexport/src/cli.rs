use std::path::PathBuf;

use clap::ValueHint;
use vbake::{Axis, Orientation, TransformConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum FlipAxis {
    X,
    Y,
    Z,
}

impl From<FlipAxis> for Axis {
    fn from(value: FlipAxis) -> Self {
        match value {
            FlipAxis::X => Axis::X,
            FlipAxis::Y => Axis::Y,
            FlipAxis::Z => Axis::Z,
        }
    }
}

/// Up vector of the camera the buffer will be drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Up {
    /// Leave the mesh as-is
    None,
    /// Camera up is (0, 0, 1); mirrors along Z
    ZUp,
    /// Camera up is (0, 1, 0); rotates +90° about X
    YUp,
}

impl From<Up> for Orientation {
    fn from(value: Up) -> Self {
        match value {
            Up::None => Orientation::None,
            Up::ZUp => Orientation::ZUp,
            Up::YUp => Orientation::YUp,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,vbake=info,hedron=info,vbexport=info",
        env = "VBEXPORT_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Export a mesh file (.obj, .gltf, .glb) as a vertex buffer
    Export(ExportArgs),
    /// Summarize a vertex buffer file
    Inspect(InspectArgs),
}

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// Mesh file to export
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// Destination; defaults to the input path with a `.vb` extension
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Mirror along an axis; may be repeated
    #[arg(long, value_enum)]
    pub flip: Vec<FlipAxis>,
    /// Flip texture coordinates vertically
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub flip_uvs: bool,
    #[arg(long, value_enum, default_value_t = Up::ZUp)]
    pub orientation: Up,
    /// Uniform scale applied after flips & orientation
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub scale: f32,
    /// Fan-triangulate polygons before exporting
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub triangulate: bool,
    /// Prefix the records with a header carrying the record count
    #[arg(long)]
    pub header: bool,
    /// Export only the mesh with this name; by default every mesh in the file is merged
    #[arg(short, long)]
    pub mesh: Option<String>,
}

impl ExportArgs {
    pub fn transform(&self) -> TransformConfig {
        let mut flip_axis = [false; 3];
        for &axis in &self.flip {
            flip_axis[Axis::from(axis).index()] = true;
        }
        TransformConfig {
            flip_axis,
            orientation: self.orientation.into(),
            scale: self.scale,
            flip_uvs: self.flip_uvs,
        }
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("vb"))
    }
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Vertex buffer to read
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
    /// Treat the file as headered even without looking for the magic bytes
    #[arg(long)]
    pub header: bool,
    /// Print this many leading records
    #[arg(short, long, default_value_t = 0)]
    pub records: usize,
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[test]
    fn export_defaults() {
        let cli = Cli::try_parse_from(["vbexport", "export", "model.obj"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.output(), PathBuf::from("model.vb"));
        let config = args.transform();
        assert_eq!(config.orientation, Orientation::ZUp);
        assert!(config.flip_uvs);
        assert_eq!(config.flip_axis, [false; 3]);
        assert_eq!(config.scale, 1.0);
        assert!(args.triangulate);
    }

    #[test]
    fn export_flags() {
        let cli = Cli::try_parse_from([
            "vbexport",
            "export",
            "model.glb",
            "--flip",
            "x",
            "--flip",
            "y",
            "--flip-uvs",
            "false",
            "--orientation",
            "y-up",
            "--scale",
            "-2",
            "--header",
        ])
        .unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        let config = args.transform();
        assert_eq!(config.flip_axis, [true, true, false]);
        assert_eq!(config.orientation, Orientation::YUp);
        assert!(!config.flip_uvs);
        assert_eq!(config.scale, -2.0);
        assert!(args.header);
    }

    #[test]
    fn cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
