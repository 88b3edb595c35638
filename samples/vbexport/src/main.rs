use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use hedron::de::{LoadError, LoadOptions};
use vbake::{error::DecodeError, Encoder, Framing};

mod cli;
mod inspect;
mod load;

use cli::{Cli, Command, ExportArgs};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Mesh(#[from] hedron::MeshError),
    #[error(transparent)]
    Encode(#[from] vbake::error::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("could not read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} contains no meshes")]
    NoMeshes { path: PathBuf },
    #[error("{path:?} has no mesh named {name:?}")]
    MeshNotFound { path: PathBuf, name: String },
}

fn export(args: &ExportArgs) -> Result<(), Error> {
    let options = LoadOptions {
        triangulate: args.triangulate,
    };
    let mesh = load::load_mesh(&args.input, &options, args.mesh.as_deref())?;

    let framing = if args.header {
        Framing::Headered
    } else {
        Framing::Raw
    };
    let encoder = Encoder::new(args.transform()).with_framing(framing);
    let output = args.output();
    let summary = encoder.export_to_path(&mesh, &output)?;

    tracing::info!(
        output = ?output,
        triangles = summary.triangles,
        bytes = summary.bytes,
        flipped_normals = summary.flipped_normals,
        uv_defaulted = summary.uv_defaulted,
        color_defaulted = summary.color_defaulted,
        "exported"
    );
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let result = match &cli.command {
        Command::Export(args) => export(args),
        Command::Inspect(args) => inspect::inspect(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, source = ?std::error::Error::source(&e));
            ExitCode::FAILURE
        }
    }
}
