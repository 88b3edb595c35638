//! Writing vertex buffers to disk.

use std::{
    io::BufWriter,
    path::{Path, PathBuf},
};

use hedron::MeshSource;
use tempfile::NamedTempFile;

use crate::{
    encode::{EncodeSummary, Encoder},
    error::Error,
};

impl Encoder {
    /// Encode `mesh` into the file at `path`, replacing it only if the whole export succeeds.
    ///
    /// Records are staged in a temporary file next to `path`, synced, then renamed over it. On any
    /// failure the temporary file is removed and `path` is left untouched.
    #[tracing::instrument(skip(self, mesh, path), fields(path = ?path.as_ref()))]
    pub fn export_to_path<M: MeshSource>(
        &self,
        mesh: &M,
        path: impl AsRef<Path>,
    ) -> Result<EncodeSummary, Error> {
        let path = path.as_ref();
        self.validate(mesh)?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let stage = |source| Error::Stage {
            path: path.to_path_buf(),
            source,
        };
        let staged = NamedTempFile::new_in(dir).map_err(stage)?;
        tracing::trace!(staged = ?staged.path(), "staging export");

        let mut writer = BufWriter::new(staged);
        let summary = self.encode(mesh, &mut writer)?;
        let staged = writer.into_inner().map_err(|e| stage(e.into_error()))?;
        staged.as_file().sync_all().map_err(stage)?;

        staged.persist(path).map_err(|e| Error::Persist {
            path: PathBuf::from(path),
            source: e.error,
        })?;
        tracing::debug!(bytes = summary.bytes, "exported vertex buffer");
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hedron::{Mesh, Vertex};
    use nalgebra::{point, vector};

    #[test]
    fn failed_export_leaves_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("mesh.vb");
        std::fs::write(&dest, b"previous").unwrap();

        let dangling = Mesh::from_triangles(
            vec![Vertex::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, 1.0])],
            [[0u32, 1, 2]],
        );
        assert!(Encoder::default().export_to_path(&dangling, &dest).is_err());
        assert_eq!(std::fs::read(&dest).unwrap(), b"previous");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn export_writes_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("tri.vb");
        let n = vector![0.0, 0.0, 1.0];
        let mesh = Mesh::from_triangles(
            vec![
                Vertex::new(point![0.0, 0.0, 0.0], n),
                Vertex::new(point![1.0, 0.0, 0.0], n),
                Vertex::new(point![0.0, 1.0, 0.0], n),
            ],
            [[0u32, 1, 2]],
        );
        let summary = Encoder::default().export_to_path(&mesh, &dest).unwrap();
        assert_eq!(summary.bytes, 108);
        assert_eq!(std::fs::read(&dest).unwrap().len(), 108);
    }
}
