//! Deserialization of meshes from various storage formats.
//!
//! Loaders are the "preprocessor" half of an export: they produce finalized [Meshes](crate::Mesh)
//! in this library's coordinate system (right-handed, Z-up, bottom-left texture origin),
//! recomputing vertex normals when the source has none and fan-triangulating polygons when asked.

use std::path::{Path, PathBuf};

use vbake_common::ArrayIndex;

use crate::{Mesh, MeshError};

#[cfg(feature = "de_gltf")]
pub mod gltf;
#[cfg(feature = "de_obj")]
pub mod obj;

/// Errors related to loading meshes from files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "de_obj")]
    #[error(transparent)]
    Obj(#[from] tobj::LoadError),
    #[cfg(feature = "de_gltf")]
    #[error(transparent)]
    Gltf(#[from] ::gltf::Error),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("{mesh}: vertex index {index} is out of range (0..{count})")]
    IndexOutOfRange {
        mesh: String,
        index: usize,
        count: usize,
    },
    #[error("{mesh}: vertex index {index} does not fit the requested index type")]
    IndexOverflow { mesh: String, index: usize },
    #[error("{mesh}: primitive {primitive} has no vertex positions")]
    MissingPositions { mesh: String, primitive: usize },
    #[error("no loader for file {0:?}")]
    UnknownFormat(PathBuf),
}

/// Options shared by every loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    /// Fan-triangulate faces with more than three corners.
    pub triangulate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { triangulate: true }
    }
}

/// A mesh, along with the name it had in its source file (if any).
#[derive(Debug, Clone)]
pub struct NamedMesh<Idx: ArrayIndex = u32> {
    pub name: Option<String>,
    pub mesh: Mesh<Idx>,
}

impl<Idx: ArrayIndex> NamedMesh<Idx> {
    /// A name suitable for log & error messages.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Load every mesh in the file at `path`, choosing a loader by file extension.
pub fn load_path<Idx: ArrayIndex>(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        #[cfg(feature = "de_obj")]
        Some("obj") => obj::load_obj(path, options),
        #[cfg(feature = "de_gltf")]
        Some("gltf" | "glb") => gltf::load_gltf(path, options),
        _ => Err(LoadError::UnknownFormat(path.to_path_buf())),
    }
}

/// Narrow a source-file vertex index, checking it against the vertex count.
pub(crate) fn corner_index<Idx: ArrayIndex>(
    mesh: &str,
    index: usize,
    count: usize,
) -> Result<Idx, LoadError> {
    if index >= count {
        return Err(LoadError::IndexOutOfRange {
            mesh: mesh.to_owned(),
            index,
            count,
        });
    }
    Idx::narrow(index).ok_or_else(|| LoadError::IndexOverflow {
        mesh: mesh.to_owned(),
        index,
    })
}
