use std::path::PathBuf;

use hedron::AttributeUsage;

/// Errors related to encoding & exporting vertex buffers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidMesh(#[from] InvalidMeshError),
    #[error(transparent)]
    AttributeIndex(#[from] AttributeIndexError),
    #[error("sink rejected write at byte offset {offset}")]
    SinkWrite {
        offset: u64,
        #[source]
        source: std::io::Error,
    },
    #[error("could not stage export in the directory of {path:?}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not move finished export into place at {path:?}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The mesh handed to the encoder is not an encodable triangle mesh.
#[derive(Debug, thiserror::Error)]
pub enum InvalidMeshError {
    #[error("mesh has no triangles")]
    Empty,
    #[error("face {face} has {corners} corners; expected a triangle")]
    NotTriangulated { face: usize, corners: usize },
    #[error("face {face} could not be read from the mesh")]
    MissingFace { face: usize },
    #[error("{records} records don't fit in a vertex buffer header")]
    TooManyRecords { records: usize },
}

/// A face corner refers to data the mesh doesn't have.
#[derive(Debug, thiserror::Error)]
pub enum AttributeIndexError {
    #[error("face {face}, corner {corner}: vertex index {index} out of range (0..{count})")]
    Vertex {
        face: usize,
        corner: usize,
        index: usize,
        count: usize,
    },
    #[error("face {face}, corner {corner}: no {attribute} value")]
    Corner {
        face: usize,
        corner: usize,
        attribute: AttributeUsage,
    },
}

/// Errors related to reading vertex buffers back.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("stream ends {trailing} bytes into a record at byte offset {offset}")]
    Truncated { offset: u64, trailing: usize },
    #[error("expected header magic {expected:?}, found {found:?}")]
    Magic { expected: [u8; 4], found: [u8; 4] },
    #[error("unsupported vertex buffer version {0}")]
    Version(u16),
    #[error("unsupported record stride {0}")]
    Stride(u16),
    #[error("header declares {declared} records, stream holds {actual}")]
    RecordCount { declared: u32, actual: u64 },
}
