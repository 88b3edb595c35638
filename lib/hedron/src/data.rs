//! In-memory mesh data, and the [MeshSource] interface through which encoders read it.

mod attribute;
mod mesh;
mod source;

pub use attribute::*;
pub use mesh::*;
pub use source::*;
