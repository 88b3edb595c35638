//! Bake triangle meshes into flat vertex buffers for GameMaker Studio 2.
//!
//! An [Encoder] takes any [MeshSource](hedron::MeshSource) and a [TransformConfig], and writes one
//! 36-byte [VertexRecord] per face corner, in face order, to any [Write](std::io::Write) sink.
//! The resulting file can be loaded directly with `buffer_load` and
//! `vertex_create_buffer_from_buffer` against the vertex format
//!
//! ```text
//! vertex_format_add_normal();
//! vertex_format_add_texcoord();
//! vertex_format_add_position_3d();
//! vertex_format_add_color();
//! ```
//!
//! ```
//! use hedron::{Mesh, Vertex};
//! use nalgebra::{point, vector};
//! use vbake::{Encoder, TransformConfig};
//!
//! let up = vector![0.0, 0.0, 1.0];
//! let mesh = Mesh::from_triangles(
//!     vec![
//!         Vertex::new(point![0.0, 0.0, 0.0], up),
//!         Vertex::new(point![1.0, 0.0, 0.0], up),
//!         Vertex::new(point![0.0, 1.0, 0.0], up),
//!     ],
//!     [[0u32, 1, 2]],
//! );
//! let bytes = Encoder::new(TransformConfig::default()).encode_to_vec(&mesh)?;
//! assert_eq!(bytes.len(), 3 * vbake::RECORD_SIZE);
//! # Ok::<(), vbake::error::Error>(())
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod channel;
mod decode;
mod encode;
pub mod error;
mod export;
pub mod framing;
mod record;
pub mod transform;

pub use decode::*;
pub use encode::*;
pub use framing::Framing;
pub use record::*;
pub use transform::{Axis, Orientation, TransformConfig};

pub use hedron;
