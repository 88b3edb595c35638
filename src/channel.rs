//! Per-corner attribute channels, and the values substituted for missing ones.

use hedron::{AttributeUsage, MeshSource, Rgb, Texcoord};

use crate::error::AttributeIndexError;

/// Color emitted for every corner of a mesh without a color channel: opaque white.
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Texture coordinate emitted for every corner of a mesh without a texture coordinate channel.
pub const DEFAULT_UV: [f32; 2] = [0.0, 0.0];

/// Where a corner attribute comes from; decided once per mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Channel<T> {
    /// Read from the mesh, per corner.
    Sampled,
    /// The mesh lacks this channel; every corner gets the same value.
    Fixed(T),
}

impl<T> Channel<T> {
    #[inline]
    pub fn is_sampled(&self) -> bool {
        matches!(self, Channel::Sampled)
    }
}

/// The resolved texture coordinate & color channels of one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerChannels {
    pub uv: Channel<Texcoord<f32>>,
    pub color: Channel<Rgb<f32>>,
}

impl CornerChannels {
    pub fn for_mesh<M: MeshSource>(mesh: &M) -> Self {
        Self {
            uv: if mesh.has_uv_channel() {
                Channel::Sampled
            } else {
                Channel::Fixed(Texcoord::from(DEFAULT_UV))
            },
            color: if mesh.has_color_channel() {
                Channel::Sampled
            } else {
                Channel::Fixed(Rgb::from(DEFAULT_COLOR))
            },
        }
    }

    #[inline]
    pub fn uv<M: MeshSource>(
        &self,
        mesh: &M,
        face: usize,
        corner: usize,
    ) -> Result<Texcoord<f32>, AttributeIndexError> {
        match self.uv {
            Channel::Fixed(uv) => Ok(uv),
            Channel::Sampled => mesh.corner_uv(face, corner).ok_or(AttributeIndexError::Corner {
                face,
                corner,
                attribute: AttributeUsage::Texcoord(0),
            }),
        }
    }

    #[inline]
    pub fn color<M: MeshSource>(
        &self,
        mesh: &M,
        face: usize,
        corner: usize,
    ) -> Result<Rgb<f32>, AttributeIndexError> {
        match self.color {
            Channel::Fixed(color) => Ok(color),
            Channel::Sampled => {
                mesh.corner_color(face, corner)
                    .ok_or(AttributeIndexError::Corner {
                        face,
                        corner,
                        attribute: AttributeUsage::Color(0),
                    })
            }
        }
    }
}
