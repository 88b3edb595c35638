//! The fixed-layout vertex record.
//!
//! Every face corner becomes one 36-byte record, laid out to match GameMaker's
//!
//! ```text
//! vertex_format_add_normal();      // 3 × f32
//! vertex_format_add_texcoord();    // 2 × f32
//! vertex_format_add_position_3d(); // 3 × f32
//! vertex_format_add_color();       // 4 × u8
//! ```
//!
//! All multi-byte values are little-endian; there is no padding.

use hedron::{
    Attribute, AttributeComponent, AttributeType, AttributeUsage, Normal, Position, Rgb, Texcoord,
};
use nalgebra::{Point2, Point3, Vector3};

/// One attribute of the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutEntry {
    pub usage: AttributeUsage,
    pub ty: AttributeType,
    pub component: AttributeComponent,
}

impl LayoutEntry {
    const fn of<T: Attribute>(usage: AttributeUsage) -> Self {
        Self {
            usage,
            ty: T::TYPE,
            component: T::COMPONENT,
        }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.ty.size_bytes(self.component)
    }
}

/// The attributes of a [VertexRecord], in the order they're written.
pub const LAYOUT: [LayoutEntry; 4] = [
    LayoutEntry::of::<Vector3<f32>>(AttributeUsage::Normal),
    LayoutEntry::of::<Point2<f32>>(AttributeUsage::Texcoord(0)),
    LayoutEntry::of::<Point3<f32>>(AttributeUsage::Position),
    LayoutEntry::of::<[u8; 4]>(AttributeUsage::Color(0)),
];

/// Size in bytes of one encoded [VertexRecord].
pub const RECORD_SIZE: usize = 36;

const fn layout_size() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < LAYOUT.len() {
        total += LAYOUT[i].size();
        i += 1;
    }
    total
}

static_assertions::const_assert_eq!(layout_size(), RECORD_SIZE);

/// Quantize one color channel: `floor(255 · c)`.
///
/// Truncation (not rounding) is part of the format; `0.999999` becomes `254`. Inputs outside
/// `[0, 1]` saturate to `0` or `255` and NaN becomes `0`.
#[inline]
pub fn pack_channel(c: f32) -> u8 {
    (255.0 * f64::from(c)).floor() as u8
}

/// Quantize an RGB color to RGBA bytes; alpha is always opaque.
#[inline]
pub fn pack_color(color: &Rgb<f32>) -> [u8; 4] {
    [
        pack_channel(color.x),
        pack_channel(color.y),
        pack_channel(color.z),
        u8::MAX,
    ]
}

/// The attributes emitted for one face corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    pub normal: Normal,
    pub uv: Texcoord<f32>,
    pub position: Position,
    pub color: [u8; 4],
}

impl VertexRecord {
    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        let floats = self
            .normal
            .iter()
            .chain(self.uv.iter())
            .chain(self.position.iter());
        for (chunk, value) in out.chunks_exact_mut(4).zip(floats) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out[32..].copy_from_slice(&self.color);
        out
    }

    /// Parse the on-disk layout.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let f = |i: usize| {
            f32::from_le_bytes([
                bytes[i * 4],
                bytes[i * 4 + 1],
                bytes[i * 4 + 2],
                bytes[i * 4 + 3],
            ])
        };
        Self {
            normal: Vector3::new(f(0), f(1), f(2)),
            uv: Point2::new(f(3), f(4)),
            position: Point3::new(f(5), f(6), f(7)),
            color: [bytes[32], bytes[33], bytes[34], bytes[35]],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::{point, vector};

    #[test]
    fn color_truncates() {
        assert_eq!(pack_channel(0.0), 0);
        assert_eq!(pack_channel(1.0), 255);
        assert_eq!(pack_channel(0.999999), 254);
        assert_eq!(pack_channel(0.5), 127);
        assert_eq!(pack_color(&Rgb::new(1.0, 0.5, 0.0)), [255, 127, 0, 255]);
    }

    #[test]
    fn out_of_range_color_saturates() {
        assert_eq!(pack_channel(2.0), 255);
        assert_eq!(pack_channel(-1.0), 0);
        assert_eq!(pack_channel(f32::NAN), 0);
    }

    #[test]
    fn byte_layout() {
        let record = VertexRecord {
            normal: vector![0.0, 0.0, 1.0],
            uv: point![0.5, 0.25],
            position: point![1.0, 2.0, 3.0],
            color: [1, 2, 3, 4],
        };
        let bytes = record.to_bytes();
        assert_eq!(&bytes[8..12], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[16..20], &0.25f32.to_le_bytes());
        assert_eq!(&bytes[28..32], &3.0f32.to_le_bytes());
        assert_eq!(&bytes[32..], &[1, 2, 3, 4]);
        assert_eq!(VertexRecord::from_bytes(&bytes), record);
    }

    #[test]
    fn layout_order() {
        let usages: Vec<_> = LAYOUT.iter().map(|e| e.usage).collect();
        assert_eq!(
            usages,
            [
                AttributeUsage::Normal,
                AttributeUsage::Texcoord(0),
                AttributeUsage::Position,
                AttributeUsage::Color(0)
            ]
        );
    }
}
