//! Coordinate transforms applied to meshes before encoding.
//!
//! A [TransformConfig] describes what the user asked for; [BakedTransform::resolve] turns it into
//! per-axis factors by walking a fixed sequence of steps:
//!
//! 1. For each of X and Y whose flip flag is set, negate that axis' scale and toggle the pending
//!    normal flip. The Z flag is not consumed here; Z is handled by [Orientation].
//! 2. [Orientation::ZUp] negates the Z scale, which mirrors like an axis flip and toggles the
//!    pending normal flip. [Orientation::YUp] rotates +90° about X and *sets* the pending flip.
//! 3. Multiply every scale component by the uniform scale. This never touches the pending flip,
//!    even when the uniform scale is negative.
//! 4. Bake `R · S` into positions one component at a time. Normals take the signs of the
//!    cofactor of `R · S`, so they follow the winding of the transformed faces the same way
//!    recomputed normals would, but keep their length.
//! 5. If the flip is pending, negate every normal and reverse every triangle's winding.
//!
//! The order matters: reproducing it is what keeps output bit-compatible with existing files.

use nalgebra::Vector3;

use hedron::{Normal, Position, Vertex};

/// One of the three coordinate axes.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Remapping applied to meshes to match the consumer's up vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Leave the mesh as-is.
    #[default]
    None,
    /// For cameras whose up vector is `(0, 0, 1)`; mirrors the mesh along Z.
    ZUp,
    /// For cameras whose up vector is `(0, 1, 0)`; rotates the mesh +90° about X.
    YUp,
}

/// User-facing description of the coordinate transform to apply before encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Mirror the mesh along each of X, Y, Z. Only X and Y are applied; Z is expressed through
    /// [Orientation::ZUp].
    pub flip_axis: [bool; 3],
    pub orientation: Orientation,
    /// Uniform scale applied after flips & orientation.
    pub scale: f32,
    /// Emit `1 - v` instead of `v` for texture coordinates.
    pub flip_uvs: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            flip_axis: [false; 3],
            orientation: Orientation::None,
            scale: 1.0,
            flip_uvs: false,
        }
    }
}

impl TransformConfig {
    #[inline]
    pub fn with_flip(mut self, axis: Axis) -> Self {
        self.flip_axis[axis.index()] = true;
        self
    }

    #[inline]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn with_flip_uvs(mut self, flip_uvs: bool) -> Self {
        self.flip_uvs = flip_uvs;
        self
    }

    #[inline]
    pub fn flips(&self, axis: Axis) -> bool {
        self.flip_axis[axis.index()]
    }
}

/// +90° about X, exactly; `(x, y, z) -> (x, -z, y)`
#[inline(always)]
fn quarter_turn_x(v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, -v.z, v.y)
}

/// A [TransformConfig], resolved into the per-axis factors & flags used while encoding.
///
/// Every step is diagonal or a signed permutation, so each output component depends on exactly
/// one input component. Non-finite input components pass through without contaminating the
/// others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakedTransform {
    scale: Vector3<f32>,
    /// Diagonal of the cofactor of the scale, reduced to its sign; zero when the scale is zero.
    normal: Vector3<f32>,
    quarter_turn: bool,
    flip_normals: bool,
    flip_uvs: bool,
}

impl Default for BakedTransform {
    fn default() -> Self {
        Self::resolve(&TransformConfig::default())
    }
}

impl BakedTransform {
    pub fn resolve(config: &TransformConfig) -> Self {
        let mut mirror = Vector3::repeat(1.0f32);
        let mut flip_normals = false;

        for axis in [Axis::X, Axis::Y] {
            if config.flips(axis) {
                mirror[axis.index()] = -mirror[axis.index()];
                flip_normals = !flip_normals;
            }
        }
        if config.flips(Axis::Z) {
            tracing::debug!("ignoring Z axis flip; use Orientation::ZUp to mirror along Z");
        }

        let quarter_turn = match config.orientation {
            Orientation::None => false,
            Orientation::ZUp => {
                mirror.z = -mirror.z;
                flip_normals = !flip_normals;
                false
            }
            Orientation::YUp => {
                flip_normals = true;
                true
            }
        };

        // cofactor of diag(s·m) is s²·diag(my·mz, mx·mz, mx·my); s² only rescales
        let normal = if config.scale == 0.0 {
            Vector3::zeros()
        } else {
            Vector3::new(mirror.y * mirror.z, mirror.x * mirror.z, mirror.x * mirror.y)
        };

        Self {
            scale: mirror * config.scale,
            normal,
            quarter_turn,
            flip_normals,
            flip_uvs: config.flip_uvs,
        }
    }

    /// Per-axis scale applied to positions before any rotation.
    #[inline]
    pub fn scale(&self) -> &Vector3<f32> {
        &self.scale
    }

    /// Whether normals are negated & triangle winding reversed.
    #[inline]
    pub fn flips_normals(&self) -> bool {
        self.flip_normals
    }

    #[inline]
    pub fn flips_uvs(&self) -> bool {
        self.flip_uvs
    }

    #[inline]
    fn orient(&self, v: Vector3<f32>) -> Vector3<f32> {
        if self.quarter_turn {
            quarter_turn_x(v)
        } else {
            v
        }
    }

    #[inline]
    pub fn position(&self, position: &Position) -> Position {
        Position::from(self.orient(position.coords.component_mul(&self.scale)))
    }

    /// Transform a normal without renormalizing it; only component signs and order change.
    #[inline]
    pub fn normal(&self, normal: &Normal) -> Normal {
        let n = self.orient(normal.component_mul(&self.normal));
        if self.flip_normals {
            -n
        } else {
            n
        }
    }

    #[inline]
    pub fn vertex(&self, vertex: &Vertex) -> Vertex {
        Vertex {
            position: self.position(&vertex.position),
            normal: self.normal(&vertex.normal),
        }
    }

    /// The order in which a triangle's corners are emitted.
    #[inline]
    pub fn winding(&self) -> [usize; 3] {
        if self.flip_normals {
            [0, 2, 1]
        } else {
            [0, 1, 2]
        }
    }

    /// Apply the vertical texture coordinate flip, if enabled.
    #[inline]
    pub fn uv(&self, u: f32, v: f32) -> [f32; 2] {
        if self.flip_uvs {
            [u, 1.0 - v]
        } else {
            [u, v]
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::{point, vector};

    fn flips(config: TransformConfig) -> bool {
        BakedTransform::resolve(&config).flips_normals()
    }

    #[test]
    fn handedness() {
        let base = TransformConfig::default();
        assert!(!flips(base));
        assert!(flips(base.with_flip(Axis::X)));
        assert!(flips(base.with_flip(Axis::Y)));
        assert!(flips(base.with_orientation(Orientation::ZUp)));
        assert!(!flips(base.with_flip(Axis::X).with_flip(Axis::Y)));
        assert!(!flips(base.with_flip(Axis::X).with_orientation(Orientation::ZUp)));
        assert!(flips(
            base.with_flip(Axis::X)
                .with_flip(Axis::Y)
                .with_orientation(Orientation::ZUp)
        ));
        // z is folded into orientation
        assert!(!flips(base.with_flip(Axis::Z)));
    }

    #[test]
    fn y_up_sets_pending_flip() {
        let base = TransformConfig::default().with_orientation(Orientation::YUp);
        assert!(flips(base));
        assert!(flips(base.with_flip(Axis::X)));
    }

    #[test]
    fn negative_scale_does_not_flip() {
        let t = BakedTransform::resolve(&TransformConfig::default().with_scale(-2.0));
        assert!(!t.flips_normals());
        assert_eq!(t.scale(), &vector![-2.0, -2.0, -2.0]);
        assert_eq!(t.position(&point![1.0, 2.0, 3.0]), point![-2.0, -4.0, -6.0]);
        assert_eq!(t.winding(), [0, 1, 2]);
    }

    #[test]
    fn y_up_rotation() {
        let t = BakedTransform::resolve(
            &TransformConfig::default().with_orientation(Orientation::YUp),
        );
        assert_eq!(t.position(&point![1.0, 2.0, 3.0]), point![1.0, -3.0, 2.0]);
        // rotated, then negated by the pending flip
        assert_eq!(t.normal(&vector![0.0, 0.0, 1.0]), vector![0.0, 1.0, 0.0]);
    }

    #[test]
    fn mirrored_normals_follow_winding_then_flip() {
        let t = BakedTransform::resolve(&TransformConfig::default().with_flip(Axis::X));
        assert_eq!(t.position(&point![1.0, 2.0, 3.0]), point![-1.0, 2.0, 3.0]);
        // a mirror reverses the geometric normal; the pending flip restores it
        assert_eq!(t.normal(&vector![0.0, 0.0, 1.0]), vector![0.0, 0.0, 1.0]);
        assert_eq!(t.normal(&vector![1.0, 0.0, 0.0]), vector![-1.0, 0.0, 0.0]);
        assert_eq!(t.winding(), [0, 2, 1]);
    }

    #[test]
    fn scale_preserves_unit_normals() {
        let t = BakedTransform::resolve(&TransformConfig::default().with_scale(3.0));
        assert_eq!(t.position(&point![1.0, 0.0, 0.0]), point![3.0, 0.0, 0.0]);
        assert_eq!(t.normal(&vector![0.0, 1.0, 0.0]), vector![0.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_scale_keeps_zero_normals() {
        let t = BakedTransform::resolve(&TransformConfig::default().with_scale(0.0));
        assert_eq!(t.normal(&vector![0.0, 0.0, 1.0]), Normal::zeros());
    }

    #[test]
    fn normals_keep_their_length() {
        let t = BakedTransform::default();
        for n in [
            vector![0.0, 0.0, 2.0],
            vector![0.1, 0.2, 0.3],
            vector![0.267261, 0.534522, 0.801784],
        ] {
            let out = t.normal(&n);
            assert_eq!(out.map(f32::to_bits), n.map(f32::to_bits));
        }
        let t = BakedTransform::resolve(&TransformConfig::default().with_scale(5.0));
        assert_eq!(t.normal(&vector![0.0, 0.0, 2.0]), vector![0.0, 0.0, 2.0]);
        let t = BakedTransform::resolve(&TransformConfig::default().with_flip(Axis::Y));
        assert_eq!(t.normal(&vector![0.1, 0.2, 0.3]), vector![0.1, -0.2, 0.3]);
    }

    #[test]
    fn non_finite_components_stay_put() {
        let t = BakedTransform::default();
        let p = t.position(&point![f32::INFINITY, 0.0, f32::NAN]);
        assert_eq!(p.x, f32::INFINITY);
        assert_eq!(p.y, 0.0);
        assert!(p.z.is_nan());
        let n = t.normal(&vector![f32::INFINITY, 0.0, 0.0]);
        assert_eq!(n, vector![f32::INFINITY, 0.0, 0.0]);

        let t = BakedTransform::resolve(
            &TransformConfig::default()
                .with_orientation(Orientation::YUp)
                .with_scale(2.0),
        );
        let p = t.position(&point![f32::INFINITY, 1.0, f32::NEG_INFINITY]);
        assert_eq!(p, point![f32::INFINITY, f32::INFINITY, 2.0]);
        let n = t.normal(&vector![0.0, f32::NAN, 1.0]);
        assert_eq!(n.x, 0.0);
        assert_eq!(n.y, 1.0);
        assert!(n.z.is_nan());
    }

    #[test]
    fn uv_flip() {
        let t = BakedTransform::resolve(&TransformConfig::default().with_flip_uvs(true));
        assert_eq!(t.uv(0.25, 0.0), [0.25, 1.0]);
        assert_eq!(t.uv(0.25, 1.0), [0.25, 0.0]);
        assert_eq!(BakedTransform::default().uv(0.25, 0.75), [0.25, 0.75]);
    }
}
