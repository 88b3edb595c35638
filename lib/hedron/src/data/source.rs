use vbake_common::ArrayIndex;

use crate::{Mesh, Rgb, Texcoord, Vertex};

/// Read-only access to a finalized mesh, as needed by encoders.
///
/// Faces are addressed by index `0..face_count()`; corners by their position within the face.
/// Per-corner channels are only queried when the matching `has_*_channel` method returns `true`.
///
/// Implementors return `None` for any reference they cannot resolve; callers turn that into an
/// error naming the face and corner at fault.
pub trait MeshSource {
    type Index: ArrayIndex;

    fn face_count(&self) -> usize;
    /// The vertex indices of each corner of face `face`, in winding order.
    fn face(&self, face: usize) -> Option<&[Self::Index]>;

    fn vertex_count(&self) -> usize;
    fn vertex(&self, index: usize) -> Option<Vertex>;

    fn has_color_channel(&self) -> bool;
    fn has_uv_channel(&self) -> bool;
    fn corner_color(&self, face: usize, corner: usize) -> Option<Rgb<f32>>;
    fn corner_uv(&self, face: usize, corner: usize) -> Option<Texcoord<f32>>;

    /// Iterate over every face index along with its corners.
    fn faces(&self) -> Faces<'_, Self>
    where
        Self: Sized,
    {
        Faces {
            source: self,
            next: 0,
        }
    }
}

/// Iterator over the faces of a [MeshSource].
#[derive(Debug)]
pub struct Faces<'src, S> {
    source: &'src S,
    next: usize,
}

impl<'src, S: MeshSource> Iterator for Faces<'src, S> {
    /// `(face index, corner vertex indices)`; `None` if the source could not resolve the face.
    type Item = (usize, Option<&'src [S::Index]>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.source.face_count() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((index, self.source.face(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.face_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'src, S: MeshSource> ExactSizeIterator for Faces<'src, S> {}

impl<Idx: ArrayIndex> MeshSource for Mesh<Idx> {
    type Index = Idx;

    #[inline]
    fn face_count(&self) -> usize {
        Mesh::face_count(self)
    }

    #[inline]
    fn face(&self, face: usize) -> Option<&[Idx]> {
        Mesh::face(self, face)
    }

    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    #[inline]
    fn vertex(&self, index: usize) -> Option<Vertex> {
        self.vertices().get(index).copied()
    }

    #[inline]
    fn has_color_channel(&self) -> bool {
        self.colors().is_some()
    }

    #[inline]
    fn has_uv_channel(&self) -> bool {
        self.texcoords().is_some()
    }

    fn corner_color(&self, face: usize, corner: usize) -> Option<Rgb<f32>> {
        let range = self.face_range(face)?;
        if corner >= range.len() {
            return None;
        }
        self.colors()?.get(range.start + corner).copied()
    }

    fn corner_uv(&self, face: usize, corner: usize) -> Option<Texcoord<f32>> {
        let range = self.face_range(face)?;
        if corner >= range.len() {
            return None;
        }
        self.texcoords()?.get(range.start + corner).copied()
    }
}

impl<S: MeshSource> MeshSource for &S {
    type Index = S::Index;

    fn face_count(&self) -> usize {
        (**self).face_count()
    }
    fn face(&self, face: usize) -> Option<&[S::Index]> {
        (**self).face(face)
    }
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }
    fn vertex(&self, index: usize) -> Option<Vertex> {
        (**self).vertex(index)
    }
    fn has_color_channel(&self) -> bool {
        (**self).has_color_channel()
    }
    fn has_uv_channel(&self) -> bool {
        (**self).has_uv_channel()
    }
    fn corner_color(&self, face: usize, corner: usize) -> Option<Rgb<f32>> {
        (**self).corner_color(face, corner)
    }
    fn corner_uv(&self, face: usize, corner: usize) -> Option<Texcoord<f32>> {
        (**self).corner_uv(face, corner)
    }
}
