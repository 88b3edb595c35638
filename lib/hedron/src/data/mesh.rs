use std::ops::Range;

use vbake_common::ArrayIndex;

use crate::{AttributeUsage, Normal, Rgb, Texcoord, Vertex};

/// Errors related to constructing [Meshes](Mesh).
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("{attribute} channel has {len} values, but the mesh has {corners} face corners")]
    ChannelLength {
        attribute: AttributeUsage,
        len: usize,
        corners: usize,
    },
    #[error("face offsets must start at 0, never decrease, and end at the corner count ({corners})")]
    FaceOffsets { corners: usize },
    #[error("vertex index {0} is not representable by the mesh's index type")]
    IndexOverflow(usize),
}

/// An immutable-by-convention snapshot of a polygon mesh.
///
/// # Characteristics
///
/// * Vertices own a position and a normal, and may be shared between faces.
/// * Faces are stored as runs of *corners* in one flat array; each corner refers to a vertex.
///   Face `f` owns corners `face_starts[f]..face_starts[f + 1]`.
/// * Texture coordinates and colors are optional, per-corner channels, stored parallel to the
///   corner array. A channel is either present for every corner or absent entirely.
/// * Faces may have any number of corners; [Mesh::triangulated] fans them into triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<Idx: ArrayIndex = u32> {
    vertices: Vec<Vertex>,
    corners: Vec<Idx>,
    face_starts: Vec<usize>,
    texcoords: Option<Vec<Texcoord<f32>>>,
    colors: Option<Vec<Rgb<f32>>>,
}

impl<Idx: ArrayIndex> Default for Mesh<Idx> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<Idx: ArrayIndex> Mesh<Idx> {
    /// A mesh with vertices but no faces.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            corners: Vec::new(),
            face_starts: vec![0],
            texcoords: None,
            colors: None,
        }
    }

    /// A mesh with one face per triangle and no per-corner channels.
    pub fn from_triangles(
        vertices: Vec<Vertex>,
        triangles: impl IntoIterator<Item = [Idx; 3]>,
    ) -> Self {
        let corners: Vec<Idx> = triangles.into_iter().flatten().collect();
        let face_starts = (0..=corners.len()).step_by(3).collect();
        Self {
            vertices,
            corners,
            face_starts,
            texcoords: None,
            colors: None,
        }
    }

    /// Assemble a mesh from its raw parts, validating that they describe the same corners.
    ///
    /// Vertex indices are *not* checked against the vertex list; consumers report dangling
    /// references with the face and corner they occur in.
    pub fn from_parts(
        vertices: Vec<Vertex>,
        corners: Vec<Idx>,
        face_starts: Vec<usize>,
        texcoords: Option<Vec<Texcoord<f32>>>,
        colors: Option<Vec<Rgb<f32>>>,
    ) -> Result<Self, MeshError> {
        let offsets_valid = face_starts.first() == Some(&0)
            && face_starts.last() == Some(&corners.len())
            && face_starts.windows(2).all(|w| w[0] <= w[1]);
        if !offsets_valid {
            return Err(MeshError::FaceOffsets {
                corners: corners.len(),
            });
        }
        Self {
            vertices,
            corners,
            face_starts,
            texcoords: None,
            colors: None,
        }
        .with_texcoords(texcoords)?
        .with_colors(colors)
    }

    /// Replace the texture coordinate channel.
    pub fn with_texcoords(
        mut self,
        texcoords: Option<Vec<Texcoord<f32>>>,
    ) -> Result<Self, MeshError> {
        self.check_channel(AttributeUsage::Texcoord(0), texcoords.as_deref())?;
        self.texcoords = texcoords;
        Ok(self)
    }

    /// Replace the color channel.
    pub fn with_colors(mut self, colors: Option<Vec<Rgb<f32>>>) -> Result<Self, MeshError> {
        self.check_channel(AttributeUsage::Color(0), colors.as_deref())?;
        self.colors = colors;
        Ok(self)
    }

    fn check_channel<T>(&self, attribute: AttributeUsage, data: Option<&[T]>) -> Result<(), MeshError> {
        match data {
            Some(data) if data.len() != self.corners.len() => Err(MeshError::ChannelLength {
                attribute,
                len: data.len(),
                corners: self.corners.len(),
            }),
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    #[inline]
    pub fn corners(&self) -> &[Idx] {
        &self.corners
    }

    #[inline]
    pub fn texcoords(&self) -> Option<&[Texcoord<f32>]> {
        self.texcoords.as_deref()
    }

    #[inline]
    pub fn colors(&self) -> Option<&[Rgb<f32>]> {
        self.colors.as_deref()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_starts.len() - 1
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// The range of corner indices owned by face `face`.
    #[inline]
    pub fn face_range(&self, face: usize) -> Option<Range<usize>> {
        Some(*self.face_starts.get(face)?..*self.face_starts.get(face + 1)?)
    }

    /// The vertex indices of each corner of face `face`, in winding order.
    #[inline]
    pub fn face(&self, face: usize) -> Option<&[Idx]> {
        self.face_range(face).map(|r| &self.corners[r])
    }

    pub fn faces(&self) -> impl ExactSizeIterator<Item = &[Idx]> + '_ {
        self.face_starts
            .windows(2)
            .map(|w| &self.corners[w[0]..w[1]])
    }

    /// Whether every face has exactly three corners.
    pub fn is_triangulated(&self) -> bool {
        self.faces().all(|f| f.len() == 3)
    }

    /// Fan-triangulate every face, carrying per-corner channels along with their corners.
    ///
    /// Faces with fewer than three corners (points, edges) have no area and are dropped.
    pub fn triangulated(&self) -> Self {
        let tri_count: usize = self.faces().map(|f| f.len().saturating_sub(2)).sum();
        let mut picks = Vec::with_capacity(tri_count * 3);
        for face in 0..self.face_count() {
            let range = self.face_starts[face]..self.face_starts[face + 1];
            if range.len() < 3 {
                tracing::debug!(face, corners = range.len(), "dropping degenerate face");
                continue;
            }
            let first = range.start;
            for i in (range.start + 1)..(range.end - 1) {
                picks.extend_from_slice(&[first, i, i + 1]);
            }
        }

        Self {
            vertices: self.vertices.clone(),
            corners: picks.iter().map(|&c| self.corners[c]).collect(),
            face_starts: (0..=picks.len()).step_by(3).collect(),
            texcoords: pick_corners(self.texcoords.as_deref(), &picks),
            colors: pick_corners(self.colors.as_deref(), &picks),
        }
    }

    /// Replace every vertex normal with the area-weighted average of the normals of the faces
    /// around it.
    ///
    /// Vertices not referenced by any face, or only by degenerate faces, receive a zero normal.
    pub fn recompute_normals(&mut self) {
        let mut sums = vec![Normal::zeros(); self.vertices.len()];
        for face in self.faces() {
            let Some(positions) = face
                .iter()
                .map(|&i| self.vertices.get(i.widen()).map(|v| v.position))
                .collect::<Option<Vec<_>>>()
            else {
                tracing::warn!("skipping face with dangling vertex reference during normal recomputation");
                continue;
            };
            if positions.len() < 3 {
                continue;
            }
            // fan around the first corner; the length of the sum is twice the polygon's area
            let mut face_normal = Normal::zeros();
            for i in 1..(positions.len() - 1) {
                face_normal +=
                    (positions[i] - positions[0]).cross(&(positions[i + 1] - positions[0]));
            }
            for &i in face {
                sums[i.widen()] += face_normal;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.try_normalize(0.0).unwrap_or_else(Normal::zeros);
        }
    }

    /// Append `other` to this mesh, offsetting its vertex references.
    ///
    /// If only one side has a channel, the other side's corners receive that channel's neutral
    /// value: texture coordinate `(0, 0)` or color white.
    pub fn append(&mut self, other: Self) -> Result<(), MeshError> {
        let offset = self.vertices.len();
        let own_corners = self.corners.len();
        let other_corners = other.corners.len();

        let mut corners = Vec::with_capacity(other_corners);
        for c in other.corners {
            let shifted = c.widen() + offset;
            corners.push(Idx::narrow(shifted).ok_or(MeshError::IndexOverflow(shifted))?);
        }

        merge_channel(
            &mut self.texcoords,
            other.texcoords,
            own_corners,
            other_corners,
            Texcoord::origin(),
        );
        merge_channel(
            &mut self.colors,
            other.colors,
            own_corners,
            other_corners,
            Rgb::new(1.0, 1.0, 1.0),
        );

        self.vertices.extend(other.vertices);
        self.corners.extend(corners);
        self.face_starts
            .extend(other.face_starts.into_iter().skip(1).map(|s| s + own_corners));
        Ok(())
    }
}

fn pick_corners<T: Copy>(data: Option<&[T]>, picks: &[usize]) -> Option<Vec<T>> {
    data.map(|data| picks.iter().map(|&c| data[c]).collect())
}

fn merge_channel<T: Copy>(
    own: &mut Option<Vec<T>>,
    other: Option<Vec<T>>,
    own_len: usize,
    other_len: usize,
    fill: T,
) {
    match (own.as_mut(), other) {
        (None, None) => {}
        (Some(own), Some(other)) => own.extend(other),
        (Some(own), None) => own.extend(std::iter::repeat(fill).take(other_len)),
        (None, Some(other)) => {
            let mut merged = vec![fill; own_len];
            merged.extend(other);
            *own = Some(merged);
        }
    }
}
