use std::io::Write;

use hedron::{MeshSource, Texcoord, Vertex};
use vbake_common::ArrayIndex;

use crate::{
    channel::CornerChannels,
    error::{AttributeIndexError, Error, InvalidMeshError},
    framing::{Framing, Header},
    record::{pack_color, VertexRecord, RECORD_SIZE},
    transform::{BakedTransform, TransformConfig},
};

/// What an [Encoder] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    pub triangles: usize,
    pub records: usize,
    /// Bytes handed to the sink, header included.
    pub bytes: u64,
    pub flipped_normals: bool,
    /// The mesh had no texture coordinates; every corner got the default.
    pub uv_defaulted: bool,
    /// The mesh had no colors; every corner got the default.
    pub color_defaulted: bool,
}

/// Turns triangle meshes into vertex buffers.
///
/// Encoding is all-or-nothing with respect to the mesh: every face, vertex reference and corner
/// attribute is checked before the first byte reaches the sink. The only error that can occur
/// after that point is the sink itself failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoder {
    config: TransformConfig,
    transform: BakedTransform,
    framing: Framing,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

impl Encoder {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            transform: BakedTransform::resolve(&config),
            config,
            framing: Framing::Raw,
        }
    }

    #[inline]
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    #[inline]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    #[inline]
    pub fn transform(&self) -> &BakedTransform {
        &self.transform
    }

    #[inline]
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Check that `mesh` can be encoded, without writing anything.
    ///
    /// Returns the number of bytes [Encoder::encode] would write.
    pub fn validate<M: MeshSource>(&self, mesh: &M) -> Result<u64, Error> {
        let prepared = self.prepare(mesh)?;
        Ok(self.output_len(prepared.triangles))
    }

    /// Number of bytes written for a mesh of `triangles` triangles.
    #[inline]
    pub fn output_len(&self, triangles: usize) -> u64 {
        (self.framing.prefix_len() + triangles * 3 * RECORD_SIZE) as u64
    }

    /// Encode `mesh` into `sink`, then flush it.
    #[tracing::instrument(skip_all, fields(faces = mesh.face_count(), framing = ?self.framing))]
    pub fn encode<M: MeshSource, W: Write>(
        &self,
        mesh: &M,
        mut sink: W,
    ) -> Result<EncodeSummary, Error> {
        let prepared = self.prepare(mesh)?;
        let records = prepared.triangles * 3;
        let mut offset = 0u64;

        if self.framing == Framing::Headered {
            let count = u32::try_from(records)
                .map_err(|_| InvalidMeshError::TooManyRecords { records })?;
            write_at(&mut sink, &mut offset, &Header::new(count).to_bytes())?;
        }

        let winding = self.transform.winding();
        for (face, corners) in mesh.faces() {
            let corners = corners.ok_or(InvalidMeshError::MissingFace { face })?;
            for corner in winding {
                let record = prepared.record(&self.transform, mesh, face, corner, corners)?;
                write_at(&mut sink, &mut offset, &record.to_bytes())?;
            }
        }
        sink.flush()
            .map_err(|source| Error::SinkWrite { offset, source })?;

        let summary = EncodeSummary {
            triangles: prepared.triangles,
            records,
            bytes: offset,
            flipped_normals: self.transform.flips_normals(),
            uv_defaulted: !prepared.channels.uv.is_sampled(),
            color_defaulted: !prepared.channels.color.is_sampled(),
        };
        tracing::debug!(
            triangles = summary.triangles,
            bytes = summary.bytes,
            flipped_normals = summary.flipped_normals,
            "encoded vertex buffer"
        );
        Ok(summary)
    }

    /// Encode `mesh` into a new byte vector.
    pub fn encode_to_vec<M: MeshSource>(&self, mesh: &M) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.encode(mesh, &mut out)?;
        Ok(out)
    }

    /// Resolve channels, bake every vertex, and check every face corner.
    fn prepare<M: MeshSource>(&self, mesh: &M) -> Result<Prepared, Error> {
        let channels = CornerChannels::for_mesh(mesh);
        let vertices = (0..mesh.vertex_count())
            .map(|i| mesh.vertex(i).map(|v| self.transform.vertex(&v)))
            .collect();
        let prepared = Prepared {
            vertices,
            channels,
            triangles: mesh.face_count(),
        };

        if prepared.triangles == 0 {
            return Err(InvalidMeshError::Empty.into());
        }
        for (face, corners) in mesh.faces() {
            let corners = corners.ok_or(InvalidMeshError::MissingFace { face })?;
            if corners.len() != 3 {
                return Err(InvalidMeshError::NotTriangulated {
                    face,
                    corners: corners.len(),
                }
                .into());
            }
            for corner in 0..3 {
                prepared.record(&self.transform, mesh, face, corner, corners)?;
            }
        }
        Ok(prepared)
    }
}

struct Prepared {
    /// Transformed vertices; `None` where the source couldn't produce one.
    vertices: Vec<Option<Vertex>>,
    channels: CornerChannels,
    triangles: usize,
}

impl Prepared {
    #[inline]
    fn record<M: MeshSource>(
        &self,
        transform: &BakedTransform,
        mesh: &M,
        face: usize,
        corner: usize,
        corners: &[M::Index],
    ) -> Result<VertexRecord, AttributeIndexError> {
        let index = corners[corner].widen();
        let vertex = self
            .vertices
            .get(index)
            .copied()
            .flatten()
            .ok_or(AttributeIndexError::Vertex {
                face,
                corner,
                index,
                count: self.vertices.len(),
            })?;
        let uv = self.channels.uv(mesh, face, corner)?;
        let color = self.channels.color(mesh, face, corner)?;
        Ok(VertexRecord {
            normal: vertex.normal,
            uv: Texcoord::from(transform.uv(uv.x, uv.y)),
            position: vertex.position,
            color: pack_color(&color),
        })
    }
}

fn write_at<W: Write>(sink: &mut W, offset: &mut u64, bytes: &[u8]) -> Result<(), Error> {
    sink.write_all(bytes).map_err(|source| Error::SinkWrite {
        offset: *offset,
        source,
    })?;
    *offset += bytes.len() as u64;
    Ok(())
}
