//! Utilities for loading meshes from [glTF 2.0](https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html) assets.
//!
//! # Notes
//!
//! * Each glTF mesh becomes one [NamedMesh]; its triangle-list primitives are merged into it.
//!   Primitives of any other topology are skipped.
//! * Node transforms are ignored; meshes are loaded in their own local space.
//! * Primitives without normals get them recomputed from their own faces before merging; authored
//!   normals of other primitives are kept.
//! * Coordinate system: glTF is right-handed and Y-up. Positions & normals are converted to
//!   Z-up by rotating +90° about X: `(x, y, z) -> (x, -z, y)`.
//! * glTF texture coordinates have their origin at the top-left of the image; they're flipped
//!   vertically to the bottom-left convention: `(u, v) -> (u, 1 - v)`.
//! * Only the first texture coordinate set (`TEXCOORD_0`) and color set (`COLOR_0`) are read.
//!   Color alpha is discarded.

use std::path::Path;

use gltf::mesh::Mode;
use nalgebra::{point, vector, Point2, Point3, Vector3};
use vbake_common::ArrayIndex;

use super::{corner_index, LoadError, LoadOptions, NamedMesh};
use crate::{Mesh, Vertex};

/// Convert a glTF (Y-up) vector to Z-up.
#[inline]
fn z_up(v: [f32; 3]) -> Vector3<f32> {
    vector![v[0], -v[2], v[1]]
}

/// Load every mesh in the glTF or GLB file at `path`, along with its external buffers.
#[tracing::instrument(skip(path, options), fields(path = ?path.as_ref()))]
pub fn load_gltf<Idx: ArrayIndex>(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    let (doc, buffers, _images) = gltf::import(path.as_ref())?;
    convert_document(&doc, &buffers, options)
}

/// Load every mesh in an in-memory glTF or GLB asset. Buffers must be embedded or `data:` URIs.
pub fn load_gltf_slice<Idx: ArrayIndex>(
    bytes: &[u8],
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)?;
    convert_document(&doc, &buffers, options)
}

fn convert_document<Idx: ArrayIndex>(
    doc: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    tracing::debug!(
        meshes = doc.meshes().len(),
        buffers = buffers.len(),
        "parsed glTF document"
    );
    doc.meshes()
        .map(|mesh| convert_mesh(&mesh, buffers, options))
        .collect()
}

fn convert_mesh<Idx: ArrayIndex>(
    mesh: &gltf::Mesh<'_>,
    buffers: &[gltf::buffer::Data],
    options: &LoadOptions,
) -> Result<NamedMesh<Idx>, LoadError> {
    let label = mesh
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("mesh {}", mesh.index()));
    let mut out = Mesh::<Idx>::default();

    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            tracing::warn!(
                mesh = %label,
                primitive = primitive.index(),
                mode = ?primitive.mode(),
                "skipping non-triangle-list primitive"
            );
            continue;
        }
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| LoadError::MissingPositions {
                mesh: label.clone(),
                primitive: primitive.index(),
            })?
            .collect();
        let count = positions.len();
        let normals: Option<Vec<[f32; 3]>> = reader
            .read_normals()
            .map(|n| n.collect())
            .filter(|n: &Vec<_>| n.len() == count);
        let missing_normals = normals.is_none();

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let normal = normals.as_ref().map_or_else(Vector3::zeros, |n| z_up(n[i]));
                Vertex::new(Point3::from(z_up(p)), normal)
            })
            .collect();

        let indices: Vec<usize> = match reader.read_indices() {
            Some(indices) => indices.into_u32().map(|i| i as usize).collect(),
            None => (0..count).collect(),
        };
        let corners = indices
            .iter()
            .map(|&i| corner_index::<Idx>(&label, i, count))
            .collect::<Result<Vec<_>, _>>()?;

        let texcoords = reader
            .read_tex_coords(0)
            .map(|t| t.into_f32().collect::<Vec<_>>())
            .filter(|t| t.len() == count)
            .map(|t| {
                indices
                    .iter()
                    .map(|&i| Point2::new(t[i][0], 1.0 - t[i][1]))
                    .collect()
            });
        let colors = reader
            .read_colors(0)
            .map(|c| c.into_rgb_f32().collect::<Vec<_>>())
            .filter(|c| c.len() == count)
            .map(|c| {
                indices
                    .iter()
                    .map(|&i| point![c[i][0], c[i][1], c[i][2]])
                    .collect()
            });

        let face_starts = (0..=corners.len()).step_by(3).collect();
        let mut part = Mesh::from_parts(vertices, corners, face_starts, texcoords, colors)?;
        if missing_normals {
            tracing::debug!(
                mesh = %label,
                primitive = primitive.index(),
                "primitive lacks normals; recomputing"
            );
            part.recompute_normals();
        }
        out.append(part)?;
    }

    if options.triangulate && !out.is_triangulated() {
        out = out.triangulated();
    }

    Ok(NamedMesh {
        name: mesh.name().map(str::to_owned),
        mesh: out,
    })
}
