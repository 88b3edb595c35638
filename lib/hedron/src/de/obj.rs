//! Utilities for loading [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file) files.
//!
//! # Notes
//!
//! * Each `o`/`g` group becomes one [NamedMesh].
//! * OBJ stores positions, normals, and texture coordinates in separate index spaces; these are
//!   merged so that each distinct combination becomes one vertex (tobj's `single_index` mode).
//!   Texture coordinates and vertex colors are then copied out to every face corner.
//! * Coordinate system: OBJ has no fixed up axis. Files are taken as-is, which matches exporters
//!   that write Z-up data (ex. Blender with "Up: Z").
//! * Materials are ignored.

use std::{io::BufRead, path::Path};

use nalgebra::{point, vector, Point2, Point3};
use vbake_common::ArrayIndex;

use super::{corner_index, LoadError, LoadOptions, NamedMesh};
use crate::{Mesh, Normal, Vertex};

fn tobj_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        // we triangulate ourselves, so that untriangulated faces stay visible to consumers
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load every model in the OBJ file at `path`.
#[tracing::instrument(skip(path, options), fields(path = ?path.as_ref()))]
pub fn load_obj<Idx: ArrayIndex>(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    let (models, _materials) = tobj::load_obj(path.as_ref(), &tobj_options())?;
    tracing::debug!(models = models.len(), "parsed OBJ");
    models
        .into_iter()
        .map(|model| convert_model(model, options))
        .collect()
}

/// Load every model from OBJ data in `reader`. Material libraries are not resolved.
pub fn load_obj_reader<Idx: ArrayIndex>(
    reader: &mut impl BufRead,
    options: &LoadOptions,
) -> Result<Vec<NamedMesh<Idx>>, LoadError> {
    let (models, _materials) = tobj::load_obj_buf(reader, &tobj_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    models
        .into_iter()
        .map(|model| convert_model(model, options))
        .collect()
}

fn convert_model<Idx: ArrayIndex>(
    model: tobj::Model,
    options: &LoadOptions,
) -> Result<NamedMesh<Idx>, LoadError> {
    let name = model.name;
    let src = model.mesh;
    let count = src.positions.len() / 3;
    let has_normals = src.normals.len() == count * 3;

    let vertices: Vec<Vertex> = (0..count)
        .map(|i| {
            let p = &src.positions[i * 3..i * 3 + 3];
            let normal = if has_normals {
                let n = &src.normals[i * 3..i * 3 + 3];
                vector![n[0], n[1], n[2]]
            } else {
                Normal::zeros()
            };
            Vertex::new(point![p[0], p[1], p[2]], normal)
        })
        .collect();

    let corners = src
        .indices
        .iter()
        .map(|&i| corner_index::<Idx>(&name, i as usize, count))
        .collect::<Result<Vec<_>, _>>()?;

    // tobj leaves `face_arities` empty when every face is a triangle
    let face_starts: Vec<usize> = if src.face_arities.is_empty() {
        (0..=corners.len()).step_by(3).collect()
    } else {
        std::iter::once(0)
            .chain(src.face_arities.iter().scan(0usize, |end, &arity| {
                *end += arity as usize;
                Some(*end)
            }))
            .collect()
    };

    // indices were range-checked above
    let texcoords = (src.texcoords.len() == count * 2).then(|| {
        src.indices
            .iter()
            .map(|&i| {
                let i = i as usize;
                Point2::new(src.texcoords[i * 2], src.texcoords[i * 2 + 1])
            })
            .collect()
    });
    let colors = (src.vertex_color.len() == count * 3).then(|| {
        src.indices
            .iter()
            .map(|&i| {
                let i = i as usize;
                Point3::new(
                    src.vertex_color[i * 3],
                    src.vertex_color[i * 3 + 1],
                    src.vertex_color[i * 3 + 2],
                )
            })
            .collect()
    });

    let mut mesh = Mesh::from_parts(vertices, corners, face_starts, texcoords, colors)?;
    if !has_normals {
        tracing::debug!(mesh = %name, "OBJ model has no normals; recomputing");
        mesh.recompute_normals();
    }
    if options.triangulate && !mesh.is_triangulated() {
        mesh = mesh.triangulated();
    }
    tracing::debug!(
        mesh = %name,
        vertices = mesh.vertices().len(),
        faces = mesh.face_count(),
        uv = mesh.texcoords().is_some(),
        color = mesh.colors().is_some(),
        "loaded OBJ model"
    );

    Ok(NamedMesh {
        name: Some(name),
        mesh,
    })
}
