use std::path::Path;

use hedron::{
    de::{load_path, LoadOptions, NamedMesh},
    Mesh,
};

use crate::Error;

/// Load the mesh called `name` from `path`, or every mesh in it merged into one.
pub fn load_mesh(path: &Path, options: &LoadOptions, name: Option<&str>) -> Result<Mesh, Error> {
    let meshes: Vec<NamedMesh> = load_path(path, options)?;
    tracing::debug!(
        meshes = ?meshes.iter().map(NamedMesh::label).collect::<Vec<_>>(),
        "loaded input"
    );
    select(meshes, name).map_err(|e| match e {
        Select::Empty => Error::NoMeshes {
            path: path.to_path_buf(),
        },
        Select::NotFound(name) => Error::MeshNotFound {
            path: path.to_path_buf(),
            name,
        },
        Select::Merge(e) => e.into(),
    })
}

#[derive(Debug)]
enum Select {
    Empty,
    NotFound(String),
    Merge(hedron::MeshError),
}

fn select(meshes: Vec<NamedMesh>, name: Option<&str>) -> Result<Mesh, Select> {
    if let Some(name) = name {
        return meshes
            .into_iter()
            .find(|m| m.name.as_deref() == Some(name))
            .map(|m| m.mesh)
            .ok_or_else(|| Select::NotFound(name.to_owned()));
    }
    let mut meshes = meshes.into_iter();
    let mut merged = meshes.next().ok_or(Select::Empty)?.mesh;
    for other in meshes {
        tracing::debug!(mesh = other.label(), "merging");
        merged.append(other.mesh).map_err(Select::Merge)?;
    }
    Ok(merged)
}

#[cfg(test)]
mod test {
    use super::*;
    use hedron::Vertex;
    use nalgebra::{point, vector};

    fn named(name: &str, x: f32) -> NamedMesh {
        let up = vector![0.0, 0.0, 1.0];
        NamedMesh {
            name: Some(name.to_owned()),
            mesh: Mesh::from_triangles(
                vec![
                    Vertex::new(point![x, 0.0, 0.0], up),
                    Vertex::new(point![x + 1.0, 0.0, 0.0], up),
                    Vertex::new(point![x, 1.0, 0.0], up),
                ],
                [[0, 1, 2]],
            ),
        }
    }

    #[test]
    fn selects_by_name() {
        let mesh = select(vec![named("a", 0.0), named("b", 5.0)], Some("b")).unwrap();
        assert_eq!(mesh.vertices()[0].position.x, 5.0);
        assert!(matches!(
            select(vec![named("a", 0.0)], Some("c")),
            Err(Select::NotFound(_))
        ));
    }

    #[test]
    fn merges_everything_by_default() {
        let mesh = select(vec![named("a", 0.0), named("b", 5.0)], None).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face(1), Some(&[3, 4, 5][..]));
        assert!(matches!(select(Vec::new(), None), Err(Select::Empty)));
    }
}
