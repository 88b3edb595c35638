#![cfg(feature = "de_obj")]

use std::io::Cursor;

use hedron::{
    de::{obj::load_obj_reader, LoadOptions},
    MeshSource,
};
use nalgebra::point;

const QUAD: &str = "\
o Quad
v 0 0 0 1 0 0
v 1 0 0 0 1 0
v 1 1 0 0 0 1
v 0 1 0 1 1 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

#[test]
fn quad_becomes_two_triangles() {
    let meshes = load_obj_reader::<u32>(&mut Cursor::new(QUAD), &LoadOptions::default()).unwrap();
    assert_eq!(meshes.len(), 1);
    let quad = &meshes[0];
    assert_eq!(quad.label(), "Quad");

    let mesh = &quad.mesh;
    assert_eq!(mesh.face_count(), 2);
    assert!(mesh.is_triangulated());
    assert!(mesh.has_uv_channel() && mesh.has_color_channel());
    // second triangle of the fan is corners 0, 2, 3
    assert_eq!(mesh.corner_uv(1, 1), Some(point![1.0, 1.0]));
    assert_eq!(mesh.corner_color(1, 2), Some(point![1.0, 1.0, 1.0]));
    // no normals in the file; recomputed from the winding
    for vertex in mesh.vertices() {
        assert!((vertex.normal.z - 1.0).abs() < 1e-6);
    }
}

#[test]
fn keeps_polygons_when_asked() {
    let options = LoadOptions { triangulate: false };
    let meshes = load_obj_reader::<u32>(&mut Cursor::new(QUAD), &options).unwrap();
    let mesh = &meshes[0].mesh;
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(MeshSource::face(mesh, 0).map(<[u32]>::len), Some(4));
}
