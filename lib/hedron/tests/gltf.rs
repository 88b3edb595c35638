#![cfg(feature = "de_gltf")]

use hedron::de::{gltf::load_gltf_slice, LoadOptions};
use nalgebra::{point, vector};

/// One mesh, two copies of the same triangle: the first primitive carries authored normals that
/// point along +X, the second has none.
const TWO_PRIMITIVES: &str = r#"{
  "asset": { "version": "2.0" },
  "buffers": [
    {
      "byteLength": 108,
      "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAACAPwAAAAAAAAAAAACAPwAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
    }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 72, "byteLength": 36 }
  ],
  "accessors": [
    {
      "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
    },
    { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" },
    {
      "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
    }
  ],
  "meshes": [
    {
      "name": "Pair",
      "primitives": [
        { "attributes": { "POSITION": 0, "NORMAL": 1 } },
        { "attributes": { "POSITION": 2 } }
      ]
    }
  ]
}"#;

#[test]
fn missing_normals_are_recomputed_per_primitive() {
    let meshes =
        load_gltf_slice::<u32>(TWO_PRIMITIVES.as_bytes(), &LoadOptions::default()).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].label(), "Pair");

    let mesh = &meshes[0].mesh;
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.face(1), Some(&[3, 4, 5][..]));

    let vertices = mesh.vertices();
    assert_eq!(vertices.len(), 6);
    // converted to Z-up: (x, y, z) -> (x, -z, y)
    assert_eq!(vertices[2].position, point![0.0, 0.0, 1.0]);
    for vertex in &vertices[..3] {
        assert_eq!(vertex.normal, vector![1.0, 0.0, 0.0]);
    }
    for vertex in &vertices[3..] {
        assert_eq!(vertex.normal, vector![0.0, -1.0, 0.0]);
    }
}
