use hedron::{Mesh, Vertex};
use nalgebra::{point, vector};
use vbake::Encoder;
use vbake_common::ArrayIndex;

fn quad<Idx: ArrayIndex>() -> Mesh<Idx> {
    let up = vector![0.0, 0.0, 1.0];
    let i = |n: usize| Idx::narrow(n).unwrap();
    Mesh::from_triangles(
        vec![
            Vertex::new(point![0.0, 0.0, 0.0], up),
            Vertex::new(point![1.0, 0.0, 0.0], up),
            Vertex::new(point![1.0, 1.0, 0.0], up),
            Vertex::new(point![0.0, 1.0, 0.0], up),
        ],
        [[i(0), i(1), i(2)], [i(0), i(2), i(3)]],
    )
}

/// Ensure that meshes encode identically with any unsigned index type with width <= `size_of::`<usize>
#[test]
#[allow(clippy::just_underscores_and_digits)]
fn mesh_index() {
    let encoder = Encoder::default();
    let expected = encoder.encode_to_vec(&quad::<usize>()).unwrap();
    let _8 = encoder.encode_to_vec(&quad::<u8>()).unwrap();
    let _16 = encoder.encode_to_vec(&quad::<u16>()).unwrap();
    assert_eq!(_8, expected);
    assert_eq!(_16, expected);
    #[cfg(not(target_pointer_width = "16"))]
    {
        let _32 = encoder.encode_to_vec(&quad::<u32>()).unwrap();
        assert_eq!(_32, expected);
        #[cfg(not(target_pointer_width = "32"))]
        {
            let _64 = encoder.encode_to_vec(&quad::<u64>()).unwrap();
            assert_eq!(_64, expected);
        }
    }
}
