//! Primitive mesh generation

use glam::Vec3;

use crate::mesh::{DeformableMesh, MeshError};

/// Generate a box mesh with shared corner vertices
///
/// Eight vertices and twelve triangles; corners are shared between faces so
/// the adjacency graph connects across edges (deformation propagates around
/// the whole solid, as with a loaded model).
pub fn box_mesh(size: [f32; 3]) -> Result<DeformableMesh, MeshError> {
    let [hx, hy, hz] = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
    let positions = vec![
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];
    let triangles = vec![
        // -z
        [0, 2, 1],
        [0, 3, 2],
        // +z
        [4, 5, 6],
        [4, 6, 7],
        // -y
        [0, 1, 5],
        [0, 5, 4],
        // +y
        [3, 7, 6],
        [3, 6, 2],
        // -x
        [0, 4, 7],
        [0, 7, 3],
        // +x
        [1, 2, 6],
        [1, 6, 5],
    ];
    DeformableMesh::from_positions(positions, triangles)
}
