//! Normal calculation utilities for mesh data

use glam::Vec3;

/// Calculate the unit normal of a single triangle
pub fn triangle_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or(Vec3::Z)
}

/// Calculate smooth per-vertex normals from positions and a triangle list
///
/// Each vertex accumulates the unit normals of its incident triangles; the
/// sums are normalized at the end.
pub fn smooth_vertex_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        let normal = triangle_normal(positions[a], positions[b], positions[c]);
        normals[a] += normal;
        normals[b] += normal;
        normals[c] += normal;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or(Vec3::Z);
    }

    normals
}
