//! Deformable triangle mesh with derived per-vertex attributes

mod adjacency;
mod locate;
mod normals;

use glam::Vec3;

pub use adjacency::AdjacencyGraph;
pub use locate::nearest_vertex;
pub use normals::{smooth_vertex_normals, triangle_normal};

/// A triangle mesh whose vertex positions can be edited at runtime
///
/// All per-vertex sequences (positions, normals, colors, friction) stay the
/// same length for the lifetime of the mesh. Topology is static: only
/// positions change after construction.
#[derive(Debug, Clone)]
pub struct DeformableMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Vec<Vec3>,
    friction: Vec<f32>,
    triangles: Vec<[u32; 3]>,
    adjacency: AdjacencyGraph,
}

impl DeformableMesh {
    /// Build a mesh from raw positions and a triangle list
    ///
    /// Derives per-vertex colors and friction coefficients from the
    /// normalized initial positions, computes smooth vertex normals and the
    /// adjacency graph. Triangle indices are validated up front.
    pub fn from_positions(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        for tri in &triangles {
            for &index in tri {
                if index as usize >= positions.len() {
                    return Err(MeshError::InvalidTriangleIndex(index, positions.len()));
                }
            }
        }

        let colors: Vec<Vec3> = positions
            .iter()
            .map(|p| p.normalize_or_zero().abs())
            .collect();
        let friction = colors.iter().map(|c| friction_for_color(*c)).collect();
        let normals = smooth_vertex_normals(&positions, &triangles);
        let adjacency = AdjacencyGraph::from_triangles(positions.len(), &triangles);

        Ok(Self {
            positions,
            normals,
            colors,
            friction,
            triangles,
            adjacency,
        })
    }

    /// Current vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals (stale after deformation until `recompute_normals`)
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-vertex colors derived at load time
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Per-vertex friction coefficients derived at load time
    pub fn friction(&self) -> &[f32] {
        &self.friction
    }

    /// Triangle list (index triples into the vertex sequence)
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Undirected vertex adjacency derived from the triangle list
    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Overwrite a single vertex position
    pub fn set_position(&mut self, index: usize, point: Vec3) {
        self.positions[index] = point;
    }

    /// Add a displacement to a single vertex position
    pub fn displace(&mut self, index: usize, delta: Vec3) {
        self.positions[index] += delta;
    }

    /// Recompute smooth vertex normals from the current positions
    ///
    /// Called once per displayed frame by the rendering collaborator, not per
    /// deformation tick.
    pub fn recompute_normals(&mut self) {
        self.normals = smooth_vertex_normals(&self.positions, &self.triangles);
    }

    /// Axis-aligned bounds of the current positions
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        (min, max)
    }

    /// Center the mesh on its bounding-box midpoint and scale it uniformly
    /// so the largest extent spans 2 units
    pub fn unitize(&mut self) {
        let (min, max) = self.bounds();
        let center = (min + max) / 2.0;
        let extent = max - min;
        let largest = extent.x.max(extent.y).max(extent.z);
        if largest <= 0.0 {
            return;
        }
        let scale = 2.0 / largest;
        for p in &mut self.positions {
            *p = (*p - center) * scale;
        }
    }
}

/// Friction rule applied to the normalized-position color of a vertex:
/// the dominant axis picks the coefficient.
fn friction_for_color(color: Vec3) -> f32 {
    if color.x > color.y && color.x > color.z {
        0.9
    } else if color.y > color.x && color.y > color.z {
        0.4
    } else {
        0.1
    }
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("Empty mesh: no vertices supplied")]
    EmptyMesh,
    #[error("Triangle index {0} out of bounds (vertex count {1})")]
    InvalidTriangleIndex(u32, usize),
}
