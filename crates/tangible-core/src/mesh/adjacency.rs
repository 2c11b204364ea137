//! Per-vertex adjacency derived from triangle topology

use std::collections::BTreeSet;

/// Undirected vertex neighbor sets
///
/// Two vertices are neighbors iff they co-occur as an edge of some triangle.
/// Built once after geometry load; meshes are topologically static, so there
/// are no removal operations. Neighbor sets are ordered so traversals are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    neighbors: Vec<BTreeSet<u32>>,
}

impl AdjacencyGraph {
    /// Build the adjacency relation from a triangle list
    ///
    /// Each triangle edge is inserted in both directions; duplicates collapse
    /// via set semantics.
    pub fn from_triangles(vertex_count: usize, triangles: &[[u32; 3]]) -> Self {
        let mut neighbors = vec![BTreeSet::new(); vertex_count];
        for &[a, b, c] in triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                neighbors[u as usize].insert(v);
                neighbors[v as usize].insert(u);
            }
        }
        Self { neighbors }
    }

    /// Neighbor set of a vertex (empty only for an isolated vertex)
    pub fn neighbors(&self, vertex: u32) -> &BTreeSet<u32> {
        &self.neighbors[vertex as usize]
    }

    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry_for_every_triangle() {
        let triangles = [[0, 1, 2], [1, 2, 3], [2, 3, 0]];
        let graph = AdjacencyGraph::from_triangles(4, &triangles);
        for &[a, b, c] in &triangles {
            assert!(graph.neighbors(a).contains(&b) && graph.neighbors(a).contains(&c));
            assert!(graph.neighbors(b).contains(&a) && graph.neighbors(b).contains(&c));
            assert!(graph.neighbors(c).contains(&a) && graph.neighbors(c).contains(&b));
        }
    }

    #[test]
    fn test_single_triangle_neighbors() {
        let graph = AdjacencyGraph::from_triangles(3, &[[0, 1, 2]]);
        assert_eq!(graph.neighbors(0).iter().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(graph.neighbors(1).iter().copied().collect::<Vec<_>>(), [0, 2]);
        assert_eq!(graph.neighbors(2).iter().copied().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn test_shared_edges_collapse() {
        // Edge (1,2) occurs in both triangles but appears once per set
        let graph = AdjacencyGraph::from_triangles(4, &[[0, 1, 2], [2, 1, 3]]);
        assert_eq!(graph.neighbors(1).len(), 3);
        assert!(graph.neighbors(1).contains(&2));
    }

    #[test]
    fn test_isolated_vertex_has_no_neighbors() {
        let graph = AdjacencyGraph::from_triangles(4, &[[0, 1, 2]]);
        assert!(graph.neighbors(3).is_empty());
    }
}
