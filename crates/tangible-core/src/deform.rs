//! Localized deformation propagation around a contact vertex

use std::collections::BTreeSet;

use glam::Vec3;

use crate::mesh::{AdjacencyGraph, DeformableMesh};

/// Default number of rings displaced per tick
pub const DEFAULT_RING_COUNT: usize = 8;
/// Upper bound on the user-adjustable ring count
pub const MAX_RING_COUNT: usize = 12;

/// Breadth-first ring partition of a mesh around a root vertex
///
/// Ring 0 is exactly the root; ring k holds the adjacency neighbors of ring
/// k-1 that were not visited in any earlier ring (first touch wins), so the
/// rings are pairwise disjoint and radiate strictly outward.
#[derive(Debug, Clone)]
pub struct RingPartition {
    root: u32,
    rings: Vec<BTreeSet<u32>>,
}

impl RingPartition {
    /// Expand rings 0..=`ring_count` from `root` across the adjacency graph
    ///
    /// Expansion stops early once a ring comes up empty (the connected
    /// component around the root is exhausted).
    pub fn expand(graph: &AdjacencyGraph, root: u32, ring_count: usize) -> Self {
        let mut visited = BTreeSet::from([root]);
        let mut frontier = BTreeSet::from([root]);
        let mut rings = vec![frontier.clone()];

        for _ in 1..=ring_count {
            let mut next = BTreeSet::new();
            for &parent in &frontier {
                for &neighbor in graph.neighbors(parent) {
                    if visited.insert(neighbor) {
                        next.insert(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
            rings.push(frontier.clone());
        }

        Self { root, rings }
    }

    /// The deformation root (sole member of ring 0)
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Vertices at breadth-first distance `index`, if any were reached
    pub fn ring(&self, index: usize) -> Option<&BTreeSet<u32>> {
        self.rings.get(index)
    }

    /// Number of computed rings, including ring 0
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }
}

/// Displacement scale for ring `ring_index` under a given ring-count bound
///
/// `1 / (1 + k^(n - ring_count/2))`, monotonically decreasing in `n`. The
/// steepness constant `k` comes from an empirically tuned per-ring-count
/// lookup; larger ring counts use smaller constants for a gentler, wider
/// falloff.
pub fn falloff(ring_index: usize, ring_count: usize) -> f32 {
    let k = falloff_steepness(ring_count);
    1.0 / (1.0 + k.powf(ring_index as f32 - ring_count as f32 / 2.0))
}

fn falloff_steepness(ring_count: usize) -> f32 {
    match ring_count {
        2 => 40.0,
        3 => 20.0,
        4 => 12.0,
        5 => 9.0,
        6 => 7.0,
        7 => 5.0,
        8 => 4.0,
        9 => 3.5,
        _ => 3.0,
    }
}

/// Apply one deformation tick
///
/// The displacement direction is `local_target` minus the root vertex's
/// current position; every vertex in rings 1..=`ring_count` moves by that
/// direction scaled by the ring's falloff. Ring 0 (the root) never moves.
/// Re-applied additively every tick while force rendering stays enabled, so
/// held contact keeps growing the deformation.
pub fn apply_tick(
    mesh: &mut DeformableMesh,
    rings: &RingPartition,
    local_target: Vec3,
    ring_count: usize,
) {
    let direction = local_target - mesh.position(rings.root() as usize);
    for n in 1..=ring_count {
        let Some(ring) = rings.ring(n) else { break };
        let step = direction * falloff(n, ring_count);
        for &vertex in ring {
            mesh.displace(vertex as usize, step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_graph() -> AdjacencyGraph {
        // A strip of triangles: 0-1-2, 1-2-3, 2-3-4, 3-4-5
        AdjacencyGraph::from_triangles(6, &[[0, 1, 2], [1, 2, 3], [2, 3, 4], [3, 4, 5]])
    }

    #[test]
    fn test_ring_zero_is_exactly_the_root() {
        let rings = RingPartition::expand(&strip_graph(), 0, MAX_RING_COUNT);
        assert_eq!(rings.root(), 0);
        assert_eq!(
            rings.ring(0).unwrap().iter().copied().collect::<Vec<_>>(),
            [0]
        );
    }

    #[test]
    fn test_rings_are_pairwise_disjoint() {
        let rings = RingPartition::expand(&strip_graph(), 0, MAX_RING_COUNT);
        let mut seen = BTreeSet::new();
        for n in 0..rings.ring_count() {
            for &vertex in rings.ring(n).unwrap() {
                assert!(seen.insert(vertex), "vertex {vertex} assigned twice");
            }
        }
    }

    #[test]
    fn test_rings_cover_only_reachable_vertices() {
        // Vertex 3 is in a separate component
        let graph = AdjacencyGraph::from_triangles(4, &[[0, 1, 2]]);
        let rings = RingPartition::expand(&graph, 0, MAX_RING_COUNT);
        let all: BTreeSet<u32> = (0..rings.ring_count())
            .flat_map(|n| rings.ring(n).unwrap().iter().copied())
            .collect();
        assert_eq!(all, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_monotonic_refinement_under_larger_bound() {
        let graph = strip_graph();
        let small = RingPartition::expand(&graph, 0, 2);
        let large = RingPartition::expand(&graph, 0, MAX_RING_COUNT);
        for n in 0..small.ring_count() {
            assert_eq!(small.ring(n), large.ring(n));
        }
    }

    #[test]
    fn test_falloff_strictly_decreases_over_rings() {
        for ring_count in 1..=MAX_RING_COUNT {
            for n in 2..=ring_count {
                assert!(
                    falloff(n, ring_count) < falloff(n - 1, ring_count),
                    "falloff not decreasing at ring {n} of {ring_count}"
                );
            }
        }
    }

    #[test]
    fn test_falloff_default_ring_count_constant() {
        // Ring count 8 uses steepness 4, so at n = 4 the exponent is zero
        approx::assert_relative_eq!(falloff(4, 8), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_single_triangle_end_to_end() {
        let mut mesh = DeformableMesh::from_positions(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let rings = RingPartition::expand(mesh.adjacency(), 0, MAX_RING_COUNT);
        assert_eq!(
            rings.ring(1).unwrap().iter().copied().collect::<Vec<_>>(),
            [1, 2]
        );

        // Target one unit along +x from the root
        apply_tick(&mut mesh, &rings, Vec3::new(1.0, 0.0, 0.0), 1);

        let expected = Vec3::new(falloff(1, 1), 0.0, 0.0);
        assert_eq!(mesh.position(0), Vec3::ZERO, "root must never move");
        assert!((mesh.position(1) - (Vec3::X + expected)).length() < 1e-6);
        assert!((mesh.position(2) - (Vec3::Y + expected)).length() < 1e-6);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut mesh = DeformableMesh::from_positions(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let rings = RingPartition::expand(mesh.adjacency(), 0, MAX_RING_COUNT);
        apply_tick(&mut mesh, &rings, Vec3::X, 1);
        let after_one = mesh.position(1);
        apply_tick(&mut mesh, &rings, Vec3::X, 1);
        assert!((mesh.position(1) - after_one).length() > 0.0);
    }
}
