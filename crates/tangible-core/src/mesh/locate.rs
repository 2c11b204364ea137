//! Brute-force nearest-vertex search

use glam::Vec3;

/// Index of the candidate point closest to `query`
///
/// Linear scan in stable order; distance ties keep the first occurrence.
/// Returns `None` only for an empty candidate slice. Called once per
/// touch-down and once per anchor-edit activation, not per frame, so the
/// O(n) cost is acceptable.
pub fn nearest_vertex(query: Vec3, points: &[Vec3]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, point) in points.iter().enumerate() {
        let distance = query.distance_squared(*point);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
