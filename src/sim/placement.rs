//! Spawn placement with position de-duplication
//!
//! Keeps newly spawned entities from materializing inside existing ones.

use glam::Vec3;
use rand::Rng;

/// Row of the lane a spawn lands on
#[derive(Debug, Clone, Copy)]
pub struct SpawnArea {
    pub lane_width: f32,
    /// Fixed spawn height (ground level plus offset)
    pub y: f32,
    /// Fixed spawn depth
    pub z: f32,
}

/// Pick a random x on the spawn row at least `2 * min_separation` from every
/// existing position. Returns `None` after `max_attempts` rejected candidates.
pub fn find_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    area: SpawnArea,
    existing: &[Vec3],
    min_separation: f32,
    max_attempts: u32,
) -> Option<Vec3> {
    let half = area.lane_width / 2.0;
    let clearance = 2.0 * min_separation;

    for _ in 0..max_attempts {
        let x = rng.random_range(-half..=half);
        let candidate = Vec3::new(x, area.y, area.z);
        if existing.iter().all(|p| p.distance(candidate) >= clearance) {
            return Some(candidate);
        }
    }
    None
}
