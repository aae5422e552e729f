//! Collision detection between the player and lane entities
//!
//! Both tests are per-axis: each axis is checked independently and all three must
//! overlap. This under-approximates true box overlap near corners but is cheap.

use glam::Vec3;

/// Anything with a position and a single scalar half-extent
pub trait Bounded {
    fn position(&self) -> Vec3;
    fn half_extent(&self) -> f32;
}

/// Per-axis overlap using the sum of both half-extents
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    let reach = a.half_extent() + b.half_extent();
    within_per_axis(a.position(), b.position(), reach)
}

/// Fixed-reach variant used for pickups; ignores declared scale
pub fn touches(a: &impl Bounded, b: &impl Bounded, reach: f32) -> bool {
    within_per_axis(a.position(), b.position(), reach)
}

#[inline]
fn within_per_axis(a: Vec3, b: Vec3, reach: f32) -> bool {
    let d = (a - b).abs();
    d.x < reach && d.y < reach && d.z < reach
}
