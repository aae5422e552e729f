//! Player kinematics: gravity, jump, lateral movement, ground and lane checks

use glam::Vec3;

use super::collision::Bounded;
use super::state::Player;
use crate::tuning::Tuning;

/// Movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
}

impl MoveKeys {
    /// Sum of active axes; diagonals are deliberately not normalized
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.forward {
            dir.z -= 1.0;
        }
        if self.back {
            dir.z += 1.0;
        }
        dir
    }
}

impl Player {
    /// Within `jump_epsilon` of the resting height, above or below
    pub fn is_grounded(&self, tuning: &Tuning) -> bool {
        (self.pos.y - tuning.resting_height()).abs() <= tuning.jump_epsilon
    }

    /// Apply the jump impulse if standing on the lane. Returns whether it fired.
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_grounded(tuning) {
            self.vel.y = tuning.jump_impulse;
            true
        } else {
            false
        }
    }

    /// Integrate one frame. `falling` suspends the ground clamp.
    pub fn integrate(&mut self, keys: MoveKeys, falling: bool, tuning: &Tuning) {
        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;

        if !falling && self.pos.y - tuning.pivot_offset <= tuning.ground_level {
            self.pos.y = tuning.resting_height();
            self.vel.y = 0.0;
        }

        let dir = keys.direction();
        if dir != Vec3::ZERO {
            self.pos += dir * tuning.move_speed;
            self.yaw = dir.x.atan2(dir.z);
        }
    }

    /// Whole x-extent lies within the lane
    pub fn within_lane(&self, tuning: &Tuning) -> bool {
        self.pos.x.abs() + self.half_extent() <= tuning.lane_half_width()
    }
}
