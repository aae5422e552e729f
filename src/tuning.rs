//! Data-driven game balance
//!
//! Every gameplay constant lives here with its default taken from [`crate::consts`].
//! A JSON document can override any subset of fields; missing keys keep the default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Lane
    pub lane_width: f32,
    pub lane_length: f32,
    pub ground_level: f32,

    // Player
    pub player_scale: f32,
    pub pivot_offset: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub jump_epsilon: f32,
    pub move_speed: f32,
    pub fall_limit: f32,

    // Spawning
    pub spawn_z: f32,
    pub spawn_height: f32,
    pub entity_speed: f32,
    pub despawn_z: f32,
    pub spawn_separation: f32,
    pub spawn_attempts: u32,
    pub spawn_rate_start: u64,
    pub spawn_rate_step: u64,
    pub spawn_rate_min: u64,
    pub shield_interval: u64,
    pub raygun_interval: u64,
    pub pickup_reach: f32,

    // Power-ups (milliseconds)
    pub invulnerable_ms: f64,
    pub time_stop_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_length: LANE_LENGTH,
            ground_level: GROUND_LEVEL,

            player_scale: PLAYER_SCALE,
            pivot_offset: PLAYER_PIVOT_OFFSET,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            jump_epsilon: JUMP_GROUND_EPSILON,
            move_speed: MOVE_SPEED,
            fall_limit: FALL_LIMIT,

            spawn_z: SPAWN_Z,
            spawn_height: SPAWN_HEIGHT,
            entity_speed: ENTITY_SPEED,
            despawn_z: DESPAWN_Z,
            spawn_separation: SPAWN_SEPARATION,
            spawn_attempts: SPAWN_ATTEMPTS,
            spawn_rate_start: SPAWN_RATE_START,
            spawn_rate_step: SPAWN_RATE_STEP,
            spawn_rate_min: SPAWN_RATE_MIN,
            shield_interval: SHIELD_INTERVAL,
            raygun_interval: RAYGUN_INTERVAL,
            pickup_reach: PICKUP_REACH,

            invulnerable_ms: INVULNERABLE_MS,
            time_stop_ms: TIME_STOP_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> TuningError {
            TuningError::Invalid { field, reason }
        }

        let floats = [
            ("lane_width", self.lane_width),
            ("lane_length", self.lane_length),
            ("ground_level", self.ground_level),
            ("player_scale", self.player_scale),
            ("pivot_offset", self.pivot_offset),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("jump_epsilon", self.jump_epsilon),
            ("move_speed", self.move_speed),
            ("fall_limit", self.fall_limit),
            ("spawn_z", self.spawn_z),
            ("spawn_height", self.spawn_height),
            ("entity_speed", self.entity_speed),
            ("despawn_z", self.despawn_z),
            ("spawn_separation", self.spawn_separation),
            ("pickup_reach", self.pickup_reach),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }
        if !self.invulnerable_ms.is_finite() || !self.time_stop_ms.is_finite() {
            return Err(invalid("power-up window", "must be finite"));
        }

        if self.lane_width <= 0.0 {
            return Err(invalid("lane_width", "must be positive"));
        }
        if self.lane_length <= 0.0 {
            return Err(invalid("lane_length", "must be positive"));
        }
        if self.spawn_z < -self.lane_length / 2.0 || self.despawn_z > self.lane_length / 2.0 {
            return Err(invalid("lane_length", "must cover spawn_z through despawn_z"));
        }
        if self.player_scale <= 0.0 {
            return Err(invalid("player_scale", "must be positive"));
        }
        if self.gravity >= 0.0 {
            return Err(invalid("gravity", "must pull downward (negative)"));
        }
        if self.fall_limit >= self.ground_level {
            return Err(invalid("fall_limit", "must be below ground_level"));
        }
        if self.despawn_z <= self.spawn_z {
            return Err(invalid("despawn_z", "must be past spawn_z"));
        }
        if self.spawn_separation < 0.0 {
            return Err(invalid("spawn_separation", "must not be negative"));
        }
        if self.spawn_attempts == 0 {
            return Err(invalid("spawn_attempts", "must be at least 1"));
        }
        if self.spawn_rate_min == 0 || self.spawn_rate_start < self.spawn_rate_min {
            return Err(invalid("spawn_rate_min", "must be non-zero and <= spawn_rate_start"));
        }
        if self.shield_interval == 0 || self.raygun_interval == 0 {
            return Err(invalid("pickup interval", "must be non-zero"));
        }
        if self.invulnerable_ms < 0.0 || self.time_stop_ms < 0.0 {
            return Err(invalid("power-up window", "must not be negative"));
        }
        Ok(())
    }

    /// Half-width of the lane on x
    #[inline]
    pub fn lane_half_width(&self) -> f32 {
        self.lane_width / 2.0
    }

    /// Player resting height on the lane surface
    #[inline]
    pub fn resting_height(&self) -> f32 {
        self.ground_level + self.pivot_offset
    }
}
