//! Lane Runner - an endless runner game core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (kinematics, spawning, collisions, power-ups)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen handle driven by the JS renderer (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Score advances one point per this many frames
    pub const FRAMES_PER_POINT: u64 = 20;

    /// Lane dimensions
    pub const LANE_WIDTH: f32 = 10.0;
    pub const LANE_LENGTH: f32 = 50.0;
    /// Top surface of the lane
    pub const GROUND_LEVEL: f32 = -2.0;

    /// Player defaults
    pub const PLAYER_SCALE: f32 = 1.5;
    /// Distance from the model pivot down to its base
    pub const PLAYER_PIVOT_OFFSET: f32 = 0.5;
    /// Model faces down the lane (away from the camera)
    pub const PLAYER_START_YAW: f32 = std::f32::consts::PI;
    /// Per-frame gravity accumulator
    pub const GRAVITY: f32 = -0.01;
    pub const JUMP_IMPULSE: f32 = 0.2;
    /// Height tolerance above the resting height for a jump to be allowed
    pub const JUMP_GROUND_EPSILON: f32 = 0.01;
    /// Lateral step per frame per held key
    pub const MOVE_SPEED: f32 = 0.1;
    /// Run ends once a falling player drops below this height
    pub const FALL_LIMIT: f32 = -50.0;

    /// Spawn geometry
    pub const SPAWN_Z: f32 = -15.0;
    /// Height of a spawned entity above the ground
    pub const SPAWN_HEIGHT: f32 = 0.5;
    /// Forward (toward camera) speed per frame
    pub const ENTITY_SPEED: f32 = 0.05;
    /// Entities past this z are off-screen
    pub const DESPAWN_Z: f32 = 10.0;
    pub const SPAWN_SEPARATION: f32 = 1.0;
    pub const SPAWN_ATTEMPTS: u32 = 50;

    /// Obstacle cadence (frames)
    pub const SPAWN_RATE_START: u64 = 200;
    pub const SPAWN_RATE_STEP: u64 = 20;
    pub const SPAWN_RATE_MIN: u64 = 20;
    /// Pickup cadence (frames)
    pub const SHIELD_INTERVAL: u64 = 1500;
    pub const RAYGUN_INTERVAL: u64 = 3000;
    pub const PICKUP_SCALE: f32 = 1.0;
    /// Fixed per-axis pickup reach, independent of scale
    pub const PICKUP_REACH: f32 = 1.0;

    /// Power-up windows (wall-clock milliseconds)
    pub const INVULNERABLE_MS: f64 = 1000.0;
    pub const TIME_STOP_MS: f64 = 5000.0;
}
