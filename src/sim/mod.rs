//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame, fixed order
//! - Seeded RNG only
//! - Wall-clock time only through `TickInput::now_ms`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod kinematics;
pub mod pick;
pub mod placement;
pub mod powerups;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Bounded, collides, touches};
pub use entities::Entities;
pub use kinematics::MoveKeys;
pub use pick::{Camera, Ray};
pub use placement::{SpawnArea, find_spawn_position};
pub use powerups::{HitOutcome, PowerUps, RaygunState, ShieldState};
pub use snapshot::Snapshot;
pub use state::{
    Entity, EntityKind, GameEvent, GamePhase, GameState, LossCause, ObstacleKind, Player,
};
pub use tick::{TickInput, tick};
