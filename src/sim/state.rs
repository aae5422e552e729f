//! Game state and core simulation types
//!
//! Everything the per-frame update reads or writes lives in [`GameState`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounded;
use super::entities::Entities;
use super::powerups::PowerUps;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start signal
    NotStarted,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Hit an obstacle with no shield and no grace window
    Obstacle,
    /// Fell off the side of the lane
    FellOff,
}

/// Things that happened during a tick, drained by the driver for UI/audio/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    PickupSpawned { id: u32, kind: EntityKind },
    PickupCollected { kind: EntityKind },
    ShieldBroken,
    InvulnerabilityEnded,
    TimeStopStarted,
    TimeStopEnded,
    ObstacleZapped { id: u32 },
    LeftLane,
    GameOver { cause: LossCause, score: u64 },
}

/// Cosmetic obstacle variants; only the declared scale affects collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Crate,
    Boulder,
    Pillar,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Crate, ObstacleKind::Boulder, ObstacleKind::Pillar];

    /// Declared uniform scale of the obstacle mesh
    pub fn scale(self) -> f32 {
        match self {
            ObstacleKind::Crate => 1.0,
            ObstacleKind::Boulder => 1.2,
            ObstacleKind::Pillar => 0.8,
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    ShieldPickup,
    RaygunPickup,
}

impl EntityKind {
    pub fn scale(self) -> f32 {
        match self {
            EntityKind::Obstacle(kind) => kind.scale(),
            EntityKind::ShieldPickup | EntityKind::RaygunPickup => PICKUP_SCALE,
        }
    }

    pub fn is_obstacle(self) -> bool {
        matches!(self, EntityKind::Obstacle(_))
    }
}

/// An obstacle or pickup moving toward the camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub vel: Vec3,
    pub half_extent: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec3, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec3::new(0.0, 0.0, speed),
            half_extent: kind.scale() / 2.0,
        }
    }

    /// Move one frame along the constant velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

impl Bounded for Entity {
    fn position(&self) -> Vec3 {
        self.pos
    }

    fn half_extent(&self) -> f32 {
        self.half_extent
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    pub scale: f32,
    /// Rotation about the y axis (radians)
    pub yaw: f32,
}

impl Player {
    pub fn new(scale: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            scale,
            yaw: PLAYER_START_YAW,
        }
    }

    /// Unit vector the model faces (for a follow light or camera)
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

impl Bounded for Player {
    fn position(&self) -> Vec3 {
        self.pos
    }

    fn half_extent(&self) -> f32 {
        self.scale / 2.0
    }
}

/// Complete game state for one session (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Frames simulated this run
    pub frames: u64,
    /// Current obstacle cadence (frames between spawns)
    pub spawn_rate: u64,
    /// `None` until the asset layer has loaded the player model
    pub player: Option<Player>,
    /// Latched once the player leaves the lane; cleared only by restart
    pub falling_off_edge: bool,
    pub entities: Entities,
    pub powerups: PowerUps,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_rate: tuning.spawn_rate_start,
            tuning,
            phase: GamePhase::NotStarted,
            frames: 0,
            player: None,
            falling_off_edge: false,
            entities: Entities::default(),
            powerups: PowerUps::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score is derived from elapsed frames
    #[inline]
    pub fn score(&self) -> u64 {
        self.frames / FRAMES_PER_POINT
    }

    /// Score for 32-bit consumers (the JS HUD), saturating at `u32::MAX`
    pub fn display_score(&self) -> u32 {
        u32::try_from(self.score()).unwrap_or(u32::MAX)
    }

    /// The asset layer finished loading the player model
    pub fn attach_player(&mut self) {
        if self.player.is_none() {
            log::info!("Player model attached");
            self.player = Some(Player::new(self.tuning.player_scale));
        }
    }

    /// True while the player's x-extent lies within the lane
    pub fn is_player_in_lane(&self) -> bool {
        self.player.as_ref().is_none_or(|p| p.within_lane(&self.tuning))
    }

    /// Reset everything a run owns back to its initial values.
    ///
    /// `rng` and the entity id counter carry over from the previous run, so each
    /// restart sees a new obstacle layout and ids stay unique across runs.
    pub(crate) fn reset_run(&mut self) {
        self.frames = 0;
        self.spawn_rate = self.tuning.spawn_rate_start;
        self.falling_off_edge = false;
        self.entities.clear();
        self.powerups = PowerUps::default();
        if let Some(player) = self.player.as_mut() {
            *player = Player::new(self.tuning.player_scale);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
