//! Read-only view of a frame for the renderer and HUD

use glam::Vec3;
use serde::Serialize;

use super::collision::Bounded;
use super::state::{EntityKind, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub yaw: f32,
    pub facing: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub half_extent: f32,
}

/// Power-up flags for UI badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUpFlags {
    pub has_shield: bool,
    pub is_invulnerable: bool,
    pub has_raygun: bool,
    pub is_time_stopped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub frames: u64,
    pub player: Option<PlayerView>,
    /// Shield decoration follows the player while a shield is held
    pub shield_visual: Option<Vec3>,
    pub falling_off_edge: bool,
    pub flags: PowerUpFlags,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let powerups = &state.powerups;
        let player = state.player.as_ref().map(|p| PlayerView {
            pos: p.pos,
            yaw: p.yaw,
            facing: p.facing(),
        });
        let shield_visual = player
            .as_ref()
            .filter(|_| powerups.has_shield())
            .map(|p| p.pos);

        Self {
            phase: state.phase,
            score: state.score(),
            frames: state.frames,
            player,
            shield_visual,
            falling_off_edge: state.falling_off_edge,
            flags: PowerUpFlags {
                has_shield: powerups.has_shield(),
                is_invulnerable: powerups.is_invulnerable(),
                has_raygun: powerups.has_raygun(),
                is_time_stopped: powerups.is_time_stopped(),
            },
            entities: state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    half_extent: e.half_extent(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerups::ShieldState;

    #[test]
    fn test_shield_visual_follows_player() {
        let mut state = GameState::new(1);
        assert_eq!(Snapshot::capture(&state).shield_visual, None);

        state.attach_player();
        state.powerups.shield = ShieldState::Held;
        state.player.as_mut().unwrap().pos = Vec3::new(1.0, -1.5, 0.0);
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.shield_visual, Some(Vec3::new(1.0, -1.5, 0.0)));
        assert!(snapshot.flags.has_shield);
    }

    #[test]
    fn test_serializes_for_renderer() {
        let mut state = GameState::new(1);
        state.attach_player();
        state.frames = 45;
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["score"], 2);
        assert_eq!(json["phase"], "NotStarted");
        assert_eq!(json["player"]["pos"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(json["flags"]["has_raygun"], false);
    }
}
