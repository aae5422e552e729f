//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one frame, in a fixed order:
//! power-up timers, player kinematics, spawning, entity update and collisions,
//! lane / fall-off termination.

use super::entities::{spawn_scheduled, update_entities};
use super::kinematics::MoveKeys;
use super::state::{GameEvent, GamePhase, GameState, LossCause};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub keys: MoveKeys,
    /// Jump pressed this frame
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a run from the title state
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
    /// Fire a held raygun (stops time)
    pub activate_time_stop: bool,
    /// Wall-clock reading in milliseconds
    pub now_ms: f64,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Phase transitions consume the frame
    match state.phase {
        GamePhase::NotStarted => {
            if input.start {
                state.reset_run();
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset_run();
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Restarted);
                log::info!("Run restarted");
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            return;
        }
        GamePhase::Running => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused at frame {}", state.frames);
                return;
            }
        }
    }

    let now_ms = input.now_ms;

    // Power-up timers
    state
        .powerups
        .update_timers(now_ms, &state.tuning, &mut state.events);
    if input.activate_time_stop && state.powerups.activate_time_stop(now_ms) {
        state.events.push(GameEvent::TimeStopStarted);
        log::info!("Time-stop started");
    }

    // Player kinematics; no jumping once off the lane
    let falling = state.falling_off_edge;
    if let Some(player) = state.player.as_mut() {
        if input.jump && !falling {
            player.try_jump(&state.tuning);
        }
        player.integrate(input.keys, falling, &state.tuning);
    }

    spawn_scheduled(state);
    let mut loss = update_entities(state, now_ms);

    // Lane exit latches for the rest of the life
    if let Some(player) = state.player.as_ref() {
        if !state.falling_off_edge && !player.within_lane(&state.tuning) {
            state.falling_off_edge = true;
            state.events.push(GameEvent::LeftLane);
            log::info!("Player left the lane at x={:.2}", player.pos.x);
        }
        if loss.is_none() && state.falling_off_edge && player.pos.y < state.tuning.fall_limit {
            loss = Some(LossCause::FellOff);
        }
    }

    state.frames += 1;

    if let Some(cause) = loss {
        end_run(state, cause);
    }
}

fn end_run(state: &mut GameState, cause: LossCause) {
    let score = state.score();
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { cause, score });
    log::info!("Game over ({:?}) with score {}", cause, score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerups::{RaygunState, ShieldState};
    use crate::sim::state::{Entity, EntityKind, ObstacleKind};
    use glam::Vec3;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.attach_player();
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    fn at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    /// Put an obstacle where the player stands, clear of anything else
    fn obstacle_on_player(state: &mut GameState) -> u32 {
        state.entities.clear();
        let pos = state.player.as_ref().unwrap().pos - Vec3::new(0.0, 0.0, state.tuning.entity_speed);
        let id = state.next_entity_id();
        let speed = state.tuning.entity_speed;
        state
            .entities
            .push(Entity::new(id, EntityKind::Obstacle(ObstacleKind::Crate), pos, speed));
        id
    }

    fn settle(state: &mut GameState) {
        for _ in 0..30 {
            tick(state, &at(0.0));
            state.entities.clear();
        }
    }

    #[test]
    fn test_start_transition() {
        let mut state = GameState::new(1);
        tick(&mut state, &at(0.0));
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.frames, 0);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frames, 0);

        tick(&mut state, &at(0.0));
        assert_eq!(state.frames, 1);
        // Obstacle due on frame 0
        assert_eq!(state.entities.obstacles.len(), 1);
    }

    #[test]
    fn test_pause_freezes_updates() {
        let mut state = started(7);
        tick(&mut state, &at(0.0));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frames = state.frames;
        let obstacles = state.entities.obstacles.clone();
        for _ in 0..10 {
            tick(&mut state, &at(0.0));
        }
        assert_eq!(state.frames, frames);
        assert_eq!(state.entities.obstacles, obstacles);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        tick(&mut state, &at(0.0));
        assert_eq!(state.frames, frames + 1);
    }

    #[test]
    fn test_score_tracks_frames() {
        let mut state = started(11);
        for _ in 0..95 {
            tick(&mut state, &at(0.0));
            state.entities.clear();
            assert_eq!(state.score(), state.frames / 20);
        }
        assert_eq!(state.score(), 4);
    }

    #[test]
    fn test_plain_collision_ends_run() {
        let mut state = started(2);
        settle(&mut state);
        obstacle_on_player(&mut state);
        tick(&mut state, &at(0.0));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver {
                cause: LossCause::Obstacle,
                ..
            })
        ));

        // No further updates until restart
        let frames = state.frames;
        tick(&mut state, &at(0.0));
        assert_eq!(state.frames, frames);
    }

    #[test]
    fn test_shield_absorbs_then_grace_window_expires() {
        let mut state = started(2);
        settle(&mut state);
        state.powerups.shield = ShieldState::Held;
        obstacle_on_player(&mut state);

        tick(&mut state, &at(10_000.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.powerups.has_shield());
        assert!(state.powerups.is_invulnerable());
        assert!(state.entities.obstacles.is_empty());

        // A second obstacle during the grace window passes through
        let id = obstacle_on_player(&mut state);
        tick(&mut state, &at(10_500.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.entities.obstacles[0].id, id);

        state.entities.clear();
        tick(&mut state, &at(11_000.0));
        assert!(!state.powerups.is_invulnerable());
    }

    #[test]
    fn test_lane_exit_persists_and_falls_to_game_over_once() {
        let mut state = started(4);
        settle(&mut state);
        state.player.as_mut().unwrap().pos.x = 6.0;
        tick(&mut state, &at(0.0));
        state.entities.clear();
        assert!(state.falling_off_edge);

        // Back over the lane: still no floor
        state.player.as_mut().unwrap().pos.x = 0.0;
        let mut last_y = state.player.as_ref().unwrap().pos.y;
        let mut game_overs = 0;
        for _ in 0..300 {
            tick(&mut state, &at(0.0));
            state.entities.clear();
            if state.phase == GamePhase::Running {
                let y = state.player.as_ref().unwrap().pos.y;
                assert!(y < last_y);
                assert!(state.falling_off_edge);
                last_y = y;
            }
            game_overs += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { cause: LossCause::FellOff, .. }))
                .count();
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(game_overs, 1);
        assert!(state.player.as_ref().unwrap().pos.y < -50.0);
    }

    #[test]
    fn test_jumping_cannot_escape_fall_off() {
        let mut state = started(4);
        settle(&mut state);
        state.player.as_mut().unwrap().pos.x = 6.0;
        let jump = TickInput {
            jump: true,
            ..at(0.0)
        };
        let mut frames = 0;
        while state.phase == GamePhase::Running && frames < 1_000 {
            tick(&mut state, &jump);
            state.entities.clear();
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.falling_off_edge);
        assert!(state.player.as_ref().unwrap().pos.y < -50.0);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: LossCause::FellOff,
                ..
            }
        )));
    }

    #[test]
    fn test_time_stop_runs_on_wall_clock_through_pause() {
        let mut state = started(5);
        state.powerups.raygun = RaygunState::Held;
        tick(
            &mut state,
            &TickInput {
                activate_time_stop: true,
                now_ms: 1_000.0,
                ..Default::default()
            },
        );
        assert!(state.powerups.is_time_stopped());

        let pause = TickInput {
            pause: true,
            now_ms: 2_000.0,
            ..Default::default()
        };
        tick(&mut state, &pause);
        tick(&mut state, &at(7_000.0));
        // Still flagged while paused, nothing polls the clock
        assert!(state.powerups.is_time_stopped());
        tick(&mut state, &TickInput { now_ms: 7_000.0, ..pause });
        tick(&mut state, &at(7_000.0));
        assert!(!state.powerups.is_time_stopped());
        assert_eq!(state.powerups.raygun, RaygunState::NotHeld);
    }

    #[test]
    fn test_missing_player_is_tolerated() {
        let mut state = GameState::new(8);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        for _ in 0..600 {
            tick(&mut state, &TickInput {
                jump: true,
                ..at(0.0)
            });
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frames, 600);
        assert!(!state.entities.obstacles.is_empty());
    }

    #[test]
    fn test_restart_matches_fresh_start() {
        let fresh = started(21);

        let mut state = started(21);
        state.powerups.raygun = RaygunState::Held;
        for _ in 0..200 {
            tick(&mut state, &TickInput {
                keys: MoveKeys {
                    right: true,
                    ..Default::default()
                },
                ..at(0.0)
            });
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frames, 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.spawn_rate, fresh.spawn_rate);
        assert_eq!(state.entities, fresh.entities);
        assert_eq!(state.powerups, fresh.powerups);
        assert_eq!(state.player, fresh.player);
        assert!(!state.falling_off_edge);
    }
}
