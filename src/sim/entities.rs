//! Entity registry: obstacle and pickup collections with spawn, advance and expire
//!
//! Collections keep spawn order. Removal is a single compaction pass per frame
//! (`retain_mut`), so no entity is skipped or visited twice.

use glam::Vec3;
use rand::Rng;

use super::collision::{collides, touches};
use super::placement::{SpawnArea, find_spawn_position};
use super::powerups::HitOutcome;
use super::state::{Entity, EntityKind, GameEvent, GameState, LossCause, ObstacleKind};
use crate::tuning::Tuning;

/// Live obstacles and pickups, each in spawn order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entities {
    pub obstacles: Vec<Entity>,
    pub shields: Vec<Entity>,
    pub rayguns: Vec<Entity>,
}

impl Entities {
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles
            .iter()
            .chain(self.shields.iter())
            .chain(self.rayguns.iter())
    }

    pub fn len(&self) -> usize {
        self.obstacles.len() + self.shields.len() + self.rayguns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.shields.clear();
        self.rayguns.clear();
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.iter().map(|e| e.pos).collect()
    }

    /// Add an entity to the collection matching its kind
    pub fn push(&mut self, entity: Entity) {
        match entity.kind {
            EntityKind::Obstacle(_) => self.obstacles.push(entity),
            EntityKind::ShieldPickup => self.shields.push(entity),
            EntityKind::RaygunPickup => self.rayguns.push(entity),
        }
    }

    /// Remove an obstacle by id
    pub fn remove_obstacle(&mut self, id: u32) -> Option<Entity> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }
}

/// Place a new entity of `kind` on the spawn row, skipping the tick if the row is full
pub fn spawn_entity(state: &mut GameState, kind: EntityKind) -> Option<u32> {
    let tuning = &state.tuning;
    let area = SpawnArea {
        lane_width: tuning.lane_width,
        y: tuning.ground_level + tuning.spawn_height,
        z: tuning.spawn_z,
    };
    let existing = state.entities.positions();
    let Some(pos) = find_spawn_position(
        &mut state.rng,
        area,
        &existing,
        tuning.spawn_separation,
        tuning.spawn_attempts,
    ) else {
        log::debug!("No free spawn position for {:?}, skipping", kind);
        return None;
    };

    let speed = state.tuning.entity_speed;
    let id = state.next_entity_id();
    state.entities.push(Entity::new(id, kind, pos, speed));
    Some(id)
}

/// Spawn whatever is due on the current frame
pub fn spawn_scheduled(state: &mut GameState) {
    let frames = state.frames;

    if frames.is_multiple_of(state.spawn_rate) {
        // Cadence tightens on every due tick, even if placement fails
        if state.spawn_rate > state.tuning.spawn_rate_min {
            state.spawn_rate = state
                .spawn_rate
                .saturating_sub(state.tuning.spawn_rate_step)
                .max(state.tuning.spawn_rate_min);
        }

        let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
        if let Some(id) = spawn_entity(state, EntityKind::Obstacle(kind)) {
            log::debug!("Spawned {:?} obstacle {} (next rate {})", kind, id, state.spawn_rate);
            state.events.push(GameEvent::ObstacleSpawned { id, kind });
        }
    }

    if frames > 0 {
        for (interval, kind) in [
            (state.tuning.shield_interval, EntityKind::ShieldPickup),
            (state.tuning.raygun_interval, EntityKind::RaygunPickup),
        ] {
            if frames.is_multiple_of(interval)
                && let Some(id) = spawn_entity(state, kind)
            {
                log::debug!("Spawned {:?} {}", kind, id);
                state.events.push(GameEvent::PickupSpawned { id, kind });
            }
        }
    }
}

/// Advance every entity one frame, resolve collisions against the player and drop
/// anything past the despawn line. Returns the loss cause if an obstacle ended the run.
pub fn update_entities(state: &mut GameState, now_ms: f64) -> Option<LossCause> {
    let GameState {
        tuning,
        player,
        entities,
        powerups,
        events,
        ..
    } = state;
    let tuning: &Tuning = tuning;
    let player = player.as_ref();
    let despawn_z = tuning.despawn_z;
    let frozen = powerups.is_time_stopped();
    let mut lost = false;

    entities.obstacles.retain_mut(|obstacle| {
        if !frozen {
            obstacle.advance();
        }
        if !lost
            && let Some(player) = player
            && collides(player, &*obstacle)
        {
            match powerups.resolve_obstacle_hit(now_ms, tuning) {
                HitOutcome::Ignored => {}
                HitOutcome::Absorbed => {
                    log::info!("Shield absorbed obstacle {}", obstacle.id);
                    events.push(GameEvent::ShieldBroken);
                    return false;
                }
                HitOutcome::Fatal => lost = true,
            }
        }
        obstacle.pos.z <= despawn_z
    });

    for pickups in [&mut entities.shields, &mut entities.rayguns] {
        pickups.retain_mut(|pickup| {
            pickup.advance();
            if let Some(player) = player
                && touches(player, &*pickup, tuning.pickup_reach)
            {
                log::debug!("Collected {:?}", pickup.kind);
                powerups.collect(pickup.kind);
                events.push(GameEvent::PickupCollected { kind: pickup.kind });
                return false;
            }
            pickup.pos.z <= despawn_z
        });
    }

    lost.then_some(LossCause::Obstacle)
}
