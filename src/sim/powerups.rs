//! Power-up state machines: shield, post-break invulnerability, raygun/time-stop
//!
//! Timed states store wall-clock deadlines (milliseconds) and are expired by
//! [`PowerUps::update_timers`] at the start of every running frame. Pausing stops
//! the frame loop but not the clock, so windows keep running while paused.

use super::state::{EntityKind, GameEvent};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShieldState {
    #[default]
    Inactive,
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RaygunState {
    #[default]
    NotHeld,
    Held,
    /// Time is stopped since `started_ms`
    Active { started_ms: f64 },
}

/// What an obstacle collision resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Grace window: obstacle passes straight through
    Ignored,
    /// Shield consumed along with the obstacle
    Absorbed,
    /// Run is over
    Fatal,
}

/// Independent power-up lifecycles for one run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerUps {
    pub shield: ShieldState,
    /// Deadline of the post-shield-break grace window
    pub invulnerable_until: Option<f64>,
    pub raygun: RaygunState,
}

impl PowerUps {
    #[inline]
    pub fn has_shield(&self) -> bool {
        self.shield == ShieldState::Held
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_until.is_some()
    }

    #[inline]
    pub fn has_raygun(&self) -> bool {
        self.raygun == RaygunState::Held
    }

    #[inline]
    pub fn is_time_stopped(&self) -> bool {
        matches!(self.raygun, RaygunState::Active { .. })
    }

    /// Time-stop is active and its window has not run out at `now_ms`
    pub fn time_stop_active_at(&self, now_ms: f64, tuning: &Tuning) -> bool {
        match self.raygun {
            RaygunState::Active { started_ms } => now_ms - started_ms < tuning.time_stop_ms,
            _ => false,
        }
    }

    /// Expire any window whose deadline has passed
    pub fn update_timers(&mut self, now_ms: f64, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if let Some(deadline) = self.invulnerable_until
            && now_ms >= deadline
        {
            self.invulnerable_until = None;
            events.push(GameEvent::InvulnerabilityEnded);
            log::debug!("Invulnerability ended");
        }

        if self.is_time_stopped() && !self.time_stop_active_at(now_ms, tuning) {
            self.raygun = RaygunState::NotHeld;
            events.push(GameEvent::TimeStopEnded);
            log::info!("Time-stop ended");
        }
    }

    /// Apply a pickup collection
    pub fn collect(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::ShieldPickup => self.shield = ShieldState::Held,
            // A second raygun during an active time-stop is wasted
            EntityKind::RaygunPickup => {
                if self.raygun == RaygunState::NotHeld {
                    self.raygun = RaygunState::Held;
                }
            }
            EntityKind::Obstacle(_) => {}
        }
    }

    /// Decide what an obstacle collision does, updating state for absorbed hits
    pub fn resolve_obstacle_hit(&mut self, now_ms: f64, tuning: &Tuning) -> HitOutcome {
        if self.is_invulnerable() {
            HitOutcome::Ignored
        } else if self.has_shield() {
            self.shield = ShieldState::Inactive;
            self.invulnerable_until = Some(now_ms + tuning.invulnerable_ms);
            HitOutcome::Absorbed
        } else {
            HitOutcome::Fatal
        }
    }

    /// Held raygun becomes an active time-stop. Returns false if there was nothing to fire.
    pub fn activate_time_stop(&mut self, now_ms: f64) -> bool {
        if self.raygun == RaygunState::Held {
            self.raygun = RaygunState::Active { started_ms: now_ms };
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_absorbs_then_grace_expires() {
        let tuning = Tuning::default();
        let mut powerups = PowerUps::default();
        let mut events = Vec::new();

        powerups.collect(EntityKind::ShieldPickup);
        assert!(powerups.has_shield());

        assert_eq!(powerups.resolve_obstacle_hit(10_000.0, &tuning), HitOutcome::Absorbed);
        assert!(!powerups.has_shield());
        assert!(powerups.is_invulnerable());

        powerups.update_timers(10_999.0, &tuning, &mut events);
        assert!(powerups.is_invulnerable());
        powerups.update_timers(11_000.0, &tuning, &mut events);
        assert!(!powerups.is_invulnerable());
        assert_eq!(events, vec![GameEvent::InvulnerabilityEnded]);
    }

    #[test]
    fn test_invulnerable_ignores_hits() {
        let tuning = Tuning::default();
        let mut powerups = PowerUps {
            invulnerable_until: Some(500.0),
            ..Default::default()
        };
        let before = powerups.clone();
        assert_eq!(powerups.resolve_obstacle_hit(100.0, &tuning), HitOutcome::Ignored);
        assert_eq!(powerups, before);
    }

    #[test]
    fn test_unprotected_hit_is_fatal() {
        let mut powerups = PowerUps::default();
        assert_eq!(powerups.resolve_obstacle_hit(0.0, &Tuning::default()), HitOutcome::Fatal);
    }

    #[test]
    fn test_time_stop_lifecycle() {
        let tuning = Tuning::default();
        let mut powerups = PowerUps::default();
        let mut events = Vec::new();

        assert!(!powerups.activate_time_stop(0.0));
        powerups.collect(EntityKind::RaygunPickup);
        assert!(powerups.has_raygun());

        assert!(powerups.activate_time_stop(1_000.0));
        assert!(powerups.is_time_stopped());
        assert!(!powerups.has_raygun());

        powerups.update_timers(5_999.0, &tuning, &mut events);
        assert!(powerups.is_time_stopped());
        powerups.update_timers(6_000.0, &tuning, &mut events);
        assert!(!powerups.is_time_stopped());
        assert_eq!(powerups.raygun, RaygunState::NotHeld);
        assert_eq!(events, vec![GameEvent::TimeStopEnded]);
    }

    #[test]
    fn test_raygun_pickup_during_time_stop_is_wasted() {
        let mut powerups = PowerUps {
            raygun: RaygunState::Active { started_ms: 0.0 },
            ..Default::default()
        };
        powerups.collect(EntityKind::RaygunPickup);
        assert!(powerups.is_time_stopped());
    }
}
