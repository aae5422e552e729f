//! Pointer picking against obstacles while time is stopped
//!
//! The renderer owns the real camera; [`Camera`] mirrors its projection so a
//! screen coordinate can be turned into a world ray inside the core.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Bounded;
use super::state::{GamePhase, GameEvent, GameState};

/// Perspective camera looking at a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
            fov_y: 90f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to a sphere, if it is hit in front of the origin
    pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let t = to_center.dot(self.dir);
        if t < 0.0 {
            return None;
        }
        let miss_sq = to_center.length_squared() - t * t;
        (miss_sq <= radius * radius).then_some(t)
    }
}

impl Camera {
    pub fn view_proj(&self, viewport: Vec2) -> Mat4 {
        let aspect = viewport.x / viewport.y.max(1.0);
        let proj = Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }

    /// World ray through a pixel (origin top-left)
    pub fn ray_through(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * screen.x / viewport.x - 1.0,
            1.0 - 2.0 * screen.y / viewport.y,
        );
        let inv = self.view_proj(viewport).inverse();
        let near = inv.project_point3(ndc.extend(-1.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray {
            origin: near,
            dir: (far - near).normalize(),
        }
    }

    /// Pixel coordinate of a world point (origin top-left)
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Vec2 {
        let ndc = self.view_proj(viewport).project_point3(point);
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * viewport.x,
            (1.0 - ndc.y) / 2.0 * viewport.y,
        )
    }
}

impl GameState {
    /// Zap the nearest obstacle under the pointer. Only works while running with an
    /// unexpired time-stop; returns the removed obstacle's id.
    pub fn zap_at(&mut self, camera: &Camera, screen: Vec2, viewport: Vec2, now_ms: f64) -> Option<u32> {
        if self.phase != GamePhase::Running || !self.powerups.time_stop_active_at(now_ms, &self.tuning) {
            return None;
        }

        let ray = camera.ray_through(screen, viewport);
        let (id, _) = self
            .entities
            .obstacles
            .iter()
            .filter_map(|o| ray.hit_sphere(o.position(), o.half_extent()).map(|t| (o.id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        self.entities.remove_obstacle(id)?;
        log::info!("Zapped obstacle {}", id);
        self.events.push(GameEvent::ObstacleZapped { id });
        Some(id)
    }
}
