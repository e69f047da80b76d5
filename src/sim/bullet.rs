//! Player bullets
//!
//! Bullets fly straight (no gravity) until they expire, leave the playfield
//! or strike an enemy.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Velocity in pixels per reference frame, before speed scaling
    pub vel: Vec2,
    /// Radius
    pub size: f32,
    pub damage: f32,
    pub crit: bool,
    /// Seconds left before the bullet fizzles
    pub life: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, damage: f32, crit: bool) -> Self {
        Self {
            pos,
            vel,
            size,
            damage,
            crit,
            life: BULLET_LIFE,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    pub fn update(&mut self, dt: f32, speed_scale: f32) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.pos += self.vel * speed_scale * dt * REFERENCE_FPS;
        self.life -= dt;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// True once the bullet is fully outside a `width` x `height` playfield
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < -self.size
            || self.pos.x > width + self.size
            || self.pos.y < -self.size
            || self.pos.y > height + self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_in_straight_line() {
        let mut b = Bullet::new(Vec2::new(100.0, 100.0), Vec2::new(8.0, -4.0), 5.0, 10.0, false);
        b.update(1.0 / 60.0, 1.0);
        assert!((b.pos - Vec2::new(108.0, 96.0)).length() < 1e-3);
        b.update(1.0 / 60.0, 0.5);
        assert!((b.pos - Vec2::new(112.0, 94.0)).length() < 1e-3);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut b = Bullet::new(Vec2::ZERO, Vec2::X, 5.0, 10.0, false);
        for _ in 0..20 {
            b.update(1.0 / 60.0, 1.0);
        }
        assert_eq!(b.trail.len(), TRAIL_LENGTH);
        // Newest trail point is the position before the last step
        let newest = *b.trail.back().unwrap();
        assert!((b.pos.x - newest.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_expires() {
        let mut b = Bullet::new(Vec2::ZERO, Vec2::ZERO, 5.0, 10.0, false);
        b.update(BULLET_LIFE, 1.0);
        assert!(b.is_expired());
    }

    #[test]
    fn test_bounds_allow_size_margin() {
        let mut b = Bullet::new(Vec2::new(-4.0, 50.0), Vec2::ZERO, 5.0, 10.0, false);
        assert!(!b.is_out_of_bounds(800.0, 600.0));
        b.pos.x = -6.0;
        assert!(b.is_out_of_bounds(800.0, 600.0));
        b.pos = Vec2::new(400.0, 606.0);
        assert!(b.is_out_of_bounds(800.0, 600.0));
    }
}
