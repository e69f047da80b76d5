//! XP orbs dropped by dying enemies
//!
//! Orbs drift lazily toward the player and home in hard once inside the
//! attraction range (a multiple of the player's pickup radius).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpOrb {
    pub pos: Vec2,
    pub value: f32,
    /// Radius, grows with value
    pub size: f32,
    /// Residual launch velocity, per reference frame (already speed-scaled)
    pub vel: Vec2,
    /// Seconds left before the orb fades
    pub life: f32,
}

impl XpOrb {
    /// Spawn with a small random burst, biased upward
    pub fn new<R: Rng + ?Sized>(pos: Vec2, value: f32, rng: &mut R, speed_scale: f32) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 3.0,
            (rng.random::<f32>() - 0.5) * 3.0 - 2.0,
        ) * speed_scale;
        Self {
            pos,
            value,
            size: 4.0 + value.max(0.0).sqrt(),
            vel,
            life: ORB_LIFE,
        }
    }

    /// Move toward `target`; homing inside the attraction range, drifting outside it
    pub fn update(&mut self, dt: f32, target: Vec2, pickup_radius: f32, speed_scale: f32) {
        self.life -= dt;

        let frames = dt * REFERENCE_FPS;
        let delta = target - self.pos;
        let dist = delta.length();
        let dir = delta.normalize_or_zero();
        let pickup_radius = pickup_radius.max(f32::EPSILON);

        if dist < pickup_radius * ORB_ATTRACTION_FACTOR {
            // Closer orbs fly faster; launch velocity bleeds off as they home
            let speed_mult = ((pickup_radius - dist) / pickup_radius).max(0.1) + 1.0;
            let step = ORB_ATTRACTION_SPEED * speed_scale * speed_mult * frames;
            let damp = (1.0 - speed_mult * 0.05).max(0.0);
            self.vel *= damp.powf(frames);
            self.pos += dir * step + self.vel * frames;
        } else {
            self.vel *= 0.98_f32.powf(frames);
            self.pos += dir * ORB_DRIFT_SPEED * speed_scale * frames + self.vel * frames;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}
