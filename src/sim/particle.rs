//! Cosmetic particles
//!
//! Particles never affect gameplay. They are simulated here only so every
//! host renders the same bursts.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub life: f32,
    pub initial_life: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32, speed_scale: f32) {
        let frames = dt * REFERENCE_FPS;
        self.pos += self.vel * frames;
        self.vel.y += 0.1 * speed_scale * frames;
        self.life -= dt;
        self.size *= 0.98_f32.powf(frames);
    }

    /// Opacity fading out with remaining life
    pub fn alpha(&self) -> f32 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0 || self.size <= 0.1
    }
}

/// Shape of a particle burst: count plus (min, max) ranges
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub life: (f32, f32),
}

#[rustfmt::skip]
impl Burst {
    pub const JUMP: Burst = Burst { count: 15, speed: (2.0, 5.0), size: (2.0, 4.0), life: (0.4, 0.8) };
    pub const LAND: Burst = Burst { count: 10, speed: (1.0, 4.0), size: (1.0, 3.0), life: (0.3, 0.6) };
    pub const ATTACK: Burst = Burst { count: 5, speed: (1.0, 3.0), size: (2.0, 4.0), life: (0.2, 0.4) };
    pub const PICKUP: Burst = Burst { count: 3, speed: (1.0, 2.0), size: (1.0, 2.0), life: (0.2, 0.4) };

    pub fn impact(crit: bool) -> Burst {
        Burst {
            count: if crit { 10 } else { 5 },
            speed: (1.0, 4.0),
            size: (1.0, 3.0),
            life: (0.2, 0.5),
        }
    }

    pub fn death(enemy_size: f32) -> Burst {
        Burst {
            count: 20 + enemy_size.max(0.0) as usize,
            speed: (1.0, 6.0),
            size: (1.0, 5.0),
            life: (0.5, 1.2),
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Emit a radial burst, dropping particles past MAX_PARTICLES
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: u32,
    burst: Burst,
    speed_scale: f32,
) {
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    for _ in 0..burst.count.min(room) {
        let angle = rng.random::<f32>() * TAU;
        let speed = sample(rng, burst.speed);
        let life = sample(rng, burst.life);
        particles.push(Particle {
            pos,
            vel: Vec2::from_angle(angle) * speed * speed_scale,
            size: sample(rng, burst.size),
            color,
            life,
            initial_life: life,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        for _ in 0..100 {
            spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xFFFFFF, Burst::death(40.0), 0.6);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_particles_fade_and_die() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xFFFFFF, Burst::JUMP, 0.6);
        assert_eq!(particles.len(), 15);
        for p in &mut particles {
            assert!((p.alpha() - 1.0).abs() < 1e-6);
            p.update(1.0, 0.6);
            assert!(p.is_dead());
        }
    }
}
