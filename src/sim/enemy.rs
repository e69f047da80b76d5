//! Enemies and their archetype table
//!
//! Enemies walk along the ground toward the player and hit it on contact.
//! Each archetype unlocks at a difficulty tier; see [`archetype_table`].

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::orb::XpOrb;
use crate::consts::*;

/// Polygon outline of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyShape {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Octagon,
    /// Five-pointed star
    Star,
}

impl EnemyShape {
    /// Outline vertices centred on the origin, first vertex pointing up
    pub fn vertices(&self, size: f32) -> Vec<Vec2> {
        let radius = size / 2.0;
        let sides = match self {
            EnemyShape::Triangle => 3,
            EnemyShape::Square => 4,
            EnemyShape::Pentagon => 5,
            EnemyShape::Hexagon => 6,
            EnemyShape::Octagon => 8,
            EnemyShape::Star => {
                let points = 5 * 2;
                return (0..points)
                    .map(|i| {
                        let angle = TAU / points as f32 * i as f32 - FRAC_PI_2;
                        let r = if i % 2 == 0 { radius } else { radius * 0.5 };
                        Vec2::from_angle(angle) * r
                    })
                    .collect();
            }
        };
        // Squares sit flat rather than on a corner
        let offset = if *self == EnemyShape::Square {
            FRAC_PI_4
        } else {
            0.0
        };
        (0..sides)
            .map(|i| {
                let angle = TAU / sides as f32 * i as f32 - FRAC_PI_2 + offset;
                Vec2::from_angle(angle) * radius
            })
            .collect()
    }
}

/// Enemy template gated by difficulty tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    /// Lowest difficulty tier this archetype may spawn at
    pub min_tier: u32,
    pub shape: EnemyShape,
    pub size: f32,
    pub hp: f32,
    /// Pixels per reference frame, before speed scaling
    pub speed: f32,
    pub damage: f32,
    pub xp_value: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub attack_cooldown: Option<f32>,
    pub attack_range: Option<f32>,
}

/// The full enemy roster, with sizes scaled by `size_multiplier`
pub fn archetype_table(size_multiplier: f32) -> Vec<Archetype> {
    use EnemyShape::*;
    #[rustfmt::skip]
    let base: [(u32, EnemyShape, f32, f32, f32, f32, f32, u32); 21] = [
        // tier, shape, size, hp, speed, damage, xp, color
        (0, Triangle, 20.0, 20.0, 1.5, 5.0, 5.0, 0xFFA500),
        (0, Square, 25.0, 30.0, 1.2, 7.0, 8.0, 0xADD8E6),
        (1, Triangle, 22.0, 25.0, 1.8, 6.0, 6.0, 0xFFA07A),
        (2, Pentagon, 30.0, 50.0, 1.0, 10.0, 12.0, 0x90EE90),
        (3, Square, 28.0, 60.0, 1.4, 9.0, 15.0, 0xB0C4DE),
        (3, Hexagon, 35.0, 80.0, 0.9, 12.0, 20.0, 0xFFB6C1),
        (4, Triangle, 18.0, 30.0, 2.5, 8.0, 10.0, 0xFF6347),
        (4, Star, 30.0, 60.0, 1.2, 11.0, 18.0, 0xFFD700),
        (5, Pentagon, 32.0, 100.0, 1.1, 15.0, 25.0, 0x3CB371),
        (6, Octagon, 40.0, 150.0, 0.8, 18.0, 35.0, 0xBA55D3),
        (6, Square, 35.0, 90.0, 1.8, 14.0, 30.0, 0x4682B4),
        (7, Star, 38.0, 120.0, 1.3, 16.0, 40.0, 0xDAA520),
        (7, Triangle, 25.0, 60.0, 2.8, 13.0, 28.0, 0xDC143C),
        (8, Hexagon, 45.0, 200.0, 1.0, 20.0, 50.0, 0x8B008B),
        (9, Octagon, 42.0, 180.0, 1.2, 22.0, 60.0, 0x8A2BE2),
        (10, Star, 40.0, 150.0, 1.6, 25.0, 70.0, 0xFF4500),
        (11, Square, 30.0, 100.0, 2.5, 20.0, 55.0, 0x0000CD),
        (12, Pentagon, 35.0, 250.0, 0.9, 28.0, 80.0, 0x2E8B57),
        (14, Triangle, 40.0, 150.0, 3.0, 30.0, 90.0, 0xFF0000),
        (16, Star, 50.0, 300.0, 1.4, 35.0, 120.0, 0xFFFF00),
        (18, Hexagon, 55.0, 400.0, 1.0, 40.0, 150.0, 0x4B0082),
    ];

    base.iter()
        .map(|&(min_tier, shape, size, hp, speed, damage, xp_value, color)| Archetype {
            min_tier,
            shape,
            size: size * size_multiplier,
            hp,
            speed,
            damage,
            xp_value,
            color,
            attack_cooldown: None,
            attack_range: None,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Center position
    pub pos: Vec2,
    pub shape: EnemyShape,
    pub size: f32,
    /// Outline relative to `pos`
    pub vertices: Vec<Vec2>,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    /// Contact damage per attack
    pub damage: f32,
    pub attack_cooldown: f32,
    pub time_since_attack: f32,
    /// Horizontal reach of the contact attack
    pub attack_range: f32,
    pub xp_value: f32,
    pub color: u32,
    /// Remaining hit-flash time
    pub hit_flash: f32,
}

impl Enemy {
    /// Create an enemy just off one edge of the playfield, standing on the ground
    pub fn spawn(archetype: &Archetype, from_left: bool, width: f32, ground_y: f32) -> Self {
        let size = archetype.size;
        let x = if from_left { -size } else { width + size };
        let attack_cooldown = archetype.attack_cooldown.unwrap_or(ENEMY_ATTACK_COOLDOWN);
        Self {
            pos: Vec2::new(x, Self::ground_center(ground_y, size)),
            shape: archetype.shape,
            size,
            vertices: archetype.shape.vertices(size),
            hp: archetype.hp,
            max_hp: archetype.hp,
            speed: archetype.speed,
            damage: archetype.damage,
            attack_cooldown,
            time_since_attack: attack_cooldown,
            attack_range: archetype
                .attack_range
                .unwrap_or(size + ENEMY_ATTACK_REACH),
            xp_value: archetype.xp_value,
            color: archetype.color,
            hit_flash: 0.0,
        }
    }

    /// Enemies sink slightly into the ground line
    fn ground_center(ground_y: f32, size: f32) -> f32 {
        ground_y + 5.0 - size / 2.0
    }

    pub fn set_ground(&mut self, ground_y: f32) {
        self.pos.y = Self::ground_center(ground_y, self.size);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Walk toward `target_x` and attack when in reach.
    ///
    /// Returns true when the enemy lands an attack this frame.
    pub fn update(&mut self, dt: f32, target_x: f32, speed_scale: f32) -> bool {
        self.time_since_attack += dt;

        let dx = target_x - self.pos.x;
        let dist = dx.abs();
        if dist > self.attack_range * 0.8 {
            self.pos.x += dx.signum() * self.speed * speed_scale * dt * REFERENCE_FPS;
        }

        let attacks = dist <= self.attack_range && self.time_since_attack >= self.attack_cooldown;
        if attacks {
            self.time_since_attack = 0.0;
        }

        if self.hit_flash > 0.0 {
            self.hit_flash = (self.hit_flash - dt).max(0.0);
        }
        attacks
    }

    /// Apply bullet damage. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        self.hit_flash = ENEMY_HIT_FLASH;
        self.is_dead()
    }

    /// Number of orbs the XP reward splits into
    pub fn orb_count(&self) -> usize {
        (self.xp_value / XP_PER_ORB).ceil().max(1.0) as usize
    }

    /// Scatter the XP reward as orbs around the body
    pub fn drop_orbs<R: Rng + ?Sized>(&self, rng: &mut R, speed_scale: f32) -> Vec<XpOrb> {
        let count = self.orb_count();
        let value = self.xp_value / count as f32;
        (0..count)
            .map(|_| {
                let offset = Vec2::new(
                    (rng.random::<f32>() - 0.5) * self.size * 1.5,
                    // Biased upward, away from the ground
                    (rng.random::<f32>() - 0.5) * self.size * 0.5 - self.size * 0.2,
                );
                XpOrb::new(self.pos + offset, value, rng, speed_scale)
            })
            .collect()
    }
}
