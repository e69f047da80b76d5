//! The player character
//!
//! Grounded, the player can only jump. Airborne, it aims at the pointer and
//! fires volleys on cooldown until gravity brings it back down.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use crate::consts::*;
use crate::{angle_lerp, frame_blend};

/// Weapon stat block, mutated by upgrades
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletStats {
    pub damage: f32,
    /// Pixels per reference frame before speed scaling
    pub speed: f32,
    pub size: f32,
    pub count: u32,
    /// Angle between neighbouring bullets in a volley (radians)
    pub spread: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
}

impl Default for BulletStats {
    fn default() -> Self {
        Self {
            damage: 10.0,
            speed: 8.0,
            size: 5.0,
            count: 1,
            spread: 0.2,
            crit_chance: 0.05,
            crit_multiplier: 1.5,
        }
    }
}

/// Result of a hit on the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Player was already dead
    Ignored,
    Hurt { dealt: f32 },
    /// This hit brought HP to zero
    Killed { dealt: f32 },
}

/// Result of absorbing XP
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpGain {
    /// XP after the gain multiplier
    pub gained: f32,
    /// Threshold was crossed and the level-up applied
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: f32,
    /// Center height when standing on the ground
    pub base_y: f32,
    pub grounded: bool,
    pub vel_y: f32,
    /// Facing angle (radians)
    pub angle: f32,
    pub target_angle: f32,
    pub rotation_speed: f32,

    pub hp: f32,
    pub max_hp: f32,
    /// HP per second
    pub regen_rate: f32,
    /// Fraction of incoming damage ignored (capped at MAX_DAMAGE_REDUCTION)
    pub damage_reduction: f32,

    /// Already speed-scaled, per reference frame
    pub gravity: f32,
    pub jump_power: f32,

    /// Seconds between volleys
    pub attack_cooldown: f32,
    pub time_since_last_shot: f32,
    pub bullet: BulletStats,

    pub level: u32,
    pub xp: f32,
    pub xp_to_next_level: u64,
    pub xp_gain_multiplier: f32,
    pub pickup_radius: f32,

    /// Remaining hit-flash time
    pub damage_flash: f32,
}

impl Player {
    pub fn new(x: f32, ground_y: f32, speed_scale: f32) -> Self {
        let size = PLAYER_SIZE;
        let base_y = ground_y - size / 2.0;
        let attack_cooldown = 1.0;
        Self {
            pos: Vec2::new(x, base_y),
            size,
            base_y,
            grounded: true,
            vel_y: 0.0,
            angle: -FRAC_PI_2,
            target_angle: -FRAC_PI_2,
            rotation_speed: PLAYER_ROTATION_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            regen_rate: 0.0,
            damage_reduction: 0.0,
            gravity: PLAYER_GRAVITY * speed_scale,
            jump_power: PLAYER_JUMP_POWER,
            attack_cooldown,
            time_since_last_shot: attack_cooldown,
            bullet: BulletStats::default(),
            level: 1,
            xp: 0.0,
            xp_to_next_level: FIRST_LEVEL_XP,
            xp_gain_multiplier: 1.0,
            pickup_radius: 100.0,
            damage_flash: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Move the standing height after the ground line changes
    pub fn set_ground(&mut self, ground_y: f32) {
        self.base_y = ground_y - self.size / 2.0;
        if self.grounded {
            self.pos.y = self.base_y;
        }
    }

    /// Advance one frame. Returns true on the frame the player lands.
    pub fn update(&mut self, dt: f32, pointer: Vec2) -> bool {
        if self.regen_rate > 0.0 && self.is_alive() && self.hp < self.max_hp {
            self.hp = (self.hp + self.regen_rate * dt).min(self.max_hp);
        }

        let frames = dt * REFERENCE_FPS;
        let mut landed = false;
        if !self.grounded {
            self.vel_y += self.gravity * frames;
            self.pos.y += self.vel_y * frames;

            let to_pointer = pointer - self.pos;
            self.target_angle = to_pointer.y.atan2(to_pointer.x);

            if self.pos.y >= self.base_y {
                self.pos.y = self.base_y;
                self.vel_y = 0.0;
                self.grounded = true;
                landed = true;
            }
        } else {
            self.target_angle = -FRAC_PI_2;
            self.vel_y = 0.0;
            self.pos.y = self.base_y;
        }
        self.angle = angle_lerp(
            self.angle,
            self.target_angle,
            frame_blend(self.rotation_speed, dt),
        );

        self.time_since_last_shot += dt;
        if self.damage_flash > 0.0 {
            self.damage_flash = (self.damage_flash - dt).max(0.0);
        }
        landed
    }

    /// Leave the ground. Returns false when already airborne.
    pub fn jump(&mut self, speed_scale: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = -self.jump_power * speed_scale;
        self.grounded = false;
        true
    }

    pub fn can_shoot(&self) -> bool {
        !self.grounded && self.time_since_last_shot >= self.attack_cooldown
    }

    /// Fire a volley fanned around the facing angle.
    ///
    /// Returns the number of bullets pushed (0 when grounded or cooling down).
    pub fn shoot<R: Rng + ?Sized>(&mut self, rng: &mut R, bullets: &mut Vec<Bullet>) -> u32 {
        if !self.can_shoot() {
            return 0;
        }
        self.time_since_last_shot = 0.0;

        let stats = &self.bullet;
        let count = stats.count.max(1);
        let total_spread = stats.spread * (count - 1) as f32;
        let start = self.angle - total_spread / 2.0;

        for i in 0..count {
            let angle = if count > 1 {
                start + i as f32 * stats.spread
            } else {
                self.angle
            };
            let dir = Vec2::from_angle(angle);
            let crit = rng.random::<f32>() < stats.crit_chance;
            let damage = if crit {
                stats.damage * stats.crit_multiplier
            } else {
                stats.damage
            };
            bullets.push(Bullet::new(
                self.pos + dir * (self.size / 1.5),
                dir * stats.speed,
                stats.size,
                damage,
                crit,
            ));
        }
        count
    }

    /// Apply a hit, scaled by damage reduction. HP never leaves [0, max_hp].
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        let reduction = self.damage_reduction.clamp(0.0, MAX_DAMAGE_REDUCTION);
        let dealt = (amount * (1.0 - reduction)).max(0.0);
        self.hp = (self.hp - dealt).clamp(0.0, self.max_hp);
        self.damage_flash = PLAYER_DAMAGE_FLASH;

        if self.hp <= 0.0 {
            DamageOutcome::Killed { dealt }
        } else {
            DamageOutcome::Hurt { dealt }
        }
    }

    /// Absorb XP, levelling up when the threshold is met
    pub fn collect_xp(&mut self, amount: f32) -> XpGain {
        let gained = amount * self.xp_gain_multiplier;
        self.xp += gained;
        let leveled_up = self.xp >= self.xp_to_next_level as f32;
        if leveled_up {
            self.level_up();
        }
        XpGain { gained, leveled_up }
    }

    /// Carry overflow XP into the next level and heal fully.
    ///
    /// The next threshold is `floor(prev * 1.4 + 50)`, computed in integers.
    pub fn level_up(&mut self) {
        self.xp = (self.xp - self.xp_to_next_level as f32).max(0.0);
        self.level += 1;
        self.xp_to_next_level = next_level_threshold(self.xp_to_next_level);
        self.hp = self.max_hp;
    }
}

/// XP required for the level after one needing `prev`.
///
/// Widened to u128 so the result only saturates at `u64::MAX`.
pub fn next_level_threshold(prev: u64) -> u64 {
    let next = prev as u128 * 7 / 5 + 50;
    next.min(u64::MAX as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const GROUND: f32 = 500.0;

    fn player() -> Player {
        Player::new(400.0, GROUND, 0.6)
    }

    #[test]
    fn test_starts_grounded_upright() {
        let p = player();
        assert!(p.grounded);
        assert_eq!(p.pos.y, GROUND - PLAYER_SIZE / 2.0);
        assert_eq!(p.angle, -FRAC_PI_2);
        assert!(p.time_since_last_shot >= p.attack_cooldown);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut p = player();
        assert!(p.jump(0.6));
        assert!(!p.grounded);
        assert!((p.vel_y + 6.0).abs() < 1e-5);
        assert!(!p.jump(0.6));
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut p = player();
        p.jump(0.6);
        let pointer = Vec2::new(400.0, 0.0);
        let mut landed = false;
        for _ in 0..600 {
            if p.update(1.0 / 60.0, pointer) {
                landed = true;
                break;
            }
            assert!(p.pos.y <= p.base_y);
        }
        assert!(landed);
        assert!(p.grounded);
        assert_eq!(p.pos.y, p.base_y);
    }

    #[test]
    fn test_shoot_requires_airborne() {
        let mut p = player();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullets = Vec::new();
        assert_eq!(p.shoot(&mut rng, &mut bullets), 0);
        assert!(bullets.is_empty());

        p.jump(0.6);
        assert_eq!(p.shoot(&mut rng, &mut bullets), 1);
        assert_eq!(bullets.len(), 1);

        // Cooldown blocks an immediate second volley
        assert_eq!(p.shoot(&mut rng, &mut bullets), 0);
    }

    #[test]
    fn test_volley_fans_around_facing() {
        let mut p = player();
        p.bullet.count = 3;
        p.bullet.crit_chance = 0.0;
        p.angle = 0.0;
        p.jump(0.6);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut bullets = Vec::new();
        assert_eq!(p.shoot(&mut rng, &mut bullets), 3);

        let angles: Vec<f32> = bullets.iter().map(|b| b.vel.y.atan2(b.vel.x)).collect();
        assert!((angles[0] + 0.2).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4);
        assert!((angles[2] - 0.2).abs() < 1e-4);
        assert!(bullets.iter().all(|b| !b.crit && b.damage == 10.0));
    }

    #[test]
    fn test_guaranteed_crit_multiplies_damage() {
        let mut p = player();
        p.bullet.crit_chance = 1.0;
        p.jump(0.6);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bullets = Vec::new();
        p.shoot(&mut rng, &mut bullets);
        assert!(bullets[0].crit);
        assert_eq!(bullets[0].damage, 15.0);
    }

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut p = player();
        assert_eq!(p.take_damage(150.0), DamageOutcome::Killed { dealt: 150.0 });
        assert_eq!(p.hp, 0.0);
        assert_eq!(p.take_damage(10.0), DamageOutcome::Ignored);
        assert_eq!(p.hp, 0.0);
    }

    #[test]
    fn test_damage_reduction_is_capped() {
        let mut p = player();
        p.damage_reduction = 2.0;
        match p.take_damage(50.0) {
            DamageOutcome::Hurt { dealt } => assert!((dealt - 5.0).abs() < 1e-4),
            other => panic!("unexpected {:?}", other),
        }
        assert!(p.damage_flash > 0.0);
    }

    #[test]
    fn test_regen_never_exceeds_max() {
        let mut p = player();
        p.regen_rate = 50.0;
        p.hp = 99.0;
        p.update(0.1, Vec2::ZERO);
        assert_eq!(p.hp, p.max_hp);
    }

    #[test]
    fn test_collect_xp_levels_with_overflow() {
        let mut p = player();
        p.xp = 40.0;
        p.hp = 30.0;
        let gain = p.collect_xp(20.0);
        assert!(gain.leveled_up);
        assert_eq!(p.level, 2);
        assert!((p.xp - 10.0).abs() < 1e-5);
        assert_eq!(p.xp_to_next_level, 120);
        assert_eq!(p.hp, p.max_hp);
    }

    #[test]
    fn test_collect_xp_applies_multiplier() {
        let mut p = player();
        p.xp_gain_multiplier = 1.5;
        let gain = p.collect_xp(10.0);
        assert_eq!(gain.gained, 15.0);
        assert!(!gain.leveled_up);
        assert_eq!(p.xp, 15.0);
    }

    #[test]
    fn test_threshold_sequence() {
        assert_eq!(next_level_threshold(50), 120);
        assert_eq!(next_level_threshold(120), 218);
        assert_eq!(next_level_threshold(218), 355);
    }

    #[test]
    fn test_threshold_keeps_growing_past_u32() {
        let big = 858_993_509;
        assert!(next_level_threshold(big) > big);
        let huge = u32::MAX as u64;
        assert_eq!(next_level_threshold(huge), huge * 7 / 5 + 50);
        assert_eq!(next_level_threshold(u64::MAX - 1), u64::MAX);

        let mut threshold = FIRST_LEVEL_XP;
        for _ in 0..100 {
            let next = next_level_threshold(threshold);
            assert!(next > threshold);
            threshold = next;
        }
    }

    #[test]
    fn test_set_ground_snaps_grounded_player() {
        let mut p = player();
        p.set_ground(300.0);
        assert_eq!(p.pos.y, 300.0 - PLAYER_SIZE / 2.0);

        p.jump(0.6);
        p.pos.y = 100.0;
        p.set_ground(600.0);
        assert_eq!(p.pos.y, 100.0);
        assert_eq!(p.base_y, 600.0 - PLAYER_SIZE / 2.0);
    }
}
