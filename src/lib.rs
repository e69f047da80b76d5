//! Poly Jumper - A jump-and-shoot arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, progression)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Leaderboard of finished runs

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (tab-switch stalls are clamped)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Gameplay speeds are authored in pixels per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    pub const PLAYER_GRAVITY: f32 = 0.05;
    pub const PLAYER_JUMP_POWER: f32 = 10.0;
    pub const PLAYER_ROTATION_SPEED: f32 = 0.15;
    pub const PLAYER_DAMAGE_FLASH: f32 = 0.15;
    /// Damage reduction never exceeds this, however many hull upgrades stack
    pub const MAX_DAMAGE_REDUCTION: f32 = 0.9;
    pub const FIRST_LEVEL_XP: u64 = 50;
    /// Score awarded per point of (multiplied) XP collected
    pub const SCORE_PER_XP: f64 = 10.0;

    /// Bullet defaults
    pub const BULLET_LIFE: f32 = 10.0;
    pub const TRAIL_LENGTH: usize = 5;

    /// Enemy defaults
    pub const ENEMY_HIT_FLASH: f32 = 0.1;
    pub const ENEMY_ATTACK_COOLDOWN: f32 = 1.0;
    /// Extra reach added to an enemy's size when no attack range is given
    pub const ENEMY_ATTACK_REACH: f32 = 20.0;
    /// XP carried by a single orb before an enemy's reward is split
    pub const XP_PER_ORB: f32 = 5.0;
    /// Score awarded per point of XP value on kill
    pub const SCORE_PER_KILL_XP: f64 = 2.0;

    /// XP orb defaults
    pub const ORB_LIFE: f32 = 30.0;
    pub const ORB_ATTRACTION_SPEED: f32 = 9.0;
    pub const ORB_DRIFT_SPEED: f32 = 3.0;
    /// Attraction kicks in at this multiple of the pickup radius
    pub const ORB_ATTRACTION_FACTOR: f32 = 1.5;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}

/// Interpolate between two angles along the shorter arc
///
/// `t` of 0 returns `from`, 1 returns `to` (modulo a full turn).
#[inline]
pub fn angle_lerp(from: f32, to: f32, t: f32) -> f32 {
    use std::f32::consts::TAU;
    let da = (to - from) % TAU;
    let short = (2.0 * da) % TAU - da;
    from + short * t
}

/// Blend factor for a per-reference-frame lerp rate applied over `dt` seconds
#[inline]
pub fn frame_blend(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(dt * consts::REFERENCE_FPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_lerp_takes_short_way() {
        // From just below +PI to just above -PI is a small step, not a full turn
        let a = angle_lerp(PI - 0.1, -PI + 0.1, 0.5);
        assert!((a - PI).abs() < 0.001);
    }

    #[test]
    fn test_angle_lerp_endpoints() {
        assert!((angle_lerp(0.3, 1.2, 0.0) - 0.3).abs() < 1e-6);
        assert!((angle_lerp(0.3, 1.2, 1.0) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_frame_blend_matches_rate_at_reference_frame() {
        let t = frame_blend(0.15, 1.0 / consts::REFERENCE_FPS);
        assert!((t - 0.15).abs() < 1e-5);
        assert_eq!(frame_blend(0.15, 0.0), 0.0);
    }
}
