//! Cosmetic event feed
//!
//! The simulation never plays sounds or draws effects itself. It records what
//! happened each tick and the host drains the queue into whatever audio and
//! particle systems it owns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyShape;
use super::upgrade::UpgradeId;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground
    Jump { pos: Vec2 },
    /// Player touched down
    Land { pos: Vec2 },
    /// Player fired a volley
    Shoot { pos: Vec2, bullets: u32 },
    /// A bullet struck an enemy
    EnemyHit { pos: Vec2, crit: bool },
    /// An enemy was destroyed and burst into orbs
    EnemyKilled {
        pos: Vec2,
        shape: EnemyShape,
        size: f32,
        xp_value: f32,
    },
    /// Player took damage
    PlayerHit { damage: f32, hp: f32 },
    /// Camera shake request (intensity in pixels, duration in seconds)
    ScreenShake { intensity: f32, duration: f32 },
    /// An XP orb was absorbed
    XpPickup { pos: Vec2, value: f32 },
    /// Player levelled up; the upgrade menu should show these choices
    LevelUp { level: u32, choices: Vec<UpgradeId> },
    /// The menu closed (None when the selection was out of range)
    UpgradeApplied { upgrade: Option<UpgradeId> },
    /// Run ended
    GameOver {
        score: u64,
        time_survived: f32,
        level: u32,
    },
    /// A fresh run started
    Restart,
}

/// Receiver for drained events (audio, particles, HUD)
pub trait EffectSink {
    fn emit(&mut self, event: GameEvent);
}

impl EffectSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
