//! Data-driven game balance
//!
//! Loaded from JSON by hosts that want to experiment with pacing; every field
//! falls back to the shipped value when omitted.

use serde::{Deserialize, Serialize};

/// Spawn pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawns at the start of a run
    pub initial_interval: f32,
    /// Spawn interval never drops below this
    pub min_interval: f32,
    /// Interval shrink per second of scaled time
    pub decay_rate: f32,
    /// Scaled seconds per difficulty tier
    pub tier_seconds: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_interval: 5.0,
            min_interval: 0.5,
            decay_rate: 0.015,
            tier_seconds: 15.0,
        }
    }
}

/// Global balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Overall game speed (1.0 = authored speed)
    pub speed_scale: f32,
    /// Ground line as a fraction of playfield height
    pub ground_level_percent: f32,
    /// Enemy archetype sizes are multiplied by this
    pub enemy_size_multiplier: f32,
    pub spawn: SpawnTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_scale: 0.6,
            ground_level_percent: 0.85,
            enemy_size_multiplier: 1.8,
            spawn: SpawnTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would stall or break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.speed_scale > 0.0) {
            log::warn!("speed_scale {} is not positive, using default", self.speed_scale);
            self.speed_scale = defaults.speed_scale;
        }
        self.ground_level_percent = self.ground_level_percent.clamp(0.1, 1.0);
        if !(self.enemy_size_multiplier > 0.0) {
            self.enemy_size_multiplier = defaults.enemy_size_multiplier;
        }
        if !(self.spawn.min_interval > 0.0) {
            log::warn!(
                "min spawn interval {} is not positive, using default",
                self.spawn.min_interval
            );
            self.spawn.min_interval = defaults.spawn.min_interval;
        }
        self.spawn.initial_interval = self.spawn.initial_interval.max(self.spawn.min_interval);
        self.spawn.decay_rate = self.spawn.decay_rate.max(0.0);
        if !(self.spawn.tier_seconds > 0.0) {
            self.spawn.tier_seconds = defaults.spawn.tier_seconds;
        }
        self
    }
}
