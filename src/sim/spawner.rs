//! Enemy spawn pacing
//!
//! The spawn interval shrinks linearly with scaled time down to a floor, and
//! every `tier_seconds` of scaled time unlocks the next difficulty tier.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Archetype;
use crate::tuning::SpawnTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Real seconds since the last spawn
    pub timer: f32,
    /// Current interval (refreshed every update)
    pub interval: f32,
    config: SpawnTuning,
}

impl Spawner {
    pub fn new(config: SpawnTuning) -> Self {
        Self {
            timer: 0.0,
            interval: config.initial_interval,
            config,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.interval = self.config.initial_interval;
    }

    /// `max(floor, initial - scaled_time * decay)`
    pub fn interval_at(&self, scaled_time: f32) -> f32 {
        let c = &self.config;
        (c.initial_interval - scaled_time.max(0.0) * c.decay_rate).max(c.min_interval)
    }

    pub fn tier_at(&self, scaled_time: f32) -> u32 {
        (scaled_time.max(0.0) / self.config.tier_seconds).floor() as u32
    }

    /// Advance the timer. Returns true when an enemy is due.
    pub fn update(&mut self, dt: f32, scaled_time: f32) -> bool {
        self.timer += dt;
        self.interval = self.interval_at(scaled_time);
        if self.timer >= self.interval {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Pick an archetype unlocked at `tier`.
    ///
    /// Sampling uses `floor(sqrt(u) * n)`, which leans toward the later
    /// (tougher) end of the unlocked pool. Falls back to the first archetype
    /// when nothing is unlocked.
    pub fn pick<'a, R: Rng + ?Sized>(
        &self,
        table: &'a [Archetype],
        tier: u32,
        rng: &mut R,
    ) -> Option<&'a Archetype> {
        let pool: Vec<&Archetype> = table.iter().filter(|a| a.min_tier <= tier).collect();
        if pool.is_empty() {
            return table.first();
        }
        let roll = rng.random::<f32>().sqrt();
        let index = ((roll * pool.len() as f32).floor() as usize).min(pool.len() - 1);
        Some(pool[index])
    }
}
