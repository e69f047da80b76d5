//! Game state and run lifecycle
//!
//! All state the simulation mutates lives in [`GameState`]. Hosts own one,
//! feed it to [`super::tick`], read it through [`GameState::snapshot`] and
//! drain its event queue for sound and effects.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::enemy::{Archetype, Enemy, archetype_table};
use super::events::{EffectSink, GameEvent};
use super::orb::XpOrb;
use super::particle::{Burst, Particle, spawn_burst};
use super::player::{DamageOutcome, Player};
use super::spawner::Spawner;
use super::upgrade::{Upgrade, UpgradeId, apply_upgrade, roll_choices};
use crate::consts::*;
use crate::tuning::Tuning;

const PLAYER_COLOR: u32 = 0x00FFFF;
const ORB_COLOR: u32 = 0x00FF00;
const BULLET_COLOR: u32 = 0xFFFFFF;
const CRIT_COLOR: u32 = 0xFFFF00;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until the host calls `apply_choice`
    ChoosingUpgrade,
    /// Frozen by the player
    Paused,
    /// Run ended; a jump/shoot intent restarts
    GameOver,
}

/// Playfield dimensions and the derived ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// y coordinate of the ground (screen space, y grows downward)
    pub ground_y: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, ground_level_percent: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        Self {
            width,
            height,
            ground_y: height * ground_level_percent,
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub playfield: Playfield,
    /// Fractional score; see `score_points` for the displayed value
    pub score: f64,
    /// Real seconds survived
    pub game_time: f32,
    /// Seconds survived times speed scale; drives difficulty
    pub scaled_time: f32,
    pub kills: u32,
    /// Last known pointer position (aim target while airborne)
    pub pointer: Vec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub orbs: Vec<XpOrb>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub archetypes: Vec<Archetype>,
    pub spawner: Spawner,
    upgrade_choices: Vec<UpgradeId>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_tuning(seed, width, height, Tuning::default())
    }

    pub fn with_tuning(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let playfield = Playfield::new(width, height, tuning.ground_level_percent);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0.0,
            game_time: 0.0,
            scaled_time: 0.0,
            kills: 0,
            pointer: Vec2::new(playfield.width / 2.0, playfield.height / 2.0),
            player: Player::new(playfield.width / 2.0, playfield.ground_y, tuning.speed_scale),
            enemies: Vec::new(),
            bullets: Vec::new(),
            orbs: Vec::new(),
            particles: Vec::new(),
            archetypes: archetype_table(tuning.enemy_size_multiplier),
            spawner: Spawner::new(tuning.spawn.clone()),
            upgrade_choices: Vec::new(),
            events: Vec::new(),
            playfield,
            tuning,
        }
    }

    /// Reset the run: fresh player, empty world, zeroed clocks.
    ///
    /// The RNG stream continues, so consecutive runs differ.
    pub fn restart(&mut self) {
        log::info!(
            "Restarting (previous run: score {}, {:.1}s)",
            self.score_points(),
            self.game_time
        );
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.game_time = 0.0;
        self.scaled_time = 0.0;
        self.kills = 0;
        self.player = Player::new(
            self.playfield.width / 2.0,
            self.playfield.ground_y,
            self.tuning.speed_scale,
        );
        self.enemies.clear();
        self.bullets.clear();
        self.orbs.clear();
        self.particles.clear();
        self.archetypes = archetype_table(self.tuning.enemy_size_multiplier);
        self.spawner.reset();
        self.upgrade_choices.clear();
        self.emit(GameEvent::Restart);
    }

    /// Adopt new playfield dimensions without touching gameplay state
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height, self.tuning.ground_level_percent);
        let ground_y = self.playfield.ground_y;
        self.player.set_ground(ground_y);
        for enemy in &mut self.enemies {
            enemy.set_ground(ground_y);
        }
        log::info!(
            "Resized to {}x{} (ground at {})",
            self.playfield.width,
            self.playfield.height,
            ground_y
        );
    }

    pub fn speed_scale(&self) -> f32 {
        self.tuning.speed_scale
    }

    pub fn difficulty_tier(&self) -> u32 {
        self.spawner.tier_at(self.scaled_time)
    }

    /// Score as shown on the HUD
    pub fn score_points(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn is_frozen(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    // === Effects sink ===

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every pending event to `sink`
    pub fn flush_events<S: EffectSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    fn burst(&mut self, pos: Vec2, color: u32, burst: Burst) {
        let scale = self.tuning.speed_scale;
        spawn_burst(&mut self.particles, &mut self.rng, pos, color, burst, scale);
    }

    // === Input intents ===

    /// Pause toggle; ignored while choosing an upgrade or after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Primary action: jump from the ground, shoot in the air, restart when dead
    pub fn jump_or_shoot(&mut self) {
        match self.phase {
            GamePhase::GameOver => self.restart(),
            GamePhase::Playing => {
                if self.player.grounded {
                    if self.player.jump(self.tuning.speed_scale) {
                        let pos = self.player.pos;
                        let feet = Vec2::new(pos.x, self.playfield.ground_y);
                        self.emit(GameEvent::Jump { pos });
                        self.burst(feet, PLAYER_COLOR, Burst::JUMP);
                    }
                } else {
                    let fired = self.player.shoot(&mut self.rng, &mut self.bullets);
                    if fired > 0 {
                        let pos = self.player.pos;
                        self.emit(GameEvent::Shoot { pos, bullets: fired });
                    }
                }
            }
            GamePhase::Paused | GamePhase::ChoosingUpgrade => {}
        }
    }

    // === Upgrade menu ===

    /// Candidates offered by the pending level-up (empty when not choosing)
    pub fn upgrade_choices(&self) -> Vec<Upgrade> {
        self.upgrade_choices.iter().copied().map(Upgrade::from).collect()
    }

    /// Resolve the pending level-up with the candidate at `index`.
    ///
    /// An out-of-range index applies nothing but still closes the menu.
    /// Outside the choosing phase this does nothing.
    pub fn apply_choice(&mut self, index: usize) -> Option<UpgradeId> {
        if self.phase != GamePhase::ChoosingUpgrade {
            return None;
        }
        let picked = self.upgrade_choices.get(index).copied();
        match picked {
            Some(id) => {
                apply_upgrade(&mut self.player, id);
                log::info!("Applied upgrade {} at level {}", id.key(), self.player.level);
            }
            None => log::warn!("Upgrade index {} out of range, skipping", index),
        }
        self.upgrade_choices.clear();
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::UpgradeApplied { upgrade: picked });
        picked
    }

    fn enter_upgrade_choice(&mut self) {
        self.upgrade_choices = roll_choices(&mut self.rng);
        self.phase = GamePhase::ChoosingUpgrade;
        log::info!(
            "Level {} reached, next at {} XP",
            self.player.level,
            self.player.xp_to_next_level
        );
        self.emit(GameEvent::LevelUp {
            level: self.player.level,
            choices: self.upgrade_choices.clone(),
        });
    }

    // === Resolution ===

    /// Apply a hit to the player, ending the run when HP reaches zero
    pub fn damage_player(&mut self, amount: f32) {
        let dealt = match self.player.take_damage(amount) {
            DamageOutcome::Ignored => return,
            DamageOutcome::Hurt { dealt } | DamageOutcome::Killed { dealt } => dealt,
        };
        let hp = self.player.hp;
        self.emit(GameEvent::PlayerHit { damage: dealt, hp });
        self.emit(GameEvent::ScreenShake {
            intensity: 5.0,
            duration: 0.2,
        });
        if !self.player.is_alive() {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.upgrade_choices.clear();
        log::info!(
            "Game over: score {}, survived {:.1}s, level {}, {} kills",
            self.score_points(),
            self.game_time,
            self.player.level,
            self.kills
        );
        self.emit(GameEvent::ScreenShake {
            intensity: 15.0,
            duration: 1.0,
        });
        self.emit(GameEvent::GameOver {
            score: self.score_points(),
            time_survived: self.game_time,
            level: self.player.level,
        });
    }

    /// Credit XP to the player and open the upgrade menu on level-up
    pub fn collect_xp(&mut self, amount: f32) {
        let gain = self.player.collect_xp(amount);
        self.score += gain.gained as f64 * SCORE_PER_XP;
        if gain.leveled_up {
            self.enter_upgrade_choice();
        }
    }

    /// Remove the enemy at `index`, scattering its XP as orbs
    pub fn kill_enemy(&mut self, index: usize) -> Option<Enemy> {
        if index >= self.enemies.len() {
            return None;
        }
        let enemy = self.enemies.remove(index);
        let scale = self.tuning.speed_scale;
        let orbs = enemy.drop_orbs(&mut self.rng, scale);
        log::debug!(
            "{:?} killed at x={:.0}, {} orbs",
            enemy.shape,
            enemy.pos.x,
            orbs.len()
        );
        self.orbs.extend(orbs);
        self.score += enemy.xp_value as f64 * SCORE_PER_KILL_XP;
        self.kills += 1;
        self.emit(GameEvent::EnemyKilled {
            pos: enemy.pos,
            shape: enemy.shape,
            size: enemy.size,
            xp_value: enemy.xp_value,
        });
        self.burst(enemy.pos, enemy.color, Burst::death(enemy.size));
        Some(enemy)
    }

    /// Spawn one enemy appropriate to the current difficulty tier
    pub fn spawn_enemy(&mut self) {
        let tier = self.difficulty_tier();
        let Some(archetype) = self
            .spawner
            .pick(&self.archetypes, tier, &mut self.rng)
            .cloned()
        else {
            log::warn!("No enemy archetypes defined, skipping spawn");
            return;
        };
        let from_left = self.rng.random_bool(0.5);
        let enemy = Enemy::spawn(
            &archetype,
            from_left,
            self.playfield.width,
            self.playfield.ground_y,
        );
        log::debug!(
            "Spawned {:?} (tier {}) from the {}",
            enemy.shape,
            tier,
            if from_left { "left" } else { "right" }
        );
        self.enemies.push(enemy);
    }

    pub(crate) fn impact_burst(&mut self, pos: Vec2, crit: bool) {
        let color = if crit { CRIT_COLOR } else { BULLET_COLOR };
        self.burst(pos, color, Burst::impact(crit));
    }

    pub(crate) fn attack_burst(&mut self, pos: Vec2, color: u32) {
        self.burst(pos, color, Burst::ATTACK);
    }

    pub(crate) fn pickup_burst(&mut self, pos: Vec2) {
        self.burst(pos, ORB_COLOR, Burst::PICKUP);
    }

    pub(crate) fn land_burst(&mut self) {
        let feet = Vec2::new(self.player.pos.x, self.playfield.ground_y);
        self.burst(feet, PLAYER_COLOR, Burst::LAND);
    }

    // === Render feed ===

    /// Read-only view of everything a renderer or HUD needs
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score_points(),
            time_survived: self.game_time,
            difficulty_tier: self.difficulty_tier(),
            kills: self.kills,
            playfield: &self.playfield,
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            orbs: &self.orbs,
            particles: &self.particles,
            upgrade_choices: self.upgrade_choices(),
        }
    }
}

/// Borrowed per-frame view for the draw pass
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub time_survived: f32,
    pub difficulty_tier: u32,
    pub kills: u32,
    pub playfield: &'a Playfield,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub orbs: &'a [XpOrb],
    pub particles: &'a [Particle],
    pub upgrade_choices: Vec<Upgrade>,
}
