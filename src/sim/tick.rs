//! Variable timestep simulation tick
//!
//! Advances the world by one frame in a fixed update order: player, bullets,
//! enemies, orbs, particles, spawner.

use glam::Vec2;

use super::collision;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Horizontal distance at which the autoplay bot hops over an enemy
const AUTOPLAY_JUMP_DISTANCE: f32 = 220.0;

/// Input intents gathered by the host for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position in playfield coordinates
    pub pointer: Option<Vec2>,
    /// Primary action (click/tap/space)
    pub jump_or_shoot: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - a bot plays the game
    pub autoplay: bool,
}

/// Clamp a host frame delta into `[0, MAX_FRAME_DT]`; non-finite becomes 0
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);

    let mut input = input.clone();
    if input.autoplay {
        autoplay(state, &mut input);
    }

    if let Some(pointer) = input.pointer {
        state.pointer = pointer;
    }
    if input.pause {
        state.toggle_pause();
    }
    if input.jump_or_shoot {
        state.jump_or_shoot();
    }

    // Frozen phases leave the world untouched
    if state.is_frozen() {
        return;
    }

    state.game_time += dt;
    state.scaled_time += dt * state.speed_scale();

    update_player(state, dt);
    update_bullets(state, dt);
    update_enemies(state, dt);
    update_orbs(state, dt);
    update_particles(state, dt);
    update_spawner(state, dt);
}

/// Demo bot: hop over the nearest walker, shoot it from the air, take the
/// first upgrade offered.
fn autoplay(state: &mut GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::ChoosingUpgrade => {
            state.apply_choice(0);
            return;
        }
        GamePhase::Playing => {}
        _ => return,
    }

    let player = &state.player;
    let nearest = state.enemies.iter().min_by(|a, b| {
        let da = (a.pos.x - player.pos.x).abs();
        let db = (b.pos.x - player.pos.x).abs();
        da.total_cmp(&db)
    });
    let Some(target) = nearest else {
        return;
    };

    if player.grounded {
        if (target.pos.x - player.pos.x).abs() < AUTOPLAY_JUMP_DISTANCE {
            input.jump_or_shoot = true;
        }
    } else {
        input.pointer = Some(target.pos);
        input.jump_or_shoot |= player.can_shoot();
    }
}

fn update_player(state: &mut GameState, dt: f32) {
    let pointer = state.pointer;
    if state.player.update(dt, pointer) {
        let pos = state.player.pos;
        state.emit(GameEvent::Land { pos });
        state.land_burst();
    }
}

/// Move bullets and resolve hits. The first enemy hit consumes the bullet.
fn update_bullets(state: &mut GameState, dt: f32) {
    let scale = state.speed_scale();
    let (width, height) = (state.playfield.width, state.playfield.height);

    // Reverse order so removal leaves unvisited indices intact
    for i in (0..state.bullets.len()).rev() {
        state.bullets[i].update(dt, scale);

        if let Some(target) = collision::first_enemy_hit(&state.bullets[i], &state.enemies) {
            let bullet = state.bullets.remove(i);
            state.emit(GameEvent::EnemyHit {
                pos: bullet.pos,
                crit: bullet.crit,
            });
            state.impact_burst(bullet.pos, bullet.crit);
            if state.enemies[target].take_damage(bullet.damage) {
                state.kill_enemy(target);
            }
            continue;
        }

        let bullet = &state.bullets[i];
        if bullet.is_expired() || bullet.is_out_of_bounds(width, height) {
            state.bullets.remove(i);
        }
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let scale = state.speed_scale();
    let target_x = state.player.pos.x;

    for i in (0..state.enemies.len()).rev() {
        if !state.enemies[i].update(dt, target_x, scale) {
            continue;
        }
        if !state.player.is_alive() {
            continue;
        }
        let (pos, color, damage) = {
            let enemy = &state.enemies[i];
            (enemy.pos, enemy.color, enemy.damage)
        };
        state.attack_burst(pos, color);
        state.damage_player(damage);
    }
}

/// Orbs home in on the player once inside the pickup radius.
///
/// Contact is tested before the move. Collection stops for the rest of the
/// frame once a level-up opens the upgrade menu.
fn update_orbs(state: &mut GameState, dt: f32) {
    let scale = state.speed_scale();

    for i in (0..state.orbs.len()).rev() {
        let touching = state.phase == GamePhase::Playing
            && collision::orb_touches_player(&state.orbs[i], &state.player);

        let (target, radius) = (state.player.pos, state.player.pickup_radius);
        state.orbs[i].update(dt, target, radius, scale);

        if touching {
            let orb = state.orbs.remove(i);
            state.emit(GameEvent::XpPickup {
                pos: orb.pos,
                value: orb.value,
            });
            state.pickup_burst(orb.pos);
            state.collect_xp(orb.value);
        } else if state.orbs[i].is_expired() {
            state.orbs.remove(i);
        }
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    let scale = state.speed_scale();
    for particle in &mut state.particles {
        particle.update(dt, scale);
    }
    state.particles.retain(|p| !p.is_dead());
}

fn update_spawner(state: &mut GameState, dt: f32) {
    let scaled_time = state.scaled_time;
    if state.spawner.update(dt, scaled_time) {
        state.spawn_enemy();
    }
}
