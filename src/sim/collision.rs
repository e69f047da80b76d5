//! Proximity tests
//!
//! Everything in the game collides as circles: bullets and orbs use their
//! radius, enemies and the player use half their size.

use glam::Vec2;

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::orb::XpOrb;
use super::player::Player;

/// Strict circle overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

pub fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    circles_overlap(bullet.pos, bullet.size, enemy.pos, enemy.size / 2.0)
}

/// Pickup test between an orb and the player body
pub fn orb_touches_player(orb: &XpOrb, player: &Player) -> bool {
    circles_overlap(orb.pos, orb.size / 2.0, player.pos, player.size / 2.0)
}

/// Index of the enemy a bullet strikes, scanning from the back of the list.
///
/// Only the first match counts; a bullet never damages two enemies.
pub fn first_enemy_hit(bullet: &Bullet, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .rev()
        .find(|(_, enemy)| bullet_hits_enemy(bullet, enemy))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Archetype, EnemyShape};

    fn enemy_at(x: f32) -> Enemy {
        let archetype = Archetype {
            min_tier: 0,
            shape: EnemyShape::Triangle,
            size: 40.0,
            hp: 20.0,
            speed: 1.0,
            damage: 5.0,
            xp_value: 5.0,
            color: 0,
            attack_cooldown: None,
            attack_range: None,
        };
        let mut e = Enemy::spawn(&archetype, true, 800.0, 500.0);
        e.pos = Vec2::new(x, 485.0);
        e
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_bullet_radius_plus_half_enemy_size() {
        let enemy = enemy_at(100.0);
        let mut bullet = Bullet::new(Vec2::new(124.0, 485.0), Vec2::ZERO, 5.0, 10.0, false);
        assert!(bullet_hits_enemy(&bullet, &enemy));
        bullet.pos.x = 125.0;
        assert!(!bullet_hits_enemy(&bullet, &enemy));
    }

    #[test]
    fn test_first_hit_scans_from_back() {
        let enemies = vec![enemy_at(100.0), enemy_at(110.0), enemy_at(400.0)];
        let bullet = Bullet::new(Vec2::new(105.0, 485.0), Vec2::ZERO, 5.0, 10.0, false);
        assert_eq!(first_enemy_hit(&bullet, &enemies), Some(1));

        let miss = Bullet::new(Vec2::new(250.0, 485.0), Vec2::ZERO, 5.0, 10.0, false);
        assert_eq!(first_enemy_hit(&miss, &enemies), None);
    }

    #[test]
    fn test_orb_pickup_distance() {
        let player = Player::new(400.0, 500.0, 0.6);
        let mut orb = XpOrb {
            pos: player.pos + Vec2::new(17.0, 0.0),
            value: 4.0,
            size: 6.0,
            vel: Vec2::ZERO,
            life: 30.0,
        };
        // 15 (half player) + 3 (half orb) = 18
        assert!(orb_touches_player(&orb, &player));
        orb.pos.x = player.pos.x + 18.0;
        assert!(!orb_touches_player(&orb, &player));
    }
}
