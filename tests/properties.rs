//! Property tests for simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use poly_jumper::sim::enemy::Archetype;
use poly_jumper::sim::player::next_level_threshold;
use poly_jumper::sim::{
    Enemy, EnemyShape, GamePhase, GameState, Player, Spawner, TickInput, UpgradeId, XpOrb,
    apply_upgrade, tick,
};
use poly_jumper::tuning::SpawnTuning;

fn archetype(xp_value: f32) -> Archetype {
    Archetype {
        min_tier: 0,
        shape: EnemyShape::Pentagon,
        size: 30.0,
        hp: 50.0,
        speed: 1.0,
        damage: 10.0,
        xp_value,
        color: 0x90EE90,
        attack_cooldown: None,
        attack_range: None,
    }
}

proptest! {
    #[test]
    fn hp_stays_in_bounds(
        hits in prop::collection::vec(0.0f32..500.0, 1..20),
        hulls in 0usize..12,
    ) {
        let mut player = Player::new(400.0, 500.0, 0.6);
        for _ in 0..hulls {
            apply_upgrade(&mut player, UpgradeId::ReinforcedHull);
        }
        for hit in hits {
            player.take_damage(hit);
            prop_assert!(player.hp >= 0.0);
            prop_assert!(player.hp <= player.max_hp);
        }
    }

    #[test]
    fn level_thresholds_grow(prev in 1u64..u64::MAX) {
        prop_assert!(next_level_threshold(prev) > prev);
    }

    #[test]
    fn spawn_interval_shrinks_to_floor(a in 0.0f32..2_000.0, b in 0.0f32..2_000.0) {
        let spawner = Spawner::new(SpawnTuning::default());
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(spawner.interval_at(late) <= spawner.interval_at(early));
        prop_assert!(spawner.interval_at(late) >= 0.5);
        prop_assert!(spawner.tier_at(late) >= spawner.tier_at(early));
    }

    #[test]
    fn orb_split_preserves_xp(xp in 1.0f32..200.0, seed in any::<u64>()) {
        let enemy = Enemy::spawn(&archetype(xp), true, 800.0, 500.0);
        let mut rng = Pcg32::seed_from_u64(seed);
        let orbs = enemy.drop_orbs(&mut rng, 0.6);
        prop_assert_eq!(orbs.len(), (xp / 5.0).ceil() as usize);
        let total: f32 = orbs.iter().map(|o| o.value).sum();
        prop_assert!((total - xp).abs() < 1e-3 * xp.max(1.0));
    }

    #[test]
    fn paused_ticks_change_nothing(
        seed in any::<u64>(),
        warmup in 0usize..600,
        frames in prop::collection::vec((0.0f32..0.2, any::<bool>(), 0.0f32..800.0), 1..30),
    ) {
        let mut state = GameState::new(seed, 800.0, 600.0);
        let autoplay = TickInput { autoplay: true, ..Default::default() };
        for _ in 0..warmup {
            tick(&mut state, &autoplay, 1.0 / 60.0);
        }
        prop_assume!(state.phase == GamePhase::Playing);

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, 1.0 / 60.0);
        prop_assert_eq!(state.phase, GamePhase::Paused);

        let before = serde_json::to_string(&state.snapshot()).unwrap();
        for (dt, press, x) in frames {
            let input = TickInput {
                pointer: Some(Vec2::new(x, 100.0)),
                jump_or_shoot: press,
                ..Default::default()
            };
            tick(&mut state, &input, dt);
        }
        let after = serde_json::to_string(&state.snapshot()).unwrap();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn game_over_ticks_change_nothing(
        seed in any::<u64>(),
        enemies in 1usize..6,
        orbs in prop::collection::vec((0.0f32..800.0, 0.0f32..500.0, 1.0f32..20.0), 1..8),
        frames in prop::collection::vec((0.0f32..0.2, any::<bool>(), 0.0f32..800.0), 1..30),
    ) {
        let mut state = GameState::new(seed, 800.0, 600.0);
        for _ in 0..enemies {
            state.spawn_enemy();
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        for (x, y, value) in orbs {
            state.orbs.push(XpOrb::new(Vec2::new(x, y), value, &mut rng, 0.6));
        }
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        state.damage_player(1_000.0);
        prop_assert_eq!(state.phase, GamePhase::GameOver);

        let before = serde_json::to_string(&state.snapshot()).unwrap();
        let timer = state.spawner.timer;
        for (dt, pause, x) in frames {
            // A press would restart the run, so only pointer and pause vary
            let input = TickInput {
                pointer: Some(Vec2::new(x, 100.0)),
                pause,
                ..Default::default()
            };
            tick(&mut state, &input, dt);
        }
        prop_assert_eq!(state.phase, GamePhase::GameOver);
        prop_assert_eq!(serde_json::to_string(&state.snapshot()).unwrap(), before);
        prop_assert_eq!(state.spawner.timer, timer);
    }

    #[test]
    fn enemies_stay_on_ground_line(
        seed in any::<u64>(),
        width in 200.0f32..2000.0,
        height in 200.0f32..1500.0,
    ) {
        let mut state = GameState::new(seed, 800.0, 600.0);
        for _ in 0..5 {
            state.spawn_enemy();
        }
        state.resize(width, height);
        let ground = state.playfield.ground_y;
        for enemy in &state.enemies {
            prop_assert!((enemy.pos.y - (ground + 5.0 - enemy.size / 2.0)).abs() < 1e-3);
        }
        prop_assert!(state.player.grounded);
        prop_assert!((state.player.pos.y - (ground - state.player.size / 2.0)).abs() < 1e-3);
    }
}
