//! Level-up upgrade catalog
//!
//! Upgrades are plain ids; their effect lives in [`apply_upgrade`] so the
//! catalog can be serialized and offered to a menu without carrying closures.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::player::Player;

/// Number of upgrades offered per level-up
pub const CHOICES_PER_LEVEL: usize = 3;

/// Every upgrade the player can be offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    Vitality,
    Regeneration,
    PowerShot,
    RapidFire,
    VelocityRounds,
    HeavyCaliber,
    Multishot,
    SpringBoots,
    Learning,
    Magnetism,
    GyroStabilizer,
    PrecisionAim,
    Deadeye,
    ReinforcedHull,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 14] = [
        UpgradeId::Vitality,
        UpgradeId::Regeneration,
        UpgradeId::PowerShot,
        UpgradeId::RapidFire,
        UpgradeId::VelocityRounds,
        UpgradeId::HeavyCaliber,
        UpgradeId::Multishot,
        UpgradeId::SpringBoots,
        UpgradeId::Learning,
        UpgradeId::Magnetism,
        UpgradeId::GyroStabilizer,
        UpgradeId::PrecisionAim,
        UpgradeId::Deadeye,
        UpgradeId::ReinforcedHull,
    ];

    /// Stable short key (for menus and logs)
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeId::Vitality => "hp",
            UpgradeId::Regeneration => "regen",
            UpgradeId::PowerShot => "damage",
            UpgradeId::RapidFire => "atk_speed",
            UpgradeId::VelocityRounds => "bullet_speed",
            UpgradeId::HeavyCaliber => "bullet_size",
            UpgradeId::Multishot => "bullet_count",
            UpgradeId::SpringBoots => "jump",
            UpgradeId::Learning => "xp_gain",
            UpgradeId::Magnetism => "pickup_radius",
            UpgradeId::GyroStabilizer => "rotation_speed",
            UpgradeId::PrecisionAim => "crit_chance",
            UpgradeId::Deadeye => "crit_damage",
            UpgradeId::ReinforcedHull => "armor",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeId::Vitality => "Vitality Boost",
            UpgradeId::Regeneration => "Regeneration",
            UpgradeId::PowerShot => "Power Shot",
            UpgradeId::RapidFire => "Rapid Fire",
            UpgradeId::VelocityRounds => "Velocity Rounds",
            UpgradeId::HeavyCaliber => "Heavy Caliber",
            UpgradeId::Multishot => "Multishot",
            UpgradeId::SpringBoots => "Spring Boots",
            UpgradeId::Learning => "Learning",
            UpgradeId::Magnetism => "Magnetism",
            UpgradeId::GyroStabilizer => "Gyro Stabilizer",
            UpgradeId::PrecisionAim => "Precision Aim",
            UpgradeId::Deadeye => "Deadeye",
            UpgradeId::ReinforcedHull => "Reinforced Hull",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeId::Vitality => "+20 Max HP",
            UpgradeId::Regeneration => "+0.5 HP/sec",
            UpgradeId::PowerShot => "+5 Bullet Damage",
            UpgradeId::RapidFire => "+15% Attack Speed",
            UpgradeId::VelocityRounds => "+20% Bullet Speed",
            UpgradeId::HeavyCaliber => "+20% Bullet Size",
            UpgradeId::Multishot => "+1 Bullet per Shot",
            UpgradeId::SpringBoots => "+10% Jump Power",
            UpgradeId::Learning => "+10% XP Gain",
            UpgradeId::Magnetism => "+25% Pickup Radius",
            UpgradeId::GyroStabilizer => "+20% Rotation Speed",
            UpgradeId::PrecisionAim => "+5% Crit Chance",
            UpgradeId::Deadeye => "+25% Crit Damage",
            UpgradeId::ReinforcedHull => "-10% Damage Taken",
        }
    }
}

/// Menu-facing view of an upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<UpgradeId> for Upgrade {
    fn from(id: UpgradeId) -> Self {
        Self {
            id,
            name: id.name(),
            description: id.description(),
        }
    }
}

/// Draw distinct upgrades from the catalog without replacement
pub fn roll_choices<R: Rng + ?Sized>(rng: &mut R) -> Vec<UpgradeId> {
    UpgradeId::ALL
        .choose_multiple(rng, CHOICES_PER_LEVEL)
        .copied()
        .collect()
}

/// Apply an upgrade's stat change to the player
pub fn apply_upgrade(player: &mut Player, id: UpgradeId) {
    match id {
        UpgradeId::Vitality => {
            player.max_hp += 20.0;
            player.hp = (player.hp + 20.0).min(player.max_hp);
        }
        UpgradeId::Regeneration => player.regen_rate += 0.5,
        UpgradeId::PowerShot => player.bullet.damage += 5.0,
        UpgradeId::RapidFire => player.attack_cooldown *= 0.85,
        UpgradeId::VelocityRounds => player.bullet.speed *= 1.2,
        UpgradeId::HeavyCaliber => player.bullet.size *= 1.2,
        UpgradeId::Multishot => player.bullet.count += 1,
        UpgradeId::SpringBoots => player.jump_power *= 1.1,
        UpgradeId::Learning => player.xp_gain_multiplier *= 1.1,
        UpgradeId::Magnetism => player.pickup_radius *= 1.25,
        UpgradeId::GyroStabilizer => player.rotation_speed *= 1.2,
        UpgradeId::PrecisionAim => player.bullet.crit_chance += 0.05,
        UpgradeId::Deadeye => player.bullet.crit_multiplier += 0.25,
        UpgradeId::ReinforcedHull => player.damage_reduction += 0.10,
    }
}
