//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (reverse index, order-preserving removal)
//! - No rendering, audio or platform dependencies; hosts read snapshots and
//!   drain events instead

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod orb;
pub mod particle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use bullet::Bullet;
pub use enemy::{Archetype, Enemy, EnemyShape, archetype_table};
pub use events::{EffectSink, GameEvent};
pub use orb::XpOrb;
pub use particle::{Burst, Particle};
pub use player::{BulletStats, DamageOutcome, Player, XpGain};
pub use spawner::Spawner;
pub use state::{GamePhase, GameState, Playfield, Snapshot};
pub use tick::{TickInput, clamp_dt, tick};
pub use upgrade::{Upgrade, UpgradeId, apply_upgrade, roll_choices};
