//! Combat and progression rules for a text MUD.
//!
//! `mud-core` turns six attributes into health, energy and mana, resolves a
//! single attack between two characters, grants levels and class promotions
//! from accumulated experience, and handles death. It performs no I/O: the
//! host supplies rule tables, weapons, configuration and randomness through
//! the oracles in [`env`], and owns the world store and notification channel
//! the rules write to. Character records are mutated in place; the host
//! guarantees a single writer per record.
pub mod combat;
pub mod config;
pub mod death;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use combat::{
    AttackOutcome, AttackResult, Damage, DamageSource, DiceExpr, DiceParseError, resolve_attack,
};
pub use config::GameConfig;
pub use death::{DeathOutcome, handle_death};
pub use engine::{AttackReport, CombatEngine, Exchange, SkipReason, announce_level_ups};
pub use env::{
    CombatParams, ConfigOracle, GameEnv, GameTables, ItemOracle, Notifier, NotifyError, PcgRng,
    RngOracle, TablesError, TablesOracle, WeaponCatalog, WeaponDefinition, WorldStore,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{
    ClassFamily, ClassInfo, HpGainBand, LevelGain, LevelUpReport, Promotion, PromotionEdge,
    adj_exp, apply_experience_and_check_levelup, exp_to_next,
};
pub use state::{Character, CharacterId, CharacterKind, ClassId, ItemHandle, Posture, RoomId};
pub use stats::{
    Attribute, Attributes, ResourceMaximums, ResourceMeter, calc_hp, calc_mp, calc_sp, sigma,
};
