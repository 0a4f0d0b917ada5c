//! Combat resolution.
//!
//! Pure functions over character records. The only side effect is the damage
//! [`resolve_attack`] applies to the defender; messaging, death and experience
//! are sequenced by [`crate::engine::CombatEngine`].

pub mod damage;
pub mod dice;
pub mod hit;
pub mod result;

pub use damage::{Damage, DamageSource, apply_damage, roll_hp_damage, roll_sp_damage, weapon_dice};
pub use dice::{DiceExpr, DiceParseError};
pub use hit::{check_hit, hit_chance};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
