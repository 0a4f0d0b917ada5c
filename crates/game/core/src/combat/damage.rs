//! Damage rolls and application.
//!
//! Every hit drains two pools at once: health, which may fall to or below
//! zero to signal defeat, and energy, which stops at zero.

use crate::env::GameEnv;
use crate::state::{Character, ItemHandle};

use super::dice::DiceExpr;

/// Where the base damage roll came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    Weapon(ItemHandle),
    /// No weapon, an unknown handle, or a weapon whose dice did not parse.
    Unarmed,
}

/// Damage dealt by one hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub hp: i32,
    pub sp: i32,
}

/// Looks up the attacker's weapon dice.
///
/// Falls back to the unarmed roll when nothing usable is wielded.
pub fn weapon_dice(attacker: &Character, env: &GameEnv<'_>) -> (DiceExpr, DamageSource) {
    let unarmed = (env.tables().combat().unarmed_damage, DamageSource::Unarmed);
    let Some(handle) = attacker.wielded else {
        return unarmed;
    };
    let Some(weapon) = env.items().weapon(handle) else {
        return unarmed;
    };
    match weapon.damage.parse::<DiceExpr>() {
        Ok(dice) => (dice, DamageSource::Weapon(handle)),
        Err(_) => unarmed,
    }
}

/// Rolls health damage for one hit.
///
/// # Formula
///
/// ```text
/// base   = weapon_roll                      (weapon)
///        | unarmed_roll + damage_bonus      (unarmed)
/// damage = base + stamina / 5 + damage_bonus
/// floored at 1
/// ```
pub fn roll_hp_damage(attacker: &Character, env: &GameEnv<'_>) -> (i32, DamageSource) {
    let (dice, source) = weapon_dice(attacker, env);
    let mut base = dice.roll(env.rng());
    if source == DamageSource::Unarmed {
        base = base.saturating_add(attacker.damage_bonus);
    }
    let damage = base
        .saturating_add(attacker.attributes.stamina / 5)
        .saturating_add(attacker.damage_bonus)
        .max(1);
    (damage, source)
}

/// Rolls energy damage for one hit: `energy_roll + inner / 4`, floored at 0.
pub fn roll_sp_damage(attacker: &Character, env: &GameEnv<'_>) -> i32 {
    env.tables()
        .combat()
        .energy_damage
        .roll(env.rng())
        .saturating_add(attacker.attributes.inner / 4)
        .max(0)
}

/// Subtracts `damage` from the defender's pools.
pub fn apply_damage(defender: &mut Character, damage: Damage) {
    defender.hp.drain(damage.hp);
    defender.sp.drain_to_zero(damage.sp);
}
