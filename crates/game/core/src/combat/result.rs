//! Attack resolution.

use crate::env::GameEnv;
use crate::state::Character;

use super::damage::{Damage, DamageSource, apply_damage, roll_hp_damage, roll_sp_damage};
use super::hit::{check_hit, hit_chance};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
}

/// Result of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// Chance the attack had, after clamping.
    pub hit_chance: i32,
    /// The d100 draw compared against `hit_chance`.
    pub roll: i32,
    /// Zero on a miss.
    pub damage: Damage,
    /// `None` on a miss.
    pub source: Option<DamageSource>,
}

impl AttackResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }

    /// `(hit, hp_damage, sp_damage)`.
    pub fn as_tuple(&self) -> (bool, i32, i32) {
        (self.is_hit(), self.damage.hp, self.damage.sp)
    }
}

/// Resolves one attack and applies its damage to `defender`.
///
/// Draw order: d100 hit check, then the health damage dice, then the energy
/// roll. A miss draws once and leaves the defender untouched. This never
/// fails: missing weapons and zero attributes fall back to defaults.
pub fn resolve_attack(
    attacker: &Character,
    defender: &mut Character,
    env: &GameEnv<'_>,
) -> AttackResult {
    let chance = hit_chance(attacker, defender, &env.tables().combat());
    let roll = env.rng().roll_d100();

    if !check_hit(roll, chance) {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            hit_chance: chance,
            roll,
            damage: Damage::default(),
            source: None,
        };
    }

    let (hp, source) = roll_hp_damage(attacker, env);
    let sp = roll_sp_damage(attacker, env);
    let damage = Damage { hp, sp };
    apply_damage(defender, damage);

    AttackResult {
        outcome: AttackOutcome::Hit,
        hit_chance: chance,
        roll,
        damage,
        source: Some(source),
    }
}
