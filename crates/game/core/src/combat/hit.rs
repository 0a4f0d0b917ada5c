//! Hit chance and the d100 hit check.

use crate::env::CombatParams;
use crate::state::Character;

/// Chance, in percent, that `attacker` lands a blow on `defender`.
///
/// # Formula
///
/// ```text
/// hit_chance = base + to_hit_bonus + spirit / 2 - agility / 3
/// clamped to [min, max]; an inverted range pins to min
/// ```
///
/// With the default parameters (50, 5, 95) no attack is ever certain to hit
/// or certain to miss.
pub fn hit_chance(attacker: &Character, defender: &Character, params: &CombatParams) -> i32 {
    params
        .hit_base
        .saturating_add(attacker.to_hit_bonus)
        .saturating_add(attacker.attributes.spirit / 2)
        .saturating_sub(defender.attributes.agility / 3)
        .max(params.hit_min)
        .min(params.hit_max.max(params.hit_min))
}

/// `true` if a d100 `roll` lands. Rolls above the chance miss.
#[inline]
pub const fn check_hit(roll: i32, hit_chance: i32) -> bool {
    roll <= hit_chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterId, CharacterKind};
    use crate::stats::Attributes;

    fn fighter(spirit: i32, agility: i32, to_hit: i32) -> Character {
        let mut attributes = Attributes::default();
        attributes.spirit = spirit;
        attributes.agility = agility;
        Character::new(CharacterId(1), "f", CharacterKind::Npc, attributes).with_bonuses(to_hit, 0)
    }

    #[test]
    fn default_attributes() {
        // 50 + 0 + 13/2 - 13/3 = 50 + 6 - 4
        let a = fighter(13, 13, 0);
        let d = fighter(13, 13, 0);
        assert_eq!(hit_chance(&a, &d, &CombatParams::DEFAULT), 52);
    }

    #[test]
    fn clamped_to_bounds() {
        let params = CombatParams::DEFAULT;
        let strong = fighter(10_000, 0, i32::MAX);
        let nimble = fighter(0, 10_000, 0);
        let clumsy = fighter(0, 0, 0);

        assert_eq!(hit_chance(&strong, &clumsy, &params), 95);
        assert_eq!(hit_chance(&clumsy, &nimble, &params), 5);
        assert_eq!(hit_chance(&fighter(0, 0, i32::MIN), &clumsy, &params), 5);
    }

    #[test]
    fn inverted_bounds_pin_to_minimum() {
        let params = CombatParams {
            hit_min: 60,
            hit_max: 40,
            ..CombatParams::DEFAULT
        };
        let a = fighter(13, 13, 0);
        assert_eq!(hit_chance(&a, &fighter(13, 13, 0), &params), 60);
        assert_eq!(hit_chance(&fighter(0, 0, i32::MIN), &a, &params), 60);
        assert_eq!(hit_chance(&fighter(0, 0, i32::MAX), &a, &params), 60);
    }

    #[test]
    fn roll_above_chance_misses() {
        assert!(check_hit(1, 5));
        assert!(check_hit(52, 52));
        assert!(!check_hit(53, 52));
        assert!(!check_hit(100, 95));
    }
}
