//! Level-up resolution.
//!
//! Experience is a lifetime total compared against absolute thresholds, so
//! nothing is deducted when a level is gained. One call can cross several
//! thresholds; each crossing is resolved in turn against the class the
//! character holds at that moment.

use crate::env::GameEnv;
use crate::state::{Character, ClassId};

use super::experience::exp_to_next;

/// A class change applied by the main promotion table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Promotion {
    pub from: ClassId,
    pub to: ClassId,
    /// Level at which the promotion happened.
    pub level: u32,
}

/// One level gained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGain {
    /// The new level.
    pub level: u32,
    /// Maximum health added.
    pub hp_gain: i32,
    pub promotion: Option<Promotion>,
}

/// Every level gained by a single check, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpReport {
    pub gains: Vec<LevelGain>,
}

impl LevelUpReport {
    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }

    pub fn levels_gained(&self) -> usize {
        self.gains.len()
    }

    pub fn promotions(&self) -> impl Iterator<Item = Promotion> + '_ {
        self.gains.iter().filter_map(|g| g.promotion)
    }

    pub fn final_level(&self) -> Option<u32> {
        self.gains.last().map(|g| g.level)
    }
}

/// Grants every level the character's experience has paid for.
///
/// Per level: roll the health gain from the current class's band and add it
/// to maximum and current health, refill energy and mana from attributes,
/// then apply the main promotion out of the current class if its level is
/// met. Stops at the tables' level cap or at a threshold that has saturated
/// to `u64::MAX`, which no experience total can pay for. Calling it again
/// without new experience is a no-op.
pub fn apply_experience_and_check_levelup(
    character: &mut Character,
    env: &GameEnv<'_>,
) -> LevelUpReport {
    let tables = env.tables();
    let cap = tables.max_level();
    let mut report = LevelUpReport::default();

    while character.level < cap {
        let threshold = exp_to_next(character.level);
        if threshold == u64::MAX || character.experience < threshold {
            break;
        }
        character.level += 1;

        let hp_gain = tables.hp_gain_band(character.class).roll(env.rng());
        character.hp.grow(hp_gain);
        character.refresh_energy_and_mana();

        let promotion = tables
            .promotion(character.class)
            .filter(|edge| edge.is_met(character.level))
            .map(|edge| Promotion {
                from: edge.from,
                to: edge.to,
                level: character.level,
            });
        if let Some(promotion) = promotion {
            character.class = promotion.to;
        }

        report.gains.push(LevelGain {
            level: character.level,
            hp_gain,
            promotion,
        });
    }

    report
}
