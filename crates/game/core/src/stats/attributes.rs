//! The six base attributes.
//!
//! Attributes are the only persistent stats. Resource maximums, hit chance and
//! damage are all derived from them on demand.

use strum::{Display, EnumCount, EnumIter};

use crate::env::RngOracle;

/// Names of the six base attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    /// Raw physical power. Adds to melee damage.
    Stamina,
    /// Footwork and reflexes. Evasion and mana.
    Agility,
    /// Insight. Contributes to the energy pool.
    Wisdom,
    /// Bone and constitution. Drives maximum health.
    Bone,
    /// Cultivated inner energy. Energy pool and energy damage.
    Inner,
    /// Spirit and will. Accuracy.
    Spirit,
}

/// Fixed-shape attribute record.
///
/// Values are non-negative in practice; no upper bound is enforced, the growth
/// curve flattens past [`super::GROWTH_CAP`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub stamina: i32,
    pub agility: i32,
    pub wisdom: i32,
    pub bone: i32,
    pub inner: i32,
    pub spirit: i32,
}

impl Attributes {
    /// Value every attribute takes when nothing else is known.
    pub const DEFAULT_VALUE: i32 = 13;

    /// Inclusive range rolled for each attribute at character creation.
    pub const CREATION_MIN: i32 = 11;
    pub const CREATION_MAX: i32 = 15;

    pub const fn new(
        stamina: i32,
        agility: i32,
        wisdom: i32,
        bone: i32,
        inner: i32,
        spirit: i32,
    ) -> Self {
        Self {
            stamina,
            agility,
            wisdom,
            bone,
            inner,
            spirit,
        }
    }

    /// All six attributes set to the same value.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Rolls a fresh attribute set, each value uniform in [11, 15].
    pub fn roll(rng: &(impl RngOracle + ?Sized)) -> Self {
        let roll = || rng.range(Self::CREATION_MIN, Self::CREATION_MAX);
        Self {
            stamina: roll(),
            agility: roll(),
            wisdom: roll(),
            bone: roll(),
            inner: roll(),
            spirit: roll(),
        }
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Stamina => self.stamina,
            Attribute::Agility => self.agility,
            Attribute::Wisdom => self.wisdom,
            Attribute::Bone => self.bone,
            Attribute::Inner => self.inner,
            Attribute::Spirit => self.spirit,
        }
    }

    /// Sets an attribute, clamping negative input to zero.
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        let value = value.max(0);
        match attribute {
            Attribute::Stamina => self.stamina = value,
            Attribute::Agility => self.agility = value,
            Attribute::Wisdom => self.wisdom = value,
            Attribute::Bone => self.bone = value,
            Attribute::Inner => self.inner = value,
            Attribute::Spirit => self.spirit = value,
        }
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn defaults_are_thirteen() {
        let attrs = Attributes::default();
        for attribute in Attribute::iter() {
            assert_eq!(attrs.get(attribute), 13);
        }
        assert_eq!(Attribute::COUNT, 6);
    }

    #[test]
    fn rolled_values_stay_in_creation_range() {
        let rng = PcgRng::with_seed(7);
        for _ in 0..200 {
            let attrs = Attributes::roll(&rng);
            for attribute in Attribute::iter() {
                let value = attrs.get(attribute);
                assert!((11..=15).contains(&value), "{attribute} = {value}");
            }
        }
    }

    #[test]
    fn roll_assigns_in_declaration_order() {
        let rng = ScriptedRng::new([11, 12, 13, 14, 15, 11]);
        let attrs = Attributes::roll(&rng);
        assert_eq!(attrs, Attributes::new(11, 12, 13, 14, 15, 11));
    }

    #[test]
    fn set_clamps_negative_values() {
        let mut attrs = Attributes::default();
        attrs.set(Attribute::Bone, -4);
        assert_eq!(attrs.bone, 0);
        attrs.set(Attribute::Inner, 200);
        assert_eq!(attrs.get(Attribute::Inner), 200);
    }

    #[test]
    fn attribute_names_are_snake_case() {
        assert_eq!(Attribute::Inner.to_string(), "inner");
        assert_eq!(Attribute::Bone.to_string(), "bone");
    }
}
