//! Resource pools derived from attributes.
//!
//! Three pools exist: health (HP), energy (SP) and mana (MP). Each maximum is
//! a fixed floor plus a share of the attribute growth curve:
//!
//! - HP_max = 80 + 6 × σ(bone) / 30
//! - SP_max = 80 + (2 × σ(inner) + σ(wisdom)) / 30
//! - MP_max = 50 + σ(agility) / 15
//!
//! Current values are game state and live on the character record.

use super::attributes::Attributes;
use super::growth::sigma;

/// Baseline health independent of attributes.
pub const HP_FLOOR: i32 = 80;
/// Baseline energy independent of attributes.
pub const SP_FLOOR: i32 = 80;
/// Baseline mana independent of attributes.
pub const MP_FLOOR: i32 = 50;

/// Maximum health for a given bone attribute.
pub fn calc_hp(bone: i32) -> i32 {
    saturate(HP_FLOOR as i64 + (6 * sigma(bone)) / 30)
}

/// Maximum energy for the given inner-energy and wisdom attributes.
pub fn calc_sp(inner: i32, wisdom: i32) -> i32 {
    saturate(SP_FLOOR as i64 + (2 * sigma(inner) + sigma(wisdom)) / 30)
}

/// Maximum mana for a given agility attribute.
pub fn calc_mp(agility: i32) -> i32 {
    saturate(MP_FLOOR as i64 + sigma(agility) / 15)
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points. Reaching zero means defeat.
    Hp,
    /// Energy points, drained in parallel with health by every hit.
    Sp,
    /// Mana points.
    Mp,
}

/// Current and maximum value of one pool.
///
/// `current` is signed: health may drop to or below zero to signal defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub const fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    /// A meter filled to `maximum`.
    pub const fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Overwrites the maximum and refills the pool.
    pub fn reset_to(&mut self, maximum: i32) {
        self.maximum = maximum;
        self.current = maximum;
    }

    /// Raises the maximum by `amount` and refills the pool.
    pub fn grow(&mut self, amount: i32) {
        self.maximum = self.maximum.saturating_add(amount);
        self.current = self.maximum;
    }

    /// Subtracts `amount`, allowing the result to go negative.
    pub fn drain(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Subtracts `amount`, clamping the result at zero.
    pub fn drain_to_zero(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount).max(0);
    }

    pub const fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

/// Maximums of all three pools computed from one attribute set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMaximums {
    pub hp_max: i32,
    pub sp_max: i32,
    pub mp_max: i32,
}

impl ResourceMaximums {
    pub fn compute(attributes: &Attributes) -> Self {
        Self {
            hp_max: calc_hp(attributes.bone),
            sp_max: calc_sp(attributes.inner, attributes.wisdom),
            mp_max: calc_mp(attributes.agility),
        }
    }

    pub const fn get(&self, resource: ResourceKind) -> i32 {
        match resource {
            ResourceKind::Hp => self.hp_max,
            ResourceKind::Sp => self.sp_max,
            ResourceKind::Mp => self.mp_max,
        }
    }
}
