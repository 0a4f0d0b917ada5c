//! Character classes, promotion edges and HP-gain bands.

use strum::{Display, EnumIter};

use crate::env::RngOracle;
use crate::state::ClassId;

/// Display grouping of classes. Has no effect on the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassFamily {
    Orthodox,
    Unorthodox,
    Monastic,
    Wanderer,
}

/// Name and family of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: String,
    pub family: ClassFamily,
}

impl ClassInfo {
    pub fn new(id: ClassId, name: impl Into<String>, family: ClassFamily) -> Self {
        Self {
            id,
            name: name.into(),
            family,
        }
    }
}

/// `from` becomes `to` once the character reaches `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromotionEdge {
    pub from: ClassId,
    pub level: u32,
    pub to: ClassId,
}

impl PromotionEdge {
    pub const fn new(from: ClassId, level: u32, to: ClassId) -> Self {
        Self { from, level, to }
    }

    /// True if a character of class `from` at `level` qualifies.
    pub const fn is_met(&self, level: u32) -> bool {
        level >= self.level
    }
}

/// Inclusive range of maximum-health gained per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpGainBand {
    pub min: i32,
    pub max: i32,
}

impl HpGainBand {
    /// Band used by every class without an explicit entry.
    pub const DEFAULT: Self = Self::new(6, 26);

    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn roll(&self, rng: &(impl RngOracle + ?Sized)) -> i32 {
        rng.range(self.min, self.max)
    }

    pub const fn is_valid(&self) -> bool {
        self.min >= 0 && self.min <= self.max
    }
}

impl Default for HpGainBand {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// HP-gain band override for one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassHpGain {
    pub class: ClassId,
    pub band: HpGainBand,
}
