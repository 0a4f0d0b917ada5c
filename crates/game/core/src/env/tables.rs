use crate::combat::DiceExpr;
use crate::error::{ErrorSeverity, GameError};
use crate::progression::{ClassFamily, ClassHpGain, ClassInfo, HpGainBand, PromotionEdge};
use crate::state::ClassId;

/// Oracle providing game rules and balance tables.
///
/// This oracle defines combat balance and class progression. It does NOT
/// define entity data (use [`super::ItemOracle`] for weapons).
pub trait TablesOracle: Send + Sync {
    fn combat(&self) -> CombatParams;

    /// Highest level the progression engine will grant.
    fn max_level(&self) -> u32;

    fn class_info(&self, class: ClassId) -> Option<&ClassInfo>;

    /// Health gained per level for a class.
    fn hp_gain_band(&self, class: ClassId) -> HpGainBand;

    /// The automatic ("main") promotion out of `class`, if any.
    fn promotion(&self, class: ClassId) -> Option<PromotionEdge>;

    /// The alternate promotion out of `class`, if any.
    ///
    /// Configuration data only: the progression engine never consults it.
    fn alternate_promotion(&self, class: ClassId) -> Option<PromotionEdge>;
}

/// Combat balance parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    /// Hit chance before bonuses, in percent.
    pub hit_base: i32,
    pub hit_min: i32,
    pub hit_max: i32,
    /// Base damage roll when no weapon is wielded.
    pub unarmed_damage: DiceExpr,
    /// Roll added to inner-energy damage on every hit.
    pub energy_damage: DiceExpr,
}

impl CombatParams {
    pub const DEFAULT: Self = Self {
        hit_base: 50,
        hit_min: 5,
        hit_max: 95,
        unarmed_damage: DiceExpr::new(1, 4, 0),
        energy_damage: DiceExpr::new(1, 3, 0),
    };
}

impl Default for CombatParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors found while validating a [`GameTables`] instance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TablesError {
    #[error("{context} references unknown {class}")]
    UnknownClass {
        class: ClassId,
        context: &'static str,
    },

    #[error("{class} is defined more than once")]
    DuplicateClass { class: ClassId },

    #[error("{class} has more than one {context}")]
    DuplicatePromotion {
        class: ClassId,
        context: &'static str,
    },

    #[error("hp gain band {min}..={max} is invalid")]
    InvalidBand { min: i32, max: i32 },

    #[error("hit chance bounds {min}..={max} are invalid")]
    InvalidHitBounds { min: i32, max: i32 },

    #[error("max_level must be at least 1")]
    InvalidMaxLevel,
}

impl GameError for TablesError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownClass { .. } => "TABLES_UNKNOWN_CLASS",
            Self::DuplicateClass { .. } => "TABLES_DUPLICATE_CLASS",
            Self::DuplicatePromotion { .. } => "TABLES_DUPLICATE_PROMOTION",
            Self::InvalidBand { .. } => "TABLES_INVALID_BAND",
            Self::InvalidHitBounds { .. } => "TABLES_INVALID_HIT_BOUNDS",
            Self::InvalidMaxLevel => "TABLES_INVALID_MAX_LEVEL",
        }
    }
}

/// Data-driven rule tables.
///
/// [`GameTables::default`] returns the built-in tables; the content crate
/// loads the same shape from `tables.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameTables {
    pub max_level: u32,
    pub combat: CombatParams,
    pub default_hp_gain: HpGainBand,
    pub hp_gain: Vec<ClassHpGain>,
    pub classes: Vec<ClassInfo>,
    pub promotions: Vec<PromotionEdge>,
    pub alternate_promotions: Vec<PromotionEdge>,
}

impl GameTables {
    /// No practical cap: the loop bound only guarantees termination.
    pub const DEFAULT_MAX_LEVEL: u32 = u32::MAX;

    /// Checks internal consistency: known class ids, one edge per source
    /// class, sane bands and hit bounds.
    pub fn validate(&self) -> Result<(), TablesError> {
        if self.max_level == 0 {
            return Err(TablesError::InvalidMaxLevel);
        }

        let combat = &self.combat;
        if combat.hit_min > combat.hit_max || combat.hit_min < 0 || combat.hit_max > 100 {
            return Err(TablesError::InvalidHitBounds {
                min: combat.hit_min,
                max: combat.hit_max,
            });
        }

        for (index, info) in self.classes.iter().enumerate() {
            if self.classes[..index].iter().any(|c| c.id == info.id) {
                return Err(TablesError::DuplicateClass { class: info.id });
            }
        }

        let bands =
            std::iter::once(&self.default_hp_gain).chain(self.hp_gain.iter().map(|g| &g.band));
        for band in bands {
            if !band.is_valid() {
                return Err(TablesError::InvalidBand {
                    min: band.min,
                    max: band.max,
                });
            }
        }
        for entry in &self.hp_gain {
            self.require_class(entry.class, "hp gain band")?;
        }

        for (edges, context) in [
            (&self.promotions, "promotion"),
            (&self.alternate_promotions, "alternate promotion"),
        ] {
            for (index, edge) in edges.iter().enumerate() {
                self.require_class(edge.from, context)?;
                self.require_class(edge.to, context)?;
                if edges[..index].iter().any(|e| e.from == edge.from) {
                    return Err(TablesError::DuplicatePromotion {
                        class: edge.from,
                        context,
                    });
                }
            }
        }

        Ok(())
    }

    fn require_class(&self, class: ClassId, context: &'static str) -> Result<(), TablesError> {
        if self.classes.iter().any(|c| c.id == class) {
            Ok(())
        } else {
            Err(TablesError::UnknownClass { class, context })
        }
    }

    fn builtin() -> Self {
        use ClassFamily::*;

        let class =
            |id: u16, name: &str, family: ClassFamily| ClassInfo::new(ClassId(id), name, family);
        let edge =
            |from: u16, level: u32, to: u16| PromotionEdge::new(ClassId(from), level, ClassId(to));
        let band = |id: u16, min: i32, max: i32| ClassHpGain {
            class: ClassId(id),
            band: HpGainBand::new(min, max),
        };

        Self {
            max_level: Self::DEFAULT_MAX_LEVEL,
            combat: CombatParams::DEFAULT,
            default_hp_gain: HpGainBand::DEFAULT,
            hp_gain: vec![
                band(4, 10, 40),
                band(5, 12, 44),
                band(9, 11, 42),
                band(12, 9, 36),
            ],
            classes: vec![
                class(0, "Wanderer", Wanderer),
                class(1, "Sword Disciple", Orthodox),
                class(2, "Swordsman", Orthodox),
                class(3, "Sword Master", Orthodox),
                class(4, "Sword Saint", Orthodox),
                class(5, "Heavenly Blade", Orthodox),
                class(6, "Outcast", Unorthodox),
                class(7, "Rogue Blade", Unorthodox),
                class(8, "Shadow Master", Unorthodox),
                class(9, "Demon Sovereign", Unorthodox),
                class(10, "Novice Monk", Monastic),
                class(11, "Iron Monk", Monastic),
                class(12, "Arhat", Monastic),
                class(13, "Beggar Disciple", Wanderer),
                class(14, "Beggar Elder", Wanderer),
            ],
            promotions: vec![
                edge(1, 30, 2),
                edge(2, 60, 3),
                edge(3, 90, 4),
                edge(6, 30, 7),
                edge(7, 60, 8),
                edge(10, 30, 11),
                edge(11, 60, 12),
                edge(13, 40, 14),
            ],
            alternate_promotions: vec![edge(3, 80, 5), edge(8, 80, 9)],
        }
    }
}

impl Default for GameTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TablesOracle for GameTables {
    fn combat(&self) -> CombatParams {
        self.combat
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }

    fn class_info(&self, class: ClassId) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.id == class)
    }

    fn hp_gain_band(&self, class: ClassId) -> HpGainBand {
        self.hp_gain
            .iter()
            .find(|g| g.class == class)
            .map(|g| g.band)
            .unwrap_or(self.default_hp_gain)
    }

    fn promotion(&self, class: ClassId) -> Option<PromotionEdge> {
        self.promotions.iter().copied().find(|e| e.from == class)
    }

    fn alternate_promotion(&self, class: ClassId) -> Option<PromotionEdge> {
        self.alternate_promotions
            .iter()
            .copied()
            .find(|e| e.from == class)
    }
}
