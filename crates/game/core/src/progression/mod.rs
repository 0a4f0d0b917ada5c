//! Character progression: experience curves, level-ups and class promotion.

pub mod classes;
pub mod experience;
pub mod level;

pub use classes::{ClassFamily, ClassHpGain, ClassInfo, HpGainBand, PromotionEdge};
pub use experience::{adj_exp, exp_to_next};
pub use level::{LevelGain, LevelUpReport, Promotion, apply_experience_and_check_levelup};
