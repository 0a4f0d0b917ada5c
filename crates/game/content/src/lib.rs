//! Data-driven content and loaders.
//!
//! This crate reads the rule data the core consumes through its oracles:
//! - Game configuration (void room override) from TOML
//! - Rule tables (classes, promotions, HP-gain bands, combat parameters) from TOML
//! - Weapon catalog from RON
//!
//! Content is consumed by runtime oracles and never appears on a character
//! record. All loaders deserialize mud-core types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Content, ConfigLoader, ContentFactory, ItemLoader, LoadResult, TablesLoader};
