//! Weapon catalog loader.

use std::path::Path;

use mud_core::{DiceExpr, ItemHandle, WeaponCatalog, WeaponDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One weapon as written in `items.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub handle: u32,
    pub name: String,
    /// Dice expression such as `"2d6+1"`.
    pub damage: String,
}

/// Top-level structure of `items.ron`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponFile {
    pub weapons: Vec<WeaponSpec>,
}

/// Loader for the weapon catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Builds a catalog from RON text.
    ///
    /// Weapons with unparseable damage are kept: combat treats them as
    /// unarmed. Each one is reported with a warning.
    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let file: WeaponFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut catalog = WeaponCatalog::default();
        for entry in file.weapons {
            if let Err(error) = entry.damage.parse::<DiceExpr>() {
                tracing::warn!(
                    handle = entry.handle,
                    name = %entry.name,
                    damage = %entry.damage,
                    %error,
                    "weapon damage does not parse; attacks with it roll unarmed"
                );
            }
            catalog.insert(WeaponDefinition::new(
                ItemHandle(entry.handle),
                entry.name,
                entry.damage,
            ));
        }

        tracing::debug!(weapons = catalog.len(), "loaded weapon catalog");
        Ok(catalog)
    }
}
