//! Rule tables loader.

use std::path::Path;

use anyhow::Context;
use mud_core::GameTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameTables`] from TOML files.
///
/// Sections left out of the file fall back to the built-in tables, so a file
/// that only overrides `combat` still carries the default class list.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<GameTables> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid tables in {}", path.display()))
    }

    /// Parses and validates tables.
    pub fn parse(content: &str) -> LoadResult<GameTables> {
        let tables: GameTables = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))?;
        tables.validate()?;

        tracing::debug!(
            classes = tables.classes.len(),
            promotions = tables.promotions.len(),
            alternate_promotions = tables.alternate_promotions.len(),
            max_level = tables.max_level,
            "loaded rule tables"
        );
        if !tables.alternate_promotions.is_empty() {
            tracing::info!(
                count = tables.alternate_promotions.len(),
                "alternate promotions loaded as data only; level-ups never apply them"
            );
        }

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::{ClassFamily, ClassId, DiceExpr, HpGainBand, TablesOracle};

    const SMALL: &str = r#"
max_level = 50
alternate_promotions = []

[combat]
hit_base = 60
hit_min = 10
hit_max = 90
unarmed_damage = "1d6"
energy_damage = "1d2+1"

[default_hp_gain]
min = 5
max = 15

[[classes]]
id = 0
name = "Peasant"
family = "wanderer"

[[classes]]
id = 1
name = "Guard"
family = "orthodox"

[[promotions]]
from = 0
level = 10
to = 1

[[hp_gain]]
class = 1
band = { min = 8, max = 30 }
"#;

    #[test]
    fn parses_full_document() {
        let tables = TablesLoader::parse(SMALL).unwrap();
        assert_eq!(tables.max_level(), 50);
        assert_eq!(tables.combat().hit_base, 60);
        assert_eq!(tables.combat().unarmed_damage, DiceExpr::new(1, 6, 0));
        assert_eq!(tables.combat().energy_damage, DiceExpr::new(1, 2, 1));
        assert_eq!(tables.class_info(ClassId(1)).unwrap().family, ClassFamily::Orthodox);
        assert_eq!(tables.promotion(ClassId(0)).unwrap().to, ClassId(1));
        assert_eq!(tables.hp_gain_band(ClassId(1)), HpGainBand::new(8, 30));
        assert_eq!(tables.hp_gain_band(ClassId(0)), HpGainBand::new(5, 15));
        assert!(tables.alternate_promotions.is_empty());
    }

    #[test]
    fn missing_sections_use_builtin_tables() {
        let tables = TablesLoader::parse("max_level = 120\n").unwrap();
        let builtin = GameTables::default();
        assert_eq!(tables.max_level, 120);
        assert_eq!(tables.classes, builtin.classes);
        assert_eq!(tables.promotions, builtin.promotions);
    }

    #[test]
    fn rejects_invalid_tables() {
        let bad_dice = "[combat]\nunarmed_damage = \"2d\"\n";
        assert!(TablesLoader::parse(bad_dice).is_err());

        let dangling = "hp_gain = []\nalternate_promotions = []\n\
                        [[classes]]\nid = 0\nname = \"A\"\nfamily = \"monastic\"\n\n\
                        [[promotions]]\nfrom = 0\nlevel = 5\nto = 9\n";
        let err = TablesLoader::parse(dangling).unwrap_err();
        assert!(err.to_string().contains("unknown class 9"), "{err}");
    }
}
