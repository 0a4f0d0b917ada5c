//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use mud_core::{GameConfig, GameTables, WeaponCatalog};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, TablesLoader};

/// Everything loaded from one data directory.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub config: GameConfig,
    pub tables: GameTables,
    pub weapons: WeaponCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// └── items.ron
/// ```
///
/// A missing file means "use the built-in defaults"; a file that exists but
/// does not parse is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        self.load_or_default("config.toml", ConfigLoader::load)
    }

    /// Load rule tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<GameTables> {
        self.load_or_default("tables.toml", TablesLoader::load)
    }

    /// Load the weapon catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<WeaponCatalog> {
        self.load_or_default("items.ron", ItemLoader::load)
    }

    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            tables: self.load_tables()?,
            weapons: self.load_items()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_or_default<T: Default>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "content file absent; using defaults");
            return Ok(T::default());
        }
        load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::{ConfigOracle, RoomId, TablesOracle};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentFactory::new(dir.path()).load_all().unwrap();
        assert_eq!(content.config, GameConfig::default());
        assert_eq!(content.tables, GameTables::default());
        assert!(content.weapons.is_empty());
    }

    #[test]
    fn reads_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "void_room = 7\n").unwrap();
        std::fs::write(
            dir.path().join("items.ron"),
            "(weapons: [(handle: 3, name: \"club\", damage: \"1d6\")])",
        )
        .unwrap();

        let content = ContentFactory::new(dir.path()).load_all().unwrap();
        assert_eq!(content.config.void_room(), RoomId(7));
        assert_eq!(content.weapons.len(), 1);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tables.toml"), "max_level = \"lots\"").unwrap();
        assert!(ContentFactory::new(dir.path()).load_tables().is_err());
    }

    #[test]
    fn bundled_data_matches_builtin_tables() {
        let content = ContentFactory::bundled().load_all().unwrap();
        assert_eq!(content.tables, GameTables::default());
        assert_eq!(content.tables.max_level(), GameTables::DEFAULT_MAX_LEVEL);
        assert!(!content.weapons.is_empty());
    }
}
