//! Game configuration loader.

use std::path::Path;

use mud_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`GameConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mud_core::{ConfigOracle, RoomId};

    #[test]
    fn empty_file_keeps_default_void_room() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config.void_room(), GameConfig::DEFAULT_VOID_ROOM);
    }

    #[test]
    fn void_room_override() {
        let config = ConfigLoader::parse("void_room = 42\n").unwrap();
        assert_eq!(config.void_room(), RoomId(42));
    }

    #[test]
    fn rejects_wrong_type() {
        assert!(ConfigLoader::parse("void_room = \"north\"\n").is_err());
    }
}
