//! Runtime wrappers around static game content oracles.
//!
//! Loaded content is bundled into an [`OracleManager`] so the worker can
//! build a [`GameEnv`] on demand. The data is immutable at runtime; the only
//! moving part is the RNG's internal state.
use std::sync::Arc;

use mud_content::Content;
use mud_core::{GameConfig, GameEnv, GameTables, PcgRng, RngOracle, WeaponCatalog};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) tables: Arc<GameTables>,
    pub(crate) items: Arc<WeaponCatalog>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    pub fn new(
        tables: Arc<GameTables>,
        items: Arc<WeaponCatalog>,
        config: Arc<GameConfig>,
        rng: Arc<dyn RngOracle>,
    ) -> Self {
        Self {
            tables,
            items,
            config,
            rng,
        }
    }

    /// Builds oracles from loaded content with a [`PcgRng`].
    ///
    /// Without a seed the generator is seeded from the thread RNG.
    pub fn from_content(content: Content, seed: Option<u64>) -> Self {
        Self::new(
            Arc::new(content.tables),
            Arc::new(content.weapons),
            Arc::new(content.config),
            seeded_rng(seed),
        )
    }

    /// Built-in tables, no weapons, default configuration.
    pub fn builtin(seed: Option<u64>) -> Self {
        Self::from_content(Content::default(), seed)
    }

    /// Replaces the RNG, e.g. with a scripted one in tests.
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Replaces the game configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Converts oracle manager into GameEnv for mud-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::new(
            self.tables.as_ref(),
            self.items.as_ref(),
            self.config.as_ref(),
            self.rng.as_ref(),
        )
    }

    pub fn tables(&self) -> &GameTables {
        &self.tables
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn seeded_rng(seed: Option<u64>) -> Arc<dyn RngOracle> {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "seeding combat rng");
    Arc::new(PcgRng::with_seed(seed))
}
