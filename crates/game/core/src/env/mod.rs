//! Traits describing the collaborators the rules depend on.
//!
//! Read-only oracles (rule tables, weapon definitions, configuration, RNG)
//! are bundled in [`GameEnv`] so the rules can access everything without
//! hard coupling to concrete implementations. The mutable collaborators,
//! [`WorldStore`] and [`Notifier`], are passed to the operations that need
//! them.
mod config;
mod items;
mod notify;
mod rng;
mod tables;
mod world;

pub use config::ConfigOracle;
pub use items::{ItemOracle, NoItems, WeaponCatalog, WeaponDefinition};
pub use notify::{Notifier, NotifyError, send, send_room};
pub use rng::{PcgRng, RngOracle};
pub use tables::{CombatParams, GameTables, TablesError, TablesOracle};
pub use world::WorldStore;

#[cfg(any(test, feature = "test-utils"))]
pub use rng::ScriptedRng;

/// Aggregates the read-only oracles required by the rules.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    tables: &'a dyn TablesOracle,
    items: &'a dyn ItemOracle,
    config: &'a dyn ConfigOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        tables: &'a dyn TablesOracle,
        items: &'a dyn ItemOracle,
        config: &'a dyn ConfigOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            tables,
            items,
            config,
            rng,
        }
    }

    pub fn tables(&self) -> &'a dyn TablesOracle {
        self.tables
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn config(&self) -> &'a dyn ConfigOracle {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("void_room", &self.config.void_room())
            .field("max_level", &self.tables.max_level())
            .finish_non_exhaustive()
    }
}
