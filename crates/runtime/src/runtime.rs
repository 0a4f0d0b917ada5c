//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive combat.

use std::env;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mud_core::{ConfigOracle, GameConfig, RoomId, WorldStore};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::workers::{Command, SimulationWorker};
use crate::world::{InMemoryWorld, Room};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Overrides applied on top of the loaded `config.toml`.
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the combat RNG. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MUD_VOID_ROOM` - Respawn room for defeated players (default: from content)
    /// - `MUD_RNG_SEED` - Fixed seed for reproducible runs (default: random)
    /// - `MUD_EVENT_BUFFER` - Event channel capacity per topic (default: 100)
    /// - `MUD_COMMAND_BUFFER` - Worker command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(room) = read_var::<u32>(&lookup, "MUD_VOID_ROOM") {
            config.game_config.void_room = Some(RoomId(room));
        }
        config.rng_seed = read_var::<u64>(&lookup, "MUD_RNG_SEED");
        if let Some(capacity) = read_var::<usize>(&lookup, "MUD_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "MUD_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Main runtime that owns the simulation worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every handle, including clones given to
    /// clients, has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    world: Option<InMemoryWorld>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Provide the initial rooms. Defaults to an empty world.
    pub fn world(mut self, world: InMemoryWorld) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the runtime and start the worker.
    ///
    /// The configured void room is created if the world lacks it.
    pub async fn build(self) -> Result<Runtime> {
        let mut oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        if let Some(room) = self.config.game_config.void_room {
            oracles = oracles.with_config(GameConfig::with_void_room(room));
        }

        let mut world = self.world.unwrap_or_default();
        let void_room = oracles.config().void_room();
        if !world.room_exists(void_room) {
            world.insert_room(Room::void(void_room));
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        tracing::info!(void_room = %void_room, "starting simulation worker");
        let sim_worker = SimulationWorker::new(world, oracles, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
