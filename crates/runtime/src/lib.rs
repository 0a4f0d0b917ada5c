//! Runtime orchestration for the combat and progression rules.
//!
//! A single simulation worker owns every character record and the room
//! occupancy, so each record has exactly one writer. Clients talk to it
//! through the cloneable [`RuntimeHandle`]; session lines flow back over
//! per-character channels and rule outcomes are published on the
//! [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] bundles loaded content into the core's oracle traits
//! - [`world`] and [`session`] are the in-memory collaborators the rules write to
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;
pub mod session;
pub mod world;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CombatEvent, Event, EventBus, ProgressionEvent, Topic};
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::SessionRegistry;
pub use world::{InMemoryWorld, Room};
