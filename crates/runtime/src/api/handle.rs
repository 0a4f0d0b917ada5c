//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving combat, querying characters and streaming events.
use tokio::sync::{broadcast, mpsc, oneshot};

use mud_core::{AttackReport, Character, CharacterId, CharacterKind, LevelUpReport, RoomId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;
use crate::world::Room;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Adds a room to the world.
    pub async fn add_room(&self, room: Room) -> Result<()> {
        self.request(|reply| Command::AddRoom { room, reply }).await?
    }

    /// Places a prepared character record into its room.
    pub async fn spawn(&self, character: Character) -> Result<()> {
        self.request(|reply| Command::Spawn { character, reply }).await?
    }

    /// Removes a character record, returning its final state. Retired NPCs
    /// keep their id reserved until despawned.
    pub async fn despawn(&self, id: CharacterId) -> Result<Character> {
        self.request(|reply| Command::Despawn { id, reply }).await?
    }

    /// Creates a level-1 character with rolled attributes and places it.
    pub async fn create(
        &self,
        id: CharacterId,
        name: impl Into<String>,
        kind: CharacterKind,
        room: RoomId,
    ) -> Result<Character> {
        let name = name.into();
        self.request(|reply| Command::Create {
            id,
            name,
            kind,
            room,
            reply,
        })
        .await?
    }

    /// Resolves one attack.
    ///
    /// Unknown combatants are not an error: the report comes back as
    /// [`SkipReason::NoOpponent`](mud_core::SkipReason::NoOpponent).
    pub async fn attack(
        &self,
        attacker: CharacterId,
        defender: CharacterId,
    ) -> Result<AttackReport> {
        self.request(|reply| Command::Attack {
            attacker,
            defender,
            reply,
        })
        .await?
    }

    /// Grants experience from a non-combat source.
    pub async fn grant_experience(
        &self,
        character: CharacterId,
        amount: u64,
    ) -> Result<LevelUpReport> {
        self.request(|reply| Command::GrantExperience {
            character,
            amount,
            reply,
        })
        .await?
    }

    /// Snapshot of a character record.
    pub async fn character(&self, id: CharacterId) -> Result<Character> {
        self.request(|reply| Command::QueryCharacter { id, reply })
            .await?
            .ok_or(RuntimeError::UnknownCharacter(id))
    }

    /// Characters currently listed in `room`.
    pub async fn occupants(&self, room: RoomId) -> Result<Vec<CharacterId>> {
        self.request(|reply| Command::QueryOccupants { room, reply }).await
    }

    /// Opens a session for `id` and returns the receiving end of its text
    /// lines. A second call replaces the first session.
    pub async fn connect(&self, id: CharacterId) -> Result<mpsc::UnboundedReceiver<String>> {
        self.request(|reply| Command::Connect { id, reply }).await
    }

    /// Closes the session for `id`. Later lines for it are dropped.
    pub async fn disconnect(&self, id: CharacterId) -> Result<()> {
        self.request(|reply| Command::Disconnect { id, reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Attacks and deaths
    /// - `Topic::Progression` - Level-ups and promotions
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
