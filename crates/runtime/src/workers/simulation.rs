//! Simulation worker that owns every character record and the world.
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through
//! [`mud_core::CombatEngine`], and publishes events to the EventBus. Commands
//! are handled one at a time, which is what gives each record a single
//! writer.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use mud_core::{
    AttackReport, Character, CharacterId, CharacterKind, CombatEngine, DeathOutcome,
    LevelUpReport, RoomId, SkipReason, WorldStore,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, ProgressionEvent};
use crate::oracle::OracleManager;
use crate::session::SessionRegistry;
use crate::world::{InMemoryWorld, Room};

/// Commands that can be sent to the simulation worker
pub enum Command {
    AddRoom {
        room: Room,
        reply: oneshot::Sender<Result<()>>,
    },
    Spawn {
        character: Character,
        reply: oneshot::Sender<Result<()>>,
    },
    Create {
        id: CharacterId,
        name: String,
        kind: CharacterKind,
        room: RoomId,
        reply: oneshot::Sender<Result<Character>>,
    },
    Despawn {
        id: CharacterId,
        reply: oneshot::Sender<Result<Character>>,
    },
    Attack {
        attacker: CharacterId,
        defender: CharacterId,
        reply: oneshot::Sender<Result<AttackReport>>,
    },
    GrantExperience {
        character: CharacterId,
        amount: u64,
        reply: oneshot::Sender<Result<LevelUpReport>>,
    },
    QueryCharacter {
        id: CharacterId,
        reply: oneshot::Sender<Option<Character>>,
    },
    QueryOccupants {
        room: RoomId,
        reply: oneshot::Sender<Vec<CharacterId>>,
    },
    Connect {
        id: CharacterId,
        reply: oneshot::Sender<mpsc::UnboundedReceiver<String>>,
    },
    Disconnect {
        id: CharacterId,
        reply: oneshot::Sender<()>,
    },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    characters: HashMap<CharacterId, Character>,
    world: InMemoryWorld,
    sessions: SessionRegistry,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        world: InMemoryWorld,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(rooms = world.len(), "SimulationWorker initialized");

        Self {
            characters: HashMap::new(),
            world,
            sessions: SessionRegistry::new(),
            oracles,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::AddRoom { room, reply } => {
                let result = self.add_room(room);
                reply_or_log(reply, result, "AddRoom");
            }
            Command::Spawn { character, reply } => {
                let result = self.spawn(character);
                reply_or_log(reply, result, "Spawn");
            }
            Command::Create {
                id,
                name,
                kind,
                room,
                reply,
            } => {
                let character = Character::create(id, name, kind, self.oracles.as_game_env().rng())
                    .with_room(room);
                let result = self.spawn(character).and_then(|()| {
                    self.characters
                        .get(&id)
                        .cloned()
                        .ok_or(RuntimeError::UnknownCharacter(id))
                });
                reply_or_log(reply, result, "Create");
            }
            Command::Despawn { id, reply } => {
                let result = self.despawn(id);
                reply_or_log(reply, result, "Despawn");
            }
            Command::Attack {
                attacker,
                defender,
                reply,
            } => {
                let report = self.attack(attacker, defender);
                reply_or_log(reply, Ok(report), "Attack");
            }
            Command::GrantExperience {
                character,
                amount,
                reply,
            } => {
                let result = self.grant_experience(character, amount);
                reply_or_log(reply, result, "GrantExperience");
            }
            Command::QueryCharacter { id, reply } => {
                let character = self.characters.get(&id).cloned();
                reply_or_log(reply, character, "QueryCharacter");
            }
            Command::QueryOccupants { room, reply } => {
                reply_or_log(reply, self.world.occupants(room), "QueryOccupants");
            }
            Command::Connect { id, reply } => {
                let rx = self.sessions.connect(id);
                reply_or_log(reply, rx, "Connect");
            }
            Command::Disconnect { id, reply } => {
                self.sessions.disconnect(id);
                reply_or_log(reply, (), "Disconnect");
            }
        }
    }

    fn add_room(&mut self, room: Room) -> Result<()> {
        let id = room.id;
        if !self.world.insert_room(room) {
            return Err(RuntimeError::DuplicateRoom(id));
        }
        debug!(room = %id, "room added");
        Ok(())
    }

    fn spawn(&mut self, character: Character) -> Result<()> {
        if self.characters.contains_key(&character.id) {
            return Err(RuntimeError::DuplicateCharacter(character.id));
        }
        if !self.world.add_occupant(character.room, character.id) {
            return Err(RuntimeError::UnknownRoom(character.room));
        }
        info!(
            character = %character.id,
            name = %character.name,
            kind = ?character.kind,
            room = %character.room,
            level = character.level,
            "character spawned"
        );
        self.characters.insert(character.id, character);
        Ok(())
    }

    /// Drops a record and its room listing so the id can be spawned again.
    /// Retired NPCs stay in the map until this runs.
    fn despawn(&mut self, id: CharacterId) -> Result<Character> {
        let character = self
            .characters
            .remove(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        let listed = self.world.remove_occupant(character.room, id);
        debug!(character = %id, room = %character.room, listed, "character despawned");
        Ok(character)
    }

    fn attack(&mut self, attacker_id: CharacterId, defender_id: CharacterId) -> AttackReport {
        // Both records must exist before the attacker is taken out of the map.
        let attacker = if self.characters.contains_key(&defender_id) {
            self.characters.remove(&attacker_id)
        } else {
            None
        };
        let Some(mut attacker) = attacker else {
            debug!(
                attacker = %attacker_id,
                defender = %defender_id,
                reason = SkipReason::NoOpponent.as_str(),
                "attack skipped"
            );
            return AttackReport::Skipped(SkipReason::NoOpponent);
        };

        // Self-targeting: the engine rejects it by id, so a copy is enough.
        let mut mirror;
        let defender = match self.characters.get_mut(&defender_id) {
            Some(defender) => defender,
            None => {
                mirror = attacker.clone();
                &mut mirror
            }
        };

        let env = self.oracles.as_game_env();
        let mut engine = CombatEngine::new(&mut self.world, &self.sessions);
        let report = engine.attack(env, &mut attacker, defender);
        self.characters.insert(attacker_id, attacker);

        match &report {
            AttackReport::Skipped(reason) => {
                debug!(
                    attacker = %attacker_id,
                    defender = %defender_id,
                    reason = reason.as_str(),
                    "attack skipped"
                );
            }
            AttackReport::Resolved(exchange) => {
                debug!(
                    attacker = %attacker_id,
                    defender = %defender_id,
                    hit = exchange.result.is_hit(),
                    roll = exchange.result.roll,
                    chance = exchange.result.hit_chance,
                    hp_damage = exchange.result.damage.hp,
                    sp_damage = exchange.result.damage.sp,
                    "attack resolved"
                );
                self.event_bus.publish(Event::Combat(CombatEvent::Attack {
                    attacker: attacker_id,
                    defender: defender_id,
                    result: exchange.result,
                }));
                if let Some(outcome) = exchange.death {
                    self.publish_death(Some(attacker_id), outcome);
                }
                self.publish_level_ups(attacker_id, &exchange.level_ups);
            }
        }

        report
    }

    fn grant_experience(&mut self, id: CharacterId, amount: u64) -> Result<LevelUpReport> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;

        let env = self.oracles.as_game_env();
        let mut engine = CombatEngine::new(&mut self.world, &self.sessions);
        let report = engine.grant_experience(env, character, amount);
        debug!(character = %id, amount, total = character.experience, "experience granted");

        self.publish_level_ups(id, &report);
        Ok(report)
    }

    fn publish_death(&self, killer: Option<CharacterId>, outcome: DeathOutcome) {
        match outcome {
            DeathOutcome::NpcRetired {
                victim,
                experience_awarded,
                gold_transferred,
                ..
            } => info!(
                victim = %victim,
                killer = ?killer,
                experience = experience_awarded,
                gold = gold_transferred,
                "npc retired"
            ),
            DeathOutcome::PlayerRespawned {
                victim,
                void_room,
                relocated,
                ..
            } => info!(
                victim = %victim,
                killer = ?killer,
                void_room = %void_room,
                relocated,
                "player respawned"
            ),
        }
        self.event_bus
            .publish(Event::Combat(CombatEvent::Death { killer, outcome }));
    }

    fn publish_level_ups(&self, character: CharacterId, report: &LevelUpReport) {
        for gain in &report.gains {
            info!(
                character = %character,
                level = gain.level,
                hp_gain = gain.hp_gain,
                "level gained"
            );
            self.event_bus
                .publish(Event::Progression(ProgressionEvent::LevelUp {
                    character,
                    gain: *gain,
                }));

            if let Some(promotion) = gain.promotion {
                info!(
                    character = %character,
                    from = %promotion.from,
                    to = %promotion.to,
                    level = promotion.level,
                    "class promoted"
                );
                self.event_bus
                    .publish(Event::Progression(ProgressionEvent::Promotion {
                        character,
                        promotion,
                    }));
            }
        }
    }
}

fn reply_or_log<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!("{command} reply channel closed (caller dropped)");
    }
}
