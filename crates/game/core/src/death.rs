//! Death handling.
//!
//! Two terminal transitions keyed on who died. A non-player is retired: the
//! killer collects experience and gold and the victim leaves its room for
//! good. A player respawns in the void room with a quarter of each pool.
//! Neither path frees the record.

use crate::env::{GameEnv, Notifier, WorldStore, send, send_room};
use crate::progression::adj_exp;
use crate::state::{Character, CharacterId, RoomId};

/// What [`handle_death`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathOutcome {
    /// Removed from the world. Respawning is the caller's business.
    NpcRetired {
        victim: CharacterId,
        room: RoomId,
        experience_awarded: u64,
        gold_transferred: u64,
        /// `false` if the victim was not listed in its room.
        removed: bool,
    },
    PlayerRespawned {
        victim: CharacterId,
        from_room: RoomId,
        void_room: RoomId,
        hp: i32,
        sp: i32,
        /// `false` if the void room was missing from the world store. The
        /// character's location is set to it regardless.
        relocated: bool,
    },
}

impl DeathOutcome {
    pub fn victim(&self) -> CharacterId {
        match *self {
            Self::NpcRetired { victim, .. } | Self::PlayerRespawned { victim, .. } => victim,
        }
    }
}

/// Resolves the defeat of `victim`.
///
/// Experience and gold only flow to a player-controlled `killer`.
pub fn handle_death<W, N>(
    victim: &mut Character,
    killer: Option<&mut Character>,
    world: &mut W,
    notifier: &N,
    env: &GameEnv<'_>,
) -> DeathOutcome
where
    W: WorldStore + ?Sized,
    N: Notifier + ?Sized,
{
    if victim.is_player() {
        respawn_player(victim, world, notifier, env)
    } else {
        retire_npc(victim, killer, world, notifier)
    }
}

fn retire_npc<W, N>(
    victim: &mut Character,
    killer: Option<&mut Character>,
    world: &mut W,
    notifier: &N,
) -> DeathOutcome
where
    W: WorldStore + ?Sized,
    N: Notifier + ?Sized,
{
    let room = victim.room;
    let mut experience_awarded = 0;
    let mut gold_transferred = 0;

    if let Some(killer) = killer.filter(|k| k.is_player()) {
        experience_awarded = adj_exp(victim.level);
        killer.experience = killer.experience.saturating_add(experience_awarded);

        gold_transferred = std::mem::take(&mut victim.gold);
        killer.gold = killer.gold.saturating_add(gold_transferred);

        send(
            notifier,
            killer.id,
            &format!("You receive {experience_awarded} experience points."),
        );
        if gold_transferred > 0 {
            send(
                notifier,
                killer.id,
                &format!("You take {gold_transferred} gold from {}.", victim.name),
            );
        }
    }

    let removed = world.remove_occupant(room, victim.id);
    victim.disengage();

    let remaining = world.occupants(room);
    send_room(notifier, &remaining, &[], &format!("{} is dead!", victim.name));

    DeathOutcome::NpcRetired {
        victim: victim.id,
        room,
        experience_awarded,
        gold_transferred,
        removed,
    }
}

fn respawn_player<W, N>(
    victim: &mut Character,
    world: &mut W,
    notifier: &N,
    env: &GameEnv<'_>,
) -> DeathOutcome
where
    W: WorldStore + ?Sized,
    N: Notifier + ?Sized,
{
    send(notifier, victim.id, "You have been defeated!");

    let from_room = victim.room;
    world.remove_occupant(from_room, victim.id);
    send_room(
        notifier,
        &world.occupants(from_room),
        &[],
        &format!("{} collapses and fades from sight.", victim.name),
    );

    victim.hp.current = (victim.hp.maximum / 4).max(1);
    victim.sp.current = (victim.sp.maximum / 4).max(1);
    victim.disengage();

    let void_room = env.config().void_room();
    let relocated = world.add_occupant(void_room, victim.id);
    victim.room = void_room;

    if let Some(description) = world.describe_room(void_room) {
        send(notifier, victim.id, &description);
    }

    DeathOutcome::PlayerRespawned {
        victim: victim.id,
        from_room,
        void_room,
        hp: victim.hp.current,
        sp: victim.sp.current,
        relocated,
    }
}
