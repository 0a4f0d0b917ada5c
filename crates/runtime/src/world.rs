//! In-memory room store.
//!
//! Rooms hold a name, a description and an ordered occupant list. This is
//! the [`WorldStore`] the simulation worker hands to the combat engine.

use std::collections::HashMap;

use mud_core::{CharacterId, RoomId, WorldStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    occupants: Vec<CharacterId>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            occupants: Vec::new(),
        }
    }

    /// The holding room defeated players respawn into.
    pub fn void(id: RoomId) -> Self {
        Self::new(
            id,
            "The Void",
            "Grey mist stretches in every direction. Somewhere far off, a bell tolls.",
        )
    }

    pub fn occupants(&self) -> &[CharacterId] {
        &self.occupants
    }
}

#[derive(Debug, Default)]
pub struct InMemoryWorld {
    rooms: HashMap<RoomId, Room>,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `room`. Returns `false` and leaves the world unchanged if the
    /// id is taken.
    pub fn insert_room(&mut self, room: Room) -> bool {
        if self.rooms.contains_key(&room.id) {
            return false;
        }
        self.rooms.insert(room.id, room);
        true
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl WorldStore for InMemoryWorld {
    fn room_exists(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    fn occupants(&self, room: RoomId) -> Vec<CharacterId> {
        self.rooms
            .get(&room)
            .map(|r| r.occupants.clone())
            .unwrap_or_default()
    }

    fn remove_occupant(&mut self, room: RoomId, who: CharacterId) -> bool {
        let Some(room) = self.rooms.get_mut(&room) else {
            return false;
        };
        match room.occupants.iter().position(|&id| id == who) {
            Some(index) => {
                room.occupants.remove(index);
                true
            }
            None => false,
        }
    }

    fn add_occupant(&mut self, room: RoomId, who: CharacterId) -> bool {
        let Some(room) = self.rooms.get_mut(&room) else {
            return false;
        };
        if !room.occupants.contains(&who) {
            room.occupants.push(who);
        }
        true
    }

    fn describe_room(&self, room: RoomId) -> Option<String> {
        self.rooms
            .get(&room)
            .map(|r| format!("{}\n{}", r.name, r.description))
    }
}
