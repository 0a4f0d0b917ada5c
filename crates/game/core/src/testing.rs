//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::env::{Notifier, NotifyError, WorldStore};
use crate::state::{CharacterId, RoomId};

/// Room occupancy kept in a map.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    rooms: HashMap<RoomId, (String, Vec<CharacterId>)>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(mut self, room: RoomId, description: &str) -> Self {
        self.rooms.insert(room, (description.to_string(), Vec::new()));
        self
    }

    pub fn place(&mut self, room: RoomId, who: CharacterId) {
        self.add_occupant(room, who);
    }

    /// Occurrences of `who` in `room`.
    pub fn count(&self, room: RoomId, who: CharacterId) -> usize {
        self.occupants(room).iter().filter(|&&id| id == who).count()
    }
}

impl WorldStore for MemoryWorld {
    fn room_exists(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    fn occupants(&self, room: RoomId) -> Vec<CharacterId> {
        self.rooms
            .get(&room)
            .map(|(_, list)| list.clone())
            .unwrap_or_default()
    }

    fn remove_occupant(&mut self, room: RoomId, who: CharacterId) -> bool {
        let Some((_, list)) = self.rooms.get_mut(&room) else {
            return false;
        };
        match list.iter().position(|&id| id == who) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    fn add_occupant(&mut self, room: RoomId, who: CharacterId) -> bool {
        match self.rooms.get_mut(&room) {
            Some((_, list)) => {
                if !list.contains(&who) {
                    list.push(who);
                }
                true
            }
            None => false,
        }
    }

    fn describe_room(&self, room: RoomId) -> Option<String> {
        self.rooms.get(&room).map(|(text, _)| text.clone())
    }
}

/// Records every delivered line. Ids listed as offline fail delivery.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Mutex<Vec<(CharacterId, String)>>,
    offline: Vec<CharacterId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offline(mut self, who: CharacterId) -> Self {
        self.offline.push(who);
        self
    }

    /// Lines delivered to `who`, oldest first.
    pub fn lines_for(&self, who: CharacterId) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(to, _)| *to == who)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(CharacterId, String)>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for Transcript {
    fn send_line(&self, to: CharacterId, line: &str) -> Result<(), NotifyError> {
        if self.offline.contains(&to) {
            return Err(NotifyError::NoSession(to));
        }
        self.lock().push((to, line.to_string()));
        Ok(())
    }
}
