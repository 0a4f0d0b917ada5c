use crate::state::{CharacterId, RoomId};

/// Room occupancy held by the external world store.
///
/// The rules only ever touch occupant lists; room contents, exits and
/// persistence belong to the host.
pub trait WorldStore {
    fn room_exists(&self, room: RoomId) -> bool;

    /// Characters currently in `room`. Empty if the room is unknown.
    fn occupants(&self, room: RoomId) -> Vec<CharacterId>;

    /// Removes `who` from `room`. Returns `false` if the room is unknown or
    /// `who` was not listed there.
    fn remove_occupant(&mut self, room: RoomId, who: CharacterId) -> bool;

    /// Adds `who` to `room`. Returns `false` if the room is unknown.
    fn add_occupant(&mut self, room: RoomId, who: CharacterId) -> bool;

    /// Text shown to a character entering `room`.
    fn describe_room(&self, room: RoomId) -> Option<String>;
}
