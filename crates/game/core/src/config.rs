use crate::state::RoomId;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Override for the room defeated players respawn into.
    /// `None` falls back to [`GameConfig::DEFAULT_VOID_ROOM`].
    pub void_room: Option<RoomId>,
}

impl GameConfig {
    pub const DEFAULT_VOID_ROOM: RoomId = RoomId(0);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_void_room(void_room: RoomId) -> Self {
        Self {
            void_room: Some(void_room),
        }
    }
}
