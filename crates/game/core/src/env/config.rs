//! Configuration oracle for exposing game configuration to the rules.

use crate::config::GameConfig;
use crate::state::RoomId;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Room a defeated player character respawns into.
    fn void_room(&self) -> RoomId;
}

impl ConfigOracle for GameConfig {
    fn void_room(&self) -> RoomId {
        self.void_room.unwrap_or(GameConfig::DEFAULT_VOID_ROOM)
    }
}
