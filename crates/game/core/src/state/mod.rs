//! Character state and identifiers.
mod character;
mod common;

pub use character::{Character, CharacterKind, Posture};
pub use common::{CharacterId, ClassId, ItemHandle, RoomId};
