//! The character record shared by every rule in this crate.
//!
//! Records are owned by the host's world store. The rules mutate them in
//! place and never create or destroy them; death is a state transition.

use super::{CharacterId, ClassId, ItemHandle, RoomId};
use crate::env::RngOracle;
use crate::stats::{Attributes, ResourceMaximums, ResourceMeter};

/// Who controls a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacterKind {
    Player,
    /// Non-player combatant.
    Npc,
}

/// Body position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Posture {
    #[default]
    Standing,
    Sitting,
    Resting,
    Sleeping,
    Fighting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,

    // === Progression ===
    pub level: u32,
    pub class: ClassId,
    /// Lifetime experience. Level thresholds are absolute, so this is never
    /// spent on levelling.
    pub experience: u64,
    pub gold: u64,

    // === Pools ===
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub mp: ResourceMeter,

    // === Combat ===
    pub to_hit_bonus: i32,
    pub damage_bonus: i32,
    pub wielded: Option<ItemHandle>,
    /// Opponent currently engaged. A plain id, never ownership.
    pub fighting: Option<CharacterId>,
    pub posture: Posture,

    pub room: RoomId,
    pub attributes: Attributes,
}

impl Character {
    /// Level-1 character with pools filled from `attributes`.
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        kind: CharacterKind,
        attributes: Attributes,
    ) -> Self {
        let max = ResourceMaximums::compute(&attributes);
        Self {
            id,
            name: name.into(),
            kind,
            level: 1,
            class: ClassId::default(),
            experience: 0,
            gold: 0,
            hp: ResourceMeter::full(max.hp_max),
            sp: ResourceMeter::full(max.sp_max),
            mp: ResourceMeter::full(max.mp_max),
            to_hit_bonus: 0,
            damage_bonus: 0,
            wielded: None,
            fighting: None,
            posture: Posture::Standing,
            room: RoomId::default(),
            attributes,
        }
    }

    /// Character creation: attributes rolled in [11, 15], pools full.
    pub fn create(
        id: CharacterId,
        name: impl Into<String>,
        kind: CharacterKind,
        rng: &(impl RngOracle + ?Sized),
    ) -> Self {
        Self::new(id, name, kind, Attributes::roll(rng))
    }

    pub fn with_class(mut self, class: ClassId) -> Self {
        self.class = class;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_room(mut self, room: RoomId) -> Self {
        self.room = room;
        self
    }

    pub fn with_weapon(mut self, weapon: ItemHandle) -> Self {
        self.wielded = Some(weapon);
        self
    }

    pub fn with_gold(mut self, gold: u64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_experience(mut self, experience: u64) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_bonuses(mut self, to_hit: i32, damage: i32) -> Self {
        self.to_hit_bonus = to_hit;
        self.damage_bonus = damage;
        self
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == CharacterKind::Player
    }

    /// Health at or below zero.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp.is_depleted()
    }

    /// Pool maximums implied by the current attributes.
    pub fn derived_maximums(&self) -> ResourceMaximums {
        ResourceMaximums::compute(&self.attributes)
    }

    /// Recomputes energy and mana from attributes and refills both.
    ///
    /// Health is not touched: its maximum grows through level-up rolls.
    pub fn refresh_energy_and_mana(&mut self) {
        let max = self.derived_maximums();
        self.sp.reset_to(max.sp_max);
        self.mp.reset_to(max.mp_max);
    }

    /// Marks both sides of an exchange as fighting.
    pub fn engage(&mut self, opponent: CharacterId) {
        if self.fighting.is_none() {
            self.fighting = Some(opponent);
        }
        self.posture = Posture::Fighting;
    }

    /// Clears the combat reference and stands up.
    pub fn disengage(&mut self) {
        self.fighting = None;
        self.posture = Posture::Standing;
    }
}
