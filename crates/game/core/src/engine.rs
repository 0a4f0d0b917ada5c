//! One combat exchange, end to end.
//!
//! [`CombatEngine`] sequences the rule modules for a single attack: the
//! pre-checks, the resolver, the messages for everyone in the room, the death
//! handler and the killer's level-up check. It owns no state: the world
//! store and notifier are borrowed for the duration of the call and the
//! character records are mutated in place. The host serializes calls per
//! character.

use crate::combat::{AttackResult, DamageSource, resolve_attack};
use crate::death::{DeathOutcome, handle_death};
use crate::env::{GameEnv, Notifier, TablesOracle, WorldStore, send, send_room};
use crate::progression::{LevelUpReport, apply_experience_and_check_levelup};
use crate::state::{Character, ClassId};

/// Why an attack was not resolved. No state was touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    SelfTarget,
    AttackerDefeated,
    DefenderDefeated,
    /// The combatants are not in the same room, or the room is unknown.
    NotInRoom,
    /// The host holds no record for one of the combatants.
    NoOpponent,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::SelfTarget => "self_target",
            SkipReason::AttackerDefeated => "attacker_defeated",
            SkipReason::DefenderDefeated => "defender_defeated",
            SkipReason::NotInRoom => "not_in_room",
            SkipReason::NoOpponent => "no_opponent",
        }
    }
}

/// A resolved exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exchange {
    pub result: AttackResult,
    /// Set when the blow defeated the defender.
    pub death: Option<DeathOutcome>,
    /// Levels the attacker gained from the kill.
    pub level_ups: LevelUpReport,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackReport {
    Skipped(SkipReason),
    Resolved(Exchange),
}

impl AttackReport {
    pub fn exchange(&self) -> Option<&Exchange> {
        match self {
            AttackReport::Resolved(exchange) => Some(exchange),
            AttackReport::Skipped(_) => None,
        }
    }
}

/// Sequences combat against a borrowed world store and notifier.
pub struct CombatEngine<'a, W: ?Sized, N: ?Sized> {
    world: &'a mut W,
    notifier: &'a N,
}

impl<'a, W, N> CombatEngine<'a, W, N>
where
    W: WorldStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(world: &'a mut W, notifier: &'a N) -> Self {
        Self { world, notifier }
    }

    /// Runs one attack from `attacker` on `defender`.
    ///
    /// Never fails. Invalid pairings come back as [`AttackReport::Skipped`].
    pub fn attack(
        &mut self,
        env: GameEnv<'_>,
        attacker: &mut Character,
        defender: &mut Character,
    ) -> AttackReport {
        if let Some(reason) = self.precheck(attacker, defender) {
            return AttackReport::Skipped(reason);
        }

        attacker.engage(defender.id);
        defender.engage(attacker.id);

        let result = resolve_attack(attacker, defender, &env);
        self.announce_attack(attacker, defender, &result, &env);

        if !defender.is_defeated() {
            return AttackReport::Resolved(Exchange {
                result,
                death: None,
                level_ups: LevelUpReport::default(),
            });
        }

        let death = handle_death(
            defender,
            Some(&mut *attacker),
            &mut *self.world,
            self.notifier,
            &env,
        );
        attacker.disengage();
        let level_ups = apply_experience_and_check_levelup(attacker, &env);
        announce_level_ups(self.notifier, attacker, &level_ups, env.tables());

        AttackReport::Resolved(Exchange {
            result,
            death: Some(death),
            level_ups,
        })
    }

    /// Adds experience from any source and resolves the resulting level-ups.
    pub fn grant_experience(
        &mut self,
        env: GameEnv<'_>,
        character: &mut Character,
        amount: u64,
    ) -> LevelUpReport {
        character.experience = character.experience.saturating_add(amount);
        let report = apply_experience_and_check_levelup(character, &env);
        announce_level_ups(self.notifier, character, &report, env.tables());
        report
    }

    fn precheck(&self, attacker: &Character, defender: &Character) -> Option<SkipReason> {
        if attacker.id == defender.id {
            return Some(SkipReason::SelfTarget);
        }
        if attacker.is_defeated() {
            return Some(SkipReason::AttackerDefeated);
        }
        if defender.is_defeated() {
            return Some(SkipReason::DefenderDefeated);
        }
        if attacker.room != defender.room || !self.world.room_exists(attacker.room) {
            return Some(SkipReason::NotInRoom);
        }
        None
    }

    /// Attacker, defender and bystander lines for one blow, sent together.
    fn announce_attack(
        &self,
        attacker: &Character,
        defender: &Character,
        result: &AttackResult,
        env: &GameEnv<'_>,
    ) {
        let (to_attacker, to_defender, to_room) = if result.is_hit() {
            let with = match result.source {
                Some(DamageSource::Weapon(handle)) => env
                    .items()
                    .weapon(handle)
                    .map(|w| format!(" with {}", w.name))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            (
                format!(
                    "You hit {}{with} for {} damage, draining {} energy.",
                    defender.name, result.damage.hp, result.damage.sp
                ),
                format!(
                    "{} hits you{with} for {} damage, draining {} energy.",
                    attacker.name, result.damage.hp, result.damage.sp
                ),
                format!("{} hits {}{with}.", attacker.name, defender.name),
            )
        } else {
            (
                format!("You miss {}.", defender.name),
                format!("{} misses you.", attacker.name),
                format!("{} misses {}.", attacker.name, defender.name),
            )
        };

        send(self.notifier, attacker.id, &to_attacker);
        send(self.notifier, defender.id, &to_defender);
        send_room(
            self.notifier,
            &self.world.occupants(attacker.room),
            &[attacker.id, defender.id],
            &to_room,
        );
    }
}

/// Tells `character` about every level and promotion in `report`.
pub fn announce_level_ups<N>(
    notifier: &N,
    character: &Character,
    report: &LevelUpReport,
    tables: &dyn TablesOracle,
) where
    N: Notifier + ?Sized,
{
    for gain in &report.gains {
        send(
            notifier,
            character.id,
            &format!(
                "You have reached level {}! You gain {} maximum health.",
                gain.level, gain.hp_gain
            ),
        );
        if let Some(promotion) = gain.promotion {
            send(
                notifier,
                character.id,
                &format!(
                    "You have been promoted to {}!",
                    class_name(tables, promotion.to)
                ),
            );
        }
    }
}

fn class_name(tables: &dyn TablesOracle, class: ClassId) -> String {
    tables
        .class_info(class)
        .map(|info| info.name.clone())
        .unwrap_or_else(|| class.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{GameTables, NoItems, ScriptedRng, WeaponCatalog, WeaponDefinition};
    use crate::progression::exp_to_next;
    use crate::state::{CharacterId, CharacterKind, ItemHandle, Posture, RoomId};
    use crate::stats::Attributes;
    use crate::testing::{MemoryWorld, Transcript};

    const ROOM: RoomId = RoomId(3);

    fn character(id: u32, name: &str, kind: CharacterKind) -> Character {
        Character::new(CharacterId(id), name, kind, Attributes::default()).with_room(ROOM)
    }

    fn world() -> MemoryWorld {
        let mut world = MemoryWorld::new()
            .with_room(ROOM, "A bamboo grove.")
            .with_room(RoomId(0), "The void.");
        for id in 1..=3 {
            world.place(ROOM, CharacterId(id));
        }
        world
    }

    #[test]
    fn skipped_attacks_touch_nothing() {
        let tables = GameTables::default();
        let config = GameConfig::default();
        let rng = ScriptedRng::new([1, 4, 3]);
        let env = GameEnv::new(&tables, &NoItems, &config, &rng);
        let mut world = world();
        let notifier = Transcript::new();
        let mut engine = CombatEngine::new(&mut world, &notifier);

        let mut a = character(1, "Lin", CharacterKind::Player);
        let mut away = character(2, "Wolf", CharacterKind::Npc).with_room(RoomId(77));
        assert_eq!(
            engine.attack(env, &mut a, &mut away),
            AttackReport::Skipped(SkipReason::NotInRoom)
        );

        let mut dead = character(2, "Wolf", CharacterKind::Npc);
        dead.hp.current = 0;
        assert_eq!(
            engine.attack(env, &mut a, &mut dead),
            AttackReport::Skipped(SkipReason::DefenderDefeated)
        );

        let mut same = a.clone();
        assert_eq!(
            engine.attack(env, &mut a, &mut same),
            AttackReport::Skipped(SkipReason::SelfTarget)
        );

        assert_eq!(a.fighting, None);
        assert_eq!(rng.remaining(), 3);
        assert!(notifier.is_empty());
    }

    #[test]
    fn hit_messages_reach_everyone_in_room() {
        let tables = GameTables::default();
        let config = GameConfig::default();
        let items = WeaponCatalog::new([WeaponDefinition::new(ItemHandle(1), "a jian", "1d6")]);
        let rng = ScriptedRng::new([1, 5, 2]);
        let env = GameEnv::new(&tables, &items, &config, &rng);
        let mut world = world();
        let notifier = Transcript::new();
        let mut engine = CombatEngine::new(&mut world, &notifier);

        let mut a = character(1, "Lin", CharacterKind::Player).with_weapon(ItemHandle(1));
        let mut d = character(2, "Wolf", CharacterKind::Npc);

        let report = engine.attack(env, &mut a, &mut d);
        let exchange = report.exchange().unwrap();
        // hp 5 + 2, sp 2 + 3
        assert_eq!(exchange.result.as_tuple(), (true, 7, 5));
        assert_eq!(exchange.death, None);
        assert_eq!(a.fighting, Some(CharacterId(2)));
        assert_eq!(d.fighting, Some(CharacterId(1)));
        assert_eq!(d.posture, Posture::Fighting);

        assert_eq!(
            notifier.lines_for(CharacterId(1)),
            vec!["You hit Wolf with a jian for 7 damage, draining 5 energy."]
        );
        assert_eq!(
            notifier.lines_for(CharacterId(2)),
            vec!["Lin hits you with a jian for 7 damage, draining 5 energy."]
        );
        assert_eq!(notifier.lines_for(CharacterId(3)), vec!["Lin hits Wolf with a jian."]);
    }

    #[test]
    fn killing_blow_retires_npc_and_levels_killer() {
        let tables = GameTables::default();
        let config = GameConfig::default();
        // hit, 1d4 -> 4, 1d3 -> 1, hp gain 10
        let rng = ScriptedRng::new([1, 4, 1, 10]);
        let env = GameEnv::new(&tables, &NoItems, &config, &rng);
        let mut world = world();
        let notifier = Transcript::new();
        let mut engine = CombatEngine::new(&mut world, &notifier);

        let mut a = character(1, "Lin", CharacterKind::Player)
            .with_class(ClassId(1))
            .with_experience(exp_to_next(1) - 60);
        let mut d = character(2, "Wolf", CharacterKind::Npc).with_gold(12);
        d.hp.current = 3;

        let report = engine.attack(env, &mut a, &mut d);
        let exchange = report.exchange().unwrap();
        assert!(matches!(
            exchange.death,
            Some(DeathOutcome::NpcRetired { experience_awarded: 60, gold_transferred: 12, .. })
        ));
        assert_eq!(exchange.level_ups.final_level(), Some(2));
        assert_eq!(a.level, 2);
        assert_eq!(a.gold, 12);
        assert_eq!(a.fighting, None);
        assert_eq!(a.posture, Posture::Standing);
        assert_eq!(world.count(ROOM, CharacterId(2)), 0);
        assert!(
            notifier
                .lines_for(CharacterId(1))
                .contains(&"You have reached level 2! You gain 10 maximum health.".to_string())
        );
    }

    #[test]
    fn grant_experience_announces_promotion_by_name() {
        let tables = GameTables::default();
        let config = GameConfig::default();
        let rng = ScriptedRng::new([6, 6]);
        let env = GameEnv::new(&tables, &NoItems, &config, &rng);
        let mut world = world();
        let notifier = Transcript::new();
        let mut engine = CombatEngine::new(&mut world, &notifier);

        let mut c = character(1, "Lin", CharacterKind::Player)
            .with_level(29)
            .with_class(ClassId(1))
            .with_experience(exp_to_next(29));
        let report = engine.grant_experience(env, &mut c, exp_to_next(30) - exp_to_next(29));

        assert_eq!(report.levels_gained(), 2);
        assert_eq!(c.class, ClassId(2));
        assert_eq!(
            notifier.lines_for(CharacterId(1)),
            vec![
                "You have reached level 30! You gain 6 maximum health.",
                "You have been promoted to Swordsman!",
                "You have reached level 31! You gain 6 maximum health.",
            ]
        );
    }
}
