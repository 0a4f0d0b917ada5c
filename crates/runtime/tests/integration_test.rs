use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use mud_core::env::ScriptedRng;
use mud_core::{
    AttackReport, Attributes, Character, CharacterId, CharacterKind, ClassId, DeathOutcome,
    GameConfig, RoomId, SkipReason, calc_sp, exp_to_next,
};
use mud_runtime::{
    CombatEvent, Event, InMemoryWorld, OracleManager, ProgressionEvent, Room, Runtime,
    RuntimeError, Topic,
};

const COURTYARD: RoomId = RoomId(1);
const LIN: CharacterId = CharacterId(1);
const WOLF: CharacterId = CharacterId(2);
const MONK: CharacterId = CharacterId(3);

fn world() -> InMemoryWorld {
    let mut world = InMemoryWorld::new();
    world.insert_room(Room::new(
        COURTYARD,
        "Temple Courtyard",
        "Flagstones worn smooth by generations of practice.",
    ));
    world
}

async fn start(oracles: OracleManager) -> Runtime {
    Runtime::builder()
        .oracles(oracles)
        .world(world())
        .build()
        .await
        .expect("runtime should start")
}

fn scripted(draws: impl IntoIterator<Item = i32>) -> OracleManager {
    OracleManager::builtin(Some(0)).with_rng(Arc::new(ScriptedRng::new(draws)))
}

fn character(id: CharacterId, name: &str, kind: CharacterKind) -> Character {
    Character::new(id, name, kind, Attributes::default()).with_room(COURTYARD)
}

fn drain_lines(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = rx.try_recv() {
        lines.push(line);
    }
    lines
}

fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// A player finishes off a wounded wolf in front of a bystander, collects
/// the reward and gains a level.
#[tokio::test]
async fn player_kills_npc_and_levels_up() {
    // hit, 1d4 -> 4, 1d3 -> 1, hp gain 10
    let runtime = start(scripted([1, 4, 1, 10])).await;
    let handle = runtime.handle();

    let lin = character(LIN, "Lin", CharacterKind::Player)
        .with_class(ClassId(1))
        .with_experience(exp_to_next(1) - 60);
    let mut wolf = character(WOLF, "Wolf", CharacterKind::Npc).with_gold(20);
    wolf.hp.current = 3;
    handle.spawn(lin).await.unwrap();
    handle.spawn(wolf).await.unwrap();
    handle
        .spawn(character(MONK, "Monk", CharacterKind::Npc))
        .await
        .unwrap();

    let mut lin_rx = handle.connect(LIN).await.unwrap();
    let mut monk_rx = handle.connect(MONK).await.unwrap();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut progression = handle.subscribe(Topic::Progression);

    let report = handle.attack(LIN, WOLF).await.unwrap();
    let exchange = report.exchange().expect("attack should resolve");
    assert_eq!(exchange.result.as_tuple(), (true, 6, 4));
    assert_eq!(exchange.level_ups.final_level(), Some(2));

    assert_eq!(
        drain_lines(&mut lin_rx),
        vec![
            "You hit Wolf for 6 damage, draining 4 energy.",
            "You receive 60 experience points.",
            "You take 20 gold from Wolf.",
            "Wolf is dead!",
            "You have reached level 2! You gain 10 maximum health.",
        ]
    );
    assert_eq!(drain_lines(&mut monk_rx), vec!["Lin hits Wolf.", "Wolf is dead!"]);

    let lin = handle.character(LIN).await.unwrap();
    assert_eq!(lin.level, 2);
    assert_eq!(lin.gold, 20);
    assert_eq!(lin.fighting, None);
    assert_eq!(handle.occupants(COURTYARD).await.unwrap(), vec![LIN, MONK]);

    let combat_events = drain_events(&mut combat);
    assert_eq!(combat_events.len(), 2);
    assert!(matches!(
        combat_events[1],
        Event::Combat(CombatEvent::Death {
            killer: Some(LIN),
            outcome: DeathOutcome::NpcRetired {
                experience_awarded: 60,
                removed: true,
                ..
            },
        })
    ));
    assert!(matches!(
        drain_events(&mut progression).as_slice(),
        [Event::Progression(ProgressionEvent::LevelUp { character: LIN, .. })]
    ));

    // The retired record keeps its id until despawned.
    assert!(matches!(
        handle.spawn(character(WOLF, "Wolf", CharacterKind::Npc)).await,
        Err(RuntimeError::DuplicateCharacter(WOLF))
    ));
    let corpse = handle.despawn(WOLF).await.unwrap();
    assert_eq!(corpse.gold, 0);
    assert!(corpse.is_defeated());
    handle
        .spawn(character(WOLF, "Wolf", CharacterKind::Npc))
        .await
        .unwrap();
    assert_eq!(handle.occupants(COURTYARD).await.unwrap(), vec![LIN, MONK, WOLF]);
    assert!(matches!(
        handle.despawn(CharacterId(9)).await,
        Err(RuntimeError::UnknownCharacter(CharacterId(9)))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

/// Level 29 in the first sword class, one grant spanning two thresholds:
/// ends at 31 in the second class with pools recomputed at each level.
#[tokio::test]
async fn experience_grant_cascades_through_promotion() {
    let runtime = start(OracleManager::builtin(Some(42))).await;
    let handle = runtime.handle();

    let hero = character(LIN, "Lin", CharacterKind::Player)
        .with_level(29)
        .with_class(ClassId(1))
        .with_experience(exp_to_next(29));
    assert_eq!(hero.attributes.bone, 13);
    handle.spawn(hero).await.unwrap();
    let mut progression = handle.subscribe(Topic::Progression);

    let report = handle
        .grant_experience(LIN, exp_to_next(30) - exp_to_next(29))
        .await
        .unwrap();
    assert_eq!(report.levels_gained(), 2);

    let hero = handle.character(LIN).await.unwrap();
    assert_eq!(hero.level, 31);
    assert_eq!(hero.class, ClassId(2));
    assert!((95 + 12..=95 + 52).contains(&hero.hp.maximum));
    assert_eq!(hero.hp.current, hero.hp.maximum);
    assert_eq!(hero.sp.current, calc_sp(13, 13));

    let kinds: Vec<_> = drain_events(&mut progression)
        .into_iter()
        .map(|event| match event {
            Event::Progression(ProgressionEvent::LevelUp { gain, .. }) => {
                format!("level {}", gain.level)
            }
            Event::Progression(ProgressionEvent::Promotion { promotion, .. }) => {
                format!("promotion {}", promotion.to)
            }
            other => format!("{other:?}"),
        })
        .collect();
    assert_eq!(kinds, vec!["level 30", "promotion class 2", "level 31"]);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn defeated_player_respawns_in_void_room() {
    let runtime = start(scripted([1, 4, 1])).await;
    let handle = runtime.handle();

    let mut lin = character(LIN, "Lin", CharacterKind::Player).with_gold(15);
    lin.hp.current = 1;
    handle.spawn(lin).await.unwrap();
    handle
        .spawn(character(WOLF, "Wolf", CharacterKind::Npc))
        .await
        .unwrap();
    let mut lin_rx = handle.connect(LIN).await.unwrap();

    let report = handle.attack(WOLF, LIN).await.unwrap();
    let death = report.exchange().and_then(|e| e.death);
    assert_eq!(
        death,
        Some(DeathOutcome::PlayerRespawned {
            victim: LIN,
            from_room: COURTYARD,
            void_room: GameConfig::DEFAULT_VOID_ROOM,
            hp: 95 / 4,
            sp: 87 / 4,
            relocated: true,
        })
    );

    let lin = handle.character(LIN).await.unwrap();
    assert_eq!(lin.room, GameConfig::DEFAULT_VOID_ROOM);
    assert_eq!(lin.gold, 15);
    assert_eq!(handle.occupants(COURTYARD).await.unwrap(), vec![WOLF]);
    assert_eq!(
        handle.occupants(GameConfig::DEFAULT_VOID_ROOM).await.unwrap(),
        vec![LIN]
    );

    let lines = drain_lines(&mut lin_rx);
    assert_eq!(lines[0], "Wolf hits you for 6 damage, draining 4 energy.");
    assert_eq!(lines[1], "You have been defeated!");
    assert!(lines[2].starts_with("The Void"));

    let wolf = handle.character(WOLF).await.unwrap();
    assert_eq!(wolf.experience, 0);
    assert_eq!(wolf.fighting, None);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_requests_are_rejected_or_skipped() {
    let runtime = start(scripted([])).await;
    let handle = runtime.handle();

    handle
        .spawn(character(LIN, "Lin", CharacterKind::Player))
        .await
        .unwrap();
    assert!(matches!(
        handle.spawn(character(LIN, "Lin", CharacterKind::Player)).await,
        Err(RuntimeError::DuplicateCharacter(LIN))
    ));
    assert!(matches!(
        handle
            .spawn(character(WOLF, "Wolf", CharacterKind::Npc).with_room(RoomId(99)))
            .await,
        Err(RuntimeError::UnknownRoom(RoomId(99)))
    ));
    assert_eq!(
        handle.attack(LIN, WOLF).await.unwrap(),
        AttackReport::Skipped(SkipReason::NoOpponent)
    );
    assert_eq!(
        handle.attack(WOLF, LIN).await.unwrap(),
        AttackReport::Skipped(SkipReason::NoOpponent)
    );
    let lin = handle.character(LIN).await.unwrap();
    assert_eq!(lin.fighting, None);
    assert_eq!(handle.occupants(COURTYARD).await.unwrap(), vec![LIN]);
    assert!(matches!(
        handle.add_room(Room::new(COURTYARD, "Again", "")).await,
        Err(RuntimeError::DuplicateRoom(COURTYARD))
    ));

    assert_eq!(
        handle.attack(LIN, LIN).await.unwrap(),
        AttackReport::Skipped(SkipReason::SelfTarget)
    );

    handle
        .add_room(Room::new(RoomId(2), "Bamboo Grove", "Wind hisses through the stalks."))
        .await
        .unwrap();
    handle
        .spawn(character(WOLF, "Wolf", CharacterKind::Npc).with_room(RoomId(2)))
        .await
        .unwrap();
    assert_eq!(
        handle.attack(LIN, WOLF).await.unwrap(),
        AttackReport::Skipped(SkipReason::NotInRoom)
    );

    // Offline participants never turn into errors.
    handle.disconnect(LIN).await.unwrap();
    assert!(handle.grant_experience(LIN, 10).await.unwrap().is_empty());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn created_characters_have_rolled_attributes_and_full_pools() {
    let runtime = start(OracleManager::builtin(Some(7))).await;
    let handle = runtime.handle();

    let hero = handle
        .create(LIN, "Lin", CharacterKind::Player, COURTYARD)
        .await
        .unwrap();
    for value in [
        hero.attributes.stamina,
        hero.attributes.agility,
        hero.attributes.wisdom,
        hero.attributes.bone,
        hero.attributes.inner,
        hero.attributes.spirit,
    ] {
        assert!((11..=15).contains(&value));
    }
    assert_eq!(hero.level, 1);
    assert_eq!(hero.hp.current, hero.hp.maximum);
    assert_eq!(hero.sp.current, hero.sp.maximum);
    assert_eq!(hero.mp.current, hero.mp.maximum);
    assert_eq!(handle.occupants(COURTYARD).await.unwrap(), vec![LIN]);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
