//! Arena binary.
//!
//! Composition root that loads content, starts the runtime and plays one
//! duel between a player and a bandit until somebody falls. Session lines
//! go to stdout, logs to stderr.
//!
//! # Environment
//!
//! - `MUD_DATA_DIR` - Directory holding `config.toml`, `tables.toml` and
//!   `items.ron` (default: the bundled data)
//! - `MUD_MAX_ROUNDS` - Rounds before the duel is called a draw (default: 100)
//! - everything [`RuntimeConfig::from_env`] reads
//!
//! ```bash
//! MUD_RNG_SEED=7 RUST_LOG=mud_runtime=debug cargo run -p mud-arena
//! ```

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use mud_content::ContentFactory;
use mud_core::{
    AttackReport, Attributes, Character, CharacterId, CharacterKind, ClassId, ItemHandle, RoomId,
};
use mud_runtime::{
    Event, InMemoryWorld, OracleManager, ProgressionEvent, Room, Runtime, RuntimeConfig,
    RuntimeHandle, Topic,
};

const ARENA: RoomId = RoomId(1);
const HERO: CharacterId = CharacterId(1);
const BANDIT: CharacterId = CharacterId(2);
const DEFAULT_MAX_ROUNDS: u32 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let factory = match std::env::var("MUD_DATA_DIR") {
        Ok(dir) => ContentFactory::new(dir),
        Err(_) => ContentFactory::bundled(),
    };
    let content = factory
        .load_all()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;
    tracing::info!(
        weapons = content.weapons.len(),
        classes = content.tables.classes.len(),
        "content loaded"
    );

    let oracles = OracleManager::from_content(content, config.rng_seed);
    let runtime = Runtime::builder()
        .config(config)
        .oracles(oracles)
        .world(arena_world())
        .build()
        .await?;
    let handle = runtime.handle();

    let outcome = duel(&handle, max_rounds()).await;
    drop(handle);
    runtime.shutdown().await?;
    outcome
}

fn arena_world() -> InMemoryWorld {
    let mut world = InMemoryWorld::new();
    world.insert_room(Room::new(
        ARENA,
        "The Broken Shrine",
        "Moss covers a toppled altar. The road to the capital runs past the gate.",
    ));
    world
}

fn max_rounds() -> u32 {
    std::env::var("MUD_MAX_ROUNDS")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_ROUNDS)
}

async fn duel(handle: &RuntimeHandle, max_rounds: u32) -> Result<()> {
    let hero = Character::new(
        HERO,
        "Lin",
        CharacterKind::Player,
        Attributes::new(14, 13, 12, 14, 13, 15),
    )
    .with_class(ClassId(1))
    .with_weapon(ItemHandle(2))
    .with_room(ARENA);
    let bandit = Character::new(
        BANDIT,
        "a mountain bandit",
        CharacterKind::Npc,
        Attributes::uniform(12),
    )
    .with_level(3)
    .with_weapon(ItemHandle(7))
    .with_gold(35)
    .with_room(ARENA);
    handle.spawn(hero).await.context("spawning hero")?;
    handle.spawn(bandit).await.context("spawning bandit")?;

    let mut session = handle.connect(HERO).await?;
    let mut progression = handle.subscribe(Topic::Progression);

    for round in 1..=max_rounds {
        println!("-- round {round} --");
        let hero_report = handle.attack(HERO, BANDIT).await?;
        let bandit_report = if ended(&hero_report) {
            None
        } else {
            Some(handle.attack(BANDIT, HERO).await?)
        };
        print_lines(&mut session);

        if ended(&hero_report) || bandit_report.as_ref().is_some_and(ended) {
            break;
        }
        if round == max_rounds {
            println!("The fighters step apart, neither able to finish it.");
        }
    }

    while let Ok(event) = progression.try_recv() {
        if let Event::Progression(ProgressionEvent::Promotion { promotion, .. }) = event {
            tracing::info!(to = %promotion.to, level = promotion.level, "promotion during duel");
        }
    }

    let hero = handle.character(HERO).await?;
    println!(
        "{} ends at level {} with {} experience, {} gold and {}/{} health.",
        hero.name, hero.level, hero.experience, hero.gold, hero.hp.current, hero.hp.maximum
    );
    Ok(())
}

fn ended(report: &AttackReport) -> bool {
    match report {
        AttackReport::Skipped(_) => true,
        AttackReport::Resolved(exchange) => exchange.death.is_some(),
    }
}

fn print_lines(session: &mut mpsc::UnboundedReceiver<String>) {
    while let Ok(line) = session.try_recv() {
        println!("{line}");
    }
}
