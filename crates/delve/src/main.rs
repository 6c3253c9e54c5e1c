//! Delve headless harness
//!
//! Runs a game with scripted participants against the evil faction and
//! prints the event stream. Saves recorded on the stairs persist between
//! runs.

mod autopilot;

use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use strum::IntoEnumIterator;

use dv_core::actor::HeroClass;
use dv_core::event::{EventKind, GameEvent};
use dv_core::world::EngineOptions;
use dv_core::{Command, Game, GameRng, PlayerId, STEP_INTERVAL_DEN, STEP_INTERVAL_NUM};

#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - a co-op dungeon crawl, played by script", long_about = None)]
struct Args {
    /// Random seed (overrides the config file)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Hero classes, one per participant
    #[arg(short = 'H', long = "hero", value_parser = parse_class, default_values = ["warrior", "mage"])]
    heroes: Vec<HeroClass>,

    /// Logical steps to run
    #[arg(short = 't', long = "ticks", default_value_t = 3000)]
    ticks: u64,

    /// Engine options file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Save book location
    #[arg(long = "saves")]
    saves: Option<PathBuf>,

    /// Restore this save slot of the first hero before playing
    #[arg(long = "restore")]
    restore: Option<usize>,

    /// Tick ceiling for an evil turn
    #[arg(long = "evil-turn-max")]
    evil_turn_max: Option<u32>,

    /// Print the map after every level change
    #[arg(short = 'm', long = "map")]
    map: bool,
}

fn parse_class(s: &str) -> Result<HeroClass, String> {
    HeroClass::from_str(s).map_err(|_| {
        let known: Vec<String> = HeroClass::iter().map(|c| c.to_string().to_lowercase()).collect();
        format!("unknown class '{}', expected one of {}", s, known.join(", "))
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => EngineOptions::load_from_file(path)?,
        None => EngineOptions::default(),
    };
    if let Some(max) = args.evil_turn_max {
        options.evil_turn_max = max;
    }
    let seed = args
        .seed
        .or(options.seed)
        .unwrap_or_else(|| GameRng::from_entropy().seed());

    let save_path = args.saves.clone().unwrap_or_else(|| dv_save::default_save_path("local"));
    let mut game = Game::new(seed, options);
    game.world_mut().saves = dv_save::load_book_or_default(&save_path)?;
    println!("Delve seed {}", seed);

    let participants: Vec<PlayerId> = (0..args.heroes.len())
        .map(|i| PlayerId(format!("p{}", i + 1)))
        .collect();
    for (id, class) in participants.iter().zip(&args.heroes) {
        let name = format!("{}-{}", class, id);
        game.apply(id, Command::Join { name, class: *class });
    }
    if let (Some(index), Some(first)) = (args.restore, participants.first()) {
        game.apply(first, Command::SelectSave { index });
    }
    report(&game, &args);

    let interval = STEP_INTERVAL_NUM.div_ceil(STEP_INTERVAL_DEN);
    let mut now = 0;
    for _ in 0..args.ticks {
        if let Some((player, command)) = autopilot::next_command(&game) {
            game.apply(&player, command);
        }
        now += interval;
        game.update(now);
        report(&game, &args);
        if game.is_over() {
            break;
        }
    }

    summary(&game);
    dv_save::save_book(&game.world().saves, &save_path)?;
    Ok(())
}

fn report(game: &Game, args: &Args) {
    let clock = game.world().clock;
    for event in game.events() {
        println!("[{:>7}] {}", clock, describe(event));
        if args.map && event.kind == EventKind::Stairs {
            let world = game.world();
            if let Some((id, _)) = event.actor.and_then(|a| world.find_actor(a))
                && let Some(dungeon) = world.dungeon(id)
            {
                println!("{}", dungeon.render());
            }
        }
    }
}

fn describe(event: &GameEvent) -> String {
    let who = event.actor.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
    let at = format!("({}, {})", event.x, event.y);
    match event.kind {
        EventKind::Step => format!("{} steps to {}", who, at),
        EventKind::Open => format!("{} opens the door at {}", who, at),
        EventKind::ChestOpen => format!("{} opens a chest at {}", who, at),
        EventKind::ItemLoot => match event.item {
            Some(item) => format!("the party finds a {}", item),
            None => "the party finds something".to_string(),
        },
        EventKind::GoldLoot => format!("the party gains {} gold", event.value),
        EventKind::Shoot => format!("{} shoots at {}", who, at),
        EventKind::Magic => format!("{} casts at {}", who, at),
        EventKind::Heal => format!("{} heals {} for {}", who, at, event.value),
        EventKind::Attack => format!("{} attacks {}", who, at),
        EventKind::Damage => format!("{} takes {} damage", who, event.value),
        EventKind::Died => format!("{} dies at {}", who, at),
        EventKind::TurnChange => format!("turn passes to slot {} ({})", event.value, who),
        EventKind::Stairs => format!("{} descends to level {}", who, event.value),
        EventKind::ItemUsed => format!("{} uses a {}", who, event.item.map(|i| i.to_string()).unwrap_or_default()),
        EventKind::GameOver => "the party has fallen".to_string(),
    }
}

fn summary(game: &Game) {
    let world = game.world();
    let deepest = world.dungeons.iter().map(|d| d.level).max().unwrap_or(0);
    println!();
    println!("Deepest level: {}", deepest);
    println!("Gold: {}", world.inventory.gold);
    println!("Items: {}", world.inventory.items.len());
    println!("Fallen heroes: {}", world.dead_heroes.len());
    for player in &world.players {
        for (i, slot) in world.saves.slots(&player.name).iter().enumerate() {
            println!("  {} slot {}: {}", player.name, i, slot.descriptor);
        }
    }
}
