//! Headless FLATTOP runner.
//!
//! Plays the Coral Sea opening for a number of hours and prints a summary,
//! or every snapshot as JSON lines with `--json`.

use std::path::PathBuf;

use clap::Parser;
use flattop_sim::config::SimConfig;
use flattop_sim::flattop_core::events::GameEvent;
use flattop_sim::state::GameStateSnapshot;
use flattop_sim::{persistence, scenario, GameEngine, Result};

/// Headless FLATTOP runner
#[derive(Parser, Debug)]
#[command(name = "flattop")]
#[command(about = "Play the Coral Sea opening and report what happened")]
struct Args {
    /// TOML file with seed, weather and save directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Game hours to play
    #[arg(long, default_value_t = 24)]
    hours: u32,

    /// Save slot written after the last hour
    #[arg(long)]
    save: Option<String>,

    /// Print every snapshot as a JSON line instead of a summary
    #[arg(long)]
    json: bool,
}

fn summarize(snap: &GameStateSnapshot) {
    let stamp = format!("day {} {:02}00", snap.day, snap.hour);
    for event in &snap.events {
        match event {
            GameEvent::ShipHit {
                ship, hits, sunk, ..
            } => {
                let fate = if *sunk { ", sunk" } else { "" };
                println!("{stamp}  {ship} hit {hits} times{fate}");
            }
            GameEvent::AirCombat {
                hex,
                intercepting_side,
                hits_on_escorts,
                hits_on_bombers,
                hits_on_interceptors,
                ..
            } => {
                println!(
                    "{stamp}  air combat at ({}, {}), {intercepting_side:?} intercepting: \
                     escorts -{hits_on_escorts}, bombers -{hits_on_bombers}, \
                     interceptors -{hits_on_interceptors}",
                    hex.q(),
                    hex.r()
                );
            }
            GameEvent::BaseHit {
                base,
                hits,
                aircraft_destroyed,
                ..
            } => {
                println!("{stamp}  {base} bombed: {hits} hits, {aircraft_destroyed} aircraft destroyed");
            }
            GameEvent::AircraftDitched {
                aircraft_type,
                count,
                ..
            } => {
                println!("{stamp}  {count} {aircraft_type} ditched");
            }
            GameEvent::CommandRejected { reason } => {
                println!("{stamp}  order rejected: {reason}");
            }
            _ => {}
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_toml_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let hours = args.hours;
    tracing::info!(seed = config.seed, hours, "starting Coral Sea");

    let mut engine = GameEngine::new(&config);
    scenario::setup_coral_sea(&mut engine)?;
    engine.queue_commands(scenario::dawn_strike());

    for _ in 0..hours {
        let snap = engine.tick();
        if args.json {
            println!("{}", serde_json::to_string(&snap)?);
        } else {
            summarize(&snap);
        }
    }

    if let Some(slot) = &args.save {
        persistence::save_to_file(&config.save_dir, slot, &engine.to_save_data(slot))?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("flattop: {err}");
        std::process::exit(1);
    }
}
