//! Spike Dodge entry point
//!
//! Runs a headless autoplay session against the reference world, logging
//! each finished round and printing a JSON session report.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Serialize;

use spike_dodge::Tuning;
use spike_dodge::consts::SIM_DT;
use spike_dodge::host::{HeadlessWorld, apply, dispatch};
use spike_dodge::sim::{Command, Event, GameState, RoundResult, setup};

#[derive(Parser, Debug)]
#[command(name = "spike-dodge", about = "Headless autoplay run of Spike Dodge")]
struct Args {
    /// RNG seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Seconds between autoplay taps
    #[arg(long, default_value_t = 0.6)]
    tap_every: f32,

    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
}

/// Rounds that ended in game over during the run
#[derive(Debug, Serialize)]
struct SessionReport {
    seed: u64,
    rounds: Vec<RoundResult>,
    /// Highest score; the earliest round wins ties
    best: Option<RoundResult>,
}

impl SessionReport {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            rounds: Vec::new(),
            best: None,
        }
    }

    fn record(&mut self, result: RoundResult) {
        log::info!("Round {} over with score {}", result.round, result.score);
        if self.best.is_none_or(|best| result.score > best.score) {
            self.best = Some(result);
        }
        self.rounds.push(result);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    ensure!(args.seconds > 0.0, "--seconds must be positive");
    ensure!(args.tap_every > 0.0, "--tap-every must be positive");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Spike Dodge (headless) starting with seed {}", seed);

    let mut state = GameState::new(seed);
    let mut world = HeadlessWorld::new(&tuning).context("building headless world")?;
    apply(&setup(&state, &tuning), &mut world);

    let mut report = SessionReport::new(seed);
    let total_ticks = (args.seconds / SIM_DT).round() as u64;
    let tap_ticks = ((args.tap_every / SIM_DT).round() as u64).max(1);

    for tick in 0..total_ticks {
        let mut events = Vec::new();
        if tick % tap_ticks == 0 {
            events.push(Event::Tap);
        }
        events.extend(world.advance(SIM_DT));
        for command in dispatch(&mut state, &tuning, events, &mut world) {
            if let Command::RoundEnded(result) = command {
                report.record(result);
            }
        }
    }

    if state.is_running() {
        log::info!(
            "Time up during round {} with score {} (not recorded)",
            state.round,
            state.score
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
