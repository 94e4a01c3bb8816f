#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Last Stand decision agent.
//!
//! `run` reads turns from standard input and answers each with one line on
//! standard output. `play` runs a JSON scenario against a local referee and
//! prints a final report. Diagnostics go to standard error.

mod driver;
mod scenario;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use last_stand_feed::FeedReader;
use last_stand_system_rollout::{Clock, RolloutConfig, RolloutSearch, SystemClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::driver::{DriverConfig, TurnDriver};

/// Monte Carlo decision agent for Last Stand
#[derive(Debug, Parser)]
#[command(name = "last-stand", version)]
struct Cli {
    /// Seed for the rollout random source; omitted means operating-system entropy
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Milliseconds granted to the first decision
    #[arg(long, global = true, default_value_t = 980)]
    first_turn_budget_ms: u64,

    /// Milliseconds granted to every later decision
    #[arg(long, global = true, default_value_t = 95)]
    turn_budget_ms: u64,

    /// Probability that a rollout opens with a random move
    #[arg(long, global = true, default_value_t = 0.5)]
    free_roam_probability: f64,

    /// Append the expected score to each decision line
    #[arg(long, global = true)]
    annotate: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Answer turns read from standard input (default)
    Run,
    /// Play a JSON scenario offline and print a summary
    Play {
        /// Scenario file describing the starting world
        #[arg(long)]
        scenario: PathBuf,

        /// Stop after this many turns even if the game is not over
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },
}

/// Entry point for the Last Stand command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("last_stand_cli=info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let config = RolloutConfig {
        free_roam_probability: cli.free_roam_probability,
    };
    let search = match cli.seed {
        Some(seed) => RolloutSearch::from_seed(seed, config),
        None => RolloutSearch::from_entropy(config),
    };
    let mut driver = TurnDriver::new(
        search,
        SystemClock,
        DriverConfig {
            first_turn_budget: Duration::from_millis(cli.first_turn_budget_ms),
            turn_budget: Duration::from_millis(cli.turn_budget_ms),
            annotate: cli.annotate,
        },
    );

    match cli.mode.unwrap_or(Mode::Run) {
        Mode::Run => run_feed(&mut driver),
        Mode::Play {
            scenario,
            max_turns,
        } => play_scenario(&mut driver, &scenario, max_turns),
    }
}

fn run_feed<C: Clock>(driver: &mut TurnDriver<C>) -> Result<()> {
    let stdin = io::stdin();
    let mut feed = FeedReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while let Some(input) = feed.next_turn().context("failed to read turn from feed")? {
        let decision = driver.play_turn(&input);
        writeln!(out, "{decision}").context("failed to write decision")?;
        out.flush().context("failed to flush decision")?;
    }

    info!(
        turns = driver.turns_played(),
        running_score = driver.running_score(),
        "feed closed"
    );
    Ok(())
}

fn play_scenario<C: Clock>(
    driver: &mut TurnDriver<C>,
    path: &Path,
    max_turns: u32,
) -> Result<()> {
    let snapshot = scenario::load_scenario(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = scenario::play(driver, &snapshot, max_turns, &mut out)?;
    serde_json::to_writer(&mut out, &report).context("failed to write play report")?;
    writeln!(out).context("failed to write play report")?;
    Ok(())
}
