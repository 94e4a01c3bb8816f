//! Offline scenarios: JSON world descriptions played against a local referee.

use std::{collections::HashSet, fs, io::Write, path::Path};

use anyhow::{Context, Result};
use last_stand_core::{Command, Event, WorldSnapshot};
use last_stand_feed::{HunterForecast, TurnInput};
use last_stand_system_rollout::Clock;
use last_stand_world::{self as world, query, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::driver::TurnDriver;

/// Errors raised while validating a scenario file.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The file is not a valid scenario document.
    #[error("scenario is not a valid JSON world description")]
    Parse(#[from] serde_json::Error),
    /// Two targets share an identifier.
    #[error("target id {0} appears more than once")]
    DuplicateTarget(u32),
    /// Two hunters share an identifier.
    #[error("hunter id {0} appears more than once")]
    DuplicateHunter(u32),
}

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    snapshot: WorldSnapshot,
}

/// Summary printed once an offline game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PlayReport {
    turns: u32,
    score: u64,
    targets_alive: usize,
    hunters_alive: usize,
}

/// Parses and validates a scenario document.
pub(crate) fn parse_scenario(text: &str) -> Result<WorldSnapshot, ScenarioError> {
    let scenario: Scenario = serde_json::from_str(text)?;

    let mut seen = HashSet::new();
    for target in &scenario.snapshot.targets {
        if !seen.insert(target.id.get()) {
            return Err(ScenarioError::DuplicateTarget(target.id.get()));
        }
    }
    seen.clear();
    for hunter in &scenario.snapshot.hunters {
        if !seen.insert(hunter.id.get()) {
            return Err(ScenarioError::DuplicateHunter(hunter.id.get()));
        }
    }

    if let Some(name) = &scenario.name {
        info!(scenario = %name, "scenario loaded");
    }
    Ok(scenario.snapshot)
}

/// Reads a scenario from disk.
pub(crate) fn load_scenario(path: &Path) -> Result<WorldSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let snapshot = parse_scenario(&text)
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    Ok(snapshot)
}

/// Plays `snapshot` to completion, writing each decision line to `out`.
///
/// The local world acts as referee: it keeps its score across turns and
/// feeds the driver exact hunter forecasts.
pub(crate) fn play<C: Clock, W: Write>(
    driver: &mut TurnDriver<C>,
    snapshot: &WorldSnapshot,
    max_turns: u32,
    out: &mut W,
) -> Result<PlayReport> {
    let mut referee = World::from_snapshot(snapshot);
    let mut events = Vec::new();
    let mut turns = 0;

    while !query::is_terminal(&referee) && turns < max_turns {
        let input = TurnInput {
            snapshot: query::snapshot(&referee),
            forecasts: forecast_hunters(&referee),
        };
        let decision = driver.play_turn(&input);
        writeln!(out, "{decision}").context("failed to write decision")?;

        events.clear();
        world::apply(
            &mut referee,
            Command::AdvanceTurn {
                destination: decision.destination(),
            },
            &mut events,
        );
        turns += 1;
    }

    Ok(PlayReport {
        turns,
        score: query::current_score(&referee),
        targets_alive: query::targets(&referee).len(),
        hunters_alive: query::hunters(&referee).len(),
    })
}

/// Hunter movement ignores the defender's move, so any destination yields
/// the same forecasts.
fn forecast_hunters(referee: &World) -> Vec<HunterForecast> {
    let mut scratch = referee.clone();
    let mut events = Vec::new();
    world::apply(
        &mut scratch,
        Command::AdvanceTurn {
            destination: query::defender(referee),
        },
        &mut events,
    );
    events
        .into_iter()
        .filter_map(|event| match event {
            Event::HunterAdvanced { hunter, to, .. } => Some(HunterForecast { hunter, next: to }),
            _ => None,
        })
        .collect()
}
