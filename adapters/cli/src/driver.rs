//! Turn driver: one search per turn under a deadline, then a local projection.

use std::time::Duration;

use last_stand_core::{Command, Event, HunterId, Point};
use last_stand_feed::{Decision, HunterForecast, TurnInput};
use last_stand_system_rollout::{Clock, Deadline, RolloutSearch};
use last_stand_world::{self as world, query, World};
use tracing::{info, warn};

/// Time budgets and output options for the driver.
#[derive(Clone, Debug)]
pub(crate) struct DriverConfig {
    /// Budget granted to the very first decision.
    pub(crate) first_turn_budget: Duration,
    /// Budget granted to every later decision.
    pub(crate) turn_budget: Duration,
    /// Appends the expected score to each decision line.
    pub(crate) annotate: bool,
}

/// Plays successive turns and keeps a running score for diagnostics.
#[derive(Debug)]
pub(crate) struct TurnDriver<C> {
    search: RolloutSearch,
    clock: C,
    config: DriverConfig,
    turns_played: u32,
    running_score: u64,
    events: Vec<Event>,
}

impl<C: Clock> TurnDriver<C> {
    pub(crate) fn new(search: RolloutSearch, clock: C, config: DriverConfig) -> Self {
        Self {
            search,
            clock,
            config,
            turns_played: 0,
            running_score: 0,
            events: Vec::new(),
        }
    }

    /// Decides the current turn.
    ///
    /// The deadline clock starts as soon as the turn input is handed over.
    pub(crate) fn play_turn(&mut self, input: &TurnInput) -> Decision {
        let started = self.clock.now();
        let budget = if self.turns_played == 0 {
            self.config.first_turn_budget
        } else {
            self.config.turn_budget
        };
        let deadline = Deadline::after(started, budget);

        let mut world = World::new();
        self.events.clear();
        world::apply(
            &mut world,
            Command::LoadSnapshot {
                snapshot: input.snapshot.clone(),
            },
            &mut self.events,
        );

        let outcome = self.search.search(&world, deadline, &mut self.clock);
        let elapsed = self.clock.now().saturating_duration_since(started);

        let points = self.project(&mut world, outcome.destination, &input.forecasts);
        self.running_score = self.running_score.saturating_add(points);
        self.turns_played = self.turns_played.saturating_add(1);

        info!(
            turn = self.turns_played,
            x = outcome.destination.x(),
            y = outcome.destination.y(),
            rollouts = outcome.rollouts,
            expected_score = outcome.score,
            running_score = self.running_score,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "decision emitted"
        );

        let decision = Decision::new(outcome.destination);
        if self.config.annotate {
            decision.with_annotation(format!("expect {}", outcome.score))
        } else {
            decision
        }
    }

    /// Number of turns decided so far.
    pub(crate) fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Points realised by the local projection across all turns.
    pub(crate) fn running_score(&self) -> u64 {
        self.running_score
    }

    /// Advances the canonical copy by the chosen move and returns the points it earned.
    fn project(
        &mut self,
        world: &mut World,
        destination: Point,
        forecasts: &[HunterForecast],
    ) -> u64 {
        let before = query::accumulated_score(world);
        self.events.clear();
        world::apply(
            world,
            Command::AdvanceTurn { destination },
            &mut self.events,
        );

        for event in &self.events {
            if let Event::HunterAdvanced { hunter, to, .. } = event {
                let Some(forecast) = forecast_for(forecasts, *hunter) else {
                    continue;
                };
                if forecast.next == *to {
                    continue;
                }
                warn!(
                    hunter = hunter.get(),
                    simulated_x = to.x(),
                    simulated_y = to.y(),
                    forecast_x = forecast.next.x(),
                    forecast_y = forecast.next.y(),
                    "simulated hunter move diverges from feed forecast"
                );
            }
        }

        query::accumulated_score(world).saturating_sub(before)
    }
}

fn forecast_for(forecasts: &[HunterForecast], hunter: HunterId) -> Option<&HunterForecast> {
    forecasts.iter().find(|forecast| forecast.hunter == hunter)
}
