#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Anytime Monte Carlo search that picks the defender's next destination.
//!
//! Each rollout clones the current world, optionally opens with a random
//! free-roam move, then plays the game to its end by focusing hunters in a
//! shuffled order. The search keeps the first move of the best-scoring
//! rollout and stops once the deadline passes. The clock is polled only
//! between rollouts; a rollout in flight always runs to completion.

mod clock;

pub use clock::{Clock, Deadline, SystemClock};

use last_stand_core::{Command, Event, HunterId, Point, DEFENDER_SPEED};
use last_stand_world::{self as world, query, Hunter, World};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Tuning knobs for the rollout policy.
#[derive(Clone, Debug, PartialEq)]
pub struct RolloutConfig {
    /// Probability that a rollout opens with a random move instead of chasing a hunter.
    pub free_roam_probability: f64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            free_roam_probability: 0.5,
        }
    }
}

impl RolloutConfig {
    fn sanitized(mut self) -> Self {
        if self.free_roam_probability.is_nan() {
            self.free_roam_probability = Self::default().free_roam_probability;
        }
        self.free_roam_probability = self.free_roam_probability.clamp(0.0, 1.0);
        self
    }
}

/// Result of one search invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First move of the best rollout.
    pub destination: Point,
    /// Terminal score of the best rollout.
    pub score: u64,
    /// Number of completed rollouts.
    pub rollouts: u32,
}

/// Monte Carlo rollout search that owns its random source and scratch buffers.
#[derive(Debug)]
pub struct RolloutSearch<R = ChaCha8Rng> {
    rng: R,
    config: RolloutConfig,
    kill_order: Vec<HunterId>,
    events: Vec<Event>,
}

impl RolloutSearch<ChaCha8Rng> {
    /// Creates a search whose rollouts are reproducible for a given seed.
    #[must_use]
    pub fn from_seed(seed: u64, config: RolloutConfig) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), config)
    }

    /// Creates a search seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy(config: RolloutConfig) -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy(), config)
    }
}

impl<R: Rng> RolloutSearch<R> {
    /// Creates a search drawing randomness from the provided generator.
    #[must_use]
    pub fn with_rng(rng: R, config: RolloutConfig) -> Self {
        Self {
            rng,
            config: config.sanitized(),
            kill_order: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Returns the destination the defender should head toward this turn.
    ///
    /// `world` is never mutated. At least one rollout completes even when the
    /// deadline has already passed.
    pub fn choose_move<C: Clock>(
        &mut self,
        world: &World,
        deadline: Deadline,
        clock: &mut C,
    ) -> Point {
        self.search(world, deadline, clock).destination
    }

    /// Runs rollouts until `deadline` and reports the best one.
    pub fn search<C: Clock>(
        &mut self,
        world: &World,
        deadline: Deadline,
        clock: &mut C,
    ) -> SearchOutcome {
        let mut best = self.rollout(world);
        let mut rollouts: u32 = 1;

        while !deadline.has_passed(clock.now()) {
            let candidate = self.rollout(world);
            rollouts = rollouts.saturating_add(1);
            if improves(&candidate, &best) {
                best = candidate;
            }
        }

        debug!(
            rollouts,
            score = best.score,
            x = best.first_move.x(),
            y = best.first_move.y(),
            "rollout search finished"
        );

        SearchOutcome {
            destination: best.first_move,
            score: best.score,
            rollouts,
        }
    }

    fn rollout(&mut self, world: &World) -> RolloutResult {
        let mut state = world.clone();
        let mut first_move = None;

        if self.rng.gen_bool(self.config.free_roam_probability) {
            let destination = self.free_roam_destination(query::defender(&state));
            first_move = Some(destination);
            self.advance(&mut state, destination);
        }

        self.kill_order.clear();
        self.kill_order
            .extend(query::hunters(&state).iter().map(Hunter::id));
        self.kill_order.shuffle(&mut self.rng);

        let mut cursor = 0;
        while !query::is_terminal(&state) {
            let Some(destination) = next_focus(&state, &self.kill_order, &mut cursor) else {
                break;
            };
            if first_move.is_none() {
                first_move = Some(destination);
            }
            self.advance(&mut state, destination);
        }

        RolloutResult {
            first_move: first_move.unwrap_or_else(|| query::defender(world)),
            score: query::current_score(&state),
        }
    }

    fn free_roam_destination(&mut self, defender: Point) -> Point {
        let distance = f64::from(self.rng.gen_range(0..=DEFENDER_SPEED));
        let angle = self.rng.gen_range(0.0..360.0_f64).to_radians();
        let offset_x = (distance * angle.cos()) as i32;
        let offset_y = (distance * angle.sin()) as i32;
        let destination = Point::new(defender.x() + offset_x, defender.y() + offset_y);
        destination.clamp_to_map()
    }

    fn advance(&mut self, state: &mut World, destination: Point) {
        self.events.clear();
        world::apply(
            state,
            Command::AdvanceTurn { destination },
            &mut self.events,
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RolloutResult {
    first_move: Point,
    score: u64,
}

/// Strictly greater scores win; ties keep the incumbent.
fn improves(candidate: &RolloutResult, incumbent: &RolloutResult) -> bool {
    candidate.score > incumbent.score
}

/// Skips dead hunters at the front of the kill order and returns the position
/// of the next live one.
fn next_focus(state: &World, kill_order: &[HunterId], cursor: &mut usize) -> Option<Point> {
    while let Some(&hunter) = kill_order.get(*cursor) {
        if let Some(position) = query::hunter_position(state, hunter) {
            return Some(position);
        }
        *cursor += 1;
    }
    None
}
