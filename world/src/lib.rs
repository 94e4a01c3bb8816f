#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Last Stand.
//!
//! The [`World`] owns the defender, the live targets and the live hunters
//! together with the accumulated score. [`apply`] is the single entry point
//! that mutates it; one [`Command::AdvanceTurn`] runs the four sub-steps of a
//! turn in their fixed order: hunter movement, defender movement, shooting and
//! consumption.

mod combat;
mod hunters;

use last_stand_core::{
    Command, Event, HunterId, HunterSnapshot, Point, TargetId, TargetSnapshot, WorldSnapshot,
    DEFENDER_SPEED,
};

/// Neutral unit chased by hunters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    id: TargetId,
    position: Point,
}

impl Target {
    /// Identifier assigned by the feed.
    #[must_use]
    pub const fn id(&self) -> TargetId {
        self.id
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }
}

/// Adversarial unit destroyed by the defender's weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hunter {
    id: HunterId,
    position: Point,
}

impl Hunter {
    /// Identifier assigned by the feed.
    #[must_use]
    pub const fn id(&self) -> HunterId {
        self.id
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }
}

/// Represents the authoritative Last Stand world state.
///
/// Cloning produces a fully independent copy, which is how the rollout search
/// explores hypothetical futures.
#[derive(Clone, Debug, Default)]
pub struct World {
    defender: Point,
    targets: Vec<Target>,
    hunters: Vec<Hunter>,
    score: u64,
    turn: u32,
}

impl World {
    /// Creates an empty world with the defender at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world populated from the provided snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        let mut world = Self::new();
        world.load(snapshot);
        world
    }

    fn load(&mut self, snapshot: &WorldSnapshot) {
        self.defender = snapshot.defender;
        self.targets = snapshot
            .targets
            .iter()
            .map(|target| Target {
                id: target.id,
                position: target.position,
            })
            .collect();
        self.hunters = snapshot
            .hunters
            .iter()
            .map(|hunter| Hunter {
                id: hunter.id,
                position: hunter.position,
            })
            .collect();
        self.score = 0;
        self.turn = 0;
    }

    fn advance(&mut self, destination: Point, out_events: &mut Vec<Event>) {
        self.turn = self.turn.saturating_add(1);

        hunters::advance_hunters(&mut self.hunters, &self.targets, self.defender, out_events);

        let from = self.defender;
        self.defender = from.move_toward(destination, DEFENDER_SPEED);
        out_events.push(Event::DefenderAdvanced {
            from,
            to: self.defender,
        });

        let awarded = combat::resolve_shots(
            &mut self.hunters,
            self.defender,
            self.targets.len(),
            out_events,
        );
        self.score = self.score.saturating_add(awarded);

        self.consume_targets(out_events);

        out_events.push(Event::TurnResolved {
            turn: self.turn,
            score: query::current_score(self),
        });
    }

    fn consume_targets(&mut self, out_events: &mut Vec<Event>) {
        let hunters = &self.hunters;
        self.targets.retain(|target| {
            let reached = hunters
                .iter()
                .any(|hunter| hunter.position == target.position);
            if reached {
                out_events.push(Event::TargetConsumed {
                    target: target.id,
                    position: target.position,
                });
            }
            !reached
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadSnapshot { snapshot } => {
            world.load(&snapshot);
            out_events.push(Event::SnapshotLoaded {
                targets: world.targets.len(),
                hunters: world.hunters.len(),
            });
        }
        Command::AdvanceTurn { destination } => world.advance(destination, out_events),
    }
}

/// Returns the world that results from playing one turn toward `destination`.
///
/// The input is left untouched.
#[must_use]
pub fn simulate_turn(world: &World, destination: Point) -> World {
    let mut next = world.clone();
    let mut events = Vec::new();
    apply(&mut next, Command::AdvanceTurn { destination }, &mut events);
    next
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use last_stand_core::{HunterId, Point, WorldSnapshot};

    use super::{Hunter, HunterSnapshot, Target, TargetSnapshot, World};

    /// Current defender position.
    #[must_use]
    pub fn defender(world: &World) -> Point {
        world.defender
    }

    /// Live targets in insertion order.
    #[must_use]
    pub fn targets(world: &World) -> &[Target] {
        &world.targets
    }

    /// Live hunters in insertion order.
    #[must_use]
    pub fn hunters(world: &World) -> &[Hunter] {
        &world.hunters
    }

    /// Position of the hunter with the provided identifier, if it is still alive.
    #[must_use]
    pub fn hunter_position(world: &World, hunter: HunterId) -> Option<Point> {
        world
            .hunters
            .iter()
            .find(|candidate| candidate.id == hunter)
            .map(|candidate| candidate.position)
    }

    /// Externally reported score: zero once every target is gone, otherwise
    /// the accumulated score.
    #[must_use]
    pub fn current_score(world: &World) -> u64 {
        if world.targets.is_empty() {
            0
        } else {
            world.score
        }
    }

    /// Raw score accumulated since the last snapshot load.
    #[must_use]
    pub fn accumulated_score(world: &World) -> u64 {
        world.score
    }

    /// Number of turns simulated since the last snapshot load.
    #[must_use]
    pub fn turn(world: &World) -> u32 {
        world.turn
    }

    /// Reports whether the game is over: no target left to protect or no hunter left to shoot.
    #[must_use]
    pub fn is_terminal(world: &World) -> bool {
        world.targets.is_empty() || world.hunters.is_empty()
    }

    /// Exports the current entities in insertion order.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            defender: world.defender,
            targets: world
                .targets
                .iter()
                .map(|target| TargetSnapshot {
                    id: target.id,
                    position: target.position,
                })
                .collect(),
            hunters: world
                .hunters
                .iter()
                .map(|hunter| HunterSnapshot {
                    id: hunter.id,
                    position: hunter.position,
                })
                .collect(),
        }
    }
}
