#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Last Stand decision agent.
//!
//! This crate defines the geometry, fixed physics constants and message
//! surface that connect the feed adapter, the authoritative world and the
//! rollout search. Adapters submit [`Command`] values describing the turn to
//! play, the world executes those commands via its `apply` entry point, and
//! then reports [`Event`] values describing every movement, kill and
//! consumption that occurred during the turn.

use serde::{Deserialize, Serialize};

/// Width of the playing field in world units. Valid x coordinates are `0..MAP_WIDTH`.
pub const MAP_WIDTH: i32 = 16_000;

/// Height of the playing field in world units. Valid y coordinates are `0..MAP_HEIGHT`.
pub const MAP_HEIGHT: i32 = 9_000;

/// Distance the defender covers in a single turn.
pub const DEFENDER_SPEED: i32 = 1_000;

/// Distance a hunter covers in a single turn.
pub const HUNTER_SPEED: i32 = 400;

/// Reach of the defender's weapon measured from its post-move position.
pub const WEAPON_RANGE: i32 = 2_000;

/// Points awarded per kill before the target-count and combo factors apply.
pub const SCORE_BASE_UNIT: u64 = 10;

/// Squared weapon reach, used for range comparisons without square roots.
pub const WEAPON_RANGE_SQUARED: i64 = WEAPON_RANGE as i64 * WEAPON_RANGE as i64;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces every entity with the provided snapshot and clears the score.
    LoadSnapshot {
        /// Entities observed on the external feed for the current turn.
        snapshot: WorldSnapshot,
    },
    /// Advances the world by exactly one turn.
    AdvanceTurn {
        /// Location the defender heads toward during the turn.
        destination: Point,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a snapshot replaced the world's entities.
    SnapshotLoaded {
        /// Number of live targets after loading.
        targets: usize,
        /// Number of live hunters after loading.
        hunters: usize,
    },
    /// Reports the movement of a single hunter.
    HunterAdvanced {
        /// Identifier of the hunter that moved.
        hunter: HunterId,
        /// Position occupied before the move.
        from: Point,
        /// Position occupied after the move.
        to: Point,
        /// Entity the hunter was chasing this turn.
        quarry: Quarry,
    },
    /// Reports the movement of the defender.
    DefenderAdvanced {
        /// Position occupied before the move.
        from: Point,
        /// Position occupied after the move.
        to: Point,
    },
    /// Reports that the defender's weapon destroyed a hunter.
    HunterDestroyed {
        /// Identifier of the destroyed hunter.
        hunter: HunterId,
        /// Position the hunter occupied when it was hit.
        position: Point,
        /// Zero-based kill order within the turn.
        combo_index: u32,
        /// Points awarded for this kill.
        points: u64,
    },
    /// Reports that a hunter reached and consumed a target.
    TargetConsumed {
        /// Identifier of the consumed target.
        target: TargetId,
        /// Position shared by the target and the hunter that consumed it.
        position: Point,
    },
    /// Closes a turn and reports the externally observable score.
    TurnResolved {
        /// One-based number of turns simulated since the last snapshot load.
        turn: u32,
        /// Score as reported by `current_score` after the turn.
        score: u64,
    },
}

/// Entity a hunter pursues during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quarry {
    /// The nearest live target.
    Target(TargetId),
    /// The defender, chosen when it is strictly closer than every target.
    Defender,
}

/// Unique identifier assigned to a target by the external feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(u32);

impl TargetId {
    /// Creates a new target identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a hunter by the external feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HunterId(u32);

impl HunterId {
    /// Creates a new hunter identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location on the playing field expressed in integer world units.
///
/// Ordering is lexicographic on `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Squared Euclidean distance, exact for every pair of `i32` coordinates.
    #[must_use]
    pub const fn distance_squared(self, other: Point) -> i64 {
        let dx = other.x as i64 - self.x as i64;
        let dy = other.y as i64 - self.y as i64;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Moves toward `destination` by at most `speed` units.
    ///
    /// Lands exactly on `destination` when it is within reach. Otherwise each
    /// axis advances by `delta * speed / distance`, truncated toward zero.
    /// Multiplying before dividing keeps integral steps exact.
    #[must_use]
    pub fn move_toward(self, destination: Point, speed: i32) -> Point {
        let reach = i64::from(speed) * i64::from(speed);
        let distance_squared = self.distance_squared(destination);
        if distance_squared <= reach {
            return destination;
        }

        let distance = (distance_squared as f64).sqrt();
        let speed = f64::from(speed);
        let dx = f64::from(destination.x) - f64::from(self.x);
        let dy = f64::from(destination.y) - f64::from(self.y);
        Point::new(
            self.x + (dx * speed / distance) as i32,
            self.y + (dy * speed / distance) as i32,
        )
    }

    /// Clamps the point into the playing field.
    #[must_use]
    pub fn clamp_to_map(self) -> Point {
        Point::new(
            self.x.clamp(0, MAP_WIDTH - 1),
            self.y.clamp(0, MAP_HEIGHT - 1),
        )
    }
}

/// Escalating per-kill multipliers: 1, 2, 3, 5, 8, 13, …
///
/// Each term is the sum of the two preceding ones. Terms saturate at
/// `u64::MAX` instead of overflowing, so the iterator never ends.
#[derive(Clone, Debug)]
pub struct ComboSequence {
    current: u64,
    next: u64,
}

impl ComboSequence {
    /// Starts the sequence at the first kill of a turn.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: 1,
            next: 2,
        }
    }
}

impl Default for ComboSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ComboSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let value = self.current;
        self.current = self.next;
        self.next = value.saturating_add(self.next);
        Some(value)
    }
}

/// Returns the combo multiplier applied to the kill with the given zero-based index.
#[must_use]
pub fn combo_multiplier(index: usize) -> u64 {
    ComboSequence::new().nth(index).unwrap_or(u64::MAX)
}

/// Points awarded for a single kill.
#[must_use]
pub fn kill_points(live_targets: usize, combo_index: usize) -> u64 {
    let targets = u64::try_from(live_targets).unwrap_or(u64::MAX);
    targets
        .saturating_mul(targets)
        .saturating_mul(SCORE_BASE_UNIT)
        .saturating_mul(combo_multiplier(combo_index))
}

/// Target observed on the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSnapshot {
    /// Identifier assigned by the feed.
    pub id: TargetId,
    /// Current position.
    pub position: Point,
}

/// Hunter observed on the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HunterSnapshot {
    /// Identifier assigned by the feed.
    pub id: HunterId,
    /// Current position.
    pub position: Point,
}

/// Complete description of a game position, in feed order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Defender position.
    pub defender: Point,
    /// Live targets in insertion order.
    pub targets: Vec<TargetSnapshot>,
    /// Live hunters in insertion order.
    pub hunters: Vec<HunterSnapshot>,
}
