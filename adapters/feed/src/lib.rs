#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text protocol adapter: per-turn feed parsing and decision rendering.
//!
//! Each turn arrives as whitespace-separated integers: the defender position,
//! a target count followed by `id x y` triples, then a hunter count followed
//! by `id x y next_x next_y` quintuples. Line breaks carry no meaning beyond
//! separating tokens.

mod decision;

pub use decision::Decision;

use std::{collections::VecDeque, io::BufRead, num::ParseIntError, str::FromStr};

use last_stand_core::{HunterId, HunterSnapshot, Point, TargetId, TargetSnapshot, WorldSnapshot};
use thiserror::Error;
use tracing::trace;

/// Errors raised while reading the per-turn feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The underlying reader failed.
    #[error("failed to read from the feed")]
    Io(#[from] std::io::Error),
    /// The feed closed in the middle of a turn.
    #[error("feed closed while reading {field}")]
    Truncated {
        /// Field that was expected next.
        field: &'static str,
    },
    /// A token could not be parsed as the expected integer.
    #[error("expected an integer for {field}, found '{token}'")]
    InvalidInteger {
        /// Field being parsed.
        field: &'static str,
        /// Offending token.
        token: String,
        /// Parser failure.
        #[source]
        source: ParseIntError,
    },
}

/// Position the feed predicts a hunter will occupy after the coming turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HunterForecast {
    /// Hunter the forecast refers to.
    pub hunter: HunterId,
    /// Predicted position after the hunter's next move.
    pub next: Point,
}

/// Everything the feed reports for a single turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnInput {
    /// Current entities.
    pub snapshot: WorldSnapshot,
    /// Externally predicted hunter positions, in feed order.
    pub forecasts: Vec<HunterForecast>,
}

/// Incremental reader that yields one [`TurnInput`] per turn.
#[derive(Debug)]
pub struct FeedReader<R> {
    reader: R,
    pending: VecDeque<String>,
    line: String,
}

impl<R: BufRead> FeedReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    /// Reads the next turn.
    ///
    /// Returns `Ok(None)` when the feed closes cleanly between turns.
    pub fn next_turn(&mut self) -> Result<Option<TurnInput>, FeedError> {
        let Some(first) = self.next_token()? else {
            return Ok(None);
        };

        let defender = Point::new(
            parse_integer(first, "defender x")?,
            self.read_integer("defender y")?,
        );

        let target_count: usize = self.read_integer("target count")?;
        let mut targets = Vec::with_capacity(target_count);
        for _ in 0..target_count {
            let id = TargetId::new(self.read_integer("target id")?);
            let x = self.read_integer("target x")?;
            let y = self.read_integer("target y")?;
            targets.push(TargetSnapshot {
                id,
                position: Point::new(x, y),
            });
        }

        let hunter_count: usize = self.read_integer("hunter count")?;
        let mut hunters = Vec::with_capacity(hunter_count);
        let mut forecasts = Vec::with_capacity(hunter_count);
        for _ in 0..hunter_count {
            let id = HunterId::new(self.read_integer("hunter id")?);
            let x = self.read_integer("hunter x")?;
            let y = self.read_integer("hunter y")?;
            let next_x = self.read_integer("hunter next x")?;
            let next_y = self.read_integer("hunter next y")?;
            hunters.push(HunterSnapshot {
                id,
                position: Point::new(x, y),
            });
            forecasts.push(HunterForecast {
                hunter: id,
                next: Point::new(next_x, next_y),
            });
        }

        trace!(
            targets = targets.len(),
            hunters = hunters.len(),
            "turn parsed from feed"
        );

        Ok(Some(TurnInput {
            snapshot: WorldSnapshot {
                defender,
                targets,
                hunters,
            },
            forecasts,
        }))
    }

    fn next_token(&mut self) -> Result<Option<String>, FeedError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }

    fn read_integer<T>(&mut self, field: &'static str) -> Result<T, FeedError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let token = self.next_token()?.ok_or(FeedError::Truncated { field })?;
        parse_integer(token, field)
    }
}

fn parse_integer<T>(token: String, field: &'static str) -> Result<T, FeedError>
where
    T: FromStr<Err = ParseIntError>,
{
    match token.parse() {
        Ok(value) => Ok(value),
        Err(source) => Err(FeedError::InvalidInteger {
            field,
            token,
            source,
        }),
    }
}
