//! Time source and per-turn deadline used to bound the search.

use std::time::{Duration, Instant};

/// Monotonic time source polled between rollouts.
pub trait Clock {
    /// Returns the current instant.
    fn now(&mut self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Wall-clock instant by which a decision must be returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    /// Creates a deadline that expires at the provided instant.
    #[must_use]
    pub const fn at(expires_at: Instant) -> Self {
        Self { expires_at }
    }

    /// Creates a deadline `budget` after `start`.
    ///
    /// A budget too large to represent expires at `start`.
    #[must_use]
    pub fn after(start: Instant, budget: Duration) -> Self {
        Self::at(start.checked_add(budget).unwrap_or(start))
    }

    /// Reports whether the deadline has been reached at `now`.
    #[must_use]
    pub fn has_passed(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_passes_at_expiry() {
        let start = Instant::now();
        let deadline = Deadline::after(start, Duration::from_millis(50));

        assert!(!deadline.has_passed(start));
        assert!(!deadline.has_passed(start + Duration::from_millis(49)));
        assert!(deadline.has_passed(start + Duration::from_millis(50)));
        assert!(deadline.has_passed(start + Duration::from_millis(80)));
    }

    #[test]
    fn unrepresentable_budget_expires_at_start() {
        let start = Instant::now();
        let deadline = Deadline::after(start, Duration::MAX);

        assert_eq!(deadline, Deadline::at(start));
        assert!(deadline.has_passed(start));
    }
}
