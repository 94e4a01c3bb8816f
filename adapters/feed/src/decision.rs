//! Decision line sent back to the external sink.

use std::fmt;

use last_stand_core::Point;

/// Destination chosen for the current turn, optionally followed by a free-form annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    destination: Point,
    annotation: Option<String>,
}

impl Decision {
    /// Creates a decision without annotation.
    #[must_use]
    pub const fn new(destination: Point) -> Self {
        Self {
            destination,
            annotation: None,
        }
    }

    /// Attaches an annotation rendered after the coordinates.
    ///
    /// Line breaks are replaced by spaces so the decision stays on one line.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        let annotation: String = annotation.into().replace(['\r', '\n'], " ");
        self.annotation = if annotation.trim().is_empty() {
            None
        } else {
            Some(annotation)
        };
        self
    }

    /// Destination the defender heads toward.
    #[must_use]
    pub const fn destination(&self) -> Point {
        self.destination
    }

    /// Optional annotation.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.destination.x(), self.destination.y())?;
        if let Some(annotation) = &self.annotation {
            write!(f, " {annotation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decision_renders_two_integers() {
        let decision = Decision::new(Point::new(9_707, 5_207));
        assert_eq!(decision.to_string(), "9707 5207");
    }

    #[test]
    fn annotation_follows_coordinates_on_one_line() {
        let decision = Decision::new(Point::new(1, 2)).with_annotation("score 40\nnext");
        assert_eq!(decision.to_string(), "1 2 score 40 next");
    }

    #[test]
    fn blank_annotation_is_dropped() {
        let decision = Decision::new(Point::new(1, 2)).with_annotation("  ");
        assert_eq!(decision.annotation(), None);
        assert_eq!(decision.to_string(), "1 2");
    }
}
