use std::fmt;

use crate::source::Location;

/// Why a pattern did not match an instruction, and which part of the pattern is to blame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
    /// Human-readable reason
    pub reason: String,
    /// Location of the offending pattern text
    pub location: Location,
}

impl MatchFailure {
    /// Creates a new failure.
    pub fn new(reason: impl Into<String>, location: Location) -> Self {
        Self {
            reason: reason.into(),
            location,
        }
    }
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.reason, self.location)
    }
}

/// The result of matching one instruction pattern against one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The instruction does not satisfy the pattern
    NoMatch(MatchFailure),
    /// Positive match consuming one instruction
    Continue,
    /// Positive match consuming one instruction
    Break,
    /// Repeatable match that may consume any number of instructions, including none
    Greedy,
}

impl MatchOutcome {
    /// Shorthand for a [`MatchOutcome::NoMatch`].
    pub fn no_match(reason: impl Into<String>, location: Location) -> Self {
        MatchOutcome::NoMatch(MatchFailure::new(reason, location))
    }

    /// Returns true for every outcome except [`MatchOutcome::NoMatch`].
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch(_))
    }

    /// Returns true for [`MatchOutcome::Greedy`].
    #[must_use]
    pub fn is_greedy(&self) -> bool {
        matches!(self, MatchOutcome::Greedy)
    }
}

/// Returns early from a matcher with the outcome unless it is a match.
macro_rules! require_match {
    ($outcome:expr) => {
        match $outcome {
            outcome @ crate::pattern::MatchOutcome::NoMatch(_) => return Ok(outcome),
            _ => {}
        }
    };
}

pub(crate) use require_match;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(MatchOutcome::Break.is_match());
        assert!(MatchOutcome::Continue.is_match());
        assert!(MatchOutcome::Greedy.is_match());
        assert!(MatchOutcome::Greedy.is_greedy());
        assert!(!MatchOutcome::Break.is_greedy());

        let failed = MatchOutcome::no_match("Opcode mismatch", Location::default());
        assert!(!failed.is_match());
        match failed {
            MatchOutcome::NoMatch(failure) => assert_eq!(failure.to_string(), "Opcode mismatch at 0:0"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
