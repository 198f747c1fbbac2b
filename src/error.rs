//! Error types for the deduction engine

use thiserror::Error;

/// Errors raised while turning game knowledge into clauses and solving them
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeductionError {
    /// The compiled clauses admit no model: the accumulated knowledge contradicts itself
    #[error("accumulated knowledge is contradictory, no card assignment satisfies it")]
    Unsolvable,

    /// Only atomic events may be compiled with `rhs = 0`
    #[error("cannot compile the negation of composite event {0}")]
    IllegalNegation(String),

    #[error("composite event members must be atomic, found {0}")]
    NestedComposite(String),

    #[error("proposition '{0}' is outside the known holder/card universe")]
    UnknownProposition(String),

    #[error("no log entry exists for turn {0}")]
    UnknownTurn(usize),

    /// Reveals may only be appended to the most recent turn
    #[error("turn {turn} is closed, only turn {open} accepts reveals")]
    TurnClosed { turn: usize, open: usize },

    #[error("expected a log entry for turn {expected}, got turn {got}")]
    TurnOutOfOrder { expected: usize, got: usize },

    #[error("{0} cannot answer its own guess")]
    SelfReveal(String),

    #[error("turn {0} has no guess to interpret a pass or hidden reveal against")]
    MissingGuess(usize),

    #[error("cannot require exactly {k} true literals out of {n}")]
    Cardinality { k: usize, n: usize },

    #[error("cannot add an empty clause")]
    EmptyClause,

    #[error("solver model holds {count} case-file cards in category {category}")]
    AmbiguousModel { category: String, count: usize },
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, DeductionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DeductionError::TurnClosed { turn: 2, open: 4 };
        assert_eq!(err.to_string(), "turn 2 is closed, only turn 4 accepts reveals");

        let err = DeductionError::Cardinality { k: 5, n: 3 };
        assert!(err.to_string().contains("exactly 5"));
    }
}
