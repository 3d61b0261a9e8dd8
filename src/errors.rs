//! The canonical error type returned by the rule engine and the game
//! orchestration layer.

use crate::point::Point;
use crate::rules::ForbiddenKind;
use std::error::Error;
use std::fmt;

/// Unified error type for the crate.
///
/// `OutOfBounds`, `InvalidArgument` and `NoLegalMove` are raised by the core
/// engine; `ForbiddenMove` is the game layer refusing a stone on a cell the
/// advanced rules deny to the restricted side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A coordinate lies outside `[1, N] x [1, N]`. Never silently clamped.
    OutOfBounds(Point),

    /// Caller contract violation, e.g. classifying an occupied cell or
    /// placing after the game ended. The payload describes the violation.
    InvalidArgument(String),

    /// `best_move` found no empty, non-forbidden cell. A legitimate
    /// end-of-game condition, not a bug; callers should check game status.
    NoLegalMove,

    /// The cell is denied to the restricted side, with the rule it breaks.
    ForbiddenMove(Point, ForbiddenKind),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::OutOfBounds(pos) => write!(f, "position {} is outside the board", pos),
            RuleError::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            RuleError::NoLegalMove => write!(f, "no empty and legal cell remains"),
            RuleError::ForbiddenMove(pos, kind) => {
                write!(f, "position {} breaks the {} rule", pos, kind)
            }
        }
    }
}

impl Error for RuleError {}
