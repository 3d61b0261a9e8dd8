pub mod board;
pub mod errors;
pub mod game;
pub mod heuristic;
pub mod point;
pub mod rules;
pub mod scan;
pub mod selfplay;

pub use board::{Board, Side, StoneSet};
pub use errors::RuleError;
pub use game::{Game, GameStatus, RuleSet};
pub use point::Point;
pub use rules::ForbiddenKind;
