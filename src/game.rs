//! Game orchestration: turn keeping, placement, undo, reset, and the two
//! automated movers (random and heuristic). The rule engine itself lives in
//! [`crate::rules`] and [`crate::heuristic`].

use crate::board::{Board, Side};
use crate::errors::RuleError;
use crate::heuristic;
use crate::point::Point;
use crate::rules::ForbiddenKind;
use log::debug;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum GameStatus {
    InProgress,
    BlackWon,
    WhiteWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Which rules govern the match. `Renju` enables the advanced rule set:
/// black may not play double-threes, double-fours or overlines.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum RuleSet {
    Freestyle,
    Renju,
}

impl RuleSet {
    fn restricts(self, side: Side) -> bool {
        self == RuleSet::Renju && side == Side::Black
    }
}

/// One match: the board, whose turn it is, the game status, and the cached
/// forbidden-cell map for the side to move. Every mutation goes through
/// this type; the rule engine assumes exclusive access during a call.
pub struct Game {
    board: Board,
    turn: Side,
    status: GameStatus,
    rule_set: RuleSet,
    forbidden: HashMap<Point, ForbiddenKind>,
    winning_chain: Vec<Point>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(crate::board::DEFAULT_BOARD_SIZE, RuleSet::Freestyle)
            .expect("default game configuration is valid")
    }
}

impl Game {
    /// The rule set is fixed for the lifetime of the game, mirroring the
    /// constraint that rules may not change once stones are down.
    pub fn new(size: i32, rule_set: RuleSet) -> Result<Self, RuleError> {
        Ok(Self {
            board: Board::new(size)?,
            turn: Side::Black,
            status: GameStatus::InProgress,
            rule_set,
            forbidden: HashMap::new(),
            winning_chain: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    /// Forbidden cells for the side currently to move. Empty unless the
    /// advanced rules restrict that side.
    pub fn forbidden(&self) -> &HashMap<Point, ForbiddenKind> {
        &self.forbidden
    }

    /// The winning chain once a side has won, in spatial order.
    pub fn winning_chain(&self) -> &[Point] {
        &self.winning_chain
    }

    /// Places a stone for the side to move and advances the game state.
    /// Returns the status after the move.
    pub fn place(&mut self, pos: Point) -> Result<GameStatus, RuleError> {
        if self.status.is_over() {
            return Err(RuleError::InvalidArgument(
                "the game is already over".to_string(),
            ));
        }
        if let Some(kind) = self.forbidden.get(&pos) {
            return Err(RuleError::ForbiddenMove(pos, *kind));
        }

        let mover = self.turn;
        self.board.put(mover, pos)?;
        debug!("{:?} placed at {}", mover, pos);
        self.update_status(pos)?;
        Ok(self.status)
    }

    /// Win check, draw check, turn flip and forbidden-map refresh after a
    /// real placement by the current side.
    fn update_status(&mut self, last: Point) -> Result<(), RuleError> {
        let mover = self.turn;
        if let Some(chain) = self.board.check_win(mover, last)? {
            self.winning_chain = chain;
            self.status = match mover {
                Side::Black => GameStatus::BlackWon,
                Side::White => GameStatus::WhiteWon,
            };
            // the turn still flips so that undo can walk back uniformly
            self.turn = !self.turn;
            self.forbidden.clear();
            return Ok(());
        }

        self.turn = !self.turn;
        if self.board.is_full() {
            self.status = GameStatus::Draw;
            self.forbidden.clear();
            return Ok(());
        }

        self.refresh_forbidden()?;
        if self.rule_set.restricts(self.turn) {
            let empty = (self.board.size() * self.board.size()) as usize - self.board.stone_count();
            if self.forbidden.len() == empty {
                // the restricted side has nowhere legal to play
                self.status = GameStatus::Draw;
            }
        }
        Ok(())
    }

    fn refresh_forbidden(&mut self) -> Result<(), RuleError> {
        if self.rule_set.restricts(self.turn) && !self.status.is_over() {
            self.forbidden = self.board.forbidden_moves()?;
        } else {
            self.forbidden.clear();
        }
        Ok(())
    }

    /// Takes back the most recent stone. A no-op when nothing has been
    /// played yet; otherwise also clears any terminal status.
    pub fn undo(&mut self) -> Result<(), RuleError> {
        let previous = !self.turn;
        if self.board.stones(previous).is_empty() {
            return Ok(());
        }
        self.board.stones_mut(previous).pop_last();
        self.turn = previous;
        self.status = GameStatus::InProgress;
        self.winning_chain.clear();
        self.refresh_forbidden()
    }

    /// Starts over: both stone sets emptied, black to move.
    pub fn reset(&mut self) {
        self.board.stones_mut(Side::Black).clear();
        self.board.stones_mut(Side::White).clear();
        self.turn = Side::Black;
        self.status = GameStatus::InProgress;
        self.forbidden.clear();
        self.winning_chain.clear();
    }

    /// Places on a uniformly random empty, non-forbidden cell.
    pub fn place_random(&mut self) -> Result<(Point, GameStatus), RuleError> {
        if self.status.is_over() {
            return Err(RuleError::InvalidArgument(
                "the game is already over".to_string(),
            ));
        }
        let choices: Vec<Point> = self
            .board
            .empty_cells()
            .into_iter()
            .filter(|pos| !self.forbidden.contains_key(pos))
            .collect();
        let pos = *choices
            .choose(&mut rand::thread_rng())
            .ok_or(RuleError::NoLegalMove)?;
        let status = self.place(pos)?;
        Ok((pos, status))
    }

    /// Plays the heuristic's choice for the side to move.
    pub fn engine_move(&mut self) -> Result<(Point, GameStatus), RuleError> {
        if self.status.is_over() {
            return Err(RuleError::InvalidArgument(
                "the game is already over".to_string(),
            ));
        }
        let forbidden = if self.rule_set.restricts(self.turn) {
            Some(&self.forbidden)
        } else {
            None
        };
        let pos = heuristic::best_move(
            self.board.size(),
            self.board.stones(self.turn),
            self.board.stones(!self.turn),
            forbidden,
        )?;
        let status = self.place(pos)?;
        Ok((pos, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_moves_first_and_turns_alternate() {
        let mut game = Game::default();
        assert_eq!(game.turn(), Side::Black);
        game.place(Point::new(8, 8)).unwrap();
        assert_eq!(game.turn(), Side::White);
        game.place(Point::new(8, 9)).unwrap();
        assert_eq!(game.turn(), Side::Black);
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut game = Game::default();
        game.place(Point::new(8, 8)).unwrap();
        let result = game.place(Point::new(8, 8));
        assert!(matches!(result, Err(RuleError::InvalidArgument(_))));
    }

    #[test]
    fn five_in_a_row_ends_the_game() {
        let mut game = Game::default();
        // black builds a horizontal five, white plays far away
        for k in 0..4 {
            game.place(Point::new(3 + k, 3)).unwrap();
            game.place(Point::new(3 + k, 12)).unwrap();
        }
        let status = game.place(Point::new(7, 3)).unwrap();
        assert_eq!(status, GameStatus::BlackWon);
        assert_eq!(game.winning_chain().len(), 5);
        assert!(game.place(Point::new(1, 1)).is_err());
    }

    #[test]
    fn undo_restores_turn_status_and_chain() {
        let mut game = Game::default();
        for k in 0..4 {
            game.place(Point::new(3 + k, 3)).unwrap();
            game.place(Point::new(3 + k, 12)).unwrap();
        }
        game.place(Point::new(7, 3)).unwrap();
        assert!(game.status().is_over());

        game.undo().unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.turn(), Side::Black);
        assert!(game.winning_chain().is_empty());
        assert!(game.board().is_cell_empty(Point::new(7, 3)));
    }

    #[test]
    fn undo_on_fresh_game_is_a_noop() {
        let mut game = Game::default();
        game.undo().unwrap();
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.board().stone_count(), 0);
    }

    #[test]
    fn forbidden_cell_click_is_rejected_and_leaves_board_intact() {
        let mut game = Game::new(15, RuleSet::Renju).unwrap();
        // two crossing open twos grow into a double-three at (8,8):
        // black (7,8),(6,8) horizontally and (8,7),(8,6) vertically
        let moves = [
            (Point::new(7, 8), Point::new(1, 1)),
            (Point::new(6, 8), Point::new(1, 2)),
            (Point::new(8, 7), Point::new(1, 3)),
            (Point::new(8, 6), Point::new(1, 4)),
        ];
        for (black, white) in moves {
            game.place(black).unwrap();
            game.place(white).unwrap();
        }
        assert_eq!(game.turn(), Side::Black);
        let kind = game.forbidden().get(&Point::new(8, 8)).copied();
        assert_eq!(kind, Some(ForbiddenKind::DoubleThree));

        let stones_before = game.board().stone_count();
        let result = game.place(Point::new(8, 8));
        assert!(matches!(result, Err(RuleError::ForbiddenMove(_, _))));
        assert_eq!(game.board().stone_count(), stones_before);
        assert_eq!(game.turn(), Side::Black);
    }

    #[test]
    fn reset_clears_everything() {
        let mut game = Game::default();
        game.place(Point::new(8, 8)).unwrap();
        game.place(Point::new(9, 9)).unwrap();
        game.reset();
        assert_eq!(game.board().stone_count(), 0);
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn random_and_engine_moves_only_use_legal_cells() {
        let mut game = Game::new(15, RuleSet::Renju).unwrap();
        for _ in 0..6 {
            if game.status().is_over() {
                break;
            }
            let (pos, _) = game.place_random().unwrap();
            assert!(game.board().stone_at(pos).is_some());
        }
        if !game.status().is_over() {
            let (pos, _) = game.engine_move().unwrap();
            assert!(game.board().stone_at(pos).is_some());
        }
    }
}
