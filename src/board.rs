use crate::errors::RuleError;
use crate::point::Point;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_BOARD_SIZE: i32 = 15;

/// The two sides of the game. Black moves first and is the side the
/// advanced rule set restricts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        self.opposite()
    }
}

/// The stones of one side, in placement order. Append-only except for undo,
/// which removes the most recent stone. Membership is by coordinate value.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize)]
pub struct StoneSet(Vec<Point>);

impl StoneSet {
    pub fn contains(&self, pos: Point) -> bool {
        self.0.contains(&pos)
    }

    pub fn push(&mut self, pos: Point) {
        self.0.push(pos);
    }

    /// Removes and returns the most recently placed stone.
    pub fn pop_last(&mut self) -> Option<Point> {
        self.0.pop()
    }

    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// The board proper: a side length and the two disjoint stone sets.
/// Turn-keeping and game status live in [`crate::game::Game`]; this type
/// only answers occupancy questions and hosts the rule scans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: i32,
    pub(crate) black: StoneSet,
    pub(crate) white: StoneSet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE).expect("default board size is valid")
    }
}

impl Board {
    /// Creates an empty board. The side length must be an odd number
    /// in 7..=19.
    pub fn new(size: i32) -> Result<Self, RuleError> {
        if !(7..=19).contains(&size) || size % 2 == 0 {
            return Err(RuleError::InvalidArgument(format!(
                "board size must be an odd number in 7..=19, got {}",
                size
            )));
        }
        Ok(Self {
            size,
            black: StoneSet::default(),
            white: StoneSet::default(),
        })
    }

    /// Builds a board from a row-major grid of cell values: 0 blank,
    /// 1 black, 2 white. The slice length must be `size * size`.
    /// Stones enter the sets in scan order, so tests that care about the
    /// "most recent" stone pass it explicitly to the win check.
    pub fn from_row_slice(size: i32, cells: &[u8]) -> Result<Self, RuleError> {
        let mut board = Self::new(size)?;
        if cells.len() != (size * size) as usize {
            return Err(RuleError::InvalidArgument(format!(
                "expected {} cells, got {}",
                size * size,
                cells.len()
            )));
        }
        for (index, value) in cells.iter().enumerate() {
            let pos = Point::new(index as i32 % size + 1, index as i32 / size + 1);
            match value {
                0 => {}
                1 => board.black.push(pos),
                2 => board.white.push(pos),
                _ => {
                    return Err(RuleError::InvalidArgument(format!(
                        "unexpected cell value {} at {}",
                        value, pos
                    )))
                }
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        (1..=self.size).contains(&pos.x) && (1..=self.size).contains(&pos.y)
    }

    pub fn stones(&self, side: Side) -> &StoneSet {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    pub(crate) fn stones_mut(&mut self, side: Side) -> &mut StoneSet {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    /// Low-level stone placement for setting up positions; game flow with
    /// turn keeping belongs to [`crate::game::Game`].
    pub fn put(&mut self, side: Side, pos: Point) -> Result<(), RuleError> {
        if !self.in_bounds(pos) {
            return Err(RuleError::OutOfBounds(pos));
        }
        if !self.is_cell_empty(pos) {
            return Err(RuleError::InvalidArgument(format!(
                "cell {} is already occupied",
                pos
            )));
        }
        self.stones_mut(side).push(pos);
        Ok(())
    }

    pub fn stone_at(&self, pos: Point) -> Option<Side> {
        if self.black.contains(pos) {
            Some(Side::Black)
        } else if self.white.contains(pos) {
            Some(Side::White)
        } else {
            None
        }
    }

    pub fn is_cell_empty(&self, pos: Point) -> bool {
        self.stone_at(pos).is_none()
    }

    pub fn stone_count(&self) -> usize {
        self.black.len() + self.white.len()
    }

    pub fn is_full(&self) -> bool {
        self.stone_count() == (self.size * self.size) as usize
    }

    /// All empty cells, x outer / y inner, low to high.
    pub fn empty_cells(&self) -> Vec<Point> {
        let mut cells = Vec::with_capacity((self.size * self.size) as usize - self.stone_count());
        for x in 1..=self.size {
            for y in 1..=self.size {
                let pos = Point::new(x, y);
                if self.is_cell_empty(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size as usize;
        let mut text = String::with_capacity((size + 1) * (size + 2) * 4);
        for i in 0..size {
            if i == 0 {
                text.push_str("┌");
            } else {
                text.push_str("┬");
            }
            text.push_str("───");
        }
        text.push_str("┐\n");
        for y in 1..=self.size {
            for x in 1..=self.size {
                text.push_str("│");
                match self.stone_at(Point::new(x, y)) {
                    Some(Side::Black) => text.push_str(" O "),
                    Some(Side::White) => text.push_str(" X "),
                    None => text.push_str("   "),
                }
            }
            text.push_str("│\n");

            for i in 0..size {
                if i == 0 {
                    if y < self.size {
                        text.push_str("├");
                    } else {
                        text.push_str("└");
                    }
                } else if y < self.size {
                    text.push_str("┼");
                } else {
                    text.push_str("┴");
                }
                text.push_str("───");
            }
            if y < self.size {
                text.push_str("┤\n");
            } else {
                text.push_str("┘\n");
            }
        }
        write!(f, "{}", text)
    }
}
