use serde::Serialize;
use std::fmt;

/// A coordinate on the board. Both axes are 1-indexed, so a board of side N
/// holds the points (1,1) ..= (N,N). Plain value type, two points are the
/// same square exactly when their coordinates match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point `steps` cells away along the given direction. No bounds
    /// check, callers test the result against the board.
    pub fn offset(self, direction: usize, steps: i32) -> Point {
        let (dx, dy) = DIRECTIONS[direction];
        Point {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight unit steps, indexed so that the opposite of direction `i`
/// is `i + 4`:
///
/// ```text
///  \|/    321
///  -.-    4.0
///  /|\    567
/// ```
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Number of straight lines through a point; axis `i` pairs directions
/// `i` and `i + 4`.
pub const AXES: usize = 4;

/// Index of the direction opposite to `direction`.
pub fn opposite(direction: usize) -> usize {
    (direction + 4) % 8
}
