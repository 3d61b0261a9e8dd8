//! Static move scoring. Every 5-cell window on the board is rated by its
//! occupancy and the rating feeds the accumulator of each cell it covers;
//! the engine plays the best-scoring empty legal cell.
//!
//! The algorithm follows the tuple-scoring scheme described at
//! https://blog.csdn.net/u011587401/article/details/50877828

use crate::board::StoneSet;
use crate::errors::RuleError;
use crate::point::Point;
use crate::rules::ForbiddenKind;
use std::collections::HashMap;

/// Score of one window holding `mover` stones of the side to move and
/// `opponent` stones of the other side. Asymmetric on purpose: the mover's
/// own chances outweigh blocking at the same count.
fn rating(mover: u8, opponent: u8) -> i64 {
    if mover > 0 && opponent > 0 {
        return 0; // blocked for both sides
    }
    match (mover, opponent) {
        (0, 0) => 7,
        (1, 0) => 35,
        (2, 0) => 800,
        (3, 0) => 15_000,
        (4, 0) => 800_000,
        (0, 1) => 15,
        (0, 2) => 400,
        (0, 3) => 1_800,
        (0, 4) => 100_000,
        _ => unreachable!(
            "window with {} mover and {} opponent stones on a live board",
            mover, opponent
        ),
    }
}

/// Cells masked out of the selection carry this accumulator value.
const MASKED: i64 = -1;

/// Picks the move for the side owning `mover`. `forbidden` is the
/// restricted side's forbidden-cell map when the mover is subject to the
/// advanced rules, `None` otherwise.
///
/// Deterministic: equal boards always yield the same cell. Fails with
/// `NoLegalMove` when every cell is occupied or forbidden.
pub fn best_move(
    size: i32,
    mover: &StoneSet,
    opponent: &StoneSet,
    forbidden: Option<&HashMap<Point, ForbiddenKind>>,
) -> Result<Point, RuleError> {
    let n = size;
    let idx = |pos: Point| ((pos.x - 1) * n + (pos.y - 1)) as usize;
    let mut scores = vec![0i64; (n * n) as usize];

    let mut add_window = |cells: [Point; 5]| {
        let mut mine = 0u8;
        let mut theirs = 0u8;
        for cell in cells {
            if mover.contains(cell) {
                mine += 1;
            } else if opponent.contains(cell) {
                theirs += 1;
            }
        }
        let score = rating(mine, theirs);
        for cell in cells {
            scores[idx(cell)] += score;
        }
    };

    // Horizontal
    for y in 1..=n {
        for x0 in 1..=n - 4 {
            add_window(std::array::from_fn(|k| Point::new(x0 + k as i32, y)));
        }
    }

    // Vertical
    for x in 1..=n {
        for y0 in 1..=n - 4 {
            add_window(std::array::from_fn(|k| Point::new(x, y0 + k as i32)));
        }
    }

    // "\" diagonals, upper-right half including the main diagonal
    for d in 1..=n - 4 {
        for b in 1..=n - 3 - d {
            add_window(std::array::from_fn(|k| {
                Point::new(d + b - 1 + k as i32, b + k as i32)
            }));
        }
    }

    // "\" diagonals, lower-left half
    for d in 1..=n - 5 {
        for b in 1..=n - 4 - d {
            add_window(std::array::from_fn(|k| {
                Point::new(b + k as i32, d + b + k as i32)
            }));
        }
    }

    // "/" diagonals, upper-left half including the anti diagonal
    for d in 1..=n - 4 {
        for b in 1..=n - 3 - d {
            add_window(std::array::from_fn(|k| {
                Point::new(n - d - b + 2 - k as i32, b + k as i32)
            }));
        }
    }

    // "/" diagonals, lower-right half
    for d in 1..=n - 5 {
        for b in 1..=n - 4 - d {
            add_window(std::array::from_fn(|k| {
                Point::new(n - b + 1 - k as i32, d + b + k as i32)
            }));
        }
    }

    // Occupied and forbidden cells can never be chosen.
    for stone in mover.iter().chain(opponent.iter()) {
        scores[idx(*stone)] = MASKED;
    }
    if let Some(forbidden) = forbidden {
        for pos in forbidden.keys() {
            scores[idx(*pos)] = MASKED;
        }
    }

    let mut best: Option<Point> = None;
    let mut max_score = MASKED;
    for x in 1..=n {
        for y in 1..=n {
            let pos = Point::new(x, y);
            if mover.contains(pos) || opponent.contains(pos) {
                continue;
            }
            if scores[idx(pos)] > max_score {
                max_score = scores[idx(pos)];
                best = Some(pos);
            }
        }
    }

    best.ok_or(RuleError::NoLegalMove)
}
