//! Forbidden-move classification and win detection for the advanced rule
//! set. Black is the restricted side: a placement that creates two live
//! threes, two fours, or a chain of six or more is illegal, unless the same
//! placement completes an exact five.
//!
//! The gap-pattern predicates follow Hao Tian's algorithm
//! (http://blog.csdn.net/JkSparkle/article/details/822873). They are known
//! to misjudge a few exotic jump configurations; the tables below are the
//! behavioral contract, not verified renju theory.
//!
//! Symbols in pattern comments: O black, + empty, ? white/empty/boundary.

use crate::board::{Board, Side};
use crate::errors::RuleError;
use crate::point::{opposite, Point, AXES};
use crate::scan::{scan, ScanMode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which advanced rule a hypothetical placement would break.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum ForbiddenKind {
    /// Two independent live threes through the same cell.
    DoubleThree,
    /// Two independent fours through the same cell.
    DoubleFour,
    /// Six or more stones in an unbroken chain.
    Overline,
}

impl fmt::Display for ForbiddenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForbiddenKind::DoubleThree => write!(f, "double-three"),
            ForbiddenKind::DoubleFour => write!(f, "double-four"),
            ForbiddenKind::Overline => write!(f, "overline"),
        }
    }
}

/// Openness test on a gap counter: the run of empty cells at `level` is
/// longer than `min`, or exactly `min` with no further stones behind it.
struct Openness {
    level: usize,
    min: u8,
}

impl Openness {
    fn holds(&self, runs: &[u8; 5]) -> bool {
        runs[self.level] > self.min || (runs[self.level] == self.min && runs[self.level + 1] == 0)
    }
}

/// Live-three shape on one end of an axis. `jump` is the required stone run
/// beyond a single-cell gap (`None` for the unbroken three); `near`/`far`
/// are the openness requirements on this end and the mirrored end.
struct ThreeRule {
    jump: Option<u8>,
    near: Openness,
    far: Openness,
}

/// How an axis contributes fours and threes, keyed by the number of black
/// stones already adjacent to the candidate cell on that axis.
struct AxisRule {
    /// Four by simple extension: any empty cell next to the run.
    direct_four: bool,
    /// Four through a single-cell gap followed by exactly this many stones.
    jump_four: Option<u8>,
    /// Count at most one four per axis even if both ends qualify.
    four_once: bool,
    three: Option<ThreeRule>,
    /// Count at most one three per axis even if both ends qualify.
    three_once: bool,
}

/// Indexed by `total`, the adjacent-stone count on the axis (the candidate
/// stone itself not included). Totals of 4 (exact five) and 5+ (overline)
/// are handled before the table is consulted.
const AXIS_RULES: [AxisRule; 4] = [
    // total 0, ?O?: four needs O+OOO, three needs +O+OO+
    AxisRule {
        direct_four: false,
        jump_four: Some(3),
        four_once: false,
        three: Some(ThreeRule {
            jump: Some(2),
            near: Openness { level: 3, min: 1 },
            far: Openness { level: 1, min: 1 },
        }),
        three_once: false,
    },
    // total 1, ?OO?: four needs OO+OO, three needs +O+OO+
    AxisRule {
        direct_four: false,
        jump_four: Some(2),
        four_once: false,
        three: Some(ThreeRule {
            jump: Some(1),
            near: Openness { level: 3, min: 1 },
            far: Openness { level: 1, min: 1 },
        }),
        three_once: false,
    },
    // total 2, ?OOO?: four needs O+OOO, three needs ?++OOO+?
    AxisRule {
        direct_four: false,
        jump_four: Some(1),
        four_once: false,
        three: Some(ThreeRule {
            jump: None,
            near: Openness { level: 1, min: 2 },
            far: Openness { level: 1, min: 1 },
        }),
        three_once: true,
    },
    // total 3, ?OOOO?: four by extending either open end
    AxisRule {
        direct_four: true,
        jump_four: None,
        four_once: true,
        three: None,
        three_once: false,
    },
];

/// Temporarily places black stones, removing them again when dropped, so
/// the recursive key-point check can never leak a hypothetical stone, even
/// if the nested classification fails.
struct Hypothetical<'a> {
    board: &'a mut Board,
    placed: usize,
}

impl<'a> Hypothetical<'a> {
    fn place(board: &'a mut Board, stones: [Point; 2]) -> Self {
        for stone in stones {
            board.black.push(stone);
        }
        Self {
            board,
            placed: stones.len(),
        }
    }

    fn classify(&mut self, pos: Point) -> Result<Option<ForbiddenKind>, RuleError> {
        self.board.classify_at(pos)
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        for _ in 0..self.placed {
            self.board.black.pop_last();
        }
    }
}

impl Board {
    /// Classifies a hypothetical black placement at `pos` under the
    /// advanced rules. `None` means the move is allowed. The board is
    /// bit-for-bit unchanged when this returns, on every path.
    ///
    /// Errors with `OutOfBounds` for a coordinate off the board and
    /// `InvalidArgument` for an occupied cell.
    pub fn classify(&mut self, pos: Point) -> Result<Option<ForbiddenKind>, RuleError> {
        if !self.in_bounds(pos) {
            return Err(RuleError::OutOfBounds(pos));
        }
        if !self.is_cell_empty(pos) {
            return Err(RuleError::InvalidArgument(format!(
                "cannot classify occupied cell {}",
                pos
            )));
        }
        self.classify_at(pos)
    }

    /// Classification core, shared with the key-point recursion, which
    /// calls it while hypothetical stones occupy the checked cell.
    fn classify_at(&mut self, pos: Point) -> Result<Option<ForbiddenKind>, RuleError> {
        let profile = scan(
            self.size(),
            pos,
            &self.black,
            ScanMode::ForbidCheck {
                opponent: &self.white,
            },
        )?;

        // A move that completes an exact five wins outright and is never
        // forbidden, whatever else it forms.
        for axis in 0..AXES {
            if profile[axis][0] + profile[axis + 4][0] == 4 {
                return Ok(None);
            }
        }

        let mut three_count = 0u8;
        let mut four_count = 0u8;

        for axis in 0..AXES {
            let total = profile[axis][0] + profile[axis + 4][0];
            if total >= 5 {
                return Ok(Some(ForbiddenKind::Overline));
            }
            let rule = &AXIS_RULES[total as usize];
            let mut axis_four = false;
            let mut axis_three = false;

            for dir in [axis, axis + 4] {
                let near = profile[dir];
                let far = profile[opposite(dir)];

                let four_shape = if rule.direct_four {
                    near[1] > 0
                } else if let Some(jump) = rule.jump_four {
                    near[1] == 1 && near[2] == jump
                } else {
                    false
                };
                if four_shape && self.key_point_allowed(pos, near[0], dir)? {
                    if rule.four_once {
                        axis_four = true;
                    } else {
                        four_count += 1;
                    }
                }

                if let Some(three) = &rule.three {
                    let shape = match three.jump {
                        Some(jump) => near[1] == 1 && near[2] == jump,
                        None => true,
                    };
                    if shape
                        && three.near.holds(&near)
                        && three.far.holds(&far)
                        && self.key_point_allowed(pos, near[0], dir)?
                    {
                        if rule.three_once {
                            axis_three = true;
                        } else {
                            three_count += 1;
                        }
                    }
                }
            }

            if axis_four {
                four_count += 1;
            }
            if axis_three {
                three_count += 1;
            }
        }

        if four_count > 1 {
            Ok(Some(ForbiddenKind::DoubleFour))
        } else if three_count > 1 {
            Ok(Some(ForbiddenKind::DoubleThree))
        } else {
            Ok(None)
        }
    }

    /// A pattern only counts if its key point — the cell whose placement
    /// would complete the five — is itself legal for black. Checked by
    /// placing both the candidate and the key point hypothetically and
    /// classifying the key point.
    fn key_point_allowed(
        &mut self,
        pos: Point,
        adjacent_run: u8,
        dir: usize,
    ) -> Result<bool, RuleError> {
        let key = pos.offset(dir, adjacent_run as i32 + 1);
        let mut hypothetical = Hypothetical::place(self, [pos, key]);
        Ok(hypothetical.classify(key)?.is_none())
    }

    /// Checks whether `side`'s stone at `last` completes a chain of five or
    /// more, returning the chain's cells in spatial order along the axis.
    /// Chains longer than five still win here; the overline rule is applied
    /// to the restricted side before the stone is ever placed.
    pub fn check_win(&self, side: Side, last: Point) -> Result<Option<Vec<Point>>, RuleError> {
        let profile = scan(self.size(), last, self.stones(side), ScanMode::WinCheck)?;
        for axis in 0..AXES {
            let ahead = profile[axis][0] as i32;
            let behind = profile[axis + 4][0] as i32;
            if ahead + behind >= 4 {
                let chain = (-behind..=ahead)
                    .map(|step| last.offset(axis, step))
                    .collect();
                return Ok(Some(chain));
            }
        }
        Ok(None)
    }

    /// Classifies every empty cell, producing the full forbidden-cell map
    /// for the restricted side. Recomputed from scratch; valid only until
    /// the board changes.
    pub fn forbidden_moves(&mut self) -> Result<HashMap<Point, ForbiddenKind>, RuleError> {
        let mut map = HashMap::new();
        for x in 1..=self.size() {
            for y in 1..=self.size() {
                let pos = Point::new(x, y);
                if !self.is_cell_empty(pos) {
                    continue;
                }
                if let Some(kind) = self.classify_at(pos)? {
                    map.insert(pos, kind);
                }
            }
        }
        Ok(map)
    }
}
