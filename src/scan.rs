//! Line scanner: measures run lengths of stones and gaps outward from an
//! origin cell in the eight compass directions.

use crate::board::StoneSet;
use crate::errors::RuleError;
use crate::point::Point;

/// Run-length counters per direction. `profile[dir][level]` alternates
/// meaning by level: 0/2/4 count contiguous owner stones, 1/3 count
/// contiguous truly-empty cells. Level 0 starts one step from the origin;
/// the origin cell itself is never examined.
pub type RunProfile = [[u8; 5]; 8];

/// What the scan is measuring.
#[derive(Clone, Copy)]
pub enum ScanMode<'a> {
    /// Plain same-color run length, level 0 only.
    WinCheck,
    /// Full five-level run/gap/run/gap/run profile. Gap counters treat a
    /// cell as empty only when neither side holds it.
    ForbidCheck { opponent: &'a StoneSet },
}

impl<'a> ScanMode<'a> {
    fn levels(&self) -> usize {
        match self {
            ScanMode::WinCheck => 1,
            ScanMode::ForbidCheck { .. } => 5,
        }
    }

    fn cell_matches(&self, level: usize, cell: Point, owner: &StoneSet) -> bool {
        if level % 2 == 0 {
            owner.contains(cell)
        } else {
            match self {
                ScanMode::WinCheck => !owner.contains(cell),
                ScanMode::ForbidCheck { opponent } => {
                    !owner.contains(cell) && !opponent.contains(cell)
                }
            }
        }
    }
}

fn in_bounds(size: i32, pos: Point) -> bool {
    (1..=size).contains(&pos.x) && (1..=size).contains(&pos.y)
}

/// Walks outward from `origin` in all eight directions, measuring
/// alternating runs of owner stones and empty cells.
///
/// Pure function of the stone sets. Each counter stops at the board edge or
/// at the first cell that does not match its expectation; the cell that
/// ended one counter is the first candidate for the next. A counter that
/// never matches stays 0, and a blocking opponent stone therefore zeroes
/// everything beyond it.
pub fn scan(
    size: i32,
    origin: Point,
    owner: &StoneSet,
    mode: ScanMode,
) -> Result<RunProfile, RuleError> {
    if !in_bounds(size, origin) {
        return Err(RuleError::OutOfBounds(origin));
    }

    let mut profile: RunProfile = [[0; 5]; 8];
    for dir in 0..8 {
        let mut cursor = origin.offset(dir, 1);
        for level in 0..mode.levels() {
            while in_bounds(size, cursor) && mode.cell_matches(level, cursor, owner) {
                profile[dir][level] += 1;
                cursor = cursor.offset(dir, 1);
            }
        }
    }
    Ok(profile)
}
