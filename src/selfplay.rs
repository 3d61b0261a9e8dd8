//! Engine-vs-engine matches. Each match runs on its own task and owns its
//! own game, so every board still sees strictly serialized mutations.

use crate::board::Side;
use crate::errors::RuleError;
use crate::game::{Game, GameStatus, RuleSet};
use crate::point::Point;
use log::{debug, info};
use serde::Serialize;

/// Everything worth keeping from one finished match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
    pub rule_set: RuleSet,
    pub size: i32,
    pub moves: Vec<(Side, Point)>,
    pub outcome: GameStatus,
}

/// Outcome tally over a batch of matches.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Tally {
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
}

pub fn tally(records: &[MatchRecord]) -> Tally {
    let mut totals = Tally::default();
    for record in records {
        match record.outcome {
            GameStatus::BlackWon => totals.black_wins += 1,
            GameStatus::WhiteWon => totals.white_wins += 1,
            GameStatus::Draw => totals.draws += 1,
            GameStatus::InProgress => unreachable!("record of an unfinished match"),
        }
    }
    totals
}

pub struct SelfPlayRunner {
    games: u32,
    size: i32,
    rule_set: RuleSet,
    /// Number of random opening moves before the heuristic takes over.
    /// Without them every match would be identical.
    opening_moves: usize,
}

impl SelfPlayRunner {
    pub fn new(games: u32, size: i32, rule_set: RuleSet) -> Self {
        Self {
            games,
            size,
            rule_set,
            opening_moves: 3,
        }
    }

    /// Plays all matches concurrently and returns their records.
    pub async fn run(&self) -> Result<Vec<MatchRecord>, RuleError> {
        let mut handles = Vec::with_capacity(self.games as usize);
        for id in 0..self.games {
            let (size, rule_set, opening) = (self.size, self.rule_set, self.opening_moves);
            handles.push(tokio::spawn(
                async move { play_match(id, size, rule_set, opening) },
            ));
        }

        let mut records = Vec::with_capacity(handles.len());
        for handle in handles {
            records.push(handle.await.expect("self-play task panicked")?);
        }

        let totals = tally(&records);
        info!(
            "self-play finished: {} black wins, {} white wins, {} draws",
            totals.black_wins, totals.white_wins, totals.draws
        );
        Ok(records)
    }
}

fn play_match(
    id: u32,
    size: i32,
    rule_set: RuleSet,
    opening_moves: usize,
) -> Result<MatchRecord, RuleError> {
    let mut game = Game::new(size, rule_set)?;
    let mut moves = Vec::new();

    let mut status = game.status();
    while !status.is_over() {
        let side = game.turn();
        let (pos, next) = if moves.len() < opening_moves {
            game.place_random()?
        } else {
            game.engine_move()?
        };
        moves.push((side, pos));
        status = next;
    }

    debug!("match {}: {:?} after {} moves", id, status, moves.len());
    Ok(MatchRecord {
        rule_set,
        size,
        moves,
        outcome: status,
    })
}

/// Writes the records as pretty-printed JSON.
pub async fn export_records(records: &[MatchRecord], path: &str) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(records).expect("match records always serialize");
    tokio::fs::write(path, json).await
}
