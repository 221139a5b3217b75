// Chase dataset: one row per match with both innings played.
//
// Ball rows are summed per (match, innings, batting side, bowling side, venue,
// winner), then innings 1 is joined to innings 2 on match id. Rows without a
// recorded winner or venue never reach an innings total, and a match without
// both innings never produces a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::MatchTable;

/// Summed runs for one innings actually played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsTotal {
    pub match_id: String,
    pub inning: u32,
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub winner: String,
    pub total_runs: u32,
}

/// One completed chase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseRecord {
    pub match_id: String,
    pub chasing_team: String,
    pub defending_team: String,
    pub venue: String,
    /// First-innings total + 1.
    pub target: u32,
    pub chase_score: u32,
    pub winner: String,
    pub chase_successful: bool,
}

impl ChaseRecord {
    /// The first-innings total the target was derived from.
    pub fn first_innings_score(&self) -> u32 {
        self.target - 1
    }
}

type InningsKey<'a> = (&'a str, u32, &'a str, &'a str, &'a str, &'a str);

/// Step 1: per-innings run totals, ordered by match id then innings.
pub fn aggregate_innings(table: &MatchTable) -> Vec<InningsTotal> {
    let mut totals: BTreeMap<InningsKey, u32> = BTreeMap::new();
    for ball in &table.balls {
        let Some(winner) = ball.winner.as_deref() else {
            continue;
        };
        if ball.venue.is_empty() {
            continue;
        }
        let key = (
            ball.match_id.as_str(),
            ball.inning,
            ball.batting_team.as_str(),
            ball.bowling_team.as_str(),
            ball.venue.as_str(),
            winner,
        );
        *totals.entry(key).or_insert(0) += ball.total_runs;
    }

    totals
        .into_iter()
        .map(
            |((match_id, inning, batting, bowling, venue, winner), total_runs)| InningsTotal {
                match_id: match_id.to_string(),
                inning,
                batting_team: batting.to_string(),
                bowling_team: bowling.to_string(),
                venue: venue.to_string(),
                winner: winner.to_string(),
                total_runs,
            },
        )
        .collect()
}

/// Steps 2-4: join innings 1 with innings 2 and label the outcome.
///
/// Venue comes from the first innings; chasing/defending sides and the
/// winner come from the second.
pub fn chase_records_from_innings(innings: &[InningsTotal]) -> Vec<ChaseRecord> {
    let mut second_by_match: BTreeMap<&str, Vec<&InningsTotal>> = BTreeMap::new();
    for inn in innings.iter().filter(|i| i.inning == 2) {
        second_by_match.entry(inn.match_id.as_str()).or_default().push(inn);
    }

    let mut records = Vec::new();
    let mut single_innings = 0usize;
    for first in innings.iter().filter(|i| i.inning == 1) {
        let Some(seconds) = second_by_match.get(first.match_id.as_str()) else {
            single_innings += 1;
            continue;
        };
        for second in seconds {
            records.push(ChaseRecord {
                match_id: first.match_id.clone(),
                chasing_team: second.batting_team.clone(),
                defending_team: second.bowling_team.clone(),
                venue: first.venue.clone(),
                target: first.total_runs + 1,
                chase_score: second.total_runs,
                winner: second.winner.clone(),
                chase_successful: second.winner == second.batting_team,
            });
        }
    }

    debug!(
        "built {} chase records; {} first innings had no second innings",
        records.len(),
        single_innings
    );
    records
}

/// Full chase derivation from the ball table.
pub fn build_chase_records(table: &MatchTable) -> Vec<ChaseRecord> {
    chase_records_from_innings(&aggregate_innings(table))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
