// Pre-match training rows: one per decided match.
//
// The first ball row of each match (file order) stands in for the match:
// its batting side is team1, its bowling side team2. Matches with no
// recorded winner, no venue, or a "no result" outcome are left out.

use std::collections::HashSet;

use tracing::debug;

use crate::data::MatchTable;
use crate::encoding::{EncodingError, Encoders};
use crate::features::PreMatchFeatures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreMatchRow {
    pub match_id: String,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub winner: String,
}

fn is_no_result(winner: &str) -> bool {
    winner.to_lowercase().contains("no result")
}

pub fn build_prematch_rows(table: &MatchTable) -> Vec<PreMatchRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for ball in &table.balls {
        // Dedup happens before filtering: a match whose first row is
        // unusable is dropped even if later rows are complete.
        if !seen.insert(ball.match_id.as_str()) {
            continue;
        }
        let Some(winner) = ball.winner.as_deref() else {
            skipped += 1;
            continue;
        };
        if ball.venue.is_empty() || is_no_result(winner) {
            skipped += 1;
            continue;
        }
        rows.push(PreMatchRow {
            match_id: ball.match_id.clone(),
            team1: ball.batting_team.clone(),
            team2: ball.bowling_team.clone(),
            venue: ball.venue.clone(),
            winner: winner.to_string(),
        });
    }

    debug!(
        "pre-match dataset: {} matches kept, {} without a usable result",
        rows.len(),
        skipped
    );
    rows
}

/// Feature matrix and winner codes. Any name outside the encoder
/// vocabularies is an error.
pub fn encode_prematch_rows(
    rows: &[PreMatchRow],
    encoders: &Encoders,
) -> Result<(Vec<Vec<f64>>, Vec<usize>), EncodingError> {
    let mut x = Vec::with_capacity(rows.len());
    let mut y = Vec::with_capacity(rows.len());
    for row in rows {
        let features = PreMatchFeatures::encode(encoders, &row.team1, &row.team2, &row.venue)?;
        x.push(features.to_row());
        y.push(encoders.teams.transform(&row.winner)?);
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_matches_from_reader;
    use crate::encoding::LabelEncoder;

    const HEADER: &str =
        "match_id,inning,batting_team,bowling_team,venue,batter,bowler,batsman_runs,total_runs,is_wicket,winner";

    fn rows(body: &str) -> Vec<PreMatchRow> {
        let table = load_matches_from_reader(format!("{HEADER}\n{body}").as_bytes()).unwrap();
        build_prematch_rows(&table)
    }

    #[test]
    fn first_row_per_match() {
        let r = rows(
            "1,1,A,B,V,a,b,1,1,0,A
1,2,B,A,V,b,a,1,1,0,A
2,1,C,A,W,c,a,1,1,0,C",
        );
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].team1, "A");
        assert_eq!(r[0].team2, "B");
        assert_eq!(r[1].match_id, "2");
        assert_eq!(r[1].winner, "C");
    }

    #[test]
    fn no_result_and_missing_winner_dropped() {
        let r = rows(
            "1,1,A,B,V,a,b,1,1,0,No Result
2,1,A,B,V,a,b,1,1,0,
3,1,A,B,,a,b,1,1,0,A
4,1,A,B,V,a,b,1,1,0,B",
        );
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].match_id, "4");
    }

    #[test]
    fn unusable_first_row_drops_match() {
        let r = rows(
            "5,1,A,B,,a,b,1,1,0,A
5,2,B,A,V,b,a,1,1,0,A",
        );
        assert!(r.is_empty());
    }

    #[test]
    fn encode_rejects_unseen_team() {
        let encoders = Encoders {
            teams: LabelEncoder::fit("team", ["A", "B"]),
            venues: LabelEncoder::fit("venue", ["V"]),
        };
        let ok = rows("1,1,B,A,V,a,b,1,1,0,A");
        let (x, y) = encode_prematch_rows(&ok, &encoders).unwrap();
        assert_eq!(x, vec![vec![1.0, 0.0, 0.0]]);
        assert_eq!(y, vec![0]);

        let bad = rows("1,1,C,A,V,a,b,1,1,0,A");
        assert!(matches!(
            encode_prematch_rows(&bad, &encoders),
            Err(EncodingError::UnseenLabel { .. })
        ));
    }
}
