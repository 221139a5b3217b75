// Ball-by-ball match data loading and header normalization.
//
// Reads a delimited file with one row per delivery. Headers are trimmed and
// lowercased before rows are deserialized, so `Match_ID `, `match_id` and
// `MATCH_ID` all resolve to the same column.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every input file must carry (after normalization).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "match_id",
    "inning",
    "batting_team",
    "bowling_team",
    "venue",
    "batter",
    "bowler",
    "batsman_runs",
    "total_runs",
    "winner",
];

/// Optional wicket flag column.
pub const WICKET_COLUMN: &str = "is_wicket";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct BallRecord {
    pub match_id: String,
    pub inning: u32,
    pub batting_team: String,
    pub bowling_team: String,
    /// Empty when the source cell was blank.
    pub venue: String,
    pub batter: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    /// `None` when the file has no wicket column at all.
    pub is_wicket: Option<bool>,
    /// Denormalized onto every row of the match; `None` for blank/NA cells.
    pub winner: Option<String>,
}

/// The loaded ball table, passed by reference to every derivation step.
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    pub balls: Vec<BallRecord>,
    pub has_wicket_column: bool,
}

impl MatchTable {
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("required column `{column}` missing from {path}")]
    MissingColumn { path: String, column: String },

    #[error("{path} produced zero valid ball rows")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Numeric columns are read as f64 because exported frames often write
/// integers as `1.0`.
#[derive(Debug, Deserialize)]
struct RawBall {
    match_id: String,
    inning: f64,
    batting_team: String,
    bowling_team: String,
    #[serde(default)]
    venue: String,
    batter: String,
    bowler: String,
    batsman_runs: f64,
    total_runs: f64,
    #[serde(default)]
    winner: Option<String>,
    #[serde(default)]
    is_wicket: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim, strip a UTF-8 BOM, and lowercase a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Interpret a wicket cell. Blank cells count as no wicket.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "0.0" | "false" | "no" | "n" => Some(false),
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        _ => None,
    }
}

fn parse_winner(raw: Option<String>) -> Option<String> {
    let value = raw?;
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "" | "na" | "nan" | "null" | "none" => None,
        _ => Some(value.to_string()),
    }
}

fn as_count(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

fn convert(raw: RawBall, has_wicket_column: bool) -> Result<BallRecord, String> {
    let match_id = raw.match_id.trim().to_string();
    if match_id.is_empty() {
        return Err("blank match_id".into());
    }
    let inning = as_count(raw.inning)
        .filter(|i| *i > 0)
        .ok_or_else(|| format!("invalid inning {}", raw.inning))?;
    let batsman_runs =
        as_count(raw.batsman_runs).ok_or_else(|| format!("invalid batsman_runs {}", raw.batsman_runs))?;
    let total_runs =
        as_count(raw.total_runs).ok_or_else(|| format!("invalid total_runs {}", raw.total_runs))?;

    let batting_team = raw.batting_team.trim().to_string();
    let bowling_team = raw.bowling_team.trim().to_string();
    let batter = raw.batter.trim().to_string();
    let bowler = raw.bowler.trim().to_string();
    if batting_team.is_empty() || bowling_team.is_empty() {
        return Err("blank team name".into());
    }
    if batter.is_empty() || bowler.is_empty() {
        return Err("blank player name".into());
    }

    let is_wicket = if has_wicket_column {
        let cell = raw.is_wicket.unwrap_or_default();
        Some(parse_flag(&cell).unwrap_or_else(|| {
            debug!("unrecognised wicket flag '{}' in match {}, treating as false", cell, match_id);
            false
        }))
    } else {
        None
    };

    Ok(BallRecord {
        match_id,
        inning,
        batting_team,
        bowling_team,
        venue: raw.venue.trim().to_string(),
        batter,
        bowler,
        batsman_runs,
        total_runs,
        is_wicket,
        winner: parse_winner(raw.winner),
    })
}

// ---------------------------------------------------------------------------
// Reader-based loading
// ---------------------------------------------------------------------------

fn read_table<R: Read>(rdr: R, source: &str) -> Result<MatchTable, DataError> {
    let csv_err = |e: csv::Error| DataError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(rdr);

    let headers: StringRecord = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_header)
        .collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::MissingColumn {
                path: source.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    let has_wicket_column = headers.iter().any(|h| h == WICKET_COLUMN);
    reader.set_headers(headers);

    let mut balls = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.deserialize::<RawBall>().enumerate() {
        // Header is line 1.
        let line = row + 2;
        match result {
            Ok(raw) => match convert(raw, has_wicket_column) {
                Ok(ball) => balls.push(ball),
                Err(reason) => {
                    warn!("skipping ball row at line {}: {}", line, reason);
                    skipped += 1;
                }
            },
            Err(e) => {
                warn!("skipping malformed ball row at line {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    if balls.is_empty() {
        return Err(DataError::Empty {
            path: source.to_string(),
        });
    }
    if !has_wicket_column {
        warn!("{} has no `{}` column; wicket totals default to 0", source, WICKET_COLUMN);
    }
    info!(
        "loaded {} ball rows from {} ({} skipped)",
        balls.len(),
        source,
        skipped
    );

    Ok(MatchTable {
        balls,
        has_wicket_column,
    })
}

/// Load a ball table from any reader (in-memory CSV, stdin, ...).
pub fn load_matches_from_reader<R: Read>(rdr: R) -> Result<MatchTable, DataError> {
    read_table(rdr, "<reader>")
}

/// Load the ball-by-ball CSV at `path`.
pub fn load_matches(path: &Path) -> Result<MatchTable, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_table(file, &path.display().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
