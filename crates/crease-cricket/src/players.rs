// Per-player batting/bowling aggregates and per-team rosters.

use std::collections::{BTreeMap, BTreeSet};

use crease_core::round::round_to;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::MatchTable;

// ---------------------------------------------------------------------------
// PlayerStat
// ---------------------------------------------------------------------------

/// Career aggregates for one player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStat {
    /// Runs off the bat per distinct match batted, 2 decimals.
    pub bat_avg: f64,
    /// Wicket-flagged deliveries bowled.
    pub total_wickets: u32,
    /// Runs off the bat per 100 deliveries faced, 2 decimals.
    #[serde(default)]
    pub strike_rate: f64,
    /// Distinct matches as striker or bowler.
    #[serde(default)]
    pub matches: u32,
}

/// Player name → stats.
///
/// Lookups for unknown players never fail: `get_or_default` returns an
/// all-zero `PlayerStat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStats(BTreeMap<String, PlayerStat>);

impl PlayerStats {
    pub fn get(&self, name: &str) -> Option<&PlayerStat> {
        self.0.get(name)
    }

    /// Stats for `name`, or zeros for a player never seen in the data.
    pub fn get_or_default(&self, name: &str) -> PlayerStat {
        self.0.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Players in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerStat)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, PlayerStat)> for PlayerStats {
    fn from_iter<I: IntoIterator<Item = (String, PlayerStat)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// TeamRosters
// ---------------------------------------------------------------------------

/// Team name → alphabetically sorted distinct player names.
///
/// Unknown teams have an empty roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRosters(BTreeMap<String, Vec<String>>);

impl TeamRosters {
    pub fn roster(&self, team: &str) -> &[String] {
        self.0.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Strikers seen batting for a team plus bowlers seen bowling for it.
pub fn build_rosters(table: &MatchTable) -> TeamRosters {
    let mut rosters: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for ball in &table.balls {
        rosters
            .entry(ball.batting_team.as_str())
            .or_default()
            .insert(ball.batter.as_str());
        rosters
            .entry(ball.bowling_team.as_str())
            .or_default()
            .insert(ball.bowler.as_str());
    }

    TeamRosters(
        rosters
            .into_iter()
            .map(|(team, players)| {
                (
                    team.to_string(),
                    players.into_iter().map(str::to_string).collect(),
                )
            })
            .collect(),
    )
}

#[derive(Default)]
struct Tally<'a> {
    runs: u64,
    balls_faced: u64,
    batting_matches: BTreeSet<&'a str>,
    all_matches: BTreeSet<&'a str>,
    wickets: u32,
}

/// Batting average, wickets, strike rate and match count for every player
/// appearing as striker or bowler.
///
/// Wickets are 0 for everyone when the table has no wicket column.
pub fn build_player_stats(table: &MatchTable) -> PlayerStats {
    if !table.has_wicket_column {
        debug!("wicket column absent; total_wickets is 0 for all players");
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for ball in &table.balls {
        let striker = tallies.entry(ball.batter.as_str()).or_default();
        striker.runs += u64::from(ball.batsman_runs);
        striker.balls_faced += 1;
        striker.batting_matches.insert(ball.match_id.as_str());
        striker.all_matches.insert(ball.match_id.as_str());

        let bowler = tallies.entry(ball.bowler.as_str()).or_default();
        bowler.all_matches.insert(ball.match_id.as_str());
        if ball.is_wicket == Some(true) {
            bowler.wickets += 1;
        }
    }

    let stats: PlayerStats = tallies
        .into_iter()
        .map(|(name, t)| {
            let bat_avg = if t.batting_matches.is_empty() {
                0.0
            } else {
                round_to(t.runs as f64 / t.batting_matches.len() as f64, 2)
            };
            let strike_rate = if t.balls_faced == 0 {
                0.0
            } else {
                round_to(t.runs as f64 * 100.0 / t.balls_faced as f64, 2)
            };
            (
                name.to_string(),
                PlayerStat {
                    bat_avg,
                    total_wickets: t.wickets,
                    strike_rate,
                    matches: t.all_matches.len() as u32,
                },
            )
        })
        .collect();

    debug!("aggregated stats for {} players", stats.len());
    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
