// Venue-level lookups: chase statistics and per-venue top performers.

use std::collections::BTreeMap;

use crease_core::round::{round_int, round_to};
use serde::{Deserialize, Serialize};

use crate::chase::ChaseRecord;

/// Historical chase profile of one ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueChaseStat {
    /// Mean first-innings score, nearest integer.
    pub avg_first_inn: i64,
    /// Percentage of chases won, one decimal.
    pub chase_success_rate: f64,
    /// Number of chase records behind the figures.
    #[serde(default)]
    pub matches: u32,
}

/// Venue → chase profile. Only venues with at least one chase are present;
/// `get` returns `None` for anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueChaseStats(BTreeMap<String, VenueChaseStat>);

impl VenueChaseStats {
    pub fn get(&self, venue: &str) -> Option<&VenueChaseStat> {
        self.0.get(venue)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VenueChaseStat)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Default)]
struct VenueTally {
    target_sum: u64,
    successes: u32,
    count: u32,
}

/// Aggregate chase records per venue.
pub fn venue_chase_stats(records: &[ChaseRecord]) -> VenueChaseStats {
    let mut tallies: BTreeMap<&str, VenueTally> = BTreeMap::new();
    for r in records {
        let t = tallies.entry(r.venue.as_str()).or_default();
        t.target_sum += u64::from(r.target);
        t.count += 1;
        if r.chase_successful {
            t.successes += 1;
        }
    }

    VenueChaseStats(
        tallies
            .into_iter()
            .map(|(venue, t)| {
                let n = f64::from(t.count);
                let mean_target = t.target_sum as f64 / n;
                (
                    venue.to_string(),
                    VenueChaseStat {
                        avg_first_inn: round_int(mean_target - 1.0),
                        chase_success_rate: round_to(f64::from(t.successes) / n * 100.0, 1),
                        matches: t.count,
                    },
                )
            })
            .collect(),
    )
}

/// Venue → player → average runs at that venue.
///
/// Persisted alongside the other lookups but never populated by training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenuePerformance(BTreeMap<String, BTreeMap<String, f64>>);

impl VenuePerformance {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, venue: &str) -> bool {
        self.0.contains_key(venue)
    }

    /// Best `n` players at `venue`, highest value first (ties by name).
    pub fn top_performers(&self, venue: &str, n: usize) -> Vec<(String, f64)> {
        let Some(players) = self.0.get(venue) else {
            return Vec::new();
        };
        let mut ranked: Vec<(String, f64)> =
            players.iter().map(|(p, v)| (p.clone(), *v)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

impl FromIterator<(String, BTreeMap<String, f64>)> for VenuePerformance {
    fn from_iter<I: IntoIterator<Item = (String, BTreeMap<String, f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
