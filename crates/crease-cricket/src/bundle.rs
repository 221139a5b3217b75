// The full set of trained artifacts, saved and loaded as one unit.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use crease_core::artifacts::{ArtifactError, ArtifactStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::encoding::{Encoders, LabelEncoder};
use crate::model::{LogisticRegression, RandomForest};
use crate::players::{PlayerStats, TeamRosters};
use crate::venue::{VenueChaseStats, VenuePerformance};

pub const PRE_MATCH_MODEL: &str = "pre_match_model";
pub const CHASE_MODEL: &str = "chase_model";
pub const TEAM_ENCODER: &str = "team_encoder";
pub const VENUE_ENCODER: &str = "venue_encoder";
pub const TEAM_ROSTERS: &str = "team_rosters";
pub const PLAYER_STATS: &str = "player_stats";
pub const VENUE_CHASE_STATS: &str = "venue_chase_stats";
pub const VENUE_PERFORMANCE: &str = "venue_performance";
pub const MANIFEST: &str = "manifest";

/// Every artifact name, in write order.
pub const ARTIFACT_NAMES: &[&str] = &[
    PRE_MATCH_MODEL,
    CHASE_MODEL,
    TEAM_ENCODER,
    VENUE_ENCODER,
    TEAM_ROSTERS,
    PLAYER_STATS,
    VENUE_CHASE_STATS,
    VENUE_PERFORMANCE,
    MANIFEST,
];

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub ball_rows: usize,
    pub chase_records: usize,
    pub prematch_rows: usize,
    pub teams: usize,
    pub venues: usize,
    pub players: usize,
    /// Distinct winners the pre-match model can predict.
    pub pre_match_classes: usize,
}

#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub pre_match_model: RandomForest,
    pub chase_model: LogisticRegression,
    pub encoders: Encoders,
    pub rosters: TeamRosters,
    pub player_stats: PlayerStats,
    pub venue_chase_stats: VenueChaseStats,
    pub venue_performance: VenuePerformance,
    pub manifest: Manifest,
}

impl ArtifactSet {
    /// Write every artifact in one batch. An encode or write failure
    /// replaces nothing. The manifest is staged last, so it is only renamed
    /// into place after every other artifact has been.
    pub fn save(&self, store: &ArtifactStore) -> Result<Vec<PathBuf>, ArtifactError> {
        let mut batch = store.batch();
        batch.put(PRE_MATCH_MODEL, &self.pre_match_model)?;
        batch.put(CHASE_MODEL, &self.chase_model)?;
        batch.put(TEAM_ENCODER, &self.encoders.teams)?;
        batch.put(VENUE_ENCODER, &self.encoders.venues)?;
        batch.put(TEAM_ROSTERS, &self.rosters)?;
        batch.put(PLAYER_STATS, &self.player_stats)?;
        batch.put(VENUE_CHASE_STATS, &self.venue_chase_stats)?;
        batch.put(VENUE_PERFORMANCE, &self.venue_performance)?;
        batch.put(MANIFEST, &self.manifest)?;
        let written = batch.commit()?;
        debug!("artifact set written: {:?}", written);
        Ok(written)
    }

    /// Load every artifact; the first missing or unreadable one fails the
    /// whole load.
    pub fn load(store: &ArtifactStore) -> Result<Self, ArtifactError> {
        let teams: LabelEncoder = store.load(TEAM_ENCODER)?;
        let venues: LabelEncoder = store.load(VENUE_ENCODER)?;
        let set = Self {
            pre_match_model: store.load(PRE_MATCH_MODEL)?,
            chase_model: store.load(CHASE_MODEL)?,
            encoders: Encoders { teams, venues },
            rosters: store.load(TEAM_ROSTERS)?,
            player_stats: store.load(PLAYER_STATS)?,
            venue_chase_stats: store.load(VENUE_CHASE_STATS)?,
            venue_performance: store.load(VENUE_PERFORMANCE)?,
            manifest: store.load(MANIFEST)?,
        };
        info!(
            "loaded artifacts from {} (trained {})",
            store.dir().display(),
            set.manifest.generated_at.to_rfc3339()
        );
        Ok(set)
    }
}
