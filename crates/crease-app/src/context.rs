// Serving state: the trained artifact set plus serving options, loaded once
// and shared read-only by every view.

use crease_core::artifacts::{ArtifactError, ArtifactStore};
use crease_core::config::ServingConfig;
use crease_cricket::bundle::ArtifactSet;
use crease_cricket::encoding::EncodingError;
use crease_cricket::model::ModelError;
use crease_cricket::players::PlayerStat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("pick two different teams (got `{0}` twice)")]
    SameTeam(String),

    #[error("target {target} outside the supported range {min}..={max}")]
    TargetOutOfRange { target: u32, min: u32, max: u32 },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone)]
pub struct ServingContext {
    artifacts: ArtifactSet,
    serving: ServingConfig,
}

impl ServingContext {
    pub fn new(artifacts: ArtifactSet, serving: ServingConfig) -> Self {
        Self { artifacts, serving }
    }

    /// Load every artifact from `store`. Any missing blob fails startup.
    pub fn load(store: &ArtifactStore, serving: ServingConfig) -> Result<Self, ArtifactError> {
        Ok(Self::new(ArtifactSet::load(store)?, serving))
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    pub fn serving(&self) -> &ServingConfig {
        &self.serving
    }

    /// Selectable teams (encoder vocabulary).
    pub fn teams(&self) -> &[String] {
        self.artifacts.encoders.teams.classes()
    }

    /// Selectable venues (encoder vocabulary).
    pub fn venues(&self) -> &[String] {
        self.artifacts.encoders.venues.classes()
    }

    /// Stats for `name`; all zeros for unknown players.
    pub fn player_card(&self, name: &str) -> PlayerStat {
        self.artifacts.player_stats.get_or_default(name)
    }

    pub fn roster(&self, team: &str) -> &[String] {
        self.artifacts.rosters.roster(team)
    }
}
