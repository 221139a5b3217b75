// Offline training: ball table -> lookups, encoders, both models -> artifacts.
//
// The encoders are fit once on the chase dataset and the same values feed
// both models. Nothing is written until every step has succeeded.

use std::path::{Path, PathBuf};

use chrono::Utc;
use crease_core::artifacts::{ArtifactError, ArtifactStore};
use crease_core::config::Config;
use thiserror::Error;
use tracing::info;

use crate::bundle::{ArtifactSet, Manifest};
use crate::chase::{build_chase_records, ChaseRecord};
use crate::data::{load_matches, DataError, MatchTable};
use crate::encoding::{EncodingError, Encoders};
use crate::features::ChaseFeatures;
use crate::model::{LogisticRegression, ModelError, RandomForest};
use crate::players::{build_player_stats, build_rosters};
use crate::prematch::{build_prematch_rows, encode_prematch_rows};
use crate::venue::{venue_chase_stats, VenuePerformance};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("encoding {stage} features: {source}")]
    Encoding {
        stage: &'static str,
        source: EncodingError,
    },

    #[error("fitting {model} model: {source}")]
    Model {
        model: &'static str,
        source: ModelError,
    },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("no match has both innings with a recorded winner; cannot build chase data")]
    NoChaseRecords,

    #[error("no match has a usable result; cannot build pre-match data")]
    NoPreMatchRows,
}

/// Outcome of `run`: where the artifacts went and what was trained.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub artifacts_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub manifest: Manifest,
}

fn chase_training_set(
    records: &[ChaseRecord],
    encoders: &Encoders,
) -> Result<(Vec<Vec<f64>>, Vec<bool>), EncodingError> {
    let mut x = Vec::with_capacity(records.len());
    let mut y = Vec::with_capacity(records.len());
    for r in records {
        let features = ChaseFeatures::encode(
            encoders,
            &r.chasing_team,
            &r.defending_team,
            &r.venue,
            r.target,
        )?;
        x.push(features.to_row());
        y.push(r.chase_successful);
    }
    Ok((x, y))
}

/// Derive every artifact from a loaded table. `source` is recorded in the
/// manifest.
pub fn train(table: &MatchTable, config: &Config, source: &str) -> Result<ArtifactSet, PipelineError> {
    let rosters = build_rosters(table);
    let player_stats = build_player_stats(table);
    info!(
        "aggregated {} players across {} teams",
        player_stats.len(),
        rosters.len()
    );

    let chase = build_chase_records(table);
    if chase.is_empty() {
        return Err(PipelineError::NoChaseRecords);
    }
    let venue_stats = venue_chase_stats(&chase);
    let encoders = Encoders::fit_from_chase(&chase);
    info!(
        "{} chase records; vocabulary of {} teams and {} venues",
        chase.len(),
        encoders.teams.len(),
        encoders.venues.len()
    );

    let (chase_x, chase_y) =
        chase_training_set(&chase, &encoders).map_err(|source| PipelineError::Encoding {
            stage: "chase",
            source,
        })?;
    let chase_model = LogisticRegression::fit(&chase_x, &chase_y, &config.chase_model)
        .map_err(|source| PipelineError::Model {
            model: "chase",
            source,
        })?;

    let prematch = build_prematch_rows(table);
    if prematch.is_empty() {
        return Err(PipelineError::NoPreMatchRows);
    }
    let (pre_x, pre_y) =
        encode_prematch_rows(&prematch, &encoders).map_err(|source| PipelineError::Encoding {
            stage: "pre-match",
            source,
        })?;
    let pre_match_model = RandomForest::fit(&pre_x, &pre_y, &config.pre_match_model)
        .map_err(|source| PipelineError::Model {
            model: "pre-match",
            source,
        })?;

    let manifest = Manifest {
        generated_at: Utc::now(),
        source: source.to_string(),
        ball_rows: table.len(),
        chase_records: chase.len(),
        prematch_rows: prematch.len(),
        teams: encoders.teams.len(),
        venues: encoders.venues.len(),
        players: player_stats.len(),
        pre_match_classes: pre_match_model.classes().len(),
    };

    Ok(ArtifactSet {
        pre_match_model,
        chase_model,
        encoders,
        rosters,
        player_stats,
        venue_chase_stats: venue_stats,
        venue_performance: VenuePerformance::default(),
        manifest,
    })
}

/// Load `matches_path`, train, and commit the artifact set to `store`.
pub fn run(
    matches_path: &Path,
    store: &ArtifactStore,
    config: &Config,
) -> Result<TrainingReport, PipelineError> {
    let table = load_matches(matches_path)?;
    let set = train(&table, config, &matches_path.display().to_string())?;
    let written = set.save(store)?;
    info!(
        "training complete: {} artifacts in {}",
        written.len(),
        store.dir().display()
    );
    Ok(TrainingReport {
        artifacts_dir: store.dir().to_path_buf(),
        written,
        manifest: set.manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_matches_from_reader;

    const HEADER: &str =
        "match_id,inning,batting_team,bowling_team,venue,batter,bowler,batsman_runs,total_runs,is_wicket,winner";

    fn table(body: &str) -> MatchTable {
        load_matches_from_reader(format!("{HEADER}\n{body}").as_bytes()).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.pre_match_model.n_estimators = 10;
        config
    }

    #[test]
    fn trains_on_two_matches() {
        let t = table(
            "1,1,A,B,V,a1,b1,4,4,0,A
1,2,B,A,V,b1,a1,1,1,1,A
2,1,B,A,W,b1,a1,2,2,0,A
2,2,A,B,W,a1,b1,6,6,0,A",
        );
        let set = train(&t, &config(), "inline").unwrap();
        assert_eq!(set.manifest.chase_records, 2);
        assert_eq!(set.manifest.prematch_rows, 2);
        assert_eq!(set.encoders.teams.classes(), ["A", "B"]);
        assert_eq!(set.pre_match_model.classes(), [0]);
        assert!(set.venue_performance.is_empty());
        assert_eq!(set.venue_chase_stats.len(), 2);
    }

    #[test]
    fn single_outcome_chases_fail_the_chase_model() {
        let t = table(
            "1,1,A,B,V,a1,b1,4,4,0,A
1,2,B,A,V,b1,a1,1,1,1,A",
        );
        assert!(matches!(
            train(&t, &config(), "inline"),
            Err(PipelineError::Model {
                model: "chase",
                source: ModelError::SingleClass
            })
        ));
    }

    #[test]
    fn no_complete_match_is_an_error() {
        let t = table("1,1,A,B,V,a1,b1,4,4,0,A");
        assert!(matches!(
            train(&t, &config(), "inline"),
            Err(PipelineError::NoChaseRecords)
        ));
    }

    #[test]
    fn pre_match_team_outside_chase_vocabulary_is_fatal() {
        // Match 3 never has a second innings, so team C is unknown to the
        // encoder fit on chase data.
        let t = table(
            "1,1,A,B,V,a1,b1,4,4,0,A
1,2,B,A,V,b1,a1,1,1,1,A
2,1,B,A,V,b1,a1,2,2,0,A
2,2,A,B,V,a1,b1,6,6,0,A
3,1,C,A,V,c1,a1,6,6,0,C",
        );
        assert!(matches!(
            train(&t, &config(), "inline"),
            Err(PipelineError::Encoding {
                stage: "pre-match",
                source: EncodingError::UnseenLabel { .. }
            })
        ));
    }

    #[test]
    fn missing_input_is_data_error() {
        let store = ArtifactStore::new(std::env::temp_dir().join("crease_pipeline_missing"));
        let err = run(Path::new("/nonexistent/crease.csv"), &store, &config()).unwrap_err();
        assert!(matches!(err, PipelineError::Data(DataError::Io { .. })));
        assert!(!store.exists(crate::bundle::MANIFEST));
    }
}
