// End-to-end: synthetic season CSV -> training run -> artifacts on disk -> reload.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crease_core::artifacts::ArtifactStore;
use crease_core::config::Config;
use crease_cricket::bundle::{ArtifactSet, ARTIFACT_NAMES, MANIFEST};
use crease_cricket::features::{ChaseFeatures, PreMatchFeatures};
use crease_cricket::pipeline::run;

const TEAMS: [&str; 4] = ["Islamabad", "Karachi", "Lahore", "Multan"];
const VENUES: [&str; 2] = ["Gaddafi Stadium", "National Stadium"];

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Ten deliveries per innings. The chasing side wins whenever the target is
/// under 60.
fn season_csv() -> String {
    let mut csv = String::from(
        "Match_ID,Inning,Batting_Team,Bowling_Team,Venue,Batter,Bowler,Batsman_Runs,Total_Runs,Is_Wicket,Winner\n",
    );
    let mut id = 100;
    for (i, first) in TEAMS.iter().enumerate() {
        for (j, second) in TEAMS.iter().enumerate() {
            if i == j {
                continue;
            }
            id += 1;
            let venue = VENUES[id % 2];
            let per_ball = 3 + (id % 5) as u32;
            let target = per_ball * 10 + 1;
            let winner = if target < 60 { second } else { first };
            for inning in 1..=2 {
                let (bat, bowl) = if inning == 1 { (first, second) } else { (second, first) };
                let runs = if inning == 1 { per_ball } else { per_ball + 1 };
                for ball in 0..10 {
                    let wicket = u32::from(ball == 9);
                    writeln!(
                        csv,
                        "{id},{inning},{bat},{bowl},{venue},{bat} batter {},{bowl} bowler,{runs},{runs},{wicket},{winner}",
                        ball % 3
                    )
                    .unwrap();
                }
            }
        }
    }
    // Abandoned after one innings: no winner recorded.
    for _ in 0..5 {
        writeln!(csv, "900,1,Karachi,Lahore,Gaddafi Stadium,Karachi batter 0,Lahore bowler,4,4,0,").unwrap();
    }
    // Washed out but both innings logged.
    writeln!(csv, "901,1,Lahore,Multan,National Stadium,Lahore batter 0,Multan bowler,1,1,0,No result").unwrap();
    writeln!(csv, "901,2,Multan,Lahore,National Stadium,Multan batter 0,Lahore bowler,1,1,0,No result").unwrap();
    csv
}

#[test]
fn train_persist_and_reload() {
    let dir = temp_dir("crease_pipeline_e2e");
    let csv_path = dir.join("season.csv");
    fs::write(&csv_path, season_csv()).unwrap();

    let mut config = Config::default();
    config.pre_match_model.n_estimators = 20;
    let store = ArtifactStore::new(dir.join("artifacts"));

    let report = run(&csv_path, &store, &config).unwrap();
    assert_eq!(report.written.len(), ARTIFACT_NAMES.len());
    for name in ARTIFACT_NAMES {
        assert!(store.exists(name), "{name} missing");
    }
    assert_eq!(report.written.last(), Some(&store.path_for(MANIFEST)));

    // 12 played fixtures + the washed-out one reach the chase data.
    assert_eq!(report.manifest.chase_records, 13);
    // The abandoned and washed-out matches never reach pre-match training.
    assert_eq!(report.manifest.prematch_rows, 12);
    assert_eq!(report.manifest.teams, 4);
    assert_eq!(report.manifest.venues, 2);

    let set = ArtifactSet::load(&store).unwrap();
    assert_eq!(set.manifest, report.manifest);
    assert_eq!(set.encoders.teams.classes(), TEAMS);
    assert_eq!(set.rosters.roster("Lahore").len(), 4);
    assert!(set.venue_performance.is_empty());

    let karachi = set.player_stats.get_or_default("Karachi bowler");
    assert!(karachi.total_wickets >= 1);
    assert_eq!(karachi.bat_avg, 0.0);

    let pre = PreMatchFeatures::encode(&set.encoders, "Lahore", "Karachi", "Gaddafi Stadium").unwrap();
    let proba = set.pre_match_model.predict_proba(&pre.to_row()).unwrap();
    assert_eq!(proba.len(), set.pre_match_model.classes().len());
    assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    let winner = set.pre_match_model.predict(&pre.to_row()).unwrap();
    assert!(set.encoders.teams.inverse_transform(winner).is_ok());

    let chase = ChaseFeatures::encode(&set.encoders, "Multan", "Lahore", "National Stadium", 45).unwrap();
    let easy = set.chase_model.positive_probability(&chase.to_row()).unwrap();
    let chase = ChaseFeatures::encode(&set.encoders, "Multan", "Lahore", "National Stadium", 75).unwrap();
    let hard = set.chase_model.positive_probability(&chase.to_row()).unwrap();
    assert!(easy > hard);
}

#[test]
fn missing_artifact_fails_whole_load() {
    let dir = temp_dir("crease_pipeline_partial");
    let csv_path = dir.join("season.csv");
    fs::write(&csv_path, season_csv()).unwrap();

    let mut config = Config::default();
    config.pre_match_model.n_estimators = 5;
    let store = ArtifactStore::new(dir.join("artifacts"));
    run(&csv_path, &store, &config).unwrap();

    fs::remove_file(store.path_for("venue_encoder")).unwrap();
    assert!(ArtifactSet::load(&store).is_err());
}
