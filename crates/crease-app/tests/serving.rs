// Integration tests for the serving layer.
//
// Trains on a small generated season, commits the artifacts to a temp
// directory, loads them back into a ServingContext, and drives every view.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crease_app::chase_calc::{chase_outlook, ChaseVerdict};
use crease_app::dream_team::{dream_xi, Role};
use crease_app::faceoff::face_off;
use crease_app::simulator::simulate_match;
use crease_app::venue_scout::scout_venue;
use crease_app::{ServingContext, ViewError};
use crease_core::artifacts::ArtifactStore;
use crease_core::config::Config;
use crease_cricket::pipeline;

// ===========================================================================
// Test helpers
// ===========================================================================

const TEAMS: [&str; 3] = ["Islamabad United", "Lahore Qalandars", "Peshawar Zalmi"];
const VENUES: [&str; 2] = ["Gaddafi Stadium", "Rawalpindi Cricket Stadium"];

/// Eight deliveries per innings, three fixtures per pairing. Chases of
/// targets under 150 succeed. Each side has four specialist batters, a
/// seamer who only bowls, and a spinner who bowls and bats at 7 and 8.
fn season_csv() -> String {
    let mut csv = String::from(
        "match_id,inning,batting_team,bowling_team,venue,batter,bowler,batsman_runs,total_runs,is_wicket,winner\n",
    );
    let mut id = 5000;
    for round in 0..3 {
        for first in TEAMS {
            for second in TEAMS {
                if first == second {
                    continue;
                }
                id += 1;
                let venue = VENUES[(id + round) % 2];
                let per_ball = 15 + (id % 6) as u32;
                let target = per_ball * 8 + 1;
                let winner = if target < 150 { second } else { first };
                for inning in 1..=2 {
                    let (bat, bowl) = if inning == 1 { (first, second) } else { (second, first) };
                    for ball in 0..8 {
                        let batter = if ball < 6 {
                            format!("{bat} #{}", ball % 4)
                        } else {
                            format!("{bat} spinner")
                        };
                        let bowler = if ball < 4 { "seamer" } else { "spinner" };
                        let wicket = u32::from(ball % 2 == 1);
                        csv.push_str(&format!(
                            "{id},{inning},{bat},{bowl},{venue},{batter},{bowl} {bowler},{per_ball},{per_ball},{wicket},{winner}\n"
                        ));
                    }
                }
            }
        }
    }
    csv
}

fn serving_context(name: &str) -> ServingContext {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let csv_path: PathBuf = dir.join("season.csv");
    fs::write(&csv_path, season_csv()).unwrap();

    let mut config = Config::default();
    config.pre_match_model.n_estimators = 20;
    let store = ArtifactStore::new(dir.join("artifacts"));
    pipeline::run(&csv_path, &store, &config).unwrap();
    ServingContext::load(&store, config.serving).unwrap()
}

// ===========================================================================
// Views
// ===========================================================================

#[test]
fn every_view_answers_from_loaded_artifacts() {
    let ctx = serving_context("crease_serving_views");
    assert_eq!(ctx.teams(), TEAMS);
    assert_eq!(ctx.venues(), VENUES);

    let p = simulate_match(
        &ctx,
        "Lahore Qalandars",
        "Peshawar Zalmi",
        "Gaddafi Stadium",
        None,
        None,
    )
    .unwrap();
    assert!(ctx.teams().contains(&p.winner));
    assert!(p.squad1_power > 0 && p.squad2_power > 0);

    let easy = chase_outlook(&ctx, "Islamabad United", "Peshawar Zalmi", "Gaddafi Stadium", 100).unwrap();
    let hard = chase_outlook(&ctx, "Islamabad United", "Peshawar Zalmi", "Gaddafi Stadium", 250).unwrap();
    assert!(easy.win_chance > hard.win_chance);
    assert_eq!(easy.verdict, ChaseVerdict::Achievable);
    assert_eq!(hard.verdict, ChaseVerdict::Defendable);

    let f = face_off(&ctx, "Lahore Qalandars #0", "Lahore Qalandars seamer");
    assert!(f.winner == "Lahore Qalandars #0" || f.winner == "Lahore Qalandars seamer");

    let v = scout_venue(&ctx, "Rawalpindi Cricket Stadium").unwrap();
    assert!(v.chase.is_some());
    assert!(v.top_performers.is_empty());

    let xi = dream_xi(&ctx);
    let unique: HashSet<&str> = xi.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(unique.len(), xi.len());
    assert_eq!(xi.len(), 11);
    let roles: Vec<Role> = xi.iter().map(|p| p.role).collect();
    assert_eq!(&roles[..2], [Role::AllRounder; 2]);
    assert_eq!(&roles[2..6], [Role::Bowler; 4]);
    assert_eq!(&roles[6..], [Role::Batter; 5]);
    assert!(xi[..2].iter().all(|p| p.name.ends_with("spinner")));
    assert_eq!(xi[2..6].iter().filter(|p| p.name.ends_with("seamer")).count(), 3);
}

#[test]
fn invalid_requests_are_view_errors() {
    let ctx = serving_context("crease_serving_errors");
    assert!(matches!(
        simulate_match(&ctx, "Peshawar Zalmi", "Peshawar Zalmi", "Gaddafi Stadium", None, None),
        Err(ViewError::SameTeam(_))
    ));
    assert!(matches!(
        chase_outlook(&ctx, "Islamabad United", "Peshawar Zalmi", "Gaddafi Stadium", 300),
        Err(ViewError::TargetOutOfRange { .. })
    ));
    assert!(matches!(
        scout_venue(&ctx, "Sharjah"),
        Err(ViewError::Encoding(_))
    ));
}

#[test]
fn missing_artifacts_fail_startup() {
    let store = ArtifactStore::new(std::env::temp_dir().join("crease_serving_nothing_here"));
    assert!(ServingContext::load(&store, Config::default().serving).is_err());
}
