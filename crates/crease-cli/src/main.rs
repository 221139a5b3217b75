// crease entry point.
//
// Startup sequence:
// 1. Parse arguments, initialize tracing (stderr; stdout carries reports)
// 2. Load config from <config-dir>/config, seeding it from defaults/
// 3. `train`: load CSV, fit, commit artifacts
//    anything else: load the artifact set once, answer the query, print

mod cli;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use crease_app::{chase_calc, dream_team, faceoff, simulator, venue_scout, ServingContext};
use crease_core::artifacts::ArtifactStore;
use crease_core::config::{self, Config};
use crease_cricket::pipeline;
use tracing::info;

use cli::{Cli, Command, ListKind};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let base = cli.config_dir.as_path();
    let config = config::load_config_in(base).context("failed to load configuration")?;
    let artifacts_dir = cli
        .artifacts
        .clone()
        .unwrap_or_else(|| resolve(base, &config.artifacts.dir));
    let store = ArtifactStore::new(artifacts_dir);

    let output = match cli.command {
        Command::Train { matches } => {
            let matches = matches.unwrap_or_else(|| resolve(base, &config.data.matches));
            info!("training from {}", matches.display());
            let report = pipeline::run(&matches, &store, &config)
                .with_context(|| format!("training on {} failed", matches.display()))?;
            render::training(&report)
        }
        Command::Simulate {
            team1,
            team2,
            venue,
            squad1,
            squad2,
        } => {
            let ctx = load_context(&store, &config)?;
            let squad1 = (!squad1.is_empty()).then_some(squad1.as_slice());
            let squad2 = (!squad2.is_empty()).then_some(squad2.as_slice());
            let prediction = simulator::simulate_match(&ctx, &team1, &team2, &venue, squad1, squad2)
                .context("match simulation failed")?;
            render::prediction(&prediction)
        }
        Command::Chase {
            chasing,
            defending,
            venue,
            target,
        } => {
            let ctx = load_context(&store, &config)?;
            let outlook = chase_calc::chase_outlook(&ctx, &chasing, &defending, &venue, target)
                .context("chase calculation failed")?;
            render::chase(&outlook)
        }
        Command::Faceoff { player1, player2 } => {
            let ctx = load_context(&store, &config)?;
            render::faceoff(&faceoff::face_off(&ctx, &player1, &player2))
        }
        Command::Venue { venue } => {
            let ctx = load_context(&store, &config)?;
            let report = venue_scout::scout_venue(&ctx, &venue).context("venue lookup failed")?;
            render::venue(&report)
        }
        Command::DreamXi => {
            let ctx = load_context(&store, &config)?;
            render::dream_xi(&dream_team::dream_xi(&ctx))
        }
        Command::Player { name } => {
            let ctx = load_context(&store, &config)?;
            render::player_card(&name, &ctx.player_card(&name))
        }
        Command::Roster { team } => {
            let ctx = load_context(&store, &config)?;
            render::names(ctx.roster(&team).iter().map(String::as_str))
        }
        Command::List { what } => {
            let ctx = load_context(&store, &config)?;
            match what {
                ListKind::Teams => render::names(ctx.teams().iter().map(String::as_str)),
                ListKind::Venues => render::names(ctx.venues().iter().map(String::as_str)),
                ListKind::Players => render::names(ctx.artifacts().player_stats.names()),
            }
        }
    };

    print!("{output}");
    Ok(())
}

/// Config paths are relative to the base directory unless absolute.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_context(store: &ArtifactStore, config: &Config) -> anyhow::Result<ServingContext> {
    ServingContext::load(store, config.serving.clone()).with_context(|| {
        format!(
            "failed to load artifacts from {}; run `crease train` first",
            store.dir().display()
        )
    })
}

/// Initialize tracing to stderr so reports on stdout stay clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crease=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        assert_eq!(
            resolve(Path::new("/srv/crease"), "artifacts"),
            PathBuf::from("/srv/crease/artifacts")
        );
        assert_eq!(
            resolve(Path::new("/srv/crease"), "/data/psl.csv"),
            PathBuf::from("/data/psl.csv")
        );
    }
}
