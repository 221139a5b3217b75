// Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "crease",
    version,
    about = "Cricket league analytics: train outcome models and query match insights"
)]
pub struct Cli {
    /// Base directory holding `config/` and `defaults/`.
    #[arg(long, global = true, env = "CREASE_HOME", default_value = ".")]
    pub config_dir: PathBuf,

    /// Artifact directory (overrides `[artifacts] dir`).
    #[arg(long, global = true, env = "CREASE_ARTIFACTS")]
    pub artifacts: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train both models from the ball-by-ball CSV and write all artifacts.
    Train {
        /// Match CSV (overrides `[data] matches`).
        #[arg(long)]
        matches: Option<PathBuf>,
    },

    /// Predict the winner of a fixture.
    Simulate {
        team1: String,
        team2: String,
        venue: String,
        /// Playing XI for team 1 (repeat the flag); defaults to the roster head.
        #[arg(long = "squad1", value_name = "PLAYER")]
        squad1: Vec<String>,
        /// Playing XI for team 2 (repeat the flag).
        #[arg(long = "squad2", value_name = "PLAYER")]
        squad2: Vec<String>,
    },

    /// Win chance of a chasing side.
    Chase {
        #[arg(long)]
        chasing: String,
        #[arg(long)]
        defending: String,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        target: u32,
    },

    /// Head-to-head player comparison.
    Faceoff { player1: String, player2: String },

    /// Chase profile and top performers at a ground.
    Venue { venue: String },

    /// Best non-overlapping XI from career stats.
    DreamXi,

    /// One player's career card.
    Player { name: String },

    /// A team's known players.
    Roster { team: String },

    /// List selectable names.
    List {
        #[arg(value_enum)]
        what: ListKind,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Teams,
    Venues,
    Players,
}
