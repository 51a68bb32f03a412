//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{PlayerNumber, Rank, TeamId};

/// Selects one player at one position of a team
#[derive(Debug, Args)]
pub struct PlayerSelector {
    /// Team ID (or set `DEPTH_CHART_TEAM_ID`; defaults to the only team).
    #[clap(long, short)]
    pub team: Option<TeamId>,

    /// Position name, exact match: `-p QB`.
    #[clap(long, short)]
    pub position: String,

    /// Jersey number: `-n 12` or `-n '#12'`.
    #[clap(long, short)]
    pub number: PlayerNumber,
}

#[derive(Debug, Parser)]
#[clap(name = "depth-chart", about = "Sports team depth chart manager")]
pub struct DepthChartCli {
    /// Database file (or set `DEPTH_CHART_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Configuration file (defaults to `<config dir>/depth-chart/config.toml`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine activity to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a sport, its teams, rosters and depth charts from a JSON file
    Import {
        /// Path to the JSON document.
        file: PathBuf,

        /// Output the import summary as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Add a player to a position's depth chart.
    ///
    /// Players at or below the requested rank move down one slot.
    Add {
        #[clap(flatten)]
        player: PlayerSelector,

        /// Zero-based rank (0 = starter). Omit to add at the bottom.
        #[clap(long, short)]
        rank: Option<Rank>,
    },

    /// Remove a player from a position's depth chart
    Remove {
        #[clap(flatten)]
        player: PlayerSelector,
    },

    /// List the players ranked below a player at a position
    Backups {
        #[clap(flatten)]
        player: PlayerSelector,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Print the full depth chart of a team
    Chart {
        /// Team ID (or set `DEPTH_CHART_TEAM_ID`; defaults to the only team).
        #[clap(long, short)]
        team: Option<TeamId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// List a team's roster by jersey number, bench players included
    Players {
        /// Team ID (or set `DEPTH_CHART_TEAM_ID`; defaults to the only team).
        #[clap(long, short)]
        team: Option<TeamId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// List teams and their ids
    Teams {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Delete all sports, teams, players and depth charts
    Clear,
}
