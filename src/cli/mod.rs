//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{OwnerFilter, PlayerId, Position, Season, StatsSort, TeamName, Week, WeekSelection};

/// Season and week; each defaults to the league's current date.
#[derive(Debug, Clone, Copy, Args)]
pub struct WeekArgs {
    /// Season year (e.g. 2024).
    #[clap(long, short)]
    pub season: Option<Season>,

    /// Week number.
    #[clap(long, short)]
    pub week: Option<Week>,
}

/// Filters for the player statistics table.
#[derive(Debug, Args)]
pub struct StatsFilters {
    /// Season year (e.g. 2024).
    #[clap(long, short)]
    pub season: Option<Season>,

    /// A single week, or `all` for the whole season with averages.
    #[clap(long, short, default_value_t = WeekSelection::All)]
    pub week: WeekSelection,

    /// Filter by position (repeatable): `-p QB -p RB`.
    #[clap(short = 'p', long = "position")]
    pub positions: Vec<Position>,

    /// Filter by NFL team abbreviation (repeatable).
    #[clap(long = "nfl-team")]
    pub nfl_teams: Vec<String>,

    /// Filter by owning fantasy team, or `fa` for free agents (repeatable).
    #[clap(long = "owner")]
    pub owners: Vec<OwnerFilter>,

    /// Filter by player name (case-insensitive substring).
    #[clap(long, short = 'n')]
    pub name: Option<String>,

    /// Sort column, descending.
    #[clap(long, value_enum, default_value_t = StatsSort::Total)]
    pub sort: StatsSort,
}

#[derive(Debug, Parser)]
#[clap(name = "ffl-league", about = "Fantasy football league lineups and roster moves")]
pub struct Cli {
    /// Act as this user (or set `FFL_USER`).
    #[clap(long, global = true)]
    pub user: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Player point totals and averages.
    Stats {
        #[clap(flatten)]
        filters: StatsFilters,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Every fantasy team's roster, grouped by division.
    Rosters {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// A team's lineup as seated from roster order, with points.
    Lineup {
        /// Fantasy team name.
        #[clap(long, short)]
        team: TeamName,

        #[clap(flatten)]
        when: WeekArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// A week's matchups with starters by slot and scores.
    Matchups {
        #[clap(flatten)]
        when: WeekArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Save a team's starters for one game.
    SetLineup {
        /// Fantasy team name.
        #[clap(long, short)]
        team: TeamName,

        /// Game document ID.
        #[clap(long, short)]
        game: String,

        /// Starter player ID (repeatable): `--starter 4362628 --starter KC`.
        #[clap(long = "starter")]
        starters: Vec<PlayerId>,

        #[clap(flatten)]
        when: WeekArgs,
    },

    /// Drop a rostered player and add a free agent.
    DropAdd {
        #[clap(long, short)]
        team: TeamName,

        /// Rostered player to release.
        #[clap(long)]
        drop: PlayerId,

        /// Free agent to sign.
        #[clap(long)]
        add: PlayerId,

        /// Output the receipt as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Move a rostered player to IR and add a free agent.
    IrPlace {
        #[clap(long, short)]
        team: TeamName,

        /// Rostered player going to IR.
        #[clap(long)]
        player: PlayerId,

        /// Free agent to sign.
        #[clap(long)]
        add: PlayerId,

        /// Output the receipt as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Activate a player from IR and drop a rostered player.
    IrRemove {
        #[clap(long, short)]
        team: TeamName,

        /// Player coming back from IR.
        #[clap(long)]
        player: PlayerId,

        /// Rostered player to release.
        #[clap(long)]
        drop: PlayerId,

        /// Output the receipt as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Inspect or clear the local cache.
    Cache {
        #[clap(subcommand)]
        cmd: CacheCmd,
    },

    /// Load a JSON document dump into the local SQLite store.
    ///
    /// The file maps document paths to documents, e.g.
    /// `{"fantasyTeams/Paul": {"roster": [...], "waivers": 3}}`.
    Import {
        #[clap(long, short)]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheCmd {
    /// Entry counts per data class.
    Stats {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Drop the current user's entries (as on sign-out).
    Clear {
        /// Drop every entry for every user.
        #[clap(long)]
        all: bool,
    },
}
