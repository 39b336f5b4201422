#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

// Re-export commonly used types
pub use analysis::{AnalysisSettings, MatchAnalysis, analyze_match};
pub use data::{DatasetSource, TournamentData, default_sources, load_match};
pub use domain::{Match, MatchMeta, MatchSelector, Player, Point, Tournament, TournamentKey};
pub use error::{AppError, DataError, NotFoundError};
pub use models::{MomentumSeries, SetSegment, compute_momentum, segment_sets};
pub use ui::{MomentumApp, StartupOptions};
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

use crate::config::DEMO;
use crate::ui::app::SelectionState;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `{year}-{tournament}-points.csv` / `-matches.csv` files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Only use the bundled demo tournament
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// ausopen, frenchopen, wimbledon or usopen
    #[arg(long)]
    pub tournament: Option<Tournament>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub player1: Option<String>,

    #[arg(long)]
    pub player2: Option<String>,

    /// Open this match directly, e.g. 2019-wimbledon-1701
    #[arg(long)]
    pub match_id: Option<String>,
}

impl Cli {
    /// Prefills the side panel and, when the flags name a match, requests it at startup.
    pub fn startup_options(&self) -> StartupOptions {
        let wants_selection = self.tournament.is_some()
            || self.year.is_some()
            || self.player1.is_some()
            || self.player2.is_some()
            || self.match_id.is_some();
        if !wants_selection {
            return StartupOptions::default();
        }

        let selection = SelectionState {
            tournament: self.tournament.unwrap_or(DEMO.tournament),
            year: self.year.unwrap_or(DEMO.year),
            player1: self.player1.clone().unwrap_or_default(),
            player2: self.player2.clone().unwrap_or_default(),
            match_id: self.match_id.clone().unwrap_or_default(),
        };

        let initial_request = if self.match_id.is_some() {
            Some(selection.by_id())
        } else if self.player1.is_some() && self.player2.is_some() {
            Some(selection.by_players())
        } else {
            None
        };

        StartupOptions {
            selection: Some(selection),
            initial_request,
        }
    }

    pub fn sources(&self) -> Vec<Box<dyn DatasetSource>> {
        default_sources(self.data_dir.clone(), self.demo)
    }
}

/// Main application entry point - creates the GUI app
pub fn run_app(
    cc: &eframe::CreationContext,
    sources: Vec<Box<dyn DatasetSource>>,
    options: StartupOptions,
) -> Box<dyn eframe::App> {
    let app = ui::MomentumApp::new(cc, sources, options);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_no_startup_request() {
        let cli = Cli::try_parse_from(["tennis-momentum"]).unwrap();
        let options = cli.startup_options();
        assert!(options.selection.is_none());
        assert!(options.initial_request.is_none());
    }

    #[test]
    fn player_flags_request_match_by_players() {
        let cli = Cli::try_parse_from([
            "tennis-momentum",
            "--tournament",
            "usopen",
            "--year",
            "2018",
            "--player1",
            "Novak Djokovic",
            "--player2",
            "Juan Martin del Potro",
        ])
        .unwrap();
        let options = cli.startup_options();
        assert_eq!(
            options.initial_request,
            Some(MatchSelector::by_players(
                Tournament::UsOpen,
                2018,
                "Novak Djokovic",
                "Juan Martin del Potro"
            ))
        );
    }

    #[test]
    fn match_id_wins_over_players() {
        let cli = Cli::try_parse_from([
            "tennis-momentum",
            "--match-id",
            "2019-wimbledon-1701",
            "--player1",
            "Novak Djokovic",
        ])
        .unwrap();
        let options = cli.startup_options();
        assert_eq!(
            options.initial_request,
            Some(MatchSelector::ById("2019-wimbledon-1701".into()))
        );
        assert_eq!(options.selection.unwrap().tournament, DEMO.tournament);
    }

    #[test]
    fn year_alone_only_prefills() {
        let cli = Cli::try_parse_from(["tennis-momentum", "--year", "2015", "--demo"]).unwrap();
        assert!(cli.demo);
        let options = cli.startup_options();
        assert_eq!(options.selection.map(|s| s.year), Some(2015));
        assert!(options.initial_request.is_none());
    }

    #[test]
    fn unknown_tournament_is_rejected() {
        assert!(Cli::try_parse_from(["tennis-momentum", "--tournament", "queens"]).is_err());
    }
}
