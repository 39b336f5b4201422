use eframe::{Frame, egui};
use poll_promise::Promise;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::{AnalysisSettings, MatchAnalysis, analyze_match};
use crate::config::{DEMO, PresetMatch};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{DatasetSource, MatchListing, TournamentData};
use crate::domain::{Match, MatchSelector, Tournament, TournamentKey};
use crate::error::AppError;
use crate::ui::app_async::LoadResult;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// What the side panel's selection widgets currently hold. Edited freely;
/// only turned into a `MatchSelector` when the user asks for an analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub tournament: Tournament,
    pub year: i32,
    pub player1: String,
    pub player2: String,
    pub match_id: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            tournament: DEMO.tournament,
            year: DEMO.year,
            player1: String::new(),
            player2: String::new(),
            match_id: String::new(),
        }
    }
}

impl SelectionState {
    pub fn from_preset(preset: &PresetMatch) -> Self {
        Self {
            tournament: preset.tournament,
            year: preset.year,
            player1: preset.player1.to_string(),
            player2: preset.player2.to_string(),
            match_id: String::new(),
        }
    }

    pub fn by_players(&self) -> MatchSelector {
        MatchSelector::by_players(
            self.tournament,
            self.year,
            self.player1.trim(),
            self.player2.trim(),
        )
    }

    pub fn by_id(&self) -> MatchSelector {
        MatchSelector::ById(self.match_id.trim().to_string())
    }

    pub fn tournament_key(&self) -> TournamentKey {
        TournamentKey::new(self.tournament, self.year)
    }
}

/// Which overlays the main momentum chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartVisibility {
    pub set_boundaries: bool,
    pub key_moments: bool,
    pub turning_points: bool,
}

impl Default for ChartVisibility {
    fn default() -> Self {
        Self {
            set_boundaries: true,
            key_moments: true,
            turning_points: true,
        }
    }
}

/// Settings passed in from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub selection: Option<SelectionState>,
    /// Load this selector as soon as the window opens
    pub initial_request: Option<MatchSelector>,
}

pub struct MomentumApp {
    pub(super) selection: SelectionState,
    pub(super) settings: AnalysisSettings,
    pub(super) visibility: ChartVisibility,

    pub(super) sources: Arc<Vec<Box<dyn DatasetSource>>>,
    // Tournaments already loaded this session; files are read at most once each
    pub(super) tournaments: HashMap<TournamentKey, Arc<TournamentData>>,
    pub(super) source_by_tournament: HashMap<TournamentKey, &'static str>,

    pub(super) load_promise: Option<Promise<LoadResult>>,
    pub(super) pending_key: Option<TournamentKey>,

    pub(super) current_match: Option<Arc<Match>>,
    pub(super) analysis: Option<MatchAnalysis>,
    pub(super) last_error: Option<AppError>,
    pub(super) browser_key: Option<TournamentKey>,

    pub(super) plot_view: PlotView,
    pub(super) show_help: bool,
}

impl MomentumApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        sources: Vec<Box<dyn DatasetSource>>,
        options: StartupOptions,
    ) -> Self {
        let mut app = Self::with_sources(sources);

        if let Some(selection) = options.selection {
            app.selection = selection;
        }
        if let Some(selector) = options.initial_request {
            app.request_match(selector);
        }

        app
    }

    pub fn with_sources(sources: Vec<Box<dyn DatasetSource>>) -> Self {
        Self {
            selection: SelectionState::default(),
            settings: AnalysisSettings::default(),
            visibility: ChartVisibility::default(),
            sources: Arc::new(sources),
            tournaments: HashMap::new(),
            source_by_tournament: HashMap::new(),
            load_promise: None,
            pending_key: None,
            current_match: None,
            analysis: None,
            last_error: None,
            browser_key: None,
            plot_view: PlotView::default(),
            show_help: false,
        }
    }

    /// Entry point for every "show me this match" action in the UI.
    pub(super) fn request_match(&mut self, selector: MatchSelector) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Match requested: {}", selector);
        }

        if let Err(e) = crate::utils::validation::validate_selection(&selector) {
            self.last_error = Some(e);
            return;
        }
        let Some(key) = selector.tournament_key() else {
            self.last_error = Some(AppError::InvalidSelection(format!(
                "cannot tell the tournament of {}",
                selector
            )));
            return;
        };

        if let Some(data) = self.tournaments.get(&key).cloned() {
            self.browser_key = Some(key);
            self.show_from_tournament(&data, &selector);
        } else {
            self.start_tournament_load(key, Some(selector));
        }
    }

    /// Loads a tournament only to fill the match browser.
    pub(super) fn request_browse(&mut self, key: TournamentKey) {
        if let Err(e) = crate::utils::validation::validate_year(key.year) {
            self.last_error = Some(e);
            return;
        }
        if self.tournaments.contains_key(&key) {
            self.browser_key = Some(key);
        } else {
            self.start_tournament_load(key, None);
        }
    }

    pub(super) fn show_from_tournament(&mut self, data: &TournamentData, selector: &MatchSelector) {
        match data.resolve(selector) {
            Ok(m) => {
                self.current_match = Some(Arc::new(m));
                self.reanalyze();
            }
            Err(e) => {
                self.current_match = None;
                self.analysis = None;
                self.last_error = Some(e);
            }
        }
    }

    /// Recomputes the analysis of the loaded match with the current settings.
    pub(super) fn reanalyze(&mut self) {
        let Some(m) = self.current_match.clone() else {
            return;
        };
        match analyze_match(&m, &self.settings) {
            Ok(analysis) => {
                self.selection.player1 = analysis.meta.player1.clone();
                self.selection.player2 = analysis.meta.player2.clone();
                self.analysis = Some(analysis);
                self.last_error = None;
                self.plot_view.clear_cache();
            }
            Err(e) => {
                log::warn!("Analysis of {} failed: {}", m.meta.match_id, e);
                self.analysis = None;
                self.last_error = Some(e);
            }
        }
    }

    pub(super) fn browser_listings(&self) -> Option<(TournamentKey, Vec<MatchListing>)> {
        let key = self.browser_key?;
        let data = self.tournaments.get(&key)?;
        Some((key, data.listings()))
    }

    pub(super) fn current_source(&self) -> Option<&'static str> {
        let key = self.analysis.as_ref().map(|a| a.meta.key).or(self.browser_key)?;
        self.source_by_tournament.get(&key).copied()
    }
}

impl eframe::App for MomentumApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop any in-flight load before the runtime goes away
        self.load_promise = None;
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_tournament_load(ctx);
        self.handle_global_shortcuts(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EmbeddedDemoSource;

    fn app() -> MomentumApp {
        MomentumApp::with_sources(vec![Box::new(EmbeddedDemoSource)])
    }

    #[test]
    fn cached_tournament_resolves_without_loading() {
        let mut app = app();
        let key = EmbeddedDemoSource::key();
        let data = EmbeddedDemoSource.load_tournament(key).unwrap();
        app.tournaments.insert(key, Arc::new(data));

        app.request_match(MatchSelector::by_players(
            Tournament::Wimbledon,
            2019,
            "jordan example",
            "casey placeholder",
        ));
        assert!(app.load_promise.is_none());
        let analysis = app.analysis.as_ref().unwrap();
        assert_eq!(analysis.point_count(), 186);
        // Selection picks up the canonical names
        assert_eq!(app.selection.player1, "Jordan Example");
    }

    #[test]
    fn invalid_selection_sets_error_without_loading() {
        let mut app = app();
        app.request_match(MatchSelector::by_players(Tournament::Wimbledon, 2030, "Aa Bb", "Cc Dd"));
        assert!(matches!(app.last_error, Some(AppError::InvalidSelection(_))));
        assert!(app.load_promise.is_none());
    }

    #[test]
    fn settings_change_reanalyses_loaded_match() {
        let mut app = app();
        let key = EmbeddedDemoSource::key();
        app.tournaments
            .insert(key, Arc::new(EmbeddedDemoSource.load_tournament(key).unwrap()));
        app.request_match(MatchSelector::ById("2011-frenchopen-9001".into()));
        let before = app.analysis.as_ref().unwrap().series.clone();

        app.settings.momentum.model = crate::models::MomentumModel::ExponentialDecay;
        app.reanalyze();
        let after = &app.analysis.as_ref().unwrap().series;
        assert_eq!(after.len(), before.len());
        assert_ne!(after, &before);
    }

    #[test]
    fn preset_fills_selection() {
        let selection = SelectionState::from_preset(&DEMO.presets[0]);
        assert_eq!(selection.player2, "Sam Sample");
        assert_eq!(selection.tournament_key(), EmbeddedDemoSource::key());
    }
}
