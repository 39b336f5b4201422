use eframe::egui::{
    CentralPanel, Context, Frame, Grid, Key, Margin, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Ui, Window,
};

use crate::config::{ANALYSIS, DEMO, PLOT_CONFIG};
use crate::domain::MatchSelector;
use crate::ui::app::SelectionState;
use crate::ui::charts;
use crate::ui::ui_panels::{
    BrowserEvent, DisplayPanel, MatchBrowserPanel, Panel, PresetsPanel, SelectionEvent,
    SelectionPanel, SettingsPanel,
};
use crate::ui::ui_summary;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{section_heading, spaced_separator};

use super::app::MomentumApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl MomentumApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical().id_salt("side_panel").show(ui, |ui| {
                    self.render_selection_widgets(ui);
                    spaced_separator(ui);
                    self.render_settings_widgets(ui);
                });
            });
    }

    fn render_selection_widgets(&mut self, ui: &mut Ui) {
        let busy = self.is_loading();

        let selection_events = SelectionPanel::new(&mut self.selection, busy).render(ui);
        for event in selection_events {
            match event {
                SelectionEvent::AnalyzeByPlayers => self.request_match(self.selection.by_players()),
                SelectionEvent::AnalyzeById => self.request_match(self.selection.by_id()),
                SelectionEvent::TournamentChanged(key) => {
                    // Show the cached browser list straight away if we have it
                    if self.tournaments.contains_key(&key) {
                        self.browser_key = Some(key);
                    }
                }
            }
        }

        ui.add_space(8.0);
        let preset_events = PresetsPanel::new(DEMO.presets).render(ui);
        if let Some(preset) = preset_events.into_iter().last() {
            self.selection = SelectionState::from_preset(preset);
            self.request_match(self.selection.by_players());
        }

        ui.add_space(8.0);
        let selected_id = self.analysis.as_ref().map(|a| a.meta.match_id.clone());
        let browser_events = MatchBrowserPanel::new(
            self.selection.tournament_key(),
            self.browser_listings(),
            selected_id,
            busy,
        )
        .render(ui);
        for event in browser_events {
            match event {
                BrowserEvent::List(key) => self.request_browse(key),
                BrowserEvent::Open(match_id) => {
                    self.selection.match_id = match_id.clone();
                    self.request_match(MatchSelector::ById(match_id));
                }
            }
        }
    }

    fn render_settings_widgets(&mut self, ui: &mut Ui) {
        if let Some(settings) = SettingsPanel::new(self.settings).render(ui).pop() {
            self.settings = settings;
            self.reanalyze();
        }
        if let Some(visibility) = DisplayPanel::new(self.visibility).render(ui).pop() {
            self.visibility = visibility;
        }
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if let Some(error) = &self.last_error {
                    ui.group(|ui| {
                        ui.label_error(error.title());
                        ui.label_error(error.to_string());
                        ui.label_subdued(UI_TEXT.error_hint);
                    });
                    ui.add_space(8.0);
                }

                if self.is_loading() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(UI_TEXT.loading_heading);
                    });
                    return;
                }

                if self.analysis.is_none() {
                    if self.last_error.is_none() {
                        Self::render_welcome(ui);
                    }
                    return;
                }

                ScrollArea::vertical()
                    .id_salt("analysis_view")
                    .show(ui, |ui| self.render_analysis(ui));
            });
    }

    fn render_welcome(ui: &mut Ui) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(UI_TEXT.welcome_heading).color(UI_CONFIG.colors.heading));
            ui.add_space(8.0);
            ui.label(UI_TEXT.welcome_body);
            ui.add_space(16.0);
            ui.label_subdued(UI_TEXT.data_source_note);
        });
    }

    fn render_analysis(&mut self, ui: &mut Ui) {
        let Some(analysis) = self.analysis.as_ref() else {
            return;
        };

        ui_summary::show_match_summary(ui, analysis);

        section_heading(ui, UI_TEXT.momentum_plot_heading);
        if analysis.settings.x_axis != analysis.x_axis {
            ui.label_subdued("Elapsed times missing for this match, plotting by point number.");
        }
        self.plot_view
            .show_momentum_plot(ui, analysis, &self.visibility);

        ui_summary::show_set_table(ui, analysis);

        section_heading(ui, UI_TEXT.set_plots_heading);
        charts::show_set_plots(ui, analysis);

        let cache = self.plot_view.cache_for(analysis);

        section_heading(ui, UI_TEXT.heat_strip_heading);
        charts::show_heat_strip(ui, cache, analysis);

        section_heading(ui, UI_TEXT.distribution_heading);
        charts::show_distribution(ui, cache, analysis);

        section_heading(ui, UI_TEXT.changes_heading);
        charts::show_change_bars(ui, analysis);

        ui_summary::show_key_moments(ui, analysis);
        ui.add_space(20.0);
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.status_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    match self.current_source() {
                        Some(source) => ui.metric("Source", source, UI_CONFIG.colors.label),
                        None => ui.label_subdued("No data loaded"),
                    }
                    ui.separator();

                    if let Some(key) = self.pending_key {
                        ui.spinner();
                        ui.label_subdued(format!("Loading {}", key));
                        ui.separator();
                    }

                    if let Some(analysis) = &self.analysis {
                        ui.metric("Match", &analysis.meta.match_id, UI_CONFIG.colors.label);
                        ui.separator();
                        ui.metric(
                            "Points",
                            &analysis.point_count().to_string(),
                            UI_CONFIG.colors.label,
                        );
                        ui.separator();
                        ui.metric(
                            "Model",
                            &analysis.settings.momentum.model.to_string(),
                            UI_CONFIG.colors.label,
                        );
                        ui.separator();
                    }

                    ui.label_subdued(format!("{} tournament(s) cached", self.tournaments.len()));
                    ui.separator();
                    ui.label_subdued("Press H for shortcuts");
                });
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong().color(UI_CONFIG.colors.heading));
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_title)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label("Shortcuts work while no text field has focus:");
                ui.add_space(5.0);

                let shortcuts = [
                    ("H", "Toggle this help panel"),
                    ("B", "Toggle set boundaries"),
                    ("K", "Toggle key moments"),
                    ("T", "Toggle turning points"),
                    ("S", "Toggle line smoothing"),
                    ("Esc", "Close this panel"),
                ];

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });

                ui.add_space(10.0);
                ui.label_subdued(format!(
                    "Heat strip cells: {} points each, at most {}.",
                    PLOT_CONFIG.points_per_heat_bin, PLOT_CONFIG.max_heat_bins
                ));
            });
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Typing a player name must not toggle charts
        if ctx.wants_keyboard_input() {
            return;
        }

        let mut toggle_smoothing = false;
        ctx.input(|i| {
            if i.key_pressed(Key::H) {
                self.show_help = !self.show_help;
            }
            if i.key_pressed(Key::Escape) && self.show_help {
                self.show_help = false;
            }
            if i.key_pressed(Key::B) {
                self.visibility.set_boundaries = !self.visibility.set_boundaries;
            }
            if i.key_pressed(Key::K) {
                self.visibility.key_moments = !self.visibility.key_moments;
            }
            if i.key_pressed(Key::T) {
                self.visibility.turning_points = !self.visibility.turning_points;
            }
            toggle_smoothing = i.key_pressed(Key::S);
        });

        if toggle_smoothing {
            self.settings.smoothing_window = match self.settings.smoothing_window {
                Some(_) => None,
                None => Some(ANALYSIS.smoothing.default_window),
            };
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Smoothing toggled: {:?}", self.settings.smoothing_window);
            }
            self.reanalyze();
        }
    }
}
