use eframe::egui::{Button, ComboBox, DragValue, Grid, RichText, ScrollArea, Slider, Ui};
use strum::IntoEnumIterator;

use crate::analysis::{AnalysisSettings, XAxisMode};
use crate::config::{ANALYSIS, DATASET, PresetMatch};
use crate::data::MatchListing;
use crate::domain::{Tournament, TournamentKey};
use crate::models::MomentumModel;
use crate::ui::app::{ChartVisibility, SelectionState};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

// ============================================================================
// Selection: tournament, year, players, match id
// ============================================================================

pub struct SelectionPanel<'a> {
    selection: &'a mut SelectionState,
    busy: bool,
}

impl<'a> SelectionPanel<'a> {
    pub fn new(selection: &'a mut SelectionState, busy: bool) -> Self {
        Self { selection, busy }
    }

    fn render_tournament_selector(&mut self, ui: &mut Ui) -> bool {
        let before = self.selection.tournament;
        ui.label(colored_subsection_heading(UI_TEXT.tournament_label));
        ComboBox::from_id_salt("tournament_selector")
            .selected_text(self.selection.tournament.to_string())
            .show_ui(ui, |ui| {
                for tournament in Tournament::iter() {
                    ui.selectable_value(
                        &mut self.selection.tournament,
                        tournament,
                        tournament.display_name(),
                    );
                }
            });
        before != self.selection.tournament
    }

    fn render_year_selector(&mut self, ui: &mut Ui) -> bool {
        ui.label(colored_subsection_heading(UI_TEXT.year_label));
        ui.add(
            DragValue::new(&mut self.selection.year)
                .range(DATASET.years.min..=DATASET.years.max)
                .speed(0.1),
        )
        .changed()
    }
}

#[derive(Debug, PartialEq)]
pub enum SelectionEvent {
    AnalyzeByPlayers,
    AnalyzeById,
    TournamentChanged(TournamentKey),
}

impl<'a> Panel for SelectionPanel<'a> {
    type Event = SelectionEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.selection_heading);

        let mut tournament_changed = false;
        ui.horizontal(|ui| {
            ui.vertical(|ui| tournament_changed |= self.render_tournament_selector(ui));
            ui.vertical(|ui| tournament_changed |= self.render_year_selector(ui));
        });
        if tournament_changed {
            events.push(SelectionEvent::TournamentChanged(self.selection.tournament_key()));
        }

        ui.add_space(5.0);
        Grid::new("player_inputs")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.player1_label);
                ui.text_edit_singleline(&mut self.selection.player1);
                ui.end_row();
                ui.label(UI_TEXT.player2_label);
                ui.text_edit_singleline(&mut self.selection.player2);
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.busy, Button::new(UI_TEXT.analyze_button))
                .clicked()
            {
                events.push(SelectionEvent::AnalyzeByPlayers);
            }
            if ui.button(UI_TEXT.swap_players_button).clicked() {
                std::mem::swap(&mut self.selection.player1, &mut self.selection.player2);
            }
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.match_id_label);
            ui.add(egui_text_edit(&mut self.selection.match_id));
            if ui
                .add_enabled(
                    !self.busy && !self.selection.match_id.trim().is_empty(),
                    Button::new(UI_TEXT.load_by_id_button),
                )
                .clicked()
            {
                events.push(SelectionEvent::AnalyzeById);
            }
        });

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && !events.is_empty() {
            log::info!("Selection events: {:?}", events);
        }

        events
    }
}

fn egui_text_edit(text: &mut String) -> eframe::egui::TextEdit<'_> {
    eframe::egui::TextEdit::singleline(text)
        .hint_text("2019-wimbledon-1701")
        .desired_width(140.0)
}

// ============================================================================
// Presets
// ============================================================================

pub struct PresetsPanel {
    presets: &'static [PresetMatch],
}

impl PresetsPanel {
    pub fn new(presets: &'static [PresetMatch]) -> Self {
        Self { presets }
    }
}

impl Panel for PresetsPanel {
    type Event = &'static PresetMatch;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.label(colored_subsection_heading(UI_TEXT.presets_heading));
        for preset in self.presets {
            if ui.small_button(preset.label).clicked() {
                events.push(preset);
            }
        }
        events
    }
}

// ============================================================================
// Match browser
// ============================================================================

pub struct MatchBrowserPanel {
    key: TournamentKey,
    listings: Option<(TournamentKey, Vec<MatchListing>)>,
    selected_id: Option<String>,
    busy: bool,
}

impl MatchBrowserPanel {
    pub fn new(
        key: TournamentKey,
        listings: Option<(TournamentKey, Vec<MatchListing>)>,
        selected_id: Option<String>,
        busy: bool,
    ) -> Self {
        Self {
            key,
            listings,
            selected_id,
            busy,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum BrowserEvent {
    List(TournamentKey),
    Open(String),
}

impl Panel for MatchBrowserPanel {
    type Event = BrowserEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            ui.label(colored_subsection_heading(UI_TEXT.browser_heading));
            if ui
                .add_enabled(!self.busy, Button::new(UI_TEXT.browser_load_button).small())
                .clicked()
            {
                events.push(BrowserEvent::List(self.key));
            }
        });

        let Some((key, listings)) = &self.listings else {
            ui.label_subdued(UI_TEXT.browser_empty);
            return events;
        };

        ui.label_subdued(format!("{}: {} matches", key, listings.len()));
        ScrollArea::vertical()
            .max_height(UI_CONFIG.browser_max_height)
            .id_salt("match_browser")
            .show(ui, |ui| {
                for listing in listings {
                    let is_selected = self.selected_id.as_deref() == Some(listing.meta.match_id.as_str());
                    let round = listing.meta.round.as_deref().unwrap_or("");
                    let text = format!("{}  {}", listing.meta.title(), round);
                    let response = ui
                        .selectable_label(is_selected, RichText::new(text).small())
                        .on_hover_text(format!(
                            "{} ({} points)",
                            listing.meta.match_id, listing.point_count
                        ));
                    if response.clicked() {
                        events.push(BrowserEvent::Open(listing.meta.match_id.clone()));
                    }
                }
            });

        events
    }
}

// ============================================================================
// Momentum settings
// ============================================================================

pub struct SettingsPanel {
    settings: AnalysisSettings,
}

impl SettingsPanel {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }
}

impl Panel for SettingsPanel {
    /// Emits the new settings once per frame in which anything changed.
    type Event = AnalysisSettings;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let before = self.settings;
        section_heading(ui, UI_TEXT.settings_heading);

        ui.label(colored_subsection_heading(UI_TEXT.model_label));
        ComboBox::from_id_salt("momentum_model")
            .selected_text(self.settings.momentum.model.to_string())
            .show_ui(ui, |ui| {
                for model in MomentumModel::iter() {
                    ui.selectable_value(&mut self.settings.momentum.model, model, model.to_string());
                }
            });

        if self.settings.momentum.model == MomentumModel::RunningDifferential {
            ui.add_space(5.0);
            ui.label(colored_subsection_heading(UI_TEXT.break_point_weight_label));
            ui.add(
                Slider::new(
                    &mut self.settings.momentum.rule.break_point_weight,
                    1.0..=ANALYSIS.momentum.max_break_point_weight,
                )
                .step_by(0.25)
                .suffix("×"),
            );
        }

        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.x_axis_label));
        ui.horizontal(|ui| {
            for mode in XAxisMode::iter() {
                ui.radio_value(&mut self.settings.x_axis, mode, mode.to_string());
            }
        });

        ui.add_space(5.0);
        let mut smoothing_on = self.settings.smoothing_window.is_some();
        ui.checkbox(&mut smoothing_on, UI_TEXT.smoothing_label);
        if smoothing_on {
            let mut window = self
                .settings
                .smoothing_window
                .unwrap_or(ANALYSIS.smoothing.default_window);
            ui.add(
                Slider::new(&mut window, 3..=ANALYSIS.smoothing.max_window)
                    .step_by(2.0)
                    .suffix(" pts"),
            );
            self.settings.smoothing_window = Some(window);
        } else {
            self.settings.smoothing_window = None;
        }

        if self.settings != before {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Analysis settings changed: {:?}", self.settings);
            }
            vec![self.settings]
        } else {
            Vec::new()
        }
    }
}

// ============================================================================
// Chart overlays
// ============================================================================

pub struct DisplayPanel {
    visibility: ChartVisibility,
}

impl DisplayPanel {
    pub fn new(visibility: ChartVisibility) -> Self {
        Self { visibility }
    }
}

impl Panel for DisplayPanel {
    type Event = ChartVisibility;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let before = self.visibility;
        spaced_separator(ui);
        ui.label(colored_subsection_heading(UI_TEXT.display_heading));
        ui.checkbox(&mut self.visibility.set_boundaries, UI_TEXT.show_set_boundaries);
        ui.checkbox(&mut self.visibility.key_moments, UI_TEXT.show_key_moments);
        ui.checkbox(&mut self.visibility.turning_points, UI_TEXT.show_turning_points);
        if self.visibility != before {
            vec![self.visibility]
        } else {
            Vec::new()
        }
    }
}
