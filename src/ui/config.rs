use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub status_panel: Color32,
    pub error: Color32,
    pub muted: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    pub browser_max_height: f32,
    pub max_key_moment_rows: usize,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY, // This sets every label globally to this color
        heading: Color32::from_rgb(230, 230, 120),
        subsection_heading: Color32::from_rgb(120, 200, 120), // Grass court green
        central_panel: Color32::from_rgb(22, 28, 24),
        side_panel: Color32::from_rgb(25, 25, 25),
        status_panel: Color32::from_rgb(18, 18, 18),
        error: Color32::from_rgb(255, 100, 100),
        muted: Color32::from_gray(150),
    },
    side_panel_min_width: 260.0,
    browser_max_height: 220.0,
    max_key_moment_rows: 8,
};
