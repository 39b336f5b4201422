use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::config::PLOT_CONFIG;
use crate::domain::Player;
use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase() + ":";
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Creates a colored sub-section heading using the configured color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

pub fn player_color(player: Player) -> Color32 {
    match player {
        Player::One => PLOT_CONFIG.player1_color,
        Player::Two => PLOT_CONFIG.player2_color,
    }
}

/// "Djokovic" from "Novak Djokovic".
pub fn last_name(full_name: &str) -> &str {
    full_name.split_whitespace().last().unwrap_or(full_name)
}

/// Signed momentum with an explicit plus sign.
pub fn format_momentum(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}", value)
    } else {
        format!("{:.1}", value)
    }
}

pub fn to_egui_color(colorgrad_color: colorgrad::Color) -> Color32 {
    let rgba8 = colorgrad_color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba8[0], rgba8[1], rgba8[2], 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_numbers_format_for_display() {
        assert_eq!(last_name("Novak Djokovic"), "Djokovic");
        assert_eq!(last_name("Juan Martin del Potro"), "Potro");
        assert_eq!(last_name(""), "");
        assert_eq!(format_momentum(2.0), "+2.0");
        assert_eq!(format_momentum(-1.24), "-1.2");
        assert_eq!(format_momentum(0.0), "0.0");
    }
}
