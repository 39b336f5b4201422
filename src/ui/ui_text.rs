//! User-facing strings.

pub struct UiText {
    pub app_title: &'static str,
    pub selection_heading: &'static str,
    pub tournament_label: &'static str,
    pub year_label: &'static str,
    pub player1_label: &'static str,
    pub player2_label: &'static str,
    pub match_id_label: &'static str,
    pub analyze_button: &'static str,
    pub load_by_id_button: &'static str,
    pub swap_players_button: &'static str,
    pub presets_heading: &'static str,
    pub browser_heading: &'static str,
    pub browser_load_button: &'static str,
    pub browser_empty: &'static str,
    pub settings_heading: &'static str,
    pub model_label: &'static str,
    pub break_point_weight_label: &'static str,
    pub x_axis_label: &'static str,
    pub smoothing_label: &'static str,
    pub display_heading: &'static str,
    pub show_set_boundaries: &'static str,
    pub show_key_moments: &'static str,
    pub show_turning_points: &'static str,
    pub welcome_heading: &'static str,
    pub welcome_body: &'static str,
    pub loading_heading: &'static str,
    pub error_hint: &'static str,
    pub momentum_plot_heading: &'static str,
    pub momentum_axis: &'static str,
    pub set_plots_heading: &'static str,
    pub distribution_heading: &'static str,
    pub heat_strip_heading: &'static str,
    pub changes_heading: &'static str,
    pub summary_heading: &'static str,
    pub set_table_heading: &'static str,
    pub key_moments_heading: &'static str,
    pub help_title: &'static str,
    pub data_source_note: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Tennis Momentum Analyzer",
    selection_heading: "Match",
    tournament_label: "Tournament",
    year_label: "Year",
    player1_label: "Player 1",
    player2_label: "Player 2",
    match_id_label: "Match id",
    analyze_button: "Analyze match",
    load_by_id_button: "Load id",
    swap_players_button: "⇄ Swap",
    presets_heading: "Famous matches",
    browser_heading: "Browse tournament",
    browser_load_button: "List matches",
    browser_empty: "No tournament loaded yet",
    settings_heading: "Momentum",
    model_label: "Model",
    break_point_weight_label: "Break point weight",
    x_axis_label: "X axis",
    smoothing_label: "Smooth line",
    display_heading: "Display",
    show_set_boundaries: "Set boundaries",
    show_key_moments: "Key moments",
    show_turning_points: "Turning points",
    welcome_heading: "Pick a match to begin",
    welcome_body: "Choose a tournament, year and both players, or start from a famous match on the left.",
    loading_heading: "Loading tournament data...",
    error_hint: "Adjust the selection and try again.",
    momentum_plot_heading: "Momentum",
    momentum_axis: "Momentum (+ favours player 1)",
    set_plots_heading: "Set by set",
    distribution_heading: "Momentum distribution",
    heat_strip_heading: "Advantage over the match",
    changes_heading: "Point-by-point change",
    summary_heading: "Match summary",
    set_table_heading: "Set breakdown",
    key_moments_heading: "Key moments",
    help_title: "⌨️ Keyboard Shortcuts",
    data_source_note: "Point-by-point data: Jeff Sackmann, tennis_slam_pointbypoint",
};
