//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub player1_color: Color32,
    pub player2_color: Color32,
    // Set boundary markers and labels
    pub set_boundary_color: Color32,
    pub zero_line_color: Color32,
    pub key_moment_color: Color32,
    pub key_moment_outline_color: Color32,
    pub turning_point_color: Color32,
    /// Heat strip gradient, from player 2 advantage through even to player 1 advantage
    pub advantage_gradient_colors: &'static [&'static str],
    pub momentum_line_width: f32,
    pub set_boundary_line_width: f32,
    pub marker_radius: f32,
    pub key_moment_radius: f32,
    /// Fixed heights (points) of the secondary charts
    pub main_plot_height: f32,
    pub set_plot_height: f32,
    pub distribution_plot_height: f32,
    pub heat_strip_height: f32,
    pub change_plot_height: f32,
    /// Histogram bins for the momentum distribution
    pub distribution_bins: usize,
    /// Heat strip uses min(max_heat_bins, points / points_per_heat_bin) bins
    pub max_heat_bins: usize,
    pub points_per_heat_bin: usize,
    /// Plot x axis divisions (split axis into n equal parts)
    pub plot_axis_divisions: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    player1_color: Color32::from_rgb(31, 119, 180), // Blue
    player2_color: Color32::from_rgb(214, 39, 40),  // Red
    set_boundary_color: Color32::from_rgb(160, 160, 160),
    zero_line_color: Color32::from_rgb(90, 90, 90),
    key_moment_color: Color32::from_rgb(255, 215, 0), // Gold
    key_moment_outline_color: Color32::from_rgb(255, 140, 0),
    turning_point_color: Color32::from_rgb(0, 191, 255), // Deep sky blue
    advantage_gradient_colors: &[
        "#d62728", // Player 2 red
        "#f4a582",
        "#f7f7f7", // Even
        "#92c5de",
        "#1f77b4", // Player 1 blue
    ],
    momentum_line_width: 2.5,
    set_boundary_line_width: 1.0,
    marker_radius: 2.0,
    key_moment_radius: 6.0,
    main_plot_height: 420.0,
    set_plot_height: 150.0,
    distribution_plot_height: 300.0,
    heat_strip_height: 120.0,
    change_plot_height: 220.0,
    distribution_bins: 30,
    max_heat_bins: 50,
    points_per_heat_bin: 10,
    plot_axis_divisions: 15,
};
