use colorgrad::Gradient;
use std::hash::{Hash, Hasher};

use eframe::egui::{self, Color32};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot, PlotPoint};

use crate::analysis::{MatchAnalysis, XAxisMode};
use crate::config::PLOT_CONFIG;
use crate::domain::Player;
use crate::models::set_for_index;
use crate::ui::app::ChartVisibility;
use crate::ui::plot_layers::{
    KeyMomentLayer, LayerContext, LeadChangeLayer, MomentumLineLayer, PlotLayer, SetBoundaryLayer,
    TurningPointLayer, ZeroLineLayer,
};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_momentum, player_color, to_egui_color};
use crate::utils::maths_utils;

/// One cell of the advantage heat strip, spanning points `start..end`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub start: usize,
    pub end: usize,
    /// Mean momentum over the cell scaled into -1..=1
    pub advantage: f64,
    pub color: Color32,
}

/// Derived chart data that only changes with the analysis.
#[derive(Debug, Clone)]
pub struct PlotCache {
    pub series_hash: u64,
    pub heat_cells: Vec<HeatCell>,
    pub histogram_centres: Vec<f64>,
    pub histogram_counts: Vec<usize>,
    pub histogram_bin_width: f64,
}

#[derive(Default)]
pub struct PlotView {
    cache: Option<PlotCache>,
}

impl PlotView {
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    pub fn show_momentum_plot(
        &mut self,
        ui: &mut egui::Ui,
        analysis: &MatchAnalysis,
        visibility: &ChartVisibility,
    ) {
        let legend = Legend::default().position(Corner::RightTop);

        Plot::new("momentum_plot")
            .height(PLOT_CONFIG.main_plot_height)
            .legend(legend)
            .custom_x_axes(vec![create_x_axis(analysis.x_axis)])
            .custom_y_axes(vec![create_y_axis()])
            .label_formatter(|_name, value| hover_label(analysis, value))
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let ctx = LayerContext {
                    analysis,
                    visibility,
                };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(ZeroLineLayer),
                    Box::new(SetBoundaryLayer),
                    Box::new(MomentumLineLayer),
                    Box::new(LeadChangeLayer),
                    Box::new(TurningPointLayer),
                    Box::new(KeyMomentLayer),
                ];

                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
    }

    /// Heat strip and histogram data for `analysis`, rebuilt when the series changes.
    pub fn cache_for(&mut self, analysis: &MatchAnalysis) -> &PlotCache {
        let current_hash = series_hash(analysis);
        if self.cache.as_ref().map(|cache| cache.series_hash) != Some(current_hash) {
            self.cache = None;
        }
        self.cache
            .get_or_insert_with(|| calculate_plot_data(analysis, current_hash))
    }
}

fn series_hash(analysis: &MatchAnalysis) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    analysis.meta.match_id.hash(&mut hasher);
    for value in analysis.series.values() {
        value.to_bits().hash(&mut hasher);
    }
    analysis.settings.origin().to_bits().hash(&mut hasher);
    hasher.finish()
}

fn calculate_plot_data(analysis: &MatchAnalysis, series_hash: u64) -> PlotCache {
    let origin = analysis.settings.origin();
    let relative: Vec<f64> = analysis.series.values().iter().map(|v| v - origin).collect();

    let heat_cells = heat_cells(&relative);
    let (histogram_centres, histogram_counts) =
        maths_utils::histogram(analysis.series.values(), PLOT_CONFIG.distribution_bins);
    let histogram_bin_width = match histogram_centres.as_slice() {
        [first, second, ..] => second - first,
        _ => 1.0,
    };

    PlotCache {
        series_hash,
        heat_cells,
        histogram_centres,
        histogram_counts,
        histogram_bin_width,
    }
}

/// Number of heat strip cells for a match of `len` points.
pub fn heat_bin_count(len: usize) -> usize {
    (len / PLOT_CONFIG.points_per_heat_bin).clamp(1, PLOT_CONFIG.max_heat_bins)
}

/// Averages momentum (relative to even) over equal chunks of the match and
/// colors each chunk on the advantage gradient.
pub fn heat_cells(relative: &[f64]) -> Vec<HeatCell> {
    let ranges = maths_utils::chunk_ranges(relative.len(), heat_bin_count(relative.len()));
    let means: Vec<f64> = ranges
        .iter()
        .map(|r| relative[r.clone()].iter().sum::<f64>() / r.len() as f64)
        .collect();
    let scaled = maths_utils::normalize_max_abs(&means);

    let gradient = colorgrad::GradientBuilder::new()
        .html_colors(PLOT_CONFIG.advantage_gradient_colors)
        .build::<colorgrad::CatmullRomGradient>();
    if let Err(e) = &gradient {
        log::warn!("Advantage gradient unavailable, using flat colors: {}", e);
    }

    ranges
        .into_iter()
        .zip(scaled)
        .map(|(range, advantage)| {
            let color = match &gradient {
                // Gradient runs from player 2 (0.0) to player 1 (1.0)
                Ok(grad) => to_egui_color(grad.at(((advantage + 1.0) / 2.0) as f32)),
                Err(_) => flat_advantage_color(advantage),
            };
            HeatCell {
                start: range.start,
                end: range.end,
                advantage,
                color,
            }
        })
        .collect()
}

fn flat_advantage_color(advantage: f64) -> Color32 {
    let player = if advantage >= 0.0 { Player::One } else { Player::Two };
    player_color(player).gamma_multiply(advantage.abs().max(0.15) as f32)
}

/// Index of the point closest to plot coordinate `x`.
pub fn nearest_index(x_values: &[f64], x: f64) -> Option<usize> {
    if x_values.is_empty() {
        return None;
    }
    let after = x_values.partition_point(|&v| v < x);
    if after == 0 {
        return Some(0);
    }
    if after >= x_values.len() {
        return Some(x_values.len() - 1);
    }
    let before = after - 1;
    if (x - x_values[before]).abs() <= (x_values[after] - x).abs() {
        Some(before)
    } else {
        Some(after)
    }
}

fn hover_label(analysis: &MatchAnalysis, value: &PlotPoint) -> String {
    let Some(index) = nearest_index(&analysis.x_values, value.x) else {
        return String::new();
    };
    let momentum = analysis.display_values.get(index).copied().unwrap_or_default();
    let change = analysis.changes.get(index).copied().unwrap_or_default();
    let set = set_for_index(&analysis.sets, index)
        .map(|s| format!("Set {}", s.set_number))
        .unwrap_or_default();
    format!(
        "Point {}  {}\nMomentum {}\nChange {}",
        index + 1,
        set,
        format_momentum(momentum),
        format_momentum(change)
    )
}

fn create_x_axis(mode: XAxisMode) -> AxisHints<'static> {
    match mode {
        XAxisMode::PointNumber => AxisHints::new_x()
            .label("Point")
            .formatter(|grid_mark, _range| format!("{:.0}", grid_mark.value)),
        XAxisMode::ElapsedTime => AxisHints::new_x()
            .label("Elapsed (min)")
            .formatter(|grid_mark, _range| format!("{:.0}m", grid_mark.value)),
    }
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.momentum_axis)
        .formatter(|grid_mark, _range| format_momentum(grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_bins_scale_with_match_length() {
        assert_eq!(heat_bin_count(5), 1);
        assert_eq!(heat_bin_count(147), 14);
        assert_eq!(heat_bin_count(900), PLOT_CONFIG.max_heat_bins);
    }

    #[test]
    fn heat_cells_cover_match_and_keep_sign() {
        let mut relative: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        relative.extend((1..=20).map(|v| -(v as f64)));

        let cells = heat_cells(&relative);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0].start, 0);
        assert_eq!(cells.last().unwrap().end, 40);
        assert!(cells[0].advantage > 0.0);
        assert!(cells[3].advantage < 0.0);
        assert_eq!(cells[3].advantage, -1.0);
        assert!(cells.iter().all(|c| c.advantage.abs() <= 1.0));
    }

    #[test]
    fn empty_series_has_no_heat_cells() {
        assert!(heat_cells(&[]).is_empty());
    }

    #[test]
    fn nearest_index_picks_closest_point() {
        let xs = [1.0, 2.0, 3.0, 10.0];
        assert_eq!(nearest_index(&xs, -5.0), Some(0));
        assert_eq!(nearest_index(&xs, 2.4), Some(1));
        assert_eq!(nearest_index(&xs, 2.6), Some(2));
        assert_eq!(nearest_index(&xs, 7.0), Some(3));
        assert_eq!(nearest_index(&xs, 99.0), Some(3));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
