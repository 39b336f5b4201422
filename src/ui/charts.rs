//! Secondary charts shown under the main momentum plot.

use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, HLine, Line, LineStyle, Plot, PlotPoints, Polygon, VLine};

use crate::analysis::MatchAnalysis;
use crate::config::PLOT_CONFIG;
use crate::domain::Player;
use crate::ui::plot_layers::leader_runs;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_plot_view::PlotCache;
use crate::ui::utils::{last_name, player_color};
use crate::utils::time_utils;

/// Bar width that leaves a small gap between neighbouring points on either axis.
fn bar_width(x_values: &[f64]) -> f64 {
    match (x_values.first(), x_values.last()) {
        (Some(first), Some(last)) if x_values.len() > 1 && last > first => {
            (last - first) / (x_values.len() - 1) as f64 * 0.8
        }
        _ => 0.8,
    }
}

fn leader_color(value: f64, origin: f64) -> eframe::egui::Color32 {
    if value >= origin {
        player_color(Player::One)
    } else {
        player_color(Player::Two)
    }
}

/// One small line plot per set, each on its own x range.
pub fn show_set_plots(ui: &mut Ui, analysis: &MatchAnalysis) {
    let origin = analysis.settings.origin();

    for (set, row) in analysis.sets.iter().zip(&analysis.set_breakdown) {
        let range = set.range();
        let xs = &analysis.x_values[range.clone()];
        let ys = &analysis.display_values[range];

        let mut caption = format!(
            "Set {}: {}-{} in games, points {}-{}",
            set.set_number, row.p1_games, row.p2_games, row.p1_points_won, row.p2_points_won
        );
        if let Some(secs) = row.duration_secs {
            caption.push_str(&format!(", {}", time_utils::describe_duration(secs)));
        }
        ui.label_subheader(caption);

        Plot::new(format!("set_plot_{}", set.set_number))
            .height(PLOT_CONFIG.set_plot_height)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .show(ui, |plot_ui| {
                plot_ui.hline(
                    HLine::new("Even", origin)
                        .color(PLOT_CONFIG.zero_line_color)
                        .style(LineStyle::dashed_dense()),
                );
                for run in leader_runs(xs, ys, origin) {
                    let color = run
                        .leader
                        .map_or(PLOT_CONFIG.zero_line_color, player_color);
                    plot_ui.line(
                        Line::new(format!("Set {}", set.set_number), PlotPoints::new(run.points))
                            .color(color)
                            .width(PLOT_CONFIG.momentum_line_width * 0.8),
                    );
                }
            });
        ui.add_space(4.0);
    }
}

/// Histogram of momentum values, bars colored by which side of even they fall.
pub fn show_distribution(ui: &mut Ui, cache: &PlotCache, analysis: &MatchAnalysis) {
    let origin = analysis.settings.origin();
    let bars: Vec<Bar> = cache
        .histogram_centres
        .iter()
        .zip(&cache.histogram_counts)
        .map(|(&centre, &count)| {
            Bar::new(centre, count as f64)
                .width(cache.histogram_bin_width * 0.95)
                .fill(leader_color(centre, origin).gamma_multiply(0.8))
        })
        .collect();
    let mean = analysis.stats.momentum.mean;

    Plot::new("distribution_plot")
        .height(PLOT_CONFIG.distribution_plot_height)
        .x_axis_label("Momentum")
        .y_axis_label("Points")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Points at this momentum", bars));
            plot_ui.vline(
                VLine::new(format!("Mean {:.1}", mean), mean)
                    .color(PLOT_CONFIG.key_moment_color)
                    .style(LineStyle::dashed_loose()),
            );
        });
}

/// Horizontal strip of cells, one per chunk of the match, colored by who held
/// the advantage on average.
pub fn show_heat_strip(ui: &mut Ui, cache: &PlotCache, analysis: &MatchAnalysis) {
    ui.horizontal(|ui| {
        ui.label_player(Player::Two, last_name(analysis.meta.player2.as_str()));
        ui.label_subdued("◀ advantage ▶");
        ui.label_player(Player::One, last_name(analysis.meta.player1.as_str()));
    });

    Plot::new("heat_strip")
        .height(PLOT_CONFIG.heat_strip_height)
        .show_axes([true, false])
        .show_grid([false, false])
        .x_axis_label("Point")
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .label_formatter(|_name, value| format!("Point {:.0}", value.x.max(0.0) + 1.0))
        .show(ui, |plot_ui| {
            for cell in &cache.heat_cells {
                let (x0, x1) = (cell.start as f64, cell.end as f64);
                let rect = PlotPoints::new(vec![[x0, 0.0], [x1, 0.0], [x1, 1.0], [x0, 1.0]]);
                plot_ui.polygon(
                    Polygon::new(format!("{:+.2}", cell.advantage), rect)
                        .fill_color(cell.color)
                        .stroke(Stroke::NONE),
                );
            }
        });
}

/// Per-point change in momentum as signed bars.
pub fn show_change_bars(ui: &mut Ui, analysis: &MatchAnalysis) {
    let width = bar_width(&analysis.x_values);
    let bars: Vec<Bar> = analysis
        .changes
        .iter()
        .enumerate()
        .map(|(i, &change)| {
            Bar::new(analysis.x_at(i), change)
                .width(width)
                .fill(leader_color(change, 0.0))
        })
        .collect();

    Plot::new("change_plot")
        .height(PLOT_CONFIG.change_plot_height)
        .y_axis_label("Change")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Change per point", bars));
        });
}
