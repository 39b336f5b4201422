use eframe::egui::Color32;
use egui_plot::{HLine, Line, LineStyle, MarkerShape, PlotPoint, PlotPoints, PlotUi, Points, Text, VLine};

use crate::analysis::MatchAnalysis;
use crate::config::PLOT_CONFIG;
use crate::domain::Player;
use crate::ui::app::ChartVisibility;
use crate::ui::utils::{last_name, player_color};
use crate::utils::maths_utils;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub analysis: &'a MatchAnalysis,
    pub visibility: &'a ChartVisibility,
}

impl LayerContext<'_> {
    fn point_at(&self, index: usize) -> Option<[f64; 2]> {
        let y = *self.analysis.display_values.get(index)?;
        Some([self.analysis.x_at(index), y])
    }

    fn y_top(&self) -> f64 {
        let origin = self.analysis.settings.origin();
        maths_utils::get_min_max(&self.analysis.display_values).map_or(origin, |(_, hi)| hi.max(origin))
    }
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. ZERO LINE
// ============================================================================
pub struct ZeroLineLayer;

impl PlotLayer for ZeroLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        plot_ui.hline(
            HLine::new("Even", ctx.analysis.settings.origin())
                .color(PLOT_CONFIG.zero_line_color)
                .width(1.0)
                .style(LineStyle::dashed_dense()),
        );
    }
}

// ============================================================================
// 2. SET BOUNDARIES
// ============================================================================
pub struct SetBoundaryLayer;

impl PlotLayer for SetBoundaryLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.set_boundaries {
            return;
        }
        let y_top = ctx.y_top();

        for (i, set) in ctx.analysis.sets.iter().enumerate() {
            let x_start = ctx.analysis.x_at(set.start);
            if i > 0 {
                plot_ui.vline(
                    VLine::new("Set boundary", x_start)
                        .color(PLOT_CONFIG.set_boundary_color)
                        .width(PLOT_CONFIG.set_boundary_line_width)
                        .style(LineStyle::dashed_loose()),
                );
            }
            plot_ui.text(
                Text::new(
                    "Set boundary",
                    PlotPoint::new(x_start, y_top),
                    format!("Set {}", set.set_number),
                )
                .color(PLOT_CONFIG.set_boundary_color)
                .anchor(eframe::egui::Align2::LEFT_BOTTOM),
            );
        }
    }
}

// ============================================================================
// 3. MOMENTUM LINE
// ============================================================================
pub struct MomentumLineLayer;

impl PlotLayer for MomentumLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let a = ctx.analysis;
        let origin = a.settings.origin();

        for run in leader_runs(&a.x_values, &a.display_values, origin) {
            let (name, color) = match run.leader {
                Some(player) => (
                    format!("{} ahead", last_name(a.meta.player_name(player))),
                    player_color(player),
                ),
                None => ("Even".to_string(), PLOT_CONFIG.zero_line_color),
            };
            plot_ui.line(
                Line::new(name, PlotPoints::new(run.points))
                    .color(color)
                    .width(PLOT_CONFIG.momentum_line_width),
            );
        }

        if a.point_count() <= 300 {
            let markers: Vec<[f64; 2]> = (0..a.point_count()).filter_map(|i| ctx.point_at(i)).collect();
            plot_ui.points(
                Points::new("Points", markers)
                    .radius(PLOT_CONFIG.marker_radius)
                    .color(Color32::from_white_alpha(90)),
            );
        }
    }
}

/// Consecutive stretch of the line during which one player (or nobody) leads.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRun {
    pub leader: Option<Player>,
    pub points: Vec<[f64; 2]>,
}

/// Splits the line wherever the leader changes. Each run repeats the previous
/// run's last point so the pieces join up.
pub fn leader_runs(xs: &[f64], ys: &[f64], origin: f64) -> Vec<LeaderRun> {
    let mut runs: Vec<LeaderRun> = Vec::new();

    for (&x, &y) in xs.iter().zip(ys) {
        let leader = if y > origin {
            Some(Player::One)
        } else if y < origin {
            Some(Player::Two)
        } else {
            None
        };

        match runs.last_mut() {
            Some(run) if run.leader == leader => run.points.push([x, y]),
            Some(run) => {
                let joint = run.points.last().copied();
                let mut points: Vec<[f64; 2]> = joint.into_iter().collect();
                points.push([x, y]);
                runs.push(LeaderRun { leader, points });
            }
            None => runs.push(LeaderRun {
                leader,
                points: vec![[x, y]],
            }),
        }
    }

    runs
}

// ============================================================================
// 4. KEY MOMENTS (shifts and peaks)
// ============================================================================
pub struct KeyMomentLayer;

impl PlotLayer for KeyMomentLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.key_moments {
            return;
        }
        let moments = &ctx.analysis.key_moments;

        let shifts: Vec<[f64; 2]> = moments
            .shifts
            .iter()
            .filter_map(|s| ctx.point_at(s.index))
            .collect();
        if !shifts.is_empty() {
            plot_ui.points(
                Points::new("Momentum shift", shifts)
                    .shape(MarkerShape::Diamond)
                    .radius(PLOT_CONFIG.key_moment_radius)
                    .color(PLOT_CONFIG.key_moment_color),
            );
        }

        for peak in &moments.peaks {
            let Some(point) = ctx.point_at(peak.index) else {
                continue;
            };
            let label = format!("{} peak", last_name(ctx.analysis.meta.player_name(peak.player)));
            plot_ui.points(
                Points::new("Peak", vec![point])
                    .shape(MarkerShape::Asterisk)
                    .radius(PLOT_CONFIG.key_moment_radius * 1.5)
                    .color(PLOT_CONFIG.key_moment_outline_color),
            );
            plot_ui.text(
                Text::new("Peak", PlotPoint::new(point[0], point[1]), label)
                    .color(player_color(peak.player))
                    .anchor(match peak.player {
                        Player::One => eframe::egui::Align2::CENTER_BOTTOM,
                        Player::Two => eframe::egui::Align2::CENTER_TOP,
                    }),
            );
        }
    }
}

// ============================================================================
// 5. TURNING POINTS
// ============================================================================
pub struct TurningPointLayer;

impl PlotLayer for TurningPointLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.turning_points {
            return;
        }
        let points: Vec<[f64; 2]> = ctx
            .analysis
            .key_moments
            .turning_points
            .iter()
            .filter_map(|tp| ctx.point_at(tp.index))
            .collect();
        if points.is_empty() {
            return;
        }
        plot_ui.points(
            Points::new("Turning point", points)
                .shape(MarkerShape::Circle)
                .filled(false)
                .radius(PLOT_CONFIG.key_moment_radius)
                .color(PLOT_CONFIG.turning_point_color),
        );
    }
}

// ============================================================================
// 6. LEAD CHANGES
// ============================================================================
pub struct LeadChangeLayer;

impl PlotLayer for LeadChangeLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.key_moments {
            return;
        }
        for change in &ctx.analysis.key_moments.lead_changes {
            let Some(point) = ctx.point_at(change.index) else {
                continue;
            };
            plot_ui.points(
                Points::new("Lead change", vec![point])
                    .shape(MarkerShape::Up)
                    .radius(PLOT_CONFIG.marker_radius * 2.0)
                    .color(player_color(change.leader)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_on_leader_change_and_share_joints() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 2.0, 1.0, -1.0, -2.0];
        let runs = leader_runs(&xs, &ys, 0.0);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].leader, Some(Player::One));
        assert_eq!(runs[0].points.len(), 3);
        assert_eq!(runs[1].leader, Some(Player::Two));
        assert_eq!(runs[1].points[0], [3.0, 1.0]);
        assert_eq!(runs[1].points.len(), 3);
    }

    #[test]
    fn level_stretch_is_its_own_run() {
        let runs = leader_runs(&[1.0, 2.0, 3.0], &[1.0, 0.0, 0.0], 0.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].leader, None);
        assert_eq!(runs[1].points, vec![[1.0, 1.0], [2.0, 0.0], [3.0, 0.0]]);
    }

    #[test]
    fn empty_line_has_no_runs() {
        assert!(leader_runs(&[], &[], 0.0).is_empty());
    }
}
