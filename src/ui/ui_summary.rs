use eframe::egui::{Grid, RichText, Ui};

use crate::analysis::MatchAnalysis;
use crate::domain::Player;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_momentum, last_name, player_color, section_heading};
use crate::utils::time_utils;

/// Header line, final score and the two players' headline numbers.
pub fn show_match_summary(ui: &mut Ui, analysis: &MatchAnalysis) {
    let meta = &analysis.meta;
    let stats = &analysis.stats;

    section_heading(ui, UI_TEXT.summary_heading);
    ui.horizontal(|ui| {
        ui.label_player(Player::One, &meta.player1);
        ui.label("vs");
        ui.label_player(Player::Two, &meta.player2);
    });

    let mut context = vec![meta.key.to_string()];
    if let Some(round) = &meta.round {
        context.push(round.clone());
    }
    if let Some(secs) = stats.duration_secs {
        context.push(time_utils::describe_duration(secs));
    }
    context.push(format!("{} points", stats.total_points));
    ui.label_subdued(context.join(" · "));

    if !stats.final_score.is_empty() {
        let (p1_sets, p2_sets) = stats.final_score.sets_won();
        ui.horizontal(|ui| {
            ui.label(RichText::new(stats.final_score.to_string()).strong().size(18.0));
            ui.label_subdued(format!("({}-{} in sets)", p1_sets, p2_sets));
        });
    }
    match stats.winner {
        Some(winner) => ui.metric("Winner", meta.player_name(winner), player_color(winner)),
        None => ui.metric("Winner", "undecided", UI_CONFIG.colors.muted),
    }

    ui.add_space(6.0);
    Grid::new("player_metrics")
        .num_columns(3)
        .spacing([24.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("");
            ui.label_player(Player::One, last_name(&meta.player1));
            ui.label_player(Player::Two, last_name(&meta.player2));
            ui.end_row();

            for (label, values) in player_metric_rows(analysis) {
                ui.label_subdued(label);
                ui.label(values[0].as_str());
                ui.label(values[1].as_str());
                ui.end_row();
            }
        });

    ui.add_space(4.0);
    ui.label_subdued(format!(
        "Aces {} · Double faults {} · Break points {} · Momentum swings {}",
        stats.aces, stats.double_faults, stats.break_points, stats.momentum.swings
    ));
}

/// (row label, [player 1 value, player 2 value]) for the metrics grid.
pub fn player_metric_rows(analysis: &MatchAnalysis) -> Vec<(&'static str, [String; 2])> {
    let stats = &analysis.stats;
    let per_player = |f: &dyn Fn(Player) -> String| [f(Player::One), f(Player::Two)];

    vec![
        (
            "Points won",
            per_player(&|p: Player| stats.points_won(p).to_string()),
        ),
        (
            "Ahead on momentum",
            per_player(&|p: Player| format!("{:.1}%", stats.momentum.dominance_pct(p))),
        ),
        (
            "Peak advantage",
            per_player(&|p: Player| format!("{:.1}", stats.momentum.peak_for(p))),
        ),
        (
            "Longest run",
            per_player(&|p: Player| {
                analysis
                    .key_moments
                    .longest_run(p)
                    .map_or_else(|| "-".to_string(), |run| format!("{} pts", run.len()))
            }),
        ),
        (
            "Consistency (0-10)",
            per_player(&|p: Player| format!("{:.2}", analysis.consistency(p))),
        ),
    ]
}

pub fn show_set_table(ui: &mut Ui, analysis: &MatchAnalysis) {
    section_heading(ui, UI_TEXT.set_table_heading);

    Grid::new("set_breakdown")
        .num_columns(7)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for header in ["Set", "Games", "Points", "Won", "Duration", "Avg", "Net"] {
                ui.label_subheader(header);
            }
            ui.end_row();

            for row in &analysis.set_breakdown {
                ui.label(row.set_number.to_string());
                let games = RichText::new(format!("{}-{}", row.p1_games, row.p2_games));
                match row.winner() {
                    Some(p) => ui.label(games.color(player_color(p))),
                    None => ui.label(games),
                };
                ui.label(row.points_played.to_string());
                ui.label(format!("{}-{}", row.p1_points_won, row.p2_points_won));
                ui.label(
                    row.duration_secs
                        .map_or_else(|| "-".to_string(), time_utils::describe_duration),
                );
                ui.label(format_momentum(row.average_momentum));
                ui.label(format_momentum(row.net_change));
                ui.end_row();
            }
        });
}

/// Readable lines for the key-moments list, most telling first.
pub fn key_moment_lines(analysis: &MatchAnalysis, limit: usize) -> Vec<(Option<Player>, String)> {
    let moments = &analysis.key_moments;
    let name = |p: Player| last_name(analysis.meta.player_name(p)).to_string();
    let origin = analysis.settings.origin();
    let mut lines = Vec::new();

    for peak in &moments.peaks {
        lines.push((
            Some(peak.player),
            format!(
                "Point {}: {} peak at {}",
                peak.index + 1,
                name(peak.player),
                format_momentum(peak.momentum - origin)
            ),
        ));
    }

    let mut runs: Vec<_> = moments.runs.iter().collect();
    runs.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));
    for run in runs.into_iter().take(limit) {
        lines.push((
            Some(run.player),
            format!(
                "Points {}-{}: {} won {} in a row",
                run.start + 1,
                run.end + 1,
                name(run.player),
                run.len()
            ),
        ));
    }

    let mut shifts: Vec<_> = moments.shifts.iter().collect();
    shifts.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));
    for shift in shifts.into_iter().take(limit) {
        let towards = if shift.change >= 0.0 { Player::One } else { Player::Two };
        lines.push((
            Some(towards),
            format!(
                "Point {}: swing of {} towards {}",
                shift.index + 1,
                format_momentum(shift.change),
                name(towards)
            ),
        ));
    }

    lines.push((
        None,
        format!(
            "{} lead changes, {} turning points",
            moments.lead_changes.len(),
            moments.turning_points.len()
        ),
    ));

    lines.truncate(limit);
    lines
}

pub fn show_key_moments(ui: &mut Ui, analysis: &MatchAnalysis) {
    section_heading(ui, UI_TEXT.key_moments_heading);
    for (player, line) in key_moment_lines(analysis, UI_CONFIG.max_key_moment_rows) {
        match player {
            Some(p) => ui.label(RichText::new(line).color(player_color(p))),
            None => ui.label(RichText::new(line).color(UI_CONFIG.colors.muted)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisSettings, analyze_match};
    use crate::data::{DatasetSource, EmbeddedDemoSource};
    use crate::domain::MatchSelector;

    fn demo_analysis() -> MatchAnalysis {
        let data = EmbeddedDemoSource
            .load_tournament(EmbeddedDemoSource::key())
            .unwrap();
        let m = data
            .resolve(&MatchSelector::ById("2011-frenchopen-9001".into()))
            .unwrap();
        analyze_match(&m, &AnalysisSettings::default()).unwrap()
    }

    #[test]
    fn metric_rows_agree_with_stats() {
        let analysis = demo_analysis();
        let rows = player_metric_rows(&analysis);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].0, "Points won");
        assert_eq!(rows[0].1[0], analysis.stats.p1_points_won.to_string());
        assert_eq!(rows[0].1[1], analysis.stats.p2_points_won.to_string());
    }

    #[test]
    fn key_moment_lines_respect_limit() {
        let analysis = demo_analysis();
        let lines = key_moment_lines(&analysis, 3);
        assert!(lines.len() <= 3);
        assert!(!lines.is_empty());

        let all = key_moment_lines(&analysis, 100);
        assert_eq!(all.len(), analysis.key_moments.peaks.len()
            + analysis.key_moments.runs.len()
            + analysis.key_moments.shifts.len()
            + 1);
    }
}
