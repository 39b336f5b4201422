use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::analysis::key_moments::{KeyMomentParams, KeyMoments, find_key_moments};
use crate::analysis::statistics::{MatchStats, SetBreakdown, consistency_score, set_breakdown};
use crate::config::ANALYSIS;
use crate::domain::{Match, MatchMeta, Player};
use crate::error::AppError;
use crate::models::{
    GameSegment, MomentumModel, MomentumSeries, MomentumSettings, SetSegment, segment_games,
    segment_sets,
};
use crate::utils::{app_time, maths_utils, time_utils};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display,
)]
pub enum XAxisMode {
    #[default]
    #[strum(to_string = "Point number")]
    PointNumber,
    #[strum(to_string = "Elapsed time")]
    ElapsedTime,
}

/// User-adjustable knobs. Changing any of them re-runs `analyze_match` on the
/// already loaded match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub momentum: MomentumSettings,
    pub x_axis: XAxisMode,
    /// Centered rolling-mean window for the displayed line; `None` shows raw values
    pub smoothing_window: Option<usize>,
    pub key_moments: KeyMomentParams,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            momentum: MomentumSettings::default(),
            x_axis: XAxisMode::default(),
            smoothing_window: None,
            key_moments: KeyMomentParams::default(),
        }
    }
}

impl AnalysisSettings {
    /// Momentum before the first point.
    pub fn origin(&self) -> f64 {
        match self.momentum.model {
            MomentumModel::RunningDifferential => self.momentum.rule.baseline,
            MomentumModel::ExponentialDecay => 0.0,
        }
    }

    pub fn smoothing_window_clamped(&self) -> Option<usize> {
        self.smoothing_window
            .filter(|&w| w > 1)
            .map(|w| w.min(ANALYSIS.smoothing.max_window))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchAnalysis {
    pub meta: MatchMeta,
    pub settings: AnalysisSettings,
    /// One value per point, straight from the momentum model
    pub series: MomentumSeries,
    /// What the charts draw: `series`, smoothed when requested
    pub display_values: Vec<f64>,
    /// Per-point change of `series`
    pub changes: Vec<f64>,
    /// X coordinate per point for the axis actually in use
    pub x_values: Vec<f64>,
    /// Differs from `settings.x_axis` when elapsed times are missing
    pub x_axis: XAxisMode,
    pub sets: Vec<SetSegment>,
    pub games: Vec<GameSegment>,
    pub set_breakdown: Vec<SetBreakdown>,
    pub stats: MatchStats,
    pub key_moments: KeyMoments,
    pub p1_consistency: f64,
    pub p2_consistency: f64,
}

impl MatchAnalysis {
    pub fn consistency(&self, player: Player) -> f64 {
        match player {
            Player::One => self.p1_consistency,
            Player::Two => self.p2_consistency,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.len()
    }

    /// X coordinate of point `index`, for markers and set boundaries.
    pub fn x_at(&self, index: usize) -> f64 {
        self.x_values.get(index).copied().unwrap_or(index as f64 + 1.0)
    }
}

/// Point-number axis is 1-based; time axis is minutes since the first recorded point.
fn x_coordinates(m: &Match, requested: XAxisMode) -> (Vec<f64>, XAxisMode) {
    let by_point = || (1..=m.point_count()).map(|n| n as f64).collect();

    match requested {
        XAxisMode::PointNumber => (by_point(), XAxisMode::PointNumber),
        XAxisMode::ElapsedTime => {
            let elapsed: Option<Vec<u32>> = m.points.iter().map(|p| p.elapsed_secs).collect();
            match elapsed {
                Some(secs) if !secs.is_empty() => (
                    secs.into_iter().map(time_utils::secs_to_minutes).collect(),
                    XAxisMode::ElapsedTime,
                ),
                _ => {
                    log::warn!(
                        "{}: elapsed time missing, falling back to point numbers",
                        m.meta.match_id
                    );
                    (by_point(), XAxisMode::PointNumber)
                }
            }
        }
    }
}

pub fn analyze_match(m: &Match, settings: &AnalysisSettings) -> Result<MatchAnalysis, AppError> {
    let start = app_time::now();

    let series = settings.momentum.compute(&m.points)?;
    let origin = settings.origin();
    let sets = segment_sets(&m.points)?;
    let games = match segment_games(&m.points) {
        Ok(games) => games,
        Err(e) => {
            // Game numbering is informational only; the set segmentation above is what matters
            log::warn!("{}: ignoring game breakdown: {}", m.meta.match_id, e);
            Vec::new()
        }
    };

    let display_values = match settings.smoothing_window_clamped() {
        Some(window) => maths_utils::smooth_data(series.values(), window),
        None => series.values().to_vec(),
    };
    let changes = maths_utils::first_difference(series.values())
        .into_iter()
        .enumerate()
        .map(|(i, d)| if i == 0 { d - origin } else { d })
        .collect();
    let (x_values, x_axis) = x_coordinates(m, settings.x_axis);

    let set_rows = set_breakdown(&m.points, &series, &sets, &games, origin);
    let stats = MatchStats::compute(&m.points, &series, &sets, origin);
    let key_moments = find_key_moments(&m.points, &series, &settings.key_moments, origin);

    let analysis = MatchAnalysis {
        meta: m.meta.clone(),
        settings: *settings,
        p1_consistency: consistency_score(&series, Player::One, origin),
        p2_consistency: consistency_score(&series, Player::Two, origin),
        display_values,
        changes,
        x_values,
        x_axis,
        sets,
        games,
        set_breakdown: set_rows,
        stats,
        key_moments,
        series,
    };

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_analysis {
        log::info!(
            "Analysed {} ({} points, {} sets, {} turning points) in {} ms",
            analysis.meta.title(),
            analysis.point_count(),
            analysis.sets.len(),
            analysis.key_moments.turning_points.len(),
            app_time::elapsed_ms(start)
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = start;

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, Tournament, TournamentKey};
    use crate::error::DataError;

    fn meta() -> MatchMeta {
        MatchMeta {
            match_id: "2019-wimbledon-1".into(),
            key: TournamentKey::new(Tournament::Wimbledon, 2019),
            player1: "Aa Bb".into(),
            player2: "Cc Dd".into(),
            round: None,
            event_name: None,
        }
    }

    fn three_points() -> Match {
        let winners = [Player::One, Player::One, Player::Two];
        let points = winners
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let mut p = Point::simple(1, 1, i as u32 + 1, Some(w));
                p.elapsed_secs = Some(i as u32 * 60);
                p
            })
            .collect();
        Match::new(meta(), points)
    }

    #[test]
    fn three_point_match_end_to_end() {
        let analysis = analyze_match(&three_points(), &AnalysisSettings::default()).unwrap();
        assert_eq!(analysis.series.values(), &[1.0, 2.0, 1.0]);
        assert_eq!(analysis.display_values, vec![1.0, 2.0, 1.0]);
        assert_eq!(analysis.changes, vec![1.0, 1.0, -1.0]);
        assert_eq!(analysis.x_values, vec![1.0, 2.0, 3.0]);
        assert_eq!(analysis.sets.len(), 1);
        assert_eq!(analysis.set_breakdown[0].p1_points_won, 2);
    }

    #[test]
    fn empty_match_analyses_to_empty_outputs() {
        let analysis = analyze_match(&Match::new(meta(), Vec::new()), &AnalysisSettings::default()).unwrap();
        assert!(analysis.series.is_empty());
        assert!(analysis.sets.is_empty());
        assert!(analysis.set_breakdown.is_empty());
        assert_eq!(analysis.stats.total_points, 0);
    }

    #[test]
    fn time_axis_uses_minutes_and_falls_back() {
        let settings = AnalysisSettings {
            x_axis: XAxisMode::ElapsedTime,
            ..Default::default()
        };
        let mut m = three_points();
        let analysis = analyze_match(&m, &settings).unwrap();
        assert_eq!(analysis.x_axis, XAxisMode::ElapsedTime);
        assert_eq!(analysis.x_values, vec![0.0, 1.0, 2.0]);

        m.points[1].elapsed_secs = None;
        let analysis = analyze_match(&m, &settings).unwrap();
        assert_eq!(analysis.x_axis, XAxisMode::PointNumber);
        assert_eq!(analysis.x_at(2), 3.0);
    }

    #[test]
    fn missing_winner_surfaces_as_data_error() {
        let mut m = three_points();
        m.points[2].winner = None;
        assert!(matches!(
            analyze_match(&m, &AnalysisSettings::default()),
            Err(AppError::Data(DataError::UnknownWinner { index: 2, .. }))
        ));
    }

    #[test]
    fn broken_game_order_keeps_analysis_without_games() {
        let mut m = three_points();
        assert!(segment_games(&m.points).is_ok());
        m.points[1].game_no = 2;
        assert!(matches!(
            segment_games(&m.points),
            Err(DataError::GameOrder { index: 2, .. })
        ));

        let analysis = analyze_match(&m, &AnalysisSettings::default()).unwrap();
        assert!(analysis.games.is_empty());
        assert_eq!(analysis.sets.len(), 1);
        assert_eq!(analysis.set_breakdown[0].games_played, 0);
        assert_eq!(analysis.series.values(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn raised_baseline_moves_every_leader_check() {
        let mut settings = AnalysisSettings::default();
        settings.momentum.rule.baseline = 10.0;
        let winners = [Player::Two; 6];
        let points = winners
            .iter()
            .enumerate()
            .map(|(i, &w)| Point::simple(1, 1, i as u32 + 1, Some(w)))
            .collect();
        let analysis = analyze_match(&Match::new(meta(), points), &settings).unwrap();

        assert_eq!(analysis.series.values(), &[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        assert_eq!(analysis.stats.momentum.dominant_points(Player::One), 0);
        assert_eq!(analysis.stats.momentum.dominant_points(Player::Two), 6);
        assert_eq!(analysis.key_moments.peaks.len(), 1);
        assert_eq!(analysis.key_moments.peaks[0].player, Player::Two);
        assert!(analysis.consistency(Player::Two) > analysis.consistency(Player::One));
        assert_eq!(analysis.changes[0], -1.0);
    }

    #[test]
    fn smoothing_window_is_clamped() {
        let settings = AnalysisSettings {
            smoothing_window: Some(99),
            ..Default::default()
        };
        assert_eq!(settings.smoothing_window_clamped(), Some(ANALYSIS.smoothing.max_window));
        let off = AnalysisSettings {
            smoothing_window: Some(1),
            ..Default::default()
        };
        assert_eq!(off.smoothing_window_clamped(), None);
    }
}
