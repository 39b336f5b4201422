use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::ANALYSIS;
use crate::domain::{Player, Point};
use crate::models::{GameSegment, MomentumSeries, SetSegment};
use crate::utils::maths_utils;

/// Games per set as read from the last point of each set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalScore {
    pub sets: Vec<(u32, u32)>,
}

impl FinalScore {
    pub fn from_points(points: &[Point], segments: &[SetSegment]) -> Self {
        let sets = segments
            .iter()
            .filter_map(|s| points.get(s.end))
            .map(|p| (p.p1_games_won, p.p2_games_won))
            .collect();
        Self { sets }
    }

    /// Sets won by (player 1, player 2). Level sets count for nobody.
    pub fn sets_won(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(a, b), &(g1, g2)| {
            if g1 > g2 {
                (a + 1, b)
            } else if g2 > g1 {
                (a, b + 1)
            } else {
                (a, b)
            }
        })
    }

    pub fn winner(&self) -> Option<Player> {
        let (a, b) = self.sets_won();
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl std::fmt::Display for FinalScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .sets
            .iter()
            .map(|(a, b)| format!("{}-{}", a, b))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&text)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MomentumStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Point index of `max` / `min` (first occurrence)
    pub max_index: usize,
    pub min_index: usize,
    /// Points whose absolute change exceeds the median absolute change
    pub swings: usize,
    /// Points where momentum favoured player 1 / player 2
    pub p1_dominant_points: usize,
    pub p2_dominant_points: usize,
    pub total_points: usize,
    /// Momentum before the first point; "ahead" means above or below this
    pub origin: f64,
}

impl MomentumStats {
    pub fn from_series(series: &MomentumSeries, origin: f64) -> Self {
        let values = series.values();
        let Some((min, max)) = maths_utils::get_min_max(values) else {
            return Self {
                origin,
                ..Self::default()
            };
        };

        // First point has no predecessor and counts as no change
        let abs_changes: Vec<f64> = std::iter::once(0.0)
            .chain(values.windows(2).map(|w| (w[1] - w[0]).abs()))
            .collect();
        let median_change = maths_utils::median(&abs_changes).unwrap_or(0.0);

        Self {
            mean: values.iter().mean(),
            max,
            min,
            max_index: maths_utils::argmax(values).unwrap_or(0),
            min_index: maths_utils::argmin(values).unwrap_or(0),
            swings: abs_changes.iter().filter(|&&c| c > median_change).count(),
            p1_dominant_points: values.iter().filter(|&&v| v > origin).count(),
            p2_dominant_points: values.iter().filter(|&&v| v < origin).count(),
            total_points: values.len(),
            origin,
        }
    }

    pub fn dominant_points(&self, player: Player) -> usize {
        match player {
            Player::One => self.p1_dominant_points,
            Player::Two => self.p2_dominant_points,
        }
    }

    pub fn dominance_pct(&self, player: Player) -> f64 {
        if self.total_points == 0 {
            return 0.0;
        }
        self.dominant_points(player) as f64 / self.total_points as f64 * 100.0
    }

    /// Peak advantage reached by `player`, as a non-negative number.
    pub fn peak_for(&self, player: Player) -> f64 {
        match player {
            Player::One => (self.max - self.origin).max(0.0),
            Player::Two => (self.origin - self.min).max(0.0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MatchStats {
    pub total_points: usize,
    pub p1_points_won: usize,
    pub p2_points_won: usize,
    /// Last elapsed time in the data, when the source records one
    pub duration_secs: Option<u32>,
    pub final_score: FinalScore,
    pub winner: Option<Player>,
    pub aces: usize,
    pub double_faults: usize,
    pub break_points: usize,
    pub momentum: MomentumStats,
}

impl MatchStats {
    pub fn compute(
        points: &[Point],
        series: &MomentumSeries,
        sets: &[SetSegment],
        origin: f64,
    ) -> Self {
        let final_score = FinalScore::from_points(points, sets);
        Self {
            total_points: points.len(),
            p1_points_won: points.iter().filter(|p| p.won_by(Player::One)).count(),
            p2_points_won: points.iter().filter(|p| p.won_by(Player::Two)).count(),
            duration_secs: points.iter().filter_map(|p| p.elapsed_secs).max(),
            winner: final_score.winner(),
            final_score,
            aces: points.iter().filter(|p| p.flags.ace).count(),
            double_faults: points.iter().filter(|p| p.flags.double_fault).count(),
            break_points: points.iter().filter(|p| p.flags.break_point).count(),
            momentum: MomentumStats::from_series(series, origin),
        }
    }

    pub fn points_won(&self, player: Player) -> usize {
        match player {
            Player::One => self.p1_points_won,
            Player::Two => self.p2_points_won,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetBreakdown {
    pub set_number: u32,
    pub points_played: usize,
    pub p1_points_won: usize,
    pub p2_points_won: usize,
    pub games_played: usize,
    /// Games at the end of the set
    pub p1_games: u32,
    pub p2_games: u32,
    pub duration_secs: Option<u32>,
    pub average_momentum: f64,
    /// Momentum at the set's last point minus momentum before its first point
    pub net_change: f64,
}

impl SetBreakdown {
    pub fn winner(&self) -> Option<Player> {
        match self.p1_games.cmp(&self.p2_games) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One row per set. `origin` is the momentum before the first point.
pub fn set_breakdown(
    points: &[Point],
    series: &MomentumSeries,
    sets: &[SetSegment],
    games: &[GameSegment],
    origin: f64,
) -> Vec<SetBreakdown> {
    sets.iter()
        .map(|segment| {
            let set_points = &points[segment.range()];
            let values = &series.values()[segment.range()];
            let before = if segment.start == 0 {
                origin
            } else {
                series.get(segment.start - 1).unwrap_or(origin)
            };
            let elapsed: Vec<u32> = set_points.iter().filter_map(|p| p.elapsed_secs).collect();
            let last = set_points.last();

            SetBreakdown {
                set_number: segment.set_number,
                points_played: set_points.len(),
                p1_points_won: set_points.iter().filter(|p| p.won_by(Player::One)).count(),
                p2_points_won: set_points.iter().filter(|p| p.won_by(Player::Two)).count(),
                games_played: games
                    .iter()
                    .filter(|g| g.set_number == segment.set_number)
                    .count(),
                p1_games: last.map_or(0, |p| p.p1_games_won),
                p2_games: last.map_or(0, |p| p.p2_games_won),
                duration_secs: match (elapsed.iter().min(), elapsed.iter().max()) {
                    (Some(lo), Some(hi)) => Some(hi - lo),
                    _ => None,
                },
                average_momentum: values.iter().mean(),
                net_change: values.last().copied().unwrap_or(before) - before,
            }
        })
        .collect()
}

/// 0-10 rating of how steadily `player` held momentum, judged from their own
/// side of the series: distance from `origin`, mirrored for player 2.
pub fn consistency_score(series: &MomentumSeries, player: Player, origin: f64) -> f64 {
    let cfg = &ANALYSIS.consistency;
    let own: Vec<f64> = series
        .values()
        .iter()
        .map(|v| (v - origin) * player.sign())
        .collect();
    let n = own.len();
    if n == 0 {
        return 0.0;
    }

    let ahead_ratio = own.iter().filter(|&&v| v > 0.0).count() as f64 / n as f64;

    let own_median = maths_utils::median(&own).unwrap_or(0.0);
    let above_median_ratio = own.iter().filter(|&&v| v > own_median).count() as f64 / n as f64;

    let (min, max) = maths_utils::get_min_max(&own).unwrap_or((0.0, 0.0));
    let range = max - min + cfg.epsilon;
    let std_dev = if n > 1 { own.iter().std_dev() } else { 0.0 };
    let stability = 1.0 - std_dev / range;

    let phase = (n / cfg.phase_divisor).max(1);
    let early = maths_utils::median(&own[..phase]).unwrap_or(0.0);
    let late = maths_utils::median(&own[n - phase..]).unwrap_or(0.0);
    let growth = ((late - early) / range).clamp(0.0, 1.0);

    let score = (cfg.ahead_weight * ahead_ratio
        + cfg.above_median_weight * above_median_ratio
        + cfg.stability_weight * stability
        + cfg.growth_weight * growth)
        * 10.0;
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MomentumRule, compute_momentum, segment_games, segment_sets};

    fn point(set_no: u32, winner: Player, games: (u32, u32), elapsed: u32) -> Point {
        let mut p = Point::simple(set_no, 1, 1, Some(winner));
        p.p1_games_won = games.0;
        p.p2_games_won = games.1;
        p.elapsed_secs = Some(elapsed);
        p
    }

    fn sample() -> Vec<Point> {
        use Player::{One, Two};
        vec![
            point(1, One, (0, 0), 0),
            point(1, One, (0, 0), 30),
            point(1, Two, (6, 4), 2400),
            point(2, Two, (0, 0), 2460),
            point(2, Two, (3, 6), 4000),
        ]
    }

    #[test]
    fn final_score_reads_last_point_of_each_set() {
        let points = sample();
        let sets = segment_sets(&points).unwrap();
        let score = FinalScore::from_points(&points, &sets);
        assert_eq!(score.to_string(), "6-4, 3-6");
        assert_eq!(score.sets_won(), (1, 1));
        assert_eq!(score.winner(), None);
    }

    #[test]
    fn match_stats_summarise_points() {
        let points = sample();
        let sets = segment_sets(&points).unwrap();
        let series = compute_momentum(&points, &MomentumRule::default()).unwrap();
        let stats = MatchStats::compute(&points, &series, &sets, 0.0);

        assert_eq!(stats.total_points, 5);
        assert_eq!(stats.points_won(Player::One), 2);
        assert_eq!(stats.duration_secs, Some(4000));
        // series: 1, 2, 1, 0, -1
        assert_eq!(stats.momentum.max, 2.0);
        assert_eq!(stats.momentum.min, -1.0);
        assert_eq!(stats.momentum.max_index, 1);
        assert_eq!(stats.momentum.p1_dominant_points, 3);
        assert_eq!(stats.momentum.p2_dominant_points, 1);
        assert!((stats.momentum.dominance_pct(Player::One) - 60.0).abs() < 1e-9);
        assert_eq!(stats.momentum.peak_for(Player::Two), 1.0);
    }

    #[test]
    fn set_breakdown_tracks_momentum_per_set() {
        let points = sample();
        let sets = segment_sets(&points).unwrap();
        let games = segment_games(&points).unwrap();
        let series = compute_momentum(&points, &MomentumRule::default()).unwrap();
        let rows = set_breakdown(&points, &series, &sets, &games, 0.0);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].points_played, 3);
        assert_eq!(rows[0].p1_points_won, 2);
        assert_eq!(rows[0].net_change, 1.0);
        assert_eq!(rows[0].duration_secs, Some(2400));
        assert_eq!(rows[0].winner(), Some(Player::One));
        assert_eq!(rows[1].net_change, -2.0);
        assert!((rows[1].average_momentum - (-0.5)).abs() < 1e-9);
        assert_eq!(rows[1].winner(), Some(Player::Two));
    }

    #[test]
    fn consistency_favours_the_steady_leader() {
        let rising = MomentumSeries::from_values((1..=50).map(|v| v as f64).collect());
        let leader = consistency_score(&rising, Player::One, 0.0);
        let trailer = consistency_score(&rising, Player::Two, 0.0);
        assert!(leader > trailer);
        assert!((0.0..=10.0).contains(&leader));
        assert!((0.0..=10.0).contains(&trailer));
        assert_eq!(consistency_score(&MomentumSeries::default(), Player::One, 0.0), 0.0);
    }

    #[test]
    fn raised_baseline_still_credits_the_player_winning_points() {
        let points: Vec<Point> = (0..6).map(|_| point(1, Player::Two, (0, 0), 0)).collect();
        let sets = segment_sets(&points).unwrap();
        let rule = MomentumRule {
            baseline: 10.0,
            ..MomentumRule::default()
        };
        let series = compute_momentum(&points, &rule).unwrap();
        assert_eq!(series.values(), &[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);

        let stats = MatchStats::compute(&points, &series, &sets, rule.baseline);
        assert_eq!(stats.momentum.p1_dominant_points, 0);
        assert_eq!(stats.momentum.p2_dominant_points, 6);
        assert_eq!(stats.momentum.peak_for(Player::One), 0.0);
        assert_eq!(stats.momentum.peak_for(Player::Two), 6.0);

        let p1 = consistency_score(&series, Player::One, rule.baseline);
        let p2 = consistency_score(&series, Player::Two, rule.baseline);
        assert!(p2 > p1);
        // Shifting series and baseline together changes nothing
        let at_zero = MomentumSeries::from_values(series.values().iter().map(|v| v - 10.0).collect());
        assert_eq!(p2, consistency_score(&at_zero, Player::Two, 0.0));
    }
}
