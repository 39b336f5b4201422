use find_peaks::PeakFinder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;
use crate::domain::{Player, Point};
use crate::models::MomentumSeries;
use crate::utils::maths_utils;

/// A point where momentum moved much more than usual.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MomentumShift {
    pub index: usize,
    pub change: f64,
    pub momentum: f64,
}

/// Highest advantage reached by a player.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PeakMoment {
    pub player: Player,
    pub index: usize,
    pub momentum: f64,
}

/// The leader flips: `leader` is ahead from `index` on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadChange {
    pub index: usize,
    pub leader: Player,
}

/// Consecutive points won by one player, `start..=end`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRun {
    pub player: Player,
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl PointRun {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// A prominent local extreme. `favours` is the player the extreme was good for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TurningPoint {
    pub index: usize,
    pub momentum: f64,
    pub favours: Player,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct KeyMomentParams {
    pub shift_threshold: f64,
    pub min_run_length: usize,
    pub turning_point_prominence: f64,
}

impl Default for KeyMomentParams {
    fn default() -> Self {
        Self {
            shift_threshold: ANALYSIS.key_moments.shift_threshold,
            min_run_length: ANALYSIS.key_moments.min_run_length,
            turning_point_prominence: ANALYSIS.key_moments.turning_point_prominence,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct KeyMoments {
    pub shifts: Vec<MomentumShift>,
    pub peaks: Vec<PeakMoment>,
    pub lead_changes: Vec<LeadChange>,
    pub runs: Vec<PointRun>,
    pub turning_points: Vec<TurningPoint>,
}

impl KeyMoments {
    pub fn longest_run(&self, player: Player) -> Option<&PointRun> {
        self.runs
            .iter()
            .filter(|r| r.player == player)
            .max_by_key(|r| r.len())
    }
}

/// `origin` is the momentum before the first point, the level at which
/// neither player is ahead.
pub fn find_key_moments(
    points: &[Point],
    series: &MomentumSeries,
    params: &KeyMomentParams,
    origin: f64,
) -> KeyMoments {
    KeyMoments {
        shifts: momentum_shifts(series, params.shift_threshold),
        peaks: peak_moments(series, origin),
        lead_changes: lead_changes(series, origin),
        runs: point_runs(points, params.min_run_length),
        turning_points: turning_points(series, params.turning_point_prominence),
    }
}

/// Points whose absolute change is above `threshold` times the median change.
pub fn momentum_shifts(series: &MomentumSeries, threshold: f64) -> Vec<MomentumShift> {
    let values = series.values();
    if values.len() < 2 {
        return Vec::new();
    }
    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let abs_changes: Vec<f64> = changes.iter().map(|c| c.abs()).collect();
    let Some(median) = maths_utils::median(&abs_changes) else {
        return Vec::new();
    };
    let cutoff = median * threshold;

    changes
        .iter()
        .enumerate()
        .filter(|(_, c)| c.abs() > cutoff)
        .map(|(i, &change)| MomentumShift {
            index: i + 1,
            change,
            momentum: values[i + 1],
        })
        .collect()
}

/// Global high for player 1 and global low for player 2, when each was ahead.
pub fn peak_moments(series: &MomentumSeries, origin: f64) -> Vec<PeakMoment> {
    let values = series.values();
    let mut peaks = Vec::new();
    if let Some(i) = maths_utils::argmax(values).filter(|&i| values[i] > origin) {
        peaks.push(PeakMoment {
            player: Player::One,
            index: i,
            momentum: values[i],
        });
    }
    if let Some(i) = maths_utils::argmin(values).filter(|&i| values[i] < origin) {
        peaks.push(PeakMoment {
            player: Player::Two,
            index: i,
            momentum: values[i],
        });
    }
    peaks
}

/// Indices where momentum crosses `origin`. Level points keep the previous leader.
pub fn lead_changes(series: &MomentumSeries, origin: f64) -> Vec<LeadChange> {
    let mut leader: Option<Player> = None;
    let mut changes = Vec::new();
    for (index, value) in series.iter() {
        let now = if value > origin {
            Player::One
        } else if value < origin {
            Player::Two
        } else {
            continue;
        };
        if leader.is_some_and(|l| l != now) {
            changes.push(LeadChange { index, leader: now });
        }
        leader = Some(now);
    }
    changes
}

/// Streaks of at least `min_length` points to the same player.
pub fn point_runs(points: &[Point], min_length: usize) -> Vec<PointRun> {
    points
        .iter()
        .enumerate()
        .chunk_by(|(_, p)| p.winner)
        .into_iter()
        .filter_map(|(winner, group)| {
            let player = winner?;
            let indices: Vec<usize> = group.map(|(i, _)| i).collect();
            let (&start, &end) = (indices.first()?, indices.last()?);
            Some(PointRun { player, start, end })
        })
        .filter(|run| run.len() >= min_length.max(1))
        .collect()
}

/// Local maxima (good for player 1) and minima (good for player 2) standing
/// out from their surroundings by at least `min_prominence`.
pub fn turning_points(series: &MomentumSeries, min_prominence: f64) -> Vec<TurningPoint> {
    let values = series.values();
    if values.len() < 3 {
        return Vec::new();
    }
    let mirrored = series.mirrored();

    let highs = PeakFinder::new(values)
        .with_min_prominence(min_prominence)
        .find_peaks()
        .into_iter()
        .map(|peak| peak.middle_position())
        .map(|index| TurningPoint {
            index,
            momentum: values[index],
            favours: Player::One,
        });

    let lows = PeakFinder::new(mirrored.values())
        .with_min_prominence(min_prominence)
        .find_peaks()
        .into_iter()
        .map(|peak| peak.middle_position())
        .map(|index| TurningPoint {
            index,
            momentum: values[index],
            favours: Player::Two,
        });

    highs
        .chain(lows)
        .sorted_by_key(|tp| tp.index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> MomentumSeries {
        MomentumSeries::from_values(values.to_vec())
    }

    #[test]
    fn lead_changes_skip_level_points() {
        let s = series(&[1.0, 0.0, -1.0, 0.0, -1.0, 1.0]);
        assert_eq!(
            lead_changes(&s, 0.0),
            vec![
                LeadChange { index: 2, leader: Player::Two },
                LeadChange { index: 5, leader: Player::One },
            ]
        );
    }

    #[test]
    fn peaks_only_for_players_who_led() {
        let peaks = peak_moments(&series(&[1.0, 3.0, 2.0]), 0.0);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].player, Player::One);
        assert_eq!(peaks[0].index, 1);
        assert!(peak_moments(&series(&[]), 0.0).is_empty());
    }

    #[test]
    fn leads_and_peaks_are_measured_from_the_baseline() {
        // Player 2 wins every point from a baseline of 10
        let falling = series(&[9.0, 8.0, 7.0, 6.0, 5.0, 4.0]);
        assert_eq!(
            peak_moments(&falling, 10.0),
            vec![PeakMoment { player: Player::Two, index: 5, momentum: 4.0 }]
        );
        assert!(lead_changes(&falling, 10.0).is_empty());

        let crossing = series(&[11.0, 10.0, 9.0, 10.0, 11.0]);
        assert_eq!(
            lead_changes(&crossing, 10.0),
            vec![
                LeadChange { index: 2, leader: Player::Two },
                LeadChange { index: 4, leader: Player::One },
            ]
        );
    }

    #[test]
    fn shifts_stand_out_from_median_change() {
        // changes: 1, 1, 3, 1 -> median 1, cutoff 2
        let shifts = momentum_shifts(&series(&[0.0, 1.0, 2.0, 5.0, 4.0]), 2.0);
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].index, 3);
        assert_eq!(shifts[0].change, 3.0);
    }

    #[test]
    fn runs_need_minimum_length() {
        let winners = [1, 1, 1, 1, 1, 2, 2, 1];
        let points: Vec<Point> = winners
            .iter()
            .enumerate()
            .map(|(i, &w)| Point::simple(1, 1, i as u32 + 1, Player::from_code(&w.to_string())))
            .collect();
        let runs = point_runs(&points, 5);
        assert_eq!(runs, vec![PointRun { player: Player::One, start: 0, end: 4 }]);
        assert_eq!(point_runs(&points, 2).len(), 2);
    }

    #[test]
    fn turning_points_find_prominent_extremes() {
        let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0, 1.0]);
        let tps = turning_points(&s, 3.0);
        assert!(tps.iter().any(|t| t.index == 4 && t.favours == Player::One));
        assert!(tps.iter().all(|t| t.index != 1 && t.index != 7));
        assert!(turning_points(&series(&[1.0, 2.0]), 1.0).is_empty());
    }

    #[test]
    fn longest_run_per_player() {
        let moments = KeyMoments {
            runs: vec![
                PointRun { player: Player::Two, start: 0, end: 5 },
                PointRun { player: Player::Two, start: 10, end: 20 },
            ],
            ..Default::default()
        };
        assert_eq!(moments.longest_run(Player::Two).map(|r| r.len()), Some(11));
        assert!(moments.longest_run(Player::One).is_none());
    }
}
