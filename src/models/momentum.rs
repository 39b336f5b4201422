use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::ANALYSIS;
use crate::domain::{Player, Point};
use crate::error::DataError;

// ============================================================================
// MomentumSeries: one value per point, in point order
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MomentumSeries {
    values: Vec<f64>,
}

impl MomentumSeries {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// (point index, momentum) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// The same series seen from player B's side.
    pub fn mirrored(&self) -> Self {
        Self {
            values: self.values.iter().map(|v| -v).collect(),
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Fixed-step running differential. Positive favours player A.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MomentumRule {
    pub baseline: f64,
    pub step: f64,
    pub break_point_weight: f64,
}

impl Default for MomentumRule {
    fn default() -> Self {
        Self {
            baseline: ANALYSIS.momentum.baseline,
            step: ANALYSIS.momentum.step,
            break_point_weight: ANALYSIS.momentum.break_point_weight,
        }
    }
}

impl MomentumRule {
    /// Signed increment contributed by one point.
    pub fn step_for(&self, index: usize, point: &Point) -> Result<f64, DataError> {
        let winner = winner_of(index, point)?;
        let weight = if point.flags.break_point {
            self.break_point_weight
        } else {
            1.0
        };
        Ok(winner.sign() * self.step * weight)
    }
}

/// Two decaying per-player scores; the emitted value is `p1 - p2`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DecayRule {
    pub decay_factor: f64,
    pub point_weight: f64,
}

impl Default for DecayRule {
    fn default() -> Self {
        Self {
            decay_factor: ANALYSIS.momentum.decay_factor,
            point_weight: ANALYSIS.momentum.decay_point_weight,
        }
    }
}

fn winner_of(index: usize, point: &Point) -> Result<Player, DataError> {
    point.winner.ok_or(DataError::UnknownWinner {
        index,
        point_number: point.point_number,
    })
}

// ============================================================================
// Calculators (pure)
// ============================================================================

/// Running score after each point. Empty input gives an empty series; a point
/// without a known winner fails the whole computation.
pub fn compute_momentum(points: &[Point], rule: &MomentumRule) -> Result<MomentumSeries, DataError> {
    let mut score = rule.baseline;
    let mut values = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        score += rule.step_for(index, point)?;
        values.push(score);
    }

    Ok(MomentumSeries { values })
}

/// Exponentially decayed momentum: both scores shrink by `decay_factor` before
/// each point, then the winner gains `point_weight`.
pub fn compute_decayed_momentum(
    points: &[Point],
    rule: &DecayRule,
) -> Result<MomentumSeries, DataError> {
    let mut p1 = 0.0;
    let mut p2 = 0.0;
    let mut values = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        p1 *= rule.decay_factor;
        p2 *= rule.decay_factor;
        match winner_of(index, point)? {
            Player::One => p1 += rule.point_weight,
            Player::Two => p2 += rule.point_weight,
        }
        values.push(p1 - p2);
    }

    Ok(MomentumSeries { values })
}

// ============================================================================
// Model selection
// ============================================================================

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display,
)]
pub enum MomentumModel {
    #[default]
    #[strum(to_string = "Running differential")]
    RunningDifferential,
    #[strum(to_string = "Exponential decay")]
    ExponentialDecay,
}

/// Everything needed to turn points into a series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct MomentumSettings {
    pub model: MomentumModel,
    pub rule: MomentumRule,
    pub decay: DecayRule,
}

impl MomentumSettings {
    pub fn compute(&self, points: &[Point]) -> Result<MomentumSeries, DataError> {
        match self.model {
            MomentumModel::RunningDifferential => compute_momentum(points, &self.rule),
            MomentumModel::ExponentialDecay => compute_decayed_momentum(points, &self.decay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn points_from(winners: &[Option<Player>]) -> Vec<Point> {
        winners
            .iter()
            .enumerate()
            .map(|(i, w)| Point::simple(1, 1, i as u32 + 1, *w))
            .collect()
    }

    const A: Option<Player> = Some(Player::One);
    const B: Option<Player> = Some(Player::Two);

    #[test]
    fn three_point_scenario() {
        let points = points_from(&[A, A, B]);
        let series = compute_momentum(&points, &MomentumRule::default()).unwrap();
        assert_eq!(series.values(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn empty_match_gives_empty_series() {
        let series = compute_momentum(&[], &MomentumRule::default()).unwrap();
        assert!(series.is_empty());
        let decayed = compute_decayed_momentum(&[], &DecayRule::default()).unwrap();
        assert!(decayed.is_empty());
    }

    #[test]
    fn missing_winner_is_a_data_error() {
        let points = points_from(&[A, None, B]);
        let err = compute_momentum(&points, &MomentumRule::default()).unwrap_err();
        assert_eq!(
            err,
            DataError::UnknownWinner {
                index: 1,
                point_number: 2
            }
        );
        assert!(compute_decayed_momentum(&points, &DecayRule::default()).is_err());
    }

    #[test]
    fn baseline_shifts_every_value() {
        let points = points_from(&[A, B, B]);
        let rule = MomentumRule {
            baseline: 10.0,
            ..MomentumRule::default()
        };
        let series = compute_momentum(&points, &rule).unwrap();
        assert_eq!(series.values(), &[11.0, 10.0, 9.0]);
    }

    #[test]
    fn break_points_use_their_weight() {
        let mut points = points_from(&[A, B, A]);
        points[1].flags.break_point = true;
        let rule = MomentumRule {
            break_point_weight: 2.0,
            ..MomentumRule::default()
        };
        let series = compute_momentum(&points, &rule).unwrap();
        assert_eq!(series.values(), &[1.0, -1.0, 0.0]);
    }

    #[test]
    fn decayed_model_matches_hand_computation() {
        let points = points_from(&[A, A, B]);
        let series = compute_decayed_momentum(&points, &DecayRule::default()).unwrap();
        let expected = [1.5, 1.5 * 0.95 + 1.5, (1.5 * 0.95 + 1.5) * 0.95 - 1.5];
        for (got, want) in series.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn settings_dispatch_on_model() {
        let points = points_from(&[A, B]);
        let mut settings = MomentumSettings::default();
        assert_eq!(settings.compute(&points).unwrap().values(), &[1.0, 0.0]);
        settings.model = MomentumModel::ExponentialDecay;
        assert!((settings.compute(&points).unwrap().values()[1] - (1.5 * 0.95 - 1.5)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_length_matches_point_count(winners in prop::collection::vec(any::<bool>(), 0..300)) {
            let points = points_from(&winners.iter().map(|&a| if a { A } else { B }).collect::<Vec<_>>());
            let series = compute_momentum(&points, &MomentumRule::default()).unwrap();
            prop_assert_eq!(series.len(), points.len());
        }

        #[test]
        fn prop_each_step_follows_the_winner(winners in prop::collection::vec(any::<bool>(), 1..300)) {
            let points = points_from(&winners.iter().map(|&a| if a { A } else { B }).collect::<Vec<_>>());
            let series = compute_momentum(&points, &MomentumRule::default()).unwrap();
            let mut previous = 0.0;
            for (i, value) in series.iter() {
                let expected = if winners[i] { previous + 1.0 } else { previous - 1.0 };
                prop_assert_eq!(value, expected);
                previous = value;
            }
        }

        #[test]
        fn prop_computation_is_idempotent(winners in prop::collection::vec(any::<bool>(), 0..200)) {
            let points = points_from(&winners.iter().map(|&a| if a { A } else { B }).collect::<Vec<_>>());
            for settings in [
                MomentumSettings::default(),
                MomentumSettings { model: MomentumModel::ExponentialDecay, ..Default::default() },
            ] {
                prop_assert_eq!(settings.compute(&points).unwrap(), settings.compute(&points).unwrap());
            }
        }
    }
}
