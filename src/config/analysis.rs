//! Analysis and computation configuration

/// Defaults for the momentum rules (overridable from the side panel)
pub struct MomentumDefaults {
    // Score before the first point
    pub baseline: f64,
    // Fixed increment/decrement per point
    pub step: f64,
    // Multiplier applied to the step on break points (1.0 = unweighted)
    pub break_point_weight: f64,
    // Upper bound of the break point weight slider
    pub max_break_point_weight: f64,
    // Exponential-decay model: per-point carry-over of each player's score
    pub decay_factor: f64,
    // Exponential-decay model: score added to the point winner
    pub decay_point_weight: f64,
}

/// Thresholds for key-moment detection
pub struct KeyMomentConfig {
    // A swing counts as a shift when |change| > median |change| * threshold
    pub shift_threshold: f64,
    // Minimum consecutive points to one player to report a run
    pub min_run_length: usize,
    // Minimum prominence for a local extremum to count as a turning point
    pub turning_point_prominence: f64,
}

/// Rolling-mean smoothing for the display series
pub struct SmoothingConfig {
    pub default_window: usize,
    pub max_window: usize,
}

/// Weights of the 0..10 consistency score
pub struct ConsistencyConfig {
    pub ahead_weight: f64,
    pub above_median_weight: f64,
    pub stability_weight: f64,
    pub growth_weight: f64,
    // Early/late phases are the first and last 1/n of the match
    pub phase_divisor: usize,
    pub epsilon: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub momentum: MomentumDefaults,
    pub key_moments: KeyMomentConfig,
    pub smoothing: SmoothingConfig,
    pub consistency: ConsistencyConfig,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    momentum: MomentumDefaults {
        baseline: 0.0,
        step: 1.0,
        break_point_weight: 1.0,
        max_break_point_weight: 3.0,
        decay_factor: 0.95,
        decay_point_weight: 1.5,
    },

    key_moments: KeyMomentConfig {
        shift_threshold: 2.0,
        min_run_length: 5,
        turning_point_prominence: 3.0,
    },

    smoothing: SmoothingConfig {
        default_window: 5,
        max_window: 21,
    },

    consistency: ConsistencyConfig {
        ahead_weight: 0.3,
        above_median_weight: 0.25,
        stability_weight: 0.2,
        growth_weight: 0.25,
        phase_divisor: 5,
        epsilon: 1e-6,
    },
};
