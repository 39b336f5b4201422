//! Dataset location and coverage

/// Supported tournament years (inclusive)
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

pub struct DatasetConfig {
    /// Directory searched for `{year}-{slug}-*.csv` when `--data-dir` is not given
    pub default_dir: &'static str,
    pub points_file_suffix: &'static str,
    pub matches_file_suffix: &'static str,
    /// Set-start filler rows carry these instead of a point number
    pub filler_point_numbers: &'static [&'static str],
    pub years: YearRange,
    /// Public origin of the files (shown in the About section)
    pub source_url: &'static str,
}

pub const DATASET: DatasetConfig = DatasetConfig {
    default_dir: "data",
    points_file_suffix: "-points.csv",
    matches_file_suffix: "-matches.csv",
    filler_point_numbers: &["0X", "0Y"],
    years: YearRange {
        min: 2011,
        max: 2024,
    },
    source_url: "https://github.com/JeffSackmann/tennis_slam_pointbypoint",
};
