use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::dataset::TournamentData;
use crate::data::source::DatasetSource;
use crate::domain::TournamentKey;

/// Reads `{year}-{slam}-points.csv` and `{year}-{slam}-matches.csv` from a
/// directory laid out like the public slam point-by-point repository.
pub struct LocalCsvSource {
    pub data_dir: PathBuf,
}

impl LocalCsvSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn points_path(&self, key: TournamentKey) -> PathBuf {
        self.data_dir.join(key.points_filename())
    }

    pub fn matches_path(&self, key: TournamentKey) -> PathBuf {
        self.data_dir.join(key.matches_filename())
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

impl DatasetSource for LocalCsvSource {
    fn signature(&self) -> &'static str {
        "Local CSV files"
    }

    fn load_tournament(&self, key: TournamentKey) -> Result<TournamentData> {
        let points_path = self.points_path(key);
        let matches_path = self.matches_path(key);
        TournamentData::from_readers(key, open(&points_path)?, open(&matches_path)?)
            .with_context(|| format!("Failed to parse {}", points_path.display()))
    }
}
