use anyhow::{Context, Result, bail};

use crate::config::DEMO;
use crate::data::dataset::TournamentData;
use crate::data::source::DatasetSource;
use crate::domain::TournamentKey;

/// The two CSV files compiled into the binary. Always available, including in
/// the browser build, but only for the demo tournament.
pub struct EmbeddedDemoSource;

impl EmbeddedDemoSource {
    pub fn key() -> TournamentKey {
        TournamentKey::new(DEMO.tournament, DEMO.year)
    }
}

impl DatasetSource for EmbeddedDemoSource {
    fn signature(&self) -> &'static str {
        "Embedded demo data"
    }

    fn load_tournament(&self, key: TournamentKey) -> Result<TournamentData> {
        if key != Self::key() {
            bail!("the embedded demo only covers {}", Self::key());
        }
        TournamentData::from_readers(key, DEMO.points_csv.as_bytes(), DEMO.matches_csv.as_bytes())
            .context("Failed to parse embedded demo data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchSelector, Tournament};
    use crate::models::{MomentumSettings, segment_sets};

    #[test]
    fn demo_matches_load_and_compute() {
        let data = EmbeddedDemoSource
            .load_tournament(EmbeddedDemoSource::key())
            .unwrap();
        assert_eq!(data.listings().len(), 2);

        for listing in data.listings() {
            let m = data
                .resolve(&MatchSelector::ById(listing.meta.match_id.clone()))
                .unwrap();
            let series = MomentumSettings::default().compute(&m.points).unwrap();
            assert_eq!(series.len(), m.point_count());
            let sets = segment_sets(&m.points).unwrap();
            assert_eq!(sets.len(), 2);
            assert_eq!(sets.last().map(|s| s.end), Some(m.point_count() - 1));
        }
    }

    #[test]
    fn other_tournaments_are_refused() {
        let key = TournamentKey::new(Tournament::UsOpen, 2019);
        assert!(EmbeddedDemoSource.load_tournament(key).is_err());
    }
}
