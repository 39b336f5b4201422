use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::config::DATASET;

/// The four Grand Slams covered by the point-by-point dataset.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tournament {
    #[strum(serialize = "ausopen", serialize = "australian-open")]
    AustralianOpen,
    #[strum(serialize = "frenchopen", serialize = "french-open", serialize = "rolandgarros")]
    FrenchOpen,
    #[strum(serialize = "wimbledon")]
    Wimbledon,
    #[strum(serialize = "usopen", serialize = "us-open")]
    UsOpen,
}

impl Tournament {
    /// Slug used in the dataset file names and match ids.
    pub fn slug(self) -> &'static str {
        match self {
            Tournament::AustralianOpen => "ausopen",
            Tournament::FrenchOpen => "frenchopen",
            Tournament::Wimbledon => "wimbledon",
            Tournament::UsOpen => "usopen",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Tournament::AustralianOpen => "Australian Open",
            Tournament::FrenchOpen => "French Open",
            Tournament::Wimbledon => "Wimbledon",
            Tournament::UsOpen => "US Open",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        slug.parse().ok()
    }
}

impl std::fmt::Display for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One tournament edition, i.e. one pair of dataset files.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TournamentKey {
    pub tournament: Tournament,
    pub year: i32,
}

impl TournamentKey {
    pub fn new(tournament: Tournament, year: i32) -> Self {
        Self { tournament, year }
    }

    // e.g. "2019-wimbledon-points.csv"
    pub fn points_filename(&self) -> String {
        format!(
            "{}-{}{}",
            self.year,
            self.tournament.slug(),
            DATASET.points_file_suffix
        )
    }

    pub fn matches_filename(&self) -> String {
        format!(
            "{}-{}{}",
            self.year,
            self.tournament.slug(),
            DATASET.matches_file_suffix
        )
    }

    /// Match ids look like `2019-wimbledon-1701`; the prefix names the edition.
    pub fn from_match_id(match_id: &str) -> Option<Self> {
        let mut parts = match_id.trim().splitn(3, '-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let tournament = Tournament::from_slug(parts.next()?)?;
        parts.next()?;
        Some(Self { tournament, year })
    }
}

impl std::fmt::Display for TournamentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tournament, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn slugs_round_trip_through_parse() {
        for t in Tournament::iter() {
            assert_eq!(Tournament::from_slug(t.slug()), Some(t));
        }
        assert_eq!(Tournament::from_slug("WIMBLEDON"), Some(Tournament::Wimbledon));
        assert_eq!(Tournament::from_slug("queens"), None);
    }

    #[test]
    fn file_names_follow_dataset_layout() {
        let key = TournamentKey::new(Tournament::UsOpen, 2012);
        assert_eq!(key.points_filename(), "2012-usopen-points.csv");
        assert_eq!(key.matches_filename(), "2012-usopen-matches.csv");
    }

    #[test]
    fn key_from_match_id() {
        assert_eq!(
            TournamentKey::from_match_id("2019-wimbledon-1701"),
            Some(TournamentKey::new(Tournament::Wimbledon, 2019))
        );
        assert_eq!(TournamentKey::from_match_id("2019-wimbledon"), None);
        assert_eq!(TournamentKey::from_match_id("abc-wimbledon-1"), None);
    }
}
