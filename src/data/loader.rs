use std::path::PathBuf;

use crate::data::demo_bundle::EmbeddedDemoSource;
#[cfg(not(target_arch = "wasm32"))]
use crate::data::local_csv::LocalCsvSource;
use crate::data::source::{DatasetSource, load_tournament_data};
use crate::domain::{Match, MatchSelector};
use crate::error::AppError;
use crate::utils::validation::validate_selection;

/// Sources in the order they are tried. The embedded demo is always last so a
/// real data directory takes precedence for the demo tournament too.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_sources(data_dir: Option<PathBuf>, demo_only: bool) -> Vec<Box<dyn DatasetSource>> {
    let mut sources: Vec<Box<dyn DatasetSource>> = Vec::new();
    if !demo_only {
        let dir = data_dir.unwrap_or_else(|| PathBuf::from(crate::config::DATASET.default_dir));
        sources.push(Box::new(LocalCsvSource::new(dir)));
    }
    sources.push(Box::new(EmbeddedDemoSource));
    sources
}

#[cfg(target_arch = "wasm32")]
pub fn default_sources(_data_dir: Option<PathBuf>, _demo_only: bool) -> Vec<Box<dyn DatasetSource>> {
    vec![Box::new(EmbeddedDemoSource)]
}

/// Validates the selector, loads its tournament and returns the match.
pub fn load_match(
    sources: &[Box<dyn DatasetSource>],
    selector: &MatchSelector,
) -> Result<Match, AppError> {
    validate_selection(selector)?;
    let key = selector.tournament_key().ok_or_else(|| {
        AppError::InvalidSelection(format!("cannot tell the tournament of {}", selector))
    })?;
    let (data, _signature) = load_tournament_data(sources, key)?;
    data.resolve(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tournament;

    fn demo_sources() -> Vec<Box<dyn DatasetSource>> {
        vec![Box::new(EmbeddedDemoSource)]
    }

    #[test]
    fn loads_demo_match_by_players() {
        let selector =
            MatchSelector::by_players(Tournament::FrenchOpen, 2011, "Sam Sample", "Alex Demo");
        let m = load_match(&demo_sources(), &selector).unwrap();
        assert_eq!(m.meta.match_id, "2011-frenchopen-9001");
        assert_eq!(m.point_count(), 147);
    }

    #[test]
    fn invalid_names_fail_before_loading() {
        let selector = MatchSelector::by_players(Tournament::FrenchOpen, 2011, "Sample", "Alex Demo");
        assert!(matches!(
            load_match(&demo_sources(), &selector),
            Err(AppError::InvalidSelection(_))
        ));
    }

    #[test]
    fn unknown_players_are_not_found() {
        let selector =
            MatchSelector::by_players(Tournament::FrenchOpen, 2011, "Nobody Known", "Alex Demo");
        assert!(matches!(
            load_match(&demo_sources(), &selector),
            Err(AppError::NotFound(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_directory_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let sources = default_sources(Some(dir.path().to_path_buf()), false);
        assert_eq!(sources.len(), 2);
        let m = load_match(&sources, &MatchSelector::ById("2011-frenchopen-9002".into())).unwrap();
        assert_eq!(m.point_count(), 186);
    }
}
