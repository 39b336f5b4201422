//! Checks applied to a user's match selection before any file is touched.

use crate::config::DATASET;
use crate::domain::MatchSelector;
use crate::error::AppError;

pub fn validate_year(year: i32) -> Result<(), AppError> {
    if DATASET.years.contains(year) {
        Ok(())
    } else {
        Err(AppError::InvalidSelection(format!(
            "year {} is outside the available range {}-{}",
            year, DATASET.years.min, DATASET.years.max
        )))
    }
}

/// Letters, spaces, hyphens, apostrophes and dots only.
fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.')
}

/// A full name: at least first and last name.
pub fn validate_player_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidSelection("player name is empty".into()));
    }
    if !name.chars().all(is_name_char) {
        return Err(AppError::InvalidSelection(format!(
            "'{}' contains characters that cannot appear in a player name",
            name
        )));
    }
    if name.split_whitespace().count() < 2 {
        return Err(AppError::InvalidSelection(format!(
            "'{}' needs both a first and a last name",
            name
        )));
    }
    Ok(())
}

pub fn validate_player_names(player1: &str, player2: &str) -> Result<(), AppError> {
    validate_player_name(player1)?;
    validate_player_name(player2)?;
    if player1.trim().eq_ignore_ascii_case(player2.trim()) {
        return Err(AppError::InvalidSelection(
            "the two players must be different".into(),
        ));
    }
    Ok(())
}

pub fn validate_selection(selector: &MatchSelector) -> Result<(), AppError> {
    match selector {
        MatchSelector::ByPlayers {
            year,
            player1,
            player2,
            ..
        } => {
            validate_year(*year)?;
            validate_player_names(player1, player2)
        }
        MatchSelector::ById(id) => {
            let key = selector.tournament_key().ok_or_else(|| {
                AppError::InvalidSelection(format!(
                    "'{}' is not a match id of the form YEAR-SLAM-NUMBER",
                    id
                ))
            })?;
            validate_year(key.year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tournament;

    #[test]
    fn years_outside_dataset_are_rejected() {
        assert!(validate_year(2011).is_ok());
        assert!(validate_year(2024).is_ok());
        assert!(matches!(
            validate_year(2010),
            Err(AppError::InvalidSelection(_))
        ));
    }

    #[test]
    fn player_names_need_two_words_and_plain_characters() {
        assert!(validate_player_name("Jo-Wilfried Tsonga").is_ok());
        assert!(validate_player_name("Stan O'Neil Jr.").is_ok());
        assert!(validate_player_name("Juan Martín del Potro").is_ok());
        assert!(validate_player_name("Federer").is_err());
        assert!(validate_player_name("Roger F3derer").is_err());
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_names("Roger Federer", "roger federer").is_err());
    }

    #[test]
    fn selectors_are_checked_by_kind() {
        let ok = MatchSelector::by_players(Tournament::Wimbledon, 2019, "Novak Djokovic", "Roger Federer");
        assert!(validate_selection(&ok).is_ok());

        let bad_year = MatchSelector::by_players(Tournament::Wimbledon, 1999, "Novak Djokovic", "Roger Federer");
        assert!(validate_selection(&bad_year).is_err());

        assert!(validate_selection(&MatchSelector::ById("2019-wimbledon-1701".into())).is_ok());
        assert!(validate_selection(&MatchSelector::ById("nonsense".into())).is_err());
    }
}
