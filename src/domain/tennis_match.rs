use serde::{Deserialize, Serialize};

use crate::domain::point::{Player, Point};
use crate::domain::tournament::{Tournament, TournamentKey};

/// Descriptive fields from the matches file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchMeta {
    pub match_id: String,
    pub key: TournamentKey,
    pub player1: String,
    pub player2: String,
    pub round: Option<String>,
    pub event_name: Option<String>,
}

impl MatchMeta {
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    /// Case-insensitive substring match on both names, in either order.
    pub fn involves(&self, name_a: &str, name_b: &str) -> bool {
        let p1 = self.player1.to_lowercase();
        let p2 = self.player2.to_lowercase();
        let a = name_a.trim().to_lowercase();
        let b = name_b.trim().to_lowercase();
        (p1.contains(&a) && p2.contains(&b)) || (p1.contains(&b) && p2.contains(&a))
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.player1, self.player2)
    }
}

/// A match and its ordered points. Read-only for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub meta: MatchMeta,
    pub points: Vec<Point>,
}

impl Match {
    pub fn new(meta: MatchMeta, points: Vec<Point>) -> Self {
        Self { meta, points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// How the user picked a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSelector {
    ByPlayers {
        tournament: Tournament,
        year: i32,
        player1: String,
        player2: String,
    },
    ById(String),
}

impl MatchSelector {
    pub fn by_players(
        tournament: Tournament,
        year: i32,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> Self {
        MatchSelector::ByPlayers {
            tournament,
            year,
            player1: player1.into(),
            player2: player2.into(),
        }
    }

    /// The dataset edition this selector needs, if it can be determined.
    pub fn tournament_key(&self) -> Option<TournamentKey> {
        match self {
            MatchSelector::ByPlayers {
                tournament, year, ..
            } => Some(TournamentKey::new(*tournament, *year)),
            MatchSelector::ById(id) => TournamentKey::from_match_id(id),
        }
    }
}

impl std::fmt::Display for MatchSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSelector::ByPlayers {
                tournament,
                year,
                player1,
                player2,
            } => write!(f, "{} {}: {} vs {}", tournament, year, player1, player2),
            MatchSelector::ById(id) => write!(f, "match id {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> MatchMeta {
        MatchMeta {
            match_id: "2019-wimbledon-1701".to_string(),
            key: TournamentKey::new(Tournament::Wimbledon, 2019),
            player1: "Novak Djokovic".to_string(),
            player2: "Roger Federer".to_string(),
            round: None,
            event_name: None,
        }
    }

    #[test]
    fn involves_ignores_case_and_order() {
        let m = meta();
        assert!(m.involves("novak djokovic", "ROGER FEDERER"));
        assert!(m.involves("Federer", "Djokovic"));
        assert!(!m.involves("Rafael Nadal", "Roger Federer"));
    }

    #[test]
    fn selector_resolves_tournament_key() {
        let by_id = MatchSelector::ById("2012-usopen-1701".into());
        assert_eq!(
            by_id.tournament_key(),
            Some(TournamentKey::new(Tournament::UsOpen, 2012))
        );
        let by_players = MatchSelector::by_players(Tournament::FrenchOpen, 2015, "a b", "c d");
        assert_eq!(by_players.to_string(), "French Open 2015: a b vs c d");
    }
}
