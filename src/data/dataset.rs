use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Result;

use crate::data::records::{read_match_rows, read_point_rows};
use crate::domain::{Match, MatchMeta, MatchSelector, Point, TournamentKey};
use crate::error::{AppError, DataError, NotFoundError};

/// Everything loaded for one tournament edition. Points are grouped by match
/// and kept in file order. A conversion error is stored against its match so
/// one bad row does not make the rest of the tournament unusable.
#[derive(Debug, Clone)]
pub struct TournamentData {
    pub key: TournamentKey,
    pub matches: Vec<MatchMeta>,
    points_by_match: BTreeMap<String, Result<Vec<Point>, DataError>>,
}

/// A row of the match browser.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchListing {
    pub meta: MatchMeta,
    pub point_count: usize,
}

impl TournamentData {
    pub fn from_readers<P: Read, M: Read>(
        key: TournamentKey,
        points_reader: P,
        matches_reader: M,
    ) -> Result<Self> {
        let matches = read_match_rows(matches_reader, key)?;

        let mut points_by_match: BTreeMap<String, Result<Vec<Point>, DataError>> = BTreeMap::new();
        for (row, raw) in read_point_rows(points_reader)? {
            let match_id = raw.match_id.trim().to_string();
            let entry = points_by_match
                .entry(match_id)
                .or_insert_with(|| Ok(Vec::new()));
            // First error wins; later rows of a broken match are ignored
            if entry.is_err() {
                continue;
            }
            match raw.into_point(row) {
                Ok(point) => {
                    if let Ok(points) = entry {
                        points.push(point);
                    }
                }
                Err(e) => *entry = Err(e),
            }
        }

        Ok(Self {
            key,
            matches,
            points_by_match,
        })
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn total_points(&self) -> usize {
        self.points_by_match
            .values()
            .filter_map(|r| r.as_ref().ok())
            .map(Vec::len)
            .sum()
    }

    /// Matches that have point data, in listing order.
    pub fn listings(&self) -> Vec<MatchListing> {
        self.matches
            .iter()
            .filter_map(|meta| match self.points_by_match.get(&meta.match_id) {
                Some(Ok(points)) if !points.is_empty() => Some(MatchListing {
                    meta: meta.clone(),
                    point_count: points.len(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Metadata for the selected match. Player names match case-insensitively,
    /// by substring, in either order; the first listed match wins.
    pub fn find_match(&self, selector: &MatchSelector) -> Result<MatchMeta, NotFoundError> {
        let not_found = || NotFoundError::new(selector.to_string());
        match selector {
            MatchSelector::ByPlayers {
                player1, player2, ..
            } => self
                .matches
                .iter()
                .find(|m| m.involves(player1, player2) && self.has_points(&m.match_id))
                .cloned()
                .ok_or_else(not_found),
            MatchSelector::ById(id) => {
                let id = id.trim();
                if !self.points_by_match.contains_key(id) {
                    return Err(not_found());
                }
                Ok(self
                    .matches
                    .iter()
                    .find(|m| m.match_id == id)
                    .cloned()
                    .unwrap_or_else(|| self.placeholder_meta(id)))
            }
        }
    }

    /// The selected match with its points in order.
    pub fn resolve(&self, selector: &MatchSelector) -> Result<Match, AppError> {
        let meta = self.find_match(selector)?;
        let points = match self.points_by_match.get(&meta.match_id) {
            Some(Ok(points)) if !points.is_empty() => points.clone(),
            Some(Err(e)) => return Err(e.clone().into()),
            _ => return Err(NotFoundError::new(selector.to_string()).into()),
        };
        Ok(Match::new(meta, points))
    }

    fn has_points(&self, match_id: &str) -> bool {
        match self.points_by_match.get(match_id) {
            Some(Ok(points)) => !points.is_empty(),
            Some(Err(_)) => true,
            None => false,
        }
    }

    fn placeholder_meta(&self, match_id: &str) -> MatchMeta {
        MatchMeta {
            match_id: match_id.to_string(),
            key: self.key,
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
            round: None,
            event_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, Tournament};

    const POINTS: &str = "\
match_id,SetNo,GameNo,PointNumber,PointWinner
2019-wimbledon-1701,1,1,1,1
2019-wimbledon-1701,1,1,2,1
2019-wimbledon-1701,1,1,3,2
2019-wimbledon-1702,1,1,1,2
2019-wimbledon-1703,1,x,1,2
";

    const MATCHES: &str = "\
match_id,player1,player2
2019-wimbledon-1701,Novak Djokovic,Roger Federer
2019-wimbledon-1702,Rafael Nadal,Andy Murray
2019-wimbledon-1703,Broken Row,Other Player
2019-wimbledon-1704,No Points,Anyone Else
";

    fn data() -> TournamentData {
        TournamentData::from_readers(
            TournamentKey::new(Tournament::Wimbledon, 2019),
            POINTS.as_bytes(),
            MATCHES.as_bytes(),
        )
        .unwrap()
    }

    fn by_players(a: &str, b: &str) -> MatchSelector {
        MatchSelector::by_players(Tournament::Wimbledon, 2019, a, b)
    }

    #[test]
    fn resolves_by_players_in_either_order() {
        let data = data();
        let m = data.resolve(&by_players("roger federer", "Novak Djokovic")).unwrap();
        assert_eq!(m.meta.match_id, "2019-wimbledon-1701");
        assert_eq!(m.point_count(), 3);
        assert_eq!(m.points[2].winner, Some(Player::Two));
    }

    #[test]
    fn resolves_by_id() {
        let m = data()
            .resolve(&MatchSelector::ById("2019-wimbledon-1702".into()))
            .unwrap();
        assert_eq!(m.meta.player1, "Rafael Nadal");
    }

    #[test]
    fn unknown_selection_is_not_found() {
        let data = data();
        assert!(matches!(
            data.resolve(&by_players("Serena Williams", "Venus Williams")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            data.resolve(&by_players("No Points", "Anyone Else")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn malformed_match_reports_data_error_without_affecting_others() {
        let data = data();
        assert!(matches!(
            data.resolve(&by_players("Broken Row", "Other Player")),
            Err(AppError::Data(DataError::Malformed { column: "GameNo", .. }))
        ));
        assert_eq!(data.listings().len(), 2);
        assert_eq!(data.total_points(), 4);
        assert_eq!(data.match_count(), 4);
    }
}
