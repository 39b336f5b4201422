//! Raw rows of the point-by-point and match listing CSV files, and their
//! conversion into domain types.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::DATASET;
use crate::domain::{MatchMeta, Player, Point, PointFlags, TournamentKey};
use crate::error::DataError;
use crate::utils::time_utils::parse_elapsed_secs;

/// One line of `{year}-{slam}-points.csv`. Every field is read as text so that
/// a single bad cell becomes a `DataError` naming the row, not a csv error.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawPointRow {
    pub match_id: String,
    #[serde(rename = "ElapsedTime")]
    pub elapsed_time: String,
    #[serde(rename = "SetNo")]
    pub set_no: String,
    #[serde(rename = "P1GamesWon")]
    pub p1_games_won: String,
    #[serde(rename = "P2GamesWon")]
    pub p2_games_won: String,
    #[serde(rename = "GameNo")]
    pub game_no: String,
    #[serde(rename = "PointNumber")]
    pub point_number: String,
    #[serde(rename = "PointWinner")]
    pub point_winner: String,
    #[serde(rename = "PointServer")]
    pub point_server: String,
    #[serde(rename = "P1BreakPoint")]
    pub p1_break_point: String,
    #[serde(rename = "P2BreakPoint")]
    pub p2_break_point: String,
    #[serde(rename = "P1Ace")]
    pub p1_ace: String,
    #[serde(rename = "P2Ace")]
    pub p2_ace: String,
    #[serde(rename = "P1DoubleFault")]
    pub p1_double_fault: String,
    #[serde(rename = "P2DoubleFault")]
    pub p2_double_fault: String,
}

/// One line of `{year}-{slam}-matches.csv`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawMatchRow {
    pub match_id: String,
    pub player1: String,
    pub player2: String,
    pub round: String,
    pub event_name: String,
}

impl RawPointRow {
    /// Filler rows mark the start of a set or tiebreak and carry no point.
    pub fn is_filler(&self) -> bool {
        DATASET
            .filler_point_numbers
            .iter()
            .any(|f| self.point_number.trim().eq_ignore_ascii_case(f))
    }

    /// `row` is the 1-based data row, used only for error messages.
    pub fn into_point(self, row: usize) -> Result<Point, DataError> {
        let set_no = parse_count(row, "SetNo", &self.set_no)?;
        let game_no = parse_count(row, "GameNo", &self.game_no)?;
        let point_number = parse_count(row, "PointNumber", &self.point_number)?;

        // An unrecognised winner code is kept as `None`; the momentum
        // calculator decides that it is an error.
        let winner = Player::from_code(&self.point_winner);
        let server = Player::from_code(&self.point_server);

        let flags = PointFlags {
            break_point: is_set(&self.p1_break_point) || is_set(&self.p2_break_point),
            ace: is_set(&self.p1_ace) || is_set(&self.p2_ace),
            double_fault: is_set(&self.p1_double_fault) || is_set(&self.p2_double_fault),
        };

        Ok(Point {
            match_id: self.match_id.trim().to_string(),
            set_no,
            game_no,
            point_number,
            winner,
            server,
            elapsed_secs: parse_elapsed_secs(&self.elapsed_time),
            p1_games_won: parse_optional_count(&self.p1_games_won),
            p2_games_won: parse_optional_count(&self.p2_games_won),
            flags,
        })
    }
}

impl RawMatchRow {
    pub fn into_meta(self, key: TournamentKey) -> MatchMeta {
        MatchMeta {
            match_id: self.match_id.trim().to_string(),
            key,
            player1: self.player1.trim().to_string(),
            player2: self.player2.trim().to_string(),
            round: non_empty(self.round),
            event_name: non_empty(self.event_name),
        }
    }
}

fn parse_count(row: usize, column: &'static str, value: &str) -> Result<u32, DataError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| DataError::Malformed {
            row,
            column,
            value: value.to_string(),
        })
}

fn parse_optional_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn is_set(flag: &str) -> bool {
    matches!(flag.trim(), "1" | "True" | "true")
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads every non-filler point row with its 1-based row number. Only csv-level
/// failures are errors here; cells are converted later, per match.
pub fn read_point_rows<R: Read>(reader: R) -> Result<Vec<(usize, RawPointRow)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<RawPointRow>().enumerate() {
        let row = i + 1;
        let raw = record.with_context(|| format!("Failed to read points row {}", row))?;
        if raw.is_filler() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_skipped_rows {
                log::info!("Skipping filler row {} ({})", row, raw.point_number);
            }
            continue;
        }
        rows.push((row, raw));
    }
    Ok(rows)
}

pub fn read_match_rows<R: Read>(reader: R, key: TournamentKey) -> Result<Vec<MatchMeta>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<RawMatchRow>()
        .enumerate()
        .map(|(i, record)| {
            record
                .map(|raw| raw.into_meta(key))
                .with_context(|| format!("Failed to read matches row {}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tournament;

    const POINTS: &str = "\
match_id,ElapsedTime,SetNo,P1GamesWon,P2GamesWon,GameNo,PointNumber,PointWinner,PointServer,P1BreakPoint,P2BreakPoint
2019-wimbledon-1701,0:00:00,1,0,0,0,0X,0,0,0,0
2019-wimbledon-1701,0:00:31,1,0,0,1,1,1,1,0,0
2019-wimbledon-1701,0:01:02,1,0,0,1,2,2,1,0,1
2019-wimbledon-1701,0:01:40,1,0,0,1,3,9,1,0,0
";

    #[test]
    fn filler_rows_are_skipped() {
        let rows = read_point_rows(POINTS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, 2);
    }

    #[test]
    fn rows_convert_into_points() {
        let rows = read_point_rows(POINTS.as_bytes()).unwrap();
        let points: Vec<Point> = rows
            .into_iter()
            .map(|(row, raw)| raw.into_point(row).unwrap())
            .collect();

        assert_eq!(points[0].winner, Some(Player::One));
        assert_eq!(points[0].elapsed_secs, Some(31));
        assert!(points[1].flags.break_point);
        assert_eq!(points[1].winner, Some(Player::Two));
        // Unknown code survives parsing as a missing winner
        assert_eq!(points[2].winner, None);
    }

    #[test]
    fn bad_set_number_is_malformed() {
        let raw = RawPointRow {
            set_no: "one".into(),
            game_no: "1".into(),
            point_number: "1".into(),
            ..Default::default()
        };
        assert_eq!(
            raw.into_point(7),
            Err(DataError::Malformed {
                row: 7,
                column: "SetNo",
                value: "one".into()
            })
        );
    }

    #[test]
    fn match_rows_become_metadata() {
        let csv = "match_id,player1,player2,round,event_name\n2019-wimbledon-1701,Novak Djokovic,Roger Federer,,Gentlemen's Singles\n";
        let key = TournamentKey::new(Tournament::Wimbledon, 2019);
        let metas = read_match_rows(csv.as_bytes(), key).unwrap();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].player2, "Roger Federer");
        assert_eq!(metas[0].round, None);
        assert_eq!(metas[0].event_name.as_deref(), Some("Gentlemen's Singles"));
    }
}
