use serde::{Deserialize, Serialize};

/// The two sides of a singles match. `One` is player A (player1 in the dataset).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Parses the dataset's `1`/`2` encoding. Anything else (including `0`) is unknown.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Player::One),
            "2" => Some(Player::Two),
            _ => None,
        }
    }

    /// +1 for player A, -1 for player B.
    pub fn sign(self) -> f64 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }
}

/// Auxiliary per-point markers present in the source data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointFlags {
    /// Either returner was one point away from breaking serve.
    pub break_point: bool,
    pub ace: bool,
    pub double_fault: bool,
}

/// One played point. Immutable once loaded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    pub match_id: String,
    pub set_no: u32,
    pub game_no: u32,
    /// Running point number as printed in the source file.
    pub point_number: u32,
    pub winner: Option<Player>,
    pub server: Option<Player>,
    /// Seconds since the first point, if the source recorded it.
    pub elapsed_secs: Option<u32>,
    /// Games won in the current set, as recorded on this row.
    pub p1_games_won: u32,
    pub p2_games_won: u32,
    pub flags: PointFlags,
}

impl Point {
    #[cfg(test)]
    pub fn simple(set_no: u32, game_no: u32, point_number: u32, winner: Option<Player>) -> Self {
        Self {
            match_id: String::new(),
            set_no,
            game_no,
            point_number,
            winner,
            server: None,
            elapsed_secs: None,
            p1_games_won: 0,
            p2_games_won: 0,
            flags: PointFlags::default(),
        }
    }

    pub fn won_by(&self, player: Player) -> bool {
        self.winner == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_codes() {
        assert_eq!(Player::from_code("1"), Some(Player::One));
        assert_eq!(Player::from_code(" 2 "), Some(Player::Two));
        assert_eq!(Player::from_code("0"), None);
        assert_eq!(Player::from_code(""), None);
    }
}
