//! config/demo.rs Bundled demo dataset and preset matches.
//!
//! The demo files keep the browser build self-contained: the WASM target has no
//! file system, so it only ever sees these two embedded CSVs.

use crate::domain::Tournament;

/// A pre-configured selection shown in the side panel
pub struct PresetMatch {
    pub label: &'static str,
    pub tournament: Tournament,
    pub year: i32,
    pub player1: &'static str,
    pub player2: &'static str,
}

pub struct DemoConfig {
    /// Edition the embedded files are filed under. No real preset may use it,
    /// or that preset would resolve against the demo files.
    pub tournament: Tournament,
    pub year: i32,
    pub points_csv: &'static str,
    pub matches_csv: &'static str,
    pub presets: &'static [PresetMatch],
}

pub const DEMO: DemoConfig = DemoConfig {
    tournament: Tournament::FrenchOpen,
    year: 2011,
    points_csv: include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demo_data/2011-frenchopen-points.csv"
    )),
    matches_csv: include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demo_data/2011-frenchopen-matches.csv"
    )),
    presets: &[
        PresetMatch {
            label: "Demo: Alex Demo vs Sam Sample",
            tournament: Tournament::FrenchOpen,
            year: 2011,
            player1: "Alex Demo",
            player2: "Sam Sample",
        },
        PresetMatch {
            label: "Djokovic vs Federer (Wimbledon 2019)",
            tournament: Tournament::Wimbledon,
            year: 2019,
            player1: "Novak Djokovic",
            player2: "Roger Federer",
        },
        PresetMatch {
            label: "Nadal vs Federer (Australian Open 2017)",
            tournament: Tournament::AustralianOpen,
            year: 2017,
            player1: "Rafael Nadal",
            player2: "Roger Federer",
        },
        PresetMatch {
            label: "Murray vs Djokovic (US Open 2012)",
            tournament: Tournament::UsOpen,
            year: 2012,
            player1: "Andy Murray",
            player2: "Novak Djokovic",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_presets_never_share_the_demo_edition() {
        let (demo, real): (Vec<_>, Vec<_>) = DEMO
            .presets
            .iter()
            .partition(|p| DEMO.matches_csv.contains(p.player1) && DEMO.matches_csv.contains(p.player2));
        assert_eq!(demo.len(), 1);
        assert!(demo.iter().all(|p| (p.tournament, p.year) == (DEMO.tournament, DEMO.year)));
        assert!(!real.is_empty());
        assert!(real.iter().all(|p| (p.tournament, p.year) != (DEMO.tournament, DEMO.year)));
    }
}
