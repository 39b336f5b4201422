use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use tennis_momentum::data::{TournamentData, default_sources, load_tournament_data};
use tennis_momentum::domain::{Tournament, TournamentKey};
use tennis_momentum::utils::validation::validate_year;

/// Print the matches of one tournament edition with their point counts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ausopen, frenchopen, wimbledon or usopen
    tournament: Tournament,

    year: i32,

    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Only list matches whose player names contain this text
    #[arg(long)]
    filter: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    validate_year(args.year)?;

    let key = TournamentKey::new(args.tournament, args.year);
    let sources = default_sources(args.data_dir.clone(), false);
    let (data, signature) = load_tournament_data(&sources, key)
        .with_context(|| format!("Failed to load {}", key))?;

    println!(
        "{} ({}): {} matches, {} points",
        key,
        signature,
        data.match_count(),
        data.total_points()
    );
    print_listing(&data, args.filter.as_deref());
    Ok(())
}

fn print_listing(data: &TournamentData, filter: Option<&str>) {
    let needle = filter.map(str::to_lowercase);
    for listing in data.listings() {
        let meta = &listing.meta;
        if let Some(needle) = &needle {
            let names = meta.title().to_lowercase();
            if !names.contains(needle.as_str()) {
                continue;
            }
        }
        println!(
            "{:<24} {:>4} pts  {:<6} {}",
            meta.match_id,
            listing.point_count,
            meta.round.as_deref().unwrap_or("-"),
            meta.title()
        );
    }
}
