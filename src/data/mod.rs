// Dataset access: CSV records, tournament grouping and the sources they come from
pub mod dataset;
pub mod demo_bundle;
pub mod loader;
#[cfg(not(target_arch = "wasm32"))]
pub mod local_csv;
pub mod records;
pub mod source;

// Re-export commonly used types
pub use dataset::{MatchListing, TournamentData};
pub use demo_bundle::EmbeddedDemoSource;
pub use loader::{default_sources, load_match};
#[cfg(not(target_arch = "wasm32"))]
pub use local_csv::LocalCsvSource;
pub use source::{DatasetSource, load_tournament_data};
