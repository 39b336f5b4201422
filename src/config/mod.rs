//! Configuration module for the momentum analyzer.

pub mod analysis;
pub mod dataset;

mod debug; // Private: files use crate::config::DEBUG_FLAGS rather than crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use dataset::DATASET;
pub use demo::{DEMO, PresetMatch};
pub use plot::PLOT_CONFIG;
