// Match-level analysis built on the momentum series
pub mod key_moments;
pub mod match_analysis;
pub mod statistics;

// Re-export commonly used types
pub use key_moments::{KeyMomentParams, KeyMoments, LeadChange, PointRun, TurningPoint};
pub use match_analysis::{AnalysisSettings, MatchAnalysis, XAxisMode, analyze_match};
pub use statistics::{FinalScore, MatchStats, MomentumStats, SetBreakdown, consistency_score};
