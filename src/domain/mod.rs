// Domain types and value objects
pub mod point;
pub mod tennis_match;
pub mod tournament;

// Re-export commonly used types
pub use point::{Player, Point, PointFlags};
pub use tennis_match::{Match, MatchMeta, MatchSelector};
pub use tournament::{Tournament, TournamentKey};
