// Momentum and segmentation models.
// Pure functions over point sequences; nothing here touches the UI or the file system.

pub mod momentum;
pub mod segments;

pub use momentum::{
    DecayRule, MomentumModel, MomentumRule, MomentumSeries, MomentumSettings,
    compute_decayed_momentum, compute_momentum,
};
pub use segments::{GameSegment, SetSegment, segment_games, segment_sets, set_for_index};
