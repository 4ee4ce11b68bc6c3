//! Visibility module
//!
//! The reaction state machine, the distance → LOD policy, listener hooks,
//! statistics and snapshots, and `VisibilitySystem`, which drives the whole
//! pipeline frame by frame.

mod lod_policy;
mod listener;
mod reaction;
mod stats;
mod snapshot;
mod visibility_system;

pub use lod_policy::{band_index, lod_level_for_distance};
pub use listener::VisibilityListener;
pub use reaction::{VisibilityReactor, ReactionOutcome, DISTANCE_EPSILON};
pub use stats::VisibilityStats;
pub use snapshot::{VisibilitySnapshot, EntitySnapshot};
pub use visibility_system::VisibilitySystem;
