//! Entity registry module
//!
//! Structure-of-arrays storage for tracked entities, the geometry owner
//! and visibility state types stored in it, and the lifecycle reaper that
//! removes dead entries in bounded batches.

mod geometry_owner;
mod entity_registry;
mod reaper;

pub use geometry_owner::GeometryOwner;
pub use entity_registry::{EntityRegistry, EntityRecord, EntitySlot, VisibilityState};
pub use reaper::{LifecycleReaper, ReaperPass};
