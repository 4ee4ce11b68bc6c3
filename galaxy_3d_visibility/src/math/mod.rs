//! Math primitives shared by the visibility pipeline.
//!
//! Bounding volumes (AABB, BoundingSphere) and sampled poses.

mod bounds;
mod pose;

pub use bounds::{AABB, BoundingSphere};
pub use pose::{Pose, PoseDrift};
