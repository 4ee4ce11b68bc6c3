//! Camera module — low-level camera and frustum.
//!
//! Passive data containers describing a viewpoint. The visibility system
//! does not drive cameras; the caller owns them and hands them over via
//! the configuration or `VisibilitySystem::update_camera`.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::Frustum;
