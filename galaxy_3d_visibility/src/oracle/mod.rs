//! Visibility oracle module
//!
//! The oracle is the component that actually tests bounding spheres
//! against a camera (frustum, distance bands, occlusion) and reports state
//! transitions. This module defines its interface, the adapter that feeds
//! it and collects its events, and `SphereOracle`, a CPU implementation.

mod visibility_oracle;
mod oracle_adapter;
mod sphere_oracle;

pub use visibility_oracle::{VisibilityOracle, StateChange, EventSink};
pub use oracle_adapter::OracleAdapter;
pub use sphere_oracle::SphereOracle;
