//! Scene collaborator module
//!
//! Defines the boundary between the visibility system and the scene that
//! owns the actual objects: stable keys, layer masks, the `SceneWorld`
//! trait, and `SceneGraph`, an in-memory implementation of that trait.

mod keys;
mod layer;
mod scene_world;
mod scene_graph;

pub use keys::{EntityKey, NodeKey, DrawableKey, LodGroupKey};
pub use layer::LayerMask;
pub use scene_world::{SceneWorld, EntityInfo, NodeState};
pub use scene_graph::{SceneGraph, EntityDesc};
