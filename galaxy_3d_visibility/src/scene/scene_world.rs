/// Scene collaborator interface.
///
/// The visibility system never owns scene objects. It discovers entities,
/// samples transforms, reads geometry bounds and toggles drawables through
/// this trait. All handles are weak keys: every call may report that the
/// referenced object is gone, and callers must handle that.
///
/// Read methods are called from background batch jobs, hence `Send + Sync`
/// and `&self` everywhere. Implementations use interior mutability for the
/// few mutating calls (`take_node_state`, `set_drawable_enabled`).
///
/// Drawables hang off their entity's transform node. Their bounds are read
/// in node space so that a single pose sample places them in the world.

use crate::math::{AABB, Pose};
use super::keys::{DrawableKey, EntityKey, LodGroupKey, NodeKey};

/// Static description of an entity, resolved at registration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityInfo {
    /// Transform node used to sample the pose
    pub node: NodeKey,
    /// Layer index (0..32)
    pub layer: u32,
    /// Single drawable, if any
    pub drawable: Option<DrawableKey>,
    /// LOD group, if any (takes priority over `drawable`)
    pub lod_group: Option<LodGroupKey>,
    /// Static entities are never re-sampled by the change detector
    pub is_static: bool,
}

/// Current state of a transform node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub pose: Pose,
    /// Set by the scene whenever the pose is written, reset by `take_node_state`
    pub pose_changed: bool,
}

/// Scene discovery, spatial sampling and render/LOD sink.
pub trait SceneWorld: Send + Sync {
    // ===== DISCOVERY =====

    /// Entities carrying `tag`. Destroyed entities must not be returned.
    fn entities_with_tag(&self, tag: &str) -> Vec<EntityKey>;

    /// Resolve an entity, `None` if it is null or destroyed.
    fn entity_info(&self, entity: EntityKey) -> Option<EntityInfo>;

    // ===== SPATIAL =====

    /// Pose and change flag of a node, `None` if the node is gone.
    fn node_state(&self, node: NodeKey) -> Option<NodeState>;

    /// Sample a node and reset its pose-changed flag in one atomic step.
    ///
    /// The returned state carries the flag as it was before the reset. A
    /// write landing after the sample sets the flag again.
    fn take_node_state(&self, node: NodeKey) -> Option<NodeState>;

    fn is_node_alive(&self, node: NodeKey) -> bool {
        self.node_state(node).is_some()
    }

    // ===== GEOMETRY =====

    /// Bounds of a drawable in its node's space, `None` if it is gone.
    fn drawable_local_bounds(&self, drawable: DrawableKey) -> Option<AABB>;

    /// Number of LOD levels, `None` if the group is gone.
    fn lod_level_count(&self, group: LodGroupKey) -> Option<usize>;

    /// Drawables of one LOD level (empty if the level or group is gone).
    fn lod_level_drawables(&self, group: LodGroupKey, level: usize) -> Vec<DrawableKey>;

    fn is_drawable_alive(&self, drawable: DrawableKey) -> bool {
        self.drawable_local_bounds(drawable).is_some()
    }

    fn is_lod_group_alive(&self, group: LodGroupKey) -> bool {
        self.lod_level_count(group).is_some()
    }

    // ===== RENDER SINK =====

    /// Enable or disable rendering of a drawable. Must be idempotent.
    fn set_drawable_enabled(&self, drawable: DrawableKey, enabled: bool);
}
