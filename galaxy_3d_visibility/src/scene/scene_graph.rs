/// SceneGraph — in-memory reference implementation of `SceneWorld`.
///
/// Uses SlotMaps for O(1) insert/remove with stable keys. Destroying an
/// entity invalidates its node, drawables and LOD group, which is exactly
/// the kind of stale reference the lifecycle reaper has to cope with.
///
/// All state sits behind one RwLock so that background jobs can sample
/// poses and bounds while the orchestrating thread holds `&SceneGraph`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use slotmap::SlotMap;
use crate::math::{AABB, Pose};
use super::keys::{DrawableKey, EntityKey, LodGroupKey, NodeKey};
use super::scene_world::{EntityInfo, NodeState, SceneWorld};

/// Parameters for `SceneGraph::create_entity`.
#[derive(Debug, Clone, Default)]
pub struct EntityDesc {
    pub pose: Pose,
    pub layer: u32,
    pub tag: Option<String>,
    pub is_static: bool,
}

struct EntityData {
    node: NodeKey,
    layer: u32,
    tag: Option<String>,
    drawable: Option<DrawableKey>,
    lod_group: Option<LodGroupKey>,
    is_static: bool,
}

struct NodeData {
    pose: Pose,
    pose_changed: bool,
}

struct DrawableData {
    node: NodeKey,
    /// Bounds in the node's local space
    local_bounds: AABB,
    enabled: bool,
}

struct LodGroupData {
    levels: Vec<Vec<DrawableKey>>,
}

#[derive(Default)]
struct SceneGraphInner {
    entities: SlotMap<EntityKey, EntityData>,
    nodes: SlotMap<NodeKey, NodeData>,
    drawables: SlotMap<DrawableKey, DrawableData>,
    lod_groups: SlotMap<LodGroupKey, LodGroupData>,
}

/// A minimal scene: entities with one transform node each, drawables and
/// LOD groups attached to that node.
#[derive(Default)]
pub struct SceneGraph {
    inner: RwLock<SceneGraphInner>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, SceneGraphInner>> {
        self.inner.read().ok()
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, SceneGraphInner>> {
        self.inner.write().ok()
    }

    // ===== BUILDING =====

    /// Create an entity and its transform node.
    pub fn create_entity(&self, desc: EntityDesc) -> Option<EntityKey> {
        let mut inner = self.write()?;
        let node = inner.nodes.insert(NodeData {
            pose: desc.pose,
            pose_changed: false,
        });
        Some(inner.entities.insert(EntityData {
            node,
            layer: desc.layer,
            tag: desc.tag,
            drawable: None,
            lod_group: None,
            is_static: desc.is_static,
        }))
    }

    /// Attach a single drawable with local-space bounds. Starts enabled.
    pub fn add_drawable(&self, entity: EntityKey, local_bounds: AABB) -> Option<DrawableKey> {
        let mut inner = self.write()?;
        let node = inner.entities.get(entity)?.node;
        let drawable = inner.drawables.insert(DrawableData {
            node,
            local_bounds,
            enabled: true,
        });
        inner.entities.get_mut(entity)?.drawable = Some(drawable);
        Some(drawable)
    }

    /// Attach a LOD group. `levels[i]` lists the local bounds of the drawables of level i.
    pub fn add_lod_group(&self, entity: EntityKey, levels: &[Vec<AABB>]) -> Option<LodGroupKey> {
        let mut inner = self.write()?;
        let node = inner.entities.get(entity)?.node;
        let mut level_keys = Vec::with_capacity(levels.len());
        for level in levels {
            let keys: Vec<DrawableKey> = level
                .iter()
                .map(|bounds| {
                    inner.drawables.insert(DrawableData {
                        node,
                        local_bounds: *bounds,
                        enabled: true,
                    })
                })
                .collect();
            level_keys.push(keys);
        }
        let group = inner.lod_groups.insert(LodGroupData { levels: level_keys });
        inner.entities.get_mut(entity)?.lod_group = Some(group);
        Some(group)
    }

    // ===== MUTATION =====

    /// Move an entity. Flags its node as changed. Returns false if the entity is gone.
    pub fn set_pose(&self, entity: EntityKey, pose: Pose) -> bool {
        let Some(mut inner) = self.write() else {
            return false;
        };
        let Some(node) = inner.entities.get(entity).map(|e| e.node) else {
            return false;
        };
        match inner.nodes.get_mut(node) {
            Some(data) => {
                data.pose = pose;
                data.pose_changed = true;
                true
            }
            None => false,
        }
    }

    /// Destroy an entity together with its node, drawables and LOD group.
    pub fn destroy_entity(&self, entity: EntityKey) -> bool {
        let Some(mut inner) = self.write() else {
            return false;
        };
        let Some(data) = inner.entities.remove(entity) else {
            return false;
        };
        inner.nodes.remove(data.node);
        if let Some(drawable) = data.drawable {
            inner.drawables.remove(drawable);
        }
        if let Some(group) = data.lod_group {
            if let Some(group_data) = inner.lod_groups.remove(group) {
                for drawable in group_data.levels.into_iter().flatten() {
                    inner.drawables.remove(drawable);
                }
            }
        }
        true
    }

    /// Destroy only the transform node, leaving a dangling entity behind.
    pub fn destroy_node(&self, entity: EntityKey) -> bool {
        let Some(mut inner) = self.write() else {
            return false;
        };
        let Some(node) = inner.entities.get(entity).map(|e| e.node) else {
            return false;
        };
        inner.nodes.remove(node).is_some()
    }

    // ===== QUERIES =====

    pub fn entity_count(&self) -> usize {
        self.read().map_or(0, |inner| inner.entities.len())
    }

    pub fn pose(&self, entity: EntityKey) -> Option<Pose> {
        let inner = self.read()?;
        let node = inner.entities.get(entity)?.node;
        inner.nodes.get(node).map(|n| n.pose)
    }

    /// Rendering state of a drawable, `None` if it is gone.
    pub fn is_drawable_enabled(&self, drawable: DrawableKey) -> Option<bool> {
        self.read()?.drawables.get(drawable).map(|d| d.enabled)
    }
}

impl SceneWorld for SceneGraph {
    fn entities_with_tag(&self, tag: &str) -> Vec<EntityKey> {
        let Some(inner) = self.read() else {
            return Vec::new();
        };
        inner
            .entities
            .iter()
            .filter(|(_, e)| e.tag.as_deref() == Some(tag))
            .map(|(key, _)| key)
            .collect()
    }

    fn entity_info(&self, entity: EntityKey) -> Option<EntityInfo> {
        let inner = self.read()?;
        let e = inner.entities.get(entity)?;
        Some(EntityInfo {
            node: e.node,
            layer: e.layer,
            drawable: e.drawable,
            lod_group: e.lod_group,
            is_static: e.is_static,
        })
    }

    fn node_state(&self, node: NodeKey) -> Option<NodeState> {
        let inner = self.read()?;
        inner.nodes.get(node).map(|n| NodeState {
            pose: n.pose,
            pose_changed: n.pose_changed,
        })
    }

    fn take_node_state(&self, node: NodeKey) -> Option<NodeState> {
        let mut inner = self.write()?;
        let n = inner.nodes.get_mut(node)?;
        let state = NodeState {
            pose: n.pose,
            pose_changed: n.pose_changed,
        };
        n.pose_changed = false;
        Some(state)
    }

    fn drawable_local_bounds(&self, drawable: DrawableKey) -> Option<AABB> {
        self.read()?.drawables.get(drawable).map(|d| d.local_bounds)
    }

    fn lod_level_count(&self, group: LodGroupKey) -> Option<usize> {
        self.read()?.lod_groups.get(group).map(|g| g.levels.len())
    }

    fn lod_level_drawables(&self, group: LodGroupKey, level: usize) -> Vec<DrawableKey> {
        self.read()
            .and_then(|inner| inner.lod_groups.get(group).and_then(|g| g.levels.get(level).cloned()))
            .unwrap_or_default()
    }

    fn set_drawable_enabled(&self, drawable: DrawableKey, enabled: bool) {
        if let Some(mut inner) = self.write() {
            if let Some(d) = inner.drawables.get_mut(drawable) {
                d.enabled = enabled;
            }
        }
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
