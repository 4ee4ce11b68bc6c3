/// EntityRegistry — structure-of-arrays store of tracked entities.
///
/// Every column has the same length and index alignment. An index is
/// stable until the next `compact()`; removal only *marks* a slot, which
/// stays addressable (with an excluded bounding sphere) until compaction.
///
/// The bounding-sphere column is the array pushed to the visibility oracle.
/// Only the orchestrating thread mutates the registry; background jobs
/// receive copies of the inputs they need and hand results back.

use rustc_hash::FxHashMap;
use crate::error::{Error, RejectReason, Result};
use crate::math::{BoundingSphere, Pose};
use crate::scene::{EntityKey, NodeKey};
use super::geometry_owner::GeometryOwner;

/// Oracle-driven visibility state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// No report received yet
    #[default]
    Unknown,
    Visible,
    Hidden,
}

/// Everything needed to append a new slot.
#[derive(Debug, Clone, Copy)]
pub struct EntityRecord {
    pub entity: EntityKey,
    pub owner: GeometryOwner,
    pub node: NodeKey,
    pub pose: Pose,
    pub bounds: BoundingSphere,
    pub dynamic: bool,
}

/// Copy of one registry row.
#[derive(Debug, Clone, Copy)]
pub struct EntitySlot {
    pub entity: EntityKey,
    pub owner: GeometryOwner,
    pub node: NodeKey,
    pub last_pose: Pose,
    pub state: VisibilityState,
    /// Last reported distance, `f32::INFINITY` before the first report
    pub distance: f32,
    /// LOD level last applied, `None` when none is active
    pub lod_level: Option<usize>,
    pub marked_for_removal: bool,
    pub dynamic: bool,
    pub bounds: BoundingSphere,
}

impl EntitySlot {
    pub fn is_visible(&self) -> bool {
        self.state == VisibilityState::Visible
    }
}

/// Column-wise entity storage with an identity → index lookup.
#[derive(Default)]
pub struct EntityRegistry {
    entities: Vec<EntityKey>,
    owners: Vec<GeometryOwner>,
    nodes: Vec<NodeKey>,
    last_poses: Vec<Pose>,
    states: Vec<VisibilityState>,
    distances: Vec<f32>,
    lod_levels: Vec<Option<usize>>,
    marked: Vec<bool>,
    dynamic: Vec<bool>,
    bounds: Vec<BoundingSphere>,
    /// Identity → index, live entities only
    lookup: FxHashMap<EntityKey, usize>,
    /// Indices of dynamic entities, ascending
    dynamic_indices: Vec<usize>,
    /// Indices marked since the last compaction
    pending_removal: Vec<usize>,
    visible_count: usize,
    resync_requested: bool,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== REGISTRATION =====

    /// Append a slot for a new entity.
    ///
    /// Rejected (without any mutation) if the identity already maps to a live index.
    pub fn insert(&mut self, record: EntityRecord) -> Result<usize> {
        if self.lookup.contains_key(&record.entity) {
            return Err(Error::RegistrationRejected(RejectReason::AlreadyRegistered));
        }

        let index = self.entities.len();
        self.entities.push(record.entity);
        self.owners.push(record.owner);
        self.nodes.push(record.node);
        self.last_poses.push(record.pose);
        self.states.push(VisibilityState::Unknown);
        self.distances.push(f32::INFINITY);
        self.lod_levels.push(None);
        self.marked.push(false);
        self.dynamic.push(record.dynamic);
        self.bounds.push(record.bounds);

        self.lookup.insert(record.entity, index);
        if record.dynamic {
            self.dynamic_indices.push(index);
        }
        self.resync_requested = true;
        Ok(index)
    }

    /// Mark the slot of `entity` for removal. Returns its index, or `None` if not registered.
    ///
    /// The identity is released immediately, so it can be registered again
    /// before the old slot is physically compacted away.
    pub fn mark_for_removal(&mut self, entity: EntityKey) -> Option<usize> {
        let index = *self.lookup.get(&entity)?;
        self.mark_index_for_removal(index).then_some(index)
    }

    /// Mark a slot by index. Returns false if out of range or already marked.
    pub fn mark_index_for_removal(&mut self, index: usize) -> bool {
        if index >= self.entities.len() || self.marked[index] {
            return false;
        }

        self.marked[index] = true;
        self.bounds[index] = BoundingSphere::EXCLUDED;
        if self.states[index] == VisibilityState::Visible {
            self.visible_count = self.visible_count.saturating_sub(1);
        }
        let entity = self.entities[index];
        if self.lookup.get(&entity) == Some(&index) {
            self.lookup.remove(&entity);
        }
        self.pending_removal.push(index);
        self.resync_requested = true;
        true
    }

    /// Drop every marked slot, preserving the relative order of survivors.
    ///
    /// Remaps the lookup and the dynamic-index list. Returns the number of
    /// removed slots. Must not run while a background job reads the columns.
    pub fn compact(&mut self) -> usize {
        let removed = self.marked.iter().filter(|m| **m).count();
        if removed == 0 {
            self.pending_removal.clear();
            return 0;
        }

        // Old index → new index, None for removed slots
        let mut next = 0;
        let remap: Vec<Option<usize>> = self
            .marked
            .iter()
            .map(|&marked| {
                if marked {
                    None
                } else {
                    next += 1;
                    Some(next - 1)
                }
            })
            .collect();

        let keep: Vec<bool> = self.marked.iter().map(|m| !m).collect();
        retain_by(&mut self.entities, &keep);
        retain_by(&mut self.owners, &keep);
        retain_by(&mut self.nodes, &keep);
        retain_by(&mut self.last_poses, &keep);
        retain_by(&mut self.states, &keep);
        retain_by(&mut self.distances, &keep);
        retain_by(&mut self.lod_levels, &keep);
        retain_by(&mut self.dynamic, &keep);
        retain_by(&mut self.bounds, &keep);
        retain_by(&mut self.marked, &keep);

        for index in self.lookup.values_mut() {
            if let Some(new_index) = remap[*index] {
                *index = new_index;
            }
        }
        self.dynamic_indices = self
            .dynamic_indices
            .iter()
            .filter_map(|&old| remap[old])
            .collect();

        self.pending_removal.clear();
        self.resync_requested = true;
        removed
    }

    /// Grow (or trim) the capacity of every column.
    ///
    /// Never shrinks below the current slot count. Returns the resulting capacity.
    pub fn resize(&mut self, new_capacity: usize) -> usize {
        let target = new_capacity.max(self.entities.len());
        resize_column(&mut self.entities, target);
        resize_column(&mut self.owners, target);
        resize_column(&mut self.nodes, target);
        resize_column(&mut self.last_poses, target);
        resize_column(&mut self.states, target);
        resize_column(&mut self.distances, target);
        resize_column(&mut self.lod_levels, target);
        resize_column(&mut self.marked, target);
        resize_column(&mut self.dynamic, target);
        resize_column(&mut self.bounds, target);
        self.capacity()
    }

    /// Forget every entity.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // ===== QUERIES =====

    /// Number of slots, including slots pending removal.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of slots not marked for removal.
    pub fn live_count(&self) -> usize {
        self.lookup.len()
    }

    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Running count of live entities whose state is Visible.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn index_of(&self, entity: EntityKey) -> Option<usize> {
        self.lookup.get(&entity).copied()
    }

    pub fn contains(&self, entity: EntityKey) -> bool {
        self.lookup.contains_key(&entity)
    }

    /// Copy of the row at `index`.
    pub fn get(&self, index: usize) -> Option<EntitySlot> {
        if index >= self.entities.len() {
            return None;
        }
        Some(EntitySlot {
            entity: self.entities[index],
            owner: self.owners[index],
            node: self.nodes[index],
            last_pose: self.last_poses[index],
            state: self.states[index],
            distance: self.distances[index],
            lod_level: self.lod_levels[index],
            marked_for_removal: self.marked[index],
            dynamic: self.dynamic[index],
            bounds: self.bounds[index],
        })
    }

    /// Iterate over slots that are not marked for removal.
    pub fn live_slots(&self) -> impl Iterator<Item = (usize, EntitySlot)> + '_ {
        (0..self.entities.len())
            .filter(|&i| !self.marked[i])
            .filter_map(|i| self.get(i).map(|slot| (i, slot)))
    }

    /// The bounding-sphere column, index-aligned with every other column.
    pub fn bounds(&self) -> &[BoundingSphere] {
        &self.bounds
    }

    pub fn dynamic_indices(&self) -> &[usize] {
        &self.dynamic_indices
    }

    pub fn pending_removals(&self) -> &[usize] {
        &self.pending_removal
    }

    pub fn has_pending_removals(&self) -> bool {
        !self.pending_removal.is_empty()
    }

    // ===== MUTATION =====

    /// Overwrite the bounding sphere of a live slot.
    pub fn set_bounds(&mut self, index: usize, sphere: BoundingSphere) -> bool {
        if index >= self.bounds.len() || self.marked[index] {
            return false;
        }
        self.bounds[index] = sphere;
        true
    }

    pub fn set_last_pose(&mut self, index: usize, pose: Pose) -> bool {
        if index >= self.last_poses.len() || self.marked[index] {
            return false;
        }
        self.last_poses[index] = pose;
        true
    }

    /// Record an oracle report and keep the visible count in step.
    ///
    /// Returns the previous state. Marked slots are left untouched.
    pub fn set_visibility(&mut self, index: usize, visible: bool, distance: f32) -> Option<VisibilityState> {
        if index >= self.states.len() || self.marked[index] {
            return None;
        }
        let previous = self.states[index];
        let was_visible = previous == VisibilityState::Visible;
        if visible && !was_visible {
            self.visible_count += 1;
        } else if !visible && was_visible {
            self.visible_count = self.visible_count.saturating_sub(1);
        }
        self.states[index] = if visible { VisibilityState::Visible } else { VisibilityState::Hidden };
        self.distances[index] = distance;
        Some(previous)
    }

    pub fn set_lod_level(&mut self, index: usize, level: Option<usize>) -> bool {
        if index >= self.lod_levels.len() || self.marked[index] {
            return false;
        }
        self.lod_levels[index] = level;
        true
    }

    // ===== RESYNC =====

    /// Ask for the full bounds array to be pushed to the oracle again.
    pub fn request_resync(&mut self) {
        self.resync_requested = true;
    }

    pub fn resync_requested(&self) -> bool {
        self.resync_requested
    }

    /// Consume the resync request.
    pub fn take_resync(&mut self) -> bool {
        std::mem::take(&mut self.resync_requested)
    }
}

fn retain_by<T>(column: &mut Vec<T>, keep: &[bool]) {
    let mut i = 0;
    column.retain(|_| {
        let k = keep[i];
        i += 1;
        k
    });
}

fn resize_column<T>(column: &mut Vec<T>, target: usize) {
    if target > column.capacity() {
        column.reserve_exact(target - column.len());
    } else {
        column.shrink_to(target);
    }
}

#[cfg(test)]
#[path = "entity_registry_tests.rs"]
mod tests;
