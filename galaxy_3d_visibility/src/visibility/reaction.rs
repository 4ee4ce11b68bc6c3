/// VisibilityReactor — turns oracle events into registry state and render decisions.
///
/// Per event:
/// 1. Drop it if the index is out of range, the slot is marked for
///    removal, or the slot's node is gone.
/// 2. With bands configured, a visible report past the last band becomes
///    not visible.
/// 3. If neither the visibility flipped (Unknown always flips) nor the
///    distance moved by more than `DISTANCE_EPSILON`, do nothing.
/// 4. Store state and distance, keep the visible count in step, notify
///    listeners, then drive the render sink: one drawable is enabled or
///    disabled, a LOD group gets exactly one level enabled (none when
///    hidden).
///
/// Applying the same event twice leaves the same state behind.

use crate::oracle::StateChange;
use crate::registry::{EntityRegistry, GeometryOwner, VisibilityState};
use crate::scene::{LodGroupKey, SceneWorld};
use super::listener::VisibilityListener;
use super::lod_policy::{band_index, lod_level_for_distance};

/// Distance change below which an event with unchanged visibility is ignored.
pub const DISTANCE_EPSILON: f32 = 0.01;

/// What `VisibilityReactor::apply` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Applied,
    /// Nothing changed
    Unchanged,
    /// Stale event (out of range, removed or dead slot)
    Dropped,
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityReactor {
    bands: Vec<f32>,
}

impl VisibilityReactor {
    /// `bands` must already be sanitized.
    pub fn new(bands: Vec<f32>) -> Self {
        Self { bands }
    }

    pub fn apply<W>(
        &self,
        change: StateChange,
        registry: &mut EntityRegistry,
        world: &W,
        listeners: &mut [Box<dyn VisibilityListener>],
    ) -> ReactionOutcome
    where
        W: SceneWorld + ?Sized,
    {
        let Some(slot) = registry.get(change.index) else {
            return ReactionOutcome::Dropped;
        };
        if slot.marked_for_removal || !world.is_node_alive(slot.node) {
            return ReactionOutcome::Dropped;
        }

        let visible = change.visible
            && (self.bands.is_empty() || band_index(change.distance, &self.bands).is_some());

        let flipped = match slot.state {
            VisibilityState::Unknown => true,
            VisibilityState::Visible => !visible,
            VisibilityState::Hidden => visible,
        };
        let moved = (change.distance - slot.distance).abs() > DISTANCE_EPSILON;
        if !flipped && !moved {
            return ReactionOutcome::Unchanged;
        }

        registry.set_visibility(change.index, visible, change.distance);
        for listener in listeners.iter_mut() {
            listener.on_visibility_changed(slot.entity, visible, change.distance);
        }

        match slot.owner {
            GeometryOwner::Drawable(drawable) => world.set_drawable_enabled(drawable, visible),
            GeometryOwner::LodGroup(group) => {
                let level_count = world.lod_level_count(group).unwrap_or(0);
                let level = if visible {
                    lod_level_for_distance(change.distance, &self.bands, level_count)
                } else {
                    None
                };
                enable_only(world, group, level_count, level);

                if level != slot.lod_level {
                    registry.set_lod_level(change.index, level);
                    if let Some(level) = level {
                        for listener in listeners.iter_mut() {
                            listener.on_lod_changed(slot.entity, level);
                        }
                    }
                }
            }
        }

        ReactionOutcome::Applied
    }
}

/// Enable the drawables of `level`, disable those of every other level.
fn enable_only<W>(world: &W, group: LodGroupKey, level_count: usize, level: Option<usize>)
where
    W: SceneWorld + ?Sized,
{
    for l in 0..level_count {
        let enabled = level == Some(l);
        for drawable in world.lod_level_drawables(group, l) {
            world.set_drawable_enabled(drawable, enabled);
        }
    }
}

#[cfg(test)]
#[path = "reaction_tests.rs"]
mod tests;
