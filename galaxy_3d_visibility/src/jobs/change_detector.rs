/// Dynamic change detection.
///
/// For each dynamic entity whose node reports a pose change, compare the
/// current pose against the last sampled one. Bounds are recomputed only
/// when the drift on some axis (position distance, rotation angle in
/// degrees, scale distance) is at or above the threshold. The sampled pose
/// is reported either way so that the last-sampled pose gets reset.
///
/// The node is sampled with `take_node_state`, so the change flag is reset
/// at the moment of the sample. A move that lands while the job is still
/// running flags the node again and is picked up by the next run.

use crate::math::{BoundingSphere, Pose};
use crate::registry::GeometryOwner;
use crate::scene::{NodeKey, SceneWorld};
use super::bounds_computer::{bounds_at_pose, BoundsSource};

/// Per-entity job input, copied out of the registry before scheduling.
#[derive(Debug, Clone, Copy)]
pub struct BoundsJobInput {
    pub index: usize,
    pub node: NodeKey,
    pub owner: GeometryOwner,
    pub last_pose: Pose,
}

/// Per-entity job output, applied to the registry at the barrier.
#[derive(Debug, Clone, Copy)]
pub struct BoundsUpdate {
    pub index: usize,
    pub node: NodeKey,
    /// Pose sampled by the job
    pub pose: Pose,
    /// New sphere, `None` when the drift stayed below the threshold
    pub bounds: Option<(BoundingSphere, BoundsSource)>,
}

/// Change-detector job body. `None` when the node is gone or did not move.
pub fn detect_change<W>(world: &W, input: &BoundsJobInput, threshold: f32) -> Option<BoundsUpdate>
where
    W: SceneWorld + ?Sized,
{
    let state = world.take_node_state(input.node)?;
    if !state.pose_changed {
        return None;
    }

    let bounds = if input.last_pose.drift_to(&state.pose).reaches(threshold) {
        Some(bounds_at_pose(world, input.owner, &state.pose))
    } else {
        None
    };

    Some(BoundsUpdate {
        index: input.index,
        node: input.node,
        pose: state.pose,
        bounds,
    })
}

#[cfg(test)]
#[path = "change_detector_tests.rs"]
mod tests;
