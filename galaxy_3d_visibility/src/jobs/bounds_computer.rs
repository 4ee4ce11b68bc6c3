/// Bounding-sphere computation for one entity.
///
/// Pure: reads the scene, writes nothing, logs nothing. The caller decides
/// what to do with a fallback result.

use crate::math::{BoundingSphere, Pose};
use crate::registry::GeometryOwner;
use crate::scene::{NodeKey, SceneWorld};
use super::change_detector::{BoundsJobInput, BoundsUpdate};

/// Where a computed sphere came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSource {
    /// World bounds of the entity's drawable
    Drawable,
    /// World bounds of the first drawable of LOD level 0
    LodGroup,
    /// No usable geometry bounds: zero-radius sphere at the node position
    Fallback,
}

/// World-space bounding sphere of an entity, `None` if its node is gone.
pub fn compute_bounds<W>(world: &W, owner: GeometryOwner, node: NodeKey) -> Option<(BoundingSphere, BoundsSource)>
where
    W: SceneWorld + ?Sized,
{
    let pose = world.node_state(node)?.pose;
    Some(bounds_at_pose(world, owner, &pose))
}

/// Bounding sphere of an entity placed at `pose`.
///
/// Geometry bounds are read in node space and moved by `pose`, so the
/// sphere always matches the pose it is reported with. A sphere built from
/// an AABB is (center, extent magnitude).
pub fn bounds_at_pose<W>(world: &W, owner: GeometryOwner, pose: &Pose) -> (BoundingSphere, BoundsSource)
where
    W: SceneWorld + ?Sized,
{
    let local = match owner {
        GeometryOwner::Drawable(drawable) => world
            .drawable_local_bounds(drawable)
            .map(|aabb| (aabb, BoundsSource::Drawable)),
        GeometryOwner::LodGroup(group) => world
            .lod_level_drawables(group, 0)
            .first()
            .and_then(|drawable| world.drawable_local_bounds(*drawable))
            .map(|aabb| (aabb, BoundsSource::LodGroup)),
    };

    match local {
        Some((aabb, source)) => (aabb.transformed(&pose.to_matrix()).bounding_sphere(), source),
        None => (BoundingSphere::point(pose.position), BoundsSource::Fallback),
    }
}

/// Full-refresh job body: sample the pose and recompute bounds unconditionally.
pub fn refresh_bounds<W>(world: &W, input: &BoundsJobInput) -> Option<BoundsUpdate>
where
    W: SceneWorld + ?Sized,
{
    let pose = world.node_state(input.node)?.pose;
    Some(BoundsUpdate {
        index: input.index,
        node: input.node,
        pose,
        bounds: Some(bounds_at_pose(world, input.owner, &pose)),
    })
}

#[cfg(test)]
#[path = "bounds_computer_tests.rs"]
mod tests;
