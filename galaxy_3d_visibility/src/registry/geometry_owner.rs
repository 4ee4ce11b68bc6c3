/// What an entity renders with.

use crate::scene::{DrawableKey, EntityInfo, LodGroupKey, SceneWorld};

/// The geometry an entity owns: one drawable, or a LOD group.
///
/// When an entity has both, the LOD group wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryOwner {
    Drawable(DrawableKey),
    LodGroup(LodGroupKey),
}

impl GeometryOwner {
    /// Pick the owner from resolved entity info, `None` if it has no geometry.
    pub fn from_info(info: &EntityInfo) -> Option<Self> {
        match (info.lod_group, info.drawable) {
            (Some(group), _) => Some(GeometryOwner::LodGroup(group)),
            (None, Some(drawable)) => Some(GeometryOwner::Drawable(drawable)),
            (None, None) => None,
        }
    }

    /// Whether the referenced geometry still exists in the scene.
    pub fn is_alive(&self, world: &dyn SceneWorld) -> bool {
        match *self {
            GeometryOwner::Drawable(drawable) => world.is_drawable_alive(drawable),
            GeometryOwner::LodGroup(group) => world.is_lod_group_alive(group),
        }
    }
}
