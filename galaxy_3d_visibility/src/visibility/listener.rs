/// Hooks fired by the reaction state machine.

use crate::scene::EntityKey;

/// Observer of visibility and LOD decisions.
///
/// Both hooks run on the orchestrating thread, inside
/// `VisibilitySystem::prepare_for_render`. Default bodies do nothing.
pub trait VisibilityListener: Send {
    /// An entity's visibility or distance was updated.
    fn on_visibility_changed(&mut self, _entity: EntityKey, _visible: bool, _distance: f32) {}

    /// A LOD group switched to another level.
    fn on_lod_changed(&mut self, _entity: EntityKey, _level: usize) {}
}
