/// Stable handles into the scene collaborator.
///
/// Every engine reference the visibility system keeps is one of these
/// keys: a weak handle that must be checked for liveness before use.

use slotmap::new_key_type;

new_key_type! {
    /// Identity of a tracked scene entity.
    pub struct EntityKey;

    /// Transform node (spatial handle) of an entity.
    pub struct NodeKey;

    /// A single drawable that can be enabled or disabled.
    pub struct DrawableKey;

    /// A set of alternative drawables, one level active at a time.
    pub struct LodGroupKey;
}
