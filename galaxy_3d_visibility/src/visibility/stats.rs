/// Counters exposed by `VisibilitySystem::stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityStats {
    /// Registry slots, including slots pending removal
    pub registered: usize,
    /// Slots not marked for removal
    pub live: usize,
    /// Live entities currently reported visible
    pub visible: usize,
    /// Entities covered by change detection
    pub dynamic: usize,
    /// Slots waiting for compaction
    pub pending_removal: usize,
    /// Length of the sphere array last pushed to the oracle
    pub oracle_slots: usize,
    pub events_applied: u64,
    pub events_unchanged: u64,
    /// Events for out-of-range, removed or dead slots
    pub events_dropped: u64,
    pub bounds_recomputed: u64,
    pub compactions: u64,
    pub frame: u64,
}
