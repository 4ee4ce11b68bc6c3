/// LifecycleReaper — amortized removal of destroyed entities.
///
/// Runs at most once every `cleanup_interval` frames and does one of two
/// things per run:
///
/// 1. If removals are pending, compact the registry (priority pass).
/// 2. Otherwise scan `batch_size` slots from a rotating cursor and mark
///    the ones whose node or geometry is gone. They are compacted on the
///    next run.
///
/// The caller must have completed outstanding jobs and drained oracle
/// events before a run that compacts.

use super::entity_registry::{EntityRegistry, EntitySlot};

/// Outcome of one `LifecycleReaper::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaperPass {
    /// Pending slots were compacted away
    Compacted { removed: usize },
    /// Stale-handle scan over a batch of slots
    Scanned { examined: usize, found: usize },
}

pub struct LifecycleReaper {
    cleanup_interval: u32,
    batch_size: usize,
    cursor: usize,
    frames_since_run: u32,
}

impl LifecycleReaper {
    pub fn new(cleanup_interval: u32, batch_size: usize) -> Self {
        Self {
            cleanup_interval: cleanup_interval.max(1),
            batch_size: batch_size.max(1),
            cursor: 0,
            frames_since_run: 0,
        }
    }

    /// Count a frame. Returns true when a run is due.
    pub fn tick(&mut self) -> bool {
        self.frames_since_run += 1;
        if self.frames_since_run >= self.cleanup_interval {
            self.frames_since_run = 0;
            true
        } else {
            false
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cleanup_interval(&self) -> u32 {
        self.cleanup_interval
    }

    /// Forget scan progress (after the registry was rebuilt).
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.frames_since_run = 0;
    }

    /// Run one pass. `is_stale` decides whether a live slot references
    /// destroyed scene objects.
    pub fn run<F>(&mut self, registry: &mut EntityRegistry, is_stale: F) -> ReaperPass
    where
        F: Fn(&EntitySlot) -> bool,
    {
        if registry.has_pending_removals() {
            let removed = registry.compact();
            if self.cursor >= registry.len() {
                self.cursor = 0;
            }
            return ReaperPass::Compacted { removed };
        }

        let len = registry.len();
        let examined = self.batch_size.min(len);
        let mut found = 0;
        for _ in 0..examined {
            if self.cursor >= len {
                self.cursor = 0;
            }
            let index = self.cursor;
            self.cursor += 1;

            if let Some(slot) = registry.get(index) {
                if !slot.marked_for_removal && is_stale(&slot) && registry.mark_index_for_removal(index) {
                    found += 1;
                }
            }
        }
        if self.cursor >= len {
            self.cursor = 0;
        }

        ReaperPass::Scanned { examined, found }
    }
}

#[cfg(test)]
#[path = "reaper_tests.rs"]
mod tests;
