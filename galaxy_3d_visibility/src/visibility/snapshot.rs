/// In-memory diagnostic snapshot of the visibility state.

use chrono::{DateTime, Local};
use glam::Vec3;
use crate::scene::EntityKey;

/// One tracked entity at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub entity: EntityKey,
    pub index: usize,
    /// Last sampled position
    pub position: Vec3,
    pub visible: bool,
    pub distance: f32,
    pub lod_level: Option<usize>,
    pub dynamic: bool,
}

/// State of every live entity plus the active camera pose.
#[derive(Debug, Clone)]
pub struct VisibilitySnapshot {
    pub timestamp: DateTime<Local>,
    pub frame: u64,
    /// `None` when the system is inert
    pub camera_position: Option<Vec3>,
    pub camera_forward: Option<Vec3>,
    pub entities: Vec<EntitySnapshot>,
}

impl VisibilitySnapshot {
    pub fn visible_entities(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities.iter().filter(|e| e.visible)
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "[{}] frame {}: {}/{} visible",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.frame,
            self.visible_entities().count(),
            self.entities.len()
        )
    }
}
