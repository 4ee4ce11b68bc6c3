/*!
# Galaxy 3D Visibility

Visibility and LOD synchronization for the Galaxy 3D engine.

Tracks a large, changing population of scene entities and decides, frame by
frame, which of them are visible from the active camera and at which level of
detail. Frustum, distance-band and occlusion tests are delegated to a
pluggable oracle; this crate keeps the data that feeds it consistent and turns
its reports into render decisions.

## Architecture

- **EntityRegistry**: structure-of-arrays entity store, index-stable between compactions
- **BatchScheduler**: chunked parallel jobs (bounds refresh, change detection)
- **VisibilityOracle**: frustum / distance / occlusion test engine (trait, `SphereOracle` on CPU)
- **VisibilityReactor**: oracle events → visibility state, LOD level, drawable enable
- **LifecycleReaper**: batched removal of destroyed entities
- **VisibilitySystem**: per-frame orchestration of all of the above

The scene is reached through the `SceneWorld` trait; `SceneGraph` is an
in-memory implementation.
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod math;
pub mod camera;
pub mod scene;
pub mod registry;
pub mod jobs;
pub mod oracle;
pub mod visibility;
pub mod config;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result, RejectReason};

    // Process-wide logger
    pub use crate::diagnostics::Diagnostics;

    // Entry point
    pub use crate::visibility::VisibilitySystem;
    pub use crate::config::{VisibilityConfig, TargetSource};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, LogLevel, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod registry {
        pub use crate::registry::*;
    }

    pub mod jobs {
        pub use crate::jobs::*;
    }

    pub mod oracle {
        pub use crate::oracle::*;
    }

    pub mod visibility {
        pub use crate::visibility::*;
    }

    pub mod config {
        pub use crate::config::*;
    }
}

// Re-export math library at crate root
pub use glam;
