//! Background batch jobs
//!
//! The rayon-backed scheduler plus the per-entity job bodies it runs:
//! bounding-sphere computation and dynamic change detection. Job bodies
//! only read the scene; their results are applied to the registry by the
//! orchestrating thread once the job completes.

mod batch_scheduler;
mod bounds_computer;
mod change_detector;

pub use batch_scheduler::{BatchScheduler, JobHandle, DEFAULT_BATCH_SIZE};
pub use bounds_computer::{bounds_at_pose, compute_bounds, refresh_bounds, BoundsSource};
pub use change_detector::{detect_change, BoundsJobInput, BoundsUpdate};
