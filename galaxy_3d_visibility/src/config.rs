//! Visibility system configuration
//!
//! A flat record consumed at (re)initialization. `validate` corrects what
//! can be corrected in place (distance bands, zero intervals, a bad active
//! camera index) and rejects what cannot (no usable camera).

use crate::camera::Camera;
use crate::engine_warn;
use crate::error::{Error, Result};
use crate::jobs::DEFAULT_BATCH_SIZE;
use crate::log::LogLevel;
use crate::scene::{EntityKey, LayerMask};

/// Minimum gap enforced between consecutive distance bands.
pub const MIN_BAND_SPACING: f32 = 0.01;

/// Tag used for discovery when nothing else is configured.
pub const DEFAULT_TARGET_TAG: &str = "Cullable";

/// Where the initial entity population comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSource {
    /// Every entity carrying this tag
    Tag(String),
    /// An explicit list
    Explicit(Vec<EntityKey>),
    /// Nothing up front, entities arrive through `register`
    Manual,
}

impl Default for TargetSource {
    fn default() -> Self {
        TargetSource::Tag(DEFAULT_TARGET_TAG.to_string())
    }
}

/// Configuration of a `VisibilitySystem`.
#[derive(Debug, Clone)]
pub struct VisibilityConfig {
    /// Initial population
    pub target: TargetSource,
    /// Layers eligible for registration
    pub layer_mask: LayerMask,
    /// Viewpoints. At least one usable camera is required.
    pub cameras: Vec<Camera>,
    /// Index into `cameras` used to configure the oracle
    pub active_camera: usize,
    /// Treat every entity as static (no change detection)
    pub treat_as_static: bool,
    /// Drift (units, degrees, scale units) at which bounds are recomputed
    pub change_threshold: f32,
    /// Seconds between two change-detection jobs
    pub dynamic_update_interval: f32,
    /// Slots examined per stale-handle scan
    pub cleanup_batch_size: usize,
    /// Frames between two reaper runs
    pub cleanup_interval: u32,
    /// Upper bounds of the distance bands, strictly increasing
    pub distance_bands: Vec<f32>,
    pub occlusion_enabled: bool,
    /// Frames between two occlusion refreshes
    pub occlusion_refresh_interval: u32,
    /// Entities per background job chunk
    pub job_batch_size: usize,
    /// Worker threads, 0 = let the pool decide
    pub worker_threads: usize,
    pub log_level: LogLevel,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            target: TargetSource::default(),
            layer_mask: LayerMask::all(),
            cameras: Vec::new(),
            active_camera: 0,
            treat_as_static: false,
            change_threshold: 0.1,
            dynamic_update_interval: 0.1,
            cleanup_batch_size: 64,
            cleanup_interval: 30,
            distance_bands: Vec::new(),
            occlusion_enabled: false,
            occlusion_refresh_interval: 4,
            job_batch_size: DEFAULT_BATCH_SIZE,
            worker_threads: 0,
            log_level: LogLevel::Warnings,
        }
    }
}

impl VisibilityConfig {
    /// Config with a single camera and defaults everywhere else.
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            cameras: vec![camera],
            ..Self::default()
        }
    }

    /// Correct what can be corrected, reject what cannot.
    pub fn validate(&mut self) -> Result<()> {
        sanitize_distance_bands(&mut self.distance_bands);

        let usable = self.cameras.iter().position(Camera::is_usable);
        let Some(first_usable) = usable else {
            return Err(Error::InvalidConfiguration("no usable camera".to_string()));
        };
        let active_ok = self
            .cameras
            .get(self.active_camera)
            .is_some_and(Camera::is_usable);
        if !active_ok {
            engine_warn!(
                "galaxy3d::VisibilityConfig",
                "Active camera {} is unusable, falling back to camera {}",
                self.active_camera,
                first_usable
            );
            self.active_camera = first_usable;
        }

        if !self.change_threshold.is_finite() || self.change_threshold < 0.0 {
            engine_warn!(
                "galaxy3d::VisibilityConfig",
                "Invalid change threshold {}, using 0",
                self.change_threshold
            );
            self.change_threshold = 0.0;
        }
        if !self.dynamic_update_interval.is_finite() || self.dynamic_update_interval < 0.0 {
            self.dynamic_update_interval = 0.0;
        }
        self.cleanup_batch_size = self.cleanup_batch_size.max(1);
        self.cleanup_interval = self.cleanup_interval.max(1);
        self.occlusion_refresh_interval = self.occlusion_refresh_interval.max(1);
        self.job_batch_size = self.job_batch_size.max(1);
        Ok(())
    }

    /// The camera the oracle is configured with.
    pub fn active_camera(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera)
    }
}

/// Make `bands` non-negative and strictly increasing, in place.
///
/// Negative values become 0. A value not greater than its predecessor
/// (NaN included) becomes predecessor + `MIN_BAND_SPACING`. Returns the
/// number of corrected entries.
pub fn sanitize_distance_bands(bands: &mut [f32]) -> usize {
    let mut corrected = 0;
    let mut previous: Option<f32> = None;

    for band in bands.iter_mut() {
        let original = *band;
        let mut value = if original.is_nan() {
            previous.map_or(0.0, |p| p + MIN_BAND_SPACING)
        } else {
            original.max(0.0)
        };
        if let Some(p) = previous {
            if value <= p {
                value = p + MIN_BAND_SPACING;
            }
        }
        if value.to_bits() != original.to_bits() {
            corrected += 1;
            *band = value;
        }
        previous = Some(value);
    }

    if corrected > 0 {
        engine_warn!(
            "galaxy3d::VisibilityConfig",
            "Corrected {} distance band(s) to {:?}",
            corrected,
            bands
        );
    }
    corrected
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
