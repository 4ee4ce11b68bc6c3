/// OracleAdapter — owns the oracle and its event queue.
///
/// The oracle may emit from any thread; events accumulate in a crossbeam
/// channel and are drained once per frame on the orchestrating thread,
/// after the job barrier. Occlusion refresh is throttled to every Nth
/// refresh.

use crossbeam_channel::{self as channel, Receiver};
use crate::camera::Camera;
use crate::math::BoundingSphere;
use super::visibility_oracle::{EventSink, StateChange, VisibilityOracle};

pub struct OracleAdapter {
    oracle: Box<dyn VisibilityOracle>,
    events: Receiver<StateChange>,
    occlusion_enabled: bool,
    occlusion_interval: u32,
    refresh_count: u64,
    pushed_count: usize,
}

impl OracleAdapter {
    /// Wrap an oracle and attach a fresh event sink to it.
    pub fn new(mut oracle: Box<dyn VisibilityOracle>) -> Self {
        let (sender, receiver) = channel::unbounded();
        oracle.attach(EventSink::new(sender));
        Self {
            oracle,
            events: receiver,
            occlusion_enabled: false,
            occlusion_interval: 1,
            refresh_count: 0,
            pushed_count: 0,
        }
    }

    /// Full (re)configuration: camera, occlusion, bands and bounds.
    pub fn configure(
        &mut self,
        camera: &Camera,
        bands: &[f32],
        occlusion_enabled: bool,
        occlusion_interval: u32,
        spheres: &[BoundingSphere],
    ) {
        self.occlusion_enabled = occlusion_enabled;
        self.occlusion_interval = occlusion_interval.max(1);
        self.refresh_count = 0;
        self.oracle.configure(camera, occlusion_enabled);
        self.oracle.set_distance_bands(bands);
        self.push_bounds(spheres);
    }

    /// Switch or update the viewpoint, keeping everything else.
    pub fn set_camera(&mut self, camera: &Camera) {
        self.oracle.configure(camera, self.occlusion_enabled);
    }

    pub fn push_bounds(&mut self, spheres: &[BoundingSphere]) {
        self.oracle.push_bounds(spheres);
        self.pushed_count = spheres.len();
    }

    /// Ask the oracle to recompute. Returns true when occlusion was refreshed too.
    pub fn refresh(&mut self) -> bool {
        let refresh_occlusion = self.occlusion_enabled
            && self.refresh_count % u64::from(self.occlusion_interval) == 0;
        self.refresh_count += 1;
        self.oracle.refresh(refresh_occlusion);
        refresh_occlusion
    }

    /// Take every queued event, in arrival order.
    pub fn drain_events(&mut self) -> Vec<StateChange> {
        self.events.try_iter().collect()
    }

    /// Drop queued events and the oracle's per-index memory.
    pub fn invalidate(&mut self) {
        self.events.try_iter().for_each(drop);
        self.oracle.invalidate();
    }

    /// Length of the last pushed sphere array.
    pub fn pushed_count(&self) -> usize {
        self.pushed_count
    }
}

#[cfg(test)]
#[path = "oracle_adapter_tests.rs"]
mod tests;
