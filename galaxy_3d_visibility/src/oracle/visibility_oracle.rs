/// Visibility oracle interface.
///
/// An oracle is fed a camera, distance bands and a bounding-sphere array
/// (one sphere per registry slot, excluded spheres have a negative radius
/// and are never visible). On every `refresh` it emits a `StateChange`
/// for each index whose computed (visible, band) state differs from what
/// it computed last time. Indices never computed before always report.

use crossbeam_channel::Sender;
use crate::camera::Camera;
use crate::math::BoundingSphere;

/// One visibility transition reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateChange {
    /// Registry slot index
    pub index: usize,
    pub visible: bool,
    /// Distance from the camera to the sphere surface
    pub distance: f32,
}

/// Where an oracle sends its events. May be used from any thread.
#[derive(Clone)]
pub struct EventSink {
    sender: Sender<StateChange>,
}

impl EventSink {
    pub fn new(sender: Sender<StateChange>) -> Self {
        Self { sender }
    }

    /// Queue an event. Returns false once the receiving side is gone.
    pub fn emit(&self, change: StateChange) -> bool {
        self.sender.send(change).is_ok()
    }
}

/// Frustum / distance / occlusion test engine.
pub trait VisibilityOracle: Send {
    /// Set the viewpoint and whether occlusion culling is on.
    fn configure(&mut self, camera: &Camera, occlusion_enabled: bool);

    /// Replace the distance bands (strictly increasing, non-negative).
    fn set_distance_bands(&mut self, bands: &[f32]);

    /// Replace the sphere array. Its length is the slot count.
    fn push_bounds(&mut self, spheres: &[BoundingSphere]);

    /// Install the event destination.
    fn attach(&mut self, sink: EventSink);

    /// Recompute states and emit transitions.
    ///
    /// `refresh_occlusion` asks for the (expensive) occlusion data to be
    /// recomputed; otherwise the last occlusion result may be reused.
    fn refresh(&mut self, refresh_occlusion: bool);

    /// Forget every previously computed state so the next refresh reports
    /// all indices again (used after slots were renumbered).
    fn invalidate(&mut self);
}
