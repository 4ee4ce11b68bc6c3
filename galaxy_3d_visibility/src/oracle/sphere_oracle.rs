/// SphereOracle — CPU reference oracle.
///
/// Tests each bounding sphere against the camera frustum, measures the
/// distance from the camera position to the sphere surface and, when
/// occlusion is enabled, hides spheres that sit entirely in the shadow
/// cone of an occluder sphere.
///
/// Occlusion results are cached and only recomputed when `refresh` is
/// asked to. Frustum and distance are recomputed on every refresh.
///
/// Reports the raw frustum/occlusion verdict; clamping to the distance
/// bands is left to the consumer. The band index is still part of the
/// tracked state, so crossing a band boundary emits an event.

use glam::Vec3;
use crate::camera::Camera;
use crate::math::BoundingSphere;
use crate::visibility::band_index;
use super::visibility_oracle::{EventSink, StateChange, VisibilityOracle};

/// Last computed (visible, band) of a slot.
type SlotState = (bool, Option<usize>);

#[derive(Default)]
pub struct SphereOracle {
    camera: Option<Camera>,
    occlusion_enabled: bool,
    bands: Vec<f32>,
    spheres: Vec<BoundingSphere>,
    occluders: Vec<BoundingSphere>,
    /// Per-slot occlusion verdict from the last occlusion refresh
    occluded: Vec<bool>,
    last_states: Vec<Option<SlotState>>,
    sink: Option<EventSink>,
}

impl SphereOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere that hides what lies behind it. Takes effect on the next occlusion refresh.
    pub fn add_occluder(&mut self, occluder: BoundingSphere) {
        self.occluders.push(occluder);
    }

    pub fn clear_occluders(&mut self) {
        self.occluders.clear();
    }

    pub fn slot_count(&self) -> usize {
        self.spheres.len()
    }

    fn refresh_occlusion(&mut self, eye: Vec3) {
        let occluders = &self.occluders;
        self.occluded = self
            .spheres
            .iter()
            .map(|sphere| {
                !sphere.is_excluded() && occluders.iter().any(|occluder| occludes(occluder, sphere, eye))
            })
            .collect();
    }
}

impl VisibilityOracle for SphereOracle {
    fn configure(&mut self, camera: &Camera, occlusion_enabled: bool) {
        self.camera = Some(camera.clone());
        self.occlusion_enabled = occlusion_enabled;
        if !occlusion_enabled {
            self.occluded.iter_mut().for_each(|o| *o = false);
        }
    }

    fn set_distance_bands(&mut self, bands: &[f32]) {
        self.bands = bands.to_vec();
    }

    fn push_bounds(&mut self, spheres: &[BoundingSphere]) {
        self.spheres.clear();
        self.spheres.extend_from_slice(spheres);
        self.last_states.resize(spheres.len(), None);
        self.occluded.resize(spheres.len(), false);
    }

    fn attach(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    fn refresh(&mut self, refresh_occlusion: bool) {
        let Some(camera) = self.camera.as_ref() else {
            return;
        };
        let eye = camera.position();
        let frustum = *camera.frustum();

        if self.occlusion_enabled && refresh_occlusion {
            self.refresh_occlusion(eye);
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        for (index, sphere) in self.spheres.iter().enumerate() {
            let (visible, distance) = if sphere.is_excluded() {
                (false, f32::INFINITY)
            } else {
                let in_frustum = frustum.intersects_sphere(sphere.center, sphere.radius);
                let occluded = self.occlusion_enabled && self.occluded[index];
                (in_frustum && !occluded, sphere.distance_to(eye))
            };

            let state = (visible, band_index(distance, &self.bands));
            if self.last_states[index] != Some(state) {
                self.last_states[index] = Some(state);
                sink.emit(StateChange { index, visible, distance });
            }
        }
    }

    fn invalidate(&mut self) {
        self.last_states.iter_mut().for_each(|s| *s = None);
    }
}

/// Whether `sphere` lies entirely inside the shadow cone that `occluder` casts from `eye`.
fn occludes(occluder: &BoundingSphere, sphere: &BoundingSphere, eye: Vec3) -> bool {
    let to_occluder = occluder.center - eye;
    let to_sphere = sphere.center - eye;
    let occluder_distance = to_occluder.length();
    let sphere_distance = to_sphere.length();

    // Eye inside either sphere
    if occluder_distance <= occluder.radius || sphere_distance <= sphere.radius {
        return false;
    }
    // Nearest point of the sphere must be behind the occluder center
    if sphere_distance - sphere.radius < occluder_distance {
        return false;
    }

    let occluder_half_angle = (occluder.radius / occluder_distance).asin();
    let sphere_half_angle = (sphere.radius / sphere_distance).asin();
    let separation = to_occluder.angle_between(to_sphere);
    separation + sphere_half_angle <= occluder_half_angle
}

#[cfg(test)]
#[path = "sphere_oracle_tests.rs"]
mod tests;
