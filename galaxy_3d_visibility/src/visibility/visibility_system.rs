/// VisibilitySystem — frame orchestration of the visibility pipeline.
///
/// Owns the registry, the oracle adapter, the reactor, the reaper and the
/// batch scheduler. All registry mutation happens on the thread that calls
/// into the system; background jobs sample the scene and hand back
/// `BoundsUpdate`s, applied at the next barrier. The only scene state a job
/// touches is the pose-changed flag it resets while sampling.
///
/// Barriers (`complete_jobs`) run before every oracle push, before every
/// registration append and before compaction. Oracle events are drained
/// and applied before compaction, so they never race with a renumbering.
///
/// Frame usage:
///
/// ```ignore
/// system.update(dt);            // reaper, change detection scheduling
/// system.prepare_for_render();  // barrier, push bounds, refresh, react
/// ```
///
/// A system built from an unusable configuration (no usable camera, no
/// candidates) is inert: nothing is tracked or culled and every drawable
/// keeps its current state until `reinitialize` succeeds.

use std::sync::Arc;
use slotmap::Key;
use crate::camera::Camera;
use crate::config::{TargetSource, VisibilityConfig};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, RejectReason, Result};
use crate::jobs::{
    compute_bounds, detect_change, refresh_bounds, BatchScheduler, BoundsJobInput, BoundsSource,
    BoundsUpdate, JobHandle,
};
use crate::math::BoundingSphere;
use crate::oracle::{OracleAdapter, VisibilityOracle};
use crate::registry::{EntityRecord, EntityRegistry, GeometryOwner, LifecycleReaper, ReaperPass};
use crate::scene::{EntityKey, SceneWorld};
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use super::listener::VisibilityListener;
use super::reaction::{ReactionOutcome, VisibilityReactor};
use super::snapshot::{EntitySnapshot, VisibilitySnapshot};
use super::stats::VisibilityStats;

const SOURCE: &str = "galaxy3d::VisibilitySystem";

pub struct VisibilitySystem<W: SceneWorld + 'static> {
    config: VisibilityConfig,
    world: Arc<W>,
    registry: EntityRegistry,
    adapter: OracleAdapter,
    reactor: VisibilityReactor,
    reaper: LifecycleReaper,
    scheduler: Option<BatchScheduler>,
    /// The single outstanding background job
    pending_job: Option<JobHandle<BoundsUpdate>>,
    listeners: Vec<Box<dyn VisibilityListener>>,
    initialized: bool,
    dynamic_timer: f32,
    counters: VisibilityStats,
}

impl<W: SceneWorld + 'static> VisibilitySystem<W> {
    /// Build the system and run the initial discovery.
    ///
    /// Never fails: an unusable configuration is logged and leaves the
    /// system inert (see `is_initialized`).
    pub fn new(config: VisibilityConfig, world: Arc<W>, oracle: Box<dyn VisibilityOracle>) -> Self {
        let mut system = Self {
            reactor: VisibilityReactor::default(),
            reaper: LifecycleReaper::new(config.cleanup_interval, config.cleanup_batch_size),
            config: VisibilityConfig::default(),
            world,
            registry: EntityRegistry::new(),
            adapter: OracleAdapter::new(oracle),
            scheduler: None,
            pending_job: None,
            listeners: Vec::new(),
            initialized: false,
            dynamic_timer: 0.0,
            counters: VisibilityStats::default(),
        };
        system.initialize(config);
        system
    }

    fn initialize(&mut self, mut config: VisibilityConfig) {
        Diagnostics::set_log_level(config.log_level);

        if let Err(e) = config.validate() {
            engine_error!(SOURCE, "{}, visibility system stays inert", e);
            self.config = config;
            return;
        }

        let candidates = match &config.target {
            TargetSource::Tag(tag) => self.world.entities_with_tag(tag),
            TargetSource::Explicit(entities) => entities.clone(),
            TargetSource::Manual => Vec::new(),
        };
        if candidates.is_empty() && config.target != TargetSource::Manual {
            engine_warn!(SOURCE, "No candidate entities for {:?}, visibility system stays inert", config.target);
            self.config = config;
            return;
        }

        let scheduler = match BatchScheduler::new(config.worker_threads, config.job_batch_size) {
            Ok(scheduler) => scheduler,
            Err(e) => {
                engine_error!(SOURCE, "{}, visibility system stays inert", e);
                self.config = config;
                return;
            }
        };

        self.scheduler = Some(scheduler);
        self.reactor = VisibilityReactor::new(config.distance_bands.clone());
        self.reaper = LifecycleReaper::new(config.cleanup_interval, config.cleanup_batch_size);
        self.config = config;
        self.registry.resize(candidates.len());

        for entity in candidates {
            if let Err(e) = self.admit(entity, false) {
                engine_trace!(SOURCE, "Skipping {:?} during discovery: {}", entity, e);
            }
        }
        self.schedule_full_refresh();
        self.complete_jobs();

        if let Some(camera) = self.config.active_camera() {
            self.adapter.configure(
                camera,
                &self.config.distance_bands,
                self.config.occlusion_enabled,
                self.config.occlusion_refresh_interval,
                self.registry.bounds(),
            );
        }
        self.registry.take_resync();
        self.initialized = true;

        engine_info!(
            SOURCE,
            "Tracking {} entities ({} dynamic)",
            self.registry.live_count(),
            self.registry.dynamic_indices().len()
        );
    }

    /// Tear down and start over with a new configuration.
    pub fn reinitialize(&mut self, config: VisibilityConfig) {
        self.reset();
        self.initialize(config);
    }

    /// Complete outstanding work and release everything. The system is inert afterwards.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.reset();
        engine_info!(SOURCE, "Visibility system shut down");
    }

    fn reset(&mut self) {
        self.complete_jobs();
        self.adapter.invalidate();
        self.registry.clear();
        self.reaper.reset();
        self.scheduler = None;
        self.initialized = false;
        self.dynamic_timer = 0.0;
    }

    // ===== REGISTRATION =====

    /// Start tracking an entity. Its bounds are computed immediately.
    pub fn register(&mut self, entity: EntityKey) -> Result<usize> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.complete_jobs();

        match self.admit(entity, true) {
            Ok(index) => {
                engine_debug!(SOURCE, "Registered {:?} at index {}", entity, index);
                Ok(index)
            }
            Err(e) => {
                engine_warn!(SOURCE, "Cannot register {:?}: {}", entity, e);
                Err(e)
            }
        }
    }

    /// Stop tracking an entity. The slot is compacted away by the reaper.
    pub fn unregister(&mut self, entity: EntityKey) -> bool {
        if !self.initialized {
            return false;
        }
        self.registry.mark_for_removal(entity).is_some()
    }

    /// Validate and append. Nothing is mutated when this fails.
    fn admit(&mut self, entity: EntityKey, compute_now: bool) -> Result<usize> {
        if entity.is_null() {
            return Err(Error::RegistrationRejected(RejectReason::NullIdentity));
        }
        let info = self
            .world
            .entity_info(entity)
            .ok_or(Error::RegistrationRejected(RejectReason::NullIdentity))?;
        if self.registry.contains(entity) {
            return Err(Error::RegistrationRejected(RejectReason::AlreadyRegistered));
        }
        let owner = GeometryOwner::from_info(&info)
            .ok_or(Error::RegistrationRejected(RejectReason::NoGeometry))?;
        if !self.config.layer_mask.includes_layer(info.layer) {
            return Err(Error::RegistrationRejected(RejectReason::FilteredLayer));
        }
        let pose = self
            .world
            .node_state(info.node)
            .ok_or(Error::RegistrationRejected(RejectReason::NullIdentity))?
            .pose;

        let bounds = if compute_now {
            match compute_bounds(self.world.as_ref(), owner, info.node) {
                Some((sphere, source)) => {
                    report_fallback(entity, source);
                    sphere
                }
                None => BoundingSphere::point(pose.position),
            }
        } else {
            BoundingSphere::point(pose.position)
        };

        self.registry.insert(EntityRecord {
            entity,
            owner,
            node: info.node,
            pose,
            bounds,
            dynamic: !(info.is_static || self.config.treat_as_static),
        })
    }

    pub fn add_listener(&mut self, listener: Box<dyn VisibilityListener>) {
        self.listeners.push(listener);
    }

    // ===== FRAME =====

    /// Per-frame bookkeeping: reaper and change-detection scheduling.
    pub fn update(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        self.counters.frame += 1;

        if self.reaper.tick() {
            self.run_reaper();
        }

        self.dynamic_timer += dt;
        if self.dynamic_timer >= self.config.dynamic_update_interval {
            self.dynamic_timer = 0.0;
            self.schedule_detection();
        }
    }

    /// Barrier, bounds push, oracle refresh and event reaction.
    ///
    /// Call once per frame before rendering. Returns the number of applied events.
    pub fn prepare_for_render(&mut self) -> usize {
        if !self.initialized {
            return 0;
        }
        self.complete_jobs();
        if self.registry.take_resync() {
            self.adapter.push_bounds(self.registry.bounds());
        }
        self.adapter.refresh();
        self.apply_events()
    }

    fn apply_events(&mut self) -> usize {
        let mut applied = 0;
        for change in self.adapter.drain_events() {
            let outcome = self
                .reactor
                .apply(change, &mut self.registry, self.world.as_ref(), &mut self.listeners);
            match outcome {
                ReactionOutcome::Applied => {
                    applied += 1;
                    self.counters.events_applied += 1;
                }
                ReactionOutcome::Unchanged => self.counters.events_unchanged += 1,
                ReactionOutcome::Dropped => {
                    engine_trace!(SOURCE, "Dropped stale event for index {}", change.index);
                    self.counters.events_dropped += 1;
                }
            }
        }
        applied
    }

    fn run_reaper(&mut self) {
        if self.registry.has_pending_removals() {
            self.complete_jobs();
            self.apply_events();
        }

        let world = self.world.as_ref();
        let pass = self.reaper.run(&mut self.registry, |slot| {
            !world.is_node_alive(slot.node) || !slot.owner.is_alive(world)
        });

        match pass {
            ReaperPass::Compacted { removed } if removed > 0 => {
                self.counters.compactions += 1;
                self.adapter.invalidate();
                engine_debug!("galaxy3d::LifecycleReaper", "Compacted {} entities", removed);
            }
            ReaperPass::Scanned { found, .. } if found > 0 => {
                engine_debug!("galaxy3d::LifecycleReaper", "Found {} stale entities", found);
            }
            _ => {}
        }
    }

    // ===== BACKGROUND JOBS =====

    fn job_inputs(&self, indices: impl Iterator<Item = usize>) -> Vec<BoundsJobInput> {
        indices
            .filter_map(|index| self.registry.get(index).map(|slot| (index, slot)))
            .filter(|(_, slot)| !slot.marked_for_removal)
            .map(|(index, slot)| BoundsJobInput {
                index,
                node: slot.node,
                owner: slot.owner,
                last_pose: slot.last_pose,
            })
            .collect()
    }

    fn schedule_detection(&mut self) {
        self.complete_jobs();
        let inputs = self.job_inputs(self.registry.dynamic_indices().iter().copied());
        if inputs.is_empty() {
            return;
        }
        let Some(scheduler) = self.scheduler.as_ref() else {
            return;
        };
        let world = Arc::clone(&self.world);
        let threshold = self.config.change_threshold;
        let handle = scheduler.schedule(inputs, move |input| detect_change(world.as_ref(), &input, threshold));
        self.pending_job = Some(handle);
    }

    fn schedule_full_refresh(&mut self) {
        self.complete_jobs();
        let inputs = self.job_inputs(0..self.registry.len());
        if inputs.is_empty() {
            return;
        }
        let Some(scheduler) = self.scheduler.as_ref() else {
            return;
        };
        let world = Arc::clone(&self.world);
        let handle = scheduler.schedule(inputs, move |input| refresh_bounds(world.as_ref(), &input));
        self.pending_job = Some(handle);
    }

    /// Recompute every bounding sphere in the background.
    pub fn refresh_all_bounds(&mut self) {
        if self.initialized {
            self.schedule_full_refresh();
        }
    }

    /// Barrier: wait for the outstanding job and apply its results.
    fn complete_jobs(&mut self) {
        let Some(handle) = self.pending_job.take() else {
            return;
        };

        for update in handle.complete() {
            let Some(slot) = self.registry.get(update.index) else {
                continue;
            };
            if slot.marked_for_removal || slot.node != update.node {
                continue;
            }
            self.registry.set_last_pose(update.index, update.pose);
            if let Some((sphere, source)) = update.bounds {
                report_fallback(slot.entity, source);
                self.registry.set_bounds(update.index, sphere);
                self.registry.request_resync();
                self.counters.bounds_recomputed += 1;
            }
        }
    }

    // ===== CAMERAS =====

    /// Make `cameras[index]` the viewpoint of the oracle.
    pub fn set_active_camera(&mut self, index: usize) -> Result<()> {
        let usable = self.config.cameras.get(index).is_some_and(Camera::is_usable);
        if !usable {
            return Err(Error::InvalidCamera(index));
        }
        self.config.active_camera = index;
        if self.initialized {
            if let Some(camera) = self.config.cameras.get(index) {
                self.adapter.set_camera(camera);
            }
        }
        Ok(())
    }

    /// Replace a camera (e.g. after it moved).
    pub fn update_camera(&mut self, index: usize, camera: Camera) -> Result<()> {
        if !camera.is_usable() {
            return Err(Error::InvalidConfiguration("camera is not usable".to_string()));
        }
        let Some(slot) = self.config.cameras.get_mut(index) else {
            return Err(Error::InvalidCamera(index));
        };
        *slot = camera;
        if self.initialized && index == self.config.active_camera {
            self.adapter.set_camera(&self.config.cameras[index]);
        }
        Ok(())
    }

    // ===== QUERIES =====

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn world(&self) -> &Arc<W> {
        &self.world
    }

    pub fn index_of(&self, entity: EntityKey) -> Option<usize> {
        self.registry.index_of(entity)
    }

    /// Whether `entity` is tracked and currently reported visible.
    pub fn is_visible(&self, entity: EntityKey) -> bool {
        self.registry
            .index_of(entity)
            .and_then(|index| self.registry.get(index))
            .is_some_and(|slot| slot.is_visible())
    }

    pub fn stats(&self) -> VisibilityStats {
        VisibilityStats {
            registered: self.registry.len(),
            live: self.registry.live_count(),
            visible: self.registry.visible_count(),
            dynamic: self.registry.dynamic_indices().len(),
            pending_removal: self.registry.pending_removals().len(),
            oracle_slots: self.adapter.pushed_count(),
            ..self.counters
        }
    }

    /// Capture the current state of every live entity.
    pub fn snapshot(&self) -> VisibilitySnapshot {
        let camera = if self.initialized { self.config.active_camera() } else { None };
        VisibilitySnapshot {
            timestamp: chrono::Local::now(),
            frame: self.counters.frame,
            camera_position: camera.map(Camera::position),
            camera_forward: camera.map(Camera::forward),
            entities: self
                .registry
                .live_slots()
                .map(|(index, slot)| EntitySnapshot {
                    entity: slot.entity,
                    index,
                    position: slot.last_pose.position,
                    visible: slot.is_visible(),
                    distance: slot.distance,
                    lod_level: slot.lod_level,
                    dynamic: slot.dynamic,
                })
                .collect(),
        }
    }
}

impl<W: SceneWorld + 'static> Drop for VisibilitySystem<W> {
    fn drop(&mut self) {
        self.complete_jobs();
    }
}

fn report_fallback(entity: EntityKey, source: BoundsSource) {
    if source == BoundsSource::Fallback {
        engine_warn!(SOURCE, "No geometry bounds for {:?}, using its position", entity);
    }
}

#[cfg(test)]
#[path = "visibility_system_tests.rs"]
mod tests;
