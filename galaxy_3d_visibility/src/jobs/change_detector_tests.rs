/// Tests for detect_change
///
/// Threshold gating: strictly below on every axis leaves the bounds alone,
/// at or above on any axis recomputes them.

use glam::{Quat, Vec3};
use crate::math::AABB;
use crate::scene::{EntityDesc, SceneGraph};
use super::*;

const THRESHOLD: f32 = 0.5;

struct Fixture {
    scene: SceneGraph,
    entity: crate::scene::EntityKey,
    input: BoundsJobInput,
}

fn fixture() -> Fixture {
    let scene = SceneGraph::new();
    let entity = scene.create_entity(EntityDesc::default()).unwrap();
    let drawable = scene
        .add_drawable(entity, AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
        .unwrap();
    let node = scene.entity_info(entity).unwrap().node;
    Fixture {
        scene,
        entity,
        input: BoundsJobInput {
            index: 0,
            node,
            owner: GeometryOwner::Drawable(drawable),
            last_pose: Pose::IDENTITY,
        },
    }
}

// ============================================================================
// Tests: Skips
// ============================================================================

#[test]
fn test_unchanged_node_is_skipped() {
    let f = fixture();
    assert!(detect_change(&f.scene, &f.input, THRESHOLD).is_none());
}

#[test]
fn test_dead_node_is_skipped() {
    let f = fixture();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::X * 10.0));
    f.scene.destroy_node(f.entity);
    assert!(detect_change(&f.scene, &f.input, THRESHOLD).is_none());
}

// ============================================================================
// Tests: Threshold gating
// ============================================================================

#[test]
fn test_small_move_resamples_without_recompute() {
    let f = fixture();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::new(0.25, 0.0, 0.0)));

    let update = detect_change(&f.scene, &f.input, THRESHOLD).unwrap();

    assert!(update.bounds.is_none());
    assert_eq!(update.pose.position, Vec3::new(0.25, 0.0, 0.0));
}

#[test]
fn test_move_at_threshold_recomputes() {
    let f = fixture();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::new(THRESHOLD, 0.0, 0.0)));

    let update = detect_change(&f.scene, &f.input, THRESHOLD).unwrap();

    let (sphere, source) = update.bounds.unwrap();
    assert_eq!(source, BoundsSource::Drawable);
    assert_eq!(sphere.center, Vec3::new(THRESHOLD, 0.0, 0.0));
}

#[test]
fn test_rotation_alone_recomputes() {
    let f = fixture();
    // 10 degrees, position and scale untouched
    let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_y(10f32.to_radians()), Vec3::ONE);
    f.scene.set_pose(f.entity, pose);

    let update = detect_change(&f.scene, &f.input, THRESHOLD).unwrap();
    assert!(update.bounds.is_some());
}

#[test]
fn test_scale_alone_recomputes() {
    let f = fixture();
    let pose = Pose::new(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(2.0));
    f.scene.set_pose(f.entity, pose);

    let update = detect_change(&f.scene, &f.input, THRESHOLD).unwrap();
    let (sphere, _) = update.bounds.unwrap();
    assert!((sphere.radius - 2.0 * 3.0_f32.sqrt()).abs() < 1e-4);
}

// ============================================================================
// Tests: Change flag
// ============================================================================

#[test]
fn test_sampling_resets_change_flag() {
    let f = fixture();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::new(0.25, 0.0, 0.0)));

    assert!(detect_change(&f.scene, &f.input, THRESHOLD).is_some());
    assert!(!f.scene.node_state(f.input.node).unwrap().pose_changed);
    assert!(detect_change(&f.scene, &f.input, THRESHOLD).is_none());
}

#[test]
fn test_move_after_sample_is_detected_next_run() {
    let f = fixture();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::new(0.0, 5.0, 0.0)));
    let first = detect_change(&f.scene, &f.input, THRESHOLD).unwrap();
    f.scene.set_pose(f.entity, Pose::from_position(Vec3::new(0.0, 50.0, 0.0)));

    let input = BoundsJobInput { last_pose: first.pose, ..f.input };
    let second = detect_change(&f.scene, &input, THRESHOLD).unwrap();

    assert_eq!(second.pose.position, Vec3::new(0.0, 50.0, 0.0));
    assert_eq!(second.bounds.unwrap().0.center, Vec3::new(0.0, 50.0, 0.0));
}
