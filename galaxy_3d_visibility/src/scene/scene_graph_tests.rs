/// Tests for SceneGraph
///
/// These tests validate entity creation, geometry attachment, pose changes
/// and the stale handles left behind by destruction.

use glam::Vec3;
use super::*;

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn spawn(scene: &SceneGraph, position: Vec3) -> EntityKey {
    scene
        .create_entity(EntityDesc {
            pose: Pose::from_position(position),
            ..Default::default()
        })
        .unwrap()
}

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_create_entity() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::new(1.0, 2.0, 3.0));

    assert_eq!(scene.entity_count(), 1);
    let info = scene.entity_info(entity).unwrap();
    assert!(info.drawable.is_none());
    assert!(info.lod_group.is_none());
    assert_eq!(scene.pose(entity).unwrap().position, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_add_drawable_starts_enabled() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let drawable = scene.add_drawable(entity, unit_box()).unwrap();

    assert_eq!(scene.entity_info(entity).unwrap().drawable, Some(drawable));
    assert_eq!(scene.is_drawable_enabled(drawable), Some(true));
}

#[test]
fn test_drawable_bounds_stay_in_node_space() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::new(10.0, 0.0, 0.0));
    let drawable = scene.add_drawable(entity, unit_box()).unwrap();

    let bounds = scene.drawable_local_bounds(drawable).unwrap();
    assert_eq!(bounds.center(), unit_box().center());

    scene.destroy_entity(entity);
    assert!(scene.drawable_local_bounds(drawable).is_none());
}

#[test]
fn test_add_lod_group() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let group = scene
        .add_lod_group(entity, &[vec![unit_box(), unit_box()], vec![unit_box()], vec![]])
        .unwrap();

    assert_eq!(scene.lod_level_count(group), Some(3));
    assert_eq!(scene.lod_level_drawables(group, 0).len(), 2);
    assert_eq!(scene.lod_level_drawables(group, 1).len(), 1);
    assert!(scene.lod_level_drawables(group, 2).is_empty());
    assert!(scene.lod_level_drawables(group, 7).is_empty());
}

#[test]
fn test_entities_with_tag() {
    let scene = SceneGraph::new();
    let tagged = scene
        .create_entity(EntityDesc { tag: Some("Cullable".to_string()), ..Default::default() })
        .unwrap();
    spawn(&scene, Vec3::ZERO);

    assert_eq!(scene.entities_with_tag("Cullable"), vec![tagged]);
    assert!(scene.entities_with_tag("Missing").is_empty());
}

// ============================================================================
// Tests: Pose changes
// ============================================================================

#[test]
fn test_set_pose_flags_node() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let node = scene.entity_info(entity).unwrap().node;

    assert!(!scene.node_state(node).unwrap().pose_changed);
    assert!(scene.set_pose(entity, Pose::from_position(Vec3::X)));
    assert!(scene.node_state(node).unwrap().pose_changed);

    let taken = scene.take_node_state(node).unwrap();
    assert!(taken.pose_changed);
    assert_eq!(taken.pose.position, Vec3::X);
    assert!(!scene.node_state(node).unwrap().pose_changed);
}

#[test]
fn test_write_after_take_sets_flag_again() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let node = scene.entity_info(entity).unwrap().node;

    scene.set_pose(entity, Pose::from_position(Vec3::X));
    scene.take_node_state(node);
    scene.set_pose(entity, Pose::from_position(Vec3::Y));

    let state = scene.node_state(node).unwrap();
    assert!(state.pose_changed);
    assert_eq!(state.pose.position, Vec3::Y);

    scene.destroy_node(entity);
    assert!(scene.take_node_state(node).is_none());
}

// ============================================================================
// Tests: Render sink
// ============================================================================

#[test]
fn test_set_drawable_enabled_is_idempotent() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let drawable = scene.add_drawable(entity, unit_box()).unwrap();

    scene.set_drawable_enabled(drawable, false);
    scene.set_drawable_enabled(drawable, false);
    assert_eq!(scene.is_drawable_enabled(drawable), Some(false));
}

// ============================================================================
// Tests: Destruction
// ============================================================================

#[test]
fn test_destroy_entity_invalidates_handles() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let drawable = scene.add_drawable(entity, unit_box()).unwrap();
    let node = scene.entity_info(entity).unwrap().node;

    assert!(scene.destroy_entity(entity));
    assert!(scene.entity_info(entity).is_none());
    assert!(!scene.is_node_alive(node));
    assert!(!scene.is_drawable_alive(drawable));
    assert!(!scene.destroy_entity(entity));
    assert_eq!(scene.entity_count(), 0);
}

#[test]
fn test_destroy_entity_removes_lod_drawables() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let group = scene.add_lod_group(entity, &[vec![unit_box()], vec![unit_box()]]).unwrap();
    let level0 = scene.lod_level_drawables(group, 0)[0];

    scene.destroy_entity(entity);

    assert!(!scene.is_lod_group_alive(group));
    assert!(!scene.is_drawable_alive(level0));
}

#[test]
fn test_destroy_node_leaves_dangling_entity() {
    let scene = SceneGraph::new();
    let entity = spawn(&scene, Vec3::ZERO);
    let node = scene.entity_info(entity).unwrap().node;

    assert!(scene.destroy_node(entity));
    assert!(scene.entity_info(entity).is_some());
    assert!(!scene.is_node_alive(node));
    assert!(!scene.set_pose(entity, Pose::IDENTITY));
}
