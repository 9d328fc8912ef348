//! Clone, delete and light placement from the keyboard.

use crate::helpers::{TestSceneBuilder, TestWorld};
use glam::{DQuat, DVec3};
use worldhost::constants::light;
use worldhost::device::{MouseDevice, scancode};
use worldhost::scene::Scene;
use worldhost::types::{Location, ObjectId, ProxyKind, SimTime};

fn cart_selected() -> TestWorld {
    let mut world = TestSceneBuilder::new()
        .group("cart", (0.0, 0.0, -10.0))
        .child_mesh("front", "cart", (0.0, 0.0, 1.0))
        .child_mesh("back", "cart", (0.0, 0.0, -1.0))
        .build();
    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["cart"]);
    world
}

#[test]
fn test_clone_copies_whole_group_beside_original() {
    let mut world = cart_selected();
    let before = world.client.scene().len();

    world.key(&[], scancode::D);
    assert_eq!(world.client.scene().len(), before + 3);

    let copies: Vec<_> = world.selected().into_iter().collect();
    assert_eq!(copies.len(), 1);
    let copy = copies[0];
    assert_ne!(copy, world.id("cart"));

    let scene = world.client.scene();
    let loc = scene.global_location(copy, world.now()).unwrap();
    assert!((loc.position - DVec3::new(10.0, 0.0, -10.0)).length() < 1e-9);
    let children = scene.children(copy);
    assert_eq!(children.len(), 2);
    for child in children {
        let pos = scene.global_location(child, world.now()).unwrap().position;
        assert!((pos.x - 10.0).abs() < 1e-9);
    }
    assert_eq!(scene.parent_of(copy), Some(None));
}

fn mesh_name(scene: &Scene, id: ObjectId) -> String {
    match scene.kind(id) {
        Some(ProxyKind::Mesh(mesh)) => mesh.physical.name.clone(),
        other => panic!("expected a mesh, got {other:?}"),
    }
}

/// Location of `id` in the frame of `parent`, both taken from world space.
fn relative(scene: &Scene, id: ObjectId, parent: ObjectId, now: SimTime) -> Location {
    let parent_global = scene.global_location(parent, now).unwrap();
    scene.global_location(id, now).unwrap().to_local(&parent_global)
}

#[test]
fn test_clone_keeps_descendant_orientation() {
    let mut world = cart_selected();
    let now = world.now();
    let (cart, front) = (world.id("cart"), world.id("front"));
    {
        let mut scene = world.client.scene_mut();
        let turned = Location::at(DVec3::new(0.0, 0.0, -10.0), DQuat::from_rotation_z(0.4));
        scene.reset_position_velocity(cart, now, turned).unwrap();
        let tilt = DQuat::from_rotation_y(0.7) * DQuat::from_rotation_x(-0.3);
        scene
            .reset_position_velocity(front, now, Location::at(DVec3::new(0.0, 0.0, 1.0), tilt))
            .unwrap();
    }

    world.key(&[], scancode::D);
    let copy = *world.selected().iter().next().expect("clone selected");

    let scene = world.client.scene();
    let copies = scene.children(copy);
    assert_eq!(copies.len(), 2);
    for copied in copies {
        let name = mesh_name(&scene, copied);
        let original = world.id(&name);
        let want = relative(&scene, original, cart, now);
        let got = relative(&scene, copied, copy, now);
        assert!((want.position - got.position).length() < 1e-9, "{name} moved");
        let same = want.orientation.abs_diff_eq(got.orientation, 1e-9)
            || want.orientation.abs_diff_eq(-got.orientation, 1e-9);
        assert!(same, "{name}: {:?} vs {:?}", want.orientation, got.orientation);
    }
}

#[test]
fn test_ctrl_v_clones_too() {
    let mut world = cart_selected();
    let before = world.client.scene().len();
    world.key(&[scancode::LCTRL], scancode::V);
    assert_eq!(world.client.scene().len(), before + 3);
}

#[test]
fn test_clone_with_nothing_selected() {
    let mut world = TestSceneBuilder::new().mesh("a", (0.0, 0.0, -10.0)).build();
    let before = world.client.scene().len();
    world.key(&[], scancode::D);
    assert_eq!(world.client.scene().len(), before);
}

#[test]
fn test_delete_removes_group_and_members() {
    let mut world = cart_selected();
    world.key(&[], scancode::DELETE);

    let scene = world.client.scene();
    assert_eq!(scene.len(), 1);
    assert!(scene.contains(world.client.camera()));
    drop(scene);
    assert!(world.selected().is_empty());
}

#[test]
fn test_keypad_period_deletes() {
    let mut world = TestSceneBuilder::new()
        .mesh("a", (0.0, 0.0, -10.0))
        .mesh("b", (4.0, 0.0, -10.0))
        .build();
    world.click_at(&[], (0.0, 0.0, -10.0));
    world.key(&[], scancode::KP_PERIOD);

    assert!(!world.client.scene().contains(world.id("a")));
    assert!(world.client.scene().contains(world.id("b")));
}

#[test]
fn test_b_places_selected_light_ahead_of_camera() {
    let mut world = TestSceneBuilder::new().mesh("a", (0.0, 0.0, -10.0)).build();
    world.click_at(&[], (0.0, 0.0, -10.0));
    let before = world.client.scene().len();

    world.key(&[], scancode::B);
    assert_eq!(world.client.scene().len(), before + 1);

    let selected: Vec<_> = world.selected().into_iter().collect();
    assert_eq!(selected.len(), 1);
    let scene = world.client.scene();
    assert!(matches!(scene.kind(selected[0]), Some(ProxyKind::Light(_))));
    let loc = scene.global_location(selected[0], world.now()).unwrap();
    assert!((loc.position - DVec3::new(0.0, 0.0, -20.0)).length() < 1e-9);
    assert!(loc.orientation.abs_diff_eq(light::ORIENTATION, 1e-6));
}

#[test]
fn test_light_goes_into_current_group() {
    let mut world = cart_selected();
    let cart = world.id("cart");
    world.key(&[], scancode::RETURN);

    world.key(&[], scancode::B);
    let selected: Vec<_> = world.selected().into_iter().collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(world.client.scene().parent_of(selected[0]), Some(Some(cart)));
    assert!(world.selection_is_consistent());
}
