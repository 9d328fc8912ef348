//! Group, ungroup, enter and leave through the keyboard.

use crate::helpers::{TestSceneBuilder, TestWorld};
use glam::{DQuat, DVec3};
use worldhost::device::{MouseDevice, scancode};
use worldhost::scene::ProxyObject;
use worldhost::types::{Location, MeshInfo, ObjectId, ProxyKind, ProxyManagerId};

fn two_boxes_selected() -> TestWorld {
    let mut world = TestSceneBuilder::new()
        .mesh("a", (-3.0, 0.0, -10.0))
        .mesh("b", (3.0, 2.0, -10.0))
        .build();
    world.click_at(&[], (-3.0, 0.0, -10.0));
    world.click_at(&[scancode::LSHIFT], (3.0, 2.0, -10.0));
    assert_eq!(world.selected_names(), vec!["a", "b"]);
    world
}

fn cart() -> TestWorld {
    TestSceneBuilder::new()
        .group("cart", (0.0, 0.0, -10.0))
        .child_mesh("front", "cart", (0.0, 0.0, 1.0))
        .child_mesh("back", "cart", (0.0, 0.0, -1.0))
        .build()
}

#[test]
fn test_group_then_ungroup_round_trip() {
    let mut world = two_boxes_selected();
    let before_a = world.global_position("a");
    let before_b = world.global_position("b");

    world.key(&[], scancode::G);
    let selected: Vec<_> = world.selected().into_iter().collect();
    assert_eq!(selected.len(), 1);
    let group = selected[0];
    assert_eq!(world.parent_of("a"), Some(group));
    assert_eq!(world.parent_of("b"), Some(group));

    {
        let scene = world.client.scene();
        let loc = scene.global_location(group, world.now()).unwrap();
        assert!((loc.position - DVec3::new(0.0, 1.0, -10.0)).length() < 1e-9);
        let ProxyKind::Mesh(mesh) = scene.kind(group).unwrap() else {
            panic!("group is not a mesh");
        };
        assert!(mesh.physical.name.starts_with("grp-"));
        assert!(mesh.mesh.is_empty());
    }
    assert!((world.global_position("a") - before_a).length() < 1e-9);
    assert!((world.global_position("b") - before_b).length() < 1e-9);

    world.key(&[scancode::LALT], scancode::G);
    assert_eq!(world.selected_names(), vec!["a", "b"]);
    assert!(!world.client.scene().contains(group));
    assert_eq!(world.parent_of("a"), None);
    assert!((world.global_position("b") - before_b).length() < 1e-9);
    assert!(world.selection_is_consistent());
}

#[test]
fn test_group_needs_two_entities() {
    let mut world = TestSceneBuilder::new().mesh("a", (0.0, 0.0, -10.0)).build();
    world.click_at(&[], (0.0, 0.0, -10.0));
    let count = world.client.scene().len();

    world.key(&[], scancode::G);
    assert_eq!(world.client.scene().len(), count);
    assert_eq!(world.selected_names(), vec!["a"]);
}

#[test]
fn test_ungroup_is_idempotent_on_leaves() {
    let mut world = two_boxes_selected();
    let now = world.now();
    let before = world.selected();

    assert_eq!(world.client.controller_mut().do_ungroup(now), 0);
    assert_eq!(world.client.controller_mut().do_ungroup(now), 0);
    assert_eq!(world.selected(), before);
}

#[test]
fn test_ungroup_without_groups_leaves_selection_alone() {
    let mut world = two_boxes_selected();
    let now = world.now();
    let b = world.id("b");
    world.client.scene_mut().destroy_object(b, now).unwrap();

    // nothing to dissolve, so the stale member is left for the tick to prune
    assert_eq!(world.client.controller_mut().do_ungroup(now), 0);
    assert!(world.selected().contains(&b));

    world.client.graphics_tick(now + 0.01);
    assert_eq!(world.selected_names(), vec!["a"]);
}

#[test]
fn test_ungroup_flattens_one_level() {
    let mut world = TestSceneBuilder::new()
        .group("outer", (0.0, 0.0, -10.0))
        .child_group("inner", "outer", (0.0, 0.0, 0.0))
        .child_mesh("leaf", "inner", (0.0, 0.0, 0.0))
        .build();
    let inner = world.id("inner");

    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["outer"]);

    world.key(&[scancode::LALT], scancode::G);
    assert_eq!(world.selected_names(), vec!["inner"]);
    assert!(!world.client.scene().contains(world.id("outer")));
    assert_eq!(world.parent_of("inner"), None);
    assert_eq!(world.parent_of("leaf"), Some(inner));
    assert!((world.global_position("leaf") - DVec3::new(0.0, 0.0, -10.0)).length() < 1e-9);
}

#[test]
fn test_enter_and_leave_group() {
    let mut world = cart();
    let cart = world.id("cart");
    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["cart"]);

    world.key(&[], scancode::RETURN);
    assert_eq!(world.selected_names(), vec!["back", "front"]);
    assert_eq!(world.client.controller().current_group(), Some(cart));
    assert!(world.selection_is_consistent());

    // same spot again: the cycle moves on to the farther child
    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["back"]);

    world.key(&[], scancode::ESCAPE);
    assert_eq!(world.selected_names(), vec!["cart"]);
    assert_eq!(world.client.controller().current_group(), None);
    assert!(world.selection_is_consistent());
}

#[test]
fn test_enter_needs_a_single_group() {
    let mut world = two_boxes_selected();
    world.key(&[], scancode::KP_ENTER);
    assert_eq!(world.selected_names(), vec!["a", "b"]);
    assert_eq!(world.client.controller().current_group(), None);
}

#[test]
fn test_group_refuses_objects_from_another_manager() {
    let mut world = TestSceneBuilder::new().mesh("a", (-3.0, 0.0, -10.0)).build();
    let remote_manager = ProxyManagerId(7);
    let remote = ObjectId::random_in(world.client.camera().space);
    {
        let mut scene = world.client.scene_mut();
        scene.add_proxy_manager(remote_manager);
        scene
            .create_object(
                ProxyObject::new(
                    remote,
                    remote_manager,
                    ProxyKind::Mesh(MeshInfo::new("meerkat:///remote.mesh")),
                )
                .with_location(Location::at(DVec3::new(3.0, 0.0, -10.0), DQuat::IDENTITY), 0.0),
            )
            .unwrap();
    }
    let now = world.now();
    {
        let mut controller = world.client.controller_mut();
        assert!(controller.select_entity(world.id("a"), true, now));
        assert!(controller.select_entity(remote, false, now));
    }
    let count = world.client.scene().len();

    world.key(&[], scancode::G);

    assert_eq!(world.client.scene().len(), count);
    assert_eq!(world.parent_of("a"), None);
    assert_eq!(world.client.scene().parent_of(remote), Some(None));
    let selected = world.selected();
    assert_eq!(selected.len(), 2);
    assert!(selected.contains(&remote));
}
