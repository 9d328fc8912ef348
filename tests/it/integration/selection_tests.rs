//! Click selection, hit cycling and the group context.

use crate::helpers::{TestSceneBuilder, screen_point};
use worldhost::device::{MouseDevice, scancode};

fn side_by_side() -> crate::helpers::TestWorld {
    TestSceneBuilder::new()
        .mesh("a", (-3.0, 0.0, -10.0))
        .mesh("b", (3.0, 0.0, -10.0))
        .build()
}

fn stacked() -> crate::helpers::TestWorld {
    TestSceneBuilder::new()
        .mesh("a", (0.0, 0.0, -10.0))
        .mesh("b", (0.0, 0.0, -20.0))
        .build()
}

#[test]
fn test_click_replaces_selection() {
    let mut world = side_by_side();

    world.click_at(&[], (-3.0, 0.0, -10.0));
    assert_eq!(world.selected_names(), vec!["a"]);
    assert!(world.client.scene().is_selected(world.id("a")));

    world.click_at(&[], (3.0, 0.0, -10.0));
    assert_eq!(world.selected_names(), vec!["b"]);
    assert!(!world.client.scene().is_selected(world.id("a")));

    // nothing under the cursor
    world.click(&[], MouseDevice::LEFT, 0.0, 0.9);
    assert!(world.selected().is_empty());
}

#[test]
fn test_repeated_clicks_cycle_through_overlapping_hits() {
    let mut world = stacked();

    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["a"]);
    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["b"]);
    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["a"]);

    // button 3 walks back towards the camera
    world.click(&[], MouseDevice::RIGHT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["b"]);
}

#[test]
fn test_shift_click_toggles_then_cycles() {
    let mut world = stacked();

    world.click(&[scancode::LSHIFT], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["a"]);

    world.click(&[scancode::LSHIFT], MouseDevice::LEFT, 0.0, 0.0);
    assert!(world.selected().is_empty());

    world.click(&[scancode::LSHIFT], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["b"]);
}

#[test]
fn test_shift_click_adds_to_selection() {
    let mut world = side_by_side();

    world.click_at(&[], (-3.0, 0.0, -10.0));
    world.click_at(&[scancode::LSHIFT], (3.0, 0.0, -10.0));
    assert_eq!(world.selected_names(), vec!["a", "b"]);

    // shift-clicking a selected entity drops it
    world.click_at(&[scancode::LSHIFT], (-3.0, 0.0, -10.0));
    assert_eq!(world.selected_names(), vec!["b"]);
}

#[test]
fn test_ctrl_click_clears_selection() {
    let mut world = side_by_side();
    world.click_at(&[], (-3.0, 0.0, -10.0));
    world.click_at(&[scancode::LSHIFT], (3.0, 0.0, -10.0));

    world.click(&[scancode::LCTRL], MouseDevice::LEFT, 0.5, 0.5);
    assert!(world.selected().is_empty());
    assert!(!world.client.scene().is_selected(world.id("a")));
}

#[test]
fn test_click_on_child_selects_its_group() {
    let mut world = TestSceneBuilder::new()
        .group("cart", (0.0, 0.0, -10.0))
        .child_mesh("wheel", "cart", (0.0, 0.0, 0.0))
        .build();

    world.click(&[], MouseDevice::LEFT, 0.0, 0.0);
    assert_eq!(world.selected_names(), vec!["cart"]);
    assert!(world.selection_is_consistent());
}

#[test]
fn test_external_select_respects_current_group() {
    let mut world = TestSceneBuilder::new()
        .group("cart", (0.0, 0.0, -10.0))
        .child_mesh("wheel", "cart", (0.0, 0.0, 0.0))
        .mesh("box", (5.0, 0.0, -10.0))
        .build();
    let now = world.now();
    let (wheel, cart, boxed) = (world.id("wheel"), world.id("cart"), world.id("box"));

    {
        let mut controller = world.client.controller_mut();
        // wrong group, not added
        assert!(!controller.select_entity(wheel, false, now));
        assert!(controller.select_entity(boxed, false, now));
        // replace moves into the wheel's group
        assert!(controller.select_entity(wheel, true, now));
        assert_eq!(controller.current_group(), Some(cart));
        assert_eq!(controller.selected_ids(), vec![wheel]);
    }
    assert!(world.selection_is_consistent());
}

#[test]
fn test_hover_reports_hit_count() {
    let world = stacked();
    let (x, y) = screen_point((0.0, 0.0, -10.0));
    let pick = world.client.controller().hover(world.now(), x, y, 1);
    assert_eq!(pick.hit_count, 2);
    assert_eq!(pick.entity, Some(world.id("b")));
}
