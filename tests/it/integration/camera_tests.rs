//! Keyboard camera motion, speed presets, the wheel and mode keys.

use crate::helpers::{TestSceneBuilder, TestWorld};
use glam::DVec3;
use worldhost::constants::DEFAULT_CAMERA_SPEED;
use worldhost::device::scancode;
use worldhost::settings::ClientSettings;
use worldhost::types::{Location, SimTime};

fn camera_at(world: &TestWorld, time: SimTime) -> Location {
    world
        .client
        .scene()
        .global_location(world.client.camera(), time)
        .expect("camera")
}

#[test]
fn test_shift_w_glides_while_held() {
    let mut world = TestSceneBuilder::new().build();
    let kb = world.keyboard;

    world.client.input_mut().key(kb, scancode::LSHIFT, true);
    world.client.input_mut().key(kb, scancode::W, true);
    let moving = camera_at(&world, 1.0);
    assert!((moving.position - DVec3::new(0.0, 0.0, -20.0)).length() < 1e-9);

    // the release matches the SHIFT binding even if SHIFT is let go first
    world.client.input_mut().set_time(0.5);
    world.client.input_mut().key(kb, scancode::LSHIFT, false);
    world.client.input_mut().key(kb, scancode::W, false);
    let stopped = camera_at(&world, 1.0);
    assert!((stopped.position.z + 10.0).abs() < 1e-9);
    assert_eq!(stopped.velocity, DVec3::ZERO);
}

#[test]
fn test_speed_presets() {
    let mut world = TestSceneBuilder::new().build();
    assert_eq!(world.client.controller().camera_speed(), 1.0);

    world.key(&[], scancode::NUM_3);
    assert_eq!(world.client.controller().camera_speed(), 5.0);
    world.key(&[], scancode::NUM_1);
    assert_eq!(world.client.controller().camera_speed(), 0.25);

    // strafing with D scales with the preset
    let kb = world.keyboard;
    world.client.input_mut().key(kb, scancode::LSHIFT, true);
    world.client.input_mut().key(kb, scancode::D, true);
    let loc = camera_at(&world, 0.0);
    assert!((loc.velocity - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn test_starting_speed_follows_presets() {
    let world = TestSceneBuilder::new().build();
    assert_eq!(world.client.controller().camera_speed(), DEFAULT_CAMERA_SPEED);

    let settings = ClientSettings {
        camera_speed_presets: [0.5, 2.0, 8.0],
        ..Default::default()
    };
    let world = TestSceneBuilder::new().with_settings(settings).build();
    assert_eq!(world.client.controller().camera_speed(), 2.0);
}

#[test]
fn test_page_up_rises() {
    let mut world = TestSceneBuilder::new().build();
    let kb = world.keyboard;
    world.client.input_mut().key(kb, scancode::PAGEUP, true);
    let loc = camera_at(&world, 0.0);
    assert!((loc.velocity - DVec3::new(0.0, 5.0, 0.0)).length() < 1e-9);

    world.client.input_mut().key(kb, scancode::PAGEUP, false);
    assert_eq!(camera_at(&world, 0.0).velocity, DVec3::ZERO);
}

#[test]
fn test_shift_left_turns_in_place() {
    let mut world = TestSceneBuilder::new().build();
    let kb = world.keyboard;
    world.client.input_mut().key(kb, scancode::LSHIFT, true);
    world.client.input_mut().key(kb, scancode::LEFT, true);

    let loc = camera_at(&world, 1.0);
    assert_eq!(loc.position, DVec3::ZERO);
    assert!(loc.forward().x < -0.8);
}

#[test]
fn test_plain_arrows_walk_and_strafe() {
    let mut world = TestSceneBuilder::new().build();
    let kb = world.keyboard;

    world.client.input_mut().key(kb, scancode::UP, true);
    let loc = camera_at(&world, 0.0);
    assert!((loc.velocity - DVec3::new(0.0, 0.0, -20.0)).length() < 1e-9);
    world.client.input_mut().key(kb, scancode::UP, false);

    world.client.input_mut().key(kb, scancode::LEFT, true);
    let loc = camera_at(&world, 0.0);
    assert!((loc.velocity - DVec3::new(-5.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn test_wheel_zooms_along_view_without_selection() {
    let mut world = TestSceneBuilder::new().build();
    let mouse = world.mouse;
    world.client.input_mut().mouse_wheel(mouse, 0.0, 1.0);

    let loc = camera_at(&world, 0.0);
    assert!((loc.position - DVec3::new(0.0, 0.0, -4.0)).length() < 1e-9);

    // horizontal wheel is ignored
    world.client.input_mut().mouse_wheel(mouse, 1.0, 0.0);
    assert!((camera_at(&world, 0.0).position.z + 4.0).abs() < 1e-9);
}

#[test]
fn test_wheel_zooms_toward_selection() {
    let mut world = TestSceneBuilder::new().mesh("a", (0.0, 0.0, -10.0)).build();
    world.click_at(&[], (0.0, 0.0, -10.0));
    let mouse = world.mouse;
    world.client.input_mut().mouse_wheel(mouse, 0.0, 1.0);

    let loc = camera_at(&world, 0.0);
    assert!((loc.position - DVec3::new(0.0, 0.0, -2.0)).length() < 1e-9);
}

#[test]
fn test_mode_keys_rebind_button_one() {
    let mut world = TestSceneBuilder::new().mesh("a", (0.0, 0.0, -10.0)).build();
    world.click_at(&[], (0.0, 0.0, -10.0));

    world.key(&[], scancode::W);
    assert_eq!(
        world.client.controller().drags().bindings().action(1),
        Some("moveObject")
    );
    assert_eq!(world.selected_names(), vec!["a"]);

    world.key(&[], scancode::Y);
    assert_eq!(
        world.client.controller().drags().bindings().action(1),
        Some("panCamera")
    );

    world.key(&[], scancode::Q);
    assert_eq!(world.client.controller().drags().bindings().action(1), None);
    assert!(world.selected().is_empty());
}

#[test]
fn test_p_toggles_physics() {
    let mut world = TestSceneBuilder::new().build();
    assert!(world.client.controller().is_physics_enabled());
    world.key(&[], scancode::P);
    assert!(!world.client.controller().is_physics_enabled());
    world.key(&[], scancode::P);
    assert!(world.client.controller().is_physics_enabled());
}
