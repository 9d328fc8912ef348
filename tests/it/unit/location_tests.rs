//! Unit tests for locations and object ids.

use glam::{DQuat, DVec3};
use std::f64::consts::FRAC_PI_2;
use uuid::Uuid;
use worldhost::types::{Location, ObjectId};

#[test]
fn test_extrapolate_moves_and_spins() {
    let loc = Location {
        velocity: DVec3::new(2.0, 0.0, 0.0),
        axis_of_rotation: DVec3::Y,
        angular_speed: FRAC_PI_2,
        ..Location::default()
    };
    let later = loc.extrapolate(1.0);
    assert!((later.position - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
    // a quarter turn left about up
    assert!((later.forward() - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-9);
}

#[test]
fn test_still_location_does_not_drift() {
    let loc = Location::at(DVec3::new(1.0, 2.0, 3.0), DQuat::from_rotation_x(0.3));
    assert_eq!(loc.extrapolate(10.0), loc);
}

#[test]
fn test_global_local_inverse() {
    let parent = Location::at(DVec3::new(0.0, 0.0, -10.0), DQuat::from_rotation_y(FRAC_PI_2));
    let child = Location::at(DVec3::new(1.0, 0.0, 0.0), DQuat::IDENTITY);

    let global = child.to_global(&parent);
    assert!((global.position - DVec3::new(0.0, 0.0, -11.0)).length() < 1e-9);

    let back = global.to_local(&parent);
    assert!((back.position - child.position).length() < 1e-9);
    assert!(back.orientation.abs_diff_eq(child.orientation, 1e-9));
}

#[test]
fn test_ids_share_space() {
    let space = Uuid::new_v4();
    let a = ObjectId::random_in(space);
    let b = ObjectId::random_in(space);
    assert_eq!(a.space, b.space);
    assert_ne!(a, b);
}
