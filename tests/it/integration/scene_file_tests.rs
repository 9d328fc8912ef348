//! Saving and importing scene files from the keyboard.

use crate::helpers::TestSceneBuilder;
use glam::{DQuat, DVec3};
use std::collections::HashSet;
use worldhost::device::scancode;
use worldhost::export::{COLUMN_COUNT, scene_to_string};
use worldhost::types::Location;
use worldhost::notifications::NoticeLevel;
use worldhost::settings::ClientSettings;

#[test]
fn test_save_then_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.csv");
    let settings = ClientSettings {
        scene_export_path: path.clone(),
        scene_import_path: path.clone(),
        ..Default::default()
    };
    let mut world = TestSceneBuilder::new()
        .with_settings(settings)
        .group("cart", (0.0, 0.0, -10.0))
        .child_mesh("wheel", "cart", (1.0, 0.0, 0.0))
        .light("lamp", (0.0, 5.0, 0.0))
        .build();

    world.key(&[scancode::LCTRL], scancode::S);
    assert!(path.exists());
    {
        let controller = world.client.controller();
        let notice = controller.notices().latest().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(notice.message.contains("Saved 4 objects"));
    }

    let before: HashSet<_> = world.client.scene().ids().collect();
    world.key(&[scancode::LCTRL], scancode::O);
    let scene = world.client.scene();
    let imported: Vec<_> = scene.ids().filter(|id| !before.contains(id)).collect();
    // the camera row is skipped
    assert_eq!(imported.len(), 3);

    let wheel = imported
        .iter()
        .copied()
        .find(|id| matches!(scene.parent_of(*id), Some(Some(_))))
        .expect("imported wheel has a parent");
    let parent = scene.parent_of(wheel).unwrap().unwrap();
    assert!(imported.contains(&parent));
    let pos = scene.global_location(wheel, 0.0).unwrap().position;
    assert!((pos - DVec3::new(1.0, 0.0, -10.0)).length() < 1e-6);
    drop(scene);

    // import leaves the selection alone
    assert!(world.selected().is_empty());
    let controller = world.client.controller();
    let notice = controller.notices().latest().unwrap();
    assert_eq!(notice.message, "Imported 3 objects");
}

#[test]
fn test_save_into_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("scene.csv");
    let settings = ClientSettings {
        scene_export_path: path.clone(),
        ..Default::default()
    };
    let mut world = TestSceneBuilder::new()
        .with_settings(settings)
        .mesh("a", (0.0, 0.0, -10.0))
        .build();

    world.key(&[scancode::LCTRL], scancode::S);
    assert!(!path.exists());
    let controller = world.client.controller();
    let notice = controller.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Failed to save scene"));
}

#[test]
fn test_import_of_missing_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ClientSettings {
        scene_import_path: dir.path().join("nope.csv"),
        ..Default::default()
    };
    let mut world = TestSceneBuilder::new().with_settings(settings).build();
    let before = world.client.scene().len();

    world.key(&[scancode::LCTRL], scancode::O);
    assert_eq!(world.client.scene().len(), before);
    let controller = world.client.controller();
    assert_eq!(controller.notices().latest().unwrap().level, NoticeLevel::Error);
}

fn field(row: &csv::StringRecord, column: usize) -> f64 {
    row[column]
        .parse()
        .unwrap_or_else(|e| panic!("column {column} = {:?}: {e}", &row[column]))
}

#[test]
fn test_export_rows_for_static_meshes() {
    let world = TestSceneBuilder::new()
        .mesh("flat", (-2.0, 0.0, -10.0))
        .mesh("steep", (2.0, 0.0, -10.0))
        .build();
    let now = world.now();
    let steep = DQuat::from_rotation_x(89.5f64.to_radians());
    {
        let mut scene = world.client.scene_mut();
        let turned = Location::at(DVec3::new(-2.0, 0.0, -10.0), DQuat::from_rotation_y(90f64.to_radians()));
        scene.reset_position_velocity(world.id("flat"), now, turned).unwrap();
        let tilted = Location::at(DVec3::new(2.0, 0.0, -10.0), steep);
        scene.reset_position_velocity(world.id("steep"), now, tilted).unwrap();
    }

    let text = scene_to_string(&world.client.scene(), now).unwrap();
    let rows: Vec<csv::StringRecord> = csv::Reader::from_reader(text.as_bytes())
        .records()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == COLUMN_COUNT));
    assert_eq!(&rows[0][0], "camera");

    let flat = &rows[1];
    assert_eq!((&flat[0], &flat[1], &flat[2], &flat[3]), ("mesh", "graphiconly", "flat", ""));
    assert_eq!([field(flat, 4), field(flat, 5), field(flat, 6)], [-2.0, 0.0, -10.0]);
    // Euler degrees: pitch, yaw, roll, and no w
    assert!(field(flat, 7).abs() < 1e-6);
    assert!((field(flat, 8) - 90.0).abs() < 1e-6);
    assert!(field(flat, 9).abs() < 1e-6);
    assert_eq!(&flat[10], "");
    assert_eq!([field(flat, 11), field(flat, 12), field(flat, 13)], [1.0, 1.0, 1.0]);
    assert_eq!(&flat[22], "meerkat:///flat.mesh");
    assert!(flat.iter().skip(23).all(str::is_empty));

    // past the pitch limit the raw quaternion is written
    let tilted = &rows[2];
    assert_eq!(&tilted[2], "steep");
    let written = [field(tilted, 7), field(tilted, 8), field(tilted, 9), field(tilted, 10)];
    let expected = [steep.x, steep.y, steep.z, steep.w];
    for (got, want) in written.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "{written:?} vs {expected:?}");
    }
    assert!((written[0] - 0.704015).abs() < 1e-6);
    assert_eq!(&tilted[22], "meerkat:///steep.mesh");
}
