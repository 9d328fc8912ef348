//! Camera drags.
//!
//! Camera drags move the topmost ancestor of the camera so anything the
//! camera is attached to travels with it. Every sample is applied relative
//! to the state captured when the drag started, using the total pointer
//! motion since the button went down.

use super::{ActiveDrag, DragStartInfo, at_rest};
use crate::constants::{
    ROTATE_CAMERA_PITCH_SENSITIVITY, ROTATE_CAMERA_YAW_SENSITIVITY, ZOOM_CAMERA_SENSITIVITY,
};
use crate::events::MouseDragEvent;
use crate::scene::Scene;
use crate::types::{Location, ObjectId, SimTime};
use glam::{DQuat, DVec3};
use tracing::{debug, trace};

/// Camera and its root at drag start.
struct CameraRig {
    root: ObjectId,
    root_start: Location,
    camera_start: Location,
}

impl CameraRig {
    fn capture(info: &DragStartInfo<'_>) -> Self {
        let root = info.scene.root_of(info.camera);
        Self {
            root,
            root_start: info
                .scene
                .global_location(root, info.event.time)
                .unwrap_or_default(),
            camera_start: info.camera_location(),
        }
    }

    fn place(&self, scene: &mut Scene, time: SimTime, loc: Location) {
        if let Err(e) = scene.set_global_location(self.root, time, at_rest(&loc)) {
            debug!(error = %e, "camera drag target vanished");
        }
    }
}

/// Slide the camera in its view plane, opposite to the pointer.
pub struct PanCamera {
    rig: CameraRig,
    world_scale: f64,
}

impl PanCamera {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        Self {
            rig: CameraRig::capture(info),
            world_scale: info.world_scale,
        }
    }
}

impl ActiveDrag for PanCamera {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (dx, dy) = ev.total_delta();
        let cam = &self.rig.camera_start;
        let offset = (cam.right() * dx as f64 + cam.up() * dy as f64) * self.world_scale;
        let mut loc = self.rig.root_start;
        loc.position -= offset;
        trace!(?offset, "pan camera");
        self.rig.place(scene, ev.time, loc);
    }
}

/// Yaw about world up and pitch about the camera's right axis.
pub struct RotateCamera {
    rig: CameraRig,
}

impl RotateCamera {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        Self {
            rig: CameraRig::capture(info),
        }
    }
}

impl ActiveDrag for RotateCamera {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (dx, dy) = ev.total_delta();
        let yaw = -(dx as f64) * ROTATE_CAMERA_YAW_SENSITIVITY;
        let pitch = dy as f64 * ROTATE_CAMERA_PITCH_SENSITIVITY;
        let turn = DQuat::from_axis_angle(DVec3::Y, yaw)
            * DQuat::from_axis_angle(self.rig.camera_start.right(), pitch);

        let mut loc = self.rig.root_start;
        loc.orientation = (turn * loc.orientation).normalize();
        self.rig.place(scene, ev.time, loc);
    }
}

/// Move along the viewing direction; dragging up moves forward.
pub struct ZoomCamera {
    rig: CameraRig,
    world_scale: f64,
}

impl ZoomCamera {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        Self {
            rig: CameraRig::capture(info),
            world_scale: info.world_scale,
        }
    }
}

impl ActiveDrag for ZoomCamera {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (_, dy) = ev.total_delta();
        let distance = dy as f64 * ZOOM_CAMERA_SENSITIVITY * self.world_scale;
        let mut loc = self.rig.root_start;
        loc.position += self.rig.camera_start.forward() * distance;
        self.rig.place(scene, ev.time, loc);
    }
}

/// Move the camera toward (positive `amount`) or away from the centre of
/// `objects`, by that fraction of the distance. With nothing to aim at the
/// camera moves along its viewing direction by `amount` world-scale units.
///
/// Returns false if the camera does not exist.
pub fn zoom_in_out(
    scene: &mut Scene,
    camera: ObjectId,
    objects: &[ObjectId],
    amount: f64,
    time: SimTime,
    world_scale: f64,
) -> bool {
    let Some(cam) = scene.global_location(camera, time) else {
        return false;
    };
    let positions: Vec<DVec3> = objects
        .iter()
        .filter_map(|id| scene.global_location(*id, time))
        .map(|loc| loc.position)
        .collect();

    let offset = if positions.is_empty() {
        cam.forward() * amount * world_scale
    } else {
        let centre = positions.iter().sum::<DVec3>() / positions.len() as f64;
        (centre - cam.position) * amount
    };

    let root = scene.root_of(camera);
    let Some(mut loc) = scene.global_location(root, time) else {
        return false;
    };
    loc.position += offset;
    scene
        .set_global_location(root, time, at_rest(&loc))
        .is_ok()
}
