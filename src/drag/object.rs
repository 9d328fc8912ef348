//! Drags that edit the selection.

use super::{ActiveDrag, DragStartInfo, at_rest};
use crate::constants::{ROTATE_OBJECT_SENSITIVITY, SCALE_OBJECT_SENSITIVITY};
use crate::events::MouseDragEvent;
use crate::scene::Scene;
use crate::types::{Location, ObjectId};
use glam::{DQuat, DVec3};
use tracing::debug;

/// Move the selection in the camera's view plane so it tracks the pointer.
pub struct MoveObjects {
    camera: Location,
    /// Half extents of the view at unit depth
    half_view: (f64, f64),
    objects: Vec<(ObjectId, Location, f64)>,
}

impl MoveObjects {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        let camera = info.camera_location();
        let cam_info = info.camera_info();
        let half_h = (cam_info.fov_y * 0.5).tan();
        let objects = info
            .object_locations()
            .into_iter()
            .map(|(id, loc)| {
                let to_object = loc.position - camera.position;
                let depth = to_object.dot(camera.forward());
                let depth = if depth > 0.0 { depth } else { to_object.length() };
                (id, loc, depth)
            })
            .collect();
        Self {
            camera,
            half_view: (half_h * cam_info.aspect, half_h),
            objects,
        }
    }
}

impl ActiveDrag for MoveObjects {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (dx, dy) = ev.total_delta();
        for (id, start, depth) in &self.objects {
            let offset = self.camera.right() * (dx as f64 * self.half_view.0 * depth)
                + self.camera.up() * (dy as f64 * self.half_view.1 * depth);
            let mut loc = at_rest(start);
            loc.position += offset;
            if let Err(e) = scene.set_global_location(*id, ev.time, loc) {
                debug!(error = %e, "skipping vanished object");
            }
        }
    }
}

/// Spin each selected object about its own centre: horizontal motion turns
/// about world up, vertical motion tilts about the camera's right axis.
pub struct RotateObjects {
    camera_right: DVec3,
    objects: Vec<(ObjectId, Location)>,
}

impl RotateObjects {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        Self {
            camera_right: info.camera_location().right(),
            objects: info.object_locations(),
        }
    }
}

impl ActiveDrag for RotateObjects {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (dx, dy) = ev.total_delta();
        let turn = DQuat::from_axis_angle(DVec3::Y, dx as f64 * ROTATE_OBJECT_SENSITIVITY)
            * DQuat::from_axis_angle(self.camera_right, -(dy as f64) * ROTATE_OBJECT_SENSITIVITY);
        for (id, start) in &self.objects {
            let mut loc = at_rest(start);
            loc.orientation = (turn * start.orientation).normalize();
            if let Err(e) = scene.set_global_location(*id, ev.time, loc) {
                debug!(error = %e, "skipping vanished object");
            }
        }
    }
}

/// Scale selected meshes uniformly; dragging up grows them.
pub struct ScaleObjects {
    objects: Vec<(ObjectId, DVec3)>,
}

impl ScaleObjects {
    pub fn new(info: &DragStartInfo<'_>) -> Self {
        let objects = info
            .objects
            .iter()
            .filter_map(|id| {
                let mesh = info.scene.kind(*id)?.as_mesh()?;
                Some((*id, mesh.scale))
            })
            .collect();
        Self { objects }
    }
}

impl ActiveDrag for ScaleObjects {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent) {
        let (_, dy) = ev.total_delta();
        let factor = (dy as f64 * SCALE_OBJECT_SENSITIVITY).exp();
        for (id, start) in &self.objects {
            if let Some(mesh) = scene.proxy_mut(*id).and_then(|p| p.kind.as_mesh_mut()) {
                mesh.scale = *start * factor;
            }
        }
    }
}
