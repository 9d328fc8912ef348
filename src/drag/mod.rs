//! Drag actions.
//!
//! A drag action is a factory, looked up by name, that turns the first
//! sample of a mouse drag into a stateful session. The session is fed every
//! sample of the drag, including the first and the last, and is dropped
//! after the `End` sample.
//!
//! ## Modules
//!
//! - `registry` - Named drag action factories
//! - `session` - Per-button bindings and active sessions
//! - `camera` - Camera pan, rotate and zoom
//! - `object` - Move, rotate and scale the selection

mod camera;
mod object;
mod registry;
mod session;

pub use camera::{PanCamera, RotateCamera, ZoomCamera, zoom_in_out};
pub use object::{MoveObjects, RotateObjects, ScaleObjects};
pub use registry::{DragAction, DragActionRegistry};
pub use session::{DragBindings, DragDispatcher};

use crate::events::MouseDragEvent;
use crate::scene::Scene;
use crate::types::{CameraInfo, Location, ObjectId};

/// A drag in progress.
pub trait ActiveDrag {
    fn mouse_moved(&mut self, scene: &mut Scene, ev: &MouseDragEvent);
}

/// Everything a drag action sees when its drag begins.
pub struct DragStartInfo<'a> {
    pub scene: &'a Scene,
    /// The camera the drag is performed through
    pub camera: ObjectId,
    /// Selection at drag start
    pub objects: &'a [ObjectId],
    pub event: &'a MouseDragEvent,
    pub world_scale: f64,
}

impl DragStartInfo<'_> {
    /// Camera world location at the start of the drag.
    pub fn camera_location(&self) -> Location {
        self.scene
            .global_location(self.camera, self.event.time)
            .unwrap_or_default()
    }

    pub fn camera_info(&self) -> CameraInfo {
        self.scene
            .kind(self.camera)
            .and_then(|k| k.as_camera().copied())
            .unwrap_or_default()
    }

    /// World locations of the selected objects that still exist.
    pub fn object_locations(&self) -> Vec<(ObjectId, Location)> {
        self.objects
            .iter()
            .filter_map(|id| {
                self.scene
                    .global_location(*id, self.event.time)
                    .map(|loc| (*id, loc))
            })
            .collect()
    }
}

/// A location with its motion cleared.
pub(crate) fn at_rest(loc: &Location) -> Location {
    Location::at(loc.position, loc.orientation)
}
