//! Named drag action factories.

use super::{
    ActiveDrag, DragStartInfo, MoveObjects, PanCamera, RotateCamera, RotateObjects, ScaleObjects,
    ZoomCamera,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds a drag session from the first sample of a drag.
pub type DragAction = fn(&DragStartInfo<'_>) -> Box<dyn ActiveDrag>;

fn move_object(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(MoveObjects::new(info))
}

fn rotate_object(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(RotateObjects::new(info))
}

fn scale_object(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(ScaleObjects::new(info))
}

fn pan_camera(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(PanCamera::new(info))
}

fn rotate_camera(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(RotateCamera::new(info))
}

fn zoom_camera(info: &DragStartInfo<'_>) -> Box<dyn ActiveDrag> {
    Box::new(ZoomCamera::new(info))
}

static ACTIONS: Lazy<RwLock<BTreeMap<&'static str, DragAction>>> = Lazy::new(|| {
    let builtin: [(&'static str, DragAction); 6] = [
        ("moveObject", move_object),
        ("rotateObject", rotate_object),
        ("scaleObject", scale_object),
        ("panCamera", pan_camera),
        ("rotateCamera", rotate_camera),
        ("zoomCamera", zoom_camera),
    ];
    RwLock::new(builtin.into_iter().collect())
});

/// Process-wide table of drag actions, pre-populated with the camera and
/// object drags.
pub struct DragActionRegistry;

impl DragActionRegistry {
    pub fn get(name: &str) -> Option<DragAction> {
        ACTIONS.read().get(name).copied()
    }

    /// Add or replace an action.
    pub fn register(name: &'static str, action: DragAction) {
        debug!(name, "registering drag action");
        ACTIONS.write().insert(name, action);
    }

    pub fn contains(name: &str) -> bool {
        ACTIONS.read().contains_key(name)
    }

    pub fn names() -> Vec<&'static str> {
        ACTIONS.read().keys().copied().collect()
    }
}
