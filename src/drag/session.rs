//! Per-button drag bindings and active sessions.

use super::{ActiveDrag, DragActionRegistry, DragStartInfo};
use crate::events::{DragPhase, MouseDragEvent};
use crate::profile_scope;
use crate::scene::Scene;
use crate::types::ObjectId;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Which drag action each mouse button starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragBindings {
    actions: BTreeMap<u32, &'static str>,
}

impl Default for DragBindings {
    /// Button 1 is free; 2 pans, 3 rotates and 4 zooms the camera.
    fn default() -> Self {
        let mut actions = BTreeMap::new();
        actions.insert(2, "panCamera");
        actions.insert(3, "rotateCamera");
        actions.insert(4, "zoomCamera");
        Self { actions }
    }
}

impl DragBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `button` to a named action, or unbind it with `None`.
    /// Unknown action names are rejected.
    pub fn bind(&mut self, button: u32, action: Option<&'static str>) -> bool {
        match action {
            Some(name) if !DragActionRegistry::contains(name) => {
                warn!(button, action = name, "unknown drag action");
                false
            }
            Some(name) => {
                self.actions.insert(button, name);
                true
            }
            None => {
                self.actions.remove(&button);
                true
            }
        }
    }

    pub fn action(&self, button: u32) -> Option<&'static str> {
        self.actions.get(&button).copied()
    }
}

/// Routes drag samples to at most one live session per button.
#[derive(Default)]
pub struct DragDispatcher {
    bindings: DragBindings,
    active: HashMap<u32, Box<dyn ActiveDrag>>,
}

impl DragDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &DragBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut DragBindings {
        &mut self.bindings
    }

    pub fn is_active(&self, button: u32) -> bool {
        self.active.contains_key(&button)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Feed one drag sample.
    ///
    /// A `Start` sample drops any unfinished session on the same button
    /// without ending it, then starts the bound action. Returns true if a
    /// session consumed the sample.
    pub fn dispatch(
        &mut self,
        scene: &mut Scene,
        ev: &MouseDragEvent,
        camera: ObjectId,
        selection: &[ObjectId],
        world_scale: f64,
    ) -> bool {
        profile_scope!("drag_dispatch");

        if ev.phase == DragPhase::Start {
            if self.active.remove(&ev.button).is_some() {
                debug!(button = ev.button, "discarding unfinished drag");
            }
            if let Some(name) = self.bindings.action(ev.button) {
                if let Some(action) = DragActionRegistry::get(name) {
                    let info = DragStartInfo {
                        scene,
                        camera,
                        objects: selection,
                        event: ev,
                        world_scale,
                    };
                    debug!(button = ev.button, action = name, "drag started");
                    self.active.insert(ev.button, action(&info));
                }
            }
        }

        let Some(drag) = self.active.get_mut(&ev.button) else {
            return false;
        };
        drag.mouse_moved(scene, ev);
        if ev.phase == DragPhase::End {
            self.active.remove(&ev.button);
            debug!(button = ev.button, "drag finished");
        }
        true
    }
}
