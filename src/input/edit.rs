//! Editing operations: clone, delete, light placement and scene files.

use super::InteractionController;
use crate::constants::{CLONE_OFFSET_FACTOR, light};
use crate::events::EventResponse;
use crate::export;
use crate::notifications::Notice;
use crate::scene::{ProxyObject, Scene, SceneError, SceneResult};
use crate::types::{LightInfo, Location, MeshInfo, ObjectId, ProxyKind, SimTime};
use glam::DVec3;
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// Copy `id` and all of its descendants. The copy gets `parent` and the
/// original's parent-relative location; descendants keep theirs relative
/// to the copied parent. Cameras are copied as empty meshes.
///
/// If any copy cannot be created, the copies made so far are destroyed
/// and the scene is left as it was.
pub fn clone_tree(
    scene: &mut Scene,
    id: ObjectId,
    parent: Option<ObjectId>,
    time: SimTime,
) -> SceneResult<ObjectId> {
    let mut created = Vec::new();
    match copy_subtree(scene, id, parent, time, &mut created) {
        Ok(copy) => Ok(copy),
        Err(e) => {
            // children were created after their parents
            for copy in created.into_iter().rev() {
                if let Err(undo) = scene.destroy_object(copy, time) {
                    warn!(%copy, error = %undo, "cannot roll back partial clone");
                }
            }
            Err(e)
        }
    }
}

fn copy_subtree(
    scene: &mut Scene,
    id: ObjectId,
    parent: Option<ObjectId>,
    time: SimTime,
    created: &mut Vec<ObjectId>,
) -> SceneResult<ObjectId> {
    let proxy = scene.proxy(id).ok_or(SceneError::NotFound(id))?;
    let manager = proxy.manager;
    let kind = match &proxy.kind {
        ProxyKind::Mesh(mesh) => ProxyKind::Mesh(mesh.clone()),
        ProxyKind::Light(light) => ProxyKind::Light(light.clone()),
        ProxyKind::Camera(_) => ProxyKind::Mesh(MeshInfo::default()),
    };
    let local = proxy.extrapolate_location(time);

    let copy = ObjectId::random_in(id.space);
    scene.create_object(
        ProxyObject::new(copy, manager, kind)
            .with_parent(parent)
            .with_location(local, time),
    )?;
    created.push(copy);
    for child in scene.children(id) {
        copy_subtree(scene, child, Some(copy), time, created)?;
    }
    Ok(copy)
}

impl InteractionController {
    /// Clone every selected entity next to the original and select the
    /// clones instead.
    pub fn clone_selection(&mut self, now: SimTime) -> EventResponse {
        if self.selection.is_empty() {
            debug!("clone with empty selection");
            return EventResponse::NotHandled;
        }
        let offset = DVec3::X * self.world_scale * CLONE_OFFSET_FACTOR;
        let mut scene = self.scene.borrow_mut();
        let mut clones = BTreeSet::new();

        for id in self.selection.ids() {
            let Some(parent) = scene.parent_of(id) else {
                continue;
            };
            let Some(mut loc) = scene.extrapolate_location(id, now) else {
                continue;
            };
            match clone_tree(&mut scene, id, parent, now) {
                Ok(copy) => {
                    loc.position += offset;
                    if let Err(e) = scene.reset_position_velocity(copy, now, loc) {
                        warn!(%copy, error = %e, "cannot place clone");
                    }
                    clones.insert(copy);
                }
                Err(e) => warn!(%id, error = %e, "clone failed"),
            }
        }

        info!(count = clones.len(), "cloned selection");
        let changed = !clones.is_empty();
        if changed {
            self.selection.replace(&mut scene, clones);
        }
        EventResponse::from_changed(changed)
    }

    /// Flatten every selected group, then destroy what is selected.
    pub fn delete_selection(&mut self, now: SimTime) -> EventResponse {
        if self.selection.is_empty() {
            debug!("delete with empty selection");
            return EventResponse::NotHandled;
        }
        while self.do_ungroup(now) > 0 {}

        let mut scene = self.scene.borrow_mut();
        let mut destroyed = 0;
        for id in self.selection.ids() {
            match scene.destroy_object(id, now) {
                Ok(_) => destroyed += 1,
                Err(e) => debug!(%id, error = %e, "skipping delete"),
            }
        }
        self.selection.clear(&mut scene);
        info!(destroyed, "deleted selection");
        EventResponse::Handled
    }

    /// Place a light one world-scale unit in front of the camera, inside
    /// the current group, and select only it.
    pub fn create_light(&mut self, now: SimTime) -> EventResponse {
        let (manager, global, group) = {
            let scene = self.scene.borrow();
            let Some(cam) = scene.global_location(self.camera, now) else {
                warn!(camera = %self.camera, "camera missing, cannot place light");
                return EventResponse::NotHandled;
            };
            let Some(manager) = scene.proxy(self.camera).map(|p| p.manager) else {
                return EventResponse::NotHandled;
            };
            let group = self.selection.current_group().filter(|g| scene.contains(*g));
            if let Some(g) = group {
                if scene.proxy(g).map(|p| p.manager) != Some(manager) {
                    warn!(group = %g, "current group belongs to another proxy manager");
                    return EventResponse::NotHandled;
                }
            }
            let position = cam.position + cam.forward() * self.world_scale;
            (manager, Location::at(position, light::ORIENTATION), group)
        };

        self.clear_selection(now);
        let mut scene = self.scene.borrow_mut();
        let id = ObjectId::random_in(self.camera.space);
        let created = scene
            .create_object(
                ProxyObject::new(id, manager, ProxyKind::Light(LightInfo::placed_default()))
                    .with_location(global, now),
            )
            .and_then(|_| match group {
                Some(g) => scene.set_parent(id, Some(g), now),
                None => Ok(()),
            });
        if let Err(e) = created {
            warn!(error = %e, "light creation failed");
            return EventResponse::Handled;
        }
        self.selection.select(&mut scene, id);
        info!(%id, "light created");
        EventResponse::Handled
    }

    /// Write the scene to the export path. The outcome is posted as a
    /// notice.
    pub fn save_scene(&mut self, now: SimTime) -> EventResponse {
        let result = {
            let scene = self.scene.borrow();
            export::save_scene(&scene, &self.export_path, now)
        };
        match result {
            Ok(rows) => {
                info!(rows, path = %self.export_path.display(), "scene saved");
                self.notices.push(Notice::success(format!(
                    "Saved {} objects to {}",
                    rows,
                    self.export_path.display()
                )));
            }
            Err(e) => {
                error!(error = %e, path = %self.export_path.display(), "scene save failed");
                self.notices
                    .push(Notice::error(format!("Failed to save scene: {e}")));
            }
        }
        EventResponse::Handled
    }

    /// Read the import path and add its objects at the world root, owned by
    /// the camera's proxy manager.
    pub fn import_scene(&mut self, now: SimTime) -> EventResponse {
        let records = match export::load_scene_file(&self.import_path) {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, path = %self.import_path.display(), "scene import failed");
                self.notices
                    .push(Notice::error(format!("Failed to import scene: {e}")));
                return EventResponse::Handled;
            }
        };

        let mut scene = self.scene.borrow_mut();
        let Some(manager) = scene.proxy(self.camera).map(|p| p.manager) else {
            return EventResponse::NotHandled;
        };
        match export::import_records(&mut scene, records, manager, self.camera.space, now) {
            Ok(ids) => {
                self.notices
                    .push(Notice::success(format!("Imported {} objects", ids.len())));
            }
            Err(e) => {
                error!(error = %e, "scene import aborted");
                self.notices
                    .push(Notice::error(format!("Failed to import scene: {e}")));
            }
        }
        EventResponse::Handled
    }

    pub fn toggle_physics(&mut self) -> EventResponse {
        self.physics_enabled = !self.physics_enabled;
        info!(enabled = self.physics_enabled, "physics toggled");
        EventResponse::Handled
    }
}
