//! Grouping and group navigation.

use super::InteractionController;
use crate::constants::{FALLBACK_GROUP_NAME, GROUP_NAME_PREFIX};
use crate::events::EventResponse;
use crate::scene::ProxyObject;
use crate::types::{Location, MeshInfo, ObjectId, ProxyKind, SimTime};
use glam::{DQuat, DVec3};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

impl InteractionController {
    /// Put the selection under a new empty mesh at the members' mean
    /// position. Members must share the current group and the camera's
    /// proxy manager.
    pub fn group_selection(&mut self, now: SimTime) -> EventResponse {
        if self.selection.len() < 2 {
            debug!(selected = self.selection.len(), "group needs two or more entities");
            return EventResponse::NotHandled;
        }
        let group_parent = self.selection.current_group();
        let mut scene = self.scene.borrow_mut();
        let Some(manager) = scene.proxy(self.camera).map(|p| p.manager) else {
            return EventResponse::NotHandled;
        };

        let mut name = None;
        let mut positions = Vec::new();
        for id in self.selection.selected() {
            let Some(proxy) = scene.proxy(*id) else {
                continue;
            };
            if proxy.manager != manager {
                warn!(%id, "cannot group objects owned by another proxy manager");
                return EventResponse::NotHandled;
            }
            if proxy.parent() != group_parent {
                warn!(%id, parent = ?proxy.parent(), group = ?group_parent, "member outside current group");
                return EventResponse::NotHandled;
            }
            if let Some(mesh) = proxy.kind.as_mesh() {
                if !mesh.physical.name.is_empty() {
                    name = Some(mesh.physical.name.clone());
                }
            }
            if let Some(loc) = scene.global_location(*id, now) {
                positions.push(loc.position);
            }
        }
        if positions.is_empty() {
            return EventResponse::NotHandled;
        }

        let centre = positions.iter().sum::<DVec3>() / positions.len() as f64;
        let orientation = group_parent
            .and_then(|p| scene.global_location(p, now))
            .map_or(DQuat::IDENTITY, |loc| loc.orientation);
        let name = match name {
            Some(n) => format!("{GROUP_NAME_PREFIX}{n}"),
            None => FALLBACK_GROUP_NAME.to_string(),
        };

        let group = ObjectId::random_in(self.camera.space);
        let created = scene
            .create_object(ProxyObject::new(
                group,
                manager,
                ProxyKind::Mesh(MeshInfo::default().with_name(name.clone())),
            ))
            .and_then(|_| {
                scene.set_parent_with_location(group, group_parent, now, Location::at(centre, orientation))
            });
        if let Err(e) = created {
            warn!(error = %e, "group creation failed");
            return EventResponse::NotHandled;
        }

        for id in self.selection.ids() {
            if let Err(e) = scene.set_parent(id, Some(group), now) {
                warn!(%id, error = %e, "cannot move member into group");
            }
        }
        self.selection.replace(&mut scene, BTreeSet::from([group]));
        info!(%group, %name, "grouped selection");
        EventResponse::Handled
    }

    /// Dissolve every selected entity that has children: its children move
    /// to its parent and are selected, and it is destroyed. Childless
    /// entities stay selected. Returns the number of groups dissolved.
    pub fn do_ungroup(&mut self, now: SimTime) -> usize {
        let mut scene = self.scene.borrow_mut();
        if !self.selection.ids().iter().any(|id| scene.has_children(*id)) {
            return 0;
        }
        let mut next = BTreeSet::new();
        let mut dissolved = 0;

        for id in self.selection.ids() {
            let Some(parent) = scene.parent_of(id) else {
                continue;
            };
            self.selection.set_current_group(parent);
            let children = scene.children(id);
            if children.is_empty() {
                next.insert(id);
                continue;
            }
            for child in children {
                match scene.set_parent(child, parent, now) {
                    Ok(()) => {
                        next.insert(child);
                    }
                    Err(e) => warn!(%child, error = %e, "cannot lift child out of group"),
                }
            }
            next.remove(&id);
            self.selection.deselect(&mut scene, id);
            if let Err(e) = scene.destroy_object(id, now) {
                warn!(%id, error = %e, "cannot destroy dissolved group");
            }
            dissolved += 1;
        }

        next.retain(|id| scene.contains(*id));
        self.selection.replace(&mut scene, next);
        if dissolved > 0 {
            info!(dissolved, "ungrouped selection");
        }
        dissolved
    }

    /// Step into the single selected group: its children become the
    /// selection.
    pub fn enter_group(&mut self, _now: SimTime) -> EventResponse {
        if self.selection.len() != 1 {
            debug!(selected = self.selection.len(), "enter needs exactly one entity");
            return EventResponse::NotHandled;
        }
        let Some(group) = self.selection.ids().first().copied() else {
            return EventResponse::NotHandled;
        };
        let mut scene = self.scene.borrow_mut();
        let children: BTreeSet<ObjectId> = scene.children(group).into_iter().collect();
        if children.is_empty() {
            debug!(%group, "entity has no children");
            return EventResponse::NotHandled;
        }
        self.selection.set_current_group(Some(group));
        self.selection.replace(&mut scene, children);
        info!(%group, "entered group");
        EventResponse::Handled
    }

    /// Step out of the current group and select it.
    pub fn leave_group(&mut self, now: SimTime) -> EventResponse {
        let left = self.selection.current_group();
        let had_selection = !self.selection.is_empty();
        self.clear_selection(now);

        let mut scene = self.scene.borrow_mut();
        match left.and_then(|g| scene.parent_of(g).map(|parent| (g, parent))) {
            Some((group, parent)) => {
                self.selection.set_current_group(parent);
                self.selection.select(&mut scene, group);
                info!(%group, "left group");
                EventResponse::Handled
            }
            None => {
                self.selection.set_current_group(None);
                EventResponse::from_changed(had_selection || left.is_some())
            }
        }
    }
}
