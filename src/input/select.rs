//! Picking and selection.
//!
//! Clicks cast a ray from the camera through the cursor. Overlapping hits
//! are cycled by clicking the same spot again: button 1 walks away from the
//! camera, button 3 towards it.

use super::InteractionController;
use super::coords::pixel_to_direction;
use crate::constants::{HILITE_HIDDEN_MS, HILITE_PERIOD_MS};
use crate::device::Modifiers;
use crate::events::{EventResponse, MouseClickEvent};
use crate::profile_scope;
use crate::scene::Scene;
use crate::types::{ObjectId, SimTime};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of a pick: the entity to act on and the raw hit count under the
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pick {
    pub entity: Option<ObjectId>,
    pub hit_count: usize,
}

/// Cast a ray from `camera` through `(x, y)` and take the `which`-th hit,
/// lifted to the ancestor that is a direct child of `group`.
pub fn hover_entity(
    scene: &Scene,
    camera: ObjectId,
    group: Option<ObjectId>,
    time: SimTime,
    x: f32,
    y: f32,
    which: i32,
) -> Pick {
    profile_scope!("hover_entity");

    let Some(cam) = scene.global_location(camera, time) else {
        return Pick::default();
    };
    let info = scene
        .kind(camera)
        .and_then(|k| k.as_camera().copied())
        .unwrap_or_default();
    let dir = pixel_to_direction(&cam, &info, x, y);
    let trace = scene.ray_trace(cam.position, dir, time, which);
    let entity = trace.hit.and_then(|hit| lift_to_group(scene, hit.id, group));
    debug!(x, y, which, hits = trace.hit_count, ?entity, "hover");
    Pick {
        entity,
        hit_count: trace.hit_count,
    }
}

/// Walk up from `id` until the parent is `group`. `None` if the walk
/// leaves the scene first.
fn lift_to_group(scene: &Scene, mut id: ObjectId, group: Option<ObjectId>) -> Option<ObjectId> {
    loop {
        let parent = scene.parent_of(id)?;
        if parent == group {
            return Some(id);
        }
        id = parent?;
    }
}

impl InteractionController {
    /// Pick through the controller's camera within the current group.
    pub fn hover(&self, time: SimTime, x: f32, y: f32, which: i32) -> Pick {
        let scene = self.scene.borrow();
        hover_entity(&scene, self.camera, self.selection.current_group(), time, x, y, which)
    }

    /// Mouse click on a picking button. SHIFT toggles one entity, CTRL
    /// clears, a plain click replaces the selection.
    pub fn select_click(&mut self, ev: &MouseClickEvent, direction: i32) -> EventResponse {
        profile_scope!("select_click");

        if ev.modifiers.contains(Modifiers::SHIFT) {
            self.shift_select(ev, direction)
        } else if ev.modifiers.contains(Modifiers::CTRL) {
            let had_selection = !self.selection.is_empty();
            self.clear_selection(ev.time);
            self.picking.last_shift_selected = None;
            info!("cleared selection");
            EventResponse::from_changed(had_selection)
        } else {
            self.replace_select(ev, direction)
        }
    }

    fn shift_select(&mut self, ev: &MouseClickEvent, direction: i32) -> EventResponse {
        let group = self.selection.current_group();
        let mut scene = self.scene.borrow_mut();

        let in_range = self.picking.recent_in_range(ev.x, ev.y);
        let first_pick = hover_entity(&scene, self.camera, group, ev.time, ev.x, ev.y, self.picking.which);
        if !in_range || first_pick.hit_count != self.picking.last_hit_count {
            self.picking.which = 0;
        }
        self.picking.last_hit_count = first_pick.hit_count;

        let pick = hover_entity(&scene, self.camera, group, ev.time, ev.x, ev.y, self.picking.which);
        let Some(hit) = pick.entity else {
            return EventResponse::NotHandled;
        };

        if self.picking.last_shift_selected == Some(hit) && self.selection.contains(hit) {
            self.selection.deselect(&mut scene, hit);
            self.picking.which += direction;
            self.picking.last_shift_selected = None;
            info!(%hit, "deselected, cycling to next hit");
        } else if self.selection.contains(hit) {
            self.selection.deselect(&mut scene, hit);
            info!(%hit, "deselected");
        } else {
            self.selection.select(&mut scene, hit);
            self.picking.last_shift_selected = Some(hit);
            info!(%hit, "added to selection");
        }
        EventResponse::Handled
    }

    fn replace_select(&mut self, ev: &MouseClickEvent, direction: i32) -> EventResponse {
        let had_selection = !self.selection.is_empty();
        self.clear_selection(ev.time);

        let group = self.selection.current_group();
        let mut scene = self.scene.borrow_mut();
        self.picking.which += direction;
        let mut pick = hover_entity(&scene, self.camera, group, ev.time, ev.x, ev.y, self.picking.which);
        let in_range = self.picking.recent_in_range(ev.x, ev.y);
        if !in_range || pick.hit_count != self.picking.last_hit_count {
            self.picking.which = 0;
            pick = hover_entity(&scene, self.camera, group, ev.time, ev.x, ev.y, 0);
            self.picking.last_hit_count = pick.hit_count;
        }
        self.picking.last_shift_selected = None;

        match pick.entity {
            Some(hit) => {
                self.selection.select(&mut scene, hit);
                info!(%hit, "replaced selection");
                EventResponse::Handled
            }
            None => EventResponse::from_changed(had_selection),
        }
    }

    /// Select an entity chosen outside the pointer path. With `replace` the
    /// current group moves to the entity's parent and the old selection is
    /// dropped; otherwise the entity is only added if it lives in the
    /// current group.
    pub fn select_entity(&mut self, id: ObjectId, replace: bool, now: SimTime) -> bool {
        let Some(parent) = self.scene.borrow().parent_of(id) else {
            debug!(%id, "select of unknown entity");
            return false;
        };
        if replace {
            self.clear_selection(now);
            self.selection.set_current_group(parent);
        }
        if self.selection.current_group() != parent {
            debug!(%id, "entity outside current group");
            return false;
        }
        let mut scene = self.scene.borrow_mut();
        self.selection.select(&mut scene, id)
    }

    /// Replace the selection wholesale. Ids outside the current group are
    /// dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        let group = self.selection.current_group();
        let mut scene = self.scene.borrow_mut();
        let ids: BTreeSet<ObjectId> = ids
            .into_iter()
            .filter(|id| scene.parent_of(*id) == Some(group))
            .collect();
        self.selection.replace(&mut scene, ids);
    }

    /// Stop the flash and deselect everything.
    pub fn clear_selection(&mut self, now: SimTime) {
        self.hilite_selection(now, true);
        let mut scene = self.scene.borrow_mut();
        self.selection.clear(&mut scene);
    }

    /// Flash the selection: members are hidden for part of every period.
    /// `force` shows them regardless.
    pub fn hilite_selection(&mut self, now: SimTime, force: bool) {
        let elapsed_ms = ((now - self.start_time) * 1000.0).max(0.0) as u64;
        let show = force || elapsed_ms % HILITE_PERIOD_MS > HILITE_HIDDEN_MS;
        let mut scene = self.scene.borrow_mut();
        for id in self.selection.selected() {
            scene.set_visible(*id, show);
        }
    }

    /// Drop selection members that vanished or moved out of the current
    /// group, e.g. after remote updates.
    pub fn prune_selection(&mut self) -> usize {
        let mut scene = self.scene.borrow_mut();
        let pruned = self.selection.prune(&mut scene);
        if pruned > 0 {
            debug!(pruned, "pruned stale selection entries");
        }
        pruned
    }
}
