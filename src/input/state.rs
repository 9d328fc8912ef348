//! Selection and group context.
//!
//! The editing state is the pair `(current_group, selection)`. Every member
//! of the selection is a direct child of the current group (`None` being
//! the world root); operations that change the group rebuild the selection
//! from that group's children.

use crate::constants::PICK_TOLERANCE;
use crate::scene::Scene;
use crate::types::ObjectId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current_group: Option<ObjectId>,
    selected: BTreeSet<ObjectId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_group(&self) -> Option<ObjectId> {
        self.current_group
    }

    pub fn set_current_group(&mut self, group: Option<ObjectId>) {
        self.current_group = group;
    }

    pub fn selected(&self) -> &BTreeSet<ObjectId> {
        &self.selected
    }

    /// Snapshot in deterministic order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.selected.iter().copied().collect()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Add to the selection and flag the entity. Returns false if it was
    /// already selected.
    pub fn select(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        scene.set_selected(id, true);
        self.selected.insert(id)
    }

    /// Remove from the selection. The entity is left visible in case the
    /// selection flash had hidden it.
    pub fn deselect(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        scene.set_selected(id, false);
        scene.set_visible(id, true);
        self.selected.remove(&id)
    }

    /// Deselect everything; entities that vanished are skipped.
    pub fn clear(&mut self, scene: &mut Scene) {
        for id in std::mem::take(&mut self.selected) {
            scene.set_selected(id, false);
            scene.set_visible(id, true);
        }
    }

    /// Swap in a new selection. Flags of entities leaving the selection
    /// are cleared, those joining it are set.
    pub fn replace(&mut self, scene: &mut Scene, ids: BTreeSet<ObjectId>) {
        for id in self.selected.difference(&ids) {
            scene.set_selected(*id, false);
            scene.set_visible(*id, true);
        }
        for id in &ids {
            scene.set_selected(*id, true);
        }
        self.selected = ids;
    }

    /// Drop members that no longer exist or left the current group. A
    /// vanished current group falls back to the world root.
    pub fn prune(&mut self, scene: &mut Scene) -> usize {
        if self.current_group.is_some_and(|g| !scene.contains(g)) {
            self.current_group = None;
        }
        let group = self.current_group;
        let stale: Vec<ObjectId> = self
            .selected
            .iter()
            .copied()
            .filter(|id| scene.parent_of(*id) != Some(group))
            .collect();
        for id in &stale {
            self.deselect(scene, *id);
        }
        stale.len()
    }

    /// Whether every member is a direct child of the current group.
    pub fn is_consistent(&self, scene: &Scene) -> bool {
        self.selected
            .iter()
            .all(|id| scene.parent_of(*id) == Some(self.current_group))
    }
}

/// Bookkeeping for cycling through overlapping hits with repeated clicks.
#[derive(Debug, Clone, Default)]
pub struct PickCycle {
    /// Index into the hits under the cursor
    pub which: i32,
    pub last_hit_count: usize,
    pub last_shift_selected: Option<ObjectId>,
    last_x: f32,
    last_y: f32,
}

impl PickCycle {
    /// True if `(x, y)` is within the pick tolerance of the last remembered
    /// click. A click outside it becomes the new reference point.
    pub fn recent_in_range(&mut self, x: f32, y: f32) -> bool {
        let far = (x - self.last_x).abs() > PICK_TOLERANCE || (y - self.last_y).abs() > PICK_TOLERANCE;
        if far {
            self.last_x = x;
            self.last_y = y;
        }
        !far
    }
}
