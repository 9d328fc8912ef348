//! Authoritative mapping from object identity to live scene entities.

use super::{Entity, ProxyObject, SceneError, SceneResult};
use crate::profile_scope;
use crate::spatial_index::{SpatialEntry, SpatialIndex, ray_box};
use crate::types::{Location, ObjectId, ProxyKind, ProxyManagerId, SimTime};
use glam::DVec3;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Nearest-first ray pick result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: ObjectId,
    pub distance: f64,
    /// World-space normal of the face the ray entered through
    pub normal: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayTrace {
    /// The `which`-th hit, wrapping around the hit list
    pub hit: Option<RayHit>,
    /// Total number of objects under the ray
    pub hit_count: usize,
}

/// The scene entity registry.
///
/// Entities are keyed by `ObjectId` in a `BTreeMap` so iteration order is
/// deterministic. Child lookup is a filter over the whole registry.
#[derive(Debug, Default)]
pub struct Scene {
    entities: BTreeMap<ObjectId, Entity>,
    managers: BTreeSet<ProxyManagerId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Proxy Managers & Object Lifecycle
    // ========================================================================

    pub fn add_proxy_manager(&mut self, manager: ProxyManagerId) {
        self.managers.insert(manager);
    }

    pub fn has_proxy_manager(&self, manager: ProxyManagerId) -> bool {
        self.managers.contains(&manager)
    }

    /// Insert a new proxy. Its parent, if any, must already exist and belong
    /// to the same proxy manager.
    pub fn create_object(&mut self, proxy: ProxyObject) -> SceneResult<ObjectId> {
        let id = proxy.id;
        if !self.managers.contains(&proxy.manager) {
            return Err(SceneError::UnknownManager(proxy.manager));
        }
        if self.entities.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        if let Some(parent) = proxy.parent() {
            let parent_proxy = self.proxy(parent).ok_or(SceneError::NotFound(parent))?;
            if parent_proxy.manager != proxy.manager {
                return Err(SceneError::CrossManagerParent { child: id, parent });
            }
        }
        debug!(%id, kind = proxy.kind.type_name(), "created object");
        self.entities.insert(id, Entity::new(proxy));
        Ok(id)
    }

    /// Remove an object. Its children move up to its parent and keep their
    /// global location at `time`.
    pub fn destroy_object(&mut self, id: ObjectId, time: SimTime) -> SceneResult<ProxyObject> {
        let parent = self.proxy(id).ok_or(SceneError::NotFound(id))?.parent();
        for child in self.children(id) {
            self.set_parent(child, parent, time)?;
        }
        let entity = self.entities.remove(&id).ok_or(SceneError::NotFound(id))?;
        debug!(%id, "destroyed object");
        Ok(entity.proxy)
    }

    // ========================================================================
    // Lookup & Traversal
    // ========================================================================

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity(&self, id: ObjectId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn proxy(&self, id: ObjectId) -> Option<&ProxyObject> {
        self.entities.get(&id).map(|e| &e.proxy)
    }

    pub fn proxy_mut(&mut self, id: ObjectId) -> Option<&mut ProxyObject> {
        self.entities.get_mut(&id).map(|e| &mut e.proxy)
    }

    /// Parent of a live object; `None` if the object is unknown.
    pub fn parent_of(&self, id: ObjectId) -> Option<Option<ObjectId>> {
        self.proxy(id).map(|p| p.parent())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entities.keys().copied()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Direct children of `id`, in registry order.
    pub fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        self.entities
            .values()
            .filter(|e| e.proxy.parent() == Some(id))
            .map(|e| e.id())
            .collect()
    }

    pub fn has_children(&self, id: ObjectId) -> bool {
        self.entities.values().any(|e| e.proxy.parent() == Some(id))
    }

    /// Topmost ancestor of `id` (itself if it has no parent).
    pub fn root_of(&self, id: ObjectId) -> ObjectId {
        let mut current = id;
        for _ in 0..=self.entities.len() {
            match self.parent_of(current).flatten() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn is_ancestor(&self, ancestor: ObjectId, of: ObjectId) -> bool {
        let mut current = self.parent_of(of).flatten();
        for _ in 0..=self.entities.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.parent_of(id).flatten(),
                None => return false,
            }
        }
        false
    }

    // ========================================================================
    // Locations
    // ========================================================================

    /// Parent-relative location at `time`.
    pub fn extrapolate_location(&self, id: ObjectId, time: SimTime) -> Option<Location> {
        self.proxy(id).map(|p| p.extrapolate_location(time))
    }

    /// World location at `time`, composed through the parent chain.
    pub fn global_location(&self, id: ObjectId, time: SimTime) -> Option<Location> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let proxy = self.proxy(cur)?;
            chain.push(proxy.extrapolate_location(time));
            if chain.len() > self.entities.len() {
                return None;
            }
            current = proxy.parent();
        }
        let mut global = chain.pop()?;
        while let Some(local) = chain.pop() {
            global = local.to_global(&global);
        }
        Some(global)
    }

    /// Replace an object's parent-relative motion state.
    pub fn reset_position_velocity(
        &mut self,
        id: ObjectId,
        time: SimTime,
        location: Location,
    ) -> SceneResult<()> {
        self.proxy_mut(id)
            .ok_or(SceneError::NotFound(id))?
            .reset_position_velocity(time, location);
        Ok(())
    }

    /// Place an object at a world location.
    pub fn set_global_location(
        &mut self,
        id: ObjectId,
        time: SimTime,
        global: Location,
    ) -> SceneResult<()> {
        let parent = self.parent_of(id).ok_or(SceneError::NotFound(id))?;
        let local = match parent {
            Some(parent) => {
                let parent_global = self
                    .global_location(parent, time)
                    .ok_or(SceneError::NotFound(parent))?;
                global.to_local(&parent_global)
            }
            None => global,
        };
        self.reset_position_velocity(id, time, local)
    }

    /// Reparent an object, keeping its world location at `time`.
    pub fn set_parent(
        &mut self,
        id: ObjectId,
        parent: Option<ObjectId>,
        time: SimTime,
    ) -> SceneResult<()> {
        let global = self.global_location(id, time).ok_or(SceneError::NotFound(id))?;
        self.set_parent_with_location(id, parent, time, global)
    }

    /// Reparent an object and place it at the world location `global`.
    pub fn set_parent_with_location(
        &mut self,
        id: ObjectId,
        parent: Option<ObjectId>,
        time: SimTime,
        global: Location,
    ) -> SceneResult<()> {
        let manager = self.proxy(id).ok_or(SceneError::NotFound(id))?.manager;
        let local = match parent {
            Some(parent_id) => {
                let parent_proxy = self.proxy(parent_id).ok_or(SceneError::NotFound(parent_id))?;
                if parent_proxy.manager != manager {
                    return Err(SceneError::CrossManagerParent {
                        child: id,
                        parent: parent_id,
                    });
                }
                if parent_id == id || self.is_ancestor(id, parent_id) {
                    return Err(SceneError::Cycle {
                        child: id,
                        parent: parent_id,
                    });
                }
                let parent_global = self
                    .global_location(parent_id, time)
                    .ok_or(SceneError::NotFound(parent_id))?;
                global.to_local(&parent_global)
            }
            None => global,
        };
        let proxy = self.proxy_mut(id).ok_or(SceneError::NotFound(id))?;
        proxy.set_parent_unchecked(parent);
        proxy.reset_position_velocity(time, local);
        trace!(%id, ?parent, "reparented");
        Ok(())
    }

    // ========================================================================
    // Editing Flags
    // ========================================================================

    /// Returns false if the object is unknown.
    pub fn set_selected(&mut self, id: ObjectId, selected: bool) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.set_selected(selected);
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.set_visible(visible);
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.entity(id).is_some_and(|e| e.is_selected())
    }

    // ========================================================================
    // Ray Picking
    // ========================================================================

    /// Cast a ray against every pickable mesh and return the `which`-th hit.
    ///
    /// Meshes with an empty mesh URI (groups) have no geometry and are never
    /// hit directly. Each mesh occupies the box `[-scale, scale]` in its own
    /// frame. `which` wraps in both directions.
    pub fn ray_trace(&self, origin: DVec3, dir: DVec3, time: SimTime, which: i32) -> RayTrace {
        profile_scope!("scene_ray_trace");

        let dir = dir.normalize_or_zero();
        if dir == DVec3::ZERO {
            return RayTrace::default();
        }

        let boxes: Vec<(ObjectId, Location, DVec3)> = self
            .entities
            .values()
            .filter_map(|entity| {
                let mesh = entity.proxy.kind.as_mesh()?;
                if mesh.mesh.is_empty() {
                    return None;
                }
                let global = self.global_location(entity.id(), time)?;
                Some((entity.id(), global, mesh.scale.abs()))
            })
            .collect();

        let index = SpatialIndex::from_entries(boxes.iter().map(|(id, loc, half)| {
            let rot = glam::DMat3::from_quat(loc.orientation);
            let extent = DVec3::new(
                rot.row(0).abs().dot(*half),
                rot.row(1).abs().dot(*half),
                rot.row(2).abs().dot(*half),
            );
            SpatialEntry::new(*id, loc.position - extent, loc.position + extent)
        }));
        let by_id: BTreeMap<ObjectId, (Location, DVec3)> =
            boxes.into_iter().map(|(id, loc, half)| (id, (loc, half))).collect();

        let mut hits: Vec<RayHit> = index
            .query_ray(origin, dir)
            .into_iter()
            .filter_map(|(id, _)| {
                let (loc, half) = by_id.get(&id)?;
                let inv = loc.orientation.inverse();
                let local_origin = inv * (origin - loc.position);
                let local_dir = inv * dir;
                let (near, _) = ray_box(local_origin, local_dir, -*half, *half)?;
                let distance = near.max(0.0);
                let entry = local_origin + local_dir * distance;
                let normal = loc.orientation * face_normal(entry, *half);
                Some(RayHit {
                    id,
                    distance,
                    normal,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));

        let hit_count = hits.len();
        if hit_count == 0 {
            return RayTrace::default();
        }
        let idx = which.rem_euclid(hit_count as i32) as usize;
        RayTrace {
            hit: Some(hits[idx]),
            hit_count,
        }
    }

    /// Payload of an object, if it exists.
    pub fn kind(&self, id: ObjectId) -> Option<&ProxyKind> {
        self.proxy(id).map(|p| &p.kind)
    }
}

/// Normal of the box face nearest to a point on its surface.
fn face_normal(point: DVec3, half: DVec3) -> DVec3 {
    let mut best = DVec3::Z;
    let mut best_gap = f64::INFINITY;
    for axis in 0..3 {
        if half[axis] <= 0.0 {
            continue;
        }
        let gap = (point[axis].abs() - half[axis]).abs();
        if gap < best_gap {
            best_gap = gap;
            let mut n = DVec3::ZERO;
            n[axis] = point[axis].signum();
            best = n;
        }
    }
    best
}
