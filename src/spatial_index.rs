//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for ray picking in the 3D scene.
//! Entries are world-space bounding boxes; ray queries descend only into
//! nodes whose envelope the ray crosses, so picking cost grows with the
//! number of boxes near the ray rather than with the whole scene.

use crate::types::ObjectId;
use glam::DVec3;
use rstar::{AABB, RTree, RTreeObject, SelectionFunction};

/// A spatial entry representing an object's world-space bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub id: ObjectId,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl SpatialEntry {
    pub fn new(id: ObjectId, min: DVec3, max: DVec3) -> Self {
        Self {
            id,
            min: min.min(max).to_array(),
            max: min.max(max).to_array(),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Entry and exit distances of a ray through an axis-aligned box, or `None`
/// if the ray misses it or the box lies entirely behind the origin.
pub fn ray_box(origin: DVec3, dir: DVec3, min: DVec3, max: DVec3) -> Option<(f64, f64)> {
    let mut near = f64::NEG_INFINITY;
    let mut far = f64::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < f64::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        near = near.max(t1.min(t2));
        far = far.min(t1.max(t2));
        if near > far {
            return None;
        }
    }
    if far < 0.0 {
        return None;
    }
    Some((near, far))
}

/// Selects the entries a ray passes through.
struct RaySelection {
    origin: DVec3,
    dir: DVec3,
}

impl RaySelection {
    fn crosses(&self, min: [f64; 3], max: [f64; 3]) -> bool {
        ray_box(self.origin, self.dir, DVec3::from(min), DVec3::from(max)).is_some()
    }
}

impl SelectionFunction<SpatialEntry> for RaySelection {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 3]>) -> bool {
        self.crosses(envelope.lower(), envelope.upper())
    }

    fn should_unpack_leaf(&self, leaf: &SpatialEntry) -> bool {
        self.crosses(leaf.min, leaf.max)
    }
}

/// R-tree over world-space boxes, built for one pick.
///
/// Object locations are extrapolated from motion state, so the boxes are
/// only valid at the time they were computed; the scene builds a fresh
/// index for each ray trace.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Build a spatial index from an iterator of entries.
    pub fn from_entries<I>(items: I) -> Self
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        Self {
            tree: RTree::bulk_load(items.into_iter().collect()),
        }
    }

    /// Query all objects whose box the ray crosses, nearest entry first.
    pub fn query_ray(&self, origin: DVec3, dir: DVec3) -> Vec<(ObjectId, f64)> {
        let mut hits: Vec<(ObjectId, f64)> = self
            .tree
            .locate_with_selection_function(RaySelection { origin, dir })
            .filter_map(|entry| {
                ray_box(origin, dir, DVec3::from(entry.min), DVec3::from(entry.max))
                    .map(|(near, _)| (entry.id, near.max(0.0)))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
