//! Client-side proxies of networked objects.

use crate::types::{Location, ObjectId, ProxyKind, ProxyManagerId, SimTime};
use serde::{Deserialize, Serialize};

/// A networked mesh, light or camera as seen by this client.
///
/// `location` is relative to the parent (or the world when there is none)
/// and valid at `location_time`; readers extrapolate it to the time they
/// care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyObject {
    pub id: ObjectId,
    pub manager: ProxyManagerId,
    parent: Option<ObjectId>,
    location: Location,
    location_time: SimTime,
    pub kind: ProxyKind,
}

impl ProxyObject {
    pub fn new(id: ObjectId, manager: ProxyManagerId, kind: ProxyKind) -> Self {
        Self {
            id,
            manager,
            parent: None,
            location: Location::default(),
            location_time: 0.0,
            kind,
        }
    }

    pub fn with_location(mut self, location: Location, time: SimTime) -> Self {
        self.location = location;
        self.location_time = time;
        self
    }

    /// Parent at creation. The registry validates it on insert.
    pub fn with_parent(mut self, parent: Option<ObjectId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub(super) fn set_parent_unchecked(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    /// Last location update, relative to the parent.
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn location_time(&self) -> SimTime {
        self.location_time
    }

    /// Parent-relative location at `time`.
    pub fn extrapolate_location(&self, time: SimTime) -> Location {
        self.location.extrapolate(time - self.location_time)
    }

    /// Replace the motion state; `location` is parent-relative.
    pub fn reset_position_velocity(&mut self, time: SimTime, location: Location) {
        self.location = location;
        self.location_time = time;
    }
}

/// A proxy plus its client-side editing flags.
#[derive(Debug, Clone)]
pub struct Entity {
    pub proxy: ProxyObject,
    selected: bool,
    visible: bool,
}

impl Entity {
    pub(super) fn new(proxy: ProxyObject) -> Self {
        Self {
            proxy,
            selected: false,
            visible: true,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.proxy.id
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(super) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(super) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
