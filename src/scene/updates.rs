//! Cross-thread proxy updates.
//!
//! The network layer runs on its own thread and never touches the scene
//! directly. It pushes `ProxyUpdate`s into a shared queue which the graphics
//! tick drains onto the scene on the simulation thread.

use super::{ProxyObject, Scene, SceneResult};
use crate::types::{Location, ObjectId, ProxyKind, SimTime};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum ProxyUpdate {
    Create(ProxyObject),
    Destroy(ObjectId),
    /// New parent-relative motion state valid at `time`
    Move {
        id: ObjectId,
        time: SimTime,
        location: Location,
    },
    /// Reparent, keeping the world location
    SetParent {
        id: ObjectId,
        parent: Option<ObjectId>,
    },
    SetKind {
        id: ObjectId,
        kind: ProxyKind,
    },
}

impl Scene {
    /// Apply one update at time `now`.
    pub fn apply_update(&mut self, update: ProxyUpdate, now: SimTime) -> SceneResult<()> {
        match update {
            ProxyUpdate::Create(proxy) => self.create_object(proxy).map(|_| ()),
            ProxyUpdate::Destroy(id) => self.destroy_object(id, now).map(|_| ()),
            ProxyUpdate::Move { id, time, location } => {
                self.reset_position_velocity(id, time, location)
            }
            ProxyUpdate::SetParent { id, parent } => self.set_parent(id, parent, now),
            ProxyUpdate::SetKind { id, kind } => {
                let proxy = self
                    .proxy_mut(id)
                    .ok_or(super::SceneError::NotFound(id))?;
                proxy.kind = kind;
                Ok(())
            }
        }
    }
}

/// Thread-safe FIFO of pending proxy updates. Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct ProxyUpdateQueue {
    inner: Arc<Mutex<VecDeque<ProxyUpdate>>>,
}

impl ProxyUpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, update: ProxyUpdate) {
        self.inner.lock().push_back(update);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Take every pending update, oldest first.
    pub fn drain(&self) -> Vec<ProxyUpdate> {
        self.inner.lock().drain(..).collect()
    }

    /// Drain onto `scene`. Failed updates are logged and skipped.
    /// Returns the number applied.
    pub fn apply_to(&self, scene: &mut Scene, now: SimTime) -> usize {
        let mut applied = 0;
        for update in self.drain() {
            match scene.apply_update(update, now) {
                Ok(()) => applied += 1,
                Err(e) => warn!(error = %e, "dropping proxy update"),
            }
        }
        applied
    }
}
