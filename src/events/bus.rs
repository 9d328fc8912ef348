//! Publish/subscribe registry for input events.

use super::{EventKey, InputEvent};
use crate::device::DeviceId;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

/// Disposition returned by a handler. `Handled` stops delivery to later
/// handlers; a handler that returns `NotHandled` must not have changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    NotHandled,
    Handled,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }

    /// `Handled` if `changed`, else `NotHandled`.
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            EventResponse::Handled
        } else {
            EventResponse::NotHandled
        }
    }
}

pub trait Handler {
    fn dispatch(&self, event: &InputEvent) -> EventResponse;
}

impl<F> Handler for F
where
    F: Fn(&InputEvent) -> EventResponse,
{
    fn dispatch(&self, event: &InputEvent) -> EventResponse {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    key: EventKey,
    handler: Rc<dyn Handler>,
}

/// Event bus keyed by `EventKey`.
///
/// Handlers run in subscription order. Subscribing and unsubscribing from
/// inside a handler is allowed: delivery works on a snapshot of the matching
/// handlers and skips any that were unsubscribed mid-dispatch.
#[derive(Default)]
pub struct EventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, key: EventKey, handler: impl Handler + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            key,
            handler: Rc::new(handler),
        });
        trace!(?key, ?id, "subscribed");
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.borrow_mut();
        match subs.iter().position(|s| s.id == id) {
            Some(idx) => {
                subs.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop every subscription whose key names `device`. Returns how many
    /// were removed.
    pub fn unsubscribe_device(&self, device: DeviceId) -> usize {
        let mut subs = self.subscriptions.borrow_mut();
        let before = subs.len();
        subs.retain(|s| s.key.device() != Some(device));
        let removed = before - subs.len();
        if removed > 0 {
            trace!(%device, removed, "device subscriptions dropped");
        }
        removed
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().iter().any(|s| s.id == id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Number of subscriptions whose key names `device`.
    pub fn device_subscription_count(&self, device: DeviceId) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.key.device() == Some(device))
            .count()
    }

    pub fn fire(&self, event: &InputEvent) -> EventResponse {
        let key = event.key();
        let matching: Vec<(SubscriptionId, Rc<dyn Handler>)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.key.matches(&key))
            .map(|s| (s.id, s.handler.clone()))
            .collect();

        for (id, handler) in matching {
            if !self.is_subscribed(id) {
                continue;
            }
            if handler.dispatch(event).is_handled() {
                return EventResponse::Handled;
            }
        }
        EventResponse::NotHandled
    }
}
