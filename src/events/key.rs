//! Subscription keys.

use crate::device::{DeviceId, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ButtonPressed,
    ButtonReleased,
    Axis,
    MouseClick,
    MouseDrag,
    Device,
}

/// Secondary discriminator of an event key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Secondary {
    /// Matches every event of the kind
    Any,
    Button {
        device: DeviceId,
        button: u32,
        modifiers: Modifiers,
    },
    Axis {
        device: DeviceId,
        axis: u32,
    },
    MouseButton(u32),
}

/// Event kind plus secondary discriminator.
///
/// A subscription key matches an event key when the kinds agree and the
/// subscription's secondary is `Any` or equal to the event's. Modifier masks
/// compare for exact equality: a SHIFT binding does not fire for SHIFT+CTRL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub kind: EventKind,
    pub secondary: Secondary,
}

impl EventKey {
    /// Every event of `kind`.
    pub fn kind(kind: EventKind) -> Self {
        Self {
            kind,
            secondary: Secondary::Any,
        }
    }

    pub fn button(device: DeviceId, button: u32, modifiers: Modifiers, released: bool) -> Self {
        Self {
            kind: if released {
                EventKind::ButtonReleased
            } else {
                EventKind::ButtonPressed
            },
            secondary: Secondary::Button {
                device,
                button,
                modifiers,
            },
        }
    }

    pub fn axis(device: DeviceId, axis: u32) -> Self {
        Self {
            kind: EventKind::Axis,
            secondary: Secondary::Axis { device, axis },
        }
    }

    pub fn mouse_click(button: u32) -> Self {
        Self {
            kind: EventKind::MouseClick,
            secondary: Secondary::MouseButton(button),
        }
    }

    pub fn matches(&self, event: &EventKey) -> bool {
        self.kind == event.kind
            && (self.secondary == Secondary::Any || self.secondary == event.secondary)
    }

    /// Device this key is bound to, if any.
    pub fn device(&self) -> Option<DeviceId> {
        match self.secondary {
            Secondary::Button { device, .. } | Secondary::Axis { device, .. } => Some(device),
            _ => None,
        }
    }
}
