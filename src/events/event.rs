//! Input event payloads.

use super::{EventKey, EventKind, Secondary};
use crate::device::{AxisValue, DeviceId, InputDevicePtr, Modifiers};
use crate::types::SimTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub device: DeviceId,
    pub button: u32,
    pub pressed: bool,
    /// Modifiers held at press time (also reported on the matching release)
    pub modifiers: Modifiers,
    pub time: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub device: DeviceId,
    pub axis: u32,
    pub value: AxisValue,
    pub time: SimTime,
}

/// Press and release of a mouse button without a drag in between.
/// Coordinates are normalized screen units in [-1, 1], +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseClickEvent {
    pub device: DeviceId,
    pub button: u32,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
    pub time: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Start,
    Drag,
    End,
}

/// One sample of a mouse drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseDragEvent {
    pub device: DeviceId,
    pub button: u32,
    pub phase: DragPhase,
    pub x: f32,
    pub y: f32,
    /// Where the button went down
    pub start_x: f32,
    pub start_y: f32,
    /// Motion since the previous sample
    pub delta_x: f32,
    pub delta_y: f32,
    pub modifiers: Modifiers,
    pub time: SimTime,
}

impl MouseDragEvent {
    /// Total motion since the button went down.
    pub fn total_delta(&self) -> (f32, f32) {
        (self.x - self.start_x, self.y - self.start_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceEventKind {
    Added,
    Removed,
}

/// Device hot-plug notification. Carries the device itself so listeners
/// can inspect its kind before it is registered or after it is unplugged.
#[derive(Clone)]
pub struct DeviceEvent {
    pub kind: DeviceEventKind,
    pub device: InputDevicePtr,
}

impl DeviceEvent {
    pub fn device_id(&self) -> DeviceId {
        self.device.borrow().id()
    }
}

impl fmt::Debug for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev = self.device.borrow();
        f.debug_struct("DeviceEvent")
            .field("kind", &self.kind)
            .field("device", &dev.id())
            .field("name", &dev.name())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Button(ButtonEvent),
    Axis(AxisEvent),
    MouseClick(MouseClickEvent),
    MouseDrag(MouseDragEvent),
    Device(DeviceEvent),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Button(ev) if ev.pressed => EventKind::ButtonPressed,
            InputEvent::Button(_) => EventKind::ButtonReleased,
            InputEvent::Axis(_) => EventKind::Axis,
            InputEvent::MouseClick(_) => EventKind::MouseClick,
            InputEvent::MouseDrag(_) => EventKind::MouseDrag,
            InputEvent::Device(_) => EventKind::Device,
        }
    }

    /// The fully-qualified key this event is published under.
    pub fn key(&self) -> EventKey {
        let secondary = match self {
            InputEvent::Button(ev) => Secondary::Button {
                device: ev.device,
                button: ev.button,
                modifiers: ev.modifiers,
            },
            InputEvent::Axis(ev) => Secondary::Axis {
                device: ev.device,
                axis: ev.axis,
            },
            InputEvent::MouseClick(ev) => Secondary::MouseButton(ev.button),
            InputEvent::MouseDrag(ev) => Secondary::MouseButton(ev.button),
            InputEvent::Device(_) => Secondary::Any,
        };
        EventKey {
            kind: self.kind(),
            secondary,
        }
    }
}
