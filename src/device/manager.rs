//! Device registry and pointer gesture tracking.
//!
//! The manager owns the live devices, keeps the modifier mask in sync with
//! the modifier keys and turns raw mouse button/motion samples into click and
//! drag events. Platform glue feeds it raw samples; everything downstream
//! only sees the bus.

use super::{
    AxisValue, DerivedInput, DeviceId, InputDevicePtr, Modifiers, MouseDevice, fire_axis,
    fire_button, scancode,
};
use crate::constants::DRAG_THRESHOLD;
use crate::events::{
    DeviceEvent, DeviceEventKind, DragPhase, EventBus, InputEvent, MouseClickEvent, MouseDragEvent,
};
use crate::types::SimTime;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// A mouse button that is currently held.
#[derive(Debug, Clone, Copy)]
struct PointerPress {
    start: (f32, f32),
    last: (f32, f32),
    dragging: bool,
}

pub struct InputManager {
    bus: Rc<EventBus>,
    devices: BTreeMap<DeviceId, InputDevicePtr>,
    modifiers: Modifiers,
    cursors: HashMap<DeviceId, (f32, f32)>,
    presses: HashMap<(DeviceId, u32), PointerPress>,
    drag_threshold: f32,
    now: SimTime,
}

impl InputManager {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            devices: BTreeMap::new(),
            modifiers: Modifiers::NONE,
            cursors: HashMap::new(),
            presses: HashMap::new(),
            drag_threshold: DRAG_THRESHOLD,
            now: 0.0,
        }
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn time(&self) -> SimTime {
        self.now
    }

    pub fn set_time(&mut self, now: SimTime) {
        self.now = now;
    }

    pub fn set_drag_threshold(&mut self, threshold: f32) {
        self.drag_threshold = threshold.max(0.0);
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_modifier_down(&self, modifier: Modifiers) -> bool {
        self.modifiers.contains(modifier)
    }

    // ========================================================================
    // Device Registry
    // ========================================================================

    /// Register a device and announce it on the bus.
    pub fn add_device(&mut self, device: InputDevicePtr) -> DeviceId {
        let (id, name) = {
            let dev = device.borrow();
            (dev.id(), dev.name().to_string())
        };
        info!(device = %id, %name, "input device added");
        self.devices.insert(id, device.clone());
        self.bus.fire(&InputEvent::Device(DeviceEvent {
            kind: DeviceEventKind::Added,
            device,
        }));
        id
    }

    /// Announce removal, revoke every subscription still keyed to the
    /// device, then drop it.
    pub fn remove_device(&mut self, id: DeviceId) -> bool {
        let Some(device) = self.devices.get(&id).cloned() else {
            warn!(device = %id, "removing unknown input device");
            return false;
        };
        info!(device = %id, "input device removed");
        self.bus.fire(&InputEvent::Device(DeviceEvent {
            kind: DeviceEventKind::Removed,
            device,
        }));
        let leftover = self.bus.unsubscribe_device(id);
        if leftover > 0 {
            debug!(device = %id, leftover, "revoked subscriptions left by listeners");
        }
        self.devices.remove(&id);
        self.cursors.remove(&id);
        self.presses.retain(|(dev, _), _| *dev != id);
        true
    }

    pub fn device(&self, id: DeviceId) -> Option<InputDevicePtr> {
        self.devices.get(&id).cloned()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    // ========================================================================
    // Raw Samples
    // ========================================================================

    /// Keyboard key transition. Modifier keys update the live mask before
    /// the event is published.
    pub fn key(&mut self, keyboard: DeviceId, code: u32, pressed: bool) -> bool {
        let Some(device) = self.device(keyboard) else {
            debug!(device = %keyboard, code, "key from unknown device");
            return false;
        };
        if let Some(modifier) = scancode::modifier_for(code) {
            self.modifiers.set(modifier, pressed);
        }
        fire_button(&device, &self.bus, code, pressed, self.modifiers, self.now)
    }

    /// Generic axis sample (joystick sticks, triggers).
    pub fn axis(&mut self, device: DeviceId, axis: u32, value: AxisValue) -> bool {
        let Some(dev) = self.device(device) else {
            return false;
        };
        fire_axis(&dev, &self.bus, axis, value, self.now)
    }

    /// Absolute cursor motion in normalized screen units.
    pub fn mouse_motion(&mut self, mouse: DeviceId, x: f32, y: f32) {
        let Some(device) = self.device(mouse) else {
            return;
        };
        let (last_x, last_y) = self.cursors.get(&mouse).copied().unwrap_or((x, y));
        self.cursors.insert(mouse, (x, y));

        fire_axis(&device, &self.bus, MouseDevice::CURSORX, AxisValue::from_centered(x), self.now);
        fire_axis(&device, &self.bus, MouseDevice::CURSORY, AxisValue::from_centered(y), self.now);
        fire_axis(&device, &self.bus, MouseDevice::RELX, AxisValue::from_centered(x - last_x), self.now);
        fire_axis(&device, &self.bus, MouseDevice::RELY, AxisValue::from_centered(y - last_y), self.now);

        let mut held: Vec<u32> = self
            .presses
            .keys()
            .filter(|(dev, _)| *dev == mouse)
            .map(|(_, button)| *button)
            .collect();
        held.sort_unstable();

        for button in held {
            let Some(mut press) = self.presses.get(&(mouse, button)).copied() else {
                continue;
            };
            let phase = if press.dragging {
                DragPhase::Drag
            } else {
                let moved = (x - press.start.0).abs().max((y - press.start.1).abs());
                if moved <= self.drag_threshold {
                    continue;
                }
                press.dragging = true;
                DragPhase::Start
            };
            let (delta_x, delta_y) = (x - press.last.0, y - press.last.1);
            press.last = (x, y);
            self.presses.insert((mouse, button), press);
            self.fire_drag(mouse, button, phase, press, (delta_x, delta_y));
        }
    }

    /// Mouse button transition at the given position. A release that was not
    /// preceded by a drag produces a click; otherwise it ends the drag.
    pub fn mouse_button(&mut self, mouse: DeviceId, button: u32, pressed: bool, x: f32, y: f32) {
        let Some(device) = self.device(mouse) else {
            return;
        };
        self.cursors.insert(mouse, (x, y));
        if !fire_button(&device, &self.bus, button, pressed, self.modifiers, self.now) {
            return;
        }

        if pressed {
            self.presses.insert(
                (mouse, button),
                PointerPress {
                    start: (x, y),
                    last: (x, y),
                    dragging: false,
                },
            );
            return;
        }

        let Some(mut press) = self.presses.remove(&(mouse, button)) else {
            return;
        };
        if press.dragging {
            let delta = (x - press.last.0, y - press.last.1);
            press.last = (x, y);
            self.fire_drag(mouse, button, DragPhase::End, press, delta);
        } else {
            self.bus.fire(&InputEvent::MouseClick(MouseClickEvent {
                device: mouse,
                button,
                x,
                y,
                modifiers: self.modifiers,
                time: self.now,
            }));
        }
    }

    /// Wheel motion. Wheel axes are impulses: the stored value returns to
    /// rest after publishing so identical consecutive steps both fire.
    pub fn mouse_wheel(&mut self, mouse: DeviceId, dx: f32, dy: f32) {
        let Some(device) = self.device(mouse) else {
            return;
        };
        for (axis, value) in [(MouseDevice::WHEELX, dx), (MouseDevice::WHEELY, dy)] {
            if value == 0.0 {
                continue;
            }
            fire_axis(&device, &self.bus, axis, AxisValue::from_centered(value), self.now);
            device
                .borrow_mut()
                .state_mut()
                .axis_changed(axis, AxisValue::null());
        }
    }

    /// Advance time and re-derive synthetic devices.
    pub fn poll(&mut self, now: SimTime) {
        self.now = now;
        let devices: Vec<InputDevicePtr> = self.devices.values().cloned().collect();
        for device in devices {
            let derived = device.borrow().derive();
            for input in derived {
                match input {
                    DerivedInput::Button { button, pressed } => {
                        fire_button(&device, &self.bus, button, pressed, self.modifiers, now);
                    }
                    DerivedInput::Axis { axis, value } => {
                        fire_axis(&device, &self.bus, axis, value, now);
                    }
                }
            }
        }
    }

    fn fire_drag(
        &self,
        mouse: DeviceId,
        button: u32,
        phase: DragPhase,
        press: PointerPress,
        delta: (f32, f32),
    ) {
        self.bus.fire(&InputEvent::MouseDrag(MouseDragEvent {
            device: mouse,
            button,
            phase,
            x: press.last.0,
            y: press.last.1,
            start_x: press.start.0,
            start_y: press.start.1,
            delta_x: delta.0,
            delta_y: delta.1,
            modifiers: self.modifiers,
            time: self.now,
        }));
    }
}
