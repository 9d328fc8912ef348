//! Input device abstraction.
//!
//! Physical and synthetic devices are normalized into numbered buttons and
//! axes. Each device owns a `DeviceState` and only its own change detection
//! mutates it; events reach the bus solely through `fire_button` and
//! `fire_axis`, which drop idempotent samples.
//!
//! ## Modules
//!
//! - `axis` - Normalized axis values
//! - `state` - Button/axis state, modifiers and device identity
//! - `hardware` - Mouse, keyboard and joystick devices
//! - `synthetic` - Devices derived from a parent device
//! - `scancode` - Keyboard scancodes
//! - `manager` - Device registry and pointer gesture tracking

mod axis;
mod hardware;
mod manager;
pub mod scancode;
mod state;
mod synthetic;

pub use axis::AxisValue;
pub use hardware::{JoystickDevice, KeyboardDevice, MouseDevice};
pub use manager::InputManager;
pub use state::{DeviceId, DeviceState, Modifiers};
pub use synthetic::{AxisToButton, ButtonToAxis};

use crate::events::{AxisEvent, ButtonEvent, EventBus, InputEvent};
use crate::types::SimTime;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Mouse,
    Keyboard,
    Joystick,
    Synthetic,
}

/// A button or axis state computed by a synthetic device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedInput {
    Button { button: u32, pressed: bool },
    Axis { axis: u32, value: AxisValue },
}

pub trait InputDevice {
    fn kind(&self) -> DeviceKind;
    fn state(&self) -> &DeviceState;
    fn state_mut(&mut self) -> &mut DeviceState;

    fn num_buttons(&self) -> u32;
    fn num_axes(&self) -> u32;
    fn button_name(&self, button: u32) -> String;
    fn axis_name(&self, axis: u32) -> String;

    /// Current states derived from a parent device. Hardware devices are
    /// driven directly and derive nothing.
    fn derive(&self) -> Vec<DerivedInput> {
        Vec::new()
    }

    fn id(&self) -> DeviceId {
        self.state().id()
    }

    fn name(&self) -> &str {
        self.state().name()
    }
}

pub type InputDevicePtr = Rc<RefCell<dyn InputDevice>>;

/// Update a button and publish the transition, if there was one.
///
/// The device borrow is released before the bus runs, so handlers may
/// inspect the device.
pub fn fire_button(
    device: &InputDevicePtr,
    bus: &EventBus,
    button: u32,
    pressed: bool,
    modifiers: Modifiers,
    time: SimTime,
) -> bool {
    let mut modifiers = modifiers;
    let (changed, id) = {
        let mut dev = device.borrow_mut();
        let changed = dev.state_mut().button_changed(button, pressed, &mut modifiers);
        (changed, dev.id())
    };
    if changed {
        bus.fire(&InputEvent::Button(ButtonEvent {
            device: id,
            button,
            pressed,
            modifiers,
            time,
        }));
    }
    changed
}

/// Update an axis and publish the new value, if it differs.
pub fn fire_axis(
    device: &InputDevicePtr,
    bus: &EventBus,
    axis: u32,
    value: AxisValue,
    time: SimTime,
) -> bool {
    let (changed, id) = {
        let mut dev = device.borrow_mut();
        let changed = dev.state_mut().axis_changed(axis, value);
        (changed, dev.id())
    };
    if changed {
        bus.fire(&InputEvent::Axis(AxisEvent {
            device: id,
            axis,
            value,
            time,
        }));
    }
    changed
}
