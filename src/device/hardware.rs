//! Physical devices: mouse, keyboard and joystick.

use super::{DeviceKind, DeviceState, InputDevice, scancode};

/// A pointer device with up to five buttons.
///
/// Cursor axes hold the absolute position in normalized screen units
/// (-1 at the left/bottom edge, +1 at the right/top edge).
pub struct MouseDevice {
    state: DeviceState,
}

impl MouseDevice {
    pub const CURSORX: u32 = 0;
    pub const CURSORY: u32 = 1;
    pub const RELX: u32 = 2;
    pub const RELY: u32 = 3;
    pub const WHEELX: u32 = 4;
    pub const WHEELY: u32 = 5;

    pub const LEFT: u32 = 1;
    pub const MIDDLE: u32 = 2;
    pub const RIGHT: u32 = 3;

    const NUM_BUTTONS: u32 = 5;
    const NUM_AXES: u32 = 6;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: DeviceState::new(name),
        }
    }
}

impl InputDevice for MouseDevice {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Mouse
    }

    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn num_buttons(&self) -> u32 {
        Self::NUM_BUTTONS
    }

    fn num_axes(&self) -> u32 {
        Self::NUM_AXES
    }

    fn button_name(&self, button: u32) -> String {
        match button {
            Self::LEFT => "Left Button".into(),
            Self::MIDDLE => "Middle Button".into(),
            Self::RIGHT => "Right Button".into(),
            other => format!("Button {}", other),
        }
    }

    fn axis_name(&self, axis: u32) -> String {
        match axis {
            Self::CURSORX => "Cursor X".into(),
            Self::CURSORY => "Cursor Y".into(),
            Self::RELX => "Relative X".into(),
            Self::RELY => "Relative Y".into(),
            Self::WHEELX => "Wheel X".into(),
            Self::WHEELY => "Wheel Y".into(),
            other => format!("Axis {}", other),
        }
    }
}

pub struct KeyboardDevice {
    state: DeviceState,
}

impl KeyboardDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: DeviceState::new(name),
        }
    }
}

impl InputDevice for KeyboardDevice {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Keyboard
    }

    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn num_buttons(&self) -> u32 {
        scancode::NUM_SCANCODES
    }

    fn num_axes(&self) -> u32 {
        0
    }

    fn button_name(&self, button: u32) -> String {
        scancode::name(button)
    }

    fn axis_name(&self, _axis: u32) -> String {
        String::new()
    }
}

/// A generic game controller with numbered buttons and axes.
pub struct JoystickDevice {
    state: DeviceState,
    num_buttons: u32,
    num_axes: u32,
}

impl JoystickDevice {
    pub fn new(name: impl Into<String>, num_buttons: u32, num_axes: u32) -> Self {
        Self {
            state: DeviceState::new(name),
            num_buttons,
            num_axes,
        }
    }
}

impl InputDevice for JoystickDevice {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Joystick
    }

    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn num_buttons(&self) -> u32 {
        self.num_buttons
    }

    fn num_axes(&self) -> u32 {
        self.num_axes
    }

    fn button_name(&self, button: u32) -> String {
        format!("Button {}", button)
    }

    fn axis_name(&self, axis: u32) -> String {
        format!("Axis {}", axis)
    }
}
