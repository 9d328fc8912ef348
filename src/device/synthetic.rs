//! Devices derived from another device's state.
//!
//! `AxisToButton` turns ranges of a parent axis into buttons (hat switches,
//! d-pads reported as axes). `ButtonToAxis` turns a set of parent buttons into
//! one axis (arrow keys driving a pointer axis). Neither touches the parent;
//! their state is re-derived whenever the input manager polls.

use super::{AxisValue, DerivedInput, DeviceKind, DeviceState, InputDevice, InputDevicePtr};
use std::collections::BTreeMap;

struct HatButton {
    low: AxisValue,
    high: AxisValue,
}

pub struct AxisToButton {
    state: DeviceState,
    parent: InputDevicePtr,
    parent_axis: u32,
    buttons: Vec<HatButton>,
}

impl AxisToButton {
    pub fn new(name: impl Into<String>, parent: InputDevicePtr, parent_axis: u32) -> Self {
        Self {
            state: DeviceState::new(name),
            parent,
            parent_axis,
            buttons: Vec::new(),
        }
    }

    /// Add a button that is down while the parent axis lies in `[low, high]`.
    /// Returns the new button's index.
    pub fn add_button(&mut self, low: AxisValue, high: AxisValue) -> u32 {
        self.buttons.push(HatButton { low, high });
        (self.buttons.len() - 1) as u32
    }
}

impl InputDevice for AxisToButton {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Synthetic
    }

    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn num_buttons(&self) -> u32 {
        self.buttons.len() as u32
    }

    fn num_axes(&self) -> u32 {
        0
    }

    fn button_name(&self, button: u32) -> String {
        let axis_name = self.parent.borrow().axis_name(self.parent_axis);
        let Some(hat) = self.buttons.get(button as usize) else {
            return format!("[{} ?]", axis_name);
        };
        if hat.low.is_negative() && hat.high.is_positive() {
            format!("[{} Centered]", axis_name)
        } else {
            let extreme = if hat.high.is_negative() { hat.low } else { hat.high };
            format!("[{} {}%]", axis_name, (extreme.centered() * 100.0) as i32)
        }
    }

    fn axis_name(&self, _axis: u32) -> String {
        String::new()
    }

    fn derive(&self) -> Vec<DerivedInput> {
        let value = self.parent.borrow().state().axis(self.parent_axis);
        self.buttons
            .iter()
            .enumerate()
            .map(|(idx, hat)| DerivedInput::Button {
                button: idx as u32,
                pressed: hat.low <= value && value <= hat.high,
            })
            .collect()
    }
}

pub struct ButtonToAxis {
    state: DeviceState,
    parent: InputDevicePtr,
    points: BTreeMap<u32, f32>,
}

impl ButtonToAxis {
    pub fn new(name: impl Into<String>, parent: InputDevicePtr) -> Self {
        Self {
            state: DeviceState::new(name),
            parent,
            points: BTreeMap::new(),
        }
    }

    /// While `button` is held on the parent, it contributes `value` to the axis.
    pub fn add_point(&mut self, button: u32, value: f32) {
        self.points.insert(button, value);
    }
}

impl InputDevice for ButtonToAxis {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Synthetic
    }

    fn state(&self) -> &DeviceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    fn num_buttons(&self) -> u32 {
        0
    }

    fn num_axes(&self) -> u32 {
        1
    }

    fn button_name(&self, _button: u32) -> String {
        String::new()
    }

    fn axis_name(&self, _axis: u32) -> String {
        let parent = self.parent.borrow();
        let buttons: Vec<String> = self.points.keys().map(|b| parent.button_name(*b)).collect();
        format!("[{} {}]", parent.name(), buttons.join("/"))
    }

    fn derive(&self) -> Vec<DerivedInput> {
        let parent = self.parent.borrow();
        let sum: f32 = self
            .points
            .iter()
            .filter(|(button, _)| parent.state().is_pressed(**button))
            .map(|(_, value)| *value)
            .sum();
        vec![DerivedInput::Axis {
            axis: 0,
            value: AxisValue::from_centered(sum).clip(),
        }]
    }
}
