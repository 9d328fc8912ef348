//! Per-device button and axis state with change detection.

use super::AxisValue;
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DEVICE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(u32);

impl DeviceId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dev#{}", self.0)
    }
}

/// Keyboard modifier mask. Bindings compare masks for exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    pub const SUPER: Modifiers = Modifiers(8);

    /// Both masks; usable in constant tables.
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn set(&mut self, other: Modifiers, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Current buttons and axes of one device.
///
/// Pressed buttons remember the modifier mask active when they went down,
/// so the matching release can be routed to the same binding.
#[derive(Debug, Clone)]
pub struct DeviceState {
    id: DeviceId,
    name: String,
    buttons: HashMap<u32, Modifiers>,
    axes: Vec<AxisValue>,
}

impl DeviceState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DeviceId::next(),
            name: name.into(),
            buttons: HashMap::new(),
            axes: Vec::new(),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Record a new button state.
    ///
    /// Returns true only on an actual transition. On release, `modifiers`
    /// is overwritten with the mask captured when the button was pressed.
    pub fn button_changed(&mut self, button: u32, pressed: bool, modifiers: &mut Modifiers) -> bool {
        match (self.buttons.get(&button).copied(), pressed) {
            (Some(_), true) | (None, false) => false,
            (None, true) => {
                self.buttons.insert(button, *modifiers);
                true
            }
            (Some(held), false) => {
                self.buttons.remove(&button);
                *modifiers = held;
                true
            }
        }
    }

    /// Record a new axis value. Any bit-level difference counts as a change.
    pub fn axis_changed(&mut self, axis: u32, value: AxisValue) -> bool {
        let idx = axis as usize;
        if self.axes.len() <= idx {
            self.axes.resize(idx + 1, AxisValue::null());
        }
        if self.axes[idx].same_bits(value) {
            return false;
        }
        self.axes[idx] = value;
        true
    }

    pub fn is_pressed(&self, button: u32) -> bool {
        self.buttons.contains_key(&button)
    }

    /// Modifier mask the button was pressed with, if it is down.
    pub fn pressed_with(&self, button: u32) -> Option<Modifiers> {
        self.buttons.get(&button).copied()
    }

    pub fn axis(&self, axis: u32) -> AxisValue {
        self.axes.get(axis as usize).copied().unwrap_or_default()
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = u32> + '_ {
        self.buttons.keys().copied()
    }
}
