//! USB HID keyboard scancodes (the values SDL reports).

pub const A: u32 = 4;
pub const B: u32 = 5;
pub const C: u32 = 6;
pub const D: u32 = 7;
pub const E: u32 = 8;
pub const F: u32 = 9;
pub const G: u32 = 10;
pub const H: u32 = 11;
pub const I: u32 = 12;
pub const J: u32 = 13;
pub const K: u32 = 14;
pub const L: u32 = 15;
pub const M: u32 = 16;
pub const N: u32 = 17;
pub const O: u32 = 18;
pub const P: u32 = 19;
pub const Q: u32 = 20;
pub const R: u32 = 21;
pub const S: u32 = 22;
pub const T: u32 = 23;
pub const U: u32 = 24;
pub const V: u32 = 25;
pub const W: u32 = 26;
pub const X: u32 = 27;
pub const Y: u32 = 28;
pub const Z: u32 = 29;

pub const NUM_1: u32 = 30;
pub const NUM_2: u32 = 31;
pub const NUM_3: u32 = 32;

pub const RETURN: u32 = 40;
pub const ESCAPE: u32 = 41;
pub const SPACE: u32 = 44;

pub const PAGEUP: u32 = 75;
pub const DELETE: u32 = 76;
pub const PAGEDOWN: u32 = 78;
pub const RIGHT: u32 = 79;
pub const LEFT: u32 = 80;
pub const DOWN: u32 = 81;
pub const UP: u32 = 82;

pub const KP_ENTER: u32 = 88;
pub const KP_0: u32 = 98;
pub const KP_PERIOD: u32 = 99;

pub const LCTRL: u32 = 224;
pub const LSHIFT: u32 = 225;
pub const LALT: u32 = 226;
pub const LGUI: u32 = 227;
pub const RCTRL: u32 = 228;
pub const RSHIFT: u32 = 229;
pub const RALT: u32 = 230;
pub const RGUI: u32 = 231;

/// Number of scancodes a keyboard device exposes.
pub const NUM_SCANCODES: u32 = 512;

/// The modifier bit a key drives, if it is a modifier key.
pub fn modifier_for(code: u32) -> Option<super::Modifiers> {
    use super::Modifiers;
    match code {
        LSHIFT | RSHIFT => Some(Modifiers::SHIFT),
        LCTRL | RCTRL => Some(Modifiers::CTRL),
        LALT | RALT => Some(Modifiers::ALT),
        LGUI | RGUI => Some(Modifiers::SUPER),
        _ => None,
    }
}

/// Human-readable key name.
pub fn name(code: u32) -> String {
    match code {
        A..=Z => char::from(b'A' + (code - A) as u8).to_string(),
        NUM_1..=39 => {
            // 30..=38 are 1..9, 39 is 0
            let digit = (code - NUM_1 + 1) % 10;
            digit.to_string()
        }
        RETURN => "Return".into(),
        ESCAPE => "Escape".into(),
        SPACE => "Space".into(),
        PAGEUP => "PageUp".into(),
        DELETE => "Delete".into(),
        PAGEDOWN => "PageDown".into(),
        RIGHT => "Right".into(),
        LEFT => "Left".into(),
        DOWN => "Down".into(),
        UP => "Up".into(),
        KP_ENTER => "Keypad Enter".into(),
        KP_0 => "Keypad 0".into(),
        KP_PERIOD => "Keypad .".into(),
        LCTRL => "Left Ctrl".into(),
        LSHIFT => "Left Shift".into(),
        LALT => "Left Alt".into(),
        LGUI => "Left Super".into(),
        RCTRL => "Right Ctrl".into(),
        RSHIFT => "Right Shift".into(),
        RALT => "Right Alt".into(),
        RGUI => "Right Super".into(),
        other => format!("Key{}", other),
    }
}
