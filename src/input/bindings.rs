//! Keyboard bindings.
//!
//! Every keyboard gets the whole table when it is plugged in. Modifier
//! masks must match exactly, so SHIFT+UP and SHIFT+CTRL+UP are separate
//! entries. Release entries see the modifiers that were held at press time.

use crate::device::Modifiers;
use crate::device::scancode::*;

/// Button 1 drag behaviour selected from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Unbind button 1 and drop the selection
    Select,
    MoveObject,
    RotateObject,
    ScaleObject,
    RotateCamera,
    PanCamera,
}

impl DragMode {
    /// Registry name of the drag action, if the mode binds one.
    pub fn action_name(self) -> Option<&'static str> {
        match self {
            DragMode::Select => None,
            DragMode::MoveObject => Some("moveObject"),
            DragMode::RotateObject => Some("rotateObject"),
            DragMode::ScaleObject => Some("scaleObject"),
            DragMode::RotateCamera => Some("rotateCamera"),
            DragMode::PanCamera => Some("panCamera"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Camera motion and speed presets
    MoveCamera,
    Group,
    Ungroup,
    Delete,
    Clone,
    EnterGroup,
    LeaveGroup,
    CreateLight,
    ImportScene,
    SaveScene,
    DragMode(DragMode),
    TogglePhysics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: u32,
    pub modifiers: Modifiers,
    pub on_release: bool,
    pub action: KeyAction,
}

const fn press(code: u32, modifiers: Modifiers, action: KeyAction) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        on_release: false,
        action,
    }
}

const fn release(code: u32, modifiers: Modifiers, action: KeyAction) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        on_release: true,
        action,
    }
}

const NONE: Modifiers = Modifiers::NONE;
const SHIFT: Modifiers = Modifiers::SHIFT;
const CTRL: Modifiers = Modifiers::CTRL;
const ALT: Modifiers = Modifiers::ALT;
const SHIFT_CTRL: Modifiers = Modifiers::SHIFT.union(Modifiers::CTRL);

const MOVE: KeyAction = KeyAction::MoveCamera;

pub const KEY_BINDINGS: &[KeyBinding] = &[
    press(NUM_1, NONE, MOVE),
    press(NUM_2, NONE, MOVE),
    press(NUM_3, NONE, MOVE),
    press(G, NONE, KeyAction::Group),
    press(G, ALT, KeyAction::Ungroup),
    press(DELETE, NONE, KeyAction::Delete),
    press(KP_PERIOD, NONE, KeyAction::Delete),
    press(V, CTRL, KeyAction::Clone),
    press(D, NONE, KeyAction::Clone),
    press(KP_ENTER, NONE, KeyAction::EnterGroup),
    press(RETURN, NONE, KeyAction::EnterGroup),
    press(KP_0, NONE, KeyAction::LeaveGroup),
    press(ESCAPE, NONE, KeyAction::LeaveGroup),
    press(B, NONE, KeyAction::CreateLight),
    // vertical
    press(PAGEUP, NONE, MOVE),
    release(PAGEUP, NONE, MOVE),
    press(PAGEDOWN, NONE, MOVE),
    release(PAGEDOWN, NONE, MOVE),
    // walk and strafe
    press(W, SHIFT, MOVE),
    press(A, SHIFT, MOVE),
    press(S, SHIFT, MOVE),
    press(D, SHIFT, MOVE),
    release(W, SHIFT, MOVE),
    release(A, SHIFT, MOVE),
    release(S, SHIFT, MOVE),
    release(D, SHIFT, MOVE),
    // arrows
    press(UP, NONE, MOVE),
    release(UP, NONE, MOVE),
    press(UP, SHIFT, MOVE),
    release(UP, SHIFT, MOVE),
    press(UP, SHIFT_CTRL, MOVE),
    release(UP, SHIFT_CTRL, MOVE),
    press(UP, ALT, MOVE),
    release(UP, ALT, MOVE),
    press(UP, CTRL, MOVE),
    release(UP, CTRL, MOVE),
    press(DOWN, NONE, MOVE),
    release(DOWN, NONE, MOVE),
    press(DOWN, SHIFT, MOVE),
    release(DOWN, SHIFT, MOVE),
    press(LEFT, NONE, MOVE),
    release(LEFT, NONE, MOVE),
    press(LEFT, SHIFT, MOVE),
    release(LEFT, SHIFT, MOVE),
    press(RIGHT, NONE, MOVE),
    release(RIGHT, NONE, MOVE),
    press(RIGHT, SHIFT, MOVE),
    release(RIGHT, SHIFT, MOVE),
    // scene files
    press(O, CTRL, KeyAction::ImportScene),
    press(S, CTRL, KeyAction::SaveScene),
    // button 1 modes
    press(Q, NONE, KeyAction::DragMode(DragMode::Select)),
    press(W, NONE, KeyAction::DragMode(DragMode::MoveObject)),
    press(E, NONE, KeyAction::DragMode(DragMode::RotateObject)),
    press(R, NONE, KeyAction::DragMode(DragMode::ScaleObject)),
    press(T, NONE, KeyAction::DragMode(DragMode::RotateCamera)),
    press(Y, NONE, KeyAction::DragMode(DragMode::PanCamera)),
    press(P, NONE, KeyAction::TogglePhysics),
];
