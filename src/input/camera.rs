//! Keyboard camera motion, the mouse wheel and pointer drags.
//!
//! Camera keys set a velocity (and optionally a spin) on the camera's root
//! object when pressed and zero it when released, so the camera glides for
//! as long as the key is held.

use super::InteractionController;
use super::bindings::DragMode;
use crate::constants::{STRAFE_MOVE_FACTOR, VERTICAL_MOVE_FACTOR, WHEEL_ZOOM_FACTOR};
use crate::device::{Modifiers, MouseDevice, scancode};
use crate::drag::zoom_in_out;
use crate::events::{AxisEvent, ButtonEvent, EventResponse, MouseDragEvent};
use crate::export::euler::pitch_radians;
use crate::profile_scope;
use crate::types::SimTime;
use glam::DVec3;
use tracing::{debug, info};

/// World up expressed in the frame of an object pitched by `pitch` radians,
/// so spinning about it turns without rolling.
fn yaw_axis(pitch: f64) -> DVec3 {
    DVec3::new(0.0, pitch.cos(), -pitch.sin())
}

impl InteractionController {
    /// Apply a camera key. Number keys pick a speed preset; motion keys
    /// replace the root's velocity and spin.
    pub fn move_camera(&mut self, ev: &ButtonEvent) -> EventResponse {
        let preset = match ev.button {
            scancode::NUM_1 => Some(0),
            scancode::NUM_2 => Some(1),
            scancode::NUM_3 => Some(2),
            _ => None,
        };
        if let Some(idx) = preset {
            if !ev.pressed {
                return EventResponse::NotHandled;
            }
            self.camera_speed = self.speed_presets[idx];
            info!(speed = self.camera_speed, "camera speed preset");
            return EventResponse::Handled;
        }

        let now = ev.time;
        let mut scene = self.scene.borrow_mut();
        let root = scene.root_of(self.camera);
        let Some(mut loc) = scene.extrapolate_location(root, now) else {
            return EventResponse::NotHandled;
        };
        let orient = loc.orientation;
        let forward = loc.forward();
        let right = orient * DVec3::X;
        let ws = self.world_scale;
        let speed = self.camera_speed;
        let mods = ev.modifiers;
        let shift = mods.contains(Modifiers::SHIFT);
        let ctrl = mods.contains(Modifiers::CTRL);
        let alt = mods.contains(Modifiers::ALT);
        let mut amount = if ev.pressed { 1.0 } else { 0.0 };

        match ev.button {
            scancode::W | scancode::S => {
                if ev.button == scancode::S {
                    amount = -amount;
                }
                loc.velocity = forward * amount * speed * ws;
                loc.angular_speed = 0.0;
            }
            scancode::A | scancode::D => {
                if ev.button == scancode::A {
                    amount = -amount;
                }
                loc.velocity = right * amount * speed * ws;
                loc.angular_speed = 0.0;
            }
            scancode::UP | scancode::DOWN => {
                if ev.button == scancode::DOWN {
                    amount = -amount;
                }
                let mut spin = 0.0;
                if shift {
                    // look up, or down with CTRL
                    loc.axis_of_rotation = DVec3::X;
                    spin = if ctrl { -amount } else { amount };
                    loc.velocity = DVec3::ZERO;
                } else {
                    if ctrl || alt {
                        // turn while walking
                        loc.axis_of_rotation = yaw_axis(pitch_radians(orient));
                        spin = if alt { -amount } else { amount };
                    } else {
                        amount *= speed;
                    }
                    loc.velocity = forward * amount * ws;
                }
                loc.angular_speed = spin;
            }
            scancode::PAGEUP | scancode::PAGEDOWN => {
                if ev.button == scancode::PAGEDOWN {
                    amount = -amount;
                }
                loc.velocity = DVec3::Y * amount * VERTICAL_MOVE_FACTOR * ws;
                loc.angular_speed = 0.0;
            }
            scancode::LEFT | scancode::RIGHT => {
                if ev.button == scancode::RIGHT {
                    amount = -amount;
                }
                if shift {
                    loc.axis_of_rotation = yaw_axis(pitch_radians(orient));
                    loc.angular_speed = amount;
                    loc.velocity = DVec3::ZERO;
                } else {
                    loc.velocity = right * amount * ws * -STRAFE_MOVE_FACTOR * speed;
                    loc.angular_speed = 0.0;
                }
            }
            other => {
                debug!(key = %scancode::name(other), "not a camera key");
                return EventResponse::NotHandled;
            }
        }

        match scene.reset_position_velocity(root, now, loc) {
            Ok(()) => EventResponse::Handled,
            Err(_) => EventResponse::NotHandled,
        }
    }

    /// Vertical wheel motion zooms toward the selection.
    pub fn wheel(&mut self, ev: &AxisEvent) -> EventResponse {
        if ev.axis != MouseDevice::WHEELY {
            return EventResponse::NotHandled;
        }
        let amount = ev.value.centered() as f64 * WHEEL_ZOOM_FACTOR;
        if amount == 0.0 {
            return EventResponse::NotHandled;
        }
        let selected = self.selection.ids();
        let mut scene = self.scene.borrow_mut();
        let moved = zoom_in_out(
            &mut scene,
            self.camera,
            &selected,
            amount,
            ev.time,
            self.world_scale,
        );
        EventResponse::from_changed(moved)
    }

    /// Route a drag sample to the session bound to its button.
    pub fn do_drag(&mut self, ev: &MouseDragEvent) -> EventResponse {
        profile_scope!("do_drag");

        let selected = self.selection.ids();
        let mut scene = self.scene.borrow_mut();
        let consumed = self
            .drags
            .dispatch(&mut scene, ev, self.camera, &selected, self.world_scale);
        EventResponse::from_changed(consumed)
    }

    /// Choose what a button 1 drag does.
    pub fn set_drag_mode(&mut self, mode: DragMode, now: SimTime) -> EventResponse {
        self.drags
            .bindings_mut()
            .bind(MouseDevice::LEFT, mode.action_name());
        if mode == DragMode::Select {
            self.clear_selection(now);
        }
        info!(?mode, "drag mode");
        EventResponse::Handled
    }
}
