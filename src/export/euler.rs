//! Euler angle conversion for the scene file.
//!
//! Angles are degrees: pitch about X, yaw about Y, roll about Z. Near
//! ±90° pitch the decomposition becomes ambiguous, so such orientations are
//! reported as unrepresentable and written as raw quaternions instead.

use crate::constants::EULER_PITCH_LIMIT_DEG;
use glam::{DQuat, EulerRot};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Decompose `q` into Euler degrees, or `None` if the pitch magnitude
/// exceeds the export limit (or is not a number).
pub fn quat_to_euler(q: DQuat) -> Option<EulerAngles> {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    let pitch = (2.0 * (w * x - y * z)).clamp(-1.0, 1.0).asin().to_degrees();
    let yaw = (2.0 * (w * y + z * x))
        .atan2(1.0 - 2.0 * (x * x + y * y))
        .to_degrees();
    let roll = (2.0 * (w * z + x * y))
        .atan2(1.0 - 2.0 * (z * z + x * x))
        .to_degrees();
    if pitch.is_nan() || pitch.abs() > EULER_PITCH_LIMIT_DEG {
        return None;
    }
    Some(EulerAngles { pitch, yaw, roll })
}

/// Inverse of [`quat_to_euler`]: yaw, then pitch, then roll.
pub fn euler_to_quat(angles: EulerAngles) -> DQuat {
    DQuat::from_euler(
        EulerRot::YXZ,
        angles.yaw.to_radians(),
        angles.pitch.to_radians(),
        angles.roll.to_radians(),
    )
}

/// Pitch of `q` in radians, for computing turn axes.
pub fn pitch_radians(q: DQuat) -> f64 {
    (2.0 * (q.w * q.x - q.y * q.z)).clamp(-1.0, 1.0).asin()
}
