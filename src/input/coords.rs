//! Screen to world conversions for picking.

use crate::types::{CameraInfo, Location};
use glam::DVec3;

/// Direction of the ray through a screen point.
///
/// `x` and `y` are normalized screen coordinates in [-1, 1] with +Y up;
/// (0, 0) is the centre of the view.
#[inline]
pub fn pixel_to_direction(camera: &Location, info: &CameraInfo, x: f32, y: f32) -> DVec3 {
    let half_h = (info.fov_y * 0.5).tan();
    let half_w = half_h * info.aspect;
    let dir = camera.forward() + camera.right() * (x as f64 * half_w) + camera.up() * (y as f64 * half_h);
    dir.normalize_or_zero()
}
