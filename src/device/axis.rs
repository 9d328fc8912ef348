//! Normalized axis values.

use serde::{Deserialize, Serialize};

/// A device axis reading, nominally in [-1, 1] with 0 at rest.
///
/// Equality is exact: values come from discrete device samples, so two
/// readings are the same only if they compare equal as floats.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct AxisValue(f32);

impl AxisValue {
    pub const fn from_centered(value: f32) -> Self {
        Self(value)
    }

    /// Convert from the [0, 1] representation used by sliders and triggers.
    pub fn from_01(value: f32) -> Self {
        Self((value - 0.5) * 2.0)
    }

    pub const fn null() -> Self {
        Self(0.0)
    }

    #[inline]
    pub fn centered(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn to_01(self) -> f32 {
        (self.0 + 1.0) / 2.0
    }

    /// Clamp into [-1, 1]. Values already in range are returned unchanged.
    pub fn clip(self) -> Self {
        if self.0 > 1.0 {
            Self(1.0)
        } else if self.0 < -1.0 {
            Self(-1.0)
        } else {
            self
        }
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Bitwise identity, used for change detection.
    pub(crate) fn same_bits(self, other: AxisValue) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}
