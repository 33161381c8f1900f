//! # Density-Independent Pixels (Dp)
//!
//! Thresholds that describe touch behavior (slop distance, fling velocity)
//! are specified in [`Dp`] so that a gesture feels the same on every screen.
//! They are converted to physical pixels through the global
//! [`SCALE_FACTOR`] at the moment they are used.
//!
//! ```
//! use folio_ui::Dp;
//!
//! let slop = Dp(16.0);
//! assert!(slop.to_pixels_f32() > 0.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The value is the number of physical pixels per dp. When the host never
/// installs one, conversions behave as if it were `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Installs or replaces the global scale factor.
///
/// Non-finite and non-positive values are ignored.
pub fn set_scale_factor(factor: f64) {
    if !factor.is_finite() || factor <= 0.0 {
        tracing::warn!(factor, "ignoring invalid scale factor");
        return;
    }
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(factor));
    *lock.write() = factor;
}

/// Returns the current global scale factor, `1.0` if none was installed.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels.
///
/// `Dp` wraps an `f64` measurement that is scaled by [`SCALE_FACTOR`] when
/// converted to physical pixels. Velocities expressed "per second" reuse the
/// same unit, e.g. `Dp(2500.0)` for 2500 dp/s.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f64);

impl Dp {
    /// Converts to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscaled_conversion_is_identity() {
        // No test in this crate installs a factor, so the default applies.
        assert_eq!(Dp(16.0).to_pixels_f32(), 16.0);
        assert_eq!(Dp(2500.0).to_pixels_f32(), 2500.0);
    }

    #[test]
    fn invalid_factor_is_rejected() {
        set_scale_factor(f64::NAN);
        set_scale_factor(-2.0);
        assert!(SCALE_FACTOR.get().is_none());
    }
}
