//! Physical pixel coordinates.
//!
//! Scroll positions, page widths and margins are tracked in whole physical
//! pixels. Fractional drag motion is carried by the caller and only the
//! integral part ends up in a [`Px`].
//!
//! # Key Types
//!
//! - [`Px`] - a single coordinate value, negative values allowed
//! - [`PxSize`] - a 2D size
//! - [`PxRect`] - an axis-aligned rectangle
//!
//! ```
//! use folio_ui::px::{Px, PxRect};
//!
//! let unit = Px(1080) + Px(16);
//! let page = PxRect::new(unit.saturating_mul_usize(3), Px::ZERO, Px(1080), Px(1920));
//! assert_eq!(page.x, Px(3288));
//! ```

/// A physical pixel coordinate value.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns the magnitude as a `u32`.
    pub fn abs(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Returns the value as `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Truncates an `f32` toward zero.
    ///
    /// Out-of-range and NaN inputs follow Rust's saturating float cast.
    pub fn from_f32(value: f32) -> Self {
        Px(value as i32)
    }

    /// Rounds an `f32` to the nearest pixel, saturating at the `i32` bounds.
    pub fn saturating_from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Px::ZERO;
        }
        let rounded = value.round();
        if rounded >= i32::MAX as f32 {
            Px(i32::MAX)
        } else if rounded <= i32::MIN as f32 {
            Px(i32::MIN)
        } else {
            Px(rounded as i32)
        }
    }

    /// Multiplies by a count, saturating at the `i32` bounds.
    pub fn saturating_mul_usize(self, times: usize) -> Self {
        let times = i32::try_from(times).unwrap_or(i32::MAX);
        Px(self.0.saturating_mul(times))
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxSize {
    /// Width.
    pub width: Px,
    /// Height.
    pub height: Px,
}

impl PxSize {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxRect {
    /// Left edge.
    pub x: Px,
    /// Top edge.
    pub y: Px,
    /// Width.
    pub width: Px,
    /// Height.
    pub height: Px,
}

impl PxRect {
    /// Creates a rectangle from its left/top corner and extent.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl std::ops::Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl std::ops::Rem for Px {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Px(self.0 % rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(4);
        assert_eq!(a + b, Px(14));
        assert_eq!(a - b, Px(6));
        assert_eq!(a % b, Px(2));
        assert_eq!(Px(-7).abs(), 7);
    }

    #[test]
    fn test_px_saturating_arithmetic() {
        assert_eq!(Px(300).saturating_mul_usize(3), Px(900));
        assert_eq!(Px(1000).saturating_mul_usize(usize::MAX), Px::MAX);
    }

    #[test]
    fn test_px_float_conversion() {
        assert_eq!(Px::from_f32(12.9), Px(12));
        assert_eq!(Px::from_f32(-12.9), Px(-12));
        assert_eq!(Px::saturating_from_f32(12.5), Px(13));
        assert_eq!(Px::saturating_from_f32(f32::INFINITY), Px::MAX);
        assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
    }
}
