//! Sizes and positions in pixel space and in image-relative space.
//!
//! Pixel values are `f64` because every quantity here is derived from a
//! scaled measurement. Relative values are fractions of a base size and are
//! always kept inside `0.0..=1.0`.

use core::fmt;

use num_traits::ToPrimitive;

/// Floor applied by the `safe_*` accessors, so every division is defined.
pub const SAFE_FLOOR: f64 = 1.0;

/// Width × height in pixels. Never negative.
///
/// A size that has not been measured yet is represented as
/// `Option<PixelSize>::None` by whoever holds it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelSize {
    width: f64,
    height: f64,
}

impl PixelSize {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size. Negative and non-finite values become 0.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Create a size from any primitive measurement (e.g. integer layout
    /// dimensions). Returns `None` when a value doesn't fit in an `f64`.
    pub fn from_measured<T: ToPrimitive>(width: T, height: T) -> Option<Self> {
        Some(Self::new(width.to_f64()?, height.to_f64()?))
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width floored at [`SAFE_FLOOR`]; always safe to divide by.
    pub fn safe_width(&self) -> f64 {
        self.width.max(SAFE_FLOOR)
    }

    /// Height floored at [`SAFE_FLOOR`]; always safe to divide by.
    pub fn safe_height(&self) -> f64 {
        self.height.max(SAFE_FLOOR)
    }

    /// Width / height using the safe accessors. Finite and positive.
    pub fn safe_ratio(&self) -> f64 {
        self.safe_width() / self.safe_height()
    }

    /// This size multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// How different the aspect ratios of `self` and `other` are.
    ///
    /// Returns the factor `>= 1` by which the smaller ratio must be
    /// multiplied to obtain the larger one. Symmetric, and exactly 1 for
    /// identical ratios.
    pub fn ratio_diff_factor(&self, other: &Self) -> f64 {
        ratio_diff_factor(self.safe_ratio(), other.safe_ratio())
    }

    /// Express this size as a fraction of `base`.
    pub fn to_relative(&self, base: &Self) -> RelativeSize {
        RelativeSize::new(
            self.width / base.safe_width(),
            self.height / base.safe_height(),
        )
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{width={:.3}px, height={:.3}px}}",
            self.width, self.height
        )
    }
}

/// Point or offset in pixels. May be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelPosition {
    /// Horizontal coordinate in pixels.
    pub x: f64,
    /// Vertical coordinate in pixels.
    pub y: f64,
}

impl PixelPosition {
    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Express this position as a fraction of `base`.
    pub fn to_relative(&self, base: &PixelSize) -> RelativePosition {
        RelativePosition::new(self.x / base.safe_width(), self.y / base.safe_height())
    }
}

impl fmt::Display for PixelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x={:.3}px, y={:.3}px}}", self.x, self.y)
    }
}

/// Position as a fraction of a base size, each axis in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RelativePosition {
    x: f64,
    y: f64,
}

impl RelativePosition {
    /// The top-left corner.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a position, clamping both axes into `0.0..=1.0`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: unit_clamp(x),
            y: unit_clamp(y),
        }
    }

    /// Horizontal fraction.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical fraction.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Resolve against a base size in pixels.
    pub fn to_pixels(&self, base: &PixelSize) -> PixelPosition {
        PixelPosition::new(self.x * base.width(), self.y * base.height())
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x={:.3}, y={:.3}}}", self.x, self.y)
    }
}

/// Size as a fraction of a base size, each axis in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RelativeSize {
    width: f64,
    height: f64,
}

impl RelativeSize {
    /// The whole base size.
    pub const FULL: Self = Self {
        width: 1.0,
        height: 1.0,
    };

    /// Create a size, clamping both axes into `0.0..=1.0`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: unit_clamp(width),
            height: unit_clamp(height),
        }
    }

    /// Horizontal fraction.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical fraction.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resolve against a base size in pixels.
    pub fn to_pixels(&self, base: &PixelSize) -> PixelSize {
        PixelSize::new(self.width * base.width(), self.height * base.height())
    }
}

impl fmt::Display for RelativeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{width={:.3}, height={:.3}}}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in relative coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelativeRect {
    /// Top-left corner.
    pub position: RelativePosition,
    /// Extent from the top-left corner.
    pub size: RelativeSize,
}

impl RelativeRect {
    /// The unit square: the whole image.
    pub const FULL: Self = Self {
        position: RelativePosition::ORIGIN,
        size: RelativeSize::FULL,
    };

    /// Create a rect, shrinking the size so the rect stays inside the unit
    /// square.
    pub fn within_unit(position: RelativePosition, size: RelativeSize) -> Self {
        let size = RelativeSize::new(
            size.width().min(1.0 - position.x()),
            size.height().min(1.0 - position.y()),
        );
        Self { position, size }
    }

    /// Whether the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.width() <= 0.0 || self.size.height() <= 0.0
    }
}

/// Symmetric ratio difference: `max(a, b) / min(a, b)`.
///
/// Both inputs must be positive; the result is `>= 1`.
pub fn ratio_diff_factor(a: f64, b: f64) -> f64 {
    if a >= b { a / b } else { b / a }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn unit_clamp(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
