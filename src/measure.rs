//! Contain-fit of the natural image into its container.

use core::fmt;

use crate::geometry::PixelSize;

/// Sizes observed for one layout pass, with the fitted image derived from
/// them. Immutable: a new observation means a new `Measurement`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Container size in pixels.
    pub container: PixelSize,
    /// Natural (intrinsic) image size in pixels.
    pub natural_image: PixelSize,
    /// Image size after fitting inside the container, aspect ratio preserved.
    pub fitted_image: PixelSize,
    /// Container space left empty right of and below the fitted image.
    pub bottom_right_margin: PixelSize,
}

impl Measurement {
    /// Fit `natural_image` inside `container`, anchored at the top-left.
    ///
    /// One axis of the fitted image matches the container; the other is
    /// smaller or equal, leaving a margin on the right or at the bottom.
    pub fn fit(container: PixelSize, natural_image: PixelSize) -> Self {
        let factor = if container.safe_ratio() < natural_image.safe_ratio() {
            // Image is flatter: widths match, margin at the bottom.
            container.safe_width() / natural_image.safe_width()
        } else {
            container.safe_height() / natural_image.safe_height()
        };
        let fitted_image = natural_image.scaled(factor);
        let bottom_right_margin = PixelSize::new(
            container.width() - fitted_image.width(),
            container.height() - fitted_image.height(),
        );
        Self {
            container,
            natural_image,
            fitted_image,
            bottom_right_margin,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "container={}, fitted={}, margin={}",
            self.container, self.fitted_image, self.bottom_right_margin
        )
    }
}
