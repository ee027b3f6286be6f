//! Pan/zoom transform that frames a region inside a container.
//!
//! All inputs and outputs are in the pixel space of the *fitted* image: the
//! image after it has been contain-fitted into the container, anchored at the
//! top-left, and before any zoom is applied.
//!
//! ```text
//!   fitted image
//!   +--------------------------------------------------+
//!   |                  ^                               |
//!   |                  | origin.y                      |
//!   |          +-------v-----------------+             |
//!   |          | visible (container/k)   |             |
//!   |<-------->|    +-------------+      |             |
//!   | origin.x |    |   region    |      |<----------->|
//!   |          |    +-------------+      |  far inset  |
//!   |          +-------------------------+             |
//!   +--------------------------------------------------+
//! ```
//!
//! Scaling by `factor` around `origin` and translating by `-origin` makes the
//! visible box fill the container; the inset clip hides everything outside it.

use core::fmt;

use crate::geometry::{PixelPosition, PixelSize};
use crate::region::Region;

/// Pan/zoom to apply to the fitted image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation {
    /// Scale origin, and the point translated to the container's top-left.
    pub origin: PixelPosition,
    /// Scale factor. Finite and positive.
    pub factor: f64,
    /// Amount of the fitted image to clip from the left and top.
    pub inset_clip_from_top_left: PixelSize,
    /// Amount of the fitted image to clip from the right and bottom.
    pub inset_clip_from_bottom_right: PixelSize,
}

impl Transformation {
    /// No pan, no zoom, no clip.
    pub const IDENTITY: Self = Self {
        origin: PixelPosition::new(0.0, 0.0),
        factor: 1.0,
        inset_clip_from_top_left: PixelSize::ZERO,
        inset_clip_from_bottom_right: PixelSize::ZERO,
    };
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "origin={}, factor={:.3}, inset_top_left={}, inset_bottom_right={}",
            self.origin,
            self.factor,
            self.inset_clip_from_top_left,
            self.inset_clip_from_bottom_right
        )
    }
}

/// Compute the transform that centers `region` in the container and fills it.
///
/// The region is zoomed until its flatter side matches the container, then
/// centered on the other axis. If centering would pan past an edge of the
/// image (exposing a blank margin), the zoom is reduced until the region's
/// closest edge distance is exactly used up, and the other axis is
/// middle-cropped instead.
///
/// `bottom_right_margin` is added to the far-side clip, for space the
/// contain-fit left empty to the right of or below the fitted image.
pub fn solve(
    region: &Region,
    container: PixelSize,
    fitted_image: PixelSize,
    bottom_right_margin: PixelSize,
) -> Transformation {
    let region_pos = region.position().to_pixels(&fitted_image);
    let region_size = region.size().to_pixels(&fitted_image);

    let region_w = region_size.safe_width();
    let region_h = region_size.safe_height();
    let container_w = container.safe_width();
    let container_h = container.safe_height();

    let x_from_right = fitted_image.width() - region_w - region_pos.x;
    let y_from_bottom = fitted_image.height() - region_h - region_pos.y;

    let (factor, x_offset, y_offset) = if container.safe_ratio() < region_size.safe_ratio() {
        // Region is flatter than the container: match widths, center vertically.
        let axis = fit_axis(
            Axis {
                container: container_w,
                region: region_w,
            },
            Axis {
                container: container_h,
                region: region_h,
            },
            (region_pos.y, y_from_bottom),
        );
        (axis.factor, axis.cross_offset, axis.offset)
    } else {
        let axis = fit_axis(
            Axis {
                container: container_h,
                region: region_h,
            },
            Axis {
                container: container_w,
                region: region_w,
            },
            (region_pos.x, x_from_right),
        );
        (axis.factor, axis.offset, axis.cross_offset)
    };

    let origin = PixelPosition::new(region_pos.x - x_offset, region_pos.y - y_offset);
    Transformation {
        origin,
        factor,
        inset_clip_from_top_left: PixelSize::new(origin.x, origin.y),
        inset_clip_from_bottom_right: PixelSize::new(
            x_from_right - x_offset + bottom_right_margin.width(),
            y_from_bottom - y_offset + bottom_right_margin.height(),
        ),
    }
}

/// Container and region extent along one axis, both positive.
#[derive(Copy, Clone, Debug)]
struct Axis {
    container: f64,
    region: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct AxisFit {
    factor: f64,
    /// Centering offset on the centered axis.
    offset: f64,
    /// Offset on the matched axis: 0 unless blank-margin correction ran.
    cross_offset: f64,
}

/// Match `matched` exactly, center along `centered`, then undo any zoom-out
/// that would pan past the image edges `(near, far)` of the centered axis.
fn fit_axis(matched: Axis, centered: Axis, (near, far): (f64, f64)) -> AxisFit {
    let factor = matched.container / matched.region;
    let offset = centering_offset(centered, factor);

    if offset <= near && offset <= far {
        return AxisFit {
            factor,
            offset,
            cross_offset: 0.0,
        };
    }

    // Not enough image beyond the region to pan into: zoom in until the
    // nearer edge is reached exactly, and middle-crop the matched axis.
    let offset = near.min(far).max(0.0);
    let factor = centered.container / (2.0 * offset + centered.region);
    AxisFit {
        factor,
        offset,
        cross_offset: centering_offset(matched, factor),
    }
}

/// Offset that centers `axis.region` in a container scaled down by `factor`.
fn centering_offset(axis: Axis, factor: f64) -> f64 {
    (axis.container / factor - axis.region) / 2.0
}
