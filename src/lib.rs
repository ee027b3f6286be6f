//! Region-of-interest framing for responsive images.
//!
//! Shows a single source image in containers of any aspect ratio while
//! keeping a chosen region fully visible and centered, with no blank margins
//! and no distortion. Pure geometry: no I/O, no timers, no rendering.
//!
//! # Modules
//!
//! - [`geometry`]: Pixel and relative sizes/positions, safe division, ratio difference
//! - [`region`]: Regions, shapes, region sets, and the whole-image sentinel
//! - [`descriptor`]: Untyped region descriptors and JSON region lists
//! - [`normalize`]: Descriptor validation into relative-space regions
//! - [`select`]: Best-fitting region for a container
//! - [`solve`]: Scale, origin, and clip insets for a region
//! - [`measure`]: Contain-fit of the natural image into the container
//! - [`framer`]: Recompute-on-demand driver with change detection
//!
//! # Example
//!
//! ```
//! use zenframe::{PixelSize, RegionDescriptor, normalize_all, select_best_region, solve};
//!
//! let descriptors = [RegionDescriptor::pixel(
//!     "face",
//!     (1000.0, 1000.0),
//!     100.0,
//!     100.0,
//!     200.0,
//!     200.0,
//! )];
//! let regions = normalize_all(&descriptors).regions;
//!
//! let container = PixelSize::new(100.0, 400.0);
//! let fitted = PixelSize::new(1000.0, 1000.0);
//! let region = select_best_region(container, fitted, &regions, Some("face"));
//! let t = solve(region, container, fitted, PixelSize::ZERO);
//!
//! assert_eq!(region.id(), "face");
//! assert!(t.factor > 0.0);
//! ```

#![forbid(unsafe_code)]

pub mod descriptor;
pub mod framer;
pub mod geometry;
pub mod measure;
pub mod normalize;
pub mod region;
pub mod select;
pub mod solve;

// Re-exports: core types and the pure entry points
pub use descriptor::{DescriptorError, RegionDescriptor, parse_region_list};
pub use framer::{Framer, FramerConfig, Framing};
pub use geometry::{
    PixelPosition, PixelSize, RelativePosition, RelativeRect, RelativeSize, ratio_diff_factor,
};
pub use measure::Measurement;
pub use normalize::{NormalizeResult, RegionError, SkippedRegion, Unit, normalize, normalize_all};
pub use region::{ORIGINAL_IMAGE, ORIGINAL_IMAGE_ID, Region, RegionSet, Shape};
pub use select::{
    DEFAULT_RATIO_THRESHOLD, SelectOptions, select_best_region, select_best_region_with,
};
pub use solve::{Transformation, solve};
