//! Descriptor validation and conversion into relative-space regions.
//!
//! Invalid descriptors never abort a batch: [`normalize_all`] drops them,
//! logs why, and reports them alongside the regions it kept.

use serde_json::Value;
use tracing::{debug, warn};

use crate::descriptor::{RegionDescriptor, field_is_set, field_keyword, field_number};
use crate::geometry::{PixelPosition, PixelSize, RelativePosition, RelativeRect, RelativeSize};
use crate::region::{ORIGINAL_IMAGE_ID, Region, RegionSet};

/// Why a descriptor was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegionError {
    /// `shape` is present but isn't `rectangle`.
    #[error("unknown shape {0:?}")]
    UnknownShape(String),
    /// `unit` is neither `relative` nor `pixel`, or can't be inferred.
    #[error("unknown unit {0:?}")]
    UnknownUnit(Option<String>),
    /// Pixel unit without `imageWidth` and `imageHeight`.
    #[error("missing imageWidth or imageHeight")]
    MissingImageSize,
    /// One of `x`, `y`, `width`, `height` is absent.
    #[error("missing x, y, width or height")]
    MissingCoordinates,
    /// A geometry field doesn't parse as a finite number.
    #[error("non-numeric {field}")]
    NonNumeric {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Negative position or non-positive size.
    #[error("negative/zero x, y, width or height")]
    OutOfRange,
    /// The rectangle lies entirely outside the image.
    #[error("region lies outside the image")]
    OutOfBounds,
    /// The id is the one reserved for the whole image.
    #[error("id \"<no region>\" is reserved")]
    ReservedId,
}

impl RegionError {
    /// Unsupported-but-well-formed input is expected (a newer shape, say);
    /// everything else points at a broken descriptor.
    fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnknownShape(_) | Self::UnknownUnit(_))
    }
}

/// Coordinate unit of a descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Fractions of the image size.
    Relative,
    /// Pixels of an image whose size is given alongside.
    Pixel,
}

/// A descriptor that [`normalize_all`] dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRegion {
    /// Id given by the descriptor, if any.
    pub id: Option<String>,
    /// Why it was dropped.
    pub error: RegionError,
}

/// Result of normalizing a descriptor list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeResult {
    /// Valid regions, in descriptor order.
    pub regions: RegionSet,
    /// Dropped descriptors, in descriptor order.
    pub skipped: Vec<SkippedRegion>,
}

/// Validate one descriptor and express it in relative coordinates.
///
/// Descriptors without an id get a fresh UUID.
pub fn normalize(descriptor: &RegionDescriptor) -> Result<Region, RegionError> {
    check_shape(descriptor.shape.as_ref())?;
    let unit = resolve_unit(descriptor)?;

    let base = match unit {
        Unit::Pixel => {
            let (Some(w), Some(h)) = (&descriptor.image_width, &descriptor.image_height) else {
                return Err(RegionError::MissingImageSize);
            };
            Some(PixelSize::new(
                number(w, "imageWidth")?,
                number(h, "imageHeight")?,
            ))
        }
        Unit::Relative => None,
    };

    let (Some(x), Some(y), Some(width), Some(height)) = (
        &descriptor.x,
        &descriptor.y,
        &descriptor.width,
        &descriptor.height,
    ) else {
        return Err(RegionError::MissingCoordinates);
    };
    let x = number(x, "x")?;
    let y = number(y, "y")?;
    let width = number(width, "width")?;
    let height = number(height, "height")?;

    if x < 0.0 || y < 0.0 || width <= 0.0 || height <= 0.0 {
        return Err(RegionError::OutOfRange);
    }

    let (position, size) = match base {
        Some(base) => (
            PixelPosition::new(x, y).to_relative(&base),
            PixelSize::new(width, height).to_relative(&base),
        ),
        None => (
            RelativePosition::new(x, y),
            RelativeSize::new(width, height),
        ),
    };
    if RelativeRect::within_unit(position, size).is_empty() {
        return Err(RegionError::OutOfBounds);
    }

    let id = match descriptor.id_text() {
        Some(id) if id == ORIGINAL_IMAGE_ID => return Err(RegionError::ReservedId),
        Some(id) => id,
        None => uuid::Uuid::new_v4().to_string(),
    };
    Ok(Region::rectangle(id, position, size))
}

/// Normalize every descriptor, keeping the valid ones in order.
pub fn normalize_all<'a, I>(descriptors: I) -> NormalizeResult
where
    I: IntoIterator<Item = &'a RegionDescriptor>,
{
    let mut result = NormalizeResult::default();
    for descriptor in descriptors {
        match normalize(descriptor) {
            Ok(region) => {
                debug!(%region, "rectangle region found");
                result.regions.push(region);
            }
            Err(error) => {
                let id = descriptor.id_text();
                if error.is_unsupported() {
                    debug!(id = id.as_deref(), %error, "skipping region");
                } else {
                    warn!(id = id.as_deref(), %error, "skipping region");
                }
                result.skipped.push(SkippedRegion { id, error });
            }
        }
    }
    if result.regions.is_empty() {
        debug!("no rectangle image region found");
    }
    result
}

fn check_shape(shape: Option<&Value>) -> Result<(), RegionError> {
    let Some(shape) = shape.filter(|&v| field_is_set(Some(v))) else {
        return Ok(());
    };
    match field_keyword(shape) {
        Some(name) if name == "rectangle" => Ok(()),
        Some(name) => Err(RegionError::UnknownShape(name)),
        None => Err(RegionError::UnknownShape(shape.to_string())),
    }
}

fn resolve_unit(descriptor: &RegionDescriptor) -> Result<Unit, RegionError> {
    if let Some(unit) = descriptor.unit.as_ref().filter(|&v| field_is_set(Some(v))) {
        return match field_keyword(unit).as_deref() {
            Some("relative") => Ok(Unit::Relative),
            Some("pixel") => Ok(Unit::Pixel),
            Some(other) => Err(RegionError::UnknownUnit(Some(other.to_owned()))),
            None => Err(RegionError::UnknownUnit(Some(unit.to_string()))),
        };
    }
    let has_width = field_is_set(descriptor.image_width.as_ref());
    let has_height = field_is_set(descriptor.image_height.as_ref());
    match (has_width, has_height) {
        (true, true) => Ok(Unit::Pixel),
        (false, false) => Ok(Unit::Relative),
        _ => Err(RegionError::UnknownUnit(None)),
    }
}

fn number(value: &Value, field: &'static str) -> Result<f64, RegionError> {
    field_number(value).ok_or(RegionError::NonNumeric { field })
}
