//! Regions of interest within an image.

use std::borrow::Cow;
use std::fmt;

use crate::geometry::{RelativePosition, RelativeRect, RelativeSize};

/// Id reserved for [`ORIGINAL_IMAGE`].
pub const ORIGINAL_IMAGE_ID: &str = "<no region>";

/// The whole image, meaning "do not crop".
///
/// Always available to selection, even when a region set is empty, and
/// selectable by [`ORIGINAL_IMAGE_ID`].
pub static ORIGINAL_IMAGE: Region = Region {
    id: Cow::Borrowed(ORIGINAL_IMAGE_ID),
    shape: Shape::Rectangle(RelativeRect::FULL),
};

/// Geometric shape of a region, in relative coordinates.
///
/// Selection and solving only look at [`bounding_box`](Self::bounding_box),
/// so new shapes only need to provide one.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rectangle(RelativeRect),
}

impl Shape {
    /// Smallest rectangle containing the shape.
    pub fn bounding_box(&self) -> RelativeRect {
        match *self {
            Self::Rectangle(rect) => rect,
        }
    }
}

/// A validated region of interest.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    id: Cow<'static, str>,
    shape: Shape,
}

impl Region {
    /// Rectangular region. The rectangle is trimmed to stay inside the image.
    pub fn rectangle(
        id: impl Into<String>,
        position: RelativePosition,
        size: RelativeSize,
    ) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            shape: Shape::Rectangle(RelativeRect::within_unit(position, size)),
        }
    }

    /// Region id, unique within a [`RegionSet`].
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The region's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Top-left corner of the bounding box.
    pub fn position(&self) -> RelativePosition {
        self.shape.bounding_box().position
    }

    /// Size of the bounding box.
    pub fn size(&self) -> RelativeSize {
        self.shape.bounding_box().size
    }

    /// Whether this is the whole-image sentinel.
    pub fn is_original_image(&self) -> bool {
        self.id == ORIGINAL_IMAGE_ID
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, position={}, size={}",
            self.id,
            self.position(),
            self.size()
        )
    }
}

/// Ordered list of regions for one image. Order is the selection tie-break.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Append a region.
    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Look up a region by id. The sentinel id resolves to [`ORIGINAL_IMAGE`].
    pub fn find(&self, id: &str) -> Option<&Region> {
        if id == ORIGINAL_IMAGE_ID {
            return Some(&ORIGINAL_IMAGE);
        }
        self.regions.iter().find(|r| r.id() == id)
    }

    /// Regions in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Number of regions, not counting the sentinel.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions as a slice.
    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = core::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
