//! Stateful driver for hosts that observe sizes and region lists over time.
//!
//! A [`Framer`] holds the last observed inputs and recomputes on demand. It
//! does not care whether the host polls on a timer or reacts to resize and
//! attribute events; both end up calling the same methods.
//!
//! ```
//! use zenframe::{Framer, PixelSize};
//!
//! let mut framer = Framer::default();
//! framer.set_regions_json(
//!     r#"[{"id": "face", "x": 0.4, "y": 0.1, "width": 0.2, "height": 0.3}]"#,
//! );
//! framer.observe_natural_image(PixelSize::new(4000.0, 2000.0));
//! framer.observe_container(PixelSize::new(300.0, 600.0));
//!
//! let framing = framer.recompute().expect("sizes are known");
//! assert_eq!(framing.region_id, "face");
//! assert!(framing.transformation.factor > 1.0);
//! ```

use tracing::{debug, warn};

use crate::descriptor::{RegionDescriptor, parse_region_list};
use crate::geometry::PixelSize;
use crate::measure::Measurement;
use crate::normalize::{SkippedRegion, normalize_all};
use crate::region::RegionSet;
use crate::select::{SelectOptions, select_best_region_with};
use crate::solve::{Transformation, solve};

/// Configuration for a [`Framer`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramerConfig {
    /// Label attached to every log event, e.g. the host element id.
    pub label: String,
    /// Region selection tuning.
    pub select: SelectOptions,
}

impl FramerConfig {
    /// Set the log label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the selection options.
    pub fn select(mut self, select: SelectOptions) -> Self {
        self.select = select;
        self
    }
}

/// Result of a recompute: which region is framed, and how.
#[derive(Clone, Debug, PartialEq)]
pub struct Framing {
    /// Id of the framed region ([`ORIGINAL_IMAGE_ID`](crate::ORIGINAL_IMAGE_ID)
    /// for the whole image).
    pub region_id: String,
    /// Transform to apply to the fitted image.
    pub transformation: Transformation,
    /// Measurement the transform was computed from.
    pub measurement: Measurement,
}

/// Last known inputs for one displayed image.
#[derive(Clone, Debug, Default)]
pub struct Framer {
    config: FramerConfig,
    regions: RegionSet,
    forced_region_id: Option<String>,
    container: Option<PixelSize>,
    natural_image: Option<PixelSize>,
}

impl Framer {
    /// Framer with the given configuration and no observations yet.
    pub fn new(config: FramerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Change the log label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.config.label = label.into();
    }

    /// Current region set.
    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// Replace the region set. Returns the descriptors that were dropped.
    pub fn set_regions<'a, I>(&mut self, descriptors: I) -> Vec<SkippedRegion>
    where
        I: IntoIterator<Item = &'a RegionDescriptor>,
    {
        let label = self.config.label.as_str();
        debug!(label, "populating image regions");
        let result = normalize_all(descriptors);
        self.regions = result.regions;
        result.skipped
    }

    /// Replace the region set from a JSON array.
    ///
    /// A document that isn't a JSON array clears the region set.
    pub fn set_regions_json(&mut self, json: &str) -> Vec<SkippedRegion> {
        match parse_region_list(json) {
            Ok(descriptors) => self.set_regions(&descriptors),
            Err(error) => {
                warn!(label = self.config.label.as_str(), %error, "invalid image region list");
                self.regions = RegionSet::new();
                Vec::new()
            }
        }
    }

    /// Force a region by id, or return to automatic selection with `None`.
    pub fn set_forced_region_id(&mut self, id: Option<String>) {
        self.forced_region_id = id.filter(|id| !id.is_empty());
    }

    /// Currently forced region id.
    pub fn forced_region_id(&self) -> Option<&str> {
        self.forced_region_id.as_deref()
    }

    /// Record the container size. Returns `true` if it changed.
    pub fn observe_container(&mut self, size: PixelSize) -> bool {
        let changed = replace_if_different(&mut self.container, size);
        if changed {
            debug!(label = self.config.label.as_str(), %size, "container size");
        }
        changed
    }

    /// Record the natural image size. Returns `true` if it changed.
    pub fn observe_natural_image(&mut self, size: PixelSize) -> bool {
        let changed = replace_if_different(&mut self.natural_image, size);
        if changed {
            debug!(label = self.config.label.as_str(), %size, "natural image size");
        }
        changed
    }

    /// Forget the natural image size, e.g. while a new source loads.
    pub fn clear_natural_image(&mut self) {
        self.natural_image = None;
    }

    /// Current measurement, or `None` while either size is unknown.
    pub fn measurement(&self) -> Option<Measurement> {
        Some(Measurement::fit(self.container?, self.natural_image?))
    }

    /// Select the best region for the current measurement and solve for it.
    ///
    /// Returns `None`, without error, while a size is still unknown; call
    /// again once it has been observed.
    pub fn recompute(&self) -> Option<Framing> {
        let label = self.config.label.as_str();
        let Some(measurement) = self.measurement() else {
            debug!(label, "image size unknown, deferring");
            return None;
        };
        debug!(label, %measurement, "panning and zooming to best fitting region");

        let region = select_best_region_with(
            &self.config.select,
            measurement.container,
            measurement.fitted_image,
            &self.regions,
            self.forced_region_id.as_deref(),
        );
        let transformation = solve(
            region,
            measurement.container,
            measurement.fitted_image,
            measurement.bottom_right_margin,
        );
        debug!(label, id = region.id(), %transformation, "framed region");

        Some(Framing {
            region_id: region.id().to_owned(),
            transformation,
            measurement,
        })
    }
}

fn replace_if_different(slot: &mut Option<PixelSize>, size: PixelSize) -> bool {
    if *slot == Some(size) {
        return false;
    }
    *slot = Some(size);
    true
}
