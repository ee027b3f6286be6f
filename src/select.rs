//! Choosing the region that best matches a container's aspect ratio.

use tracing::debug;

use crate::geometry::PixelSize;
use crate::region::{ORIGINAL_IMAGE, Region, RegionSet};

/// Ratio difference below which cropping is not worth it.
pub const DEFAULT_RATIO_THRESHOLD: f64 = 1.1;

/// Tuning for [`select_best_region_with`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectOptions {
    /// Candidates are only considered when the container and the whole image
    /// differ in aspect ratio by more than this factor.
    pub ratio_threshold: f64,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
        }
    }
}

impl SelectOptions {
    /// Set the ratio threshold. Values below 1 behave like 1.
    pub fn ratio_threshold(mut self, threshold: f64) -> Self {
        self.ratio_threshold = threshold;
        self
    }
}

/// Pick the region to frame for a container of `container` pixels showing an
/// image fitted to `fitted_image` pixels.
///
/// A `forced_id` naming a region in `regions` (or the whole-image sentinel)
/// wins unconditionally. Otherwise the region whose aspect ratio is closest
/// to the container's is chosen, with earlier regions winning ties. Falls back
/// to [`ORIGINAL_IMAGE`].
pub fn select_best_region<'a>(
    container: PixelSize,
    fitted_image: PixelSize,
    regions: &'a RegionSet,
    forced_id: Option<&str>,
) -> &'a Region {
    select_best_region_with(
        &SelectOptions::default(),
        container,
        fitted_image,
        regions,
        forced_id,
    )
}

/// [`select_best_region`] with explicit options.
pub fn select_best_region_with<'a>(
    options: &SelectOptions,
    container: PixelSize,
    fitted_image: PixelSize,
    regions: &'a RegionSet,
    forced_id: Option<&str>,
) -> &'a Region {
    if let Some(id) = forced_id {
        match regions.find(id) {
            Some(region) => {
                debug!(id, "using forced region");
                return region;
            }
            None => debug!(id, "forced region not found, selecting automatically"),
        }
    }

    let best = best_fitting(options, container, fitted_image, regions);
    debug!(id = best.id(), "selected region");
    best
}

fn best_fitting<'a>(
    options: &SelectOptions,
    container: PixelSize,
    fitted_image: PixelSize,
    regions: &'a RegionSet,
) -> &'a Region {
    let mut best: &Region = &ORIGINAL_IMAGE;
    let mut smallest_diff = container.ratio_diff_factor(&fitted_image);

    if smallest_diff <= options.ratio_threshold {
        return best;
    }

    for region in regions {
        let diff = container.ratio_diff_factor(&region.size().to_pixels(&fitted_image));
        if diff < smallest_diff {
            smallest_diff = diff;
            best = region;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{RelativePosition, RelativeSize};
    use crate::region::ORIGINAL_IMAGE_ID;

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Region {
        Region::rectangle(id, RelativePosition::new(x, y), RelativeSize::new(w, h))
    }

    fn set(regions: Vec<Region>) -> RegionSet {
        regions.into_iter().collect()
    }

    fn image() -> PixelSize {
        PixelSize::new(1000.0, 1000.0)
    }

    #[test]
    fn empty_set_returns_original() {
        let regions = RegionSet::new();
        let chosen = select_best_region(
            PixelSize::new(1000.0, 100.0),
            image(),
            &regions,
            None,
        );
        assert!(chosen.is_original_image());
    }

    #[test]
    fn close_ratio_skips_candidates() {
        // 1.05 is under the threshold, even though "wide" matches better.
        let regions = set(vec![rect("wide", 0.0, 0.0, 1.0, 0.95)]);
        let chosen = select_best_region(PixelSize::new(1050.0, 1000.0), image(), &regions, None);
        assert!(chosen.is_original_image());
    }

    #[test]
    fn picks_closest_ratio() {
        let regions = set(vec![
            rect("tall", 0.4, 0.0, 0.2, 1.0),
            rect("wide", 0.0, 0.4, 1.0, 0.25),
            rect("square", 0.25, 0.25, 0.5, 0.5),
        ]);
        let chosen = select_best_region(PixelSize::new(800.0, 200.0), image(), &regions, None);
        assert_eq!(chosen.id(), "wide");
        let chosen = select_best_region(PixelSize::new(100.0, 500.0), image(), &regions, None);
        assert_eq!(chosen.id(), "tall");
    }

    #[test]
    fn first_region_wins_ties() {
        let regions = set(vec![
            rect("a", 0.0, 0.0, 1.0, 0.5),
            rect("b", 0.0, 0.5, 1.0, 0.5),
        ]);
        let chosen = select_best_region(PixelSize::new(400.0, 200.0), image(), &regions, None);
        assert_eq!(chosen.id(), "a");
    }

    #[test]
    fn candidate_worse_than_image_is_ignored() {
        // Container is 3:1; the only region is 1:4, farther away than the image.
        let regions = set(vec![rect("tall", 0.0, 0.0, 0.25, 1.0)]);
        let chosen = select_best_region(PixelSize::new(300.0, 100.0), image(), &regions, None);
        assert!(chosen.is_original_image());
    }

    #[test]
    fn forced_id_overrides_better_fit() {
        let regions = set(vec![
            rect("wide", 0.0, 0.4, 1.0, 0.25),
            rect("tall", 0.4, 0.0, 0.2, 1.0),
        ]);
        let chosen = select_best_region(
            PixelSize::new(800.0, 200.0),
            image(),
            &regions,
            Some("tall"),
        );
        assert_eq!(chosen.id(), "tall");
    }

    #[test]
    fn forced_original_image() {
        let regions = set(vec![rect("wide", 0.0, 0.4, 1.0, 0.25)]);
        let chosen = select_best_region(
            PixelSize::new(800.0, 200.0),
            image(),
            &regions,
            Some(ORIGINAL_IMAGE_ID),
        );
        assert!(chosen.is_original_image());
    }

    #[test]
    fn unknown_forced_id_falls_back() {
        let regions = set(vec![rect("wide", 0.0, 0.4, 1.0, 0.25)]);
        let chosen = select_best_region(
            PixelSize::new(800.0, 200.0),
            image(),
            &regions,
            Some("missing"),
        );
        assert_eq!(chosen.id(), "wide");
    }

    #[test]
    fn custom_threshold() {
        let regions = set(vec![rect("wide", 0.0, 0.0, 1.0, 0.95)]);
        let options = SelectOptions::default().ratio_threshold(1.0);
        let chosen = select_best_region_with(
            &options,
            PixelSize::new(1050.0, 1000.0),
            image(),
            &regions,
            None,
        );
        assert_eq!(chosen.id(), "wide");
    }

    #[test]
    fn degenerate_sizes_do_not_panic() {
        let regions = set(vec![rect("a", 0.0, 0.0, 0.5, 0.5)]);
        let chosen = select_best_region(PixelSize::ZERO, PixelSize::ZERO, &regions, None);
        assert!(chosen.is_original_image());
    }
}
