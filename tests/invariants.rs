//! Parametric sweeps over containers, images, and regions.
//!
//! Each test walks a grid of inputs, collects every violation, and fails
//! once with the full list so a regression shows its whole footprint.

use zenframe::*;

const EPS: f64 = 1e-6;

fn containers() -> Vec<PixelSize> {
    let mut out = Vec::new();
    for &w in &[1.0, 37.0, 100.0, 320.0, 1024.0, 3000.0] {
        for &h in &[1.0, 50.0, 240.0, 768.0, 2000.0] {
            out.push(PixelSize::new(w, h));
        }
    }
    out
}

fn images() -> Vec<PixelSize> {
    vec![
        PixelSize::new(1000.0, 1000.0),
        PixelSize::new(1600.0, 900.0),
        PixelSize::new(300.0, 1200.0),
        PixelSize::new(64.0, 48.0),
    ]
}

fn regions() -> Vec<Region> {
    let steps = [0.0, 0.1, 0.35, 0.6, 0.9];
    let sizes = [0.05, 0.2, 0.5, 1.0];
    let mut out = vec![ORIGINAL_IMAGE.clone()];
    for &x in &steps {
        for &y in &steps {
            for &w in &sizes {
                for &h in &sizes {
                    out.push(Region::rectangle(
                        format!("{x}/{y}/{w}/{h}"),
                        RelativePosition::new(x, y),
                        RelativeSize::new(w, h),
                    ));
                }
            }
        }
    }
    out
}

#[test]
fn regions_stay_inside_image() {
    let mut failures = Vec::new();
    for image in [(1000.0, 1000.0), (333.0, 777.0), (1.0, 1.0)] {
        for (x, y, w, h) in [
            (0.0, 0.0, 1000.0, 1000.0),
            (999.0, 0.0, 50.0, 50.0),
            (10.0, 20.0, 5000.0, 3.0),
            (100.0, 100.0, 200.0, 200.0),
        ] {
            let d = RegionDescriptor::pixel("r", image, x, y, w, h);
            let Ok(region) = normalize(&d) else {
                continue;
            };
            let p = region.position();
            let s = region.size();
            if p.x() < 0.0 || p.y() < 0.0 {
                failures.push(format!("{image:?} {x},{y}: negative position {p}"));
            }
            if p.x() + s.width() > 1.0 + EPS || p.y() + s.height() > 1.0 + EPS {
                failures.push(format!("{image:?} {x},{y},{w},{h}: overhang {region}"));
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");
}

#[test]
fn ratio_diff_symmetric_and_reflexive() {
    let mut failures = Vec::new();
    let sizes = containers();
    for a in &sizes {
        if a.ratio_diff_factor(a) != 1.0 {
            failures.push(format!("{a}: self diff != 1"));
        }
        for b in &sizes {
            let ab = a.ratio_diff_factor(b);
            let ba = b.ratio_diff_factor(a);
            if ab != ba {
                failures.push(format!("{a} vs {b}: {ab} != {ba}"));
            }
            if ab < 1.0 {
                failures.push(format!("{a} vs {b}: {ab} < 1"));
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");
}

#[test]
fn whole_image_when_ratio_close() {
    let candidates: RegionSet = regions().into_iter().skip(1).collect();
    let mut failures = Vec::new();
    for image in images() {
        for factor in [1.0, 1.04, 1.1, 1.0 / 1.1, 0.97] {
            let container = PixelSize::new(image.width() * factor, image.height());
            if container.ratio_diff_factor(&image) > DEFAULT_RATIO_THRESHOLD {
                continue;
            }
            let chosen = select_best_region(container, image, &candidates, None);
            if !chosen.is_original_image() {
                failures.push(format!("{container} / {image}: picked {}", chosen.id()));
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");
}

#[test]
fn forced_id_always_honored() {
    let candidates: RegionSet = regions().into_iter().skip(1).collect();
    let mut failures = Vec::new();
    for container in containers() {
        for region in candidates.iter().step_by(37) {
            let chosen =
                select_best_region(container, images()[1], &candidates, Some(region.id()));
            if chosen.id() != region.id() {
                failures.push(format!("{container}: forced {} got {}", region.id(), chosen.id()));
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");
}

#[test]
fn solver_never_exposes_blank_margin() {
    let mut failures = Vec::new();
    for image in images() {
        for region in regions() {
            let pos = region.position().to_pixels(&image);
            let size = region.size().to_pixels(&image);
            // Sub-pixel regions are floored to 1px by the solver; skip the
            // cases where that floor alone pushes past the image edge.
            if size.width() < 1.0 || size.height() < 1.0 {
                continue;
            }
            let near_far_x = (pos.x, image.width() - size.width() - pos.x);
            let near_far_y = (pos.y, image.height() - size.height() - pos.y);

            for container in containers() {
                let t = solve(&region, container, image, PixelSize::ZERO);
                let tag = format!("{} in {container} on {image}", region.id());

                if !(t.factor.is_finite() && t.factor > 0.0) {
                    failures.push(format!("{tag}: bad factor {}", t.factor));
                    continue;
                }

                let x_offset = pos.x - t.origin.x;
                let y_offset = pos.y - t.origin.y;
                let visible_w = container.safe_width() / t.factor;
                let visible_h = container.safe_height() / t.factor;

                // The view is centered on the region on both axes.
                let cx = t.origin.x + visible_w / 2.0;
                let cy = t.origin.y + visible_h / 2.0;
                if (cx - (pos.x + size.width() / 2.0)).abs() > EPS * image.width().max(1.0) {
                    failures.push(format!("{tag}: not centered on x"));
                }
                if (cy - (pos.y + size.height() / 2.0)).abs() > EPS * image.height().max(1.0) {
                    failures.push(format!("{tag}: not centered on y"));
                }

                // On each axis, either the offset is within the image around
                // the region, or that axis is being cropped (negative offset).
                let within = |offset: f64, (near, far): (f64, f64)| {
                    offset <= EPS || offset <= near.min(far) + EPS
                };
                if !within(x_offset, near_far_x) {
                    failures.push(format!("{tag}: x offset {x_offset} exceeds {near_far_x:?}"));
                }
                if !within(y_offset, near_far_y) {
                    failures.push(format!("{tag}: y offset {y_offset} exceeds {near_far_y:?}"));
                }
            }
        }
    }
    assert!(
        failures.is_empty(),
        "{} failures, first ones: {:#?}",
        failures.len(),
        &failures[..failures.len().min(20)]
    );
}

#[test]
fn solve_is_bit_identical_on_repeat() {
    let mut failures = Vec::new();
    let image = images()[2];
    for region in regions().iter().step_by(7) {
        for container in containers() {
            let a = solve(region, container, image, PixelSize::new(1.5, 2.5));
            let b = solve(region, container, image, PixelSize::new(1.5, 2.5));
            let bits = |t: &Transformation| {
                [
                    t.origin.x.to_bits(),
                    t.origin.y.to_bits(),
                    t.factor.to_bits(),
                    t.inset_clip_from_top_left.width().to_bits(),
                    t.inset_clip_from_top_left.height().to_bits(),
                    t.inset_clip_from_bottom_right.width().to_bits(),
                    t.inset_clip_from_bottom_right.height().to_bits(),
                ]
            };
            if bits(&a) != bits(&b) {
                failures.push(format!("{} in {container}", region.id()));
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");
}
