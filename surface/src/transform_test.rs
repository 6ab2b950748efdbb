#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn fit(iw: f64, ih: f64, vw: f64, vh: f64) -> ViewTransform {
    ViewTransform::fit(Size::new(iw, ih), Size::new(vw, vh)).unwrap()
}

// --- Point / Size ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_is_finite_rejects_nan_and_infinity() {
    assert!(Point::new(1.0, 2.0).is_finite());
    assert!(!Point::new(f64::NAN, 2.0).is_finite());
    assert!(!Point::new(1.0, f64::INFINITY).is_finite());
}

#[test]
fn size_is_drawable() {
    assert!(Size::new(1.0, 1.0).is_drawable());
    assert!(!Size::new(0.0, 10.0).is_drawable());
    assert!(!Size::new(10.0, -1.0).is_drawable());
    assert!(!Size::new(f64::NAN, 10.0).is_drawable());
}

// --- fit ---

#[test]
fn fit_widescreen_into_four_by_three() {
    let t = fit(1920.0, 1080.0, 800.0, 600.0);
    assert!(approx_eq(t.scale, 800.0 / 1920.0));
    assert!(approx_eq(t.offset_x, 0.0));
    assert!(approx_eq(t.offset_y, 75.0));
}

#[test]
fn fit_tall_image_centers_horizontally() {
    let t = fit(1080.0, 1920.0, 800.0, 600.0);
    assert!(approx_eq(t.scale, 600.0 / 1920.0));
    assert!(approx_eq(t.offset_x, (800.0 - 1080.0 * t.scale) / 2.0));
    assert!(approx_eq(t.offset_y, 0.0));
}

#[test]
fn fit_exact_match_is_identity() {
    let t = fit(640.0, 480.0, 640.0, 480.0);
    assert!(approx_eq(t.scale, 1.0));
    assert!(approx_eq(t.offset_x, 0.0));
    assert!(approx_eq(t.offset_y, 0.0));
}

#[test]
fn fit_upscales_small_image() {
    let t = fit(100.0, 50.0, 400.0, 400.0);
    assert!(approx_eq(t.scale, 4.0));
    assert!(approx_eq(t.offset_y, 100.0));
}

#[test]
fn fit_scale_is_min_ratio_and_margins_are_equal() {
    let cases = [
        (1920.0, 1080.0, 800.0, 600.0),
        (1024.0, 768.0, 1366.0, 700.0),
        (300.0, 900.0, 1280.0, 720.0),
        (1.0, 1.0, 3.0, 7.0),
        (4000.0, 3000.0, 320.0, 568.0),
    ];
    for (iw, ih, vw, vh) in cases {
        let t = fit(iw, ih, vw, vh);
        let expected: f64 = (vw / iw).min(vh / ih);
        assert!(approx_eq(t.scale, expected), "scale for {iw}x{ih} in {vw}x{vh}");

        let left = t.offset_x;
        let right = vw - (t.offset_x + iw * t.scale);
        let top = t.offset_y;
        let bottom = vh - (t.offset_y + ih * t.scale);
        assert!(approx_eq(left, right), "horizontal margins for {iw}x{ih} in {vw}x{vh}");
        assert!(approx_eq(top, bottom), "vertical margins for {iw}x{ih} in {vw}x{vh}");
        assert!(left >= -EPSILON && top >= -EPSILON);
    }
}

#[test]
fn fit_rejects_empty_viewport() {
    assert!(ViewTransform::fit(Size::new(1920.0, 1080.0), Size::new(0.0, 600.0)).is_none());
}

#[test]
fn fit_rejects_empty_image() {
    assert!(ViewTransform::fit(Size::new(0.0, 0.0), Size::new(800.0, 600.0)).is_none());
}

// --- conversions ---

#[test]
fn viewport_to_image_applies_inverse() {
    let t = ViewTransform { scale: 0.3125, offset_x: 25.0, offset_y: 0.0 };
    let image = t.viewport_to_image(Point::new(100.0, 100.0));
    assert!(point_approx_eq(image, Point::new(240.0, 320.0)));
}

#[test]
fn viewport_to_image_with_fitted_transform() {
    let t = fit(1920.0, 1080.0, 800.0, 600.0);
    let image = t.viewport_to_image(Point::new(100.0, 100.0));
    assert!(point_approx_eq(image, Point::new(240.0, 60.0)));
}

#[test]
fn image_to_viewport_maps_corners_to_fitted_box() {
    let t = fit(1920.0, 1080.0, 800.0, 600.0);
    assert!(point_approx_eq(t.image_to_viewport(Point::new(0.0, 0.0)), Point::new(0.0, 75.0)));
    assert!(point_approx_eq(
        t.image_to_viewport(Point::new(1920.0, 1080.0)),
        Point::new(800.0, 525.0)
    ));
}

#[test]
fn round_trip_viewport_first() {
    let t = fit(1920.0, 1080.0, 1013.0, 677.0);
    for p in [Point::new(0.0, 0.0), Point::new(13.7, 500.25), Point::new(-40.0, 900.0)] {
        let back = t.image_to_viewport(t.viewport_to_image(p));
        assert!(point_approx_eq(p, back));
    }
}

#[test]
fn round_trip_image_first() {
    let t = fit(800.0, 1200.0, 375.0, 812.0);
    let p = Point::new(333.3, 999.9);
    assert!(point_approx_eq(p, t.viewport_to_image(t.image_to_viewport(p))));
}

#[test]
fn viewport_len_to_image_divides_by_scale() {
    let t = ViewTransform { scale: 0.5, offset_x: 40.0, offset_y: -10.0 };
    assert!(approx_eq(t.viewport_len_to_image(5.0), 10.0));
    assert!(approx_eq(t.viewport_len_to_image(0.0), 0.0));
}

// --- CoordinateMapper ---

#[test]
fn mapper_starts_without_transform() {
    let mapper = CoordinateMapper::new();
    assert_eq!(mapper.image_status(), ImageStatus::Loading);
    assert!(mapper.transform().is_none());
    assert!(mapper.viewport_to_image(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn mapper_needs_both_image_and_viewport() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_viewport(Size::new(800.0, 600.0));
    assert!(mapper.transform().is_none());
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    assert_eq!(mapper.transform(), Some(fit(1920.0, 1080.0, 800.0, 600.0)));
}

#[test]
fn mapper_recomputes_on_resize() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    mapper.set_viewport(Size::new(800.0, 600.0));
    mapper.set_viewport(Size::new(1920.0, 1080.0));
    let t = mapper.transform().unwrap();
    assert!(approx_eq(t.scale, 1.0));
    assert!(approx_eq(t.offset_x, 0.0));
}

#[test]
fn mapper_recomputes_on_image_change() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_viewport(Size::new(800.0, 600.0));
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    mapper.set_image_loaded(Size::new(400.0, 300.0));
    assert!(approx_eq(mapper.transform().unwrap().scale, 2.0));
}

#[test]
fn mapper_failed_image_has_no_transform() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_viewport(Size::new(800.0, 600.0));
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    mapper.set_image_failed();
    assert_eq!(mapper.image_status(), ImageStatus::Failed);
    assert!(mapper.transform().is_none());
}

#[test]
fn mapper_loading_again_drops_transform() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_viewport(Size::new(800.0, 600.0));
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    mapper.set_image_loading();
    assert!(mapper.transform().is_none());
}

#[test]
fn mapper_collapsed_viewport_has_no_transform() {
    let mut mapper = CoordinateMapper::new();
    mapper.set_image_loaded(Size::new(1920.0, 1080.0));
    mapper.set_viewport(Size::new(0.0, 0.0));
    assert!(mapper.transform().is_none());
    assert_eq!(mapper.viewport(), Some(Size::new(0.0, 0.0)));
}
