//! Rendering: draws the slide image and its annotations to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the stroke list and transform and produces
//! pixels. It does not mutate any application state.
//!
//! Two layers are composed per frame:
//!
//! 1. The main canvas gets the backdrop and the slide image.
//! 2. Strokes are drawn into an offscreen layer canvas in list order. Pen
//!    strokes use `source-over`; eraser strokes use `destination-out`, so they
//!    only remove annotation pixels. The layer is then copied over the main
//!    canvas, leaving the slide image intact under erased areas.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{BACKDROP_FILL, ERASER_STYLE, SMOOTHING_TENSION};
use crate::doc::{Stroke, StrokeList};
use crate::smooth::{PathSegment, smooth_path};
use crate::transform::{Point, Size, ViewTransform};

/// Borrowed drawing targets for one frame.
pub struct Layers<'a> {
    /// Visible canvas context.
    pub main: &'a CanvasRenderingContext2d,
    /// Offscreen canvas holding annotations only.
    pub layer_canvas: &'a HtmlCanvasElement,
    /// Context of `layer_canvas`.
    pub layer: &'a CanvasRenderingContext2d,
}

/// Composite operation used to draw `stroke` on the annotation layer.
#[must_use]
pub fn composite_op(stroke: &Stroke) -> &'static str {
    if stroke.is_eraser() { "destination-out" } else { "source-over" }
}

/// CSS stroke style used to draw `stroke`.
#[must_use]
pub fn stroke_style(stroke: &Stroke) -> String {
    if stroke.is_eraser() {
        ERASER_STYLE.to_owned()
    } else {
        stroke.color.to_css()
    }
}

/// Draw the full scene: backdrop, slide image, and annotation layer.
///
/// `viewport` is in CSS pixels. `dpr` is the device pixel ratio. With no
/// transform only the backdrop is drawn, which serves as the placeholder.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    layers: &Layers<'_>,
    image: Option<&HtmlImageElement>,
    strokes: &StrokeList,
    transform: Option<ViewTransform>,
    viewport: Size,
    dpr: f64,
) -> Result<(), JsValue> {
    let main = layers.main;

    // Layer 1: backdrop.
    main.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    main.set_global_composite_operation("source-over")?;
    main.set_fill_style_str(BACKDROP_FILL);
    main.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    let Some(t) = transform else {
        return Ok(());
    };

    // Layer 2: slide image at its fitted position.
    if let Some(img) = image {
        main.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            t.offset_x,
            t.offset_y,
            f64::from(img.natural_width()) * t.scale,
            f64::from(img.natural_height()) * t.scale,
        )?;
    }

    // Layer 3: annotations, composited over the image.
    draw_annotations(layers.layer, strokes, t, viewport, dpr)?;
    main.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    main.draw_image_with_html_canvas_element(layers.layer_canvas, 0.0, 0.0)?;
    Ok(())
}

fn draw_annotations(
    ctx: &CanvasRenderingContext2d,
    strokes: &StrokeList,
    t: ViewTransform,
    viewport: Size,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_global_composite_operation("source-over")?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.translate(t.offset_x, t.offset_y)?;
    ctx.scale(t.scale, t.scale)?;

    for stroke in strokes {
        draw_stroke(ctx, stroke)?;
    }
    Ok(())
}

// =============================================================
// Strokes
// =============================================================

fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    let points: Vec<Point> = stroke.points().collect();
    let path = smooth_path(&points, SMOOTHING_TENSION);
    if path.is_empty() {
        return Ok(());
    }

    ctx.save();
    ctx.set_global_composite_operation(composite_op(stroke))?;
    let style = stroke_style(stroke);
    ctx.set_stroke_style_str(&style);
    ctx.set_fill_style_str(&style);
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    ctx.begin_path();
    let mut dot = false;
    for seg in path {
        match seg {
            PathSegment::Dot(p) => {
                ctx.arc(p.x, p.y, stroke.width / 2.0, 0.0, 2.0 * PI)?;
                dot = true;
            }
            PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
            PathSegment::QuadTo { ctrl, to } => ctx.quadratic_curve_to(ctrl.x, ctrl.y, to.x, to.y),
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                ctx.bezier_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
            }
        }
    }
    if dot {
        ctx.fill();
    } else {
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}
