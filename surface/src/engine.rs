use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{ERASER_CURSOR, IDLE_CURSOR, PEN_CURSOR};
use crate::doc::{Color, Stroke, StrokeList, Tool};
use crate::input::{InputState, PointerSource};
use crate::render::{self, Layers};
use crate::tools::ToolState;
use crate::transform::{CoordinateMapper, ImageStatus, Point, Size, ViewTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notifications returned from handlers for the host to process.
///
/// An empty `Vec` means the event changed nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The stroke list was replaced by this new value; the host owns persistence.
    StrokesChanged(StrokeList),
    /// Something visible changed; schedule a `render`.
    RenderNeeded,
    /// The canvas cursor should change to this CSS cursor.
    SetCursor(String),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub strokes: StrokeList,
    pub tools: ToolState,
    pub mapper: CoordinateMapper,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the stroke list wholesale (slide change or load from storage).
    ///
    /// Any drag in progress is abandoned. No `StrokesChanged` is emitted since
    /// the host supplied the value.
    pub fn load_strokes(&mut self, strokes: StrokeList) -> Vec<Action> {
        self.input = InputState::Idle;
        self.strokes = strokes;
        vec![Action::RenderNeeded]
    }

    // --- Image / viewport ---

    /// A new background image was requested and is not yet decoded.
    pub fn set_image_loading(&mut self) -> Vec<Action> {
        self.mapper.set_image_loading();
        self.after_transform_change()
    }

    /// The background image decoded with the given natural size.
    pub fn set_image_loaded(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.mapper.set_image_loaded(Size::new(width, height));
        debug!("image loaded {width}x{height}, transform {:?}", self.mapper.transform());
        self.after_transform_change()
    }

    /// The background image failed to load; the surface becomes non-interactive.
    pub fn set_image_failed(&mut self) -> Vec<Action> {
        warn!("slide image failed to load; drawing disabled");
        self.mapper.set_image_failed();
        self.after_transform_change()
    }

    /// Update viewport dimensions (CSS pixels).
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.mapper.set_viewport(Size::new(width, height));
        self.after_transform_change()
    }

    fn after_transform_change(&mut self) -> Vec<Action> {
        if self.mapper.transform().is_none() && self.input.is_drawing() {
            debug!("transform lost mid-stroke; abandoning drag");
            self.input = InputState::Idle;
        }
        vec![Action::RenderNeeded, Action::SetCursor(self.cursor().to_owned())]
    }

    // --- Input events ---

    /// Pointer-down at a viewport point: start a new stroke.
    pub fn on_pointer_down(&mut self, viewport_pt: Point, source: PointerSource) -> Vec<Action> {
        let Some(transform) = self.mapper.transform() else {
            debug!("pointer-down ignored: no valid transform");
            return Vec::new();
        };
        if !viewport_pt.is_finite() {
            return Vec::new();
        }
        let image_pt = transform.viewport_to_image(viewport_pt);
        let stroke = Stroke::begin(&self.tools, image_pt, transform.scale);
        debug!("stroke started {:?} at ({}, {}) via {source:?}", stroke.tool, image_pt.x, image_pt.y);
        self.input = InputState::Drawing { source };
        self.strokes = self.strokes.pushed(stroke);
        vec![Action::StrokesChanged(self.strokes.clone()), Action::RenderNeeded]
    }

    /// Pointer-move at a viewport point: extend the stroke in progress.
    pub fn on_pointer_move(&mut self, viewport_pt: Point) -> Vec<Action> {
        if !self.input.is_drawing() || !viewport_pt.is_finite() {
            return Vec::new();
        }
        let Some(image_pt) = self.mapper.viewport_to_image(viewport_pt) else {
            return Vec::new();
        };
        let Some(next) = self.strokes.with_point_on_last(image_pt) else {
            return Vec::new();
        };
        self.strokes = next;
        vec![Action::StrokesChanged(self.strokes.clone()), Action::RenderNeeded]
    }

    /// Pointer-up: finish the stroke in progress.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.finish_drag();
        Vec::new()
    }

    /// Mouse left the surface: finish the stroke in progress.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.finish_drag();
        Vec::new()
    }

    /// Touch lifted: finish the stroke in progress.
    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.finish_drag();
        Vec::new()
    }

    fn finish_drag(&mut self) {
        if self.input.is_drawing() {
            debug!(
                "stroke finished with {} points",
                self.strokes.last().map_or(0, Stroke::point_count)
            );
        }
        self.input = InputState::Idle;
    }

    // --- Undo / clear ---

    /// Remove the most recent stroke. No-op on an empty list.
    pub fn undo(&mut self) -> Vec<Action> {
        if self.strokes.is_empty() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.strokes = self.strokes.without_last();
        vec![Action::StrokesChanged(self.strokes.clone()), Action::RenderNeeded]
    }

    /// Remove every stroke. No-op on an empty list.
    pub fn clear(&mut self) -> Vec<Action> {
        if self.strokes.is_empty() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.strokes = self.strokes.cleared();
        vec![Action::StrokesChanged(self.strokes.clone()), Action::RenderNeeded]
    }

    // --- Tool state ---

    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.tools.select_tool(tool);
        vec![Action::SetCursor(self.cursor().to_owned())]
    }

    pub fn select_color(&mut self, color: Color) {
        self.tools.select_color(color);
    }

    pub fn select_width(&mut self, width: f64) {
        self.tools.select_width(width);
    }

    // --- Queries ---

    #[must_use]
    pub fn strokes(&self) -> &StrokeList {
        &self.strokes
    }

    #[must_use]
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    #[must_use]
    pub fn transform(&self) -> Option<ViewTransform> {
        self.mapper.transform()
    }

    #[must_use]
    pub fn image_status(&self) -> ImageStatus {
        self.mapper.image_status()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    /// Whether pointer input can be mapped; the host shows a placeholder otherwise.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.mapper.transform().is_some()
    }

    /// CSS cursor for the current tool and image state.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        if !self.is_interactive() {
            return IDLE_CURSOR;
        }
        match self.tools.tool() {
            Tool::Pen => PEN_CURSOR,
            Tool::Eraser => ERASER_CURSOR,
        }
    }
}

/// The full annotation engine. Wraps `EngineCore` and owns the browser canvases.
///
/// Strokes are drawn into an offscreen layer canvas so eraser strokes can cut
/// through annotations without touching the slide image on the main canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layer: HtmlCanvasElement,
    layer_ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D context cannot be obtained or the layer canvas
    /// cannot be created.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let layer = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("created element is not a canvas"))?;
        let layer_ctx = context_2d(&layer)?;
        Ok(Self { canvas, ctx, layer, layer_ctx, image: None, dpr: 1.0, core: EngineCore::new() })
    }

    // --- Image / viewport ---

    /// A new slide image was requested; drawing is disabled until it loads.
    pub fn image_loading(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.set_image_loading()
    }

    /// Attach a decoded slide image. Call from the image's `load` handler.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let width = f64::from(image.natural_width());
        let height = f64::from(image.natural_height());
        self.image = Some(image);
        self.core.set_image_loaded(width, height)
    }

    /// The slide image failed to load. Call from the image's `error` handler.
    pub fn image_failed(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.set_image_failed()
    }

    /// Update viewport dimensions and device pixel ratio, resizing both backing stores.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let (backing_w, backing_h) = backing_size(width_css, height_css, self.dpr);
        self.canvas.set_width(backing_w);
        self.canvas.set_height(backing_h);
        self.layer.set_width(backing_w);
        self.layer.set_height(backing_h);
        self.core.set_viewport(width_css, height_css)
    }

    // --- Delegated data inputs ---

    pub fn load_strokes(&mut self, strokes: StrokeList) -> Vec<Action> {
        self.core.load_strokes(strokes)
    }

    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.select_tool(tool)
    }

    pub fn select_color(&mut self, color: Color) {
        self.core.select_color(color);
    }

    pub fn select_width(&mut self, width: f64) {
        self.core.select_width(width);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, viewport_pt: Point, source: PointerSource) -> Vec<Action> {
        self.core.on_pointer_down(viewport_pt, source)
    }

    pub fn on_pointer_move(&mut self, viewport_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(viewport_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.core.on_touch_end()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.core.clear()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let layers = Layers {
            main: &self.ctx,
            layer_canvas: &self.layer,
            layer: &self.layer_ctx,
        };
        let viewport = self.core.mapper.viewport().unwrap_or(Size::new(0.0, 0.0));
        render::draw(
            &layers,
            self.image.as_ref(),
            &self.core.strokes,
            self.core.transform(),
            viewport,
            self.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn strokes(&self) -> &StrokeList {
        self.core.strokes()
    }

    #[must_use]
    pub fn tools(&self) -> &ToolState {
        self.core.tools()
    }

    #[must_use]
    pub fn transform(&self) -> Option<ViewTransform> {
        self.core.transform()
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.core.is_interactive()
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("context is not CanvasRenderingContext2d"))
}

/// Device-pixel backing store size for a CSS-pixel viewport.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn backing_size(width_css: f64, height_css: f64, dpr: f64) -> (u32, u32) {
    let scale = |css: f64| {
        let px = (css * dpr).round();
        if px.is_finite() && px > 0.0 { px.min(f64::from(u32::MAX)) as u32 } else { 0 }
    };
    (scale(width_css), scale(height_css))
}
