//! Shared constants for the surface crate.

use crate::doc::Color;

// ── Tool state ──────────────────────────────────────────────────

/// Thinnest selectable stroke width, in viewport pixels.
pub const MIN_WIDTH: f64 = 1.0;

/// Thickest selectable stroke width, in viewport pixels.
pub const MAX_WIDTH: f64 = 20.0;

/// Width selected when a surface is first created.
pub const DEFAULT_WIDTH: f64 = 5.0;

/// Pen color selected when a surface is first created.
pub const DEFAULT_COLOR: Color = Color::rgb(0x00, 0x00, 0x00);

/// Preset pen colors offered by the tool panel.
pub const PALETTE: [Color; 6] = [
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xdf, 0x4b, 0x26),
    Color::rgb(0x22, 0x8b, 0x22),
    Color::rgb(0x00, 0x00, 0xff),
    Color::rgb(0xff, 0x00, 0xff),
    Color::rgb(0xff, 0xa5, 0x00),
];

// ── Rendering ───────────────────────────────────────────────────

/// Spline tension applied when smoothing stroke polylines.
pub const SMOOTHING_TENSION: f64 = 0.5;

/// Fill shown behind the slide image and as the not-loaded placeholder.
pub const BACKDROP_FILL: &str = "#f0f0f0";

/// Stroke style used for eraser strokes; only its alpha matters under `destination-out`.
pub const ERASER_STYLE: &str = "#000000";

// ── Cursors ─────────────────────────────────────────────────────

/// Cursor shown while the pen tool is active.
pub const PEN_CURSOR: &str = "crosshair";

/// Cursor shown while the eraser tool is active.
pub const ERASER_CURSOR: &str = "cell";

/// Cursor shown while no image is available to draw on.
pub const IDLE_CURSOR: &str = "default";
