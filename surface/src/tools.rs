//! Tool selection applied to newly started strokes.
//!
//! Changing the tool, color, or width never touches strokes already recorded;
//! [`crate::doc::Stroke::begin`] copies the values at pointer-down.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use crate::consts::{DEFAULT_COLOR, DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH, PALETTE};
use crate::doc::{Color, Tool};

/// User-selected tool, pen color, and width (viewport pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    tool: Tool,
    color: Color,
    width: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { tool: Tool::Pen, color: DEFAULT_COLOR, width: DEFAULT_WIDTH }
    }
}

impl ToolState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Select the pen color. Kept while the eraser is active.
    pub fn select_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Select the width, clamped to `MIN_WIDTH..=MAX_WIDTH`. Non-finite input is ignored.
    pub fn select_width(&mut self, width: f64) {
        if width.is_finite() {
            self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Whether color selection is meaningful. The host shows the palette
    /// disabled, not hidden, while this is false.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.tool == Tool::Pen
    }

    /// Preset colors offered by the tool panel.
    #[must_use]
    pub fn palette() -> &'static [Color] {
        &PALETTE
    }
}
