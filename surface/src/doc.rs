//! Document model: strokes, their colors, and the per-slide stroke list.
//!
//! A [`Stroke`] is one continuous pointer drag recorded in image space. A
//! [`StrokeList`] holds every stroke for the active slide in z-order. The list
//! is immutable: each update returns a new value and leaves the previous one
//! untouched, so a value handed to the host in a change notification never
//! shifts underneath it.
//!
//! The serde shape matches the annotation API:
//! `{"tool":"pen","color":"#df4b26","size":4.0,"points":[x1,y1,x2,y2]}`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tools::ToolState;
use crate::transform::Point;

/// Drawing tool a stroke was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Draws in the stroke color.
    #[default]
    Pen,
    /// Removes annotation pixels underneath; the slide image is unaffected.
    Eraser,
}

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0:?}")]
    BadDigit(String),
}

/// An opaque RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string, always `#rrggbb` in lowercase.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(hex) = s.trim().strip_prefix('#') else {
            return Err(ColorError::MissingHash(s.to_owned()));
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_owned()));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorError::BadDigit(s.to_owned()))
        };
        match hex.len() {
            6 => Ok(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                // #abc expands to #aabbcc.
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorError::BadLength(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// One continuous pointer drag, recorded in image space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Tool active when the stroke began.
    pub tool: Tool,
    /// Pen color; carried but not drawn for eraser strokes.
    pub color: Color,
    /// Line thickness in image-space units.
    #[serde(rename = "size")]
    pub width: f64,
    /// Flat coordinate pairs `[x1, y1, x2, y2, ...]` in image space.
    pub points: Vec<f64>,
}

impl Stroke {
    /// Start a stroke at `at` (image space) using the current tool settings.
    ///
    /// The selected width is in viewport pixels; it is divided by `scale` so the
    /// stroke keeps its on-screen thickness at the zoom level it was drawn at.
    #[must_use]
    pub fn begin(tools: &ToolState, at: Point, scale: f64) -> Self {
        Self {
            tool: tools.tool(),
            color: tools.color(),
            width: tools.width() / scale,
            points: vec![at.x, at.y],
        }
    }

    /// A copy of this stroke with `p` appended.
    #[must_use]
    pub fn with_point(&self, p: Point) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + 2);
        points.extend_from_slice(&self.points);
        points.push(p.x);
        points.push(p.y);
        Self { points, ..self.clone() }
    }

    /// Iterate recorded points. A dangling odd coordinate is ignored.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1]))
    }

    /// Number of complete points recorded.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    #[must_use]
    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }
}

/// Ordered strokes for one slide. Later strokes render on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeList {
    strokes: Vec<Stroke>,
}

impl StrokeList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A new list with `stroke` appended on top.
    #[must_use]
    pub fn pushed(&self, stroke: Stroke) -> Self {
        let mut strokes = Vec::with_capacity(self.strokes.len() + 1);
        strokes.extend_from_slice(&self.strokes);
        strokes.push(stroke);
        Self { strokes }
    }

    /// A new list whose last stroke has `p` appended, or `None` if empty.
    #[must_use]
    pub fn with_point_on_last(&self, p: Point) -> Option<Self> {
        let (last, rest) = self.strokes.split_last()?;
        let mut strokes = Vec::with_capacity(self.strokes.len());
        strokes.extend_from_slice(rest);
        strokes.push(last.with_point(p));
        Some(Self { strokes })
    }

    /// A new list without the most recent stroke. Empty stays empty.
    #[must_use]
    pub fn without_last(&self) -> Self {
        let keep = self.strokes.len().saturating_sub(1);
        Self { strokes: self.strokes[..keep].to_vec() }
    }

    /// An empty list.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Stroke> {
        self.strokes
    }
}

impl From<Vec<Stroke>> for StrokeList {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}

impl<'a> IntoIterator for &'a StrokeList {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
