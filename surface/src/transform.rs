//! Coordinate mapping between the slide image and the on-screen viewport.
//!
//! The slide image has fixed pixel dimensions (image space). The drawing
//! surface changes size with the window (viewport space). A [`ViewTransform`]
//! fits the whole image inside the viewport, centered, without distortion, and
//! converts points in both directions. [`CoordinateMapper`] tracks the inputs
//! and keeps the transform current as they change.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

/// A point in either image or viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height, in pixels of whichever space it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Uniform scale plus offset mapping image space onto viewport space.
///
/// Image point `(x, y)` lands at `(x * scale + offset_x, y * scale + offset_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    /// Fit `image` inside `viewport`, preserving aspect ratio and centering on both axes.
    ///
    /// Returns `None` when either size is empty or not finite; no mapping is
    /// possible until both are known.
    #[must_use]
    pub fn fit(image: Size, viewport: Size) -> Option<Self> {
        if !image.is_drawable() || !viewport.is_drawable() {
            return None;
        }
        let scale = (viewport.width / image.width).min(viewport.height / image.height);
        Some(Self {
            scale,
            offset_x: (viewport.width - image.width * scale) / 2.0,
            offset_y: (viewport.height - image.height * scale) / 2.0,
        })
    }

    /// Convert an image-space point to viewport coordinates.
    #[must_use]
    pub fn image_to_viewport(&self, image: Point) -> Point {
        Point {
            x: image.x * self.scale + self.offset_x,
            y: image.y * self.scale + self.offset_y,
        }
    }

    /// Convert a viewport-space point (CSS pixels) to image coordinates.
    #[must_use]
    pub fn viewport_to_image(&self, viewport: Point) -> Point {
        Point {
            x: (viewport.x - self.offset_x) / self.scale,
            y: (viewport.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a viewport-space length (pixels) to an image-space length.
    #[must_use]
    pub fn viewport_len_to_image(&self, len: f64) -> f64 {
        len / self.scale
    }
}

/// Load state of the background image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImageStatus {
    /// Requested but not yet decoded; nothing can be mapped.
    #[default]
    Loading,
    /// Decoded with known natural dimensions.
    Loaded(Size),
    /// The image could not be loaded; the surface stays non-interactive.
    Failed,
}

/// Tracks image and viewport dimensions and keeps the fitted transform current.
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    image: ImageStatus,
    viewport: Option<Size>,
    transform: Option<ViewTransform>,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the image as loading (e.g. a new slide was requested).
    pub fn set_image_loading(&mut self) {
        self.image = ImageStatus::Loading;
        self.recompute();
    }

    /// Record the natural dimensions of a decoded image.
    pub fn set_image_loaded(&mut self, size: Size) {
        self.image = ImageStatus::Loaded(size);
        self.recompute();
    }

    /// Record that the image failed to load.
    pub fn set_image_failed(&mut self) {
        self.image = ImageStatus::Failed;
        self.recompute();
    }

    /// Record a new viewport size (initial layout or resize).
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = Some(size);
        self.recompute();
    }

    #[must_use]
    pub fn image_status(&self) -> ImageStatus {
        self.image
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// The current transform, or `None` while no valid mapping exists.
    #[must_use]
    pub fn transform(&self) -> Option<ViewTransform> {
        self.transform
    }

    /// Map a viewport point into image space, if a transform exists.
    #[must_use]
    pub fn viewport_to_image(&self, viewport: Point) -> Option<Point> {
        self.transform.map(|t| t.viewport_to_image(viewport))
    }

    fn recompute(&mut self) {
        self.transform = match (self.image, self.viewport) {
            (ImageStatus::Loaded(image), Some(viewport)) => ViewTransform::fit(image, viewport),
            _ => None,
        };
    }
}
