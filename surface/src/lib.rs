//! Annotation surface for slide images.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It captures
//! freehand strokes over a fixed-size slide image shown in a variable-size
//! viewport: pointer input is mapped into image space, recorded as ordered
//! polylines, and rendered with pen and eraser compositing on a layer that
//! never touches the slide image. The host page owns persistence; every
//! mutation is reported back to it as an [`engine::Action`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Strokes, colors, and the immutable [`doc::StrokeList`] |
//! | [`transform`] | Fit-to-viewport transform and coordinate conversions |
//! | [`tools`] | Tool, color, and width selection for new strokes |
//! | [`input`] | Pointer sources and the recorder state machine |
//! | [`smooth`] | Cardinal-spline smoothing of stroke polylines |
//! | [`render`] | Canvas2D rendering of image and annotation layers |
//! | [`consts`] | Shared constants (width range, palette, defaults) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
pub mod render;
pub mod smooth;
pub mod tools;
pub mod transform;
