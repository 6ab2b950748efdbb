//! Slidemark — host-side slide view for the annotation surface.
//!
//! The [`surface`] crate records strokes and draws them; this crate decides
//! where those strokes come from and where they go.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-driven settings |
//! | [`error`] | Store, session and presenter error types |
//! | [`session`] | Join codes, the explicit session context, slide addressing |
//! | [`store`] | Annotation document codec and the storage contract |
//! | [`presenter`] | Save status and slide navigation policy |

pub mod config;
pub mod error;
pub mod presenter;
pub mod session;
pub mod store;
