//! Error types for the host crate.
//!
//! Each layer has its own enum; [`PresenterError`] wraps the lower two so the
//! host can match on where a navigation or save went wrong.

/// Errors from an annotation store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("annotations not found: {0}")]
    NotFound(String),
    #[error("store rejected request: {0}")]
    Rejected(String),
    #[error("malformed annotation document: {0}")]
    Decode(String),
    #[error("unsupported annotation document version: {0}")]
    UnsupportedVersion(u32),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors from session setup and slide addressing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid join code: {0:?}")]
    InvalidJoinCode(String),
    #[error("slide {slide} out of range 1..={count}")]
    SlideOutOfRange { slide: u32, count: u32 },
    #[error("session backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenterError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("could not load slide {slide}: {source}")]
    LoadFailed { slide: u32, source: StoreError },
    #[error("could not save slide {slide}: {source}")]
    SaveFailed { slide: u32, source: StoreError },
}
