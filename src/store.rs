//! Annotation storage — the document codec and the store contract.
//!
//! DESIGN
//! ======
//! Strokes for a slide travel as one JSON document:
//! `{"version":1,"width":1920,"height":1080,"strokes":[...]}`. The width and
//! height name the reference frame the host saved against; stroke points are
//! already in slide image space, so they are informational on load.
//!
//! [`AnnotationStore`] is the seam between the presenter and wherever
//! documents live. [`MemoryStore`] keeps encoded documents in process so a
//! save and a load go through the same codec a remote store would.
//!
//! ERROR HANDLING
//! ==============
//! A document with an unknown or missing version is rejected rather than
//! guessed at. A missing or `null` `strokes` value is an empty slide, not an
//! error. Non-finite stroke values are refused at encode time.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surface::doc::StrokeList;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::error::{SessionError, StoreError};
use crate::session::{SessionBackend, SlideRef};

/// Only document version this crate reads or writes.
pub const DOCUMENT_VERSION: u32 = 1;

// =============================================================================
// DOCUMENT
// =============================================================================

/// Wire form of one slide's annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub version: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strokes: StrokeList,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<StrokeList, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<StrokeList>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnnotationDocument {
    #[must_use]
    pub fn new(reference: (u32, u32), strokes: StrokeList) -> Self {
        Self { version: DOCUMENT_VERSION, width: reference.0, height: reference.1, strokes }
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] if a stroke has a non-finite width or
    /// coordinate. JSON would write those as `null` and the document would
    /// no longer decode.
    pub fn encode(&self) -> Result<String, StoreError> {
        let bad = self
            .strokes
            .iter()
            .position(|s| !s.width.is_finite() || s.points.iter().any(|v| !v.is_finite()));
        if let Some(index) = bad {
            return Err(StoreError::Rejected(format!("stroke {index} has a non-finite width or point")));
        }
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] on malformed JSON and
    /// [`StoreError::UnsupportedVersion`] for any version other than 1.
    pub fn decode(json: &str) -> Result<Self, StoreError> {
        let doc: Self = serde_json::from_str(json)?;
        if doc.version != DOCUMENT_VERSION {
            return Err(StoreError::UnsupportedVersion(doc.version));
        }
        Ok(doc)
    }

    #[must_use]
    pub fn into_strokes(self) -> StrokeList {
        self.strokes
    }
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Loads and saves the stroke list of one slide.
#[async_trait::async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Strokes saved for `slide`; a slide never saved is empty.
    async fn load_strokes(&self, slide: &SlideRef) -> Result<StrokeList, StoreError>;

    /// Replace the strokes saved for `slide`.
    async fn save_strokes(&self, slide: &SlideRef, strokes: &StrokeList) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store for tests and offline hosts.
#[derive(Debug)]
pub struct MemoryStore {
    reference: (u32, u32),
    documents: RwLock<HashMap<SlideRef, String>>,
    current_slides: RwLock<HashMap<String, u32>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl MemoryStore {
    /// Empty store writing documents against the configured reference frame.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            reference: (config.reference_width, config.reference_height),
            documents: RwLock::new(HashMap::new()),
            current_slides: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a slide with a raw JSON document, as if a remote store returned it.
    pub async fn insert_raw(&self, slide: SlideRef, json: impl Into<String>) {
        self.documents.write().await.insert(slide, json.into());
    }

    /// Raw JSON last saved for `slide`.
    pub async fn raw(&self, slide: &SlideRef) -> Option<String> {
        self.documents.read().await.get(slide).cloned()
    }

    /// Slide last published for `session_id`.
    pub async fn current_slide(&self, session_id: &str) -> Option<u32> {
        self.current_slides.read().await.get(session_id).copied()
    }
}

#[async_trait::async_trait]
impl AnnotationStore for MemoryStore {
    async fn load_strokes(&self, slide: &SlideRef) -> Result<StrokeList, StoreError> {
        let documents = self.documents.read().await;
        let Some(json) = documents.get(slide) else {
            return Ok(StrokeList::new());
        };
        Ok(AnnotationDocument::decode(json)?.into_strokes())
    }

    async fn save_strokes(&self, slide: &SlideRef, strokes: &StrokeList) -> Result<(), StoreError> {
        let json = AnnotationDocument::new(self.reference, strokes.clone()).encode()?;
        debug!(session_id = %slide.session_id, slide = slide.slide_number, bytes = json.len(), "annotations stored");
        self.documents.write().await.insert(slide.clone(), json);
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionBackend for MemoryStore {
    async fn update_current_slide(&self, session_id: &str, slide: u32) -> Result<(), SessionError> {
        self.current_slides.write().await.insert(session_id.to_owned(), slide);
        Ok(())
    }
}
