//! Presenter — the slide view controller around the annotation surface.
//!
//! DESIGN
//! ======
//! The surface engine owns the live stroke list and reports every change as
//! `Action::StrokesChanged`. The host forwards those values here with
//! [`Presenter::apply_change`]; the presenter decides when they are saved and
//! which slide's strokes the engine shows next. Navigation returns a
//! [`SlideChange`] the host feeds to `EngineCore::load_strokes`.
//!
//! Save progress is published on a `tokio::sync::watch` channel so a
//! toolbar can show "Saving…" or "Unsaved" without polling.
//!
//! ERROR HANDLING
//! ==============
//! Navigation awaits the auto-save of unsaved changes. If that save fails,
//! navigation stops and the current slide keeps its strokes, so nothing is
//! dropped silently. A failed load of the target slide also leaves the
//! current slide active. Publishing the current slide to the session is
//! best-effort: a failure is logged and navigation still succeeds.

#[cfg(test)]
#[path = "presenter_test.rs"]
mod presenter_test;

use std::sync::Arc;

use surface::doc::StrokeList;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::PresenterError;
use crate::session::{SessionBackend, SessionContext, SlideRef};
use crate::store::AnnotationStore;

// =============================================================================
// TYPES
// =============================================================================

/// Persistence state of the active slide's strokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Matches what the store holds.
    Saved,
    /// Changed since the last load or save.
    Unsaved,
    /// A save is in flight.
    Saving,
    /// The last save failed; the strokes are still held locally.
    Failed(String),
}

/// Result of a successful navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideChange {
    /// 1-based slide number now active.
    pub slide: u32,
    /// Strokes to load into the surface.
    pub strokes: StrokeList,
}

// =============================================================================
// PRESENTER
// =============================================================================

pub struct Presenter<B> {
    backend: Arc<B>,
    session: SessionContext,
    current: SlideRef,
    strokes: StrokeList,
    dirty: bool,
    status: watch::Sender<SaveStatus>,
}

impl<B> Presenter<B>
where
    B: AnnotationStore + SessionBackend,
{
    /// Open `session` on `start_slide` and load its strokes.
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::Session`] if `start_slide` is out of range
    /// and [`PresenterError::LoadFailed`] if its strokes cannot be loaded.
    pub async fn open(backend: Arc<B>, session: SessionContext, start_slide: u32) -> Result<Self, PresenterError> {
        let current = session.slide_ref(start_slide)?;
        let strokes = backend
            .load_strokes(&current)
            .await
            .map_err(|source| PresenterError::LoadFailed { slide: start_slide, source })?;
        info!(
            session_id = %session.session_id,
            slide = start_slide,
            slide_count = session.slide_count,
            strokes = strokes.len(),
            "presenter opened"
        );
        let status = watch::Sender::new(SaveStatus::Saved);
        Ok(Self { backend, session, current, strokes, dirty: false, status })
    }

    // --- Queries ---

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn strokes(&self) -> &StrokeList {
        &self.strokes
    }

    #[must_use]
    pub fn current_slide(&self) -> u32 {
        self.current.slide_number
    }

    #[must_use]
    pub fn slide_count(&self) -> u32 {
        self.session.slide_count
    }

    /// URL of the active slide's image.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.session.image_url(self.current.slide_number)
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status transition.
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current.slide_number < self.session.slide_count
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current.slide_number > 1
    }

    // --- Changes ---

    /// Take the latest stroke list reported by the surface.
    pub fn apply_change(&mut self, strokes: StrokeList) {
        self.strokes = strokes;
        self.dirty = true;
        self.status.send_replace(SaveStatus::Unsaved);
    }

    /// Save the active slide's strokes.
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::SaveFailed`] if the store rejects the save.
    /// The strokes stay held and marked unsaved.
    pub async fn save(&mut self) -> Result<(), PresenterError> {
        let slide = self.current.slide_number;
        self.status.send_replace(SaveStatus::Saving);
        match self.backend.save_strokes(&self.current, &self.strokes).await {
            Ok(()) => {
                self.dirty = false;
                self.status.send_replace(SaveStatus::Saved);
                info!(slide, strokes = self.strokes.len(), "annotations saved");
                Ok(())
            }
            Err(source) => {
                warn!(slide, error = %source, "annotation save failed");
                self.status.send_replace(SaveStatus::Failed(source.to_string()));
                Err(PresenterError::SaveFailed { slide, source })
            }
        }
    }

    // --- Navigation ---

    /// Switch to slide `slide`, saving unsaved changes first.
    ///
    /// # Errors
    ///
    /// - [`PresenterError::Session`] if `slide` is out of range.
    /// - [`PresenterError::SaveFailed`] if the auto-save fails.
    /// - [`PresenterError::LoadFailed`] if the target's strokes cannot be loaded.
    ///
    /// On any error the current slide and its strokes are unchanged.
    pub async fn go_to(&mut self, slide: u32) -> Result<SlideChange, PresenterError> {
        let target = self.session.slide_ref(slide)?;

        if self.dirty {
            self.save().await?;
        }

        let strokes = match self.backend.load_strokes(&target).await {
            Ok(strokes) => strokes,
            Err(source) => {
                warn!(slide, error = %source, "annotation load failed; staying on slide {}", self.current.slide_number);
                return Err(PresenterError::LoadFailed { slide, source });
            }
        };

        let from = self.current.slide_number;
        self.current = target;
        self.strokes = strokes.clone();
        self.dirty = false;
        self.status.send_replace(SaveStatus::Saved);
        info!(from, to = slide, strokes = strokes.len(), "slide changed");

        if let Err(err) = self.backend.update_current_slide(&self.session.session_id, slide).await {
            warn!(slide, error = %err, "current slide publish failed");
        }

        Ok(SlideChange { slide, strokes })
    }

    /// Advance one slide.
    ///
    /// # Errors
    ///
    /// See [`Presenter::go_to`]; on the last slide this is out of range.
    pub async fn next(&mut self) -> Result<SlideChange, PresenterError> {
        self.go_to(self.current.slide_number.saturating_add(1)).await
    }

    /// Go back one slide.
    ///
    /// # Errors
    ///
    /// See [`Presenter::go_to`]; on the first slide this is out of range.
    pub async fn previous(&mut self) -> Result<SlideChange, PresenterError> {
        self.go_to(self.current.slide_number.saturating_sub(1)).await
    }
}
