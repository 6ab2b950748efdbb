//! Session context — who is presenting what, passed explicitly.
//!
//! DESIGN
//! ======
//! A presenter joins a session with a short join code. The join response
//! names the session, the presentation behind it and how many slides it
//! has. [`SessionContext`] bundles that with the API base URL and auth
//! token and is handed to whatever needs it; nothing here is global.
//!
//! The path builders, [`CurrentSlideUpdate`] and [`AuthToken::bearer`] are
//! for the embedding HTTP transport; this crate builds the requests' shape
//! but does not send them.
//!
//! Slide numbers are 1-based throughout. [`SessionContext::slide_ref`] is
//! the only way to build a [`SlideRef`], so every ref in circulation is in
//! range for its session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::SessionError;

const MAX_JOIN_CODE_LEN: usize = 6;

// =============================================================================
// JOIN CODE
// =============================================================================

/// A validated session join code: 1 to 6 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCode(String);

impl JoinCode {
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidJoinCode`] if the trimmed input is empty
    /// or longer than six characters.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let code = raw.trim();
        if code.is_empty() || code.chars().count() > MAX_JOIN_CODE_LEN {
            return Err(SessionError::InvalidJoinCode(raw.to_owned()));
        }
        Ok(Self(code.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// API path that resolves this code to a session.
    #[must_use]
    pub fn join_path(&self) -> String {
        format!("/sessions/join/{}", self.0)
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionJoinResponse {
    pub session_id: String,
    pub presentation_id: String,
    #[serde(default)]
    pub current_slide_number: u32,
    pub slide_count: u32,
    #[serde(default)]
    pub title: String,
}

impl SessionJoinResponse {
    /// Slide to open first. The API reports 0 or omits the field before
    /// the presenter has moved; both mean the first slide.
    #[must_use]
    pub fn start_slide(&self) -> u32 {
        self.current_slide_number.max(1)
    }
}

/// Body of a current-slide update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSlideUpdate {
    pub current_slide_number: u32,
}

// =============================================================================
// AUTH
// =============================================================================

/// Bearer token for the presentation API. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Address of one slide's annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlideRef {
    pub session_id: String,
    pub slide_number: u32,
}

/// Everything needed to talk about a joined session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub api_base: String,
    pub auth: Option<AuthToken>,
    pub session_id: String,
    pub presentation_id: String,
    pub join_code: JoinCode,
    pub title: String,
    pub slide_count: u32,
}

impl SessionContext {
    #[must_use]
    pub fn from_join(
        config: &Config,
        join_code: JoinCode,
        response: SessionJoinResponse,
        auth: Option<AuthToken>,
    ) -> Self {
        Self {
            api_base: config.api_base_url.clone(),
            auth,
            session_id: response.session_id,
            presentation_id: response.presentation_id,
            join_code,
            title: response.title,
            slide_count: response.slide_count,
        }
    }

    /// # Errors
    ///
    /// Returns [`SessionError::SlideOutOfRange`] unless `1 <= slide <= slide_count`.
    pub fn slide_ref(&self, slide: u32) -> Result<SlideRef, SessionError> {
        if slide == 0 || slide > self.slide_count {
            return Err(SessionError::SlideOutOfRange { slide, count: self.slide_count });
        }
        Ok(SlideRef { session_id: self.session_id.clone(), slide_number: slide })
    }

    /// Absolute URL of a slide's rendered image.
    #[must_use]
    pub fn image_url(&self, slide: u32) -> String {
        format!("{}/sessions/{}/{slide}/image", self.api_base, self.presentation_id)
    }

    /// API path of a slide's annotation document.
    #[must_use]
    pub fn annotations_path(&self, slide: u32) -> String {
        format!("/sessions/{}/slides/{slide}/annotations", self.session_id)
    }

    /// API path for publishing the presenter's current slide.
    #[must_use]
    pub fn current_slide_path(&self) -> String {
        format!("/sessions/{}/current-slide", self.session_id)
    }
}

// =============================================================================
// BACKEND
// =============================================================================

/// Session-level calls the presenter makes besides annotation storage.
#[async_trait::async_trait]
pub trait SessionBackend: Send + Sync {
    /// Tell the session which slide the presenter is on.
    async fn update_current_slide(&self, session_id: &str, slide: u32) -> Result<(), SessionError>;
}
