//! Meeting session aggregate model.
//!
//! # Responsibility
//! - Define the persisted per-meeting record: notes, extracted action items,
//!   screenshot captures, generated summary and email draft.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another session.
//! - `is_deleted` is the source of truth for tombstone state.
//! - An email draft can only exist once a summary exists.
//! - Screenshot captures carry non-empty payloads and non-negative timestamps.

use crate::model::action_item::ActionItem;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one meeting session.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SessionId = Uuid;

/// One captured screenshot with optional assistant analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotCapture {
    /// Stable capture ID used for gallery references and auditing.
    pub uuid: Uuid,
    /// Capture wall-clock in epoch milliseconds.
    pub captured_at_ms: i64,
    /// Opaque image payload in data-URL form.
    pub image_data: String,
    /// Assistant-produced slide analysis; `None` when analysis was
    /// unavailable or failed.
    pub analysis: Option<String>,
}

impl ScreenshotCapture {
    /// Creates a capture with a generated stable ID and no analysis yet.
    pub fn new(image_data: impl Into<String>, captured_at_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            captured_at_ms,
            image_data: image_data.into(),
            analysis: None,
        }
    }
}

/// Aggregate record for one meeting, persisted across panel reopenings.
///
/// State is owned explicitly by the session controller and passed/returned;
/// there is no ambient global session object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSession {
    /// Stable global ID used for storage keys and CLI lookup.
    pub uuid: SessionId,
    /// Raw free-text meeting notes.
    pub notes: String,
    /// Result of the most recent extraction call. Fully replaced on every
    /// successful analysis, never merged.
    pub action_items: Vec<ActionItem>,
    /// Captured screenshots in capture order.
    pub screenshots: Vec<ScreenshotCapture>,
    /// Generated meeting summary, if any.
    pub summary: Option<String>,
    /// Drafted follow-up email. Requires `summary` to be present.
    pub email: Option<String>,
    /// Soft delete tombstone to preserve history.
    pub is_deleted: bool,
}

/// Validation errors for the session aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// `email` is set while `summary` is absent.
    EmailWithoutSummary,
    /// An action item has an empty task after trimming.
    EmptyActionItemTask { index: usize },
    /// A screenshot has an empty image payload.
    EmptyScreenshotData { index: usize },
    /// A screenshot carries a negative capture timestamp.
    NegativeCaptureTimestamp { index: usize, captured_at_ms: i64 },
}

impl Display for SessionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailWithoutSummary => {
                write!(f, "email draft requires an existing summary")
            }
            Self::EmptyActionItemTask { index } => {
                write!(f, "action item {index} has an empty task")
            }
            Self::EmptyScreenshotData { index } => {
                write!(f, "screenshot {index} has an empty image payload")
            }
            Self::NegativeCaptureTimestamp {
                index,
                captured_at_ms,
            } => {
                write!(
                    f,
                    "screenshot {index} has a negative capture timestamp: {captured_at_ms}"
                )
            }
        }
    }
}

impl Error for SessionValidationError {}

impl MeetingSession {
    /// Creates an empty session with a generated stable ID.
    ///
    /// # Invariants
    /// - All artifact fields start empty/absent.
    /// - `is_deleted` starts as `false`.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty session with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: SessionId) -> Self {
        Self {
            uuid,
            notes: String::new(),
            action_items: Vec::new(),
            screenshots: Vec::new(),
            summary: None,
            email: None,
            is_deleted: false,
        }
    }

    /// Checks the aggregate invariants.
    ///
    /// Called by repository write paths before persistence and by read paths
    /// on rows loaded from storage.
    pub fn validate(&self) -> Result<(), SessionValidationError> {
        if self.email.is_some() && self.summary.is_none() {
            return Err(SessionValidationError::EmailWithoutSummary);
        }
        for (index, item) in self.action_items.iter().enumerate() {
            if !item.is_valid() {
                return Err(SessionValidationError::EmptyActionItemTask { index });
            }
        }
        for (index, capture) in self.screenshots.iter().enumerate() {
            if capture.image_data.is_empty() {
                return Err(SessionValidationError::EmptyScreenshotData { index });
            }
            if capture.captured_at_ms < 0 {
                return Err(SessionValidationError::NegativeCaptureTimestamp {
                    index,
                    captured_at_ms: capture.captured_at_ms,
                });
            }
        }
        Ok(())
    }

    /// Returns whether the session has any summarizable content.
    pub fn has_content(&self) -> bool {
        !self.notes.is_empty() || !self.screenshots.is_empty()
    }

    /// Marks this session as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this session should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

impl Default for MeetingSession {
    fn default() -> Self {
        Self::new()
    }
}
