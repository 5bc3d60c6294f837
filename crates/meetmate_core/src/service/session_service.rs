//! Meeting session controller.
//!
//! # Responsibility
//! - Own explicit session state transitions: notes update, action-item
//!   analysis, screenshot capture, summary generation, email drafting.
//! - Persist the aggregate after each successful transition.
//!
//! # Invariants
//! - Assistant extraction failures of any kind fall back to deterministic
//!   pattern extraction; analysis never fails on provider trouble.
//! - Summary and email generation have no fallback path; provider failures
//!   propagate to the caller.
//! - Session state is passed and returned explicitly, never held as
//!   ambient global state.

use crate::assist::provider_registry::AssistantRegistry;
use crate::assist::provider_types::{
    AnalyzeScreenshotRequest, AssistErrorEnvelope, DraftEmailRequest, ExtractActionItemsRequest,
    SummarizeContentRequest,
};
use crate::extract::fallback::extract_action_items;
use crate::model::action_item::ActionItem;
use crate::model::session::{MeetingSession, ScreenshotCapture, SessionId};
use crate::repo::session_repo::{RepoError, RepoResult, SessionListQuery, SessionRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which path produced the current action-item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Items returned by the active assistant provider.
    Assistant,
    /// Items produced by deterministic pattern extraction.
    Fallback,
}

impl AnalysisSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Fallback => "fallback",
        }
    }
}

/// Result envelope for one notes analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Extracted items, already persisted on the session.
    pub items: Vec<ActionItem>,
    /// Path that produced the items.
    pub source: AnalysisSource,
}

/// Service error for session use-cases.
#[derive(Debug)]
pub enum SessionServiceError {
    /// Target session does not exist or is deleted.
    SessionNotFound(SessionId),
    /// Notes are blank; nothing to analyze.
    EmptyNotes(SessionId),
    /// Session has neither notes nor screenshots; nothing to summarize.
    NothingToSummarize(SessionId),
    /// Email drafting requires an existing summary.
    SummaryRequired(SessionId),
    /// Assistant failure on a path without fallback.
    Assist(AssistErrorEnvelope),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for SessionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotFound(id) => write!(f, "session not found: {id}"),
            Self::EmptyNotes(id) => write!(f, "session {id} has no notes to analyze"),
            Self::NothingToSummarize(id) => {
                write!(f, "session {id} has neither notes nor screenshots")
            }
            Self::SummaryRequired(id) => {
                write!(f, "session {id} has no summary; draft one first")
            }
            Self::Assist(envelope) => write!(f, "{envelope}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent session state: {details}"),
        }
    }
}

impl Error for SessionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Assist(envelope) => Some(envelope),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::SessionNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Session use-case facade over repository implementations.
pub struct SessionService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> SessionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an empty session and returns the persisted record.
    pub fn create_session(&self) -> Result<MeetingSession, SessionServiceError> {
        let session = MeetingSession::new();
        let id = self.repo.create_session(&session)?;
        info!("event=session_create module=service status=ok session={id}");
        self.repo
            .get_session(id, false)?
            .ok_or(SessionServiceError::InconsistentState(
                "created session not found in read-back",
            ))
    }

    /// Gets one session by stable ID.
    pub fn get_session(
        &self,
        id: SessionId,
        include_deleted: bool,
    ) -> RepoResult<Option<MeetingSession>> {
        self.repo.get_session(id, include_deleted)
    }

    /// Lists sessions using filter and pagination options.
    pub fn list_sessions(&self, query: &SessionListQuery) -> RepoResult<Vec<MeetingSession>> {
        self.repo.list_sessions(query)
    }

    /// Replaces the session's note text and persists.
    ///
    /// Every call is an explicit save; hosts that capture keystrokes should
    /// debounce before calling.
    pub fn update_notes(
        &self,
        id: SessionId,
        notes: impl Into<String>,
    ) -> Result<MeetingSession, SessionServiceError> {
        let mut session = self.load_active(id)?;
        session.notes = notes.into();
        self.repo.update_session(&session)?;
        info!("event=notes_update module=service status=ok session={id}");
        Ok(session)
    }

    /// Analyzes the session's notes into action items.
    ///
    /// # Contract
    /// - Blank notes are rejected with `EmptyNotes`.
    /// - The active assistant is tried first; on any failure (no provider
    ///   selected, provider error, output not usable as a task list) the
    ///   deterministic fallback extractor runs instead.
    /// - The previous action-item set is fully replaced, then persisted.
    pub fn analyze_notes(
        &self,
        id: SessionId,
        assistants: &AssistantRegistry,
    ) -> Result<AnalysisOutcome, SessionServiceError> {
        let mut session = self.load_active(id)?;
        if session.notes.trim().is_empty() {
            return Err(SessionServiceError::EmptyNotes(id));
        }

        let (items, source) = match assistants.extract_action_items_active(
            ExtractActionItemsRequest {
                notes: session.notes.clone(),
            },
        ) {
            Ok(result) if result.items.iter().all(ActionItem::is_valid) => {
                (result.items, AnalysisSource::Assistant)
            }
            Ok(_) => {
                warn!(
                    "event=notes_analyze module=service status=fallback session={id} reason=invalid_items"
                );
                (extract_action_items(&session.notes), AnalysisSource::Fallback)
            }
            Err(envelope) => {
                warn!(
                    "event=notes_analyze module=service status=fallback session={id} provider={} code={}",
                    envelope.provider_id, envelope.code
                );
                (extract_action_items(&session.notes), AnalysisSource::Fallback)
            }
        };

        session.action_items = items.clone();
        self.repo.update_session(&session)?;
        info!(
            "event=notes_analyze module=service status=ok session={id} source={} item_count={}",
            source.as_str(),
            items.len()
        );

        Ok(AnalysisOutcome { items, source })
    }

    /// Attaches one screenshot capture to the session and persists.
    ///
    /// Assistant analysis is attempted but optional: a provider failure
    /// stores the capture without analysis instead of failing the call.
    pub fn attach_screenshot(
        &self,
        id: SessionId,
        image_data: impl Into<String>,
        captured_at_ms: i64,
        assistants: &AssistantRegistry,
    ) -> Result<ScreenshotCapture, SessionServiceError> {
        let mut session = self.load_active(id)?;
        let mut capture = ScreenshotCapture::new(image_data, captured_at_ms);

        match assistants.analyze_screenshot_active(AnalyzeScreenshotRequest {
            image_data: capture.image_data.clone(),
        }) {
            Ok(result) => capture.analysis = Some(result.analysis),
            Err(envelope) => {
                warn!(
                    "event=screenshot_analyze module=service status=skipped session={id} provider={} code={}",
                    envelope.provider_id, envelope.code
                );
            }
        }

        session.screenshots.push(capture.clone());
        self.repo.update_session(&session)?;
        info!(
            "event=screenshot_attach module=service status=ok session={id} capture={} analyzed={}",
            capture.uuid,
            capture.analysis.is_some()
        );

        Ok(capture)
    }

    /// Generates and persists a meeting summary.
    ///
    /// # Contract
    /// - Sessions with neither notes nor screenshots are rejected.
    /// - Assistant failures propagate; there is no fallback summarizer.
    pub fn generate_summary(
        &self,
        id: SessionId,
        assistants: &AssistantRegistry,
    ) -> Result<String, SessionServiceError> {
        let mut session = self.load_active(id)?;
        if !session.has_content() {
            return Err(SessionServiceError::NothingToSummarize(id));
        }

        let content = build_summary_content(&session);
        let result = assistants
            .summarize_content_active(SummarizeContentRequest { content })
            .map_err(SessionServiceError::Assist)?;

        session.summary = Some(result.summary.clone());
        self.repo.update_session(&session)?;
        info!("event=summary_generate module=service status=ok session={id}");

        Ok(result.summary)
    }

    /// Drafts and persists a follow-up email.
    ///
    /// # Contract
    /// - A summary must already exist (`SummaryRequired` otherwise).
    /// - Assistant failures propagate; there is no fallback drafter.
    pub fn draft_email(
        &self,
        id: SessionId,
        assistants: &AssistantRegistry,
    ) -> Result<String, SessionServiceError> {
        let mut session = self.load_active(id)?;
        let Some(summary) = session.summary.clone() else {
            return Err(SessionServiceError::SummaryRequired(id));
        };

        let result = assistants
            .draft_email_active(DraftEmailRequest {
                summary,
                action_items: session.action_items.clone(),
            })
            .map_err(SessionServiceError::Assist)?;

        session.email = Some(result.email.clone());
        self.repo.update_session(&session)?;
        info!("event=email_draft module=service status=ok session={id}");

        Ok(result.email)
    }

    /// Soft-deletes a session by ID.
    pub fn soft_delete_session(&self, id: SessionId) -> RepoResult<()> {
        self.repo.soft_delete_session(id)
    }

    fn load_active(&self, id: SessionId) -> Result<MeetingSession, SessionServiceError> {
        self.repo
            .get_session(id, false)?
            .ok_or(SessionServiceError::SessionNotFound(id))
    }
}

/// Builds the combined content document handed to the summarizer.
///
/// Sections, in order: raw notes, action-item bullets (with `(assignee)`
/// and `- Due: deadline` suffixes), capture count plus per-slide analyses.
/// Sections for empty collections are omitted entirely.
pub fn build_summary_content(session: &MeetingSession) -> String {
    let mut content = String::new();

    if !session.notes.is_empty() {
        content.push_str("Meeting Notes:\n");
        content.push_str(&session.notes);
        content.push_str("\n\n");
    }

    if !session.action_items.is_empty() {
        content.push_str("Action Items:\n");
        for item in &session.action_items {
            content.push_str("- ");
            content.push_str(&item.task);
            if let Some(assignee) = &item.assignee {
                content.push_str(&format!(" ({assignee})"));
            }
            if let Some(deadline) = &item.deadline {
                content.push_str(&format!(" - Due: {deadline}"));
            }
            content.push('\n');
        }
        content.push('\n');
    }

    if !session.screenshots.is_empty() {
        content.push_str(&format!(
            "Captured {} slide(s)\n",
            session.screenshots.len()
        ));
        for (index, capture) in session.screenshots.iter().enumerate() {
            if let Some(analysis) = &capture.analysis {
                content.push_str(&format!("\nSlide {}:\n{analysis}\n", index + 1));
            }
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::build_summary_content;
    use crate::model::action_item::ActionItem;
    use crate::model::session::{MeetingSession, ScreenshotCapture};

    #[test]
    fn summary_content_includes_all_populated_sections() {
        let mut session = MeetingSession::new();
        session.notes = "discussed roadmap".to_string();
        session.action_items.push(ActionItem {
            task: "send the report".to_string(),
            assignee: Some("John".to_string()),
            deadline: Some("Friday".to_string()),
        });
        session.action_items.push(ActionItem::new("book a room"));
        let mut capture = ScreenshotCapture::new("data:image/png;base64,AAA", 0);
        capture.analysis = Some("Q3 targets".to_string());
        session.screenshots.push(capture);
        session
            .screenshots
            .push(ScreenshotCapture::new("data:image/png;base64,BBB", 1));

        let content = build_summary_content(&session);
        assert!(content.starts_with("Meeting Notes:\ndiscussed roadmap\n\n"));
        assert!(content.contains("Action Items:\n- send the report (John) - Due: Friday\n- book a room\n"));
        assert!(content.contains("Captured 2 slide(s)\n"));
        assert!(content.contains("\nSlide 1:\nQ3 targets\n"));
        assert!(!content.contains("Slide 2:"));
    }

    #[test]
    fn summary_content_omits_empty_sections() {
        let mut session = MeetingSession::new();
        session.notes = "just notes".to_string();

        let content = build_summary_content(&session);
        assert!(content.contains("Meeting Notes:"));
        assert!(!content.contains("Action Items:"));
        assert!(!content.contains("Captured"));
    }
}
