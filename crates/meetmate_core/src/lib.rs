//! Core domain logic for MeetMate.
//! This crate is the single source of truth for business invariants.

pub mod assist;
pub mod db;
pub mod detect;
pub mod extract;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use assist::parse::{parse_action_items_json, ActionItemParseError};
pub use assist::provider_registry::{AssistantRegistry, AssistantRegistryError};
pub use assist::provider_spi::AssistantSpi;
pub use assist::provider_types::{
    AnalyzeScreenshotRequest, AnalyzeScreenshotResult, AssistAvailability, AssistErrorEnvelope,
    AssistResult, AssistStage, AssistantStatus, DraftEmailRequest, DraftEmailResult,
    ExtractActionItemsRequest, ExtractActionItemsResult, SummarizeContentRequest, SummarizeResult,
};
pub use detect::{is_meet_url, meeting_signal, PageSnapshot, MEETING_MARKER_SELECTORS};
pub use extract::fallback::extract_action_items;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::action_item::ActionItem;
pub use model::session::{
    MeetingSession, ScreenshotCapture, SessionId, SessionValidationError,
};
pub use repo::session_repo::{
    RepoError, RepoResult, SessionListQuery, SessionRepository, SqliteSessionRepository,
};
pub use service::session_service::{
    build_summary_content, AnalysisOutcome, AnalysisSource, SessionService, SessionServiceError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
