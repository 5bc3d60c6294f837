//! Request/result contracts shared by assistant providers.
//!
//! # Responsibility
//! - Define the typed call surface of the assistant SPI.
//! - Define the serializable error envelope used for every provider failure.
//!
//! # Invariants
//! - Envelope `code` values are stable machine-readable identifiers.
//! - Stage values map one-to-one to SPI capabilities.

use crate::model::action_item::ActionItem;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for all assistant SPI calls.
pub type AssistResult<T> = Result<T, AssistErrorEnvelope>;

/// Capability stage an assistant call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistStage {
    ExtractActionItems,
    SummarizeContent,
    DraftEmail,
    AnalyzeScreenshot,
}

impl AssistStage {
    /// Stable string id used in logs and envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExtractActionItems => "extract_action_items",
            Self::SummarizeContent => "summarize_content",
            Self::DraftEmail => "draft_email",
            Self::AnalyzeScreenshot => "analyze_screenshot",
        }
    }
}

/// Serializable failure envelope returned by assistant providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistErrorEnvelope {
    /// Provider id the failure originated from (`registry` for selection
    /// failures).
    pub provider_id: String,
    /// Capability stage the call belonged to.
    pub stage: AssistStage,
    /// Stable machine-readable failure code.
    pub code: String,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Whether retrying the same call may succeed.
    pub retryable: bool,
}

impl AssistErrorEnvelope {
    pub fn new(
        provider_id: impl Into<String>,
        stage: AssistStage,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            stage,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for AssistErrorEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "assistant failure provider={} stage={} code={}: {}",
            self.provider_id,
            self.stage.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for AssistErrorEnvelope {}

/// Coarse readiness signal reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistAvailability {
    Ready,
    Unavailable,
}

/// Status snapshot for one registered provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantStatus {
    pub provider_id: String,
    pub availability: AssistAvailability,
}

/// Extraction request: raw multi-line meeting notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractActionItemsRequest {
    pub notes: String,
}

/// Extraction result: parsed task objects in notes order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractActionItemsResult {
    pub items: Vec<ActionItem>,
}

/// Summarization request over a pre-combined content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeContentRequest {
    pub content: String,
}

/// Summarization result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeResult {
    pub summary: String,
}

/// Email drafting request built from summary and action items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEmailRequest {
    pub summary: String,
    pub action_items: Vec<ActionItem>,
}

/// Email drafting result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEmailResult {
    pub email: String,
}

/// Screenshot analysis request carrying the opaque image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeScreenshotRequest {
    pub image_data: String,
}

/// Screenshot analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeScreenshotResult {
    pub analysis: String,
}
