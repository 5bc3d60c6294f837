//! Assistant provider SPI.

use crate::assist::provider_types::{
    AnalyzeScreenshotRequest, AnalyzeScreenshotResult, AssistResult, AssistantStatus,
    DraftEmailRequest, DraftEmailResult, ExtractActionItemsRequest, ExtractActionItemsResult,
    SummarizeContentRequest, SummarizeResult,
};

/// Abstraction over AI meeting-assistant backends.
///
/// Implementations adapt one concrete model service (on-device language
/// model, hosted API, test double) to the typed call surface. The call
/// surface is synchronous; adapters own any transport concerns internally.
/// Every failure is reported as an `AssistErrorEnvelope`, never a panic.
pub trait AssistantSpi: Send + Sync {
    /// Returns the stable provider id.
    ///
    /// Must be lowercase ascii, digits, `_` or `-`.
    fn provider_id(&self) -> &str;

    /// Returns a current readiness snapshot.
    fn status(&self) -> AssistantStatus;

    /// Extracts action items from raw meeting notes.
    ///
    /// Output that cannot be produced as a list of task objects must be
    /// reported as an error envelope; callers treat any failure as the
    /// trigger for deterministic fallback extraction.
    fn extract_action_items(
        &self,
        request: ExtractActionItemsRequest,
    ) -> AssistResult<ExtractActionItemsResult>;

    /// Produces a meeting summary from a pre-combined content document.
    fn summarize_content(&self, request: SummarizeContentRequest) -> AssistResult<SummarizeResult>;

    /// Drafts a follow-up email from a summary and action items.
    fn draft_email(&self, request: DraftEmailRequest) -> AssistResult<DraftEmailResult>;

    /// Analyzes one captured screenshot/slide image.
    fn analyze_screenshot(
        &self,
        request: AnalyzeScreenshotRequest,
    ) -> AssistResult<AnalyzeScreenshotResult>;
}
