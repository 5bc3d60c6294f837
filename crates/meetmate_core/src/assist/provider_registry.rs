//! In-process assistant registry and selection hooks.

use crate::assist::provider_spi::AssistantSpi;
use crate::assist::provider_types::{
    AnalyzeScreenshotRequest, AnalyzeScreenshotResult, AssistErrorEnvelope, AssistResult,
    AssistStage, AssistantStatus, DraftEmailRequest, DraftEmailResult, ExtractActionItemsRequest,
    ExtractActionItemsResult, SummarizeContentRequest, SummarizeResult,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Provider registration/selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantRegistryError {
    InvalidProviderId(String),
    DuplicateProviderId(String),
    ProviderNotFound(String),
}

impl Display for AssistantRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProviderId(value) => write!(f, "provider id is invalid: {value}"),
            Self::DuplicateProviderId(value) => {
                write!(f, "provider id already registered: {value}")
            }
            Self::ProviderNotFound(value) => write!(f, "provider not found: {value}"),
        }
    }
}

impl Error for AssistantRegistryError {}

/// Runtime assistant SPI registry.
///
/// Holds every registered adapter plus at most one active selection. All
/// `*_active` calls fail with a `provider_not_selected` envelope when no
/// provider is selected, which callers treat as a fallback trigger.
#[derive(Default)]
pub struct AssistantRegistry {
    providers: BTreeMap<String, Arc<dyn AssistantSpi>>,
    active_provider_id: Option<String>,
}

impl AssistantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one assistant adapter.
    pub fn register(
        &mut self,
        provider: Arc<dyn AssistantSpi>,
    ) -> Result<(), AssistantRegistryError> {
        let provider_id = provider.provider_id().trim().to_string();
        if !is_valid_provider_id(&provider_id) {
            return Err(AssistantRegistryError::InvalidProviderId(provider_id));
        }
        if self.providers.contains_key(provider_id.as_str()) {
            return Err(AssistantRegistryError::DuplicateProviderId(provider_id));
        }

        self.providers.insert(provider_id, provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns sorted provider ids.
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Selects one active provider.
    pub fn select_active(&mut self, provider_id: &str) -> Result<(), AssistantRegistryError> {
        let normalized = provider_id.trim();
        if !self.providers.contains_key(normalized) {
            return Err(AssistantRegistryError::ProviderNotFound(
                normalized.to_string(),
            ));
        }
        self.active_provider_id = Some(normalized.to_string());
        Ok(())
    }

    /// Clears active provider selection.
    pub fn clear_active(&mut self) {
        self.active_provider_id = None;
    }

    /// Returns active provider id.
    pub fn active_provider_id(&self) -> Option<&str> {
        self.active_provider_id.as_deref()
    }

    /// Returns one provider by id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn AssistantSpi>> {
        self.providers.get(provider_id.trim()).cloned()
    }

    /// Returns active provider handle.
    pub fn active_provider(&self) -> Option<Arc<dyn AssistantSpi>> {
        let id = self.active_provider_id()?;
        self.get(id)
    }

    /// Returns status for one provider.
    pub fn provider_status(&self, provider_id: &str) -> Option<AssistantStatus> {
        self.get(provider_id).map(|provider| provider.status())
    }

    /// Returns status for current active provider.
    pub fn active_status(&self) -> Option<AssistantStatus> {
        self.active_provider().map(|provider| provider.status())
    }

    /// Executes action-item extraction against the selected provider.
    pub fn extract_action_items_active(
        &self,
        request: ExtractActionItemsRequest,
    ) -> AssistResult<ExtractActionItemsResult> {
        self.require_active(AssistStage::ExtractActionItems)?
            .extract_action_items(request)
    }

    /// Executes summarization against the selected provider.
    pub fn summarize_content_active(
        &self,
        request: SummarizeContentRequest,
    ) -> AssistResult<SummarizeResult> {
        self.require_active(AssistStage::SummarizeContent)?
            .summarize_content(request)
    }

    /// Executes email drafting against the selected provider.
    pub fn draft_email_active(&self, request: DraftEmailRequest) -> AssistResult<DraftEmailResult> {
        self.require_active(AssistStage::DraftEmail)?
            .draft_email(request)
    }

    /// Executes screenshot analysis against the selected provider.
    pub fn analyze_screenshot_active(
        &self,
        request: AnalyzeScreenshotRequest,
    ) -> AssistResult<AnalyzeScreenshotResult> {
        self.require_active(AssistStage::AnalyzeScreenshot)?
            .analyze_screenshot(request)
    }

    fn require_active(&self, stage: AssistStage) -> AssistResult<Arc<dyn AssistantSpi>> {
        match self.active_provider() {
            Some(provider) => Ok(provider),
            None => Err(AssistErrorEnvelope::new(
                "registry",
                stage,
                "provider_not_selected",
                "No active assistant provider selected.",
                false,
            )),
        }
    }
}

fn is_valid_provider_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
