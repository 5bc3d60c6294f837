//! Assistant capability layer.
//!
//! # Responsibility
//! - Define the provider SPI for AI-backed meeting assistance (action-item
//!   extraction, summarization, email drafting, screenshot analysis).
//! - Provide in-process registration and active-provider selection.
//!
//! # Invariants
//! - Provider failures are data (`AssistErrorEnvelope`), never panics.
//! - No concrete network provider ships in this crate; embedding
//!   applications register their own adapters.

pub mod parse;
pub mod provider_registry;
pub mod provider_spi;
pub mod provider_types;
