//! Deterministic action-item extraction.
//!
//! # Responsibility
//! - Provide the non-AI extraction path used whenever assistant-based
//!   extraction is unavailable or fails.
//!
//! # Invariants
//! - Extraction is total over all string inputs and has no side effects.
//! - Output order always matches input line order.

pub mod fallback;
