//! Unified domain model for meeting-companion data.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one aggregate shape (`MeetingSession`) for notes, extracted action
//!   items, screenshot captures and generated artifacts.
//!
//! # Invariants
//! - Every session is identified by a stable `SessionId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod action_item;
pub mod session;
