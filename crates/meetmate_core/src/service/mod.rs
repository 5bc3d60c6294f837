//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and assistant calls into use-case level APIs.
//! - Keep CLI/host layers decoupled from storage and provider details.

pub mod session_service;
