//! Project Organizer Engine Library
//!
//! This library provides the core functionality of the project organizer.
//! It is used by both the main binary and integration tests.

/// Configuration management module
pub mod config;

/// API key handling and log scrubbing
pub mod secrets;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Project inventory loading
pub mod store;

/// Outbound project summaries
pub mod summary;

/// Remote classifier abstraction and the Gemini client
pub mod llm;

/// Batch orchestration
pub mod conductor;

/// Proposal and sync payload generation
pub mod report;

/// Command handlers module
pub mod handlers;
