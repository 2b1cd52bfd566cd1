//! Project Organizer SDK
//!
//! Shared data model for the organizer: the scanned project inventory, the
//! classifier's verdicts, the sync payload handed to the note-taking service,
//! and the engine error type.

/// Error types and handling
pub mod errors;

/// Project inventory and classification types
pub mod types;

/// Note-sync payload types
pub mod payload;

// Re-export commonly used types
pub use errors::{EngineError, OrganizerErrorExt};
pub use payload::{NoteData, ProjectData, SyncEntry, SyncPayload, TagEntry};
pub use types::{
    AnalyzedProject, BusinessContext, Category, Classification, ClassificationSource, Confidence,
    GitInfo, ProjectRecord,
};
