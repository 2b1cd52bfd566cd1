//! Sync payload consumed by the note-taking service
//!
//! The shape mirrors what the service's `/api/sync/projects` endpoint
//! accepts: a list of `{project_data, note_data, tags, flags}` entries.

use serde::{Deserialize, Serialize};

/// Top-level sync document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub generated_at: String,
    pub total_projects: usize,
    pub projects: Vec<SyncEntry>,
}

/// One project's worth of sync data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEntry {
    pub project_data: ProjectData,
    pub note_data: NoteData,
    pub tags: Vec<TagEntry>,
    pub flags: Vec<TagEntry>,
}

/// Project descriptor created or updated by name on the service side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Analysis note attached to the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    pub title: String,

    #[serde(rename = "type")]
    pub note_type: String,

    /// Markdown body
    pub content: String,

    /// Pretty-printed JSON metadata blob
    pub code_content: String,
}

/// Tag or flag, distinguished by `is_flag`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub color: String,
    pub is_flag: bool,
}

impl TagEntry {
    pub fn tag(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            is_flag: false,
        }
    }

    pub fn flag(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            is_flag: true,
        }
    }
}
