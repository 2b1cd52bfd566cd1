//! Sync payload for the note-taking service
//!
//! Each analyzed project becomes a project descriptor, one "mixed" note
//! (markdown body plus a JSON metadata blob), informational tags and status
//! flags. Colors come from fixed lookup tables; anything unmapped is gray.

use super::format_thousands;
use crate::summary::truncate_chars;
use chrono::{DateTime, TimeZone};
use organizer_sdk::errors::EngineError;
use organizer_sdk::payload::{NoteData, ProjectData, SyncEntry, SyncPayload, TagEntry};
use organizer_sdk::types::{AnalyzedProject, GitInfo};
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Write;

/// Fallback for tech and flag names missing from the tables
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Project color when the tech stack is empty or unmapped
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

pub const BUSINESS_CONTEXT_COLOR: &str = "#8b5cf6";
pub const CATEGORY_COLOR: &str = "#3b82f6";

/// Keyed by lowercase tech name
pub const TECH_COLORS: &[(&str, &str)] = &[
    ("laravel", "#f05340"),
    ("php", "#777bb4"),
    ("vue", "#42b883"),
    ("react", "#61dafb"),
    ("nextjs", "#000000"),
    ("angular", "#dd0031"),
    ("python", "#3776ab"),
    ("node", "#339933"),
    ("bash", "#4eaa25"),
    ("docker", "#2496ed"),
    ("go", "#00add8"),
    ("rust", "#ce422b"),
    ("ruby", "#cc342d"),
];

pub const FLAG_COLORS: &[(&str, &str)] = &[
    ("revenue-generating", "#fbbf24"),
    ("client-facing", "#8b5cf6"),
    ("needs-attention", "#f97316"),
    ("high-priority", "#ef4444"),
    ("production", "#10b981"),
    ("maintenance", "#6b7280"),
    ("experimental", "#06b6d4"),
    ("deprecated", "#991b1b"),
];

const NOTE_TYPE: &str = "mixed";
const DESCRIPTION_LIMIT: usize = 500;
const DOC_EXCERPT_LIMIT: usize = 500;
const TREE_EXCERPT_LIMIT: usize = 1000;

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(name, _)| *name == key).map(|(_, c)| *c)
}

pub fn tech_color(tech: &str) -> &'static str {
    lookup(TECH_COLORS, &tech.to_lowercase()).unwrap_or(DEFAULT_COLOR)
}

pub fn flag_color(flag: &str) -> &'static str {
    lookup(FLAG_COLORS, flag).unwrap_or(DEFAULT_COLOR)
}

/// Build the payload; `generated_at` is the only run-dependent field.
pub fn build_sync_payload<Tz>(
    projects: &[AnalyzedProject],
    generated_at: &DateTime<Tz>,
) -> Result<SyncPayload, EngineError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let entries = projects
        .iter()
        .map(build_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SyncPayload {
        generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        total_projects: projects.len(),
        projects: entries,
    })
}

/// Serialize the payload as pretty JSON with a trailing newline.
pub fn render_sync_payload(payload: &SyncPayload) -> Result<String, EngineError> {
    let mut json = serde_json::to_string_pretty(payload)
        .map_err(|e| EngineError::Report(format!("Failed to serialize sync payload: {}", e)))?;
    json.push('\n');
    Ok(json)
}

pub fn build_entry(project: &AnalyzedProject) -> Result<SyncEntry, EngineError> {
    let ai = &project.analysis;

    let metadata = serde_json::to_string_pretty(&NoteMetadata::from_project(project))
        .map_err(|e| EngineError::Report(format!("Failed to serialize note metadata: {}", e)))?;

    let color = ai
        .tech_stack
        .first()
        .and_then(|tech| lookup(TECH_COLORS, &tech.to_lowercase()))
        .unwrap_or(DEFAULT_PROJECT_COLOR);

    Ok(SyncEntry {
        project_data: ProjectData {
            name: ai.suggested_name.clone(),
            description: truncate_chars(&ai.description, DESCRIPTION_LIMIT).to_string(),
            color: color.to_string(),
        },
        note_data: NoteData {
            title: format!("{} [Analysis]", ai.suggested_name),
            note_type: NOTE_TYPE.to_string(),
            content: render_note_body(project),
            code_content: metadata,
        },
        tags: build_tags(project),
        flags: build_flags(project),
    })
}

/// Tech tags first, then business context, then category
pub fn build_tags(project: &AnalyzedProject) -> Vec<TagEntry> {
    let ai = &project.analysis;

    let mut tags: Vec<TagEntry> = ai
        .tech_stack
        .iter()
        .filter(|tech| !tech.is_empty())
        .map(|tech| {
            let name = tech.to_lowercase();
            let color = tech_color(&name);
            TagEntry::tag(name, color)
        })
        .collect();

    tags.push(TagEntry::tag(
        ai.business_context.as_str(),
        BUSINESS_CONTEXT_COLOR,
    ));
    tags.push(TagEntry::tag(ai.category.as_str(), CATEGORY_COLOR));

    tags
}

pub fn build_flags(project: &AnalyzedProject) -> Vec<TagEntry> {
    project
        .analysis
        .status_flags
        .iter()
        .filter(|flag| !flag.is_empty())
        .map(|flag| TagEntry::flag(flag.as_str(), flag_color(flag)))
        .collect()
}

/// Markdown body of the analysis note
pub fn render_note_body(project: &AnalyzedProject) -> String {
    let ai = &project.analysis;
    let record = &project.record;

    let mut md = String::new();

    // String formatting into a String cannot fail
    let _ = write!(
        md,
        "# {name}\n\n\
         ## Purpose\n\
         {description}\n\n\
         ## Business Context\n\
         **Type**: {context}\n\
         **Category**: {category}\n\n\
         ## Original Location\n\
         `{path}`\n\n\
         ## Project Metrics\n\
         - **Files**: {files}\n\
         - **Size**: {size}\n\
         - **Last Modified**: {modified}\n\n\
         ## Tech Stack\n\
         {stack}\n\n\
         ## Git Information\n",
        name = ai.suggested_name,
        description = ai.description,
        context = ai.business_context,
        category = ai.category,
        path = record.original_path_or_unknown(),
        files = format_thousands(record.file_count),
        size = record.size.as_deref().unwrap_or("unknown"),
        modified = record.last_modified.as_deref().unwrap_or("unknown"),
        stack = ai.tech_stack.join(", "),
    );

    match record.git.remote_url() {
        Some(remote) => {
            let _ = write!(
                md,
                "- **Remote**: {}\n\
                 - **Branch**: {}\n\
                 - **Has uncommitted changes**: {}\n",
                remote,
                record.git.branch.as_deref().unwrap_or("unknown"),
                if record.git.is_dirty() { "Yes" } else { "No" }
            );
        }
        None => md.push_str("- No git repository\n"),
    }

    if !record.documentation.is_empty() {
        let _ = write!(
            md,
            "\n## Documentation Excerpt\n```\n{}...\n```\n",
            truncate_chars(&record.documentation, DOC_EXCERPT_LIMIT)
        );
    }

    md
}

/// Structured blob stored in the note's `code_content`
#[derive(Debug, Serialize)]
struct NoteMetadata<'a> {
    original_path: Option<&'a str>,
    analyzed_at: Option<&'a str>,
    tech_stack: TechStackMetadata<'a>,
    git: &'a GitInfo,
    metrics: Metrics<'a>,
    tree_structure: &'a str,
    ai_confidence: &'static str,
}

#[derive(Debug, Serialize)]
struct TechStackMetadata<'a> {
    detected_types: Vec<String>,
    ai_identified: &'a [String],
}

#[derive(Debug, Serialize)]
struct Metrics<'a> {
    file_count: u64,
    size: Option<&'a str>,
    last_modified: Option<&'a str>,
}

impl<'a> NoteMetadata<'a> {
    fn from_project(project: &'a AnalyzedProject) -> Self {
        let record = &project.record;
        Self {
            original_path: record.original_path.as_deref(),
            analyzed_at: record.analyzed_at.as_deref(),
            tech_stack: TechStackMetadata {
                detected_types: record.detected_types(),
                ai_identified: &project.analysis.tech_stack,
            },
            git: &record.git,
            metrics: Metrics {
                file_count: record.file_count,
                size: record.size.as_deref(),
                last_modified: record.last_modified.as_deref(),
            },
            tree_structure: truncate_chars(&record.tree_structure, TREE_EXCERPT_LIMIT),
            ai_confidence: project.analysis.confidence.as_str(),
        }
    }
}
