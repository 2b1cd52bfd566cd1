//! Summary projection
//!
//! Reduces a full project record to the handful of fields sent to the
//! classifier. Free-text fields are capped so one verbose README cannot blow
//! up the request size.

use organizer_sdk::types::{ProjectRecord, NO_REMOTE};
use serde::Serialize;

/// Maximum characters of documentation or tree structure per summary
pub const SUMMARY_TEXT_LIMIT: usize = 500;

/// Outbound view of one project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub types: String,
    pub documentation: String,
    pub tree_structure: String,
    pub file_count: u64,
    pub git_remote: String,
}

impl ProjectSummary {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let name = if record.name.is_empty() {
            "unknown".to_string()
        } else {
            record.name.clone()
        };

        Self {
            name,
            types: record.types.clone(),
            documentation: truncate_chars(&record.documentation, SUMMARY_TEXT_LIMIT).to_string(),
            tree_structure: truncate_chars(&record.tree_structure, SUMMARY_TEXT_LIMIT).to_string(),
            file_count: record.file_count,
            git_remote: record
                .git
                .remote
                .clone()
                .unwrap_or_else(|| NO_REMOTE.to_string()),
        }
    }
}

/// First `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use organizer_sdk::types::GitInfo;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_summary_caps_long_text() {
        let mut record = ProjectRecord::new("big", "node");
        record.documentation = "d".repeat(2_000);
        record.tree_structure = "t".repeat(750);

        let summary = ProjectSummary::from_record(&record);
        assert_eq!(summary.documentation.chars().count(), SUMMARY_TEXT_LIMIT);
        assert_eq!(summary.tree_structure.chars().count(), SUMMARY_TEXT_LIMIT);
    }

    #[test]
    fn test_summary_defaults() {
        let summary = ProjectSummary::from_record(&ProjectRecord::default());
        assert_eq!(summary.name, "unknown");
        assert_eq!(summary.types, "");
        assert_eq!(summary.file_count, 0);
        assert_eq!(summary.git_remote, "none");
    }

    #[test]
    fn test_summary_carries_remote() {
        let mut record = ProjectRecord::new("site", "vue");
        record.git = GitInfo {
            remote: Some("https://github.com/me/site".into()),
            ..Default::default()
        };
        record.file_count = 42;

        let summary = ProjectSummary::from_record(&record);
        assert_eq!(summary.git_remote, "https://github.com/me/site");
        assert_eq!(summary.file_count, 42);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["git_remote"], "https://github.com/me/site");
    }
}
