//! Project inventory and classification types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Sentinel the scanner writes when a project has no git remote
pub const NO_REMOTE: &str = "none";

/// Description attached to locally synthesized classifications
pub const FALLBACK_DESCRIPTION: &str = "Automatically categorized";

/// Treat an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One project as produced by the upstream scanner.
///
/// Only the fields the pipeline reads are typed; anything else the scanner
/// emits is kept in `extra` so the record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Comma-joined tech tags detected by the scanner
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub documentation: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tree_structure: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub file_count: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub git: GitInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,

    /// Human-readable size as reported by the scanner (e.g. "12M")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    /// Create a record with just a name and detected types
    pub fn new(name: impl Into<String>, types: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: types.into(),
            ..Default::default()
        }
    }

    /// Detected types split on commas, trimmed, empties dropped
    pub fn detected_types(&self) -> Vec<String> {
        self.types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn original_path_or_unknown(&self) -> &str {
        self.original_path.as_deref().unwrap_or("unknown")
    }
}

/// Git sub-mapping of a project record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Kept loose: shell scanners emit booleans, strings or 0/1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_uncommitted_changes: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitInfo {
    /// The remote URL, unless it is absent, empty or the "none" sentinel
    pub fn remote_url(&self) -> Option<&str> {
        self.remote
            .as_deref()
            .filter(|r| !r.is_empty() && *r != NO_REMOTE)
    }

    pub fn is_dirty(&self) -> bool {
        match &self.has_uncommitted_changes {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => false,
        }
    }
}

/// Project category assigned by the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    WebApps,
    Scripts,
    Infrastructure,
    Libraries,
    Documentation,
    Research,
    #[default]
    #[serde(other)]
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebApps => "web-apps",
            Category::Scripts => "scripts",
            Category::Infrastructure => "infrastructure",
            Category::Libraries => "libraries",
            Category::Documentation => "documentation",
            Category::Research => "research",
            Category::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business context assigned by the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessContext {
    ClientFacing,
    InternalTool,
    Automation,
    Research,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BusinessContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessContext::ClientFacing => "client-facing",
            BusinessContext::InternalTool => "internal-tool",
            BusinessContext::Automation => "automation",
            BusinessContext::Research => "research",
            BusinessContext::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BusinessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier confidence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classifier's verdict for one project (`ai_analysis`)
///
/// `suggested_name` and `category` are required when decoding a remote
/// response; the other fields fall back to their defaults when missing or
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub suggested_name: String,

    pub category: Category,

    #[serde(default, deserialize_with = "null_as_default")]
    pub business_context: BusinessContext,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status_flags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: Confidence,
}

impl Classification {
    /// Locally synthesized classification used when the classifier has no
    /// entry for a project
    pub fn fallback_for(record: &ProjectRecord) -> Self {
        Self {
            suggested_name: record.name.clone(),
            category: Category::Uncategorized,
            business_context: BusinessContext::Unknown,
            description: FALLBACK_DESCRIPTION.to_string(),
            tech_stack: record.detected_types(),
            status_flags: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}

/// Where a project's classification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    Remote,
    Fallback,
}

/// A loaded record paired with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedProject {
    pub record: ProjectRecord,
    pub analysis: Classification,
    pub source: ClassificationSource,
}

impl AnalyzedProject {
    pub fn remote(record: ProjectRecord, analysis: Classification) -> Self {
        Self {
            record,
            analysis,
            source: ClassificationSource::Remote,
        }
    }

    pub fn fallback(record: ProjectRecord) -> Self {
        let analysis = Classification::fallback_for(&record);
        Self {
            record,
            analysis,
            source: ClassificationSource::Fallback,
        }
    }
}
