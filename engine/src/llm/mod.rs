//! Remote classifier abstraction
//!
//! A [`Classifier`] takes one batch of project summaries and returns a
//! [`ClassifierOutcome`]. Implementations never surface errors to the
//! caller: any transport, status or decoding failure becomes
//! `ClassifierOutcome::Unavailable`, which the conductor turns into local
//! fallback classifications.
//!
//! Decoding the model's reply is two-stage:
//! 1. pull the candidate text out of the provider's response envelope;
//! 2. strip an optional markdown fence and strictly decode a JSON array of
//!    [`Classification`] values.

use async_trait::async_trait;
use organizer_sdk::types::Classification;

use crate::summary::ProjectSummary;

pub mod gemini;

/// Result type for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors that can occur while talking to the classifier
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// What a classifier produced for one batch
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutcome {
    /// Classifications in the same order as the submitted summaries
    Parsed(Vec<Classification>),

    /// No classifications for this batch; carries a log-safe reason
    Unavailable(String),
}

impl From<Result<Vec<Classification>>> for ClassifierOutcome {
    fn from(result: Result<Vec<Classification>>) -> Self {
        match result {
            Ok(list) => ClassifierOutcome::Parsed(list),
            Err(e) => ClassifierOutcome::Unavailable(e.to_string()),
        }
    }
}

/// Classifier trait that remote (and test) backends implement
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Returns the name of the backend (e.g., "gemini")
    fn name(&self) -> &str;

    /// Classify one batch of summaries
    ///
    /// The returned list is aligned with `batch` by position only. It may
    /// be shorter than the batch.
    async fn classify(&self, batch: &[ProjectSummary]) -> ClassifierOutcome;
}

/// Decode the model's free-form reply into classifications.
///
/// Accepts, in order:
/// 1. a bare JSON array;
/// 2. an array inside a ```` ```json ```` (or untagged) fence, even with
///    surrounding prose;
/// 3. the first balanced `[...]` found anywhere in the text.
pub fn parse_classifications(text: &str) -> Result<Vec<Classification>> {
    let trimmed = text.trim();

    let body = extract_fenced_json(trimmed).unwrap_or(trimmed).trim();

    let first_error = match serde_json::from_str::<Vec<Classification>>(body) {
        Ok(list) => return Ok(list),
        Err(e) => e,
    };

    if let Some(pos) = body.find('[') {
        if let Some(array) = extract_balanced_array(&body[pos..]) {
            if let Ok(list) = serde_json::from_str::<Vec<Classification>>(array) {
                return Ok(list);
            }
        }
    }

    Err(ClassifierError::ParseError(format!(
        "response is not a JSON array of classifications: {}",
        first_error
    )))
}

/// Extract the body of the first markdown code fence in the text.
///
/// Skips an optional `json` language tag. Works with trailing prose after
/// the closing fence. Returns `None` if no complete fence is found.
fn extract_fenced_json(content: &str) -> Option<&str> {
    let fence_start = content.find("```")?;
    let mut body_start = fence_start + 3;

    let after_opening = &content[body_start..];
    if after_opening
        .get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
    {
        body_start += 4;
    }

    let closing = content[body_start..].find("```")?;
    let body_end = body_start + closing;

    let body = content[body_start..body_end].trim();
    if body.is_empty() {
        return None;
    }

    Some(body)
}

/// Extract a balanced JSON array starting at position 0 of `s`.
///
/// Counts `[` / `]` depth, respecting string literals, to find the
/// matching close bracket.
fn extract_balanced_array(s: &str) -> Option<&str> {
    if !s.starts_with('[') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
