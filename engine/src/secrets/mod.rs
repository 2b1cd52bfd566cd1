//! API key handling
//!
//! The Gemini key is read once from the environment at startup and carried
//! in a [`SecretString`], whose `Debug` and `Display` never print the value.
//! Because the key travels in the request query string, transport errors
//! from reqwest can echo it back; [`scrub_secrets`] removes it from any text
//! before it reaches the logs.

use organizer_sdk::errors::EngineError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A wrapper for sensitive string data that prevents accidental logging.
///
/// To access the actual secret value, use the `unsecure()` method.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Access the raw underlying string
    pub fn unsecure(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Read the API key from the environment variable `var`.
///
/// An unset or blank variable is a fatal precondition.
pub fn api_key_from_env(var: &str) -> Result<SecretString, EngineError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::new(value.trim())),
        _ => Err(EngineError::MissingApiKey(var.to_string())),
    }
}

static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

/// Patterns match:
/// - Google API keys: AIza[0-9A-Za-z-_]{35}
/// - `key=` query parameters of any shape
fn get_secret_patterns() -> &'static Vec<Regex> {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"AIza[0-9A-Za-z\-_]{35}").expect("Invalid Google pattern"),
            Regex::new(r"([?&]key=)[^&\s)]+").expect("Invalid query key pattern"),
        ]
    })
}

/// Replace anything that looks like an API key with `[REDACTED]`.
pub fn scrub_secrets(text: &str) -> String {
    let patterns = get_secret_patterns();
    let google = patterns[0].replace_all(text, "[REDACTED]");
    patterns[1]
        .replace_all(&google, "${1}[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacts() {
        let secret = SecretString::new("super-secret");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(secret.unsecure(), "super-secret");
    }

    #[test]
    fn test_scrub_google_key() {
        let key = format!("AIza{}", "x".repeat(35));
        let text = format!("request failed for key {}", key);
        let scrubbed = scrub_secrets(&text);
        assert!(!scrubbed.contains(&key));
        assert!(scrubbed.contains("[REDACTED]"));
    }

    #[test]
    fn test_scrub_query_parameter() {
        let text = "error sending request for url (https://host/v1beta/models/m:generateContent?key=abc123): timed out";
        let scrubbed = scrub_secrets(text);
        assert!(!scrubbed.contains("abc123"));
        assert!(scrubbed.contains("?key=[REDACTED]"));
        assert!(scrubbed.ends_with("timed out"));
    }

    #[test]
    fn test_scrub_leaves_plain_text() {
        assert_eq!(scrub_secrets("nothing to hide"), "nothing to hide");
    }

    #[test]
    fn test_missing_api_key() {
        let var = "ORGANIZER_TEST_SURELY_UNSET_KEY";
        match api_key_from_env(var) {
            Err(EngineError::MissingApiKey(name)) => assert_eq!(name, var),
            other => panic!("expected MissingApiKey, got {:?}", other),
        }
    }
}
