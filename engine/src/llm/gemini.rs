//! Gemini classifier
//!
//! Sends one `generateContent` request per batch with the API key in the
//! query string. The prompt embeds the batch as pretty-printed JSON and
//! spells out the exact array shape expected back.

use super::{parse_classifications, Classifier, ClassifierError, ClassifierOutcome, Result};
use crate::config::ClassifierConfig;
use crate::secrets::{scrub_secrets, SecretString};
use crate::summary::ProjectSummary;
use async_trait::async_trait;
use organizer_sdk::types::Classification;
use serde_json::{json, Value};

pub struct GeminiClassifier {
    config: ClassifierConfig,
    api_key: SecretString,
    client: reqwest::Client,
}

impl GeminiClassifier {
    pub fn new(config: ClassifierConfig, api_key: SecretString) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClassifierError::ProviderUnavailable(e.to_string()))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.api_key.unsecure()
        )
    }

    /// Request body for one batch
    pub fn build_payload(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "topK": self.config.top_k,
                "topP": self.config.top_p,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        })
    }

    async fn request(&self, batch: &[ProjectSummary]) -> Result<Vec<Classification>> {
        let prompt = build_prompt(batch)?;
        let payload = self.build_payload(&prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::NetworkError(scrub_secrets(&e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = scrub_secrets(&response.text().await.unwrap_or_default());

            return Err(match status.as_u16() {
                400 | 404 => ClassifierError::InvalidRequest(text),
                429 => ClassifierError::RateLimitExceeded,
                401 | 403 => ClassifierError::AuthenticationFailed(text),
                _ => ClassifierError::ProviderUnavailable(format!(
                    "Gemini API error ({}): {}",
                    status, text
                )),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::ParseError(scrub_secrets(&e.to_string())))?;

        let text = candidate_text(&data)?;
        parse_classifications(&text)
    }
}

#[async_trait]
impl Classifier for GeminiClassifier {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn classify(&self, batch: &[ProjectSummary]) -> ClassifierOutcome {
        let result = self.request(batch).await;
        match &result {
            Ok(list) => tracing::debug!(
                "Gemini returned {} classifications for {} projects",
                list.len(),
                batch.len()
            ),
            Err(ClassifierError::ParseError(msg)) => {
                tracing::warn!("Unexpected API response format: {}", msg)
            }
            Err(e) => tracing::error!("API request failed: {}", e),
        }
        result.into()
    }
}

/// Concatenated text of the first candidate in a `generateContent` reply.
pub fn candidate_text(data: &Value) -> Result<String> {
    let candidate = data
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| ClassifierError::ParseError("No candidates in response".to_string()))?;

    let parts = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| ClassifierError::ParseError("No parts in candidate content".to_string()))?;

    let mut full_text = String::new();
    for part in parts {
        if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
            full_text.push_str(text);
        }
    }

    if full_text.trim().is_empty() {
        return Err(ClassifierError::ParseError(
            "Candidate has no text".to_string(),
        ));
    }

    Ok(full_text)
}

/// Natural-language instruction for one batch.
pub fn build_prompt(batch: &[ProjectSummary]) -> Result<String> {
    let projects = serde_json::to_string_pretty(batch)
        .map_err(|e| ClassifierError::InvalidRequest(e.to_string()))?;

    Ok(format!(
        r#"You are a project intelligence analyst for a small business owner who codes. Analyze these {count} projects and provide detailed insights.

For each project, determine:
1. **suggested_name**: A clear, descriptive name (lowercase-with-dashes)
2. **category**: web-apps, scripts, infrastructure, libraries, documentation, or research
3. **business_context**: client-facing, internal-tool, automation, or research
4. **description**: 2-3 sentences explaining what it does and its business value
5. **tech_stack**: List of primary technologies used (lowercase)
6. **status_flags**: Array of status indicators:
   - revenue-generating (if it makes money)
   - client-facing (if customers use it)
   - needs-attention (if has tech debt or issues)
   - high-priority (if critical to business)
   - production (if in active use)
   - maintenance (if stable, just needs occasional updates)
   - experimental (if prototype/learning)
   - deprecated (if no longer used)
7. **confidence**: high, medium, or low

Return exactly one object per project, in the same order as the input.

Projects to analyze:
{projects}

Return ONLY a valid JSON array with this structure (no markdown, no code blocks):
[
  {{
    "suggested_name": "photography-gallery",
    "category": "web-apps",
    "business_context": "client-facing",
    "description": "Client gallery system for delivering photos with Stripe payments",
    "tech_stack": ["laravel", "vue", "mysql"],
    "status_flags": ["revenue-generating", "production", "client-facing"],
    "confidence": "high"
  }}
]"#,
        count = batch.len(),
        projects = projects
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use organizer_sdk::types::ProjectRecord;

    fn classifier() -> GeminiClassifier {
        GeminiClassifier::new(ClassifierConfig::default(), SecretString::new("test-key")).unwrap()
    }

    #[test]
    fn test_endpoint_shape() {
        let c = classifier();
        assert_eq!(
            c.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=test-key"
        );
        assert_eq!(c.name(), "gemini");
    }

    #[test]
    fn test_payload_generation_config() {
        let payload = classifier().build_payload("hello");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(payload["generationConfig"]["temperature"], 0.2);
        assert_eq!(payload["generationConfig"]["topK"], 40);
        assert_eq!(payload["generationConfig"]["topP"], 0.95);
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_prompt_embeds_batch() {
        let batch = vec![
            ProjectSummary::from_record(&ProjectRecord::new("alpha", "php")),
            ProjectSummary::from_record(&ProjectRecord::new("beta", "go")),
        ];
        let prompt = build_prompt(&batch).unwrap();

        assert!(prompt.contains("Analyze these 2 projects"));
        assert!(prompt.contains("\"name\": \"alpha\""));
        assert!(prompt.contains("\"git_remote\": \"none\""));
        assert!(prompt.contains("Return ONLY a valid JSON array"));
    }

    #[test]
    fn test_candidate_text_concatenates_parts() {
        let data = json!({
            "candidates": [{
                "content": {"parts": [{"text": "[{\"a\""}, {"text": ": 1}]"}]}
            }]
        });
        assert_eq!(candidate_text(&data).unwrap(), "[{\"a\": 1}]");
    }

    #[test]
    fn test_candidate_text_missing() {
        assert!(matches!(
            candidate_text(&json!({"candidates": []})),
            Err(ClassifierError::ParseError(_))
        ));
        assert!(candidate_text(&json!({"promptFeedback": {"blockReason": "SAFETY"}})).is_err());
        assert!(candidate_text(&json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}}]
        }))
        .is_err());
    }
}
