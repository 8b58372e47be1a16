//! Gemini generation client
//!
//! One prompt in, one block of text out. Each call is a single attempt:
//! no retry, no backoff, no streaming, and no timeout beyond reqwest's own.

pub mod types;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use types::{GeminiErrorEnvelope, GeminiRequest, GeminiResponse};

/// Everything that can go wrong on the way to, or back from, the model.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API key rejected ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("prompt blocked: {0}")]
    Blocked(String),

    #[error("model returned no text (finish reason: {0})")]
    EmptyResponse(String),
}

/// The boundary the web layer talks to.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider name for logging and the status endpoint
    fn name(&self) -> &'static str;

    /// Issue exactly one generation call for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            base_url: base_url.into(),
            model: model.into(),
            temperature: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_base_url.clone(), config.model.clone())
            .with_temperature(config.temperature)
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let api_request = GeminiRequest::user_prompt(prompt, self.temperature);
        info!("Calling {} ({} prompt chars)", self.model, prompt.chars().count());

        // Key goes in a header so it never shows up in a reqwest error's URL
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&api_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = error_for_status(status, &body);
            warn!("Gemini call failed: {}", error);
            return Err(error);
        }

        parse_response(&body)
    }
}

/// Map a non-success status and its body onto a [`GenerationError`].
pub fn error_for_status(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => GenerationError::QuotaExceeded { message },
        _ => GenerationError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the generated text out of a successful response body.
pub fn parse_response(body: &str) -> Result<String, GenerationError> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(GenerationError::Api {
            status: StatusCode::OK.as_u16(),
            message: error.message,
        });
    }

    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Gemini usage: {} in / {} out",
            usage.prompt_token_count.unwrap_or(0),
            usage.candidates_token_count.unwrap_or(0)
        );
    }

    let Some(candidate) = response.candidates.and_then(|c| c.into_iter().next()) else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(GenerationError::Blocked(reason));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse(
            candidate.finish_reason.unwrap_or_else(|| "unknown".to_string()),
        ));
    }

    debug!("Gemini returned {} chars", text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concatenates_parts_verbatim() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "**【表面官方說法】**\n"}, {"text": "  尊重  "}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }"#;
        assert_eq!(parse_response(body).unwrap(), "**【表面官方說法】**\n  尊重  ");
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(parse_response(body), Err(GenerationError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_parse_empty_candidate() {
        let body = r#"{"candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse(ref r) if r == "MAX_TOKENS"));
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_parse_error_object() {
        let body = r#"{"error": {"code": 500, "message": "internal"}}"#;
        assert!(matches!(parse_response(body), Err(GenerationError::Api { message, .. }) if message == "internal"));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_response("<html>oops</html>"), Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn test_error_for_status() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        let err = error_for_status(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, GenerationError::Unauthorized { status: 403, .. }));
        assert!(err.to_string().contains("API key not valid"));

        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, r#"{"error": {"message": "Resource exhausted"}}"#);
        assert!(matches!(err, GenerationError::QuotaExceeded { ref message } if message == "Resource exhausted"));

        let err = error_for_status(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert!(matches!(err, GenerationError::Api { status: 502, ref message } if message == "upstream down"));
    }

    #[tokio::test]
    async fn test_empty_prompt_skips_call() {
        // Unroutable base URL: reaching the network would surface as Transport
        let client = GeminiClient::new("k".to_string(), "http://127.0.0.1:1", "m");
        assert!(matches!(client.generate("  ").await, Err(GenerationError::EmptyPrompt)));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("k".to_string(), "http://localhost:9000", "gemini-1.5-flash");
        assert_eq!(client.endpoint(), "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent");
        assert_eq!(client.model(), "gemini-1.5-flash");
    }
}
