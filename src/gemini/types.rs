//! Wire types for `models/{model}:generateContent`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Serialize, Debug)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize, Debug)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Debug)]
pub struct GeminiTextPart {
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
}

impl GeminiRequest {
    /// A single user turn carrying the whole prompt.
    pub fn user_prompt(prompt: &str, temperature: Option<f32>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiTextPart { text: prompt.to_string() }],
            }],
            generation_config: temperature.map(|temperature| GeminiGenerationConfig { temperature }),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct GeminiResponse {
    pub candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<GeminiUsage>,
    pub error: Option<GeminiError>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContentResponse>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiContentResponse {
    #[serde(default)]
    pub parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiPartResponse {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiUsage {
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct GeminiError {
    pub message: String,
}

/// Envelope of a non-2xx body: `{"error": {"code": 403, "message": "...", "status": "..."}}`.
#[derive(Deserialize, Debug)]
pub struct GeminiErrorEnvelope {
    pub error: GeminiError,
}
