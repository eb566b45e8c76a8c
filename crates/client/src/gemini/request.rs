//! Gemini `generateContent` request types.

use serde::Serialize;

/// Request body for the `models/{model}:generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

/// Sampling parameters. Only what the pipeline uses; everything else stays at
/// the API's defaults.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Wrap a single text prompt in the nested contents/parts shape.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt.into() }] }],
            generation_config: None,
        }
    }
}
