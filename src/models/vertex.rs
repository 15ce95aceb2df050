//! Wire types for the Vertex AI `generateContent` call.
//!
//! Vertex answers in camelCase while accepting snake_case on input, so every
//! multi-word field deserializes from both spellings.

use serde::{Deserialize, Serialize};

use crate::error::ProviderFailure;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// One user turn carrying the prompt, asking for `number_of_images` outputs.
    pub fn text_to_image(prompt: &str, number_of_images: u32) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: GenerationConfig { number_of_images },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(alias = "numberOfImages")]
    pub number_of_images: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(
        alias = "fileData",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub file_data: Option<FileData>,
    #[serde(
        alias = "inlineData",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileData {
    #[serde(alias = "mimeType", skip_serializing_if = "Option::is_none", default)]
    pub mime_type: Option<String>,
    #[serde(alias = "fileUri", skip_serializing_if = "Option::is_none", default)]
    pub file_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(alias = "mimeType", skip_serializing_if = "Option::is_none", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(alias = "finishReason", default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Image payload of the first candidate's first part.
    ///
    /// `file_data.file_uri` wins; `inline_data.data` is the fallback.
    pub fn first_image(&self) -> Result<&str, ProviderFailure> {
        let candidate = self
            .candidates
            .first()
            .ok_or(ProviderFailure::MissingImage("candidates"))?;
        let content = candidate
            .content
            .as_ref()
            .ok_or(ProviderFailure::MissingImage("content"))?;
        let part = content
            .parts
            .first()
            .ok_or(ProviderFailure::MissingImage("parts"))?;

        if let Some(uri) = part.file_data.as_ref().and_then(|f| f.file_uri.as_deref()) {
            return Ok(uri);
        }
        if let Some(data) = part.inline_data.as_ref().and_then(|d| d.data.as_deref()) {
            return Ok(data);
        }

        Err(ProviderFailure::MissingImage("file_data"))
    }
}

/// Google's standard error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
