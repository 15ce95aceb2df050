use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RelayError, Result};

/// Prefix the provider puts in front of inline PNG payloads.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Validated inbound request. Only ever built through [`GenerationRequest::from_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
}

impl GenerationRequest {
    /// Parses a raw request body. Anything but a JSON object carrying a
    /// non-empty string `prompt` is reported as a missing prompt.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::MissingPrompt)?;

        let prompt = match value {
            Value::Object(mut fields) => fields.remove("prompt"),
            _ => None,
        };

        match prompt {
            Some(Value::String(prompt)) if !prompt.is_empty() => Ok(Self { prompt }),
            _ => Err(RelayError::MissingPrompt),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_base64: String, // Base64 encoded PNG
}

impl GenerationResult {
    pub fn from_image_uri(uri: &str) -> Self {
        Self {
            image_base64: uri.strip_prefix(PNG_DATA_URI_PREFIX).unwrap_or(uri).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_extracted() {
        let request = GenerationRequest::from_body(br#"{"prompt":"a red apple"}"#).unwrap();
        assert_eq!(request.prompt, "a red apple");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request =
            GenerationRequest::from_body(br#"{"prompt":"a red apple","size":"1024x1024"}"#)
                .unwrap();
        assert_eq!(request.prompt, "a red apple");
    }

    #[test]
    fn test_missing_prompt_variants() {
        let bodies: [&[u8]; 9] = [
            br#"{}"#,
            br#"["a red apple"]"#,
            br#""a red apple""#,
            br#"{"prompt":["a red apple"]}"#,
            br#"{"prompt":null}"#,
            br#"{"prompt":""}"#,
            br#"{"prompt":42}"#,
            b"not json",
            b"",
        ];

        for body in bodies {
            assert!(
                matches!(
                    GenerationRequest::from_body(body),
                    Err(RelayError::MissingPrompt)
                ),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_whitespace_prompt_is_accepted() {
        let request = GenerationRequest::from_body(br#"{"prompt":"  "}"#).unwrap();
        assert_eq!(request.prompt, "  ");
    }

    #[test]
    fn test_png_prefix_is_stripped() {
        let result = GenerationResult::from_image_uri("data:image/png;base64,AAAA");
        assert_eq!(result.image_base64, "AAAA");
    }

    #[test]
    fn test_unprefixed_payload_is_kept() {
        let result = GenerationResult::from_image_uri("iVBORw0KGgo=");
        assert_eq!(result.image_base64, "iVBORw0KGgo=");

        let jpeg = GenerationResult::from_image_uri("data:image/jpeg;base64,/9j/");
        assert_eq!(jpeg.image_base64, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_result_serializes_with_snake_case_key() {
        let value = serde_json::to_value(GenerationResult::from_image_uri("AAAA")).unwrap();
        assert_eq!(value, serde_json::json!({ "image_base64": "AAAA" }));
    }
}
