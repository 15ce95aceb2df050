use reqwest::Client;

use super::{credentials::ServiceAccountKey, token};
use crate::{
    config::VertexConfig,
    error::{ProviderFailure, RelayError, Result},
    models::{GenerateContentRequest, GenerateContentResponse, GenerationResult, GoogleErrorEnvelope},
};

#[derive(Clone)]
pub struct ImageClient {
    http: Client,
    config: VertexConfig,
}

impl ImageClient {
    pub fn new(http: Client, config: VertexConfig) -> Self {
        Self { http, config }
    }

    pub async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let encoded_key = self.config.service_account_key.as_deref().unwrap_or_default();
        let key = ServiceAccountKey::from_base64(encoded_key)?;

        let project_id = self
            .config
            .project_id
            .as_deref()
            .ok_or_else(|| RelayError::Config("GCP_PROJECT_ID is not set".into()))?;

        let access_token = token::fetch_access_token(&self.http, &key).await?;

        let url = self.config.generate_content_url(project_id);
        let payload = GenerateContentRequest::text_to_image(prompt, 1);

        log::debug!("Generating image with model: {}", self.config.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| body.trim().to_string());

            return Err(ProviderFailure::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::MalformedResponse(e.to_string()))?;

        let image = body.first_image()?;
        Ok(GenerationResult::from_image_uri(image))
    }
}
