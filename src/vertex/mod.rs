pub mod credentials;
pub mod image_client;
pub mod token;

use crate::{
    config::VertexConfig,
    error::{ProviderFailure, Result},
    models::GenerationResult,
    provider::ImageProvider,
};
use async_trait::async_trait;
use reqwest::Client;

pub use credentials::ServiceAccountKey;
pub use image_client::ImageClient;

#[derive(Clone)]
pub struct VertexClient {
    image_client: ImageClient,
}

impl VertexClient {
    pub fn new(vertex_config: VertexConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = vertex_config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProviderFailure::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            image_client: ImageClient::new(http, vertex_config),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl ImageProvider for VertexClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.image_client.generate(prompt).await
    }
}
