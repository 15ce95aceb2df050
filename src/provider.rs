use crate::{error::Result, models::GenerationResult};
use async_trait::async_trait;

/// Backend that turns a prompt into one image.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;
}
