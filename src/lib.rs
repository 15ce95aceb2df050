pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod models;
pub mod provider;
pub mod vertex;

pub use config::{Config, ServerConfig, VertexConfig};
pub use error::{ProviderFailure, RelayError, Result};
pub use handler::{AppState, CorsPolicy};
pub use models::{ErrorBody, GenerationRequest, GenerationResult};
pub use provider::ImageProvider;
pub use vertex::VertexClient;
