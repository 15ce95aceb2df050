pub mod cors;
pub mod generate;

use crate::provider::ImageProvider;
use actix_web::web;
use std::sync::Arc;

pub use cors::CorsPolicy;
pub use generate::generate_handler;

pub const GENERATE_PATH: &str = "/api/generate";

/// Read-only state shared by every invocation.
pub struct AppState {
    pub provider: Arc<dyn ImageProvider>,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageProvider>, cors: CorsPolicy) -> Self {
        Self { provider, cors }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(GENERATE_PATH).to(generate_handler));
}
