//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use nbgen::{GenerationResult, ImageProvider, ProviderFailure, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_PEM: &str = include_str!("../fixtures/test_key.pem");
pub const CLIENT_EMAIL: &str = "relay@demo-project.iam.gserviceaccount.com";

/// Service-account JSON pointing its token endpoint at `token_uri`.
pub fn key_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "demo-project",
        "private_key_id": "test-key-1",
        "private_key": TEST_PEM,
        "client_email": CLIENT_EMAIL,
        "token_uri": token_uri,
    })
    .to_string()
}

pub fn encoded_key(token_uri: &str) -> String {
    STANDARD.encode(key_json(token_uri))
}

/// Always answers with the same image URI and counts its calls.
pub struct FixedProvider {
    uri: &'static str,
    calls: AtomicUsize,
}

impl FixedProvider {
    pub fn new(uri: &'static str) -> Self {
        Self {
            uri,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for FixedProvider {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerationResult::from_image_uri(self.uri))
    }
}

/// Fails every call with a network error.
pub struct FailingProvider;

#[async_trait]
impl ImageProvider for FailingProvider {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResult> {
        Err(ProviderFailure::Network("connection refused".into()).into())
    }
}
