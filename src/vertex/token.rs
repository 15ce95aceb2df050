use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use super::credentials::ServiceAccountKey;
use crate::error::{ProviderFailure, Result};

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// Exchanges a signed assertion for a short-lived OAuth2 access token.
pub async fn fetch_access_token(http: &Client, key: &ServiceAccountKey) -> Result<AccessToken> {
    let assertion = key.assertion(CLOUD_PLATFORM_SCOPE, Utc::now())?;

    log::debug!("Requesting access token for {}", key.client_email);

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderFailure::Auth(format!("{}: {}", status, body.trim())).into());
    }

    let token: AccessToken = response
        .json()
        .await
        .map_err(|e| ProviderFailure::MalformedResponse(format!("token response: {}", e)))?;

    if token.access_token.is_empty() {
        return Err(ProviderFailure::Auth("empty access token".into()).into());
    }

    Ok(token)
}
