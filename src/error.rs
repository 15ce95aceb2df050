use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

/// Message returned to callers for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Ways the provider round trip can fail after credentials were decoded.
#[derive(Debug, Error)]
pub enum ProviderFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("token exchange rejected: {0}")]
    Auth(String),
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider response contains no image (missing {0})")]
    MissingImage(&'static str),
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Prompt is required")]
    MissingPrompt,
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Credential error: {0}")]
    Credential(String),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderFailure),
}

impl RelayError {
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Body sent to the caller. Server errors carry only the generic message
    /// plus this error's display text.
    pub fn body(&self) -> ErrorBody {
        match self {
            RelayError::MethodNotAllowed
            | RelayError::MissingPrompt
            | RelayError::PayloadTooLarge => {
                ErrorBody::new(self.to_string())
            }
            _ => ErrorBody::with_details(INTERNAL_ERROR_MESSAGE, self.to_string()),
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the URL in its message; strip it so query strings never leak.
        RelayError::Provider(ProviderFailure::Network(err.without_url().to_string()))
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Config(_) | RelayError::Credential(_) | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            RelayError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(RelayError::MissingPrompt.status_code(), StatusCode::BAD_REQUEST);
        assert!(!RelayError::MissingPrompt.is_server_error());
        assert_eq!(
            RelayError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_client_error_bodies_have_no_details() {
        let body = RelayError::MissingPrompt.body();
        assert_eq!(body.error, "Prompt is required");
        assert!(body.details.is_none());

        let body = RelayError::PayloadTooLarge.body();
        assert_eq!(body.error, "Payload too large");
        assert!(body.details.is_none());

        let body = RelayError::MethodNotAllowed.body();
        assert_eq!(body.error, "Method not allowed");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_server_errors_use_generic_message() {
        let err = RelayError::from(ProviderFailure::MissingImage("candidates"));
        assert!(err.is_server_error());

        let body = err.body();
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
        assert_eq!(
            body.details.as_deref(),
            Some("Provider error: provider response contains no image (missing candidates)")
        );
    }

    #[test]
    fn test_credential_error_is_500() {
        let err = RelayError::Credential("invalid base64".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
