use actix_web::{
    http::{header, Method},
    web, HttpRequest, HttpResponse, ResponseError,
};
use futures::StreamExt;

use super::AppState;
use crate::{
    error::{RelayError, Result},
    models::GenerationRequest,
    provider::ImageProvider,
};

/// Marker that prefixes the single log line written for a failed request.
pub const SERVER_ERROR_MARKER: &str = "--- SERVER ERROR ---";

/// Largest request body read from the wire.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Single entry point for `/api/generate`, every method routed here.
///
/// Always produces exactly one response; CORS headers are attached to all of
/// them, error responses included.
pub async fn generate_handler(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> HttpResponse {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    let mut response = match dispatch(req.method(), payload, state.provider.as_ref()).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_server_error() {
                log::error!("{} {}", SERVER_ERROR_MARKER, err);
            }
            err.error_response()
        }
    };

    state.cors.apply(origin, &mut response);
    response
}

async fn dispatch(
    method: &Method,
    payload: web::Payload,
    provider: &dyn ImageProvider,
) -> Result<HttpResponse> {
    // Preflight is answered before anything else, whatever the origin.
    if *method == Method::OPTIONS {
        return Ok(HttpResponse::Ok().finish());
    }
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let body = read_body(payload).await?;
    let request = GenerationRequest::from_body(&body)?;
    log::debug!("Prompt accepted ({} bytes)", request.prompt.len());

    let result = provider.generate(&request.prompt).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Buffers the body, giving up once it grows past [`MAX_BODY_BYTES`].
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        // A broken stream leaves nothing to read a prompt from.
        let chunk = chunk.map_err(|_| RelayError::MissingPrompt)?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(RelayError::PayloadTooLarge);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
