use super::types::forwarded_language_payload;
use crate::{
    Error, Result,
    models::{ErrorResponse, IMAGE_FIELD, ImageUpload},
    upstream::InferenceClient,
};
use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn InferenceClient>,
    pub forward_number_to_generate: bool,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, err: &Error) -> HandlerError {
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Relays a name generation request. Only unreadable or oversized bodies are
/// refused; the inference server decides what it can work with.
pub async fn language_model(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<(StatusCode, Json<Value>), HandlerError> {
    let request_id = Uuid::new_v4();

    let body = body.map_err(|rejection| {
        warn!(%request_id, "Could not read language model body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;
    let payload = forwarded_language_payload(&body, state.forward_number_to_generate);

    if !state.forward_number_to_generate {
        debug!(%request_id, "number_to_generate is not forwarded upstream");
    }
    info!(%request_id, "Relaying language model request");

    match state.upstream.language_model(payload).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            info!(%request_id, "Language model replied with {}", status);
            Ok((status, Json(reply.body)))
        }
        Err(e) => {
            error!(%request_id, "Language model request failed: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, &e))
        }
    }
}

/// Relays an uploaded image for classification and answers 201 on success.
pub async fn conv_model(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<(StatusCode, Json<Value>), HandlerError> {
    let request_id = Uuid::new_v4();

    let image = match multipart {
        Ok(mut multipart) => read_image(&mut multipart).await,
        Err(rejection) => Err(Error::invalid_upload(rejection.body_text())),
    }
    .map_err(|e| {
        warn!(%request_id, "Rejected conv model upload: {}", e);
        error_response(e.client_status(), &e)
    })?;

    info!(
        %request_id,
        "Relaying conv model request for '{}' ({} bytes)",
        image.file_name,
        image.bytes.len()
    );

    match state.upstream.conv_model(image).await {
        Ok(reply) => {
            info!(%request_id, "Conv model classified image");
            Ok((StatusCode::CREATED, Json(reply.body)))
        }
        Err(e) => {
            error!(%request_id, "Conv model request failed: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, &e))
        }
    }
}

fn upload_error(err: MultipartError) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(err.body_text())
    } else {
        Error::invalid_upload(err.body_text())
    }
}

async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(IMAGE_FIELD).to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(Error::invalid_upload(format!(
        "missing multipart field '{}'",
        IMAGE_FIELD
    )))
}
