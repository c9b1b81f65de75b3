//! Axum request handlers for the two transfer-protocol endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use common::protocol::{ErrorResponse, PublicKeyResponse, UploadRequest, UploadResponse};
use common::UploadError;

use super::state::AppState;
use crate::pipeline;

/// `GET /public-key` — return the server's current public key.
///
/// Idempotent and side-effect-free; the key never changes within one process
/// lifetime.
pub async fn public_key(State(state): State<AppState>) -> Response {
    let body = PublicKeyResponse {
        public_key: state.keys.public_key_pem().to_owned(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /upload` — run one payload through the unwrap-then-decrypt pipeline.
///
/// The `Json` extractor is taken as a `Result` so that body-cap and JSON
/// rejections map to the protocol's own error responses rather than axum's
/// plain-text defaults.
pub async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                UploadError::PayloadTooLarge
            } else {
                UploadError::MalformedRequest("request body is not valid JSON".into())
            };
            return error_response(&err);
        }
    };

    match pipeline::receive(&req, &state.keys, &state.storage_dir).await {
        Ok(persisted) => {
            let body = UploadResponse {
                success: true,
                filename: persisted.filename,
                decrypted_bytes: persisted.byte_count,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "upload rejected");
            error_response(&e)
        }
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("The requested resource does not exist.");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map an [`UploadError`] to its wire response.
///
/// Decryption failures share one fixed detail string regardless of which
/// cryptographic step rejected the payload; storage failures expose no
/// detail at all (paths and I/O errors stay in the server log).
fn error_response(err: &UploadError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match err {
        UploadError::MalformedRequest(detail) => {
            ErrorResponse::with_detail("Missing required fields.", detail.clone())
        }
        UploadError::PayloadTooLarge => ErrorResponse::new("Payload too large."),
        UploadError::DecryptionFailed => ErrorResponse::with_detail(
            "Decryption failed.",
            "the wrapped key or ciphertext could not be verified",
        ),
        UploadError::Storage(_) => ErrorResponse::new("Upload failed."),
    };
    (status, Json(body)).into_response()
}
