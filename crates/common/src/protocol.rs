//! Wire types exchanged between the sender and the server.
//!
//! Everything here is serialised as JSON with camelCase field names so that a
//! browser sender can produce payloads with plain `JSON.stringify` + `btoa`.

use serde::{Deserialize, Serialize};

/// Byte length of the per-upload AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the per-upload AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag appended to the ciphertext
/// (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Upload endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /upload` — one encrypted file transfer.
///
/// The three binary fields are standard base64 (with padding). `encryptedBody`
/// carries the AES-GCM ciphertext with the 16-byte authentication tag
/// concatenated at its tail; this framing is a wire-compatibility contract,
/// not an implementation detail.
///
/// Missing JSON fields deserialise to empty strings so that presence
/// validation happens in the pipeline, where it maps to the protocol's own
/// error taxonomy instead of a deserialisation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Per-upload AES key, RSA-OAEP-encrypted under the server's public key.
    #[serde(default)]
    pub wrapped_key: String,
    /// AES-256-GCM ciphertext with the authentication tag appended.
    #[serde(default)]
    pub encrypted_body: String,
    /// 96-bit GCM nonce paired with this upload's key.
    #[serde(default)]
    pub nonce: String,
    /// Client-supplied filename; transmitted in the clear by design.
    #[serde(default)]
    pub filename: String,
    /// Optional declared MIME type; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl UploadRequest {
    /// Returns `true` when all four required fields are present and non-empty.
    pub fn has_required_fields(&self) -> bool {
        !self.wrapped_key.is_empty()
            && !self.encrypted_body.is_empty()
            && !self.nonce.is_empty()
            && !self.filename.is_empty()
    }
}

/// Successful response body for `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Sanitised filename the plaintext was persisted under.
    pub filename: String,
    /// Number of recovered plaintext bytes written to disk.
    pub decrypted_bytes: usize,
}

// ---------------------------------------------------------------------------
// Public-key endpoint
// ---------------------------------------------------------------------------

/// Response body for `GET /public-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    /// SPKI PEM encoding of the server's current RSA public key.
    pub public_key: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short caller-facing error message (e.g. `"Decryption failed."`).
    pub error: String,
    /// Optional extra context safe to expose to callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] with no detail.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    /// Construct an [`ErrorResponse`] with a detail string.
    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }
}
