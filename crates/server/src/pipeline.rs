//! The unwrap-then-decrypt upload pipeline.
//!
//! One call per request, no shared mutable state, no retries: every failure
//! is terminal for its request and the recovered plaintext is written only
//! after the authentication tag has verified. Symmetric key material is
//! zeroed as soon as the cipher is constructed.

use std::path::Path;

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce, Tag,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use common::protocol::{UploadRequest, NONCE_LEN, TAG_LEN};
use common::UploadError;

use crate::keys::ServerKeyPair;

/// Outcome of a successfully persisted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    /// Sanitised filename the plaintext was written under.
    pub filename: String,
    /// Number of plaintext bytes recovered and written.
    pub byte_count: usize,
}

/// Validate, decrypt, and persist one transfer payload.
///
/// Steps, in order: field presence → base64 decode → RSA-OAEP key unwrap →
/// tag split → AEAD verify+decrypt → filename sanitation → write to
/// `storage_dir` (overwriting any same-named file, last-write-wins).
///
/// # Errors
///
/// - [`UploadError::MalformedRequest`] for missing fields, bad base64, a
///   wrong-length nonce, a body too short to hold a tag, or a filename that
///   is empty after stripping path components.
/// - [`UploadError::DecryptionFailed`] for any key-unwrap or tag-verification
///   failure, uniformly.
/// - [`UploadError::Storage`] if the final write fails.
pub async fn receive(
    req: &UploadRequest,
    keys: &ServerKeyPair,
    storage_dir: &Path,
) -> Result<Persisted, UploadError> {
    if !req.has_required_fields() {
        return Err(UploadError::MalformedRequest(
            "wrappedKey, encryptedBody, nonce, and filename are all required".into(),
        ));
    }

    let wrapped_key = decode_field("wrappedKey", &req.wrapped_key)?;
    let encrypted_body = decode_field("encryptedBody", &req.encrypted_body)?;
    let nonce_bytes = decode_field("nonce", &req.nonce)?;

    if nonce_bytes.len() != NONCE_LEN {
        return Err(UploadError::MalformedRequest(format!(
            "nonce must be {NONCE_LEN} bytes"
        )));
    }
    // The tail of the body is the 16-byte GCM tag; anything shorter cannot
    // have been produced by the client engine and never reaches the AEAD.
    if encrypted_body.len() < TAG_LEN {
        return Err(UploadError::MalformedRequest(format!(
            "encryptedBody must be at least {TAG_LEN} bytes"
        )));
    }

    let mut key = keys.unwrap_key(&wrapped_key)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| UploadError::DecryptionFailed);
    key.iter_mut().for_each(|b| *b = 0);
    let cipher = cipher?;

    let (ciphertext, tag) = encrypted_body.split_at(encrypted_body.len() - TAG_LEN);
    let mut plaintext = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&nonce_bytes),
            b"",
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| UploadError::DecryptionFailed)?;

    let filename = sanitize_filename(&req.filename).ok_or_else(|| {
        UploadError::MalformedRequest("filename has no usable base name".into())
    })?;

    let byte_count = plaintext.len();
    tokio::fs::write(storage_dir.join(&filename), &plaintext).await?;
    debug!(filename = %filename, bytes = byte_count, "upload persisted");

    Ok(Persisted {
        filename,
        byte_count,
    })
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, UploadError> {
    STANDARD
        .decode(value)
        .map_err(|_| UploadError::MalformedRequest(format!("{name} is not valid base64")))
}

/// Strip every directory component from a client-supplied filename.
///
/// Both separator styles are handled, so `"../../etc/passwd"` and
/// `"..\\..\\boot.ini"` reduce to their base names. Returns `None` when
/// nothing usable remains, which callers report as a malformed request.
fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_owned())
}
