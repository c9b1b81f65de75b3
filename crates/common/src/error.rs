//! The upload error taxonomy shared across crates.

use thiserror::Error;

/// Errors produced while validating and decrypting a transfer payload.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`UploadError::MalformedRequest`] → 400
/// - [`UploadError::PayloadTooLarge`] → 413
/// - [`UploadError::DecryptionFailed`] → 500
/// - [`UploadError::Storage`] → 500
///
/// Every failure is terminal for its one request; the server never retries.
#[derive(Debug, Error)]
pub enum UploadError {
    /// A required field is missing or empty, an encoding is invalid, or the
    /// encrypted body is too short to contain an authentication tag.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The request body exceeded the configured maximum size.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Key unwrap or AEAD tag verification failed. Deliberately carries no
    /// indication of which cryptographic step rejected the payload, so the
    /// error cannot be used as a padding oracle.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Writing the recovered plaintext to the storage directory failed.
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl UploadError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            UploadError::MalformedRequest(_) => 400,
            UploadError::PayloadTooLarge => 413,
            UploadError::DecryptionFailed => 500,
            UploadError::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(
            UploadError::MalformedRequest("x".into()).http_status(),
            400
        );
        assert_eq!(UploadError::PayloadTooLarge.http_status(), 413);
        assert_eq!(UploadError::DecryptionFailed.http_status(), 500);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(UploadError::Storage(io).http_status(), 500);
    }

    #[test]
    fn decryption_failed_display_is_uniform() {
        // The message must not reveal which cryptographic step failed.
        assert_eq!(UploadError::DecryptionFailed.to_string(), "decryption failed");
    }

    #[test]
    fn malformed_display_includes_detail() {
        let e = UploadError::MalformedRequest("nonce is not valid base64".into());
        assert!(e.to_string().contains("nonce is not valid base64"));
    }
}
