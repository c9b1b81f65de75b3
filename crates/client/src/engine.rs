//! Per-upload hybrid encryption: fresh AES-256-GCM key + nonce for the file,
//! RSA-OAEP-SHA256 to wrap the key under the server's public key.
//!
//! Key and nonce are generated from the OS CSPRNG for every call and never
//! reused; a (key, nonce) pair encrypts exactly one plaintext. The AEAD
//! output already carries the 16-byte tag appended to the ciphertext, which
//! is exactly the framing the wire format requires.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use rsa::{pkcs8::DecodePublicKey, Oaep, RsaPublicKey};
use sha2::Sha256;
use thiserror::Error;

use common::protocol::{UploadRequest, KEY_LEN, NONCE_LEN};

/// Errors produced by the sender-side cipher engine.
///
/// All of these are fatal to the single upload attempt; the caller re-submits
/// rather than retrying automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server public key is not valid SPKI PEM.
    #[error("invalid server public key")]
    InvalidPublicKey,

    /// Symmetric encryption of the file bytes failed.
    #[error("file encryption failed")]
    Encrypt,

    /// RSA-OAEP wrapping of the symmetric key failed.
    #[error("key wrapping failed")]
    Wrap,
}

/// Encrypt `plaintext` for the server identified by `server_public_key_pem`.
///
/// Performs the full client half of the protocol: fresh key + nonce, AEAD
/// encryption, key wrap, base64 framing.
///
/// # Errors
///
/// Returns [`ClientError::InvalidPublicKey`] if the PEM cannot be parsed,
/// otherwise propagates encryption-primitive failures.
pub fn encrypt_file(
    plaintext: &[u8],
    server_public_key_pem: &str,
    filename: &str,
) -> Result<UploadRequest, ClientError> {
    let public_key = RsaPublicKey::from_public_key_pem(server_public_key_pem)
        .map_err(|_| ClientError::InvalidPublicKey)?;
    encrypt_with_key(plaintext, &public_key, filename)
}

/// Encrypt `plaintext` under an already-parsed server public key.
pub fn encrypt_with_key(
    plaintext: &[u8],
    server_public_key: &RsaPublicKey,
    filename: &str,
) -> Result<UploadRequest, ClientError> {
    // Fresh symmetric material per upload, from the OS CSPRNG.
    let mut key_bytes = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key_bytes);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(&key_bytes).map_err(|_| ClientError::Encrypt)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Ciphertext with the 16-byte authentication tag appended.
    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| ClientError::Encrypt)?;

    let wrapped_key = server_public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &key_bytes)
        .map_err(|_| ClientError::Wrap)?;

    // The plaintext key has served its purpose; zero it.
    key_bytes.iter_mut().for_each(|b| *b = 0);

    Ok(UploadRequest {
        wrapped_key: STANDARD.encode(wrapped_key),
        encrypted_body: STANDARD.encode(sealed),
        nonce: STANDARD.encode(nonce_bytes),
        filename: filename.to_owned(),
        mime_type: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::TAG_LEN;
    use rsa::RsaPrivateKey;

    fn test_key_pair() -> (RsaPrivateKey, RsaPublicKey) {
        let private = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
        let public = RsaPublicKey::from(&private);
        (private, public)
    }

    #[test]
    fn payload_fields_are_well_formed() {
        let (_, public) = test_key_pair();
        let req = encrypt_with_key(b"hello world", &public, "hello.txt").unwrap();

        assert!(req.has_required_fields());
        assert_eq!(req.filename, "hello.txt");

        // 2048-bit modulus => 256-byte wrapped key block.
        let wrapped = STANDARD.decode(&req.wrapped_key).unwrap();
        assert_eq!(wrapped.len(), 256);

        let nonce = STANDARD.decode(&req.nonce).unwrap();
        assert_eq!(nonce.len(), NONCE_LEN);

        // Ciphertext is plaintext-sized with the tag appended.
        let body = STANDARD.decode(&req.encrypted_body).unwrap();
        assert_eq!(body.len(), b"hello world".len() + TAG_LEN);
    }

    #[test]
    fn fresh_key_and_nonce_per_upload() {
        let (_, public) = test_key_pair();
        let a = encrypt_with_key(b"same plaintext", &public, "a.bin").unwrap();
        let b = encrypt_with_key(b"same plaintext", &public, "b.bin").unwrap();

        // Independent random key and nonce make every field differ.
        assert_ne!(a.encrypted_body, b.encrypted_body);
        assert_ne!(a.wrapped_key, b.wrapped_key);
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn wrapped_key_unwraps_to_a_256_bit_key() {
        let (private, public) = test_key_pair();
        let req = encrypt_with_key(b"payload", &public, "f").unwrap();
        let wrapped = STANDARD.decode(&req.wrapped_key).unwrap();
        let key = private.decrypt(Oaep::new::<Sha256>(), &wrapped).unwrap();
        assert_eq!(key.len(), KEY_LEN);
    }

    #[test]
    fn empty_plaintext_still_produces_a_tag() {
        let (_, public) = test_key_pair();
        let req = encrypt_with_key(b"", &public, "empty").unwrap();
        let body = STANDARD.decode(&req.encrypted_body).unwrap();
        assert_eq!(body.len(), TAG_LEN);
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let err = encrypt_file(b"x", "not a pem", "f").unwrap_err();
        assert!(matches!(err, ClientError::InvalidPublicKey));
    }
}
