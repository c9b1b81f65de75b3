//! [`ServerKeyPair`]: the process-lifetime RSA key pair.
//!
//! Generated exactly once at startup and never rotated, persisted, or
//! serialised. Every restart produces a fresh pair, which deliberately
//! invalidates any payload wrapped under the previous public key — an
//! in-flight upload across a restart fails with a decryption error.

use rsa::{
    pkcs8::{EncodePublicKey, LineEnding},
    Oaep, RsaPrivateKey, RsaPublicKey,
};
use sha2::Sha256;
use thiserror::Error;

use common::UploadError;

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Errors produced while generating the key pair. Fatal to startup: the
/// service cannot safely run without one.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The RSA prime search or key construction failed.
    #[error("RSA key generation failed: {0}")]
    Generation(rsa::Error),

    /// The public half could not be encoded as SPKI PEM.
    #[error("public key PEM encoding failed: {0}")]
    Encoding(rsa::pkcs8::spki::Error),
}

/// The server's asymmetric key pair, immutable after construction.
///
/// Shared behind an `Arc` and read concurrently by every in-flight request;
/// no locking is needed because nothing mutates it post-init. The private
/// half never leaves this struct except through [`ServerKeyPair::unwrap_key`].
pub struct ServerKeyPair {
    private: RsaPrivateKey,
    public_pem: String,
}

impl ServerKeyPair {
    /// Generate a fresh key pair with a `bits`-sized modulus.
    ///
    /// This is a blocking, CPU-bound, one-time operation; call it during
    /// startup before the listener is bound.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if generation or PEM export fails.
    pub fn generate(bits: usize) -> Result<Self, KeyError> {
        let mut rng = rand::rngs::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits).map_err(KeyError::Generation)?;
        let public_pem = RsaPublicKey::from(&private)
            .to_public_key_pem(LineEnding::LF)
            .map_err(KeyError::Encoding)?;
        Ok(Self {
            private,
            public_pem,
        })
    }

    /// SPKI PEM encoding of the public half, suitable for cross-language
    /// import (WebCrypto `importKey("spki", ...)`).
    pub fn public_key_pem(&self) -> &str {
        &self.public_pem
    }

    /// RSA-OAEP-SHA256 decrypt a wrapped symmetric key.
    ///
    /// # Errors
    ///
    /// Any failure — wrong key, corrupted block, padding mismatch — maps
    /// uniformly to [`UploadError::DecryptionFailed`] so the response cannot
    /// reveal which step rejected the payload.
    pub fn unwrap_key(&self, wrapped: &[u8]) -> Result<Vec<u8>, UploadError> {
        self.private
            .decrypt(Oaep::new::<Sha256>(), wrapped)
            .map_err(|_| UploadError::DecryptionFailed)
    }
}

impl std::fmt::Debug for ServerKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print private key material — not even in debug builds.
        f.write_str("ServerKeyPair([REDACTED])")
    }
}
