//! Sender-side half of the sealdrop transfer protocol.
//!
//! This crate is intentionally free of HTTP and filesystem dependencies: it
//! turns file bytes plus the server's public key into a ready-to-post
//! [`common::protocol::UploadRequest`] and nothing more. Native senders and
//! the server's test suite drive it directly; a browser sender implements the
//! same steps with WebCrypto.
//!
//! # Payload format
//!
//! ```text
//! wrappedKey    = base64( RSA-OAEP-SHA256( serverPub, aesKey ) )
//! encryptedBody = base64( AES-256-GCM( aesKey, nonce, file ) || tag )
//! nonce         = base64( 96-bit nonce )
//! filename      = plaintext string (documented tradeoff)
//! ```

pub mod engine;

pub use engine::{encrypt_file, encrypt_with_key, ClientError};
