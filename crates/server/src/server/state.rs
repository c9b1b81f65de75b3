//! Shared application state injected into every Axum handler.

use std::path::PathBuf;
use std::sync::Arc;

use crate::keys::ServerKeyPair;

/// Application state shared across all request handlers.
///
/// Both fields are immutable after construction and `Arc`-wrapped, so Axum
/// can clone the state per request without copying and concurrent decrypt
/// operations never contend on a lock.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The process-lifetime RSA key pair.
    pub keys: Arc<ServerKeyPair>,
    /// Flat directory decrypted files are written into.
    pub storage_dir: Arc<PathBuf>,
}

impl AppState {
    /// Create a new [`AppState`] from an already-generated key pair and an
    /// existing storage directory.
    pub fn new(keys: Arc<ServerKeyPair>, storage_dir: PathBuf) -> Self {
        Self {
            keys,
            storage_dir: Arc::new(storage_dir),
        }
    }
}
