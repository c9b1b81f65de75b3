//! Wire types, protocol constants, and errors shared across `sealdrop` crates.

pub mod error;
pub mod protocol;

pub use error::UploadError;
