//! Configuration loading and validation for the sealdrop server.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any value cannot be parsed or fails
//! validation.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Flat directory decrypted uploads are written into; created at startup
    /// if absent.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// RSA modulus size for the process key pair. Minimum 2048.
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    3000
}
fn default_storage_dir() -> String {
    "uploads".into()
}
fn default_max_body_bytes() -> usize {
    // 50 MiB: comfortably above the base64 expansion of typical file drops.
    50 * 1024 * 1024
}
fn default_rsa_key_bits() -> usize {
    2048
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.storage_dir.trim().is_empty() {
            anyhow::bail!("STORAGE_DIR must not be empty");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be > 0");
        }
        if self.rsa_key_bits < 2048 {
            anyhow::bail!("RSA_KEY_BITS must be at least 2048");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            port: default_port(),
            storage_dir: default_storage_dir(),
            max_body_bytes: default_max_body_bytes(),
            rsa_key_bits: default_rsa_key_bits(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_port(), 3000);
        assert_eq!(default_storage_dir(), "uploads");
        assert_eq!(default_max_body_bytes(), 50 * 1024 * 1024);
        assert_eq!(default_rsa_key_bits(), 2048);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_storage_dir() {
        let cfg = Config {
            storage_dir: "   ".into(),
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_body_cap() {
        let cfg = Config {
            max_body_bytes: 0,
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_weak_key_size() {
        let cfg = Config {
            rsa_key_bits: 1024,
            ..base_config()
        };
        assert!(cfg.validate().is_err());
    }
}
