//! Configuration loading and validation for the `ectoken` CLI.
//!
//! Values are read from environment variables at startup. The shared secret
//! may additionally be supplied on the command line, which takes precedence.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    Text,
    /// Structured JSON, one object per line.
    Json,
}

/// Validated CLI configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Shared token secret (`EC_SECRET`). Required unless `--secret` is given.
    #[serde(default)]
    pub ec_secret: Option<String>,

    /// Tracing filter directive (e.g. `"warn"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Config {
    /// Load configuration from environment variables, then apply the
    /// command-line secret override.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or no usable secret is
    /// available.
    pub fn load(secret_override: Option<String>) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let mut c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        if secret_override.is_some() {
            c.ec_secret = secret_override;
        }

        c.validate()?;
        Ok(c)
    }

    /// The shared secret. Only valid after [`Config::load`] has succeeded.
    pub fn secret(&self) -> &str {
        self.ec_secret.as_deref().unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        match self.ec_secret.as_deref() {
            Some(s) if !s.trim().is_empty() => {}
            _ => anyhow::bail!("EC_SECRET (or --secret) is required and must not be empty"),
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("ec_secret", &self.ec_secret.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}
