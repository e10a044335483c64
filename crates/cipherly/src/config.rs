//! Engine configuration.
//!
//! All values are read from `CIPHERLY_*` environment variables. Loading
//! fails eagerly with a clear error if the origin is missing or invalid —
//! a bad origin would silently mint artifacts no deployment accepts.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Validated engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Origin of this deployment, e.g. `https://cipherly.app`. **Required.**
    /// Every artifact embeds `<origin>/decrypt/#` and decoding rejects
    /// artifacts framed for any other origin.
    pub origin: String,

    /// Base URL of the policy authority. Defaults to `origin` (the
    /// authority is mounted under `/api` on the same deployment).
    #[serde(default)]
    pub authority_url: Option<String>,

    /// Timeout in seconds for each authority round trip.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

impl Config {
    /// Load and validate configuration from `CIPHERLY_*` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CIPHERLY"))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Build a config directly, validating the same way as [`from_env`].
    ///
    /// [`from_env`]: Config::from_env
    pub fn new(origin: &str, authority_url: Option<&str>) -> Result<Self> {
        let c = Config {
            origin: origin.into(),
            authority_url: authority_url.map(Into::into),
            request_timeout_secs: default_request_timeout(),
        };
        c.validate()?;
        Ok(c)
    }

    /// The decrypt landing URL embedded in (and required of) every artifact:
    /// `<origin>/decrypt/#`.
    pub fn decrypt_url(&self) -> String {
        format!("{}/decrypt/#", self.origin.trim_end_matches('/'))
    }

    /// Base URL of the policy authority.
    pub fn authority_url(&self) -> &str {
        self.authority_url.as_deref().unwrap_or(&self.origin)
    }

    /// Per-request timeout for authority round trips.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first
    /// failure.
    fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            anyhow::bail!("CIPHERLY_ORIGIN is required and must not be empty");
        }
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            anyhow::bail!("CIPHERLY_ORIGIN must start with http:// or https://");
        }
        // The frame scan anchors on the first '#'; an origin containing one
        // would shift the frame boundary.
        if self.origin.contains('#') {
            anyhow::bail!("CIPHERLY_ORIGIN must not contain '#'");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("CIPHERLY_REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}
