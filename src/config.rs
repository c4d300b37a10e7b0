//! Fetch configuration
//!
//! Page size, offset ceiling, pacing and retry limits for one pagination
//! run. Built in code with [`FetchConfig::builder`] or loaded from a YAML
//! file where every key is optional:
//!
//! ```yaml
//! base_url: https://data-api.polymarket.com/trades
//! page_size: 1000
//! max_offset: 3000
//! request_delay_ms: 500
//! max_retries: 3
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default trades endpoint
pub const DEFAULT_BASE_URL: &str = "https://data-api.polymarket.com/trades";

/// Largest page the API will serve
pub const API_MAX_PAGE_SIZE: u32 = 1000;

/// Largest offset the API accepts
pub const API_MAX_OFFSET: u32 = 3000;

/// Immutable settings for a pagination run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Trades endpoint
    pub base_url: String,
    /// Records requested per page
    pub page_size: u32,
    /// Last offset that may be requested
    pub max_offset: u32,
    /// Pause between pages, also the base of the retry backoff
    pub request_delay: Duration,
    /// Retries allowed per page after the first attempt
    pub max_retries: u32,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: API_MAX_PAGE_SIZE,
            max_offset: API_MAX_OFFSET,
            request_delay: Duration::from_millis(500),
            max_retries: 3,
            user_agent: format!("wallet-trades/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Create a new config builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Load a YAML config file on top of the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse YAML on top of the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        let config = file.apply(Self::default());
        config.validate()?;
        Ok(config)
    }

    /// Check values against the API limits
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;

        if self.page_size == 0 || self.page_size > API_MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {API_MAX_PAGE_SIZE}"),
            ));
        }
        if self.max_offset > API_MAX_OFFSET {
            return Err(Error::invalid_value(
                "max_offset",
                format!("must not exceed {API_MAX_OFFSET}"),
            ));
        }
        Ok(())
    }

    /// Wait before retry `attempt` (1-based): `request_delay * 2^attempt`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.request_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Builder for [`FetchConfig`]
#[derive(Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set the trades endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the offset ceiling
    pub fn max_offset(mut self, offset: u32) -> Self {
        self.config.max_offset = offset;
        self
    }

    /// Set the inter-page delay
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    /// Set max retries per page
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> FetchConfig {
        self.config
    }
}

/// On-disk shape of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    max_offset: Option<u32>,
    #[serde(default)]
    request_delay_ms: Option<u64>,
    #[serde(default)]
    max_retries: Option<u32>,
    #[serde(default)]
    user_agent: Option<String>,
}

impl ConfigFile {
    fn apply(self, mut config: FetchConfig) -> FetchConfig {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        if let Some(offset) = self.max_offset {
            config.max_offset = offset;
        }
        if let Some(ms) = self.request_delay_ms {
            config.request_delay = Duration::from_millis(ms);
        }
        if let Some(retries) = self.max_retries {
            config.max_retries = retries;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        config
    }
}
