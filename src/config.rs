//! Application configuration

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;
use tracing::warn;

use crate::errors::VehicleInfoError;

const DEFAULT_CONFIG_FILE: &str = "config/default";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/130.0.0.0 Mobile Safari/537.36";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Scheme and host of the registry site, without a trailing path
    pub base_url: String,
    pub user_agent: String,
    /// Sent as `Referer`; derived from `base_url` when unset
    pub referer: Option<String>,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl AppConfig {
    /// Load configuration from `config/default` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration with built-in defaults, an optional file and
    /// `VEHICLEINFO__`-prefixed environment variables, in increasing priority.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000_i64)?
            .set_default("upstream.base_url", "https://vahanx.in")?
            .set_default("upstream.user_agent", DEFAULT_USER_AGENT)?
            .set_default("upstream.timeout", 15_i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("VEHICLEINFO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), VehicleInfoError> {
        self.upstream.validate()
    }
}

impl UpstreamConfig {
    pub fn validate(&self) -> Result<(), VehicleInfoError> {
        self.validate_base_url()?;
        self.validate_timeout()?;
        Ok(())
    }

    /// Referer header value, falling back to the search page of `base_url`
    pub fn referer(&self) -> String {
        match &self.referer {
            Some(referer) => referer.clone(),
            None => format!("{}/rc-search", self.base_url.trim_end_matches('/')),
        }
    }

    fn validate_base_url(&self) -> Result<(), VehicleInfoError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(VehicleInfoError::ConfigurationError {
                message: "Upstream base URL cannot be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VehicleInfoError::ConfigurationError {
                message: format!("Upstream base URL must be http(s): {}", url),
            });
        }
        if url.starts_with("http://") {
            warn!("Upstream base URL is not using TLS: {}", url);
        }
        Ok(())
    }

    fn validate_timeout(&self) -> Result<(), VehicleInfoError> {
        if self.timeout.is_zero() {
            return Err(VehicleInfoError::ConfigurationError {
                message: "Upstream timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
