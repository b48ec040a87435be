use anyhow::Context;
use iss_common::{Coordinates, IpAddress};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Log files older than this many days are removed at start-up
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub endpoints: EndpointConfig,
}

/// Base URLs of the three upstream services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_ip_service_url")]
    pub ip_service_url: String,

    #[serde(default = "default_geo_service_url")]
    pub geo_service_url: String,

    /// ipbase.com API key, sent as the `apikey` query value
    #[serde(default)]
    pub geo_api_key: String,

    #[serde(default = "default_pass_service_url")]
    pub pass_service_url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_retention_days() -> u64 {
    3
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("iss-tracker/{}", env!("CARGO_PKG_VERSION"))
}

fn default_ip_service_url() -> String {
    "https://api.ipify.org/".to_string()
}

fn default_geo_service_url() -> String {
    "https://api.ipbase.com/v2/info".to_string()
}

fn default_pass_service_url() -> String {
    "https://iss-pass.herokuapp.com/json/".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_retention_days: default_log_retention_days(),
            request_timeout_seconds: default_request_timeout_seconds(),
            user_agent: default_user_agent(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ip_service_url: default_ip_service_url(),
            geo_service_url: default_geo_service_url(),
            geo_api_key: String::new(),
            pass_service_url: default_pass_service_url(),
        }
    }
}

impl TrackerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TrackerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Like [`TrackerConfig::from_file`], but a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

impl TrackerConfig {
    pub fn log_retention(&self) -> Duration {
        Duration::from_secs(self.log_retention_days * 60 * 60 * 24)
    }
}

/// Append `query` to `base`, joining with `&` if `base` already has a query.
fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

impl EndpointConfig {
    pub fn ip_url(&self) -> String {
        with_query(&self.ip_service_url, "format=json")
    }

    /// The IP goes in verbatim; only the key is percent-encoded.
    pub fn geo_url(&self, ip: &IpAddress) -> String {
        with_query(
            &self.geo_service_url,
            &format!("apikey={}&ip={}", urlencoding::encode(&self.geo_api_key), ip),
        )
    }

    pub fn pass_url(&self, coords: Coordinates) -> String {
        with_query(
            &self.pass_service_url,
            &format!("lat={}&lon={}", coords.latitude, coords.longitude),
        )
    }
}
