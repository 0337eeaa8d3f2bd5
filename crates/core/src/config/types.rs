use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::external_catalog::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Release search surface configuration.
///
/// The search URL is built as `{base_url}{search_path}?{query_param}=<query>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub base_url: String,
    #[serde(default = "default_search_path")]
    pub search_path: String,
    #[serde(default = "default_query_param")]
    pub query_param: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            search_path: default_search_path(),
            query_param: default_query_param(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_source_url() -> String {
    "https://bitru.org".to_string()
}

fn default_search_path() -> String {
    "/search.php".to_string()
}

fn default_query_param() -> String {
    "search".to_string()
}

fn default_user_agent() -> String {
    concat!("reelscout/", env!("CARGO_PKG_VERSION")).to_string()
}

pub(crate) fn default_timeout() -> u32 {
    30
}

/// Pipeline-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Upper bound for a whole search (resolution + fetch), 0 disables it.
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u32,
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(u64::from(self.timeout_secs)))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_search_timeout(),
        }
    }
}

fn default_search_timeout() -> u32 {
    60
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub source: SourceConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Sanitized TMDB config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub base_url: String,
    pub language: String,
    pub access_token_configured: bool,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let configured = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

        Self {
            server: config.server.clone(),
            tmdb: SanitizedTmdbConfig {
                base_url: config.tmdb.base_url().to_string(),
                language: config.tmdb.language.clone(),
                access_token_configured: configured(&config.tmdb.access_token),
                api_key_configured: configured(&config.tmdb.api_key),
                timeout_secs: config.tmdb.timeout_secs,
            },
            source: config.source.clone(),
            search: config.search.clone(),
            logging: config.logging.clone(),
        }
    }
}
