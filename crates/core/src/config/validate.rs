use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - A TMDB credential (access token or API key) is present
/// - Upstream base URLs are http(s)
/// - Client timeouts are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !config.tmdb.has_credentials() {
        return Err(ConfigError::ValidationError(
            "tmdb.access_token or tmdb.api_key must be set".to_string(),
        ));
    }

    for (key, url) in [
        ("tmdb.base_url", config.tmdb.base_url()),
        ("source.base_url", config.source.base_url.as_str()),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with http:// or https:// (got '{}')",
                key, url
            )));
        }
    }

    if config.tmdb.timeout_secs == 0 || config.source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs and source.timeout_secs must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, SourceConfig};
    use crate::external_catalog::TmdbConfig;

    fn valid_config() -> Config {
        Config {
            tmdb: TmdbConfig {
                access_token: Some("token".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse().unwrap(),
                port: 0,
            },
            ..valid_config()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_missing_credentials_fails() {
        let config = Config {
            tmdb: TmdbConfig {
                access_token: Some(String::new()),
                api_key: None,
                ..Default::default()
            },
            ..valid_config()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("tmdb.access_token"));
    }

    #[test]
    fn test_validate_api_key_is_enough() {
        let config = Config {
            tmdb: TmdbConfig {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
            ..valid_config()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_bad_source_url_fails() {
        let config = Config {
            source: SourceConfig {
                base_url: "bitru.org".to_string(),
                ..Default::default()
            },
            ..valid_config()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("source.base_url"));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let config = Config {
            source: SourceConfig {
                timeout_secs: 0,
                ..Default::default()
            },
            ..valid_config()
        };
        assert!(validate_config(&config).is_err());
    }
}
