use super::{types::Config, ConfigError};

/// Validate configuration.
/// Currently validates:
/// - service URLs are http(s)
/// - readiness timeout is non-zero
/// - download client port is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let urls = [
        ("sonarr", &config.sonarr.url),
        ("radarr", &config.radarr.url),
        ("prowlarr", &config.prowlarr.url),
    ];
    for (name, url) in urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "{}.url must be an http(s) URL, got {:?}",
                name, url
            )));
        }
    }

    if config.ready_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ready_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.download_client.port == 0 {
        return Err(ConfigError::ValidationError(
            "download_client.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_bad_url_fails() {
        let mut config = Config::default();
        config.radarr.url = "localhost:7878".to_string();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.ready_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_port_fails() {
        let mut config = Config::default();
        config.download_client.port = 0;
        assert!(validate_config(&config).is_err());
    }
}
