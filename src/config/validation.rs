use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::url::parse_root;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawl target and limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_root(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

    if let Some(base_url) = &config.base_url {
        parse_root(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
    }

    if config.ignore.iter().any(|pattern| pattern.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "ignore patterns cannot be empty".to_string(),
        ));
    }

    if config.max_concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrency must be >= 1, got {}",
            config.max_concurrency
        )));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}
