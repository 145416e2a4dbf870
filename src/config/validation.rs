use crate::config::types::{Config, CrawlOptions, UserAgentConfig};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Upper bound on verification fetches in flight
const MAX_VERIFY_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_options(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawl options
///
/// Also used by the CLI after command-line overrides are applied.
pub fn validate_options(options: &CrawlOptions) -> Result<(), ConfigError> {
    if options.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            options.max_pages
        )));
    }

    if options.max_candidates < 1 {
        return Err(ConfigError::Validation(format!(
            "max_candidates must be >= 1, got {}",
            options.max_candidates
        )));
    }

    if !options.delay_seconds.is_finite() || options.delay_seconds < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay_seconds must be a non-negative number, got {}",
            options.delay_seconds
        )));
    }

    if let Err(e) = Duration::try_from_secs_f64(options.delay_seconds) {
        return Err(ConfigError::Validation(format!(
            "delay_seconds is out of range, got {}: {}",
            options.delay_seconds, e
        )));
    }

    if options.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_seconds must be >= 1, got {}",
            options.timeout_seconds
        )));
    }

    if options.max_frontier == Some(0) {
        return Err(ConfigError::Validation(
            "max_frontier must be >= 1 when set".to_string(),
        ));
    }

    if options.verify_concurrency < 1 || options.verify_concurrency > MAX_VERIFY_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "verify_concurrency must be between 1 and {}, got {}",
            MAX_VERIFY_CONCURRENCY, options.verify_concurrency
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
