use crate::config::types::{Config, FetchConfig, OutputConfig, ProxyConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_proxy_config(&config.proxy)?;
    validate_output_config(&config.output)?;
    validate_selector_config(&config.selectors)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "listing_url must be an http(s) URL, got scheme '{}'",
            url.scheme()
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates the fetch/retry configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.min_html_length < 1 {
        return Err(ConfigError::Validation(format!(
            "min_html_length must be >= 1, got {}",
            config.min_html_length
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the proxy endpoints
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    if config.socks_addr.is_empty() {
        return Err(ConfigError::Validation(
            "socks_addr cannot be empty while the proxy is enabled".to_string(),
        ));
    }

    if config.control_addr.is_empty() {
        return Err(ConfigError::Validation(
            "control_addr cannot be empty while the proxy is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validates the output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dir.is_empty() {
        return Err(ConfigError::Validation(
            "output dir cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "file_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every configured selector parses
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    check_selector("item", &config.item)?;
    check_selector("title", &config.title)?;
    check_selector("price", &config.price)?;
    check_selector("year", &config.year)?;
    check_selector("mileage", &config.mileage)?;
    check_selector("pages", &config.pages)?;
    Ok(())
}

fn check_selector(field: &'static str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        field,
        message: e.to_string(),
    })?;
    Ok(())
}
