use crate::config::types::{Config, CrawlerConfig, FetcherConfig, InputConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates orchestration limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrency_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrency-limit must be >= 1, got {}",
            config.max_concurrency_limit
        )));
    }

    if config.domain_concurrency_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "domain-concurrency-limit must be >= 1, got {}",
            config.domain_concurrency_limit
        )));
    }

    if config.domain_scraping_timeout_hours < 1 {
        return Err(ConfigError::Validation(format!(
            "domain-scraping-timeout-hours must be >= 1, got {}",
            config.domain_scraping_timeout_hours
        )));
    }

    if config.url_task_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "url-task-timeout-seconds must be >= 1, got {}",
            config.url_task_timeout_seconds
        )));
    }

    if config.product_url_patterns.is_empty() {
        return Err(ConfigError::Validation(
            "product-url-patterns cannot be empty".to_string(),
        ));
    }

    if config.product_url_patterns.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "product-url-patterns entries cannot be empty strings".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher timing and retry settings
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.page_fetch_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "page-fetch-timeout-ms must be >= 100ms, got {}ms",
            config.page_fetch_timeout_ms
        )));
    }

    if config.max_fetch_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-fetch-retries must be >= 1, got {}",
            config.max_fetch_retries
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seed_file.is_empty() {
        return Err(ConfigError::Validation(
            "seed-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_domain_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.domain_concurrency_limit = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_product_patterns_rejected() {
        let mut config = Config::default();
        config.crawler.product_url_patterns.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_pattern_entry_rejected() {
        let mut config = Config::default();
        config.crawler.product_url_patterns.push(String::new());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_tiny_fetch_timeout_rejected() {
        let mut config = Config::default();
        config.fetcher.page_fetch_timeout_ms = 10;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.fetcher.user_agent.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
