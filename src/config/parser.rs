use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every option has a default, so a minimal or empty TOML file yields the
/// stock configuration.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
auto-scale = false
max-concurrency-limit = 16
domain-concurrency-limit = 2
domain-scraping-timeout-hours = 1
url-task-timeout-seconds = 60
product-url-patterns = ["/p/", "/item/"]

[fetcher]
page-fetch-timeout-ms = 30000
max-fetch-retries = 2
retry-backoff-base-seconds = 1

[input]
seed-file = "seeds.txt"

[output]
directory = "out"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert!(!config.crawler.auto_scale);
        assert_eq!(config.crawler.max_concurrency_limit, 16);
        assert_eq!(config.crawler.domain_concurrency_limit, 2);
        assert_eq!(config.crawler.product_url_patterns, vec!["/p/", "/item/"]);
        assert_eq!(config.fetcher.max_fetch_retries, 2);
        assert_eq!(config.input.seed_file, "seeds.txt");
        assert_eq!(config.output.directory, "out");
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert!(config.crawler.auto_scale);
        assert_eq!(config.crawler.max_concurrency_limit, 32);
        assert_eq!(config.crawler.domain_concurrency_limit, 3);
        assert_eq!(config.crawler.url_task_timeout_seconds, 150);
        assert_eq!(config.fetcher.page_fetch_timeout_ms, 120_000);
        assert_eq!(config.fetcher.max_fetch_retries, 3);
        assert!(config
            .crawler
            .product_url_patterns
            .contains(&"/products/".to_string()));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[crawler\nmax-concurrency-limit = ");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/prowl.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = create_temp_config("[crawler]\nmax-concurrency-limit = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
