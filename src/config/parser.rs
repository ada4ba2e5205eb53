use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use huntsman::config::load_config;
///
/// let config = load_config(Path::new("huntsman.toml")).unwrap();
/// println!("Workers: {}", config.crawler.concurrency);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use std::path::PathBuf;
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
concurrency = 4
frontier-capacity = 500
results-capacity = 20

[fetch]
timeout-secs = 5
retries = 2
backoff-ms = 250
user-agent = "TestCrawler/1.0"

[output]
export-dir = "/tmp/exports"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.concurrency, 4);
        assert_eq!(config.crawler.frontier_capacity, 500);
        assert_eq!(config.crawler.results_capacity, 20);
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.retries, 2);
        assert_eq!(config.fetch.backoff_ms, 250);
        assert_eq!(config.fetch.user_agent, "TestCrawler/1.0");
        assert_eq!(config.output.export_dir, Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert!(config.crawler.concurrency >= 1 && config.crawler.concurrency <= 10);
        assert_eq!(config.crawler.frontier_capacity, 10_000);
        assert_eq!(config.crawler.results_capacity, 100);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.retries, 0);
        assert!(config.fetch.user_agent.starts_with("huntsman/"));
        assert!(config.output.export_dir.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[fetch]\nretries = 3\n").unwrap();
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.fetch.backoff_ms, 500);
        assert_eq!(config.crawler.frontier_capacity, 10_000);
    }

    #[test]
    fn test_frontier_smaller_than_workers_need_is_rejected() {
        let result = parse_config("[crawler]\nconcurrency = 1\nfrontier-capacity = 1\n");
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/huntsman.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nconcurrency = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
