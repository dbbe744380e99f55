//! Configuration management.
//!
//! Configuration is read from a TOML file and `ARXIV_SEARCH_*` environment
//! variables, environment taking precedence. Nested keys use `__`, so
//! `ARXIV_SEARCH_API__TIMEOUT_SECS=60` sets `api.timeout_secs`.
//!
//! ```toml
//! [api]
//! base_url = "http://export.arxiv.org/api/query"
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! user_agent = "arxiv-search/0.1.0"
//!
//! [search]
//! max_results = 20
//! sort_by = "lastUpdatedDate"
//! sort_order = "descending"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ArxivError, Result};
use crate::models::{SortBy, SortOrder, DEFAULT_MAX_RESULTS};
use crate::query::ARXIV_API_URL;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "arxiv-search.toml";

const ENV_PREFIX: &str = "ARXIV_SEARCH";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint and HTTP settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Defaults applied by the command line tool
    #[serde(default)]
    pub search: SearchDefaults,
}

/// API endpoint and HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    ARXIV_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDefaults {
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            sort_by: None,
            sort_order: None,
        }
    }
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl Config {
    /// Check values the type system cannot
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            ArxivError::validation(format!("invalid base_url {}: {}", self.api.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ArxivError::validation(format!(
                    "invalid base_url scheme: {}",
                    scheme
                )))
            }
        }

        if self.search.max_results == 0 {
            return Err(ArxivError::validation(
                "search.max_results must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ArxivError::Config(config::ConfigError::Message(e.to_string())))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Get the configuration from environment variables and defaults
pub fn get_config() -> Result<Config> {
    let settings = config::Config::builder().add_source(environment()).build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a configuration file in the default locations
///
/// Looks for `./arxiv-search.toml`, then `<config dir>/arxiv-search/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("arxiv-search").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://export.arxiv.org/api/query");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.user_agent.starts_with("arxiv-search/"));
        assert_eq!(config.search.max_results, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[api]
base_url = "https://export.arxiv.org/api/query"
connect_timeout_secs = 3

[search]
sort_by = "submittedDate"
sort_order = "ascending"
"#;

        let mut file = File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.api.base_url, "https://export.arxiv.org/api/query");
        assert_eq!(config.api.connect_timeout_secs, 3);
        assert_eq!(config.search.sort_by, Some(SortBy::SubmittedDate));
        assert_eq!(config.search.sort_order, Some(SortOrder::Ascending));
    }

    #[test]
    fn test_config_file_rejects_unknown_sort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nsort_by = \"newest\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_config_file_rejects_bad_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"ftp://example.com\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_config_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/arxiv-search.toml");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_environment_override() {
        std::env::set_var("ARXIV_SEARCH_API__TIMEOUT_SECS", "75");
        let config = get_config().unwrap();
        std::env::remove_var("ARXIV_SEARCH_API__TIMEOUT_SECS");

        assert_eq!(config.api.timeout_secs, 75);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let mut config = Config::default();
        config.search.sort_by = Some(SortBy::LastUpdatedDate);

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("sort_by = \"lastUpdatedDate\""));
        assert!(!rendered.contains("sort_order"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
