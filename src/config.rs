use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::sources::DEFAULT_BASE_URL;
use crate::view::DEFAULT_SCROLL_THRESHOLD;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Base URL of the meal database API, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; requests never time out when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Where the last successful result list is kept
    #[serde(default)]
    pub storage: StorageConfig,
    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Configuration for the result store
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Whether results are persisted at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Override for the store file (defaults to the platform data dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Configuration for the terminal front end
#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Scroll offset past which "scroll to top" is offered
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: u32,
    /// Largest value offered for the max-ingredient bound
    #[serde(default = "default_max_ingredient_choices")]
    pub max_ingredient_choices: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
            max_ingredient_choices: default_max_ingredient_choices(),
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("recipe-finder/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_scroll_threshold() -> u32 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_max_ingredient_choices() -> usize {
    20
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__STORAGE__PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the precedence rules.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    load_config_from("recipe-finder")
}

/// Same as [`load_config`], reading the file named `name` (extension optional)
pub fn load_config_from(name: &str) -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        // Use double underscore for nested: RECIPE_FINDER__UI__SCROLL_THRESHOLD
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "https://www.themealdb.com/api/json/v1/1");
        assert!(default_user_agent().starts_with("recipe-finder/"));
        assert_eq!(default_scroll_threshold(), 300);
        assert_eq!(default_max_ingredient_choices(), 20);
    }

    #[test]
    fn test_default_has_no_timeout() {
        let config = FinderConfig::default();
        assert!(config.timeout().is_none());
        assert!(config.storage.enabled);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                base_url = "http://localhost:8080/api"
                timeout_secs = 5

                [storage]
                enabled = false

                [ui]
                scroll_threshold = 120
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: FinderConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert!(!config.storage.enabled);
        assert_eq!(config.ui.scroll_threshold, 120);
        assert_eq!(config.ui.max_ingredient_choices, 20);
    }

    #[test]
    fn test_load_config_reads_named_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("recipe-finder.toml"),
            r#"
            timeout_secs = 12

            [ui]
            max_ingredient_choices = 8
            "#,
        )
        .unwrap();

        let name = dir.path().join("recipe-finder");
        let config = load_config_from(name.to_str().unwrap()).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(12)));
        assert_eq!(config.ui.max_ingredient_choices, 8);
        assert_eq!(config.ui.scroll_threshold, 300);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("recipe-finder");
        let config = load_config_from(name.to_str().unwrap()).unwrap();
        assert_eq!(config.ui.max_ingredient_choices, 20);
        assert_eq!(config.ui.scroll_threshold, 300);
    }
}
