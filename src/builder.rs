use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::App;
use crate::config::FinderConfig;
use crate::sources::MealDbSource;
use crate::storage::ResultStore;
use crate::FinderError;

/// Where search results are kept between sessions
#[derive(Debug, Clone, Default)]
pub enum StoreMode {
    /// Platform data dir (default)
    #[default]
    Default,
    /// Explicit file path
    Path(PathBuf),
    /// Do not persist results
    Disabled,
}

/// Builder for an [`App`] talking to TheMealDB
#[derive(Debug, Default)]
pub struct RecipeFinderBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: StoreMode,
    scroll_threshold: Option<u32>,
}

impl RecipeFinderBuilder {
    /// Start from a loaded configuration
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().config(&FinderConfig::default());
    /// ```
    pub fn config(mut self, config: &FinderConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = config.timeout();
        self.user_agent = Some(config.user_agent.clone());
        self.store = match (config.storage.enabled, &config.storage.path) {
            (false, _) => StoreMode::Disabled,
            (true, Some(path)) => StoreMode::Path(path.clone()),
            (true, None) => StoreMode::Default,
        };
        self.scroll_threshold = Some(config.ui.scroll_threshold);
        self
    }

    /// Point at a different API root, e.g. a mirror or a test server
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder()
    ///     .base_url("https://www.themealdb.com/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests; there is none by default
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = StoreMode::Path(path.into());
        self
    }

    pub fn without_store(mut self) -> Self {
        self.store = StoreMode::Disabled;
        self
    }

    pub fn scroll_threshold(mut self, threshold: u32) -> Self {
        self.scroll_threshold = Some(threshold);
        self
    }

    /// Build the controller
    ///
    /// # Errors
    /// Returns `FinderError::Builder` for a base URL without an http(s) scheme,
    /// and `FinderError::Network` if the HTTP client cannot be created.
    pub fn build(self) -> Result<App, FinderError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| crate::sources::DEFAULT_BASE_URL.to_string());
        let source =
            MealDbSource::with_base_url(base_url, self.timeout, self.user_agent.as_deref())?;

        let store = match self.store {
            StoreMode::Default => ResultStore::default_path().map(ResultStore::new),
            StoreMode::Path(path) => Some(ResultStore::new(path)),
            StoreMode::Disabled => None,
        };

        let app = App::new(Arc::new(source), store);
        Ok(match self.scroll_threshold {
            Some(threshold) => app.with_scroll_threshold(threshold),
            None => app,
        })
    }

    /// Build the controller and restore the last stored result list
    ///
    /// Front ends call this once at startup. A missing or unreadable store
    /// leaves the result list empty.
    ///
    /// # Errors
    /// Same as [`RecipeFinderBuilder::build`].
    pub async fn build_restored(self) -> Result<App, FinderError> {
        let mut app = self.build()?;
        let restored = app.restore().await;
        debug!("Restored {} stored results", restored);
        Ok(app)
    }
}

/// Main entry point for the builder API
pub struct RecipeFinder;

impl RecipeFinder {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let app = RecipeFinder::builder().without_store().build().unwrap();
    /// assert!(app.store().is_none());
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_is_builder_error() {
        let result = RecipeFinder::builder().base_url("ftp://example.com").build();
        assert!(matches!(result, Err(FinderError::Builder(_))));
    }

    #[test]
    fn test_explicit_store_path() {
        let app = RecipeFinder::builder()
            .store_path("/tmp/recipe-finder-test.json")
            .build()
            .unwrap();
        assert_eq!(
            app.store().unwrap().path(),
            PathBuf::from("/tmp/recipe-finder-test.json").as_path()
        );
    }

    #[test]
    fn test_config_store_path_is_used() {
        let mut config = FinderConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/recipes.json"));

        let app = RecipeFinder::builder().config(&config).build().unwrap();
        assert_eq!(
            app.store().unwrap().path(),
            PathBuf::from("/tmp/recipes.json").as_path()
        );
    }

    #[test]
    fn test_disabled_config_ignores_store_path() {
        let mut config = FinderConfig::default();
        config.storage.enabled = false;
        config.storage.path = Some(PathBuf::from("/tmp/recipes.json"));

        let app = RecipeFinder::builder().config(&config).build().unwrap();
        assert!(app.store().is_none());
    }

    #[tokio::test]
    async fn test_build_restored_loads_stored_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_results.json");
        let recipes = vec![crate::Recipe {
            id: "52795".to_string(),
            name: "Chicken Handi".to_string(),
            ..Default::default()
        }];
        ResultStore::new(&path).save(&recipes).await.unwrap();

        let app = RecipeFinder::builder()
            .store_path(&path)
            .build_restored()
            .await
            .unwrap();
        assert_eq!(app.state().results.len(), 1);
        assert_eq!(app.state().results[0].name, "Chicken Handi");
    }

    #[tokio::test]
    async fn test_build_restored_without_store_is_empty() {
        let app = RecipeFinder::builder()
            .without_store()
            .build_restored()
            .await
            .unwrap();
        assert!(app.state().results.is_empty());
    }

    #[test]
    fn test_config_disables_store() {
        let mut config = FinderConfig::default();
        config.storage.enabled = false;
        config.ui.scroll_threshold = 50;

        let mut app = RecipeFinder::builder().config(&config).build().unwrap();
        assert!(app.store().is_none());
        assert!(app.on_scroll(60));
    }
}
