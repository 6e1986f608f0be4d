//! Application state and the controller that owns it.
//!
//! All state the front end renders lives in one [`AppState`], and it only
//! changes through the actions on [`App`]: loading the catalog, searching,
//! and opening, stepping through or closing the detail modal.
//!
//! Searches are tagged with a [`SearchToken`]. Only the result carrying the
//! most recent token is applied; anything older is dropped, so a slow search
//! can never overwrite the results of a newer one.

use log::{debug, error, warn};
use std::sync::Arc;

use crate::aggregator::RecipeAggregator;
use crate::catalog::{CatalogState, IngredientCatalog};
use crate::error::FinderError;
use crate::form::SearchForm;
use crate::model::{Recipe, SearchCriteria};
use crate::sources::RecipeSource;
use crate::storage::ResultStore;
use crate::view::{ModalState, NavKey, ScrollToTop};

/// Alert shown when a search fails; the underlying error is only logged
pub const SEARCH_FAILED_ALERT: &str =
    "Something went wrong while searching for recipes. Please try again.";

/// Identifies one search submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

/// What happened to a finished search
#[derive(Debug)]
pub enum SearchOutcome {
    /// Results replaced the current list
    Applied(usize),
    /// The search failed and the alert is set; the previous list is kept
    Failed(FinderError),
    /// A newer search was started in the meantime; nothing changed
    Stale,
}

#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogState,
    pub form: SearchForm,
    pub results: Vec<Recipe>,
    pub modal: ModalState,
    pub scroll: ScrollToTop,
    pub alert: Option<String>,
    pub searching: bool,
    latest_token: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: CatalogState::Loading,
            form: SearchForm::new(),
            results: Vec::new(),
            modal: ModalState::default(),
            scroll: ScrollToTop::default(),
            alert: None,
            searching: false,
            latest_token: 0,
        }
    }
}

impl AppState {
    /// The recipe shown in the detail modal
    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.modal.current().and_then(|index| self.results.get(index))
    }
}

pub struct App {
    catalog: IngredientCatalog,
    aggregator: Arc<RecipeAggregator>,
    store: Option<ResultStore>,
    state: AppState,
}

impl App {
    pub fn new(source: Arc<dyn RecipeSource>, store: Option<ResultStore>) -> Self {
        Self {
            catalog: IngredientCatalog::new(source.clone()),
            aggregator: Arc::new(RecipeAggregator::new(source)),
            store,
            state: AppState::default(),
        }
    }

    pub fn with_scroll_threshold(mut self, threshold: u32) -> Self {
        self.state.scroll = ScrollToTop::new(threshold);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.state.form
    }

    pub fn store(&self) -> Option<&ResultStore> {
        self.store.as_ref()
    }

    /// Shared handle for running a search outside the controller
    pub fn aggregator(&self) -> Arc<RecipeAggregator> {
        self.aggregator.clone()
    }

    /// Bring back the results of the last successful search, if any were stored
    pub async fn restore(&mut self) -> usize {
        let Some(store) = &self.store else {
            return 0;
        };
        match store.load().await {
            Ok(recipes) => {
                self.state.results = recipes;
                self.state.modal.close();
                self.state.results.len()
            }
            Err(e) => {
                warn!(
                    "Could not restore stored results from {}: {}",
                    store.path().display(),
                    e
                );
                0
            }
        }
    }

    /// Load the ingredient catalog; the form is blocked until this succeeds
    pub async fn load_catalog(&mut self) -> Result<Vec<String>, FinderError> {
        if !self.catalog.is_loaded() {
            self.state.catalog = CatalogState::Loading;
        }
        match self.catalog.names().await {
            Ok(names) => {
                self.state.catalog = CatalogState::Ready(names.clone());
                Ok(names)
            }
            Err(e) => {
                self.state.catalog = CatalogState::Failed("Error loading ingredients".to_string());
                Err(e)
            }
        }
    }

    /// Validate the form and hand out a token for the new search.
    ///
    /// Validation failures never reach the network, and neither does anything
    /// submitted while the catalog is in its failed state.
    pub fn begin_search(&mut self) -> Result<(SearchToken, SearchCriteria), FinderError> {
        if let CatalogState::Failed(message) = &self.state.catalog {
            return Err(FinderError::Validation(message.clone()));
        }
        let criteria = self.state.form.submit()?;
        self.state.latest_token += 1;
        self.state.alert = None;
        self.state.searching = true;
        Ok((SearchToken(self.state.latest_token), criteria))
    }

    /// Apply a finished search if it is still the latest one
    pub async fn complete_search(
        &mut self,
        token: SearchToken,
        result: Result<Vec<Recipe>, FinderError>,
    ) -> SearchOutcome {
        if token.0 != self.state.latest_token {
            debug!(
                "Discarding results of search {} (latest is {})",
                token.0, self.state.latest_token
            );
            return SearchOutcome::Stale;
        }
        self.state.searching = false;

        match result {
            Ok(recipes) => {
                self.state.form.finish();
                self.state.modal.close();
                self.state.results = recipes;
                self.persist().await;
                SearchOutcome::Applied(self.state.results.len())
            }
            Err(e) => {
                error!("Error fetching recipes: {}", e);
                self.state.form.abort();
                self.state.alert = Some(SEARCH_FAILED_ALERT.to_string());
                SearchOutcome::Failed(e)
            }
        }
    }

    /// Validate, search and apply in one step
    pub async fn search(&mut self) -> Result<&[Recipe], FinderError> {
        let (token, criteria) = self.begin_search()?;
        let result = self.aggregator.search(&criteria).await;
        match self.complete_search(token, result).await {
            SearchOutcome::Failed(e) => Err(e),
            SearchOutcome::Applied(_) | SearchOutcome::Stale => Ok(self.state.results.as_slice()),
        }
    }

    pub fn open_detail(&mut self, index: usize) {
        self.state.modal.open(index, self.state.results.len());
    }

    pub fn close_detail(&mut self) {
        self.state.modal.close();
    }

    pub fn next(&mut self) {
        self.state.modal.next(self.state.results.len());
    }

    pub fn previous(&mut self) {
        self.state.modal.previous();
    }

    pub fn handle_key(&mut self, key: NavKey) {
        self.state.modal.handle_key(key, self.state.results.len());
    }

    /// Returns whether "scroll to top" should be shown
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        self.state.scroll.on_scroll(offset)
    }

    async fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.state.results).await {
                warn!("Could not store results in {}: {}", store.path().display(), e);
            }
        }
    }
}
