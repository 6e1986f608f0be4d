pub mod aggregator;
pub mod app;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod parser;
pub mod sources;
pub mod storage;
pub mod view;

use std::sync::Arc;

// Re-export key types for convenience
pub use aggregator::RecipeAggregator;
pub use app::{App, AppState, SearchOutcome, SearchToken};
pub use builder::{RecipeFinder, RecipeFinderBuilder, StoreMode};
pub use catalog::{CatalogState, IngredientCatalog};
pub use config::FinderConfig;
pub use error::FinderError;
pub use form::{FormPhase, SearchForm};
pub use model::{Ingredient, Recipe, RecipeSummary, SearchCriteria};
pub use sources::{MealDbSource, RecipeSource};
pub use storage::ResultStore;

/// Fetch the full ingredient catalog from TheMealDB
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ingredients = recipe_finder::load_ingredients().await?;
/// println!("{} ingredients", ingredients.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_ingredients() -> Result<Vec<Ingredient>, FinderError> {
    let source = MealDbSource::new(None)?;
    source.list_ingredients().await
}

/// Find recipes that use every one of `ingredients`
///
/// `max_ingredients` drops recipes with more ingredients than the bound.
/// Nothing is persisted.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_finder::search_recipes(&["chicken", "garlic"], Some(10)).await?;
/// for recipe in recipes {
///     println!("{}", recipe.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes<S: AsRef<str>>(
    ingredients: &[S],
    max_ingredients: Option<usize>,
) -> Result<Vec<Recipe>, FinderError> {
    let mut form =
        SearchForm::with_selection(ingredients.iter().map(|s| s.as_ref().to_string()), None);
    form.set_max_ingredients(max_ingredients)?;
    let criteria = form.submit()?;
    let source = MealDbSource::new(None)?;
    RecipeAggregator::new(Arc::new(source))
        .search(&criteria)
        .await
}
