use log::{error, info};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::FinderError;
use crate::model::Ingredient;
use crate::sources::RecipeSource;

/// What the search form can show while the catalog is being fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Failed(String),
    Ready(Vec<String>),
}

/// Loads the ingredient catalog once per session.
///
/// A successful load is cached; a failed one is not, and is never retried
/// automatically.
pub struct IngredientCatalog {
    source: Arc<dyn RecipeSource>,
    ingredients: OnceCell<Vec<Ingredient>>,
}

impl IngredientCatalog {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            ingredients: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<&[Ingredient], FinderError> {
        let ingredients = self
            .ingredients
            .get_or_try_init(|| async {
                info!("Loading ingredient catalog from {}", self.source.source_name());
                match self.source.list_ingredients().await {
                    Ok(ingredients) => {
                        info!("Loaded {} ingredients", ingredients.len());
                        Ok(ingredients)
                    }
                    Err(e) => {
                        error!("Failed to load ingredient catalog: {}", e);
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(ingredients.as_slice())
    }

    /// Ingredient names in catalog order, as offered by the search form
    pub async fn names(&self) -> Result<Vec<String>, FinderError> {
        Ok(self
            .load()
            .await?
            .iter()
            .map(|ingredient| ingredient.name.clone())
            .collect())
    }

    pub fn is_loaded(&self) -> bool {
        self.ingredients.initialized()
    }
}

/// Case-insensitive substring filter over catalog names
pub fn filter_names<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    names
        .iter()
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .map(String::as_str)
        .collect()
}
