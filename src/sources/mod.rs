mod meal_db;

pub use meal_db::{MealDbSource, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::error::FinderError;
use crate::model::{Ingredient, RecipeSummary};
use crate::parser::RawRecipe;

/// The three remote queries the finder depends on
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "themealdb")
    fn source_name(&self) -> &str;

    /// Fetch the full ingredient catalog
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, FinderError>;

    /// Recipes that use `ingredient`; an empty list when nothing matches
    async fn recipes_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, FinderError>;

    /// Raw detail record for a recipe id, `None` when the id is unknown
    async fn recipe_detail(&self, id: &str) -> Result<Option<RawRecipe>, FinderError>;
}
