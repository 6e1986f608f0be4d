//! Ingredient-based recipe search.
//!
//! A search fans out one filter request per selected ingredient, then one
//! detail request per distinct recipe id, and keeps only recipes that use
//! every selected ingredient. Both fan-outs are all-or-nothing: one failed
//! request fails the whole search and no partial list is returned.
//!
//! Duplicates are resolved deterministically: the first occurrence in
//! selection order wins, and results come back in that same order.

use futures::future::try_join_all;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::FinderError;
use crate::model::{Recipe, RecipeSummary, SearchCriteria};
use crate::parser;
use crate::sources::RecipeSource;

pub struct RecipeAggregator {
    source: Arc<dyn RecipeSource>,
}

impl RecipeAggregator {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self { source }
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Recipe>, FinderError> {
        let names = criteria.ingredients();
        debug!(
            "Searching {} for {} ingredient(s), max ingredients {:?}",
            self.source.source_name(),
            names.len(),
            criteria.max_ingredients()
        );

        let per_ingredient = try_join_all(
            names
                .iter()
                .map(|name| self.source.recipes_with_ingredient(name)),
        )
        .await
        .map_err(FinderError::search)?;

        for (name, summaries) in names.iter().zip(&per_ingredient) {
            if summaries.is_empty() {
                debug!("No recipes use '{}'", name);
            }
        }

        let ids = distinct_ids(per_ingredient);
        debug!("Fetching detail for {} candidate recipe(s)", ids.len());

        let details = try_join_all(ids.iter().map(|id| self.source.recipe_detail(id)))
            .await
            .map_err(FinderError::search)?;

        let parsed = ids
            .iter()
            .zip(details)
            .filter_map(|(id, raw)| match raw {
                Some(raw) => Some(parser::parse(&raw)),
                None => {
                    warn!("Recipe {} disappeared between filter and lookup", id);
                    None
                }
            })
            .collect();

        let recipes: Vec<Recipe> = dedup_by_id(parsed)
            .into_iter()
            .filter(|recipe| criteria.matches(recipe))
            .collect();

        debug!("{} recipe(s) matched", recipes.len());
        Ok(recipes)
    }
}

/// Recipe ids across all ingredient branches, first occurrence first
fn distinct_ids(per_ingredient: Vec<Vec<RecipeSummary>>) -> Vec<String> {
    let mut seen = HashSet::new();
    per_ingredient
        .into_iter()
        .flatten()
        .filter_map(|summary| {
            if seen.insert(summary.id.clone()) {
                Some(summary.id)
            } else {
                None
            }
        })
        .collect()
}

fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id.clone()))
        .collect()
}
