use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::FinderError;
use crate::model::{Ingredient, RecipeSummary};
use crate::parser::RawRecipe;
use crate::sources::RecipeSource;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Every endpoint wraps its payload in `{"meals": [...] | null}`
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// TheMealDB over HTTP
pub struct MealDbSource {
    client: Client,
    base_url: String,
}

impl MealDbSource {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FinderError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout, None)
    }

    /// No timeout is applied unless one is given.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, FinderError> {
        let mut builder = Client::builder().user_agent(
            user_agent.unwrap_or(concat!("recipe-finder/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(FinderError::Builder(format!(
                "Base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<T>, FinderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} i={}", url, query);

        let envelope: MealsEnvelope<T> = self
            .client
            .get(&url)
            .query(&[("i", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbSource {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, FinderError> {
        self.get_meals("list.php", "list").await
    }

    async fn recipes_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        self.get_meals("filter.php", ingredient).await
    }

    async fn recipe_detail(&self, id: &str) -> Result<Option<RawRecipe>, FinderError> {
        let mut meals: Vec<RawRecipe> = self.get_meals("lookup.php", id).await?;
        if meals.is_empty() {
            Ok(None)
        } else {
            Ok(Some(meals.swap_remove(0)))
        }
    }
}
