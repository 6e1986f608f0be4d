use serde::{Deserialize, Serialize};

/// Number of numbered ingredient/measure slots in a raw recipe record
pub const INGREDIENT_SLOTS: usize = 20;

/// A pantry item from the ingredient catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "idIngredient")]
    pub id: String,
    #[serde(rename = "strIngredient")]
    pub name: String,
    #[serde(rename = "strDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "strType", default)]
    pub kind: Option<String>,
}

/// Short recipe entry returned by the filter-by-ingredient endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
}

/// A fully parsed recipe.
///
/// `ingredients[i]` and `measures[i]` always describe the same slot; a missing
/// measure is an empty string. Optional metadata is empty when the source omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub measures: Vec<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub youtube_url: String,
    #[serde(default)]
    pub source_url: String,
}

impl Recipe {
    /// `(measure, ingredient)` pairs in slot order
    pub fn ingredient_lines(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.ingredients
            .iter()
            .zip(self.measures.iter())
            .map(|(ingredient, measure)| (measure.as_str(), ingredient.as_str()))
    }

    /// Case-insensitive substring match against the recipe's own ingredient names
    pub fn contains_ingredient(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// What a single search submission asks for.
///
/// Built by the search form; `ingredients` is never empty and `max_ingredients`
/// is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    ingredients: Vec<String>,
    max_ingredients: Option<usize>,
}

impl SearchCriteria {
    /// Returns `None` when no non-blank ingredient is given or the bound is zero.
    pub fn new<I, S>(ingredients: I, max_ingredients: Option<usize>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if max_ingredients == Some(0) {
            return None;
        }

        let mut unique: Vec<String> = Vec::new();
        for name in ingredients {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let lowered = name.to_lowercase();
            if !unique.iter().any(|seen| seen.to_lowercase() == lowered) {
                unique.push(name.to_string());
            }
        }

        if unique.is_empty() {
            None
        } else {
            Some(Self {
                ingredients: unique,
                max_ingredients,
            })
        }
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn max_ingredients(&self) -> Option<usize> {
        self.max_ingredients
    }

    /// Whether `recipe` contains every selected ingredient and respects the bound
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let within_bound = self
            .max_ingredients
            .map_or(true, |max| recipe.ingredient_count() <= max);

        within_bound
            && self
                .ingredients
                .iter()
                .all(|name| recipe.contains_ingredient(name))
    }
}
