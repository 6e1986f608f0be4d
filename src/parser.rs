//! Normalizes raw lookup records into [`Recipe`] values.
//!
//! Raw records carry twenty numbered `strIngredientN` / `strMeasureN` pairs,
//! most of them blank or null. Parsing never fails: anything missing or
//! malformed becomes an empty string.

use serde_json::{Map, Value};

use crate::model::{Recipe, INGREDIENT_SLOTS};

/// A recipe detail record exactly as the lookup endpoint returns it
pub type RawRecipe = Map<String, Value>;

/// Build a [`Recipe`] from a raw detail record
pub fn parse(raw: &RawRecipe) -> Recipe {
    let mut ingredients = Vec::new();
    let mut measures = Vec::new();

    for slot in 1..=INGREDIENT_SLOTS {
        let ingredient = field(raw, &format!("strIngredient{slot}")).trim();
        if ingredient.is_empty() {
            continue;
        }
        let measure = field(raw, &format!("strMeasure{slot}")).trim();
        ingredients.push(ingredient.to_string());
        measures.push(measure.to_string());
    }

    Recipe {
        id: owned(raw, "idMeal"),
        name: owned(raw, "strMeal"),
        thumbnail_url: owned(raw, "strMealThumb"),
        instructions: owned(raw, "strInstructions"),
        ingredients,
        measures,
        tags: owned(raw, "strTags"),
        category: owned(raw, "strCategory"),
        area: owned(raw, "strArea"),
        youtube_url: owned(raw, "strYoutube"),
        source_url: owned(raw, "strSource"),
    }
}

// Non-string values count as absent.
fn field<'a>(raw: &'a RawRecipe, key: &str) -> &'a str {
    raw.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn owned(raw: &RawRecipe, key: &str) -> String {
    field(raw, key).to_string()
}
