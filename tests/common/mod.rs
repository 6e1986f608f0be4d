#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Map, Value};

/// Detail record in the shape of TheMealDB's lookup endpoint
pub fn meal_json(id: &str, name: &str, ingredients: &[(&str, &str)]) -> Value {
    let mut meal = Map::new();
    meal.insert("idMeal".into(), json!(id));
    meal.insert("strMeal".into(), json!(name));
    meal.insert(
        "strMealThumb".into(),
        json!(format!("https://www.themealdb.com/images/media/meals/{id}.jpg")),
    );
    meal.insert("strInstructions".into(), json!("Cook everything together."));
    meal.insert("strTags".into(), Value::Null);
    meal.insert("strCategory".into(), json!("Miscellaneous"));
    for slot in 1..=20 {
        let (ingredient, measure) = match ingredients.get(slot - 1) {
            Some((ingredient, measure)) => (json!(ingredient), json!(measure)),
            None => (json!(""), json!(" ")),
        };
        meal.insert(format!("strIngredient{slot}"), ingredient);
        meal.insert(format!("strMeasure{slot}"), measure);
    }
    Value::Object(meal)
}

pub async fn mock_filter(
    server: &mut ServerGuard,
    ingredient: &str,
    meals: &[(&str, &str)],
) -> Mock {
    let body = if meals.is_empty() {
        json!({ "meals": null })
    } else {
        json!({
            "meals": meals
                .iter()
                .map(|(id, name)| json!({
                    "idMeal": id,
                    "strMeal": name,
                    "strMealThumb": format!("https://www.themealdb.com/images/media/meals/{id}.jpg"),
                }))
                .collect::<Vec<_>>()
        })
    };

    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), ingredient.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_lookup(server: &mut ServerGuard, meal: Value) -> Mock {
    let id = meal["idMeal"].as_str().unwrap_or_default().to_string();
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), id))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "meals": [meal] }).to_string())
        .create_async()
        .await
}

pub async fn mock_catalog(server: &mut ServerGuard, names: &[&str]) -> Mock {
    let meals: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "idIngredient": (i + 1).to_string(),
                "strIngredient": name,
                "strDescription": null,
                "strType": null,
            })
        })
        .collect();

    server
        .mock("GET", "/list.php")
        .match_query(Matcher::UrlEncoded("i".into(), "list".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "meals": meals }).to_string())
        .create_async()
        .await
}

/// A small kitchen: two chicken dishes, one of them salted, and a salted dessert
pub async fn stock_kitchen(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_filter(
            server,
            "chicken",
            &[("52772", "Teriyaki Chicken Casserole"), ("52795", "Chicken Handi")],
        )
        .await,
        mock_filter(
            server,
            "salt",
            &[("52795", "Chicken Handi"), ("52900", "Salted Caramel Tart")],
        )
        .await,
        mock_lookup(
            server,
            meal_json(
                "52772",
                "Teriyaki Chicken Casserole",
                &[("soy sauce", "3/4 cup"), ("chicken thighs", "2 lbs"), ("water", "")],
            ),
        )
        .await,
        mock_lookup(
            server,
            meal_json(
                "52795",
                "Chicken Handi",
                &[
                    ("Chicken", "1.2 kg"),
                    ("Onion", "5 thinly sliced"),
                    ("Salt", "To taste"),
                    ("Ginger", "1 tsp"),
                ],
            ),
        )
        .await,
        mock_lookup(
            server,
            meal_json(
                "52900",
                "Salted Caramel Tart",
                &[("Sugar", "200g"), ("Sea Salt", "1 tsp")],
            ),
        )
        .await,
    ]
}
