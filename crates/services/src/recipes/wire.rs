//! JSON shapes returned by the API and their conversion into domain types.
//!
//! Meal objects carry numbered `strIngredientN` / `strMeasureN` keys, so they
//! are read as loose maps rather than fixed structs.

use serde::Deserialize;
use serde_json::{Map, Value};
use toybox_core::model::{Area, Category, Ingredient, IngredientName, Meal, MealId};
use url::Url;

use crate::error::RecipeError;

const INGREDIENT_SLOTS: usize = 20;

/// `{"meals": [...] | null}`; `null` means no results.
#[derive(Debug, Deserialize)]
pub(super) struct MealsEnvelope {
    pub meals: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoriesEnvelope {
    pub categories: Option<Vec<CategoryWire>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryWire {
    #[serde(rename = "strCategory")]
    name: String,
    #[serde(rename = "strCategoryThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    description: Option<String>,
}

impl From<CategoryWire> for Category {
    fn from(wire: CategoryWire) -> Self {
        Category {
            name: wire.name,
            description: wire.description.filter(|d| !d.trim().is_empty()),
            thumbnail: wire.thumbnail.as_deref().and_then(parse_url),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AreasEnvelope {
    pub meals: Option<Vec<AreaWire>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AreaWire {
    #[serde(rename = "strArea")]
    name: String,
}

impl From<AreaWire> for Area {
    fn from(wire: AreaWire) -> Self {
        Area { name: wire.name }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct IngredientsEnvelope {
    pub meals: Option<Vec<IngredientWire>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IngredientWire {
    #[serde(rename = "strIngredient")]
    name: String,
}

impl From<IngredientWire> for IngredientName {
    fn from(wire: IngredientWire) -> Self {
        IngredientName { name: wire.name }
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw).ok()
}

/// Converts one meal object. `idMeal` and `strMeal` are required.
pub(super) fn meal_from_fields(fields: &Map<String, Value>) -> Result<Meal, RecipeError> {
    let id = text_field(fields, "idMeal")
        .ok_or_else(|| RecipeError::Decode("meal without idMeal".into()))?;
    let name = text_field(fields, "strMeal")
        .ok_or_else(|| RecipeError::Decode(format!("meal {id} without strMeal")))?;

    let ingredients = (1..=INGREDIENT_SLOTS)
        .filter_map(|n| {
            let name = text_field(fields, &format!("strIngredient{n}"))?;
            let measure = text_field(fields, &format!("strMeasure{n}")).unwrap_or_default();
            Some(Ingredient { name, measure })
        })
        .collect();

    let tags = text_field(fields, "strTags")
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    // Filter endpoints omit `strInstructions` entirely; that marks a partial record.
    let instructions = fields
        .get("strInstructions")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string());

    Ok(Meal {
        id: MealId::new(id),
        name,
        category: text_field(fields, "strCategory"),
        area: text_field(fields, "strArea"),
        tags,
        ingredients,
        instructions,
        source: text_field(fields, "strSource").as_deref().and_then(parse_url),
        thumbnail: text_field(fields, "strMealThumb").as_deref().and_then(parse_url),
    })
}

pub(super) fn meals_from_envelope(envelope: MealsEnvelope) -> Result<Vec<Meal>, RecipeError> {
    envelope
        .meals
        .unwrap_or_default()
        .iter()
        .map(meal_from_fields)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn full_meal_collects_ingredients_and_tags() {
        let meal = meal_from_fields(&fields(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strTags": "Meat, Casserole",
            "strInstructions": "Preheat oven to 350F.",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "",
            "strMeasure2": "",
            "strIngredient3": "water",
            "strMeasure3": null,
            "strIngredient20": "brown sugar",
            "strMeasure20": "1/2 cup"
        })))
        .unwrap();

        assert_eq!(meal.id.as_str(), "52772");
        assert_eq!(meal.tags, ["Meat", "Casserole"]);
        let names: Vec<_> = meal.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["soy sauce", "water", "brown sugar"]);
        assert_eq!(meal.ingredients[1].measure, "");
        assert!(meal.is_complete());
        assert!(meal.source.is_none());
        assert!(meal.thumbnail.is_some());
    }

    #[test]
    fn filter_result_is_partial() {
        let meal = meal_from_fields(&fields(json!({
            "idMeal": "1",
            "strMeal": "Pie",
            "strMealThumb": "not a url"
        })))
        .unwrap();
        assert!(!meal.is_complete());
        assert!(meal.thumbnail.is_none());
    }

    #[test]
    fn missing_name_is_a_decode_error() {
        let err = meal_from_fields(&fields(json!({ "idMeal": "1" }))).unwrap_err();
        assert!(matches!(err, RecipeError::Decode(_)));
    }

    #[test]
    fn null_meals_is_empty() {
        let envelope: MealsEnvelope = serde_json::from_value(json!({ "meals": null })).unwrap();
        assert!(meals_from_envelope(envelope).unwrap().is_empty());
    }
}
