use reqwest::Client;
use serde::de::DeserializeOwned;
use toybox_core::model::{
    Area, Category, IngredientName, Meal, MealId, SearchKind, SearchQuery,
};
use tracing::{debug, warn};
use url::Url;

use super::config::{INGREDIENT_LIST_LIMIT, MealDbConfig};
use super::wire::{
    AreasEnvelope, CategoriesEnvelope, IngredientsEnvelope, MealsEnvelope, meals_from_envelope,
};
use crate::error::RecipeError;

/// Thin async client over the recipe API. No retries or caching.
#[derive(Clone, Debug)]
pub struct MealDbClient {
    client: Client,
    base_url: Url,
}

impl MealDbClient {
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidBaseUrl` if the configured URL does not
    /// parse, or `RecipeError::Http` if the HTTP client cannot be built.
    pub fn new(config: &MealDbConfig) -> Result<Self, RecipeError> {
        let mut base_url = Url::parse(config.base_url.trim())
            .map_err(|e| RecipeError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        // Keep the last path segment when joining endpoint names.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches by raw user text.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::EmptyQuery` for blank text, before any request is made.
    pub async fn search_text(&self, kind: SearchKind, text: &str) -> Result<Vec<Meal>, RecipeError> {
        let query = SearchQuery::new(kind, text).map_err(|_| RecipeError::EmptyQuery)?;
        self.search(&query).await
    }

    /// Name searches return full records; the filter searches return
    /// partial ones (id, name, thumbnail).
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Meal>, RecipeError> {
        let (endpoint, key) = match query.kind() {
            SearchKind::Name => ("search.php", "s"),
            SearchKind::Ingredient => ("filter.php", "i"),
            SearchKind::Category => ("filter.php", "c"),
            SearchKind::Area => ("filter.php", "a"),
        };
        let envelope: MealsEnvelope = self.get(endpoint, &[(key, query.text())]).await?;
        let meals = meals_from_envelope(envelope)?;
        debug!(kind = query.kind().as_str(), text = query.text(), count = meals.len(), "search finished");
        Ok(meals)
    }

    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn lookup(&self, id: &MealId) -> Result<Option<Meal>, RecipeError> {
        let envelope: MealsEnvelope = self.get("lookup.php", &[("i", id.as_str())]).await?;
        Ok(meals_from_envelope(envelope)?.into_iter().next())
    }

    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn random(&self) -> Result<Option<Meal>, RecipeError> {
        let envelope: MealsEnvelope = self.get("random.php", &[]).await?;
        Ok(meals_from_envelope(envelope)?.into_iter().next())
    }

    /// Full record for `meal`, looking it up when only the summary is known.
    ///
    /// Falls back to the partial record if the lookup fails or finds nothing.
    pub async fn details(&self, meal: &Meal) -> Meal {
        if meal.is_complete() {
            return meal.clone();
        }
        match self.lookup(&meal.id).await {
            Ok(Some(full)) => full,
            Ok(None) => {
                warn!(id = %meal.id, "lookup found nothing, showing partial record");
                meal.clone()
            }
            Err(err) => {
                warn!(id = %meal.id, error = %err, "lookup failed, showing partial record");
                meal.clone()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn categories(&self) -> Result<Vec<Category>, RecipeError> {
        let envelope: CategoriesEnvelope = self.get("categories.php", &[]).await?;
        Ok(envelope
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(Category::from)
            .collect())
    }

    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn areas(&self) -> Result<Vec<Area>, RecipeError> {
        let envelope: AreasEnvelope = self.get("list.php", &[("a", "list")]).await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(Area::from)
            .collect())
    }

    /// The first `INGREDIENT_LIST_LIMIT` ingredients.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` for transport, status or decode failures.
    pub async fn ingredients(&self) -> Result<Vec<IngredientName>, RecipeError> {
        let envelope: IngredientsEnvelope = self.get("list.php", &[("i", "list")]).await?;
        Ok(envelope
            .meals
            .unwrap_or_default()
            .into_iter()
            .take(INGREDIENT_LIST_LIMIT)
            .map(IngredientName::from)
            .collect())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, RecipeError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| RecipeError::InvalidBaseUrl(e.to_string()))?;
        debug!(%url, ?params, "recipe request");

        let response = self.client.get(url).query(params).send().await?;
        if !response.status().is_success() {
            return Err(RecipeError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> MealDbClient {
        let config = MealDbConfig::new(format!("{}/api/json/v1/1", server.uri()), Duration::from_secs(2));
        MealDbClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn search_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/search.php"))
            .and(query_param("s", "Arrabiata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "meals": [{
                    "idMeal": "52771",
                    "strMeal": "Spicy Arrabiata Penne",
                    "strCategory": "Vegetarian",
                    "strArea": "Italian",
                    "strInstructions": "Bring a large pot of water to a boil.",
                    "strIngredient1": "penne rigate",
                    "strMeasure1": "1 pound"
                }]
            })))
            .mount(&server)
            .await;

        let meals = client(&server)
            .search_text(SearchKind::Name, " Arrabiata ")
            .await
            .unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Spicy Arrabiata Penne");
        assert_eq!(meals[0].ingredients[0].measure, "1 pound");
    }

    #[tokio::test]
    async fn null_meals_is_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/filter.php"))
            .and(query_param("a", "Atlantis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "meals": null })))
            .mount(&server)
            .await;

        let meals = client(&server)
            .search_text(SearchKind::Area, "Atlantis")
            .await
            .unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn blank_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .search_text(SearchKind::Name, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::EmptyQuery));
        assert_eq!(err.to_string(), "Please enter something to search!");
    }

    #[tokio::test]
    async fn server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/random.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).random().await.unwrap_err();
        assert!(matches!(err, RecipeError::HttpStatus(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/categories.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).categories().await.unwrap_err();
        assert!(matches!(err, RecipeError::Decode(_)));
    }

    #[tokio::test]
    async fn details_looks_up_partial_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/lookup.php"))
            .and(query_param("i", "52772"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "meals": [{
                    "idMeal": "52772",
                    "strMeal": "Teriyaki Chicken Casserole",
                    "strInstructions": "Preheat oven."
                }]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let partial = Meal::summary(MealId::new("52772"), "Teriyaki Chicken Casserole", None);
        let full = client.details(&partial).await;
        assert_eq!(full.instructions.as_deref(), Some("Preheat oven."));

        let unknown = Meal::summary(MealId::new("0"), "Ghost", None);
        assert_eq!(client.details(&unknown).await, unknown);
    }

    #[tokio::test]
    async fn ingredient_list_is_capped() {
        let server = MockServer::start().await;
        let items: Vec<_> = (0..150)
            .map(|n| serde_json::json!({ "idIngredient": n.to_string(), "strIngredient": format!("Item {n}") }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/list.php"))
            .and(query_param("i", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "meals": items })))
            .mount(&server)
            .await;

        let ingredients = client(&server).ingredients().await.unwrap();
        assert_eq!(ingredients.len(), INGREDIENT_LIST_LIMIT);
        assert_eq!(ingredients[0].name, "Item 0");
    }

    #[tokio::test]
    async fn browse_lists_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/categories.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "categories": [{
                    "idCategory": "1",
                    "strCategory": "Beef",
                    "strCategoryThumb": "https://www.themealdb.com/images/category/beef.png",
                    "strCategoryDescription": "Beef is the culinary name for meat from cattle."
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/json/v1/1/list.php"))
            .and(query_param("a", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "meals": [{ "strArea": "Canadian" }, { "strArea": "Irish" }]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let categories = client.categories().await.unwrap();
        assert_eq!(categories[0].name, "Beef");
        assert!(categories[0].thumbnail.is_some());

        let areas: Vec<_> = client.areas().await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(areas, ["Canadian", "Irish"]);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = MealDbConfig::new("not a url", Duration::from_secs(1));
        assert!(matches!(
            MealDbClient::new(&config),
            Err(RecipeError::InvalidBaseUrl(_))
        ));
    }
}
