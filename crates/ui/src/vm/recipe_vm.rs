use toybox_core::model::{Meal, SearchKind};

/// Fixed status bar texts.
pub struct RecipeStatus;

impl RecipeStatus {
    pub const READY: &'static str = "Ready";
    pub const SEARCHING: &'static str = "Searching...";
    pub const NO_RESULTS: &'static str = "No results found";
    pub const ERROR: &'static str = "Error occurred";
    pub const RANDOM_LOADING: &'static str = "Getting random meal...";
    pub const RANDOM_LOADED: &'static str = "Random meal loaded!";
    pub const CLEARED: &'static str = "Cleared";

    #[must_use]
    pub fn found(count: usize) -> String {
        format!("Found {count} results")
    }
}

/// Status line for a finished search.
#[must_use]
pub fn map_recipe_results(meals: &[Meal]) -> String {
    if meals.is_empty() {
        RecipeStatus::NO_RESULTS.to_string()
    } else {
        RecipeStatus::found(meals.len())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeDetailVm {
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
}

impl From<&Meal> for RecipeDetailVm {
    fn from(meal: &Meal) -> Self {
        let text = meal.detail_text();
        // The title is rendered separately; drop it from the body.
        let body = text
            .strip_prefix(meal.name.as_str())
            .map_or(text.as_str(), str::trim_start)
            .to_string();
        Self {
            title: meal.name.clone(),
            text: body,
            image_url: meal.thumbnail.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseKind {
    Categories,
    Areas,
    Ingredients,
}

impl BrowseKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            BrowseKind::Categories => "Categories",
            BrowseKind::Areas => "Areas",
            BrowseKind::Ingredients => "Ingredients",
        }
    }

    /// e.g. `"Select Category:"`.
    #[must_use]
    pub fn prompt(self) -> String {
        let title = self.title();
        format!("Select {}:", &title[..title.len() - 1])
    }

    /// The search run when an entry is picked.
    #[must_use]
    pub fn search_kind(self) -> SearchKind {
        match self {
            BrowseKind::Categories => SearchKind::Category,
            BrowseKind::Areas => SearchKind::Area,
            BrowseKind::Ingredients => SearchKind::Ingredient,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseVm {
    pub kind: BrowseKind,
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use toybox_core::model::MealId;

    #[test]
    fn status_reflects_result_count() {
        assert_eq!(map_recipe_results(&[]), "No results found");
        let meals = vec![Meal::summary(MealId::new("1"), "Pie", None)];
        assert_eq!(map_recipe_results(&meals), "Found 1 results");
    }

    #[test]
    fn detail_splits_title_from_body() {
        let meal = Meal::summary(MealId::new("1"), "Pie", None);
        let vm = RecipeDetailVm::from(&meal);
        assert_eq!(vm.title, "Pie");
        assert!(vm.text.starts_with("Category: N/A"));
        assert!(vm.image_url.is_none());
    }

    #[test]
    fn browse_prompt_is_singular() {
        assert_eq!(BrowseKind::Categories.prompt(), "Select Category:");
        assert_eq!(BrowseKind::Areas.search_kind(), SearchKind::Area);
    }
}
