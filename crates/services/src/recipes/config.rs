use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// The ingredient browse list keeps only this many entries.
pub const INGREDIENT_LIST_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealDbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl MealDbConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}
