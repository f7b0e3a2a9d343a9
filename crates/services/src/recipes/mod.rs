//! Client for the public TheMealDB recipe API.

mod client;
mod config;
mod wire;

pub use client::MealDbClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, INGREDIENT_LIST_LIMIT, MealDbConfig};
