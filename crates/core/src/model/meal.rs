use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MealError {
    #[error("Please enter something to search!")]
    EmptyQuery,

    #[error("unknown search kind: {0}")]
    UnknownSearchKind(String),
}

//
// ─── IDS & SEARCH ─────────────────────────────────────────────────────────────
//

/// Identifier assigned by the recipe database (`idMeal`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealId(String);

impl MealId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    Name,
    Ingredient,
    Category,
    Area,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [Self::Name, Self::Ingredient, Self::Category, Self::Area];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Name => "name",
            SearchKind::Ingredient => "ingredient",
            SearchKind::Category => "category",
            SearchKind::Area => "area",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Name => "Name",
            SearchKind::Ingredient => "Ingredient",
            SearchKind::Category => "Category",
            SearchKind::Area => "Area",
        }
    }
}

impl FromStr for SearchKind {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MealError::UnknownSearchKind(s.to_string()))
    }
}

/// A validated, non-blank search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    kind: SearchKind,
    text: String,
}

impl SearchQuery {
    /// # Errors
    ///
    /// Returns `MealError::EmptyQuery` if `text` is blank.
    pub fn new(kind: SearchKind, text: &str) -> Result<Self, MealError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MealError::EmptyQuery);
        }
        Ok(Self {
            kind,
            text: text.to_string(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── MEALS ────────────────────────────────────────────────────────────────────
//

/// One ingredient line, e.g. measure `"2 cups"` of `"Flour"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

/// A meal as returned by search or lookup.
///
/// Filter endpoints only return id, name and thumbnail; `instructions` is
/// `None` until the full record has been looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
    pub source: Option<Url>,
    pub thumbnail: Option<Url>,
}

impl Meal {
    /// Partial record with only the fields every endpoint returns.
    #[must_use]
    pub fn summary(id: MealId, name: impl Into<String>, thumbnail: Option<Url>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            area: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
            instructions: None,
            source: None,
            thumbnail,
        }
    }

    /// True once the full record (with instructions) is available.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.instructions.is_some()
    }

    /// Plain-text detail block for the details pane.
    #[must_use]
    pub fn detail_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", self.name);
        let _ = writeln!(
            out,
            "Category: {}",
            self.category.as_deref().unwrap_or("N/A")
        );
        let _ = writeln!(out, "Area: {}", self.area.as_deref().unwrap_or("N/A"));
        if !self.tags.is_empty() {
            let _ = writeln!(out, "Tags: {}", self.tags.join(","));
        }
        out.push('\n');

        out.push_str("Ingredients:\n");
        for ingredient in &self.ingredients {
            let line = format!("{} {}", ingredient.measure, ingredient.name);
            let _ = writeln!(out, "  • {}", line.trim());
        }

        if let Some(instructions) = self.instructions.as_deref() {
            let _ = write!(out, "\nInstructions:\n{instructions}\n\n");
        }
        if let Some(source) = self.source.as_ref() {
            let _ = writeln!(out, "Source: {source}");
        }
        out
    }
}

//
// ─── BROWSE LISTS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientName {
    pub name: String,
}
