use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JokeError {
    #[error("no jokes loaded")]
    Empty,
}

/// A one-line joke, split into setup and punchline at the first `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    setup: String,
    punchline: Option<String>,
}

impl Joke {
    /// Parses a joke line. Returns `None` for blank lines.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let joke = match line.split_once('?') {
            Some((setup, rest)) => {
                let punchline = rest.trim();
                Self {
                    setup: format!("{setup}?"),
                    punchline: (!punchline.is_empty()).then(|| punchline.to_string()),
                }
            }
            None => Self {
                setup: line.to_string(),
                punchline: None,
            },
        };
        Some(joke)
    }

    #[must_use]
    pub fn setup(&self) -> &str {
        &self.setup
    }

    #[must_use]
    pub fn punchline(&self) -> Option<&str> {
        self.punchline.as_deref()
    }
}

/// Immutable collection of jokes, loaded once and shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeBook {
    jokes: Arc<[Joke]>,
}

impl JokeBook {
    /// # Errors
    ///
    /// Returns `JokeError::Empty` if there are no jokes.
    pub fn new(jokes: Vec<Joke>) -> Result<Self, JokeError> {
        if jokes.is_empty() {
            return Err(JokeError::Empty);
        }
        Ok(Self {
            jokes: jokes.into(),
        })
    }

    /// Builds a book from raw text, one joke per line.
    ///
    /// # Errors
    ///
    /// Returns `JokeError::Empty` if no non-blank lines are present.
    pub fn from_lines(text: &str) -> Result<Self, JokeError> {
        Self::new(text.lines().filter_map(Joke::parse).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    #[must_use]
    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    /// Picks a joke uniformly at random.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> &Joke {
        // Non-empty by construction.
        self.jokes.choose(rng).unwrap_or(&self.jokes[0])
    }
}
