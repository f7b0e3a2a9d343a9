use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::JokeRepository;
use toybox_core::model::{Joke, JokeBook};
use tracing::debug;

use crate::error::JokeServiceError;

/// Label shown before the first joke is told.
pub const IDLE_PROMPT: &str = "Alexa Tell Me A Joke!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TellerState {
    #[default]
    Idle,
    Setup(Joke),
    Punchline(Joke),
}

/// Tells random jokes from a fixed book, one reveal at a time.
#[derive(Debug)]
pub struct JokeTeller {
    book: JokeBook,
    state: TellerState,
    rng: StdRng,
}

impl JokeTeller {
    #[must_use]
    pub fn new(book: JokeBook) -> Self {
        Self {
            book,
            state: TellerState::Idle,
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn with_seed(book: JokeBook, seed: u64) -> Self {
        Self {
            book,
            state: TellerState::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn state(&self) -> &TellerState {
        &self.state
    }

    #[must_use]
    pub fn book(&self) -> &JokeBook {
        &self.book
    }

    /// Picks a new random joke and shows its setup.
    pub fn tell(&mut self) -> &Joke {
        let joke = self.book.random(&mut self.rng);
        debug!(setup = joke.setup(), "telling joke");
        self.state = TellerState::Setup(joke.clone());
        joke
    }

    /// Shows the punchline of the current joke. Returns false if there was nothing to reveal.
    pub fn reveal(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            TellerState::Setup(joke) => {
                self.state = TellerState::Punchline(joke);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Whether the punchline button should be enabled.
    #[must_use]
    pub fn can_reveal(&self) -> bool {
        matches!(self.state, TellerState::Setup(_))
    }

    /// Text for the joke label.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.state {
            TellerState::Idle => IDLE_PROMPT.to_string(),
            TellerState::Setup(joke) => joke.setup().to_string(),
            TellerState::Punchline(joke) => match joke.punchline() {
                Some(punchline) => format!("{}\n\n{punchline}", joke.setup()),
                None => joke.setup().to_string(),
            },
        }
    }
}

/// Loads the joke book from storage.
#[derive(Clone)]
pub struct JokeService {
    jokes: Arc<dyn JokeRepository>,
}

impl JokeService {
    #[must_use]
    pub fn new(jokes: Arc<dyn JokeRepository>) -> Self {
        Self { jokes }
    }

    /// # Errors
    ///
    /// Returns `JokeServiceError::Storage` if the source cannot be read, or
    /// `JokeServiceError::Joke` if it holds no jokes.
    pub async fn load_book(&self) -> Result<JokeBook, JokeServiceError> {
        let jokes = self.jokes.load_jokes().await?;
        Ok(JokeBook::new(jokes)?)
    }

    /// # Errors
    ///
    /// Same as `load_book`.
    pub async fn teller(&self) -> Result<JokeTeller, JokeServiceError> {
        Ok(JokeTeller::new(self.load_book().await?))
    }
}
