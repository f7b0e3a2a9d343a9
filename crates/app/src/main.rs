use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppConfig, AppServices, JokeService, MealDbClient, MealDbConfig, RecipeError};
use storage::repository::StudentRepository;
use tracing::info;
use ui::{JokesApp, QuizApp, RecipesApp, StudentsApp, UiApp, build_app_context};

#[derive(Parser)]
#[command(name = "toybox", version, about = "Four small desktop apps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ten-question arithmetic quiz
    Quiz {
        /// Pause after a resolved answer before the next problem
        #[arg(long, env = "TOYBOX_FEEDBACK_DELAY_MS", default_value_t = 1500)]
        feedback_delay_ms: u64,
    },

    /// Tells a random joke, punchline on request
    Jokes {
        /// One joke per line, setup and punchline split at the first `?`
        #[arg(long, env = "TOYBOX_JOKES_FILE", default_value = "randomJokes.txt")]
        file: PathBuf,
    },

    /// Student marks table backed by a text file
    Students {
        /// Records file, one `code,name,mark1,...` per line
        #[arg(long, env = "TOYBOX_STUDENTS_FILE", default_value = "studentMarks.txt")]
        file: PathBuf,
    },

    /// Recipe search over TheMealDB
    Recipes {
        /// API root, e.g. `https://www.themealdb.com/api/json/v1/1/`
        #[arg(long, env = "TOYBOX_MEALDB_URL")]
        base_url: Option<String>,

        /// Per-request timeout
        #[arg(long, env = "TOYBOX_MEALDB_TIMEOUT_SECS", default_value_t = 10)]
        timeout_secs: u64,
    },
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn feedback_delay(&self) -> Duration {
        self.services.config().feedback_delay
    }

    fn joke_service(&self) -> JokeService {
        self.services.joke_service()
    }

    fn student_repository(&self) -> Arc<dyn StudentRepository> {
        self.services.student_repository()
    }

    fn recipe_client(&self) -> Result<Arc<MealDbClient>, RecipeError> {
        self.services.recipes()
    }
}

fn config_for(command: &Commands) -> AppConfig {
    let mut config = AppConfig::default();
    match command {
        Commands::Quiz { feedback_delay_ms } => {
            config.feedback_delay = Duration::from_millis(*feedback_delay_ms);
        }
        Commands::Jokes { file } => config.jokes_file = file.clone(),
        Commands::Students { file } => config.students_file = file.clone(),
        Commands::Recipes {
            base_url,
            timeout_secs,
        } => {
            let defaults = MealDbConfig::default();
            config.mealdb = MealDbConfig::new(
                base_url.clone().unwrap_or(defaults.base_url),
                Duration::from_secs(*timeout_secs),
            );
        }
    }
    config
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config_for(&cli.command);

    let (title, root): (&str, fn() -> dioxus::prelude::Element) = match cli.command {
        Commands::Quiz { .. } => ("Math Quiz", QuizApp),
        Commands::Jokes { .. } => ("Alexa Joke Teller", JokesApp),
        Commands::Students { .. } => ("Student Manager", StudentsApp),
        Commands::Recipes { .. } => ("The Meal Application", RecipesApp),
    };

    let services = AppServices::from_config(config);
    // Fail before opening a window if the recipe URL is unusable.
    if matches!(cli.command, Commands::Recipes { .. }) {
        services.recipes().context("invalid recipe service configuration")?;
    }

    info!(app = title, "launching");
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(root);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
