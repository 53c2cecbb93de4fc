//! Survey Studio
//!
//! Command-line client for authoring surveys and answering them.
//!
//! # Usage
//!
//! ```bash
//! survey-studio login --email author@example.com
//! survey-studio create
//! survey-studio list --format json
//! survey-studio send 42
//! survey-studio results 42
//! survey-studio respond 3f9c2a
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod credentials;
mod output;

#[derive(Parser)]
#[command(name = "survey-studio")]
#[command(version)]
#[command(about = "Author surveys and collect responses", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "SURVEY_STUDIO_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a survey author
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    #[command(flatten)]
    Surveys(SurveyCommands),
    /// Answer a survey from its link token
    Respond { token: String },
}

#[derive(Subcommand)]
pub(crate) enum SurveyCommands {
    /// List your surveys
    List,
    /// Show a survey with its questions and participants
    Show { id: String },
    /// Create a survey in the editor
    Create,
    /// Edit a draft survey
    Edit { id: String },
    /// Delete a survey
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Copy a survey into a new draft
    Copy { id: String },
    /// Send a draft survey to its participants
    Send {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show aggregated results
    Results { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = config::Config::load(cli.profile.as_deref())?;
    let mut ctx = commands::Context {
        api_url: cli
            .api_url
            .or(cfg.api_url)
            .unwrap_or_else(|| config::DEFAULT_API_URL.to_string()),
        format: cli.format.or(cfg.default_format).unwrap_or_default(),
        credentials: credentials::TokenFile::default_location()?,
    };
    tracing::debug!(api_url = %ctx.api_url, "starting");

    match cli.command {
        Commands::Login { email } => commands::auth::login(&mut ctx, email).await,
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Surveys(action) => commands::surveys::handle(action, &mut ctx).await,
        Commands::Respond { token } => commands::respond::handle(token, &ctx).await,
    }
}
