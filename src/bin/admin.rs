//! CLI administration tool for shortener.
//!
//! Creates and resolves short links and performs database operations without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten lucastephens.com/resume.pdf
//!
//! # Show where a short link points
//! cargo run --bin admin -- resolve 3f9a0c1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Reads the same database settings as the server (`DATABASE_URL`,
//! `DBSTRING` or the `DB_*` components).

use shortener::application::services::ShortService;
use shortener::config::Config;
use shortener::error::AppError;
use shortener::infrastructure::persistence::PgShortRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the URL a short link redirects to
    Resolve {
        /// Short token, e.g. `3f9a0c1`
        redirect_path: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL (or DBSTRING, or DB_USER and DB_NAME) must be set");
    }

    let repo = PgShortRepository::connect(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url, yes } => create_short(repo, url, yes).await?,
        Commands::Resolve { redirect_path } => resolve_short(repo, &redirect_path).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

/// Creates a short link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Normalize, derive a token and store the record
/// 4. Display the stored components
async fn create_short(repo: PgShortRepository, url: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Shorten {url}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ShortService::new(Arc::new(repo));

    let record = service
        .create_short(&url)
        .await
        .context("Failed to create short link")?;

    println!();
    println!("{}", "✅ Short link created!".green().bold());
    println!();
    println!("  Token:    {}", record.redirect_path.bright_yellow().bold());
    println!("  Target:   {}", record.raw_url().cyan());
    println!("  Scheme:   {}", record.scheme.bright_black());
    println!("  Host:     {}", record.host.bright_black());
    println!(
        "  Path:     {}",
        record.path.as_deref().unwrap_or("-").bright_black()
    );
    println!(
        "  Query:    {}",
        record.query.as_deref().unwrap_or("-").bright_black()
    );
    println!(
        "  Fragment: {}",
        record.fragment.as_deref().unwrap_or("-").bright_black()
    );
    println!();

    Ok(())
}

/// Prints the canonical URL for a token.
async fn resolve_short(repo: PgShortRepository, redirect_path: &str) -> Result<()> {
    let service = ShortService::new(Arc::new(repo));

    match service.resolve(redirect_path).await {
        Ok(record) => {
            println!(
                "{} {} {}",
                redirect_path.bright_yellow().bold(),
                "→".bright_black(),
                record.raw_url().cyan()
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!(
                "{}",
                format!("⚠️  No short link found for '{redirect_path}'").yellow()
            );
        }
        Err(e) => return Err(e).context("Failed to resolve short link"),
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &PgShortRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping().await.context("Database check failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            repo.migrate().await.context("Migration failed")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
