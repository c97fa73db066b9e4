// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Parser, Subcommand};
use std::str::FromStr;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Backend for a wallet-authenticated trading platform."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serves the RPC API over HTTP.
    Serve,

    /// Connects to the configured database and applies pending migrations.
    Migrate,

    /// Prints the procedure catalog as JSON.
    Procedures,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The catalog is static and needs neither settings nor logging.
    if let Commands::Procedures = cli.command {
        println!("{}", serde_json::to_string_pretty(web_server::procedures::PROCEDURES)?);
        return Ok(());
    }

    let settings = app_config::load_settings().context("Failed to load configuration")?;
    init_tracing(&settings);

    tracing::info!(environment = %settings.app.environment, "Starting trading backend");

    match cli.command {
        Commands::Serve => serve(settings).await,
        Commands::Migrate => migrate(settings).await,
        Commands::Procedures => Ok(()),
    }
}

fn init_tracing(settings: &Settings) {
    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN) // Disable sqlx query debug logs
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

async fn serve(settings: Settings) -> Result<()> {
    let db = database::connect(&settings.database).await?;
    tracing::info!("Document store ready.");

    web_server::run(settings.server, db).await?;
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    if settings.database.is_in_memory() {
        tracing::warn!("The in-memory store has no migrations to run.");
        return Ok(());
    }
    // Connecting applies pending migrations.
    database::connect(&settings.database).await?;
    tracing::info!("Database migrations are up-to-date.");
    Ok(())
}
