//! Schema migration runner
//!
//! Run with: cargo run --bin migration -- up

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use stockroom_api::{config, db, migrator::Migrator};

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Apply or roll back the stockroom schema")]
struct Cli {
    /// Database URL; falls back to the loaded application config
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations
    Up {
        /// Apply at most this many
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let database_url = match cli.database_url {
        Some(url) => url,
        None => config::load_config()
            .context("loading configuration")?
            .database_url,
    };

    info!("Connecting to database");
    let pool = db::establish_connection(&database_url)
        .await
        .context("connecting to database")?;

    match cli.command {
        Command::Up { steps } => {
            Migrator::up(&pool, steps).await?;
            info!("Migrations applied");
        }
        Command::Down { steps } => {
            Migrator::down(&pool, Some(steps)).await?;
            info!(steps, "Migrations rolled back");
        }
        Command::Status => Migrator::status(&pool).await?,
        Command::Fresh => {
            Migrator::fresh(&pool).await?;
            info!("Schema recreated");
        }
    }

    db::close_pool(pool).await?;
    Ok(())
}
