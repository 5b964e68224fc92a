//! Shelf CLI - database migrations and test-data seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! shelf migrate
//!
//! # Seed individual tables
//! shelf seed categories --count 5
//! shelf seed products --count 50
//! shelf seed orders --count 200 --backdate-days 60
//!
//! # Seed everything with sensible defaults
//! shelf seed all
//! ```
//!
//! # Environment Variables
//!
//! - `SHELF_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Shelf CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with generated data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,

        /// Seed the random generator for reproducible data
        #[arg(long, global = true)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed categories with random single-word names
    Categories {
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
    /// Seed tags with random single-word names
    Tags {
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Seed products (requires categories)
    Products {
        #[arg(short, long, default_value_t = 50)]
        count: usize,
    },
    /// Seed orders (requires products)
    Orders {
        #[arg(short, long, default_value_t = 200)]
        count: usize,

        /// Spread `created_at` over the last N days
        #[arg(long)]
        backdate_days: Option<u32>,
    },
    /// Seed categories, tags, products and orders
    All,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_cli=info,shelf_admin=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target, seed } => {
            let pool = commands::connect().await?;
            let mut rng = commands::seed::rng(seed);
            match target {
                SeedTarget::Categories { count } => {
                    commands::seed::categories(&pool, &mut rng, count).await?;
                }
                SeedTarget::Tags { count } => {
                    commands::seed::tags(&pool, &mut rng, count).await?;
                }
                SeedTarget::Products { count } => {
                    commands::seed::products(&pool, &mut rng, count).await?;
                }
                SeedTarget::Orders {
                    count,
                    backdate_days,
                } => {
                    commands::seed::orders(&pool, &mut rng, count, backdate_days).await?;
                }
                SeedTarget::All => commands::seed::all(&pool, &mut rng).await?,
            }
        }
    }
    Ok(())
}
