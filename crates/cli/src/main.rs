//! Store decision CLI - offline decisions and database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Decide for a CEP as of now
//! sd-cli decide --cep 30140-000
//!
//! # Decide at a given instant with a local zone table
//! sd-cli decide --cep 30140-000 --at 2026-10-20T19:00:00-03:00 --zone-table zones.json
//!
//! # Pickup order scheduled for a later day
//! sd-cli decide --cep 30140-000 --shipping-method pickup \
//!     --pickup-store "Unidade Sion" --date 2026-10-22
//!
//! # Run database migrations
//! sd-cli migrate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Store decision CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a store decision offline and print it as JSON
    Decide {
        /// Customer CEP (digits, punctuation ignored)
        #[arg(long)]
        cep: String,

        /// `pickup` or `delivery`
        #[arg(short, long, default_value = "delivery")]
        shipping_method: String,

        /// Pickup store name, for pickup orders
        #[arg(short, long)]
        pickup_store: Option<String>,

        /// Scheduled delivery or pickup date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        date: Option<String>,

        /// Decide as of this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,

        /// JSON postcode zone table; every delivery resolves to Central without one
        #[arg(short, long)]
        zone_table: Option<PathBuf>,
    },
    /// Run database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Decide {
            cep,
            shipping_method,
            pickup_store,
            date,
            at,
            zone_table,
        } => {
            let args = commands::decide::DecideArgs {
                cep,
                shipping_method,
                pickup_store,
                date,
                at,
                zone_table,
            };
            commands::decide::run(&args).await?;
        }
        Commands::Migrate => commands::migrate::run().await?,
    }
    Ok(())
}
