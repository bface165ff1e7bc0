//! Vitrina CLI - Command-line inventory console.
//!
//! # Usage
//!
//! ```bash
//! # Show stored merchant credentials
//! vitrina credentials show
//!
//! # Save merchant credentials
//! vitrina credentials set --token TOKEN --merchant-id M123
//!
//! # List inventory, first page only
//! vitrina items
//!
//! # Load everything, filter client-side
//! vitrina items --all --category "Diamond Rings" --price 19.99
//!
//! # Create a product with an image
//! vitrina add-product --name "Cuban Link" --category Chains \
//!     --subcategory Solid --price 499.99 --cost 200 --image chain.jpg
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINA_BACKEND_URL` - Base URL of the inventory backend (required)
//! - `VITRINA_USER_ID` - Identity to act as (required for all commands)
//! - `VITRINA_PAGE_SIZE` - Items fetched per page (default: 100)

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks to its user on stdout.
#![allow(clippy::print_stdout)]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Merchant inventory console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage merchant API credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
    /// List inventory items
    Items {
        /// Keep fetching pages until the backend reports end of data
        #[arg(long)]
        all: bool,

        /// Case-insensitive substring match on the SKU
        #[arg(long)]
        sku: Option<String>,

        /// Exact category label, e.g. "Diamond Rings"
        #[arg(long)]
        category: Option<String>,

        /// Exact price in major units, e.g. 19.99
        #[arg(long)]
        price: Option<Decimal>,

        /// Start of the modification-date range (inclusive), YYYY-MM-DD
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// End of the modification-date range (inclusive), YYYY-MM-DD
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Create a new product
    AddProduct {
        /// Product name
        #[arg(long)]
        name: String,

        /// Category (Rings, Chains, Bracelets, Earrings, Necklaces,
        /// Watches, Pendants)
        #[arg(long)]
        category: String,

        /// Subcategory within the category's taxonomy
        #[arg(long)]
        subcategory: String,

        /// Price in major units, e.g. 19.99
        #[arg(long)]
        price: Decimal,

        /// Cost in major units
        #[arg(long)]
        cost: Decimal,

        /// Units on hand (default: 1)
        #[arg(long)]
        stock: Option<i64>,

        /// Path to an image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CredentialsAction {
    /// Show whether credentials are configured
    Show,
    /// Save merchant credentials
    Set {
        /// Merchant API token
        #[arg(long)]
        token: String,

        /// Merchant identifier
        #[arg(long)]
        merchant_id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Credentials { action } => match action {
            CredentialsAction::Show => commands::credentials::show().await?,
            CredentialsAction::Set { token, merchant_id } => {
                commands::credentials::set(&token, &merchant_id).await?;
            }
        },
        Commands::Items {
            all,
            sku,
            category,
            price,
            from,
            to,
        } => {
            let filter = vitrina_client::ItemFilter {
                sku_contains: sku,
                category_label: category,
                price_major: price,
                modified_range: from.zip(to),
            };
            commands::items::list(all, &filter).await?;
        }
        Commands::AddProduct {
            name,
            category,
            subcategory,
            price,
            cost,
            stock,
            image,
        } => {
            commands::add_product::run(
                &name,
                &category,
                &subcategory,
                price,
                cost,
                stock,
                image.as_deref(),
            )
            .await?;
        }
    }
    Ok(())
}
