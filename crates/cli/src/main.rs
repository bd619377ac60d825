//! MathMarket CLI - a terminal session against the shop.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (with optional filters)
//! mm-cli catalog --category grade-5 --search fractions
//!
//! # Manage the cart
//! mm-cli cart add 7
//! mm-cli cart remove 7
//! mm-cli cart show
//!
//! # Check out (prints the payment URL instead of navigating)
//! mm-cli checkout guest --email student@example.com
//! mm-cli checkout register --email student@example.com --password secret
//!
//! # Account
//! mm-cli login --email student@example.com --password secret
//! mm-cli logout
//! mm-cli purchases
//! ```
//!
//! State between invocations (cart, credentials, pending order) lives in the
//! JSON session file named by `MATHMARKET_SESSION_FILE`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use mathmarket_core::Category;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "MathMarket shop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        /// Only show one category (e.g. `grade-5`, `oge-exam`)
        #[arg(long)]
        category: Option<Category>,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// Print live catalog statistics instead of the product list
        #[arg(long)]
        stats: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the cart
    Checkout {
        #[command(subcommand)]
        flow: CheckoutFlow,
    },
    /// Sign in to an existing account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget stored credentials
    Logout,
    /// List paid purchases of the signed-in account
    Purchases,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product by ID
    Add { id: i64 },
    /// Remove a product by ID
    Remove { id: i64 },
    /// Show the cart with totals
    Show,
}

#[derive(Subcommand)]
enum CheckoutFlow {
    /// Buy as a guest: email only, no account
    Guest {
        /// Email to receive the materials
        #[arg(short, long)]
        email: String,
    },
    /// Create an account, then pay
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Confirm a completed payment: show the pending order and clear the cart
    Complete,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut storefront = commands::open_storefront().await?;

    match cli.command {
        Commands::Catalog {
            category,
            search,
            stats,
        } => {
            if stats {
                commands::catalog::stats(&storefront).await?;
            } else {
                commands::catalog::browse(&mut storefront, category, search.as_deref()).await;
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&mut storefront, id).await,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, id),
            CartAction::Show => commands::cart::show(&storefront),
        },
        Commands::Checkout { flow } => match flow {
            CheckoutFlow::Guest { email } => {
                commands::checkout::guest(&mut storefront, &email).await?;
            }
            CheckoutFlow::Register {
                email,
                password,
                full_name,
            } => {
                commands::checkout::register(&mut storefront, &email, &password, full_name.as_deref())
                    .await?;
            }
            CheckoutFlow::Complete => commands::checkout::complete(&mut storefront),
        },
        Commands::Login { email, password } => {
            commands::account::login(&mut storefront, &email, &password).await?;
        }
        Commands::Logout => commands::account::logout(&mut storefront),
        Commands::Purchases => commands::account::purchases(&storefront).await?,
    }
    Ok(())
}
