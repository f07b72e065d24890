//! Verde CLI - command-line storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! verde products list
//! verde products list --category kitchen --sort price-asc
//! verde products show bamboo-utensil-set
//!
//! # Work with the cart (persisted under $VERDE_DATA_DIR)
//! verde cart
//! verde cart add bamboo-utensil-set -q 2
//! verde cart set bamboo-utensil-set 3
//! verde cart remove bamboo-utensil-set
//! verde cart clear
//!
//! # Run the checkout flow against the simulated order gateway
//! verde checkout --email jane@example.com
//! ```
//!
//! Cart state survives between invocations via the durable cart record, so
//! each command runs against the same cart the previous one left behind.

#![cfg_attr(not(test), forbid(unsafe_code))]
// The CLI is the presentation layer; stdout/stderr are its UI.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verde_storefront::config::StorefrontConfig;
use verde_storefront::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "verde")]
#[command(author, version, about = "Verde storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Show or change the cart (no action shows it)
    Cart {
        #[command(subcommand)]
        action: Option<commands::cart::CartAction>,
    },
    /// Run the checkout flow for the current cart
    Checkout(commands::checkout::CheckoutArgs),
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "verde=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize storefront: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Products { action } => commands::products::run(&state, action),
        Commands::Cart { action } => commands::cart::run(&state, action),
        Commands::Checkout(args) => commands::checkout::run(&state, args).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
