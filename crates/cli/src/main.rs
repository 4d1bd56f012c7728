//! Shopfront CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront products
//! shopfront products --limit 3
//! shopfront products --category electronics
//! shopfront categories
//! shopfront product 7
//!
//! # Manage the cart (persisted under SHOPFRONT_DATA_DIR)
//! shopfront cart add 7
//! shopfront cart remove 7
//! shopfront cart count
//! shopfront cart show
//! ```
//!
//! # Commands
//!
//! - `products` - List products, optionally limited or filtered by category
//! - `product` - Show one product in detail
//! - `categories` - List category names
//! - `cart` - Show, add to, remove from, or count the cart

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal output is this binary's user interface.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_core::ProductId;
use shopfront_storefront::AppState;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Browse the catalog and manage your cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show the first N products
        #[arg(short, long)]
        limit: Option<u32>,

        /// Only show products in this category ("all" for every product)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show product details
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List product categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Print the total number of items
    Count,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so listings on stdout stay clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<()> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products { limit, category } => {
            commands::catalog::products(&state, limit, category.as_deref()).await?;
        }
        Commands::Product { id } => commands::catalog::product(&state, id).await?,
        Commands::Categories => commands::catalog::categories(&state).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&state, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&state, id),
            CartAction::Count => commands::cart::count(&state),
        },
    }
    Ok(())
}
