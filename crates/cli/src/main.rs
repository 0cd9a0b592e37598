//! Storefront CLI - Browse the catalog and edit the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of the catalog
//! storefront products
//!
//! # Search within a category, third page
//! storefront products --search mug --category Kitchen --page 3
//!
//! # List categories
//! storefront categories
//!
//! # Cart operations
//! storefront cart add 1
//! storefront cart increase 1
//! storefront cart decrease 1
//! storefront cart remove 1
//! storefront cart show
//!
//! # Emit views as JSON for another renderer
//! storefront --json products
//! ```
//!
//! Configuration comes from the environment (see `WidgetConfig`). The cart is
//! persisted under `STOREFRONT_DATA_DIR`, so it survives between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use storefront_widget::error::report_error;
use storefront_widget::{AppError, CategoryFilter, FileStore, Storefront, WidgetConfig};
use storefront_widget_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Storefront widget CLI")]
struct Cli {
    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page of the product grid
    Products {
        /// Case-insensitive text to find in names and descriptions
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Page number (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List product categories
    Categories,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Add one unit to a product already in the cart
    Increase { id: ProductId },
    /// Remove one unit; the line disappears at zero
    Decrease { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &WidgetConfig) -> Option<sentry::ClientInitGuard> {
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

fn init_tracing() {
    // Logs go to stderr so stdout carries only rendered output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_widget=warn,storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Format command output as JSON or terminal text.
fn render_output(output: &commands::Output, json: bool) -> serde_json::Result<String> {
    if json {
        output.to_json()
    } else {
        Ok(output.to_text())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            report_error(&AppError::from(e));
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let store = FileStore::new(&config.data_dir);
    let mut storefront = Storefront::new(&config, store);

    let output = match cli.command {
        Commands::Products {
            search,
            category,
            page,
        } => commands::products::list(&mut storefront, &config, &search, category, page).await,
        Commands::Categories => commands::products::categories(&mut storefront, &config).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id } => commands::cart::add(&mut storefront, &config, id).await,
            CartAction::Increase { id } => commands::cart::increase(&mut storefront, id),
            CartAction::Decrease { id } => commands::cart::decrease(&mut storefront, id),
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, id),
        },
    };

    // Returning instead of exiting lets the Sentry guard flush on drop
    let rendered = match render_output(&output, cli.json) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize output");
            return ExitCode::FAILURE;
        }
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    ExitCode::SUCCESS
}
