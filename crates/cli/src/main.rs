//! Go Marketplace CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Add a product
//! gm-cart add --id 1 --title "Shirt" --image-url https://img/1.png --price 19.90
//!
//! # Change a line's quantity
//! gm-cart increment 1
//! gm-cart decrement 1
//!
//! # Use a different data directory
//! gm-cart --data-dir /tmp/cart list
//! ```
//!
//! # Commands
//!
//! - `list` - Print every line in the cart
//! - `add` - Add a product, or one more unit if it is already in the cart
//! - `increment` / `decrement` - Change a line's quantity by one

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use go_marketplace_core::{LineItem, Price, Quantity};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::CliConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Directory holding the cart snapshot (overrides `GO_MARKETPLACE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    List,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price (e.g., 19.90)
        #[arg(long)]
        price: Price,

        /// Units to add when the product is not in the cart yet
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Add one unit to a line
    Increment {
        /// Product id
        id: String,
    },
    /// Remove one unit from a line
    Decrement {
        /// Product id
        id: String,
    },
}

/// Load configuration from the environment, letting `--data-dir` win.
fn load_config(data_dir: Option<PathBuf>) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::from_env()?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    Ok(config)
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
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
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cli=info,go_marketplace_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.data_dir)?;

    // The tracing layer reports to whichever client is bound, so Sentry can
    // start after the subscriber.
    let _sentry_guard = init_sentry(&config);

    let cart = commands::cart::open(&config.data_dir, config.cart).await;

    match cli.command {
        Commands::List => commands::cart::list(&cart),
        Commands::Add {
            id,
            title,
            image_url,
            price,
            quantity,
        } => {
            let quantity = Quantity::new(quantity).unwrap_or(Quantity::ONE);
            let item = LineItem::new(id, title, image_url, price).with_quantity(quantity);
            commands::cart::add(&cart, item).await?;
        }
        Commands::Increment { id } => commands::cart::increment(&cart, &id.into()).await?,
        Commands::Decrement { id } => commands::cart::decrement(&cart, &id.into()).await?,
    }

    Ok(())
}
