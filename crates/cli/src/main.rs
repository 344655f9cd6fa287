//! Order Desk CLI - browse the catalog, manage the cart, place orders.
//!
//! # Usage
//!
//! ```bash
//! # Browse and search the catalog
//! order-desk products
//! order-desk products --search laptop
//!
//! # Edit the cart (persisted under ORDER_DESK_DATA_DIR)
//! order-desk cart add 1
//! order-desk cart inc 1
//! order-desk cart dec 1
//! order-desk cart remove 1
//! order-desk cart show
//!
//! # Submit selected cart lines as one order
//! order-desk order submit --select 1 --select 4
//! order-desk order submit --all
//!
//! # Order history and the configured customer
//! order-desk orders
//! order-desk customer
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use order_desk_client::{DeskConfig, DeskError, DeskState};
use order_desk_core::ProductId;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "order-desk")]
#[command(author, version, about = "Order Desk shopping cart and order tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Case-insensitive filter on name, description or id
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review and submit orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// List submitted orders
    Orders,
    /// Show the customer orders are placed for
    Customer,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents
    Show,
    /// Add one of a catalog product
    Add { product_id: ProductId },
    /// Increase a line's quantity by one
    Inc { product_id: ProductId },
    /// Decrease a line's quantity by one (never below 1)
    Dec { product_id: ProductId },
    /// Remove a line
    Remove { product_id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit selected cart lines as one order
    Submit {
        /// Product to include (repeatable)
        #[arg(short, long = "select", required_unless_present = "all")]
        select: Vec<ProductId>,

        /// Include every cart line
        #[arg(long, conflicts_with = "select")]
        all: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DeskConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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
async fn main() {
    let cli = Cli::parse();

    // Configuration comes first so Sentry can be set up before tracing
    let config = DeskConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "order_desk=info,order_desk_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(DeskError::from(e)),
    };

    if let Err(e) = result {
        if e.is_precondition() {
            tracing::warn!("{}", e.user_message());
        } else {
            tracing::error!(error = %e, "{}", e.user_message());
        }
        std::process::exit(exit_code(&e));
    }
}

/// Exit status for a failed command: 2 when the action was blocked before
/// anything was written, 1 otherwise.
const fn exit_code(error: &DeskError) -> i32 {
    if error.is_precondition() { 2 } else { 1 }
}

async fn run(cli: Cli, config: DeskConfig) -> Result<(), DeskError> {
    let mut state = DeskState::open(config)?;

    match cli.command {
        Commands::Products { search } => {
            commands::catalog::products(&state, search.as_deref()).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { product_id } => commands::cart::add(&mut state, product_id).await?,
            CartAction::Inc { product_id } => commands::cart::increment(&mut state, product_id),
            CartAction::Dec { product_id } => commands::cart::decrement(&mut state, product_id),
            CartAction::Remove { product_id } => commands::cart::remove(&mut state, product_id),
            CartAction::Clear => commands::cart::clear(&mut state),
        },
        Commands::Order { action } => match action {
            OrderAction::Submit { select, all } => {
                commands::order::submit(&mut state, &select, all).await?;
            }
        },
        Commands::Orders => commands::order::list(&state).await?,
        Commands::Customer => commands::catalog::customer(&state).await?,
    }
    Ok(())
}
