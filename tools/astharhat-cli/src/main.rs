//! AstharHat CLI - Terminal storefront.
//!
//! Commands:
//! - `astharhat catalog` - List every product
//! - `astharhat categories` - List categories
//! - `astharhat search` - Search by name or category
//! - `astharhat category` - Browse one category
//! - `astharhat wishlist` - Show or toggle saved products
//! - `astharhat recommend` - AI picks for the shopper
//! - `astharhat deep-search` - AI procurement advice for a query
//! - `astharhat chat` - Talk to the shopping assistant
//! - `astharhat shop` - Interactive cart and checkout
//! - `astharhat config` - Inspect configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CategoryArgs, ChatArgs, ConfigArgs, DeepSearchArgs, RecommendArgs, SearchArgs, ShopArgs,
    WishlistArgs,
};

/// AstharHat CLI - Browse, search and order from the AstharHat catalog
#[derive(Parser)]
#[command(name = "astharhat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    Catalog,

    /// List product categories
    Categories,

    /// Search products by name or category
    Search(SearchArgs),

    /// Browse a single category
    Category(CategoryArgs),

    /// Show or change the wishlist
    Wishlist(WishlistArgs),

    /// Personalised product picks
    Recommend(RecommendArgs),

    /// Procurement advice for a search query
    DeepSearch(DeepSearchArgs),

    /// Chat with the shopping assistant
    Chat(ChatArgs),

    /// Fill a cart and check out interactively
    Shop(ShopArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    // Ignore a second initialisation attempt.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog => commands::catalog::run(&ctx).await,
        Commands::Categories => commands::catalog::run_categories(&ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Category(args) => commands::search::run_category(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Recommend(args) => commands::ai::recommend(args, &ctx).await,
        Commands::DeepSearch(args) => commands::ai::deep_search(args, &ctx).await,
        Commands::Chat(args) => commands::chat::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
