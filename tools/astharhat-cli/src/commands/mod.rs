//! CLI command implementations.

pub mod ai;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod search;
pub mod shop;
pub mod wishlist;

use astharhat_commerce::search::SortOption;
use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text, matched against product names and categories.
    #[arg(required_unless_present = "image")]
    pub query: Vec<String>,

    /// Search by image file name instead of text.
    #[arg(long, conflicts_with = "query")]
    pub image: Option<String>,

    /// Sort order: relevance, price-asc, price-desc, name-asc.
    #[arg(short, long, default_value = "relevance")]
    pub sort: SortOption,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category name, exactly as listed by `astharhat categories`.
    pub name: String,

    /// Sort order: relevance, price-asc, price-desc, name-asc.
    #[arg(short, long, default_value = "relevance")]
    pub sort: SortOption,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List saved products.
    List,
    /// Add a product, or remove it if already saved.
    Toggle {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the recommend command.
#[derive(Args)]
pub struct RecommendArgs {
    /// Describe the shopper instead of the default profile.
    #[arg(long)]
    pub context: Option<String>,
}

/// Arguments for the deep-search command.
#[derive(Args)]
pub struct DeepSearchArgs {
    /// What you are looking for.
    #[arg(required = true)]
    pub query: Vec<String>,
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Send one message and exit instead of starting a session.
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Product IDs to put in the cart before the session starts.
    #[arg(short, long)]
    pub add: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the config file in use.
    Path,
}
