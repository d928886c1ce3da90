//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use astharhat_ai::GenerativeModel;
use astharhat_commerce::catalog::Catalog;
use astharhat_commerce::checkout::{CheckoutFlow, SimulatedSubmitter};
use astharhat_commerce::wishlist::Wishlist;
use astharhat_store::Store;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Product catalog.
    pub catalog: Arc<Catalog>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => {
                    let config = CliConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };

        // Surface bad pricing before any command runs.
        config.pricing.policy()?;
        let catalog = Catalog::builtin();
        let currency = config.pricing.currency()?;
        if currency != catalog.currency() {
            bail!(
                "[pricing] currency {} does not match the catalog currency {}",
                currency,
                catalog.currency()
            );
        }

        debug!(config = ?config_path, "configuration loaded");
        output.debug(&match &config_path {
            Some(path) => format!("Using config: {}", path.display()),
            None => "Using default configuration".to_string(),
        });

        Ok(Self {
            config,
            config_path,
            output,
            catalog: Arc::new(catalog),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the persistent store in the configured data directory.
    pub fn store(&self) -> Result<Store> {
        let dir = self.config.storage.resolve_data_dir();
        Store::open_dir(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))
    }

    /// Load the wishlist from the persistent store.
    pub fn wishlist(&self) -> Result<Wishlist> {
        Wishlist::load(self.store()?).context("Failed to load wishlist")
    }

    /// The generative model, or the offline model when no API key is set.
    pub fn model(&self) -> Arc<dyn GenerativeModel> {
        astharhat_ai::connect(&self.config.ai)
    }

    /// A checkout flow using the configured pricing and timeout.
    pub fn checkout_flow(&self) -> Result<CheckoutFlow> {
        Ok(CheckoutFlow::new(self.config.pricing.policy()?)
            .with_submit_timeout(self.config.checkout.submit_timeout()))
    }

    /// The order submitter.
    pub fn submitter(&self) -> SimulatedSubmitter {
        SimulatedSubmitter::new(self.config.checkout.submit_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astharhat_commerce::cart::CartStore;
    use astharhat_commerce::ProductId;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("astharhat.toml"), "[pricing]\n").unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, root.path().join("astharhat.toml"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            format!(
                "[storage]\ndata_dir = {:?}\n\n[checkout]\nsubmit_timeout_ms = 500\n",
                dir.path().join("data")
            ),
        )
        .unwrap();

        let ctx = Context::load(path.to_str(), Output::new(false, true)).unwrap();
        assert_eq!(ctx.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            ctx.checkout_flow().unwrap().state(),
            astharhat_commerce::checkout::CheckoutState::FormEntry
        );

        let wishlist = ctx.wishlist().unwrap();
        assert!(wishlist.is_empty());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_bad_pricing_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astharhat.toml");
        std::fs::write(&path, "[pricing]\ncurrency = \"???\"\n").unwrap();

        assert!(Context::load(path.to_str(), Output::new(false, true)).is_err());
    }

    #[test]
    fn test_currency_must_match_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astharhat.toml");
        std::fs::write(&path, "[pricing]\ncurrency = \"USD\"\n").unwrap();

        let err = Context::load(path.to_str(), Output::new(false, true))
            .err()
            .unwrap();
        assert!(err.to_string().contains("catalog currency BDT"));

        std::fs::write(&path, "[pricing]\ncurrency = \"bdt\"\n").unwrap();
        let ctx = Context::load(path.to_str(), Output::new(false, true)).unwrap();
        let mut cart = CartStore::new(ctx.config.pricing.currency().unwrap());
        let item = ctx.catalog.require(&ProductId::new("p1")).unwrap();
        assert!(cart.add_item(item).is_ok());
    }
}
