//! Configuration commands.

use anyhow::Result;
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Path => show_path(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    let config = &ctx.config;

    // Pricing section
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &config.pricing.currency);
    ctx.output.kv(
        "free_shipping_threshold",
        &config.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("shipping_fee", &config.pricing.shipping_fee.to_string());
    ctx.output.kv("tax_percent", &config.pricing.tax_percent.to_string());

    // Checkout section
    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("submit_delay_ms", &config.checkout.submit_delay_ms.to_string());
    ctx.output.kv("submit_timeout_ms", &config.checkout.submit_timeout_ms.to_string());

    // AI section
    ctx.output.info("");
    ctx.output.info("[ai]");
    ctx.output.kv("model", &config.ai.model);
    ctx.output.kv("endpoint", &config.ai.endpoint);
    ctx.output.kv("api_key_env", &config.ai.api_key_env);
    ctx.output.kv("timeout_ms", &config.ai.timeout_ms.to_string());
    ctx.output.kv("max_retries", &config.ai.max_retries.to_string());
    let key_status = if config.ai.api_key_from_env().is_some() {
        "set"
    } else {
        "not set (offline mode)"
    };
    ctx.output.kv("api_key", key_status);

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv(
        "data_dir",
        &config.storage.resolve_data_dir().display().to_string(),
    );

    Ok(())
}

async fn show_path(ctx: &Context) -> Result<()> {
    let path = ctx.config_path.as_ref().map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "path": path }));
        return Ok(());
    }

    match path {
        Some(path) => println!("{}", path),
        None => ctx.output.info("No config file found, using defaults"),
    }
    Ok(())
}
