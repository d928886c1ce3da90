//! Wishlist commands.

use anyhow::Result;
use astharhat_commerce::ProductId;
use serde_json::json;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => list(ctx),
        WishlistCommand::Toggle { id } => toggle(&id, ctx),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let wishlist = ctx.wishlist()?;
    let items = ctx.catalog.select(wishlist.ids());

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "ids": wishlist.ids(), "items": items }));
        return Ok(());
    }

    ctx.output.header("Wishlist");
    if wishlist.is_empty() {
        ctx.output.info("Your wishlist is empty.");
        return Ok(());
    }

    ctx.output.products(&items);
    let unknown = wishlist.len() - items.len();
    if unknown > 0 {
        ctx.output
            .warn(&format!("{} saved item(s) are no longer in the catalog", unknown));
    }
    Ok(())
}

fn toggle(id: &str, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id);
    let item = ctx.catalog.require(&id)?;

    let mut wishlist = ctx.wishlist()?;
    let change = wishlist.toggle(&id)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": id,
            "change": change,
            "saved": wishlist.contains(&id),
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("{}: {}", change.message(), item.name));
    Ok(())
}
