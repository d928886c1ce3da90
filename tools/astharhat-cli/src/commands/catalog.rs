//! Catalog listing commands.

use anyhow::Result;

use crate::context::Context;

/// Run the catalog command.
pub async fn run(ctx: &Context) -> Result<()> {
    let items = ctx.catalog.items();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Catalog");
    ctx.output.products(items);

    ctx.output.header("Frequently Searched");
    for item in ctx.catalog.frequently_searched() {
        ctx.output.list_item(&item.name);
    }

    Ok(())
}

/// Run the categories command.
pub async fn run_categories(ctx: &Context) -> Result<()> {
    let categories = ctx.catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        let count = ctx.catalog.by_category(&category.name).len();
        ctx.output.list_item(&format!("{} ({})", category.name, count));
    }

    Ok(())
}
