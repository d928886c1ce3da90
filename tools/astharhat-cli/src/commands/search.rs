//! Search and category browse commands.

use anyhow::{bail, Result};
use astharhat_commerce::search::{self, SearchQuery, SearchResults};

use super::{CategoryArgs, SearchArgs};
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let query = match &args.image {
        Some(file) => SearchQuery::image(file),
        None => SearchQuery::text(args.query.join(" ")),
    }
    .with_sort(args.sort);

    let results = search::run(&ctx.catalog, &query)?;
    print_results(&results, ctx);
    Ok(())
}

/// Run the category command.
pub async fn run_category(args: CategoryArgs, ctx: &Context) -> Result<()> {
    if ctx.catalog.category(&args.name).is_none() {
        bail!(
            "Unknown category: {}. Run `astharhat categories` to list them.",
            args.name
        );
    }

    let results = search::browse_category(&ctx.catalog, &args.name, args.sort)?;
    print_results(&results, ctx);
    Ok(())
}

fn print_results(results: &SearchResults, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(results);
        return;
    }

    ctx.output.header(&results.title);
    ctx.output.subtitle(&results.subtitle);
    ctx.output.products(&results.items);
}
