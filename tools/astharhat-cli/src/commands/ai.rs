//! AI recommendation and deep search commands.

use anyhow::Result;
use astharhat_ai::{DeepSearch, Recommender, Source};
use serde_json::json;

use super::{DeepSearchArgs, RecommendArgs};
use crate::context::Context;

/// Run the recommend command.
pub async fn recommend(args: RecommendArgs, ctx: &Context) -> Result<()> {
    let model = ctx.model();
    ctx.output.debug(&format!("Using model: {}", model.name()));

    let mut recommender = Recommender::new(model, ctx.catalog.clone());
    if let Some(context) = args.context {
        recommender = recommender.with_user_context(context);
    }

    let spinner = ctx.output.spinner("Personalising your picks...");
    let recs = recommender.recommend().await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&recs);
        return Ok(());
    }

    ctx.output.header(&recs.title);
    note_fallback(recs.source, ctx);
    ctx.output.products(&recs.products);
    Ok(())
}

/// Run the deep-search command.
pub async fn deep_search(args: DeepSearchArgs, ctx: &Context) -> Result<()> {
    let query = args.query.join(" ");
    let service = DeepSearch::new(ctx.model(), ctx.catalog.clone());

    let spinner = ctx.output.spinner("Analysing your query...");
    let result = service.run(&query).await;
    spinner.finish_and_clear();

    let products = result.products(&ctx.catalog);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "query": query,
            "advice": result.advice,
            "suggestedIds": result.suggested_ids,
            "products": products,
            "source": result.source,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Deep Search: {}", query));
    note_fallback(result.source, ctx);
    ctx.output.info(&result.advice);

    if products.is_empty() {
        ctx.output.info("No catalog products matched the suggestion.");
    } else {
        ctx.output.header("Suggested Products");
        ctx.output.products(&products);
    }
    Ok(())
}

fn note_fallback(source: Source, ctx: &Context) {
    if source.is_fallback() {
        ctx.output
            .warn("AI service unavailable, showing default results");
    }
}
