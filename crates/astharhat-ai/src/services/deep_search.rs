//! Procurement-advice search backed by the model.

use std::sync::Arc;

use astharhat_commerce::catalog::{Catalog, CatalogItem};
use astharhat_commerce::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::fallback::{or_fallback, Source, DEEP_SEARCH_FALLBACK_ADVICE, DEEP_SEARCH_FALLBACK_COUNT};
use crate::model::{GenerateRequest, GenerativeModel};
use crate::AiError;

/// Advice plus the products the model considers relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepSearchResult {
    pub advice: String,
    /// Ids as returned by the model.
    pub suggested_ids: Vec<ProductId>,
    pub source: Source,
}

impl DeepSearchResult {
    /// Suggested items that exist in `catalog`, in catalog order.
    pub fn products(&self, catalog: &Catalog) -> Vec<CatalogItem> {
        catalog.select(&self.suggested_ids)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeepSearchResponse {
    advice: String,
    suggested_ids: Vec<ProductId>,
}

/// Deep search service.
#[derive(Clone)]
pub struct DeepSearch {
    model: Arc<dyn GenerativeModel>,
    catalog: Arc<Catalog>,
}

impl DeepSearch {
    pub fn new(model: Arc<dyn GenerativeModel>, catalog: Arc<Catalog>) -> Self {
        Self { model, catalog }
    }

    /// Analyse `query`. Never fails: errors and malformed replies yield the
    /// static advice and the first catalog items.
    pub async fn run(&self, query: &str) -> DeepSearchResult {
        let result = self.ask(query).await;
        let (response, source) = or_fallback("deep_search", result, || DeepSearchResponse {
            advice: DEEP_SEARCH_FALLBACK_ADVICE.to_string(),
            suggested_ids: self
                .catalog
                .first(DEEP_SEARCH_FALLBACK_COUNT)
                .into_iter()
                .map(|item| item.id)
                .collect(),
        });

        debug!(?source, suggested = response.suggested_ids.len(), "deep search done");
        DeepSearchResult {
            advice: response.advice,
            suggested_ids: response.suggested_ids,
            source,
        }
    }

    async fn ask(&self, query: &str) -> Result<DeepSearchResponse, AiError> {
        let request = GenerateRequest::prompt(self.prompt(query)).with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "advice": { "type": "STRING" },
                "suggestedIds": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["advice", "suggestedIds"]
        }));
        let text = self.model.generate(&request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn prompt(&self, query: &str) -> String {
        let names: Vec<&str> = self.catalog.items().iter().map(|i| i.name.as_str()).collect();
        let ids: Vec<&str> = self.catalog.items().iter().map(|i| i.id.as_str()).collect();
        format!(
            "You are an expert procurement assistant for AstharHat.\n\
             Analyze this user search query: \"{query}\".\n\
             Based on our product catalog ({}), identify which products are most relevant \
             and provide a brief professional procurement advice.\n\
             Return the result in JSON format with \"advice\" (string) and \"suggestedIds\" \
             (array of product IDs from: {}).",
            names.join(", "),
            ids.join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::ScriptedModel;
    use crate::model::OfflineModel;

    fn service(model: Arc<dyn GenerativeModel>) -> DeepSearch {
        DeepSearch::new(model, Arc::new(Catalog::builtin()))
    }

    #[tokio::test]
    async fn test_model_answer_is_used() {
        let model = Arc::new(ScriptedModel::replying(
            r#"{"advice": "Order the welder in bulk.", "suggestedIds": ["p6", "p9"]}"#,
        ));
        let result = service(model.clone()).run("laser welding").await;

        assert_eq!(result.source, Source::Model);
        assert_eq!(result.advice, "Order the welder in bulk.");
        assert_eq!(result.suggested_ids.len(), 2);
        assert_eq!(result.products(&Catalog::builtin()).len(), 1);

        let request = model.last_request();
        assert!(request.response_schema.is_some());
        assert!(request.turns[0].text.contains("\"laser welding\""));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let model = Arc::new(ScriptedModel::replying("sorry, no JSON today"));
        let result = service(model).run("watch").await;

        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.advice, DEEP_SEARCH_FALLBACK_ADVICE);
        let ids: Vec<&str> = result.suggested_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_offline_falls_back() {
        let result = service(Arc::new(OfflineModel)).run("watch").await;
        assert!(result.source.is_fallback());
        assert_eq!(result.suggested_ids.len(), DEEP_SEARCH_FALLBACK_COUNT);
    }
}
