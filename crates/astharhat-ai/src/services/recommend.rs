//! Personalised product picks.

use std::sync::Arc;

use astharhat_commerce::catalog::{Catalog, CatalogItem};
use astharhat_commerce::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::fallback::{
    or_fallback, Source, RECOMMENDATIONS_DEFAULT_COUNT, RECOMMENDATIONS_DEFAULT_TITLE,
    RECOMMENDATIONS_OFFLINE_COUNT, RECOMMENDATIONS_OFFLINE_TITLE,
};
use crate::model::{GenerateRequest, GenerativeModel};
use crate::AiError;

/// Shopper profile sent with every request.
pub const DEFAULT_USER_CONTEXT: &str =
    "User interested in high-tech gadgets and premium lifestyle items.";

/// A titled product strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub title: String,
    pub products: Vec<CatalogItem>,
    pub source: Source,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    product_ids: Vec<ProductId>,
}

#[derive(Serialize)]
struct ProductSummary<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
}

/// Recommendation service.
#[derive(Clone)]
pub struct Recommender {
    model: Arc<dyn GenerativeModel>,
    catalog: Arc<Catalog>,
    user_context: String,
}

impl Recommender {
    pub fn new(model: Arc<dyn GenerativeModel>, catalog: Arc<Catalog>) -> Self {
        Self {
            model,
            catalog,
            user_context: DEFAULT_USER_CONTEXT.to_string(),
        }
    }

    /// Replace the shopper profile.
    pub fn with_user_context(mut self, context: impl Into<String>) -> Self {
        self.user_context = context.into();
        self
    }

    /// Pick products for the shopper. Never fails.
    ///
    /// A missing title becomes the default title. If none of the returned
    /// ids exist, the first catalog items are shown. If the call fails, the
    /// offline title and a longer default strip are used.
    pub async fn recommend(&self) -> Recommendations {
        let result = self.ask().await.map(|response| {
            let title = response
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| RECOMMENDATIONS_DEFAULT_TITLE.to_string());
            let mut products = self.catalog.select(&response.product_ids);
            if products.is_empty() {
                products = self.catalog.first(RECOMMENDATIONS_DEFAULT_COUNT);
            }
            (title, products)
        });

        let ((title, products), source) = or_fallback("recommendations", result, || {
            (
                RECOMMENDATIONS_OFFLINE_TITLE.to_string(),
                self.catalog.first(RECOMMENDATIONS_OFFLINE_COUNT),
            )
        });

        debug!(?source, count = products.len(), "recommendations done");
        Recommendations {
            title,
            products,
            source,
        }
    }

    async fn ask(&self) -> Result<RecommendationResponse, AiError> {
        let request = GenerateRequest::prompt(self.prompt()?).with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "productIds": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }));
        let text = self.model.generate(&request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn prompt(&self) -> Result<String, AiError> {
        let products: Vec<ProductSummary<'_>> = self
            .catalog
            .items()
            .iter()
            .map(|p| ProductSummary {
                id: p.id.as_str(),
                name: &p.name,
                category: &p.category,
            })
            .collect();

        Ok(format!(
            "You are the AI personalization engine for AstharHat.\n\
             Context: {}\n\
             Available Products: {}\n\n\
             Task: Select 3-4 products that best match the user context.\n\
             Return JSON with:\n\
             - 'title': A catchy, personalized section title (e.g., \"Picked for your Tech Lifestyle\").\n\
             - 'productIds': Array of selected product IDs.",
            self.user_context,
            serde_json::to_string(&products)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::ScriptedModel;

    fn service(reply: Result<String, AiError>) -> Recommender {
        Recommender::new(
            Arc::new(ScriptedModel::new(vec![reply])),
            Arc::new(Catalog::builtin()),
        )
    }

    fn ids(recs: &Recommendations) -> Vec<&str> {
        recs.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_model_picks_in_catalog_order() {
        let recs = service(Ok(
            r#"{"title": "Picked for your Tech Lifestyle", "productIds": ["p3", "p1", "zz"]}"#.into(),
        ))
        .recommend()
        .await;

        assert_eq!(recs.source, Source::Model);
        assert_eq!(recs.title, "Picked for your Tech Lifestyle");
        assert_eq!(ids(&recs), vec!["p1", "p3"]);
    }

    #[tokio::test]
    async fn test_missing_title_and_unknown_ids() {
        let recs = service(Ok(r#"{"productIds": ["nope"]}"#.into())).recommend().await;

        assert_eq!(recs.source, Source::Model);
        assert_eq!(recs.title, RECOMMENDATIONS_DEFAULT_TITLE);
        assert_eq!(ids(&recs), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_failure_serves_offline_picks() {
        let recs = service(Err(AiError::Http {
            status: 500,
            body: "boom".into(),
        }))
        .recommend()
        .await;

        assert!(recs.source.is_fallback());
        assert_eq!(recs.title, RECOMMENDATIONS_OFFLINE_TITLE);
        assert_eq!(ids(&recs), vec!["p1", "p2", "p3", "p4"]);
    }

    #[tokio::test]
    async fn test_unparsable_reply_serves_offline_picks() {
        let recs = service(Ok("not json".into())).recommend().await;
        assert_eq!(recs.title, RECOMMENDATIONS_OFFLINE_TITLE);
    }

    #[test]
    fn test_prompt_lists_catalog() {
        let prompt = service(Ok(String::new())).prompt().unwrap();
        assert!(prompt.contains(r#"{"id":"p6","name":"Industrial Laser Welder","category":"Machinery"}"#));
        assert!(prompt.contains(DEFAULT_USER_CONTEXT));
    }
}
