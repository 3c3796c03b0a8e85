//! Most-traded-by-volume tool

use async_trait::async_trait;
use finagent_core::{DataTool, FetchError, ToolError};
use finagent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::num::NonZeroUsize;
use tracing::debug;

use super::parse_params;
use crate::aggregate::aggregate_by_volume;
use crate::client::SectorsApi;
use crate::endpoints::Endpoint;
use crate::models::TradesByDate;

const DEFAULT_TOP_N: i64 = 5;

/// Top companies by transaction volume over a date range
pub struct TopVolumeTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct TopVolumeParams {
    start_date: String,
    end_date: String,
    #[serde(default = "default_top_n")]
    top_n: i64,
}

fn default_top_n() -> i64 {
    DEFAULT_TOP_N
}

impl TopVolumeTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for TopVolumeTool {
    fn name(&self) -> &'static str {
        "get_top_companies_by_tx_volume"
    }

    fn description(&self) -> String {
        "Get the most traded companies on IDX by transaction volume between a start date and \
         an end date. Returns, for each company, the symbol, company name, total volume over \
         the period, average price and the number of trading days counted. For a single day \
         use the same start and end date."
            .to_string()
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "start_date": schema::date("First date of the period"),
                "end_date": schema::date("Last date of the period"),
                "top_n": {
                    "type": "integer",
                    "description": "How many companies to return",
                    "default": DEFAULT_TOP_N,
                    "minimum": 1,
                },
            }),
            &["start_date", "end_date"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: TopVolumeParams = parse_params(params)?;

        let top_n = usize::try_from(params.top_n)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| ToolError::invalid("Please enter a valid value (cannot be negative or 0)"))?;

        let payload = self
            .api
            .get(&Endpoint::MostTraded {
                start: params.start_date,
                end: params.end_date,
                top_n: top_n.get(),
            })
            .await?;

        let trades: TradesByDate =
            serde_json::from_value(payload).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!(dates = trades.len(), "Aggregating most-traded records");

        let ranked = aggregate_by_volume(&trades, top_n);
        Ok(json!(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRetriever;
    use std::sync::Arc;
    use url::Url;

    fn tool(retriever: MockRetriever) -> TopVolumeTool {
        TopVolumeTool::new(SectorsApi::new(
            Arc::new(retriever),
            Url::parse("https://api.sectors.app/v1/").unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_aggregates_over_range() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .withf(|url| {
                url.as_str()
                    == "https://api.sectors.app/v1/most-traded/?start=2024-01-01&end=2024-01-02&n_stock=2"
            })
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "2024-01-01": [
                        { "symbol": "AAAA", "company_name": "Alpha", "volume": 100, "price": 10 },
                        { "symbol": "BBBB", "company_name": "Beta", "volume": 50, "price": 20 }
                    ],
                    "2024-01-02": [
                        { "symbol": "AAAA", "company_name": "Alpha", "volume": 200, "price": 12 }
                    ]
                }))
            });

        let out = tool(retriever)
            .invoke(json!({ "start_date": "2024-01-01", "end_date": "2024-01-02", "top_n": 2 }))
            .await
            .unwrap();

        assert_eq!(
            out,
            json!([
                { "symbol": "AAAA", "company_name": "Alpha", "volume": 300, "avg_price": 11.0, "count": 2 },
                { "symbol": "BBBB", "company_name": "Beta", "volume": 50, "avg_price": 20.0, "count": 1 }
            ])
        );
    }

    #[tokio::test]
    async fn test_defaults_to_top_five() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .withf(|url| url.query() == Some("start=2024-06-03&end=2024-06-03&n_stock=5"))
            .times(1)
            .returning(|_| Ok(json!({})));

        let out = tool(retriever)
            .invoke(json!({ "start_date": "2024-06-03", "end_date": "2024-06-03" }))
            .await
            .unwrap();
        assert_eq!(out, json!([]));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_top_n() {
        for top_n in [0, -3] {
            let mut retriever = MockRetriever::new();
            retriever.expect_retrieve().never();

            let err = tool(retriever)
                .invoke(json!({ "start_date": "2024-06-03", "end_date": "2024-06-03", "top_n": top_n }))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                ToolError::invalid("Please enter a valid value (cannot be negative or 0)")
            );
        }
    }

    #[tokio::test]
    async fn test_unexpected_payload_is_decode_error() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .returning(|_| Ok(json!({ "detail": "Invalid date" })));

        let err = tool(retriever)
            .invoke(json!({ "start_date": "x", "end_date": "y" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Fetch(FetchError::Decode(_))));
    }
}
