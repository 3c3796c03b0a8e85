//! Daily transaction series tool

use async_trait::async_trait;
use finagent_core::{DataTool, ToolError};
use finagent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_params;
use crate::client::SectorsApi;
use crate::endpoints::Endpoint;

/// Daily close price, volume and market cap of one stock
pub struct DailyTransactionTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct DailyParams {
    stock: String,
}

impl DailyTransactionTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for DailyTransactionTool {
    fn name(&self) -> &'static str {
        "get_daily_tx"
    }

    fn description(&self) -> String {
        "Get the daily transaction series of a stock: symbol, date, close price, volume and \
         market cap per day. Use it to see whether the price is in an uptrend or a downtrend."
            .to_string()
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "stock": schema::string("Stock symbol of the company, 4 letters, e.g. BBRI"),
            }),
            &["stock"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: DailyParams = parse_params(params)?;

        let series = self
            .api
            .get(&Endpoint::Daily {
                symbol: params.stock,
            })
            .await?;
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRetriever;
    use std::sync::Arc;
    use url::Url;

    #[tokio::test]
    async fn test_returns_series_verbatim() {
        let payload = json!([
            { "symbol": "BBRI.JK", "date": "2024-06-03", "close": 4500, "volume": 120_000_000, "market_cap": 682_000_000_000_000_i64 },
            { "symbol": "BBRI.JK", "date": "2024-06-04", "close": 4550, "volume": 98_000_000, "market_cap": 689_000_000_000_000_i64 }
        ]);
        let expected = payload.clone();

        let mut retriever = MockRetriever::new();
        retriever
            .expect_retrieve()
            .withf(|url| url.path() == "/v1/daily/BBRI/" && url.query().is_none())
            .times(1)
            .returning(move |_| Ok(payload.clone()));

        let tool = DailyTransactionTool::new(SectorsApi::new(
            Arc::new(retriever),
            Url::parse("https://api.sectors.app/v1/").unwrap(),
        ));
        let out = tool.invoke(json!({ "stock": "BBRI" })).await.unwrap();
        assert_eq!(out, expected);
    }
}
