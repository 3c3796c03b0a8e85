//! Performance-since-IPO tool

use async_trait::async_trait;
use finagent_core::{DataTool, ToolError};
use finagent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_params;
use crate::client::SectorsApi;
use crate::endpoints::Endpoint;

pub struct ListingPerformanceTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct ListingPerformanceParams {
    stock: String,
}

impl ListingPerformanceTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for ListingPerformanceTool {
    fn name(&self) -> &'static str {
        "get_company_performance_ipo"
    }

    fn description(&self) -> String {
        "Get a company's price performance since its IPO on IDX.".to_string()
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "stock": schema::string("Stock symbol of the company, 4 letters, e.g. GOTO"),
            }),
            &["stock"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: ListingPerformanceParams = parse_params(params)?;

        let performance = self
            .api
            .get(&Endpoint::ListingPerformance {
                symbol: params.stock,
            })
            .await?;
        Ok(performance)
    }
}
