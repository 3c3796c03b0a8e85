//! IDX data tools for the financial agent
//!
//! Each tool checks its own preconditions, builds one [`Endpoint`] and hands
//! it to [`SectorsApi`]. Failed preconditions are [`ToolError::InvalidInput`]
//! and never reach the network.

pub mod company_report;
pub mod daily;
pub mod listing_performance;
pub mod subsector;
pub mod top_volume;

pub use company_report::CompanyReportTool;
pub use daily::DailyTransactionTool;
pub use listing_performance::ListingPerformanceTool;
pub use subsector::{CompaniesBySubsectorTool, SubsectorReportTool};
pub use top_volume::TopVolumeTool;

use crate::client::SectorsApi;
use finagent_core::{ToolError, ToolRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Registry holding all six data tools, in a stable order
pub fn sectors_tools(api: &SectorsApi) -> ToolRegistry {
    ToolRegistry::new()
        .with(Arc::new(CompanyReportTool::new(api.clone())))
        .with(Arc::new(TopVolumeTool::new(api.clone())))
        .with(Arc::new(DailyTransactionTool::new(api.clone())))
        .with(Arc::new(ListingPerformanceTool::new(api.clone())))
        .with(Arc::new(CompaniesBySubsectorTool::new(api.clone())))
        .with(Arc::new(SubsectorReportTool::new(api.clone())))
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|e| ToolError::invalid(format!("Invalid parameters: {e}")))
}

/// IDX tickers are exactly four characters, e.g. BBRI
fn check_symbol(symbol: &str) -> Result<(), ToolError> {
    if symbol.chars().count() == 4 {
        Ok(())
    } else {
        Err(ToolError::invalid("Stock symbol must be 4 characters, e.g. BBRI"))
    }
}
