//! Subsector tools: member companies and subsector reports
//!
//! Subsector slugs are advertised to the model but passed through unchecked.

use async_trait::async_trait;
use finagent_core::{DataTool, ToolError};
use finagent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::parse_params;
use crate::client::SectorsApi;
use crate::endpoints::Endpoint;
use crate::models::{KNOWN_SUBSECTORS, is_known_subsector};

fn note_unknown(subsector: &str) {
    if !is_known_subsector(subsector) {
        debug!(subsector, "Subsector not in the known list, passing through");
    }
}

/// Companies belonging to one subsector
pub struct CompaniesBySubsectorTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct CompaniesParams {
    sub_sector: String,
}

impl CompaniesBySubsectorTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for CompaniesBySubsectorTool {
    fn name(&self) -> &'static str {
        "get_companies_by_subsector"
    }

    fn description(&self) -> String {
        format!(
            "Get the companies listed on IDX in a subsector. Valid subsectors: {}.",
            KNOWN_SUBSECTORS.join(", ")
        )
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "sub_sector": schema::string("Subsector slug, e.g. banks"),
            }),
            &["sub_sector"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: CompaniesParams = parse_params(params)?;
        note_unknown(&params.sub_sector);

        let companies = self
            .api
            .get(&Endpoint::CompaniesBySubsector {
                sub_sector: params.sub_sector,
            })
            .await?;
        Ok(companies)
    }
}

/// One section of a subsector report
pub struct SubsectorReportTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct SubsectorReportParams {
    #[serde(alias = "sector", alias = "sub_sector")]
    subsector: String,
    #[serde(alias = "sections")]
    section: String,
}

impl SubsectorReportTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for SubsectorReportTool {
    fn name(&self) -> &'static str {
        "get_subsector_report"
    }

    fn description(&self) -> String {
        "Get a section of the report of an IDX subsector.".to_string()
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "subsector": schema::string("Subsector slug, e.g. banks"),
                "section": schema::string("Report section, e.g. statistics"),
            }),
            &["subsector", "section"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: SubsectorReportParams = parse_params(params)?;
        note_unknown(&params.subsector);

        let report = self
            .api
            .get(&Endpoint::SubsectorReport {
                subsector: params.subsector,
                section: params.section,
            })
            .await?;
        Ok(report)
    }
}
