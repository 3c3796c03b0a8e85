//! Company report tool

use async_trait::async_trait;
use finagent_core::{DataTool, ToolError};
use finagent_llm::tools::schema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{check_symbol, parse_params};
use crate::client::SectorsApi;
use crate::endpoints::Endpoint;
use crate::models::Section;

/// One section of a listed company's report
pub struct CompanyReportTool {
    api: SectorsApi,
}

#[derive(Debug, Deserialize)]
struct CompanyReportParams {
    stock: String,
    #[serde(alias = "sections")]
    section: String,
}

impl CompanyReportTool {
    pub fn new(api: SectorsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataTool for CompanyReportTool {
    fn name(&self) -> &'static str {
        "get_company_report"
    }

    fn description(&self) -> String {
        let sections: Vec<String> = Section::ALL
            .iter()
            .map(|s| format!("- {}: {}", s.as_str(), s.description()))
            .collect();

        format!(
            "Get one section of the company report of an IDX-listed company by its stock symbol. \
             Sections:\n{}",
            sections.join("\n")
        )
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "stock": schema::string("Stock symbol of the company, 4 letters, e.g. BBRI"),
                "section": schema::string_enum("Report section to fetch", &Section::names()),
            }),
            &["stock", "section"],
        )
    }

    async fn invoke(&self, params: Value) -> Result<Value, ToolError> {
        let params: CompanyReportParams = parse_params(params)?;

        let section: Section = params
            .section
            .parse()
            .map_err(|_| ToolError::invalid("Please specify a section from the documentation"))?;
        check_symbol(&params.stock)?;

        let report = self
            .api
            .get(&Endpoint::CompanyReport {
                symbol: params.stock,
                section,
            })
            .await?;
        Ok(report)
    }
}
