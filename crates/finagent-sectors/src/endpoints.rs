//! Endpoint templates of the sectors.app v1 API

use crate::models::Section;
use url::Url;

/// One GET request against the data API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `company/report/{symbol}/?sections={section}`
    CompanyReport { symbol: String, section: Section },

    /// `most-traded/?start={start}&end={end}&n_stock={top_n}`
    MostTraded {
        start: String,
        end: String,
        top_n: usize,
    },

    /// `daily/{symbol}/`
    Daily { symbol: String },

    /// `listing-performance/{symbol}/`
    ListingPerformance { symbol: String },

    /// `companies/?sub_sector={sub_sector}`
    CompaniesBySubsector { sub_sector: String },

    /// `subsector/report/{subsector}/?sections={section}`
    SubsectorReport { subsector: String, section: String },
}

impl Endpoint {
    fn path(&self) -> Vec<&str> {
        match self {
            Endpoint::CompanyReport { symbol, .. } => vec!["company", "report", symbol.as_str()],
            Endpoint::MostTraded { .. } => vec!["most-traded"],
            Endpoint::Daily { symbol } => vec!["daily", symbol.as_str()],
            Endpoint::ListingPerformance { symbol } => vec!["listing-performance", symbol.as_str()],
            Endpoint::CompaniesBySubsector { .. } => vec!["companies"],
            Endpoint::SubsectorReport { subsector, .. } => vec!["subsector", "report", subsector.as_str()],
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::CompanyReport { section, .. } => {
                vec![("sections", section.as_str().to_string())]
            }
            Endpoint::MostTraded { start, end, top_n } => vec![
                ("start", start.clone()),
                ("end", end.clone()),
                ("n_stock", top_n.to_string()),
            ],
            Endpoint::Daily { .. } | Endpoint::ListingPerformance { .. } => vec![],
            Endpoint::CompaniesBySubsector { sub_sector } => {
                vec![("sub_sector", sub_sector.clone())]
            }
            Endpoint::SubsectorReport { section, .. } => vec![("sections", section.clone())],
        }
    }

    /// Absolute URL under `base`
    ///
    /// Path values are percent-encoded as single segments and every path
    /// ends with `/`, as the API expects. `base` must be a hierarchical URL,
    /// which [`SectorsConfig`](crate::SectorsConfig) guarantees.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(self.path()).push("");
        }

        let query = self.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}
