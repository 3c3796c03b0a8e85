//! Domain types of the IDX data API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Section of a company report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Overview,
    Valuation,
    Future,
    Peers,
    Financials,
    Dividend,
    Management,
    Ownership,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Overview,
        Section::Valuation,
        Section::Future,
        Section::Peers,
        Section::Financials,
        Section::Dividend,
        Section::Management,
        Section::Ownership,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Valuation => "valuation",
            Section::Future => "future",
            Section::Peers => "peers",
            Section::Financials => "financials",
            Section::Dividend => "dividend",
            Section::Management => "management",
            Section::Ownership => "ownership",
        }
    }

    /// What the section contains, for the model to choose from
    pub fn description(self) -> &'static str {
        match self {
            Section::Overview => {
                "company overview such as industry, sub-sector, email, phone number, market cap and market cap rank"
            }
            Section::Valuation => {
                "management, capital structure, future earnings and the market value of the company's assets"
            }
            Section::Future => "outlook of the company such as growth forecasts",
            Section::Peers => "comparison with peer companies or the sector",
            Section::Financials => "financial condition such as revenue and earnings",
            Section::Dividend => "dividend history and stability",
            Section::Management => "the company's management",
            Section::Ownership => "share ownership of the company",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a section name outside [`Section::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Subsector slugs the data API is known to accept
///
/// Advertised to the model but not enforced; the API has the final word.
pub const KNOWN_SUBSECTORS: [&str; 33] = [
    "alternative-energy",
    "apparel-luxury-goods",
    "automobiles-components",
    "banks",
    "basic-materials",
    "consumer-services",
    "financing-service",
    "food-beverage",
    "food-staples-retailing",
    "healthcare-equipment-providers",
    "heavy-constructions-civil-engineering",
    "holding-investment-companies",
    "household-goods",
    "industrial-goods",
    "industrial-services",
    "insurance",
    "investment-service",
    "leisure-goods",
    "logistics-deliveries",
    "media-entertainment",
    "multi-sector-holdings",
    "nondurable-household-products",
    "oil-gas-coal",
    "pharmaceuticals-health-care-research",
    "properties-real-estate",
    "retailing",
    "software-it-services",
    "technology-hardware-equipment",
    "telecommunication",
    "tobacco",
    "transportation",
    "transportation-infrastructure",
    "utilities",
];

pub fn is_known_subsector(slug: &str) -> bool {
    KNOWN_SUBSECTORS.contains(&slug)
}

/// One symbol's trading on one date, as returned by `most-traded/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub company_name: String,
    pub volume: u64,
    pub price: f64,
}

/// Trade records keyed by ISO date
///
/// A `BTreeMap` keeps the dates in chronological order.
pub type TradesByDate = BTreeMap<String, Vec<TradeRecord>>;

/// One symbol's trading summed over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSymbol {
    pub symbol: String,
    pub company_name: String,
    /// Sum of the per-date volumes
    pub volume: u64,
    /// Unweighted mean of the per-date prices
    pub avg_price: f64,
    /// Number of records folded into this entry
    pub count: usize,
}
