//! Volume aggregation over a most-traded date range
//!
//! The API answers `most-traded/` with one ranked list per date. This folds
//! those lists into a single ranking by total traded volume over the range.

use crate::models::{AggregatedSymbol, TradesByDate};
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Rank symbols by summed volume across all dates, keeping the top `top_n`
///
/// `avg_price` is the plain mean of the observed prices, not weighted by
/// volume. Symbols with equal volume keep the order in which they were
/// first seen, dates taken chronologically.
pub fn aggregate_by_volume(trades: &TradesByDate, top_n: NonZeroUsize) -> Vec<AggregatedSymbol> {
    let mut entries: Vec<AggregatedSymbol> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in trades.values().flatten() {
        match index.get(record.symbol.as_str()) {
            Some(&i) => {
                let entry = &mut entries[i];
                entry.volume += record.volume;
                // Price total until the division below
                entry.avg_price += record.price;
                entry.count += 1;
            }
            None => {
                index.insert(record.symbol.as_str(), entries.len());
                entries.push(AggregatedSymbol {
                    symbol: record.symbol.clone(),
                    company_name: record.company_name.clone(),
                    volume: record.volume,
                    avg_price: record.price,
                    count: 1,
                });
            }
        }
    }

    for entry in &mut entries {
        entry.avg_price /= entry.count as f64;
    }

    // Stable, so ties stay in first-seen order
    entries.sort_by(|a, b| b.volume.cmp(&a.volume));
    entries.truncate(top_n.get());
    entries
}
