//! Daily report computation
//!
//! - [`aggregate`]: draft -> computed report document
//! - [`ranking`]: waste-rate and product rankings over stored reports
//! - [`catalog`]: menu items and supply keys offered by the form
//!
//! Money is `rust_decimal::Decimal` throughout; see [`money`].

pub mod aggregate;
pub mod catalog;
pub mod money;
pub mod ranking;

use rust_decimal::Decimal;

pub use aggregate::{aggregate, average_spend, line_values, payments_mismatch, top_products};
pub use catalog::{Catalog, MENU, MenuItem, SUPPLY_KEYS, catalog};
pub use ranking::{WasteRank, product_ranking, waste_rate, waste_ranking};

/// Tunable report constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPolicy {
    /// Largest `|payments - net sales|` still considered reconciled
    pub mismatch_tolerance: Decimal,
    /// Entries kept by the rankings
    pub ranking_limit: usize,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            mismatch_tolerance: money::CENT,
            ranking_limit: 5,
        }
    }
}
