//! Daily Report Model
//!
//! A store submits one report per business day: per-item sales and waste,
//! payment breakdown, discounts/returns and supply orders. The server
//! computes every derived value (see [`crate::report`]); reports are
//! immutable once stored and can only be deleted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Analytics grouping stamped on every submitted report
pub const REPORT_CATEGORY_DAILY: &str = "Daily";

/// Region used when the submitting profile has none
pub const UNKNOWN_REGION: &str = "Unknown";

/// Computed line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Catalog id (`c1`, `k4`, ...) when the line came from the menu
    pub item_id: Option<String>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub sold: u32,
    pub waste_qty: u32,
    pub sales_value: f64,
    pub waste_value: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payments {
    pub cash: f64,
    pub card: f64,
    pub mobile: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub sales: f64,
    pub waste: f64,
    pub difference: f64,
    pub customers: Option<u32>,
    /// Absent when there were no customers
    pub avg_spend: Option<f64>,
    pub net_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub count: u64,
}

/// Everything a report holds except its storage identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub date: String,
    pub store: String,
    pub region: String,
    pub category: String,
    pub created_by: String,
    pub totals: ReportTotals,
    pub payments: Payments,
    pub discounts: f64,
    pub returns: f64,
    #[serde(default)]
    pub incident: String,
    pub items: Vec<ReportLine>,
    #[serde(default)]
    pub supplies: BTreeMap<String, u32>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    pub payments_mismatch: bool,
}

/// Stored daily report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: i64,
    pub created_at: i64,
    #[serde(flatten)]
    pub document: ReportDocument,
}

/// Report list entry (no line items), used by the head-office views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReportSummary {
    pub id: i64,
    pub date: String,
    pub store: String,
    pub region: String,
    pub created_by: String,
    pub created_at: i64,
    pub sales: f64,
    pub waste: f64,
    pub net_sales: f64,
    pub payments_mismatch: bool,
}

impl From<&DailyReport> for ReportSummary {
    fn from(report: &DailyReport) -> Self {
        let doc = &report.document;
        Self {
            id: report.id,
            date: doc.date.clone(),
            store: doc.store.clone(),
            region: doc.region.clone(),
            created_by: doc.created_by.clone(),
            created_at: report.created_at,
            sales: doc.totals.sales,
            waste: doc.totals.waste,
            net_sales: doc.totals.net_sales,
            payments_mismatch: doc.payments_mismatch,
        }
    }
}

// ==================== Submission input ====================

/// One line of the report form. Catalog lines may omit name/category/price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftLine {
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub sold: i64,
    #[serde(default)]
    pub waste_qty: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftPayments {
    pub cash: Option<f64>,
    pub card: Option<f64>,
    pub mobile: Option<f64>,
}

/// Report form as submitted by a store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportDraft {
    pub date: Option<String>,
    pub customers: Option<i64>,
    #[serde(default)]
    pub payments: DraftPayments,
    pub discounts: Option<f64>,
    pub returns: Option<f64>,
    pub incident: Option<String>,
    #[serde(default)]
    pub items: Vec<DraftLine>,
    #[serde(default)]
    pub supplies: BTreeMap<String, i64>,
}

/// Header fields taken from the submitting session, never from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub store: Option<String>,
    pub region: Option<String>,
    pub created_by: String,
}

/// Head-office report filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilter {
    pub store: Option<String>,
    pub region: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD`)
    pub from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`)
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_report_flattens_document() {
        let report = DailyReport {
            id: 7,
            created_at: 1_000,
            document: ReportDocument {
                date: "2025-03-01".into(),
                store: "Mitte".into(),
                region: "Berlin".into(),
                category: REPORT_CATEGORY_DAILY.into(),
                created_by: "u-1".into(),
                totals: ReportTotals::default(),
                payments: Payments::default(),
                discounts: 0.0,
                returns: 0.0,
                incident: String::new(),
                items: vec![],
                supplies: BTreeMap::new(),
                top_products: vec![],
                payments_mismatch: false,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["store"], "Mitte");
        assert_eq!(json["category"], "Daily");
        assert!(json["totals"]["avg_spend"].is_null());

        let summary = ReportSummary::from(&report);
        assert_eq!(summary.store, "Mitte");
        assert_eq!(summary.created_at, 1_000);
    }

    #[test]
    fn test_draft_defaults() {
        let draft: ReportDraft =
            serde_json::from_str(r#"{"date":"2025-03-01","items":[{"item_id":"c1","sold":3}]}"#)
                .unwrap();
        assert_eq!(draft.items[0].waste_qty, 0);
        assert!(draft.payments.cash.is_none());
        assert!(draft.supplies.is_empty());
    }
}
