//! Read-side rankings across stored reports

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::money::{to_decimal, to_f64};
use crate::models::{ReportSummary, TopProduct};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRank {
    pub report_id: i64,
    pub date: String,
    pub store: String,
    pub sales: f64,
    pub waste: f64,
    /// Percent of waste value in sales + waste
    pub rate: f64,
}

/// `waste / (sales + waste) * 100`, zero when both are zero
pub fn waste_rate(sales: Decimal, waste: Decimal) -> Decimal {
    let base = sales + waste;
    if base > Decimal::ZERO {
        waste / base * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Reports with the highest waste rate, at most `limit`
pub fn waste_ranking(reports: &[ReportSummary], limit: usize) -> Vec<WasteRank> {
    let mut ranked: Vec<(Decimal, &ReportSummary)> = reports
        .iter()
        .map(|r| (waste_rate(to_decimal(r.sales), to_decimal(r.waste)), r))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
        .into_iter()
        .take(limit)
        .map(|(rate, r)| WasteRank {
            report_id: r.id,
            date: r.date.clone(),
            store: r.store.clone(),
            sales: r.sales,
            waste: r.waste,
            rate: to_f64(rate),
        })
        .collect()
}

/// Sum sold counts per product across reports, most sold first (ties by name)
pub fn product_ranking<'a, I>(lists: I, limit: usize) -> Vec<TopProduct>
where
    I: IntoIterator<Item = &'a [TopProduct]>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for product in lists.into_iter().flatten() {
        *counts.entry(product.name.as_str()).or_default() += product.count;
    }
    let mut ranked: Vec<TopProduct> = counts
        .into_iter()
        .map(|(name, count)| TopProduct {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, sales: f64, waste: f64) -> ReportSummary {
        ReportSummary {
            id,
            date: "2025-03-01".into(),
            store: format!("S{id}"),
            region: "Berlin".into(),
            created_by: "u".into(),
            created_at: 0,
            sales,
            waste,
            net_sales: sales,
            payments_mismatch: false,
        }
    }

    fn product(name: &str, count: u64) -> TopProduct {
        TopProduct {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn test_waste_rate() {
        assert_eq!(waste_rate(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            waste_rate(Decimal::from(75), Decimal::from(25)),
            Decimal::from(25)
        );
    }

    #[test]
    fn test_waste_ranking_orders_and_limits() {
        let reports: Vec<_> = (1..=7)
            .map(|i| summary(i, 100.0, i as f64 * 5.0))
            .chain(std::iter::once(summary(99, 0.0, 0.0)))
            .collect();
        let ranked = waste_ranking(&reports, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].report_id, 7);
        assert_eq!(ranked[4].report_id, 3);
        assert!(ranked.windows(2).all(|w| w[0].rate >= w[1].rate));
        assert_eq!(ranked[0].rate, 25.93);
    }

    #[test]
    fn test_zero_sales_and_waste_ranks_last() {
        let ranked = waste_ranking(&[summary(1, 0.0, 0.0), summary(2, 10.0, 1.0)], 5);
        assert_eq!(ranked[0].report_id, 2);
        assert_eq!(ranked[1].rate, 0.0);
    }

    #[test]
    fn test_product_ranking_sums_across_reports() {
        let a = vec![product("Latte", 10), product("Mocha", 4)];
        let b = vec![product("Mocha", 8), product("BLT", 2)];
        let c = vec![product("Tuna", 12)];
        let ranked = product_ranking([a.as_slice(), b.as_slice(), c.as_slice()], 5);
        assert_eq!(ranked[0], product("Mocha", 12));
        assert_eq!(ranked[1], product("Tuna", 12));
        assert_eq!(ranked[2], product("Latte", 10));
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_product_ranking_limit() {
        let list: Vec<_> = (0..8).map(|i| product(&format!("P{i}"), i)).collect();
        let ranked = product_ranking([list.as_slice()], 3);
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["P7", "P6", "P5"]);
    }
}
