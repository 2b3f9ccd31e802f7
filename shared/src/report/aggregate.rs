//! Daily report aggregation
//!
//! Turns a submitted [`ReportDraft`] into the immutable [`ReportDocument`]:
//! per-line values, totals, average spend, payment reconciliation and the
//! per-report product list that feeds the product ranking.

use rust_decimal::prelude::*;
use std::collections::BTreeMap;

use super::ReportPolicy;
use super::catalog::find_item;
use super::money::{to_decimal, to_f64, try_decimal};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    DraftLine, Payments, REPORT_CATEGORY_DAILY, ReportDocument, ReportDraft, ReportHeader,
    ReportLine, ReportTotals, TopProduct, UNKNOWN_REGION,
};
use crate::util::parse_date;

/// Monetary value of one line: `(sales, waste, difference)`.
///
/// `None` when a product overflows `Decimal`.
pub fn line_values(price: Decimal, sold: u32, waste_qty: u32) -> Option<(Decimal, Decimal, Decimal)> {
    let sales = price.checked_mul(Decimal::from(sold))?;
    let waste = price.checked_mul(Decimal::from(waste_qty))?;
    Some((sales, waste, sales - waste))
}

/// `true` iff `|payments_total - net_sales| > tolerance`
///
/// A difference too large to represent is a mismatch.
pub fn payments_mismatch(payments_total: Decimal, net_sales: Decimal, tolerance: Decimal) -> bool {
    payments_total
        .checked_sub(net_sales)
        .is_none_or(|diff| diff.abs() > tolerance)
}

/// Average spend per customer; `None` without customers
pub fn average_spend(total_sales: Decimal, customers: Option<u32>) -> Option<Decimal> {
    match customers {
        Some(count) if count > 0 => Some(total_sales / Decimal::from(count)),
        _ => None,
    }
}

fn invalid_amount(field: &str, value: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::ReportInvalidAmount,
        format!("{field} must be a non-negative number, got {value}"),
    )
    .with_detail("field", field)
}

fn amount_too_large(field: &str) -> AppError {
    AppError::with_message(
        ErrorCode::ReportInvalidAmount,
        format!("{field} is too large to calculate"),
    )
    .with_detail("field", field)
}

/// Non-negative amount within `Decimal` range
fn input_amount(value: f64, field: &str) -> AppResult<Decimal> {
    if value.is_nan() || value < 0.0 {
        return Err(invalid_amount(field, value));
    }
    try_decimal(value).ok_or_else(|| amount_too_large(field))
}

/// Optional money field; missing counts as zero
fn money_field(value: Option<f64>, field: &str) -> AppResult<Decimal> {
    value.map_or(Ok(Decimal::ZERO), |v| input_amount(v, field))
}

fn checked_total(values: &[Decimal], field: &str) -> AppResult<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| amount_too_large(field))
}

fn quantity(value: i64, field: &str) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| invalid_amount(field, value))
}

struct ResolvedLine {
    item_id: Option<String>,
    name: String,
    category: String,
    price: Decimal,
    sold: u32,
    waste_qty: u32,
}

/// Fill catalog defaults and validate one draft line
fn resolve_line(line: &DraftLine) -> AppResult<ResolvedLine> {
    let menu = match line.item_id.as_deref() {
        Some(id) => Some(find_item(id).ok_or_else(|| {
            AppError::with_message(ErrorCode::ReportItemUnknown, format!("Unknown menu item: {id}"))
                .with_detail("item_id", id)
        })?),
        None => None,
    };

    let name = line
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| menu.map(|m| m.name.to_string()))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ReportItemUnknown,
                "Line item needs a menu id or a name",
            )
        })?;
    let category = line
        .category
        .clone()
        .or_else(|| menu.map(|m| m.category.to_string()))
        .unwrap_or_default();
    let price = match (line.price, menu) {
        (Some(p), _) => input_amount(p, "price")?,
        (None, Some(m)) => to_decimal(m.price),
        (None, None) => {
            return Err(AppError::with_message(
                ErrorCode::ReportInvalidAmount,
                format!("Line item {name} has no price"),
            ));
        }
    };

    Ok(ResolvedLine {
        item_id: line.item_id.clone(),
        name,
        category,
        price,
        sold: quantity(line.sold, "sold")?,
        waste_qty: quantity(line.waste_qty, "waste_qty")?,
    })
}

/// Products sold in one report, most sold first (ties by name)
pub fn top_products(items: &[ReportLine]) -> Vec<TopProduct> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for line in items.iter().filter(|l| l.sold > 0) {
        *counts.entry(line.name.as_str()).or_default() += u64::from(line.sold);
    }
    let mut products: Vec<TopProduct> = counts
        .into_iter()
        .map(|(name, count)| TopProduct {
            name: name.to_string(),
            count,
        })
        .collect();
    products.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    products
}

/// Validate the draft and compute the full report document.
///
/// Nothing here touches storage; a validation error means nothing is persisted.
pub fn aggregate(
    draft: &ReportDraft,
    header: &ReportHeader,
    policy: &ReportPolicy,
) -> AppResult<ReportDocument> {
    let date = draft
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::with_message(ErrorCode::ReportDateRequired, "Please select a date."))?;
    if parse_date(date).is_none() {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid report date: {date}"),
        )
        .with_detail("field", "date"));
    }
    let store = header.store.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ReportStoreRequired,
            "Your account has no store assigned.",
        )
    })?;

    let customers = draft
        .customers
        .map(|c| quantity(c, "customers"))
        .transpose()?;
    let cash = money_field(draft.payments.cash, "cash")?;
    let card = money_field(draft.payments.card, "card")?;
    let mobile = money_field(draft.payments.mobile, "mobile")?;
    let discounts = money_field(draft.discounts, "discounts")?;
    let returns = money_field(draft.returns, "returns")?;

    let mut supplies = BTreeMap::new();
    for (key, qty) in &draft.supplies {
        supplies.insert(key.clone(), quantity(*qty, key)?);
    }

    let mut total_sales = Decimal::ZERO;
    let mut total_waste = Decimal::ZERO;
    let mut items = Vec::with_capacity(draft.items.len());
    for line in &draft.items {
        let line = resolve_line(line)?;
        let (sales, waste, diff) = line_values(line.price, line.sold, line.waste_qty)
            .ok_or_else(|| amount_too_large("sales"))?;
        total_sales = checked_total(&[total_sales, sales], "sales")?;
        total_waste = checked_total(&[total_waste, waste], "waste")?;
        items.push(ReportLine {
            item_id: line.item_id,
            name: line.name,
            category: line.category,
            price: to_f64(line.price),
            sold: line.sold,
            waste_qty: line.waste_qty,
            sales_value: to_f64(sales),
            waste_value: to_f64(waste),
            difference: to_f64(diff),
        });
    }

    let payments_total = checked_total(&[cash, card, mobile], "payments")?;
    let net_sales = total_sales
        .checked_sub(checked_total(&[discounts, returns], "discounts")?)
        .ok_or_else(|| amount_too_large("net_sales"))?;
    let mismatch = payments_mismatch(payments_total, net_sales, policy.mismatch_tolerance);
    let top_products = top_products(&items);

    Ok(ReportDocument {
        date: date.to_string(),
        store: store.to_string(),
        region: header
            .region
            .clone()
            .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
        category: REPORT_CATEGORY_DAILY.to_string(),
        created_by: header.created_by.clone(),
        totals: ReportTotals {
            sales: to_f64(total_sales),
            waste: to_f64(total_waste),
            difference: to_f64(total_sales - total_waste),
            customers,
            avg_spend: average_spend(total_sales, customers).map(to_f64),
            net_sales: to_f64(net_sales),
        },
        payments: Payments {
            cash: to_f64(cash),
            card: to_f64(card),
            mobile: to_f64(mobile),
            total: to_f64(payments_total),
        },
        discounts: to_f64(discounts),
        returns: to_f64(returns),
        incident: draft
            .incident
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        items,
        supplies,
        top_products,
        payments_mismatch: mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftPayments;
    use crate::report::money::CENT;

    fn header() -> ReportHeader {
        ReportHeader {
            store: Some("Mitte".into()),
            region: Some("Berlin".into()),
            created_by: "u-store".into(),
        }
    }

    fn line(name: &str, price: f64, sold: i64, waste_qty: i64) -> DraftLine {
        DraftLine {
            item_id: None,
            name: Some(name.into()),
            category: Some("Test".into()),
            price: Some(price),
            sold,
            waste_qty,
        }
    }

    fn draft(items: Vec<DraftLine>) -> ReportDraft {
        ReportDraft {
            date: Some("2025-03-14".into()),
            items,
            ..Default::default()
        }
    }

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn test_line_values_scenario() {
        let doc = aggregate(&draft(vec![line("Cappuccino", 3.5, 10, 2)]), &header(), &ReportPolicy::default())
            .unwrap();
        let item = &doc.items[0];
        assert_eq!(item.sales_value, 35.0);
        assert_eq!(item.waste_value, 7.0);
        assert_eq!(item.difference, 28.0);
    }

    #[test]
    fn test_totals_are_sums_of_lines() {
        let doc = aggregate(
            &draft(vec![
                line("A", 2.5, 3, 1),
                line("B", 3.8, 7, 0),
                line("C", 0.1, 3, 2),
            ]),
            &header(),
            &ReportPolicy::default(),
        )
        .unwrap();
        let sales: f64 = doc.items.iter().map(|l| l.sales_value).sum();
        let waste: f64 = doc.items.iter().map(|l| l.waste_value).sum();
        assert!((doc.totals.sales - sales).abs() < 1e-9);
        assert!((doc.totals.waste - waste).abs() < 1e-9);
        assert_eq!(doc.totals.sales, 34.4);
        assert_eq!(doc.totals.difference, 31.7);
    }

    #[test]
    fn test_payment_scenario_flags_mismatch() {
        let mut d = draft(vec![line("Cold Brew", 4.2, 20, 0)]);
        d.payments = DraftPayments {
            cash: Some(50.0),
            card: Some(30.0),
            mobile: Some(0.0),
        };
        d.discounts = Some(5.0);
        d.returns = Some(0.0);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert_eq!(doc.totals.sales, 84.0);
        assert_eq!(doc.totals.net_sales, 79.0);
        assert_eq!(doc.payments.total, 80.0);
        assert!(doc.payments_mismatch);
    }

    #[test]
    fn test_mismatch_boundary() {
        let tolerance = ReportPolicy::default().mismatch_tolerance;
        assert!(!payments_mismatch(dec("80.01"), dec("80.00"), tolerance));
        assert!(payments_mismatch(dec("80.011"), dec("80.00"), tolerance));
        assert!(!payments_mismatch(dec("79.99"), dec("80.00"), tolerance));
        assert!(payments_mismatch(dec("79.989"), dec("80.00"), tolerance));
    }

    #[test]
    fn test_mismatch_boundary_through_f64_inputs() {
        let mut d = draft(vec![line("A", 10.0, 8, 0)]);
        d.payments.cash = Some(80.01);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert!(!doc.payments_mismatch);

        d.payments.cash = Some(80.011);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert!(doc.payments_mismatch);
    }

    #[test]
    fn test_missing_payment_fields_count_as_zero() {
        let mut d = draft(vec![line("A", 5.0, 2, 0)]);
        d.payments.card = Some(10.0);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert_eq!(doc.payments.cash, 0.0);
        assert_eq!(doc.payments.total, 10.0);
        assert!(!doc.payments_mismatch);
    }

    #[test]
    fn test_avg_spend() {
        assert_eq!(average_spend(dec("84"), Some(0)), None);
        assert_eq!(average_spend(dec("84"), None), None);
        assert_eq!(average_spend(dec("84"), Some(4)), Some(dec("21")));

        let mut d = draft(vec![line("A", 10.0, 1, 0)]);
        d.customers = Some(3);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert_eq!(doc.totals.avg_spend, Some(3.33));
        d.customers = Some(0);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        assert_eq!(doc.totals.avg_spend, None);
    }

    #[test]
    fn test_missing_date_is_validation_error() {
        let mut d = draft(vec![]);
        d.date = None;
        let err = aggregate(&d, &header(), &ReportPolicy::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportDateRequired);
        assert_eq!(err.message, "Please select a date.");

        d.date = Some("  ".into());
        assert!(aggregate(&d, &header(), &ReportPolicy::default()).is_err());

        d.date = Some("14/03/2025".into());
        let err = aggregate(&d, &header(), &ReportPolicy::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_missing_store_is_validation_error() {
        let mut h = header();
        h.store = None;
        let err = aggregate(&draft(vec![]), &h, &ReportPolicy::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportStoreRequired);
        assert_eq!(err.message, "Your account has no store assigned.");
    }

    #[test]
    fn test_rejects_negative_and_non_finite_values() {
        let policy = ReportPolicy::default();
        assert!(aggregate(&draft(vec![line("A", -1.0, 1, 0)]), &header(), &policy).is_err());
        assert!(aggregate(&draft(vec![line("A", f64::NAN, 1, 0)]), &header(), &policy).is_err());
        assert!(aggregate(&draft(vec![line("A", 1.0, -1, 0)]), &header(), &policy).is_err());

        let mut d = draft(vec![]);
        d.discounts = Some(f64::INFINITY);
        let err = aggregate(&d, &header(), &policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportInvalidAmount);
    }

    #[test]
    fn test_amounts_beyond_decimal_range_are_rejected() {
        let policy = ReportPolicy::default();

        // fits in Decimal, but price * sold does not
        let err = aggregate(&draft(vec![line("A", 5e28, 4, 0)]), &header(), &policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportInvalidAmount);

        let err = aggregate(&draft(vec![line("A", 1e30, 1, 0)]), &header(), &policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportInvalidAmount);
        assert_eq!(err.details.unwrap()["field"], "price");

        let err = aggregate(
            &draft(vec![line("A", 5e28, 1, 0), line("B", 5e28, 1, 0)]),
            &header(),
            &policy,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportInvalidAmount);

        let mut d = draft(vec![]);
        d.payments.cash = Some(5e28);
        d.payments.card = Some(5e28);
        let err = aggregate(&d, &header(), &policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportInvalidAmount);
    }

    #[test]
    fn test_unrepresentable_difference_is_mismatch() {
        assert!(payments_mismatch(Decimal::MAX, Decimal::MIN, CENT));
    }

    #[test]
    fn test_catalog_lines_fill_defaults() {
        let d = draft(vec![DraftLine {
            item_id: Some("k4".into()),
            sold: 2,
            ..Default::default()
        }]);
        let doc = aggregate(&d, &header(), &ReportPolicy::default()).unwrap();
        let item = &doc.items[0];
        assert_eq!(item.name, "Tiramisu");
        assert_eq!(item.category, "Cakes");
        assert_eq!(item.sales_value, 10.4);

        let unknown = draft(vec![DraftLine {
            item_id: Some("zz".into()),
            ..Default::default()
        }]);
        let err = aggregate(&unknown, &header(), &ReportPolicy::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportItemUnknown);
    }

    #[test]
    fn test_header_defaults_and_top_products() {
        let mut h = header();
        h.region = None;
        let doc = aggregate(
            &draft(vec![
                line("Latte", 3.8, 4, 0),
                line("Mocha", 4.0, 9, 0),
                line("BLT", 6.0, 4, 0),
                line("Tuna", 5.8, 0, 3),
            ]),
            &h,
            &ReportPolicy::default(),
        )
        .unwrap();
        assert_eq!(doc.region, "Unknown");
        assert_eq!(doc.category, "Daily");
        let names: Vec<_> = doc.top_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mocha", "BLT", "Latte"]);
    }
}
