//! Daily Report Repository
//!
//! Reports are written once (header row + line items in one transaction) and
//! never updated. Head-office queries work on [`ReportSummary`] rows.

use std::collections::BTreeMap;

use super::{RepoError, RepoResult};
use shared::models::{
    DailyReport, Payments, ReportDocument, ReportFilter, ReportLine, ReportSummary, ReportTotals,
    TopProduct,
};
use shared::util::snowflake_id;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SUMMARY_COLUMNS: &str =
    "id, date, store, region, created_by, created_at, sales, waste, net_sales, payments_mismatch";

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: i64,
    date: String,
    store: String,
    region: String,
    category: String,
    created_by: String,
    created_at: i64,
    sales: f64,
    waste: f64,
    difference: f64,
    customers: Option<i64>,
    avg_spend: Option<f64>,
    net_sales: f64,
    cash: f64,
    card: f64,
    mobile: f64,
    payments_total: f64,
    discounts: f64,
    returns: f64,
    incident: String,
    supplies: String,
    top_products: String,
    payments_mismatch: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    item_id: Option<String>,
    name: String,
    category: String,
    price: f64,
    sold: i64,
    waste_qty: i64,
    sales_value: f64,
    waste_value: f64,
    difference: f64,
}

fn count(value: i64, what: &str) -> RepoResult<u32> {
    u32::try_from(value).map_err(|_| RepoError::Database(format!("Stored {what} out of range: {value}")))
}

impl TryFrom<ItemRow> for ReportLine {
    type Error = RepoError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(ReportLine {
            item_id: row.item_id,
            name: row.name,
            category: row.category,
            price: row.price,
            sold: count(row.sold, "sold")?,
            waste_qty: count(row.waste_qty, "waste_qty")?,
            sales_value: row.sales_value,
            waste_value: row.waste_value,
            difference: row.difference,
        })
    }
}

impl ReportRow {
    fn into_report(self, items: Vec<ReportLine>) -> RepoResult<DailyReport> {
        let supplies: BTreeMap<String, u32> = serde_json::from_str(&self.supplies)?;
        let top_products: Vec<TopProduct> = serde_json::from_str(&self.top_products)?;
        let customers = self.customers.map(|c| count(c, "customers")).transpose()?;
        Ok(DailyReport {
            id: self.id,
            created_at: self.created_at,
            document: ReportDocument {
                date: self.date,
                store: self.store,
                region: self.region,
                category: self.category,
                created_by: self.created_by,
                totals: ReportTotals {
                    sales: self.sales,
                    waste: self.waste,
                    difference: self.difference,
                    customers,
                    avg_spend: self.avg_spend,
                    net_sales: self.net_sales,
                },
                payments: Payments {
                    cash: self.cash,
                    card: self.card,
                    mobile: self.mobile,
                    total: self.payments_total,
                },
                discounts: self.discounts,
                returns: self.returns,
                incident: self.incident,
                items,
                supplies,
                top_products,
                payments_mismatch: self.payments_mismatch,
            },
        })
    }
}

/// Persist a computed report document
pub async fn create(pool: &SqlitePool, document: ReportDocument, now: i64) -> RepoResult<DailyReport> {
    let id = snowflake_id();
    let supplies = serde_json::to_string(&document.supplies)?;
    let top_products = serde_json::to_string(&document.top_products)?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO reports (id, date, store, region, category, created_by, created_at, \
         sales, waste, difference, customers, avg_spend, net_sales, cash, card, mobile, \
         payments_total, discounts, returns, incident, supplies, top_products, payments_mismatch) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&document.date)
    .bind(&document.store)
    .bind(&document.region)
    .bind(&document.category)
    .bind(&document.created_by)
    .bind(now)
    .bind(document.totals.sales)
    .bind(document.totals.waste)
    .bind(document.totals.difference)
    .bind(document.totals.customers.map(i64::from))
    .bind(document.totals.avg_spend)
    .bind(document.totals.net_sales)
    .bind(document.payments.cash)
    .bind(document.payments.card)
    .bind(document.payments.mobile)
    .bind(document.payments.total)
    .bind(document.discounts)
    .bind(document.returns)
    .bind(&document.incident)
    .bind(supplies)
    .bind(top_products)
    .bind(document.payments_mismatch)
    .execute(&mut *tx)
    .await?;

    for (position, line) in document.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO report_items (report_id, position, item_id, name, category, price, \
             sold, waste_qty, sales_value, waste_value, difference) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(&line.item_id)
        .bind(&line.name)
        .bind(&line.category)
        .bind(line.price)
        .bind(i64::from(line.sold))
        .bind(i64::from(line.waste_qty))
        .bind(line.sales_value)
        .bind(line.waste_value)
        .bind(line.difference)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(DailyReport {
        id,
        created_at: now,
        document,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DailyReport>> {
    let Some(row) = sqlx::query_as::<_, ReportRow>("SELECT * FROM reports WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, ItemRow>(
        "SELECT item_id, name, category, price, sold, waste_qty, sales_value, waste_value, difference \
         FROM report_items WHERE report_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(ReportLine::try_from)
    .collect::<RepoResult<Vec<_>>>()?;

    row.into_report(items).map(Some)
}

pub async fn find_summary(pool: &SqlitePool, id: i64) -> RepoResult<Option<ReportSummary>> {
    let summary = sqlx::query_as::<_, ReportSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM reports WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(summary)
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a ReportFilter) {
    qb.push(" WHERE 1 = 1");
    let non_empty = |v: &'a Option<String>| v.as_deref().filter(|s| !s.trim().is_empty());
    if let Some(store) = non_empty(&filter.store) {
        qb.push(" AND store = ").push_bind(store);
    }
    if let Some(region) = non_empty(&filter.region) {
        qb.push(" AND region = ").push_bind(region);
    }
    if let Some(from) = non_empty(&filter.from) {
        qb.push(" AND date >= ").push_bind(from);
    }
    if let Some(to) = non_empty(&filter.to) {
        qb.push(" AND date <= ").push_bind(to);
    }
}

/// Summaries matching the filter, newest business date first
pub async fn find_summaries(pool: &SqlitePool, filter: &ReportFilter) -> RepoResult<Vec<ReportSummary>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {SUMMARY_COLUMNS} FROM reports"));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY date DESC, created_at DESC");
    let summaries = qb.build_query_as::<ReportSummary>().fetch_all(pool).await?;
    Ok(summaries)
}

/// Reports submitted by one account, newest first
pub async fn find_by_creator(pool: &SqlitePool, uid: &str) -> RepoResult<Vec<ReportSummary>> {
    let summaries = sqlx::query_as::<_, ReportSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM reports WHERE created_by = ? ORDER BY date DESC, created_at DESC"
    ))
    .bind(uid)
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}

/// `top_products` lists of every report matching the filter
pub async fn find_top_products(
    pool: &SqlitePool,
    filter: &ReportFilter,
) -> RepoResult<Vec<Vec<TopProduct>>> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT top_products FROM reports");
    push_filter(&mut qb, filter);
    let raw: Vec<String> = qb.build_query_scalar::<String>().fetch_all(pool).await?;
    raw.iter()
        .map(|json| serde_json::from_str(json).map_err(RepoError::from))
        .collect()
}

/// Delete a report and its line items
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM report_items WHERE report_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM reports WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
