//! Daily Report Handlers
//!
//! Header fields (store, region, submitter) always come from the session,
//! never from the submitted form.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::MessageResponse;
use shared::models::{
    DailyReport, ReportDocument, ReportDraft, ReportFilter, ReportHeader, ReportSummary,
    TopProduct,
};
use shared::report::{self, Catalog, WasteRank};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::Session;
use crate::core::ServerState;
use crate::db::repository::report as report_repo;
use crate::security_log;

fn report_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ReportNotFound).with_detail("id", id)
}

fn header_for(session: &Session) -> ReportHeader {
    let profile = session.profile();
    ReportHeader {
        store: profile.store.clone(),
        region: profile.region.clone(),
        created_by: profile.uid.clone(),
    }
}

/// Menu items and supply keys offered by the report form
pub async fn catalog() -> Json<Catalog> {
    Json(report::catalog())
}

/// Compute the report without storing it
pub async fn preview(
    State(state): State<ServerState>,
    session: Session,
    Json(draft): Json<ReportDraft>,
) -> AppResult<Json<ReportDocument>> {
    let document = report::aggregate(&draft, &header_for(&session), &state.config.report_policy)?;
    Ok(Json(document))
}

/// Submit a daily report
pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Json(draft): Json<ReportDraft>,
) -> AppResult<(StatusCode, Json<DailyReport>)> {
    let document = report::aggregate(&draft, &header_for(&session), &state.config.report_policy)?;
    let mismatch = document.payments_mismatch;
    let created = report_repo::create(state.pool(), document, now_millis()).await?;

    tracing::info!(
        id = created.id,
        store = %created.document.store,
        date = %created.document.date,
        payments_mismatch = mismatch,
        "Daily report submitted"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Reports submitted by the caller
pub async fn mine(
    State(state): State<ServerState>,
    session: Session,
) -> AppResult<Json<Vec<ReportSummary>>> {
    Ok(Json(report_repo::find_by_creator(state.pool(), session.uid()).await?))
}

/// Head-office report list
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Vec<ReportSummary>>> {
    Ok(Json(report_repo::find_summaries(state.pool(), &filter).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DailyReport>> {
    let found = report_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| report_not_found(id))?;
    Ok(Json(found))
}

/// Delete a report. Head office may delete any; others only their own.
pub async fn delete(
    State(state): State<ServerState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let summary = report_repo::find_summary(state.pool(), id)
        .await?
        .ok_or_else(|| report_not_found(id))?;

    if !session.profile().is_honbu() && summary.created_by != session.uid() {
        security_log!(
            "WARN",
            "permission_denied",
            uid = session.uid().to_string(),
            report_id = id
        );
        return Err(AppError::permission_denied("Only the submitter or head office may delete this report"));
    }

    report_repo::delete(state.pool(), id).await?;
    tracing::info!(id, by = %session.uid(), "Daily report deleted");
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}

/// Reports with the highest waste rate
pub async fn waste_ranking(
    State(state): State<ServerState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Vec<WasteRank>>> {
    let summaries = report_repo::find_summaries(state.pool(), &filter).await?;
    let limit = state.config.report_policy.ranking_limit;
    Ok(Json(report::waste_ranking(&summaries, limit)))
}

/// Best-selling products across reports
pub async fn product_ranking(
    State(state): State<ServerState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Vec<TopProduct>>> {
    let lists = report_repo::find_top_products(state.pool(), &filter).await?;
    let limit = state.config.report_policy.ranking_limit;
    Ok(Json(report::product_ranking(
        lists.iter().map(Vec::as_slice),
        limit,
    )))
}
