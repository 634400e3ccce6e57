//! Reconciliation handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use validator::Validate;

use domain_reconciliation::ReportSide;

use crate::auth::{self, permissions, Claims};
use crate::dto::reconciliation::*;
use crate::{error::ApiError, AppState};

/// Reconciles the two reports in the request body without touching server state
pub async fn reconcile_reports(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    auth::require(&claims, permissions::RECON_READ)?;
    request.validate()?;

    let report = state
        .reconciliation
        .compute_detached(request.report_a, request.report_b)
        .await?;

    Ok(Json(ReportResponse::new(&report, report.iter())))
}

/// Replaces Report A or Report B and recomputes the current report
pub async fn replace_source(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(side): Path<String>,
    Json(request): Json<ReplaceSourceRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    auth::require(&claims, permissions::RECON_WRITE)?;
    request.validate()?;

    let side: ReportSide = side
        .parse()
        .map_err(|_| ApiError::NotFound(format!("No claim source named '{side}'")))?;

    let report = state.reconciliation.replace_source(side, request.claims).await?;

    Ok(Json(SummaryResponse::from_report(&report)))
}

/// Lists rows of the current report, optionally filtered
pub async fn list_records(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    auth::require(&claims, permissions::RECON_READ)?;
    let filter = query.into_filter()?;

    let report = state.reconciliation.current().await;
    let rows = filter.apply(&report);

    Ok(Json(ReportResponse::new(&report, rows)))
}

/// Summary of the current report
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SummaryResponse>, ApiError> {
    auth::require(&claims, permissions::RECON_READ)?;

    let report = state.reconciliation.current().await;
    Ok(Json(SummaryResponse::from_report(&report)))
}

/// A single row of the current report
pub async fn get_record(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(claim_id): Path<String>,
) -> Result<Json<ReconciledRowResponse>, ApiError> {
    auth::require(&claims, permissions::RECON_READ)?;

    let report = state.reconciliation.current().await;
    report
        .get(&claim_id)
        .map(|record| Json(ReconciledRowResponse::from(record)))
        .ok_or_else(|| ApiError::NotFound(format!("Claim {claim_id} is not in the current report")))
}
