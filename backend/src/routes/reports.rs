use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use http::header;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ReportQuery, ReportResponse};
use crate::services::csv_export_service::{self, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
use crate::services::report_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_report))
        .route("/export", get(export_report))
}

pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    info!("GET /reports - Building deal report");
    let criteria = params.into_criteria()?;
    let result = report_service::build_report(state.store.as_ref(), &criteria)
        .await
        .map_err(|e| {
            error!("Failed to build report: {}", e);
            e
        })?;
    Ok(Json(ReportResponse { criteria, result }))
}

pub async fn export_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    info!("GET /reports/export - Exporting deals as CSV");
    let criteria = params.into_criteria()?;
    let body = csv_export_service::export_report(state.store.as_ref(), &criteria)
        .await
        .map_err(|e| {
            error!("Failed to export deals: {}", e);
            e
        })?;

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
