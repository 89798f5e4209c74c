//! SQL report handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::ReportDefinition;
use crate::domain::ports::ReportTable;
use crate::error::AppError;
use crate::AppState;

/// GET /api/reports
pub async fn list_reports(State(state): State<AppState>) -> Json<&'static [ReportDefinition]> {
    Json(state.report_catalog.reports())
}

/// GET /api/reports/:area/:name
///
/// Runs the report against the snapshot. The on-disk copy under
/// `QUERIES_DIR` wins over the built-in one.
pub async fn run_report(
    State(state): State<AppState>,
    Path((area, name)): Path<(String, String)>,
) -> Result<Json<ReportTable>, AppError> {
    let id = format!("{}/{}", area, name);
    let table = state.report_catalog.run(&id).await?;

    tracing::info!(report = %table.id, rows = table.rows.len(), "Report served");
    Ok(Json(table))
}
