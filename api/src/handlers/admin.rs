//! Admin handlers

use axum::{extract::State, Json};

use crate::app::ReloadSummary;
use crate::error::AppError;
use crate::AppState;

/// POST /admin/reload
///
/// Re-reads the snapshot and swaps the datasets. On failure the previous
/// datasets keep being served.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadSummary>, AppError> {
    let summary = state.dataset_service.reload().await.map_err(|e| {
        tracing::warn!(error = %e, "Reload failed, keeping previous datasets");
        e
    })?;

    Ok(Json(summary))
}
