//! Dataset handlers
//!
//! Raw JSON of the in-memory datasets the pages are built from.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::app::DATASET_NAMES;
use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct DatasetInfo {
    pub name: &'static str,
    pub rows: usize,
}

#[derive(Serialize)]
pub struct DatasetIndex {
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub datasets: Vec<DatasetInfo>,
}

/// GET /api/datasets
pub async fn list_datasets(State(state): State<AppState>) -> Json<DatasetIndex> {
    let loaded = state.dataset_service.current().await;

    let datasets = DATASET_NAMES
        .iter()
        .map(|&name| DatasetInfo {
            name,
            rows: loaded.datasets.row_count(name).unwrap_or(0),
        })
        .collect();

    Json(DatasetIndex {
        fingerprint: loaded.fingerprint.clone(),
        loaded_at: loaded.loaded_at,
        datasets,
    })
}

/// GET /api/datasets/:name
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let loaded = state.dataset_service.current().await;

    let value = loaded
        .datasets
        .to_json(&name)
        .ok_or_else(|| AppError::NotFound(format!("dataset {}", name)))?
        .map_err(|e| AppError::Internal(format!("Failed to serialize {}: {}", name, e)))?;

    Ok(Json(value))
}
