//! Unified error types for the sales dashboard
//!
//! This module defines error types for each layer:
//! - `DomainError`: Snapshot loading and analytics errors
//! - `ReportError`: SQL report catalog errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),
}

/// SQL report catalog errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    #[error("SQL not found for {id}. Tried:\n{}", format_candidates(.candidates))]
    SqlNotFound { id: String, candidates: Vec<PathBuf> },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report {id} failed: {message}")]
    Execution { id: String, message: String },
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Report(e) => match e {
                ReportError::UnknownReport(id) => {
                    (StatusCode::NOT_FOUND, "Unknown report", Some(id.clone()))
                }
                ReportError::SqlNotFound { id, .. } => {
                    tracing::warn!("Report error: {}", e);
                    (StatusCode::NOT_FOUND, "Report SQL not found", Some(id.clone()))
                }
                ReportError::Execution { .. } => {
                    tracing::error!("Report error: {}", e);
                    (StatusCode::BAD_GATEWAY, "Report failed", Some(e.to_string()))
                }
                _ => {
                    tracing::error!("Report error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Report unavailable",
                        None,
                    )
                }
            },
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
