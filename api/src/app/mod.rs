//! Application layer
//!
//! Report library, dataset loading and the SQL report catalog.
//! Services coordinate between domain entities and ports.

pub mod analytics;
pub mod analytics_config;
pub mod dataset_service;
pub mod report_catalog;

pub use dataset_service::{DatasetService, ReloadSummary, DATASET_NAMES};
pub use report_catalog::{ReportCatalog, ReportDefinition};
