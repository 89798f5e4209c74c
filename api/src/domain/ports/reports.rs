//! Report execution port
//!
//! Runs catalog SQL text against the snapshot and returns generic rows.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ReportError;

/// Result of one SQL report, column order preserved
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportTable {
    pub id: String,
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl ReportTable {
    /// Build a table from JSON objects, taking the columns from the first row
    pub fn from_rows(id: impl Into<String>, rows: Vec<Map<String, Value>>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            id: id.into(),
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
pub trait ReportRunner: Send + Sync {
    /// Execute `sql` for the report `id`, binding `params` to its `?` placeholders in order
    async fn run(&self, id: &str, sql: &str, params: &[i64]) -> Result<ReportTable, ReportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_follow_first_row_order() {
        let row = json!({"sales_month": "2004-01", "total_sales": 10.5, "total_orders": 3});
        let table = ReportTable::from_rows("predictive/01", vec![row.as_object().unwrap().clone()]);

        assert_eq!(
            table.columns,
            vec!["sales_month", "total_sales", "total_orders"]
        );
        assert!(!table.is_empty());
    }

    #[test]
    fn empty_rows_have_no_columns() {
        let table = ReportTable::from_rows("x/y", Vec::new());
        assert!(table.columns.is_empty());
        assert!(table.is_empty());
    }
}
