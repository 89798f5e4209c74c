//! SQLite adapter for ReportRunner

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, QueryResult, Statement};
use serde_json::{Map, Number, Value};

use crate::domain::ports::{ReportRunner, ReportTable};
use crate::error::ReportError;

/// Executes report SQL on the snapshot connection
pub struct SqliteReportRunner {
    db: DatabaseConnection,
}

impl SqliteReportRunner {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Decode one cell by its runtime storage class.
///
/// Expression columns (SUM, ROUND, window functions) carry no declared type,
/// so each cell is tried as integer, then real, then text.
fn cell_value(row: &QueryResult, idx: usize) -> Value {
    if let Ok(value) = row.try_get_by_index::<Option<i64>>(idx) {
        return value.map_or(Value::Null, Value::from);
    }
    if let Ok(value) = row.try_get_by_index::<Option<f64>>(idx) {
        return value
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number);
    }
    if let Ok(value) = row.try_get_by_index::<Option<String>>(idx) {
        return value.map_or(Value::Null, Value::String);
    }
    Value::Null
}

fn row_to_map(row: &QueryResult) -> Map<String, Value> {
    row.column_names()
        .into_iter()
        .enumerate()
        .map(|(idx, name)| (name, cell_value(row, idx)))
        .collect()
}

#[async_trait]
impl ReportRunner for SqliteReportRunner {
    async fn run(&self, id: &str, sql: &str, params: &[i64]) -> Result<ReportTable, ReportError> {
        let started = std::time::Instant::now();

        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            sql,
            params.iter().map(|p| sea_orm::Value::from(*p)),
        );
        let results = self
            .db
            .query_all(stmt)
            .await
            .map_err(|e| ReportError::Execution {
                id: id.to_string(),
                message: e.to_string(),
            })?;

        let rows = results.iter().map(row_to_map).collect::<Vec<_>>();

        tracing::debug!(
            report = id,
            rows = rows.len(),
            params = ?params,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report executed"
        );

        Ok(ReportTable::from_rows(id, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded_db;
    use serde_json::json;

    #[tokio::test]
    async fn returns_rows_with_column_order() {
        let runner = SqliteReportRunner::new(seeded_db().await);
        let table = runner
            .run(
                "adhoc/customers",
                "SELECT customerNumber AS customer_number, customerName AS customer_name \
                 FROM customers ORDER BY customerNumber",
                &[],
            )
            .await
            .unwrap();

        assert_eq!(table.id, "adhoc/customers");
        assert_eq!(table.columns, vec!["customer_number", "customer_name"]);
        assert!(!table.rows.is_empty());
    }

    #[tokio::test]
    async fn expression_columns_are_kept() {
        let runner = SqliteReportRunner::new(seeded_db().await);
        let table = runner
            .run(
                "adhoc/expressions",
                "SELECT o.customerNumber AS customer_number, \
                        COUNT(*) AS line_count, \
                        SUM(od.quantityOrdered) AS quantity, \
                        ROUND(SUM(od.quantityOrdered * od.priceEach), 2) AS sales, \
                        NTILE(2) OVER (ORDER BY o.customerNumber) AS half, \
                        NULL AS nothing, \
                        'x' || o.customerNumber AS label \
                 FROM orders o \
                 JOIN orderdetails od ON od.orderNumber = o.orderNumber \
                 WHERE o.customerNumber = 103 \
                 GROUP BY o.customerNumber",
                &[],
            )
            .await
            .unwrap();

        assert_eq!(
            table.columns,
            vec![
                "customer_number",
                "line_count",
                "quantity",
                "sales",
                "half",
                "nothing",
                "label"
            ]
        );
        let row = &table.rows[0];
        assert_eq!(row["customer_number"], json!(103));
        assert!(row["line_count"].as_i64().unwrap() > 0);
        assert!(row["quantity"].as_i64().unwrap() > 0);
        assert!(row["sales"].as_f64().unwrap() > 0.0);
        assert_eq!(row["half"], json!(1));
        assert_eq!(row["nothing"], Value::Null);
        assert_eq!(row["label"], json!("x103"));
    }

    #[tokio::test]
    async fn binds_positional_params() {
        let runner = SqliteReportRunner::new(seeded_db().await);
        let table = runner
            .run(
                "adhoc/params",
                "SELECT customerNumber AS customer_number FROM customers \
                 WHERE customerNumber >= ? AND customerNumber <= ? ORDER BY customerNumber",
                &[112, 119],
            )
            .await
            .unwrap();

        let numbers: Vec<_> = table
            .rows
            .iter()
            .map(|r| r["customer_number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![112, 119]);
    }

    #[tokio::test]
    async fn bad_sql_is_an_execution_error() {
        let runner = SqliteReportRunner::new(seeded_db().await);
        let result = runner
            .run("adhoc/broken", "SELECT * FROM no_such_table", &[])
            .await;

        match result {
            Err(ReportError::Execution { id, .. }) => assert_eq!(id, "adhoc/broken"),
            other => panic!("expected execution error, got {:?}", other),
        }
    }
}
