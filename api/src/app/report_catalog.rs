//! SQL report catalog
//!
//! Versioned SQL reports grouped by area (analytical, diagnostic, predictive).
//! A report's text is looked up on disk first so analysts can edit it without
//! a rebuild; the copy compiled into the binary is the fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::ports::{ReportRunner, ReportTable};
use crate::error::ReportError;

/// Report areas, also the first path segment of every report id
pub const AREAS: [&str; 3] = ["analytical", "diagnostic", "predictive"];

/// A value bound to a report's `?` placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportParam {
    /// Configured minimum co-occurrence count for cross-sell pairs
    MinCooccurrence,
}

/// A catalogued SQL report
#[derive(Debug, Clone, Serialize)]
pub struct ReportDefinition {
    /// `area/name`
    pub id: &'static str,
    pub area: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    /// Dataset fed by the typed version of this report
    pub dataset: &'static str,
    /// Placeholders in the SQL, in binding order
    pub params: &'static [ReportParam],
    #[serde(skip)]
    builtin_sql: &'static str,
}

macro_rules! report {
    ($area:literal, $name:literal, $title:literal, $dataset:literal) => {
        report!($area, $name, $title, $dataset, [])
    };
    ($area:literal, $name:literal, $title:literal, $dataset:literal, [$($param:expr),*]) => {
        ReportDefinition {
            id: concat!($area, "/", $name),
            area: $area,
            name: $name,
            title: $title,
            dataset: $dataset,
            params: &[$($param),*],
            builtin_sql: include_str!(concat!("../../queries/", $area, "/", $name, ".sql")),
        }
    };
}

pub static REPORTS: [ReportDefinition; 13] = [
    report!(
        "analytical",
        "01_sales_by_country_vs_region",
        "Sales by country vs region",
        "regions"
    ),
    report!(
        "analytical",
        "02_products_deep_agg",
        "Product deep aggregation",
        "products"
    ),
    report!(
        "analytical",
        "03_customer_deep_agg_phase2",
        "Customer deep aggregation",
        "customers"
    ),
    report!(
        "analytical",
        "04_salesrep_performance_deep_agg",
        "Sales rep performance",
        "salesreps"
    ),
    report!(
        "analytical",
        "06_top_bottom_product_by_productline",
        "Top and bottom product per line",
        "top_bottom"
    ),
    report!(
        "diagnostic",
        "01_geographic_credit_anomalies",
        "Geographic credit anomalies",
        "geo_anomalies"
    ),
    report!(
        "diagnostic",
        "03_credit_vs_sales_misalignment_ratio",
        "Credit vs sales misalignment",
        "misalignment"
    ),
    report!(
        "diagnostic",
        "04_high_risk_customers_ratio",
        "High-risk customers",
        "high_risk"
    ),
    report!(
        "predictive",
        "01_company_monthly_timeseries",
        "Company monthly time series",
        "monthly"
    ),
    report!(
        "predictive",
        "05_product_demand_trend_flag",
        "Product demand trend",
        "product_trends"
    ),
    report!(
        "predictive",
        "06_customer_rfm_score",
        "Customer RFM score",
        "customer_rfm"
    ),
    report!(
        "predictive",
        "07_customer_next_order_prediction",
        "Next order prediction",
        "next_orders"
    ),
    report!(
        "predictive",
        "08_product_cross_sell_pairs",
        "Product cross-sell pairs",
        "cross_sell",
        [ReportParam::MinCooccurrence]
    ),
];

/// Split and validate an `area/name` id (an optional `.sql` suffix is ignored)
pub fn parse_report_id(id: &str) -> Result<(&str, &str), ReportError> {
    let unknown = || ReportError::UnknownReport(id.to_string());

    let (area, name) = id.trim_matches('/').split_once('/').ok_or_else(unknown)?;
    let name = name.strip_suffix(".sql").unwrap_or(name);

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !AREAS.contains(&area) || !valid_name {
        return Err(unknown());
    }
    Ok((area, name))
}

/// Paths tried, in order, for a report's SQL text
pub fn candidate_paths(queries_dir: &Path, area: &str, name: &str) -> Vec<PathBuf> {
    let area_dir = queries_dir.join(area);
    vec![
        area_dir.join(".sql").join(format!("{}.sql", name)),
        area_dir.join(".sql").join(name),
        area_dir.join(format!("{}.sql", name)),
        area_dir.join(name),
    ]
}

/// Where a report's SQL text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlSource {
    File(PathBuf),
    Builtin,
}

pub struct ReportCatalog<R: ReportRunner> {
    queries_dir: PathBuf,
    runner: Arc<R>,
    min_cooccurrence: u32,
}

impl<R: ReportRunner> ReportCatalog<R> {
    pub fn new(queries_dir: impl Into<PathBuf>, runner: Arc<R>, min_cooccurrence: u32) -> Self {
        Self {
            queries_dir: queries_dir.into(),
            runner,
            min_cooccurrence,
        }
    }

    pub fn reports(&self) -> &'static [ReportDefinition] {
        &REPORTS
    }

    pub fn find(&self, id: &str) -> Option<&'static ReportDefinition> {
        REPORTS.iter().find(|r| r.id == id)
    }

    /// Load the SQL text for `id`
    pub async fn load_sql(&self, id: &str) -> Result<(String, SqlSource), ReportError> {
        let (area, name) = parse_report_id(id)?;
        let candidates = candidate_paths(&self.queries_dir, area, name);

        for path in &candidates {
            if tokio::fs::metadata(path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)
            {
                let sql = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ReportError::Io {
                        path: path.clone(),
                        source,
                    })?;
                return Ok((sql, SqlSource::File(path.clone())));
            }
        }

        let report_id = format!("{}/{}", area, name);
        match self.find(&report_id) {
            Some(report) => Ok((report.builtin_sql.to_string(), SqlSource::Builtin)),
            None => Err(ReportError::SqlNotFound {
                id: report_id,
                candidates,
            }),
        }
    }

    /// Values for a report's placeholders; uncatalogued reports take none
    pub fn bind_params(&self, report_id: &str) -> Vec<i64> {
        self.find(report_id)
            .map(|report| {
                report
                    .params
                    .iter()
                    .map(|param| match param {
                        ReportParam::MinCooccurrence => i64::from(self.min_cooccurrence),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve and execute a report
    pub async fn run(&self, id: &str) -> Result<ReportTable, ReportError> {
        let (sql, source) = self.load_sql(id).await?;
        let (area, name) = parse_report_id(id)?;
        let report_id = format!("{}/{}", area, name);
        let params = self.bind_params(&report_id);

        tracing::debug!(report = %report_id, source = ?source, "Running SQL report");
        self.runner.run(&report_id, &sql, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockReportRunner;

    fn temp_queries_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "salesdash-queries-{}-{}",
            label,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn catalog_has_thirteen_unique_reports() {
        let mut ids: Vec<_> = REPORTS.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 13);
        assert!(REPORTS.iter().all(|r| !r.builtin_sql.trim().is_empty()));
        assert!(REPORTS.iter().all(|r| AREAS.contains(&r.area)));
    }

    #[test]
    fn parse_ids() {
        assert_eq!(
            parse_report_id("predictive/06_customer_rfm_score.sql").unwrap(),
            ("predictive", "06_customer_rfm_score")
        );
        assert!(matches!(
            parse_report_id("descriptive/x"),
            Err(ReportError::UnknownReport(_))
        ));
        assert!(parse_report_id("analytical/../secrets").is_err());
        assert!(parse_report_id("analytical").is_err());
    }

    #[test]
    fn candidates_in_lookup_order() {
        let paths = candidate_paths(Path::new("/q"), "analytical", "02_products_deep_agg");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/q/analytical/.sql/02_products_deep_agg.sql"),
                PathBuf::from("/q/analytical/.sql/02_products_deep_agg"),
                PathBuf::from("/q/analytical/02_products_deep_agg.sql"),
                PathBuf::from("/q/analytical/02_products_deep_agg"),
            ]
        );
    }

    #[tokio::test]
    async fn falls_back_to_builtin_sql() {
        let catalog = ReportCatalog::new(
            "/nonexistent/queries",
            Arc::new(MockReportRunner::new()),
            5,
        );

        let (sql, source) = catalog
            .load_sql("analytical/02_products_deep_agg")
            .await
            .unwrap();
        assert_eq!(source, SqlSource::Builtin);
        assert!(sql.contains("abc_class"));
    }

    #[tokio::test]
    async fn hidden_sql_dir_wins_over_plain_file() {
        let dir = temp_queries_dir("hidden");
        std::fs::create_dir_all(dir.join("diagnostic/.sql")).unwrap();
        std::fs::write(dir.join("diagnostic/.sql/01_geographic_credit_anomalies.sql"), "SELECT 1").unwrap();
        std::fs::write(dir.join("diagnostic/01_geographic_credit_anomalies.sql"), "SELECT 2").unwrap();

        let catalog = ReportCatalog::new(&dir, Arc::new(MockReportRunner::new()), 5);
        let (sql, source) = catalog
            .load_sql("diagnostic/01_geographic_credit_anomalies")
            .await
            .unwrap();

        assert_eq!(sql, "SELECT 1");
        assert_eq!(
            source,
            SqlSource::File(dir.join("diagnostic/.sql/01_geographic_credit_anomalies.sql"))
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn uncatalogued_file_on_disk_is_runnable() {
        let dir = temp_queries_dir("adhoc");
        std::fs::create_dir_all(dir.join("predictive")).unwrap();
        std::fs::write(dir.join("predictive/99_scratch"), "SELECT 42 AS answer").unwrap();

        let runner = Arc::new(MockReportRunner::new());
        let catalog = ReportCatalog::new(&dir, runner.clone(), 5);
        let table = catalog.run("predictive/99_scratch").await.unwrap();

        assert_eq!(table.id, "predictive/99_scratch");
        assert_eq!(runner.executed.read().unwrap()[0].1, "SELECT 42 AS answer");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_report_lists_candidates() {
        let catalog = ReportCatalog::new(
            "/nonexistent/queries",
            Arc::new(MockReportRunner::new()),
            5,
        );

        match catalog.load_sql("predictive/99_missing").await {
            Err(ReportError::SqlNotFound { id, candidates }) => {
                assert_eq!(id, "predictive/99_missing");
                assert_eq!(candidates.len(), 4);
            }
            other => panic!("Expected SqlNotFound, got {:?}", other.map(|(_, s)| s)),
        }
    }

    #[tokio::test]
    async fn run_passes_sql_to_runner() {
        let runner = Arc::new(MockReportRunner::new());
        let catalog = ReportCatalog::new("/nonexistent/queries", runner.clone(), 5);

        catalog
            .run("predictive/08_product_cross_sell_pairs.sql")
            .await
            .unwrap();

        assert_eq!(
            runner.executed_ids(),
            vec!["predictive/08_product_cross_sell_pairs"]
        );
    }

    #[tokio::test]
    async fn cross_sell_binds_configured_minimum() {
        let runner = Arc::new(MockReportRunner::new());
        let catalog = ReportCatalog::new("/nonexistent/queries", runner.clone(), 2);

        catalog
            .run("predictive/08_product_cross_sell_pairs")
            .await
            .unwrap();
        catalog
            .run("analytical/02_products_deep_agg")
            .await
            .unwrap();

        let executed = runner.executed.read().unwrap();
        assert!(executed[0].1.contains("HAVING COUNT(*) >= ?"));
        assert_eq!(executed[0].2, vec![2]);
        assert!(executed[1].2.is_empty());
    }

    #[test]
    fn placeholders_match_declared_params() {
        for report in REPORTS.iter() {
            let placeholders = report.builtin_sql.matches('?').count();
            assert_eq!(placeholders, report.params.len(), "{}", report.id);
        }
    }

    #[tokio::test]
    async fn canned_table_is_returned() {
        let row = serde_json::json!({"sales_month": "2003-01", "total_sales": 10.5});
        let canned = ReportTable::from_rows(
            "predictive/01_company_monthly_timeseries",
            vec![row.as_object().unwrap().clone()],
        );
        let catalog = ReportCatalog::new(
            "/nonexistent/queries",
            Arc::new(MockReportRunner::new().with_table(canned)),
            5,
        );

        let table = catalog
            .run("predictive/01_company_monthly_timeseries")
            .await
            .unwrap();
        assert_eq!(table.columns, vec!["sales_month", "total_sales"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[tokio::test]
    async fn runner_failure_surfaces_as_bad_gateway() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let catalog = ReportCatalog::new(
            "/nonexistent/queries",
            Arc::new(MockReportRunner::failing()),
            5,
        );

        let err = catalog
            .run("diagnostic/04_high_risk_customers_ratio")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Execution { ref id, .. } if id == "diagnostic/04_high_risk_customers_ratio"
        ));

        let response = crate::error::AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
