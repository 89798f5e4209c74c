//! Dataset service
//!
//! Loads the snapshot once, runs every report over it and keeps the results
//! in memory. Pages read the current datasets; a reload swaps them whole.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::app::analytics;
use crate::domain::entities::{
    ContextBanner, CountryRisk, CreditMisalignment, CrossSellPair, CustomerRfm, CustomerSummary,
    DataQuality, DiagnosticSummary, GeoCreditAnomaly, HighRiskCustomer, KpiCards, MonthlyKpi,
    NextOrderPrediction, ProductDemandTrend, ProductSummary, RegionCountrySales, SalesLine,
    SalesRepSummary, SalesSnapshot, TopBottomProduct,
};
use crate::domain::ports::SalesRepository;
use crate::error::DomainError;

/// Names accepted by [`Datasets::to_json`], in display order
pub const DATASET_NAMES: [&str; 19] = [
    "base",
    "monthly",
    "customers",
    "products",
    "regions",
    "salesreps",
    "top_bottom",
    "high_risk",
    "misalignment",
    "geo_anomalies",
    "product_trends",
    "customer_rfm",
    "next_orders",
    "cross_sell",
    "kpi_cards",
    "context",
    "diagnostic_summary",
    "data_quality",
    "risk_by_country",
];

/// Every table and summary the pages are built from
#[derive(Debug, Clone, Default, Serialize)]
pub struct Datasets {
    pub base: Vec<SalesLine>,
    pub monthly: Vec<MonthlyKpi>,
    pub customers: Vec<CustomerSummary>,
    pub products: Vec<ProductSummary>,
    pub regions: Vec<RegionCountrySales>,
    pub salesreps: Vec<SalesRepSummary>,
    pub top_bottom: Vec<TopBottomProduct>,
    pub high_risk: Vec<HighRiskCustomer>,
    pub misalignment: Vec<CreditMisalignment>,
    pub geo_anomalies: Vec<GeoCreditAnomaly>,
    pub product_trends: Vec<ProductDemandTrend>,
    pub customer_rfm: Vec<CustomerRfm>,
    pub next_orders: Vec<NextOrderPrediction>,
    pub cross_sell: Vec<CrossSellPair>,
    /// `None` only for the empty placeholder used when loading failed
    pub kpi_cards: Option<KpiCards>,
    pub context: ContextBanner,
    pub diagnostic_summary: DiagnosticSummary,
    pub data_quality: DataQuality,
    pub risk_by_country: Vec<CountryRisk>,
}

impl Datasets {
    pub fn build(snapshot: &SalesSnapshot, min_cooccurrence: u32) -> Self {
        let base = analytics::build_enriched_base(snapshot);

        let monthly = analytics::monthly_kpis(&base);
        let customers = analytics::aggregate_customers(&base);
        let products = analytics::aggregate_products(&base);
        let high_risk = analytics::high_risk_customers(&base);
        let misalignment = analytics::credit_misalignment(&base);

        let kpi_cards = analytics::kpi_cards(
            &monthly,
            &base,
            &snapshot.payments,
            &customers,
            &products,
        );
        let diagnostic_summary = analytics::diagnostic_summary(&high_risk, &misalignment);
        let data_quality = analytics::data_quality(&base);
        if data_quality.invalid_date_rows > 0 {
            tracing::warn!(
                rows = data_quality.invalid_date_rows,
                pct = data_quality.invalid_date_pct,
                "Sales lines with missing or malformed dates"
            );
        }

        Self {
            regions: analytics::aggregate_by_region(&base),
            salesreps: analytics::aggregate_salesreps(&base),
            top_bottom: analytics::top_bottom_products(&base),
            geo_anomalies: analytics::geographic_credit_anomalies(&base),
            product_trends: analytics::product_demand_trend(&base),
            customer_rfm: analytics::customer_rfm(&base),
            next_orders: analytics::next_order_predictions(&base),
            cross_sell: analytics::cross_sell_pairs(&base, min_cooccurrence),
            context: analytics::context_banner(&base, snapshot),
            risk_by_country: analytics::risk_by_country(&high_risk),
            kpi_cards: Some(kpi_cards),
            diagnostic_summary,
            data_quality,
            monthly,
            customers,
            products,
            high_risk,
            misalignment,
            base,
        }
    }

    /// JSON for one dataset by name
    pub fn to_json(&self, name: &str) -> Option<Result<Value, serde_json::Error>> {
        let value = match name {
            "base" => serde_json::to_value(&self.base),
            "monthly" => serde_json::to_value(&self.monthly),
            "customers" => serde_json::to_value(&self.customers),
            "products" => serde_json::to_value(&self.products),
            "regions" => serde_json::to_value(&self.regions),
            "salesreps" => serde_json::to_value(&self.salesreps),
            "top_bottom" => serde_json::to_value(&self.top_bottom),
            "high_risk" => serde_json::to_value(&self.high_risk),
            "misalignment" => serde_json::to_value(&self.misalignment),
            "geo_anomalies" => serde_json::to_value(&self.geo_anomalies),
            "product_trends" => serde_json::to_value(&self.product_trends),
            "customer_rfm" => serde_json::to_value(&self.customer_rfm),
            "next_orders" => serde_json::to_value(&self.next_orders),
            "cross_sell" => serde_json::to_value(&self.cross_sell),
            "kpi_cards" => serde_json::to_value(&self.kpi_cards),
            "context" => serde_json::to_value(&self.context),
            "diagnostic_summary" => serde_json::to_value(&self.diagnostic_summary),
            "data_quality" => serde_json::to_value(&self.data_quality),
            "risk_by_country" => serde_json::to_value(&self.risk_by_country),
            _ => return None,
        };
        Some(value)
    }

    /// Row count of a tabular dataset (summaries count as one row)
    pub fn row_count(&self, name: &str) -> Option<usize> {
        let count = match name {
            "base" => self.base.len(),
            "monthly" => self.monthly.len(),
            "customers" => self.customers.len(),
            "products" => self.products.len(),
            "regions" => self.regions.len(),
            "salesreps" => self.salesreps.len(),
            "top_bottom" => self.top_bottom.len(),
            "high_risk" => self.high_risk.len(),
            "misalignment" => self.misalignment.len(),
            "geo_anomalies" => self.geo_anomalies.len(),
            "product_trends" => self.product_trends.len(),
            "customer_rfm" => self.customer_rfm.len(),
            "next_orders" => self.next_orders.len(),
            "cross_sell" => self.cross_sell.len(),
            "risk_by_country" => self.risk_by_country.len(),
            "kpi_cards" => usize::from(self.kpi_cards.is_some()),
            "context" | "diagnostic_summary" | "data_quality" => 1,
            _ => return None,
        };
        Some(count)
    }
}

/// Hex SHA-256 over the serialized datasets
pub fn fingerprint(datasets: &Datasets) -> String {
    let bytes = serde_json::to_vec(datasets).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

/// Datasets plus the metadata needed for caching
#[derive(Debug)]
pub struct LoadedDatasets {
    pub datasets: Datasets,
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDatasets {
    fn new(datasets: Datasets) -> Self {
        Self {
            fingerprint: fingerprint(&datasets),
            datasets,
            loaded_at: Utc::now(),
        }
    }
}

/// Summary returned by a reload
#[derive(Debug, Clone, Serialize)]
pub struct ReloadSummary {
    pub fingerprint: String,
    pub changed: bool,
    pub sales_lines: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Service owning the in-memory datasets
pub struct DatasetService<R: SalesRepository> {
    repo: Arc<R>,
    min_cooccurrence: u32,
    current: RwLock<Arc<LoadedDatasets>>,
}

impl<R: SalesRepository> DatasetService<R> {
    /// Create a service with empty datasets; call [`Self::initialize`] next
    pub fn new(repo: Arc<R>, min_cooccurrence: u32) -> Self {
        Self {
            repo,
            min_cooccurrence,
            current: RwLock::new(Arc::new(LoadedDatasets::new(Datasets::default()))),
        }
    }

    /// First load. A failure is logged and leaves the datasets empty so the
    /// pages still render.
    pub async fn initialize(&self) {
        if let Err(e) = self.reload().await {
            tracing::error!("Failed to build datasets, serving empty pages: {}", e);
        }
    }

    /// Re-read the snapshot and swap in freshly built datasets
    pub async fn reload(&self) -> Result<ReloadSummary, DomainError> {
        let started = std::time::Instant::now();
        let snapshot = self.repo.load_snapshot().await?;
        let loaded = LoadedDatasets::new(Datasets::build(&snapshot, self.min_cooccurrence));

        let summary = ReloadSummary {
            fingerprint: loaded.fingerprint.clone(),
            changed: false,
            sales_lines: loaded.datasets.base.len(),
            loaded_at: loaded.loaded_at,
        };

        let mut current = self.current.write().await;
        let changed = current.fingerprint != loaded.fingerprint;
        *current = Arc::new(loaded);

        tracing::info!(
            sales_lines = summary.sales_lines,
            fingerprint = %summary.fingerprint,
            changed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Datasets loaded"
        );

        Ok(ReloadSummary { changed, ..summary })
    }

    /// Current datasets; cheap to clone and safe to hold across a reload
    pub async fn current(&self) -> Arc<LoadedDatasets> {
        self.current.read().await.clone()
    }
}
