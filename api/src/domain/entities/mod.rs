//! Domain entities
//!
//! Snapshot records as loaded from SQLite, the enriched sales line every
//! report starts from, and the typed report rows.

pub mod metrics;
pub mod sales_line;
pub mod segments;
pub mod snapshot;

pub use metrics::{
    ContextBanner, CountryRisk, CreditMisalignment, CrossSellPair, CustomerRfm, CustomerSummary,
    DataQuality, DiagnosticSummary, GeoCreditAnomaly, HighRiskCustomer, KpiCards, KpiPair,
    MonthlyKpi, NextOrderPrediction, ProductDemandTrend, ProductSummary, RegionCountrySales,
    SalesRepSummary, TopBottomProduct,
};
pub use sales_line::{normalize_country, region_for_country, SalesLine};
pub use segments::{
    AbcClass, ActivityFlag, AnomalyCategory, CreditImbalance, DemandTrend, NextOrderStatus,
    RfmSegment, SellerCategory,
};
pub use snapshot::{
    parse_date, Customer, Employee, Office, Order, OrderLine, Payment, Product, SalesSnapshot,
};
