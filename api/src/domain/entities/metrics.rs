//! Report rows
//!
//! Typed outputs of the report library. Field names are the column names
//! exposed by the JSON dataset endpoints and referenced by table widgets.

use chrono::NaiveDate;
use serde::Serialize;

use super::segments::{
    AbcClass, ActivityFlag, AnomalyCategory, CreditImbalance, DemandTrend, NextOrderStatus,
    RfmSegment, SellerCategory,
};

/// Company-level KPIs for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyKpi {
    /// `YYYY-MM`
    pub sales_month: String,
    pub year: i32,
    pub month: u32,
    pub total_sales: f64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub on_time_orders: i64,
    pub avg_order_value: f64,
    pub on_time_rate_pct: f64,
    pub mom_change: Option<f64>,
    pub mom_pct: Option<f64>,
    pub yoy_change: Option<f64>,
    pub yoy_pct: Option<f64>,
    pub rolling_3m_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub customer_number: i64,
    pub customer_name: String,
    pub country: String,
    pub total_sales: f64,
    pub total_units: i64,
    pub num_orders: i64,
    pub num_products: i64,
    pub avg_sales_per_order: f64,
    pub avg_units_per_order: f64,
    pub avg_sales_per_product: f64,
    pub pct_of_global_sales: f64,
    pub cumulative_pct_of_global_sales: f64,
    pub sales_rank: i64,
    pub abc_class: AbcClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_code: String,
    pub product_name: String,
    pub product_line: String,
    pub total_sales: f64,
    pub total_units: i64,
    pub num_orders: i64,
    pub num_customers: i64,
    pub avg_sales_per_order: f64,
    pub avg_units_per_order: f64,
    pub avg_sales_per_customer: f64,
    pub pct_of_global_sales: f64,
    pub cumulative_pct_of_global_sales: f64,
    pub sales_rank: i64,
    pub abc_class: AbcClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRepSummary {
    pub employee_number: i64,
    pub employee_name: String,
    pub job_title: String,
    pub office_code: String,
    pub total_sales: f64,
    pub total_units: i64,
    pub num_orders: i64,
    pub num_customers: i64,
    pub num_customer_countries: i64,
    pub avg_sales_per_order: f64,
    pub avg_units_per_order: f64,
    pub avg_sales_per_customer: f64,
    pub pct_of_global_sales: f64,
    pub cumulative_pct_of_global_sales: f64,
    pub sales_rank: i64,
    pub abc_class: AbcClass,
}

/// Best or worst seller within a product line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopBottomProduct {
    pub product_line: String,
    pub product_code: String,
    pub product_name: String,
    pub total_sales: f64,
    pub category: SellerCategory,
}

/// Country sales compared with the totals of its region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCountrySales {
    pub region: String,
    pub country: String,
    pub total_sales: f64,
    pub num_orders: i64,
    pub num_customers: i64,
    pub region_total_sales: f64,
    pub region_num_orders: i64,
    pub region_num_customers: i64,
    pub avg_sales_per_customer: f64,
    pub avg_order_value: f64,
    pub pct_of_region_sales: f64,
    pub pct_of_global_sales: f64,
    pub rank_in_region: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskCustomer {
    pub customer_number: i64,
    pub customer_name: String,
    pub country: String,
    pub credit_limit: f64,
    pub total_sales: f64,
    pub last_order_date: Option<NaiveDate>,
    pub days_since_last_order: Option<i64>,
    pub credit_to_sales_ratio: Option<f64>,
    pub sales_to_credit_ratio: Option<f64>,
    pub activity_flag: ActivityFlag,
    pub ratio_flag: Option<CreditImbalance>,
    pub risk_category: String,
    pub amount_at_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditMisalignment {
    pub customer_number: i64,
    pub customer_name: String,
    pub country: String,
    pub credit_limit: f64,
    pub total_sales: f64,
    pub credit_to_sales_ratio: Option<f64>,
    pub sales_to_credit_ratio: Option<f64>,
    #[serde(skip)]
    pub imbalance: CreditImbalance,
    pub misalignment_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCreditAnomaly {
    pub country: String,
    pub num_customers: i64,
    pub total_credit_limit: f64,
    pub avg_credit_limit: f64,
    pub total_sales: f64,
    pub avg_sales_per_customer: f64,
    pub credit_to_sales_ratio: Option<f64>,
    pub ratio_pct: f64,
    pub anomaly_category: AnomalyCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDemandTrend {
    pub product_code: String,
    pub product_name: String,
    pub recent_avg: Option<f64>,
    pub prev_avg: Option<f64>,
    pub growth_rate: Option<f64>,
    pub growth_rate_pct: Option<f64>,
    pub demand_trend_flag: DemandTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRfm {
    pub customer_number: i64,
    pub customer_name: String,
    pub country: String,
    pub freq_orders: i64,
    pub monetary: f64,
    pub last_order_date: Option<NaiveDate>,
    pub days_since_last_order: Option<i64>,
    /// `None` when the customer has no dated order
    pub r_score: Option<f64>,
    pub f_score: f64,
    pub m_score: f64,
    pub rfm_score: Option<f64>,
    pub rfm_segment: RfmSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextOrderPrediction {
    pub customer_number: i64,
    pub customer_name: String,
    pub country: String,
    pub last_order_date: Option<NaiveDate>,
    pub avg_gap_days: Option<f64>,
    pub expected_next_order_date: Option<NaiveDate>,
    pub next_order_status: Option<NextOrderStatus>,
}

/// Association metrics for two products bought in the same order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSellPair {
    pub product_code_1: String,
    pub product_name_1: String,
    pub product_code_2: String,
    pub product_name_2: String,
    pub cooccurrence_count: i64,
    pub product1_orders: i64,
    pub product2_orders: i64,
    pub total_orders: i64,
    pub support: f64,
    pub confidence_from_p1: f64,
    pub confidence_from_p2: f64,
    pub expected_cooccurrence: f64,
    pub lift: f64,
}

/// A KPI value with the figure it is compared against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiPair {
    pub value: f64,
    pub reference: f64,
}

impl KpiPair {
    pub fn new(value: f64, reference: f64) -> Self {
        Self { value, reference }
    }

    pub fn delta(&self) -> f64 {
        self.value - self.reference
    }

    /// Relative change, `None` when the reference is zero
    pub fn delta_relative(&self) -> Option<f64> {
        if self.reference == 0.0 {
            None
        } else {
            Some((self.value - self.reference) / self.reference)
        }
    }
}

/// Year-over-year KPI banner data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCards {
    pub current_year: i32,
    pub previous_year: i32,
    pub revenue: KpiPair,
    pub orders: KpiPair,
    pub avg_order_value: KpiPair,
    pub on_time_rate: KpiPair,
    pub payment_coverage: KpiPair,
    pub customer_concentration: KpiPair,
    pub product_concentration: KpiPair,
}

/// Structural numbers shown in the executive footer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextBanner {
    pub offices: usize,
    pub sales_reps: usize,
    pub countries_served: usize,
    pub customers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticSummary {
    pub high_risk_customers_count: usize,
    pub high_risk_customers_pct: f64,
    pub amount_at_risk: f64,
    pub misalignment_count: usize,
    pub over_credited_count: usize,
    pub under_credited_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataQuality {
    pub invalid_date_rows: usize,
    pub invalid_date_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRisk {
    pub country: String,
    pub risk_amount: f64,
}
