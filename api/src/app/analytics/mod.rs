//! Report library
//!
//! Typed aggregations over the enriched sales lines. Each function mirrors
//! one of the catalog SQL reports and returns rows rounded the way the
//! dashboard shows them.

pub mod abc;
pub mod base;
pub mod geography;
pub mod kpi;
pub mod predictive;
pub mod risk;
pub mod timeseries;

use chrono::NaiveDate;

use crate::domain::entities::SalesLine;

pub use abc::{aggregate_customers, aggregate_products, aggregate_salesreps, top_bottom_products};
pub use base::build_enriched_base;
pub use geography::{aggregate_by_region, geographic_credit_anomalies, risk_by_country};
pub use kpi::{context_banner, data_quality, kpi_cards};
pub use predictive::{cross_sell_pairs, customer_rfm, next_order_predictions, product_demand_trend};
pub use risk::{credit_misalignment, diagnostic_summary, high_risk_customers};
pub use timeseries::monthly_kpis;

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Division that yields `None` for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Latest order date in the data, the reference point for recency
pub fn latest_order_date(lines: &[SalesLine]) -> Option<NaiveDate> {
    lines.iter().filter_map(|l| l.order_date).max()
}

/// Mean of a slice, `None` when empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-2.345_6), -2.35);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
    }

    #[test]
    fn ratio_guards_zero() {
        assert_eq!(ratio(10.0, 4.0), Some(2.5));
        assert_eq!(ratio(10.0, 0.0), None);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
