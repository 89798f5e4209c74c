//! Analytics thresholds
//!
//! Cut-offs used by the segmentation and risk reports.

/// Cumulative revenue share (%) closing the A tier
pub const ABC_A_CUTOFF_PCT: f64 = 80.0;

/// Cumulative revenue share (%) closing the B tier
pub const ABC_B_CUTOFF_PCT: f64 = 95.0;

/// Credit/sales (or sales/credit) ratio that flags an imbalance
pub const CREDIT_RATIO_THRESHOLD: f64 = 2.0;

/// Days without an order before a customer counts as stale
pub const RECENCY_THRESHOLD_DAYS: i64 = 180;

/// Percentile rank (0-100) at or above which a country is a high anomaly
pub const GEO_ANOMALY_HIGH_PCT: f64 = 90.0;

/// Percentile rank (0-100) at or below which a country is a low anomaly
pub const GEO_ANOMALY_LOW_PCT: f64 = 10.0;

/// Growth rate at or above which demand is growing
pub const DEMAND_GROWTH_THRESHOLD: f64 = 0.15;

/// Growth rate at or below which demand is declining
pub const DEMAND_DECLINE_THRESHOLD: f64 = -0.15;

/// Months-ago window (inclusive) for recent demand
pub const RECENT_WINDOW_MONTHS: (i32, i32) = (0, 2);

/// Months-ago window (inclusive) for the comparison period
pub const PREVIOUS_WINDOW_MONTHS: (i32, i32) = (3, 5);

/// Maximum number of RFM quantile bins
pub const RFM_MAX_BINS: usize = 5;

/// Score given when a series has a single distinct value
pub const RFM_NEUTRAL_SCORE: f64 = 3.0;

/// Days ahead of the expected date that count as "due soon"
pub const DUE_SOON_DAYS: i64 = 30;

/// Share of customers in the concentration KPI
pub const CUSTOMER_CONCENTRATION_SHARE: f64 = 0.2;

/// Number of products in the concentration KPI
pub const PRODUCT_CONCENTRATION_TOP_N: usize = 10;

/// Default minimum co-occurrence for a cross-sell pair
pub const DEFAULT_MIN_COOCCURRENCE: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abc_cutoffs_are_ordered() {
        assert!(ABC_A_CUTOFF_PCT < ABC_B_CUTOFF_PCT);
        assert!(ABC_B_CUTOFF_PCT <= 100.0);
    }

    #[test]
    fn demand_thresholds_are_symmetric() {
        assert_eq!(DEMAND_GROWTH_THRESHOLD, -DEMAND_DECLINE_THRESHOLD);
    }

    #[test]
    fn demand_windows_do_not_overlap() {
        assert!(RECENT_WINDOW_MONTHS.1 < PREVIOUS_WINDOW_MONTHS.0);
    }

    #[test]
    fn anomaly_band_is_ten_percent() {
        assert_eq!(GEO_ANOMALY_HIGH_PCT, 90.0);
        assert_eq!(GEO_ANOMALY_LOW_PCT, 10.0);
    }
}
