//! Segmentation labels
//!
//! Categorical outputs of the reports (ABC tiers, RFM segments, trend and
//! risk flags). Serialized with the labels shown on the dashboard.

use serde::{Deserialize, Serialize};

/// Pareto tier by cumulative revenue share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl std::fmt::Display for AbcClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbcClass::A => write!(f, "A"),
            AbcClass::B => write!(f, "B"),
            AbcClass::C => write!(f, "C"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RfmSegment {
    Champions,
    Loyal,
    Potential,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl RfmSegment {
    pub fn from_score(score: f64) -> Self {
        if score >= 12.0 {
            RfmSegment::Champions
        } else if score >= 9.0 {
            RfmSegment::Loyal
        } else if score >= 6.0 {
            RfmSegment::Potential
        } else {
            RfmSegment::AtRisk
        }
    }
}

impl std::fmt::Display for RfmSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RfmSegment::Champions => write!(f, "Champions"),
            RfmSegment::Loyal => write!(f, "Loyal"),
            RfmSegment::Potential => write!(f, "Potential"),
            RfmSegment::AtRisk => write!(f, "At Risk"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandTrend {
    Growing,
    Stable,
    Declining,
    InsufficientData,
}

impl std::fmt::Display for DemandTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemandTrend::Growing => write!(f, "GROWING"),
            DemandTrend::Stable => write!(f, "STABLE"),
            DemandTrend::Declining => write!(f, "DECLINING"),
            DemandTrend::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// Recency flag for a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityFlag {
    #[serde(rename = "NO ORDERS / CREDIT ASSIGNED")]
    NoOrders,
    #[serde(rename = "STALE ACTIVITY (>= 180 days)")]
    Stale,
    #[serde(rename = "RECENT ACTIVITY")]
    Recent,
}

impl std::fmt::Display for ActivityFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityFlag::NoOrders => write!(f, "NO ORDERS / CREDIT ASSIGNED"),
            ActivityFlag::Stale => write!(f, "STALE ACTIVITY (>= 180 days)"),
            ActivityFlag::Recent => write!(f, "RECENT ACTIVITY"),
        }
    }
}

/// Direction of a credit-limit versus sales imbalance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditImbalance {
    #[serde(rename = "HIGH CREDIT / LOW SALES")]
    HighCreditLowSales,
    #[serde(rename = "LOW CREDIT / HIGH SALES")]
    LowCreditHighSales,
}

impl CreditImbalance {
    /// Long label used by the misalignment report
    pub fn misalignment_label(&self) -> &'static str {
        match self {
            CreditImbalance::HighCreditLowSales => "HIGH CREDIT / LOW SALES (credit >= 2x sales)",
            CreditImbalance::LowCreditHighSales => "LOW CREDIT / HIGH SALES (sales >= 2x credit)",
        }
    }

    pub fn is_over_credited(&self) -> bool {
        matches!(self, CreditImbalance::HighCreditLowSales)
    }
}

impl std::fmt::Display for CreditImbalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditImbalance::HighCreditLowSales => write!(f, "HIGH CREDIT / LOW SALES"),
            CreditImbalance::LowCreditHighSales => write!(f, "LOW CREDIT / HIGH SALES"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyCategory {
    #[serde(rename = "HIGH CREDIT VS SALES (Top 10%)")]
    HighCreditVsSales,
    #[serde(rename = "LOW CREDIT VS SALES (Bottom 10%)")]
    LowCreditVsSales,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellerCategory {
    #[serde(rename = "Top Seller")]
    TopSeller,
    #[serde(rename = "Worst Seller")]
    WorstSeller,
}

impl std::fmt::Display for SellerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SellerCategory::TopSeller => write!(f, "Top Seller"),
            SellerCategory::WorstSeller => write!(f, "Worst Seller"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextOrderStatus {
    Overdue,
    #[serde(rename = "Due Soon")]
    DueSoon,
    #[serde(rename = "On Track")]
    OnTrack,
}

impl std::fmt::Display for NextOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextOrderStatus::Overdue => write!(f, "Overdue"),
            NextOrderStatus::DueSoon => write!(f, "Due Soon"),
            NextOrderStatus::OnTrack => write!(f, "On Track"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfm_segment_thresholds() {
        assert_eq!(RfmSegment::from_score(15.0), RfmSegment::Champions);
        assert_eq!(RfmSegment::from_score(12.0), RfmSegment::Champions);
        assert_eq!(RfmSegment::from_score(11.0), RfmSegment::Loyal);
        assert_eq!(RfmSegment::from_score(9.0), RfmSegment::Loyal);
        assert_eq!(RfmSegment::from_score(6.0), RfmSegment::Potential);
        assert_eq!(RfmSegment::from_score(5.0), RfmSegment::AtRisk);
    }

    #[test]
    fn labels_serialize_as_shown() {
        assert_eq!(
            serde_json::to_string(&RfmSegment::AtRisk).unwrap(),
            "\"At Risk\""
        );
        assert_eq!(
            serde_json::to_string(&DemandTrend::InsufficientData).unwrap(),
            "\"INSUFFICIENT_DATA\""
        );
        assert_eq!(
            serde_json::to_string(&ActivityFlag::Stale).unwrap(),
            "\"STALE ACTIVITY (>= 180 days)\""
        );
        assert_eq!(serde_json::to_string(&AbcClass::B).unwrap(), "\"B\"");
    }

    #[test]
    fn display_matches_serde_labels() {
        assert_eq!(DemandTrend::Growing.to_string(), "GROWING");
        assert_eq!(NextOrderStatus::DueSoon.to_string(), "Due Soon");
        assert_eq!(
            CreditImbalance::HighCreditLowSales.to_string(),
            "HIGH CREDIT / LOW SALES"
        );
        assert!(CreditImbalance::HighCreditLowSales
            .misalignment_label()
            .contains("HIGH CREDIT"));
    }
}
