//! Geographic reports
//!
//! Country versus region sales, country-level credit anomalies and the
//! amount at risk per country.

use std::collections::{BTreeMap, HashSet};

use super::{ratio, round2};
use crate::app::analytics_config::{GEO_ANOMALY_HIGH_PCT, GEO_ANOMALY_LOW_PCT};
use crate::domain::entities::{
    region_for_country, AnomalyCategory, CountryRisk, GeoCreditAnomaly, HighRiskCustomer,
    RegionCountrySales, SalesLine,
};

#[derive(Default)]
struct Totals {
    sales: f64,
    orders: HashSet<i64>,
    customers: HashSet<i64>,
}

impl Totals {
    fn add(&mut self, line: &SalesLine) {
        self.sales += line.line_sales;
        self.orders.insert(line.order_number);
        self.customers.insert(line.customer_number);
    }
}

pub fn aggregate_by_region(lines: &[SalesLine]) -> Vec<RegionCountrySales> {
    let mut countries: BTreeMap<(&str, &str), Totals> = BTreeMap::new();
    let mut regions: BTreeMap<&str, Totals> = BTreeMap::new();

    for line in lines {
        let Some(country) = line.country.as_deref() else {
            continue;
        };
        let region = region_for_country(country);
        countries.entry((region, country)).or_default().add(line);
        regions.entry(region).or_default().add(line);
    }

    let global: f64 = countries.values().map(|t| t.sales).sum();

    countries
        .iter()
        .map(|((region, country), totals)| {
            let region_totals = &regions[region];
            let rank_in_region = 1 + countries
                .iter()
                .filter(|((r, _), other)| r == region && other.sales > totals.sales)
                .count() as i64;
            let orders = totals.orders.len() as f64;
            let customers = totals.customers.len() as f64;

            RegionCountrySales {
                region: region.to_string(),
                country: country.to_string(),
                total_sales: round2(totals.sales),
                num_orders: totals.orders.len() as i64,
                num_customers: totals.customers.len() as i64,
                region_total_sales: round2(region_totals.sales),
                region_num_orders: region_totals.orders.len() as i64,
                region_num_customers: region_totals.customers.len() as i64,
                avg_sales_per_customer: round2(ratio(totals.sales, customers).unwrap_or(0.0)),
                avg_order_value: round2(ratio(totals.sales, orders).unwrap_or(0.0)),
                pct_of_region_sales: round2(
                    ratio(totals.sales, region_totals.sales).unwrap_or(0.0) * 100.0,
                ),
                pct_of_global_sales: round2(ratio(totals.sales, global).unwrap_or(0.0) * 100.0),
                rank_in_region,
            }
        })
        .collect()
}

/// Percentile rank (0-1] of each value, ties get the average rank
pub fn percentile_rank(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    values
        .iter()
        .map(|v| {
            let below = values.iter().filter(|o| *o < v).count() as f64;
            let equal = values.iter().filter(|o| *o == v).count() as f64;
            (below + (equal + 1.0) / 2.0) / n
        })
        .collect()
}

#[derive(Default)]
struct CountryCredit {
    customers: BTreeMap<i64, (f64, f64)>,
}

/// Countries whose credit/sales ratio sits in the top or bottom decile
pub fn geographic_credit_anomalies(lines: &[SalesLine]) -> Vec<GeoCreditAnomaly> {
    let mut countries: BTreeMap<&str, CountryCredit> = BTreeMap::new();
    for line in lines {
        let (Some(country), Some(credit)) = (line.country.as_deref(), line.credit_limit) else {
            continue;
        };
        let entry = countries
            .entry(country)
            .or_default()
            .customers
            .entry(line.customer_number)
            .or_insert((credit, 0.0));
        entry.1 += line.line_sales;
    }

    let profiles: Vec<_> = countries
        .into_iter()
        .map(|(country, profile)| {
            let count = profile.customers.len() as f64;
            let credit: f64 = profile.customers.values().map(|(c, _)| c).sum();
            let sales: f64 = profile.customers.values().map(|(_, s)| s).sum();
            let ratio_value = if sales > 0.0 { Some(credit / sales) } else { None };
            (country, count, credit, sales, ratio_value)
        })
        .collect();

    let ranked: Vec<f64> = profiles.iter().filter_map(|p| p.4).collect();
    let ranks = percentile_rank(&ranked);
    let mut ranks = ranks.into_iter();

    profiles
        .into_iter()
        .filter_map(|(country, count, credit, sales, ratio_value)| {
            let pct = ratio_value.and_then(|_| ranks.next())? * 100.0;
            let category = if pct >= GEO_ANOMALY_HIGH_PCT {
                AnomalyCategory::HighCreditVsSales
            } else if pct <= GEO_ANOMALY_LOW_PCT {
                AnomalyCategory::LowCreditVsSales
            } else {
                return None;
            };

            Some(GeoCreditAnomaly {
                country: country.to_string(),
                num_customers: count as i64,
                total_credit_limit: round2(credit),
                avg_credit_limit: round2(credit / count),
                total_sales: round2(sales),
                avg_sales_per_customer: round2(sales / count),
                credit_to_sales_ratio: ratio_value.map(round2),
                ratio_pct: round2(pct),
                anomaly_category: category,
            })
        })
        .collect()
}

/// Amount at risk summed per country
pub fn risk_by_country(high_risk: &[HighRiskCustomer]) -> Vec<CountryRisk> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for customer in high_risk {
        *totals.entry(customer.country.as_str()).or_default() += customer.amount_at_risk;
    }

    totals
        .into_iter()
        .map(|(country, amount)| CountryRisk {
            country: country.to_string(),
            risk_amount: round2(amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::analytics::{build_enriched_base, high_risk_customers};
    use crate::test_utils::sample_snapshot;

    #[test]
    fn countries_compared_with_region() {
        let rows = aggregate_by_region(&build_enriched_base(&sample_snapshot()));

        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.region.as_str(), r.country.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Europe", "France"),
                ("Europe", "Norway"),
                ("North America", "United States"),
            ]
        );

        let france = &rows[0];
        assert_eq!(france.total_sales, 16500.0);
        assert_eq!(france.region_total_sales, 20500.0);
        assert_eq!(france.pct_of_region_sales, 80.49);
        assert_eq!(france.pct_of_global_sales, 55.0);
        assert_eq!(france.rank_in_region, 1);
        assert_eq!(rows[1].rank_in_region, 2);
    }

    #[test]
    fn percentile_rank_averages_ties() {
        let ranks = percentile_rank(&[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(ranks, vec![0.25, 0.625, 0.625, 1.0]);
    }

    #[test]
    fn anomalies_keep_extreme_countries() {
        let rows = geographic_credit_anomalies(&build_enriched_base(&sample_snapshot()));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "France");
        assert_eq!(rows[0].num_customers, 2);
        assert_eq!(rows[0].ratio_pct, 100.0);
        assert_eq!(rows[0].anomaly_category, AnomalyCategory::HighCreditVsSales);
    }

    #[test]
    fn risk_summed_per_country() {
        let high_risk = high_risk_customers(&build_enriched_base(&sample_snapshot()));
        let rows = risk_by_country(&high_risk);

        assert_eq!(
            rows,
            vec![
                CountryRisk {
                    country: "France".to_string(),
                    risk_amount: 139200.0
                },
                CountryRisk {
                    country: "Norway".to_string(),
                    risk_amount: 4000.0
                },
            ]
        );
    }

    #[test]
    fn customers_without_country_are_not_bucketed() {
        let mut snapshot = sample_snapshot();
        for customer in snapshot.customers.iter_mut() {
            if customer.customer_number == 121 {
                customer.country = None;
            }
        }
        let base = build_enriched_base(&snapshot);

        let regions = aggregate_by_region(&base);
        assert!(regions.iter().all(|r| !r.country.is_empty()));
        assert!(!regions.iter().any(|r| r.country == "Norway"));

        let risk = risk_by_country(&high_risk_customers(&base));
        assert_eq!(risk.len(), 1);
        assert_eq!(risk[0].country, "France");
    }
}
