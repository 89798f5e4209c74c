//! Deep aggregations with ABC tiers
//!
//! Customers, products and sales reps ranked by revenue, plus the best and
//! worst seller of each product line.

use std::collections::{BTreeMap, HashSet};

use super::{ratio, round2};
use crate::app::analytics_config::{ABC_A_CUTOFF_PCT, ABC_B_CUTOFF_PCT};
use crate::domain::entities::{
    AbcClass, CustomerSummary, ProductSummary, SalesLine, SalesRepSummary, SellerCategory,
    TopBottomProduct,
};

/// Revenue share of one row within a ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share {
    pub pct: f64,
    pub cumulative_pct: f64,
    pub rank: i64,
    pub abc_class: AbcClass,
}

/// Tier rows already sorted by revenue descending.
///
/// With k = rows whose cumulative share is within the A cut-off, the first
/// k rows are A; the B tier extends the same way up to its cut-off.
pub fn classify_abc(cumulative_pcts: &[f64]) -> Vec<AbcClass> {
    let a_count = cumulative_pcts
        .iter()
        .filter(|c| **c <= ABC_A_CUTOFF_PCT)
        .count();
    let b_count = cumulative_pcts
        .iter()
        .filter(|c| **c <= ABC_B_CUTOFF_PCT)
        .count();

    (0..cumulative_pcts.len())
        .map(|i| {
            if i < a_count {
                AbcClass::A
            } else if i < b_count {
                AbcClass::B
            } else {
                AbcClass::C
            }
        })
        .collect()
}

/// Shares, cumulative shares, ranks and tiers for totals sorted descending
pub fn revenue_shares(sorted_totals: &[f64]) -> Vec<Share> {
    let global: f64 = sorted_totals.iter().sum();
    let mut cumulative = 0.0;
    let pcts: Vec<(f64, f64)> = sorted_totals
        .iter()
        .map(|total| {
            let pct = ratio(*total, global).unwrap_or(0.0) * 100.0;
            cumulative += pct;
            (pct, cumulative)
        })
        .collect();

    let cumulative_pcts: Vec<f64> = pcts.iter().map(|(_, c)| *c).collect();
    let classes = classify_abc(&cumulative_pcts);

    pcts.into_iter()
        .zip(classes)
        .enumerate()
        .map(|(i, ((pct, cumulative_pct), abc_class))| Share {
            pct,
            cumulative_pct,
            rank: i as i64 + 1,
            abc_class,
        })
        .collect()
}

#[derive(Default)]
struct Accumulator<'a> {
    sales: f64,
    units: i64,
    orders: HashSet<i64>,
    customers: HashSet<i64>,
    products: HashSet<&'a str>,
    countries: HashSet<&'a str>,
}

impl<'a> Accumulator<'a> {
    fn add(&mut self, line: &'a SalesLine) {
        self.sales += line.line_sales;
        self.units += line.quantity_ordered;
        self.orders.insert(line.order_number);
        self.customers.insert(line.customer_number);
        self.products.insert(line.product_code.as_str());
        if let Some(country) = line.country.as_deref() {
            self.countries.insert(country);
        }
    }
}

/// Group lines by `key`, skipping lines the key rejects, then sort by revenue
fn group_by_revenue<'a, K, F>(lines: &'a [SalesLine], key: F) -> Vec<(K, Accumulator<'a>)>
where
    K: Ord,
    F: Fn(&'a SalesLine) -> Option<K>,
{
    let mut groups: BTreeMap<K, Accumulator<'a>> = BTreeMap::new();
    for line in lines {
        if let Some(k) = key(line) {
            groups.entry(k).or_default().add(line);
        }
    }

    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_by(|a, b| b.1.sales.total_cmp(&a.1.sales));
    groups
}

pub fn aggregate_customers(lines: &[SalesLine]) -> Vec<CustomerSummary> {
    let groups = group_by_revenue(lines, |l| {
        Some((
            l.customer_number,
            l.customer_name.clone()?,
            l.country.clone()?,
        ))
    });
    let totals: Vec<f64> = groups.iter().map(|(_, acc)| acc.sales).collect();

    groups
        .into_iter()
        .zip(revenue_shares(&totals))
        .map(|((key, acc), share)| {
            let orders = acc.orders.len() as f64;
            let products = acc.products.len() as f64;
            CustomerSummary {
                customer_number: key.0,
                customer_name: key.1,
                country: key.2,
                total_sales: round2(acc.sales),
                total_units: acc.units,
                num_orders: acc.orders.len() as i64,
                num_products: acc.products.len() as i64,
                avg_sales_per_order: round2(ratio(acc.sales, orders).unwrap_or(0.0)),
                avg_units_per_order: round2(ratio(acc.units as f64, orders).unwrap_or(0.0)),
                avg_sales_per_product: round2(ratio(acc.sales, products).unwrap_or(0.0)),
                pct_of_global_sales: round2(share.pct),
                cumulative_pct_of_global_sales: round2(share.cumulative_pct),
                sales_rank: share.rank,
                abc_class: share.abc_class,
            }
        })
        .collect()
}

pub fn aggregate_products(lines: &[SalesLine]) -> Vec<ProductSummary> {
    let groups = group_by_revenue(lines, |l| {
        Some((
            l.product_code.clone(),
            l.product_name.clone()?,
            l.product_line.clone()?,
        ))
    });
    let totals: Vec<f64> = groups.iter().map(|(_, acc)| acc.sales).collect();

    groups
        .into_iter()
        .zip(revenue_shares(&totals))
        .map(|((key, acc), share)| {
            let orders = acc.orders.len() as f64;
            let customers = acc.customers.len() as f64;
            ProductSummary {
                product_code: key.0,
                product_name: key.1,
                product_line: key.2,
                total_sales: round2(acc.sales),
                total_units: acc.units,
                num_orders: acc.orders.len() as i64,
                num_customers: acc.customers.len() as i64,
                avg_sales_per_order: round2(ratio(acc.sales, orders).unwrap_or(0.0)),
                avg_units_per_order: round2(ratio(acc.units as f64, orders).unwrap_or(0.0)),
                avg_sales_per_customer: round2(ratio(acc.sales, customers).unwrap_or(0.0)),
                pct_of_global_sales: round2(share.pct),
                cumulative_pct_of_global_sales: round2(share.cumulative_pct),
                sales_rank: share.rank,
                abc_class: share.abc_class,
            }
        })
        .collect()
}

/// Lines whose customer has no sales rep are left out
pub fn aggregate_salesreps(lines: &[SalesLine]) -> Vec<SalesRepSummary> {
    let groups = group_by_revenue(lines, |l| {
        Some((
            l.sales_rep_employee_number?,
            l.employee_name.clone()?,
            l.job_title.clone()?,
            l.office_code.clone()?,
        ))
    });
    let totals: Vec<f64> = groups.iter().map(|(_, acc)| acc.sales).collect();

    groups
        .into_iter()
        .zip(revenue_shares(&totals))
        .map(|((key, acc), share)| {
            let orders = acc.orders.len() as f64;
            let customers = acc.customers.len() as f64;
            SalesRepSummary {
                employee_number: key.0,
                employee_name: key.1,
                job_title: key.2,
                office_code: key.3,
                total_sales: round2(acc.sales),
                total_units: acc.units,
                num_orders: acc.orders.len() as i64,
                num_customers: acc.customers.len() as i64,
                num_customer_countries: acc.countries.len() as i64,
                avg_sales_per_order: round2(ratio(acc.sales, orders).unwrap_or(0.0)),
                avg_units_per_order: round2(ratio(acc.units as f64, orders).unwrap_or(0.0)),
                avg_sales_per_customer: round2(ratio(acc.sales, customers).unwrap_or(0.0)),
                pct_of_global_sales: round2(share.pct),
                cumulative_pct_of_global_sales: round2(share.cumulative_pct),
                sales_rank: share.rank,
                abc_class: share.abc_class,
            }
        })
        .collect()
}

/// Best and worst seller per product line; ties share the rank
pub fn top_bottom_products(lines: &[SalesLine]) -> Vec<TopBottomProduct> {
    let mut sales: BTreeMap<(String, String, String), f64> = BTreeMap::new();
    for line in lines {
        if let (Some(product_line), Some(name)) = (&line.product_line, &line.product_name) {
            *sales
                .entry((
                    product_line.clone(),
                    line.product_code.clone(),
                    name.clone(),
                ))
                .or_default() += line.line_sales;
        }
    }

    let mut by_line: BTreeMap<&str, Vec<(&(String, String, String), f64)>> = BTreeMap::new();
    for (key, total) in &sales {
        by_line.entry(key.0.as_str()).or_default().push((key, *total));
    }

    let mut result = Vec::new();
    for products in by_line.values() {
        let max = products.iter().map(|(_, t)| *t).fold(f64::MIN, f64::max);
        let min = products.iter().map(|(_, t)| *t).fold(f64::MAX, f64::min);

        let mut worst = Vec::new();
        let mut top = Vec::new();
        for (key, total) in products {
            let row = |category| TopBottomProduct {
                product_line: key.0.clone(),
                product_code: key.1.clone(),
                product_name: key.2.clone(),
                total_sales: round2(*total),
                category,
            };
            if *total == max {
                top.push(row(SellerCategory::TopSeller));
            } else if *total == min {
                worst.push(row(SellerCategory::WorstSeller));
            }
        }
        result.extend(worst);
        result.extend(top);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::analytics::build_enriched_base;
    use crate::test_utils::sample_snapshot;

    fn base() -> Vec<SalesLine> {
        build_enriched_base(&sample_snapshot())
    }

    #[test]
    fn abc_uses_count_of_rows_within_cutoff() {
        let classes = classify_abc(&[35.0, 66.67, 86.67, 100.0]);
        assert_eq!(
            classes,
            vec![AbcClass::A, AbcClass::A, AbcClass::B, AbcClass::C]
        );
    }

    #[test]
    fn abc_first_row_above_cutoff_is_not_a() {
        let classes = classify_abc(&[85.0, 100.0]);
        assert_eq!(classes, vec![AbcClass::B, AbcClass::C]);
    }

    #[test]
    fn shares_accumulate_to_one_hundred() {
        let shares = revenue_shares(&[50.0, 30.0, 20.0]);
        assert_eq!(shares[0].pct, 50.0);
        assert_eq!(shares[2].cumulative_pct, 100.0);
        assert_eq!(shares[2].rank, 3);
    }

    #[test]
    fn customers_ranked_and_tiered() {
        let customers = aggregate_customers(&base());

        assert_eq!(customers.len(), 4);
        assert_eq!(customers[0].customer_number, 103);
        assert_eq!(customers[0].total_sales, 10500.0);
        assert_eq!(customers[0].num_orders, 2);
        assert_eq!(customers[0].num_products, 3);
        assert_eq!(customers[0].pct_of_global_sales, 35.0);

        let classes: Vec<_> = customers.iter().map(|c| c.abc_class).collect();
        assert_eq!(
            classes,
            vec![AbcClass::A, AbcClass::A, AbcClass::B, AbcClass::C]
        );
    }

    #[test]
    fn customers_without_master_data_are_skipped() {
        let customers = aggregate_customers(&base());
        assert!(!customers.iter().any(|c| c.customer_number == 999));
    }

    #[test]
    fn products_ranked_by_sales() {
        let products = aggregate_products(&base());

        assert_eq!(products[0].product_code, "S10_1678");
        assert_eq!(products[0].total_sales, 11000.0);
        assert_eq!(products[0].num_orders, 5);
        assert_eq!(products.last().unwrap().product_code, "S12_1099");
        assert_eq!(products.last().unwrap().abc_class, AbcClass::C);
    }

    #[test]
    fn salesreps_drop_customers_without_rep() {
        let reps = aggregate_salesreps(&base());

        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].employee_name, "Gerard Hernandez");
        assert_eq!(reps[0].total_sales, 16500.0);
        assert_eq!(reps[0].num_customers, 2);
        assert_eq!(reps[0].num_customer_countries, 1);
        assert_eq!(reps[0].abc_class, AbcClass::A);
        assert_eq!(reps[1].abc_class, AbcClass::C);
    }

    #[test]
    fn top_and_worst_seller_per_line() {
        let rows = top_bottom_products(&base());

        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.product_line.as_str(), r.product_code.as_str(), r.category))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Classic Cars", "S12_1099", SellerCategory::WorstSeller),
                ("Classic Cars", "S10_1949", SellerCategory::TopSeller),
                ("Motorcycles", "S10_2016", SellerCategory::WorstSeller),
                ("Motorcycles", "S10_1678", SellerCategory::TopSeller),
            ]
        );
    }
}
