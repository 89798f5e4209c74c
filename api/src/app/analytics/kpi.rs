//! Executive KPIs
//!
//! Year-over-year KPI cards, the organizational context banner and the
//! data-quality counter shown on the executive page.

use std::collections::HashSet;

use chrono::{Datelike, Utc};

use super::{mean, ratio, round2};
use crate::app::analytics_config::{CUSTOMER_CONCENTRATION_SHARE, PRODUCT_CONCENTRATION_TOP_N};
use crate::domain::entities::{
    ContextBanner, CustomerSummary, DataQuality, KpiCards, KpiPair, MonthlyKpi, Payment,
    ProductSummary, SalesLine, SalesSnapshot,
};

/// Paid amount as a share of billed sales (%)
pub fn payment_coverage(lines: &[SalesLine], payments: &[Payment]) -> f64 {
    let billed: f64 = lines.iter().map(|l| l.line_sales).sum();
    let paid: f64 = payments.iter().map(|p| p.amount).sum();
    round2(ratio(paid, billed).unwrap_or(0.0) * 100.0)
}

/// Revenue share (%) of the top fifth of customers, at least one
pub fn customer_concentration(customers: &[CustomerSummary]) -> f64 {
    let top_n = ((customers.len() as f64 * CUSTOMER_CONCENTRATION_SHARE) as usize).max(1);
    let sales: Vec<f64> = customers.iter().map(|c| c.total_sales).collect();
    top_share(sales, top_n)
}

/// Revenue share (%) of the ten best-selling products
pub fn product_concentration(products: &[ProductSummary]) -> f64 {
    let sales: Vec<f64> = products.iter().map(|p| p.total_sales).collect();
    top_share(sales, PRODUCT_CONCENTRATION_TOP_N)
}

fn sum_by(rows: &[&MonthlyKpi], f: impl Fn(&MonthlyKpi) -> f64) -> f64 {
    round2(rows.iter().map(|m| f(m)).sum())
}

fn mean_by(rows: &[&MonthlyKpi], f: impl Fn(&MonthlyKpi) -> f64) -> f64 {
    let values: Vec<f64> = rows.iter().map(|m| f(m)).collect();
    round2(mean(&values).unwrap_or(0.0))
}

fn top_share(mut sales: Vec<f64>, top_n: usize) -> f64 {
    sales.sort_by(|a, b| b.total_cmp(a));
    let total: f64 = sales.iter().sum();
    let top: f64 = sales.iter().take(top_n).sum();
    round2(ratio(top, total).unwrap_or(0.0) * 100.0)
}

/// Latest year in the monthly series and the one before it
pub fn comparison_years(monthly: &[MonthlyKpi]) -> (i32, i32) {
    let mut years: Vec<i32> = monthly.iter().map(|m| m.year).collect();
    years.sort_unstable();
    years.dedup();

    match years.as_slice() {
        [.., previous, current] => (*current, *previous),
        [current] => (*current, current - 1),
        [] => {
            let current = Utc::now().year();
            (current, current - 1)
        }
    }
}

pub fn kpi_cards(
    monthly: &[MonthlyKpi],
    lines: &[SalesLine],
    payments: &[Payment],
    customers: &[CustomerSummary],
    products: &[ProductSummary],
) -> KpiCards {
    let (current_year, previous_year) = comparison_years(monthly);
    let current: Vec<&MonthlyKpi> = monthly.iter().filter(|m| m.year == current_year).collect();
    let previous: Vec<&MonthlyKpi> = monthly
        .iter()
        .filter(|m| m.year == previous_year)
        .collect();

    let coverage = payment_coverage(lines, payments);
    let customer_share = customer_concentration(customers);
    let product_share = product_concentration(products);

    KpiCards {
        current_year,
        previous_year,
        revenue: KpiPair::new(
            sum_by(&current, |m| m.total_sales),
            sum_by(&previous, |m| m.total_sales),
        ),
        orders: KpiPair::new(
            sum_by(&current, |m| m.total_orders as f64),
            sum_by(&previous, |m| m.total_orders as f64),
        ),
        avg_order_value: KpiPair::new(
            mean_by(&current, |m| m.avg_order_value),
            mean_by(&previous, |m| m.avg_order_value),
        ),
        on_time_rate: KpiPair::new(
            mean_by(&current, |m| m.on_time_rate_pct),
            mean_by(&previous, |m| m.on_time_rate_pct),
        ),
        payment_coverage: KpiPair::new(coverage, coverage),
        customer_concentration: KpiPair::new(customer_share, customer_share),
        product_concentration: KpiPair::new(product_share, product_share),
    }
}

pub fn context_banner(lines: &[SalesLine], snapshot: &SalesSnapshot) -> ContextBanner {
    ContextBanner {
        offices: snapshot
            .offices
            .iter()
            .map(|o| o.office_code.as_str())
            .collect::<HashSet<_>>()
            .len(),
        sales_reps: snapshot
            .employees
            .iter()
            .map(|e| e.employee_number)
            .collect::<HashSet<_>>()
            .len(),
        countries_served: lines
            .iter()
            .filter_map(|l| l.country.as_deref())
            .collect::<HashSet<_>>()
            .len(),
        customers: lines
            .iter()
            .map(|l| l.customer_number)
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// Lines with a missing or malformed order, shipped or required date
pub fn data_quality(lines: &[SalesLine]) -> DataQuality {
    let invalid = lines.iter().filter(|l| l.has_invalid_dates()).count();
    DataQuality {
        invalid_date_rows: invalid,
        invalid_date_pct: round2(invalid as f64 / lines.len().max(1) as f64 * 100.0),
    }
}
