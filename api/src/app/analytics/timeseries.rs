//! Company monthly time series

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;

use super::{mean, ratio, round2};
use crate::domain::entities::{MonthlyKpi, SalesLine};

#[derive(Default)]
struct Month {
    sales: f64,
    orders: HashSet<i64>,
    customers: HashSet<i64>,
    on_time_orders: HashSet<i64>,
}

/// Monthly KPIs; lines without a valid order date are excluded
pub fn monthly_kpis(lines: &[SalesLine]) -> Vec<MonthlyKpi> {
    let mut months: BTreeMap<(i32, u32), Month> = BTreeMap::new();
    for line in lines {
        let Some(date) = line.order_date else {
            continue;
        };
        let month = months.entry((date.year(), date.month())).or_default();
        month.sales += line.line_sales;
        month.orders.insert(line.order_number);
        month.customers.insert(line.customer_number);
        if line.is_on_time() {
            month.on_time_orders.insert(line.order_number);
        }
    }

    let totals: Vec<f64> = months.values().map(|m| m.sales).collect();

    months
        .into_iter()
        .enumerate()
        .map(|(i, ((year, month), m))| {
            let orders = m.orders.len() as f64;
            let total = totals[i];
            let back = |n: usize| i.checked_sub(n).map(|j| totals[j]);
            let window_start = i.saturating_sub(2);

            MonthlyKpi {
                sales_month: format!("{:04}-{:02}", year, month),
                year,
                month,
                total_sales: round2(total),
                total_orders: m.orders.len() as i64,
                total_customers: m.customers.len() as i64,
                on_time_orders: m.on_time_orders.len() as i64,
                avg_order_value: round2(ratio(total, orders).unwrap_or(0.0)),
                on_time_rate_pct: round2(
                    ratio(m.on_time_orders.len() as f64, orders).unwrap_or(0.0) * 100.0,
                ),
                mom_change: back(1).map(|prev| round2(total - prev)),
                mom_pct: back(1)
                    .and_then(|prev| ratio(total - prev, prev))
                    .map(|r| round2(r * 100.0)),
                yoy_change: back(12).map(|prev| round2(total - prev)),
                yoy_pct: back(12)
                    .and_then(|prev| ratio(total - prev, prev))
                    .map(|r| round2(r * 100.0)),
                rolling_3m_avg: round2(mean(&totals[window_start..=i]).unwrap_or(0.0)),
            }
        })
        .collect()
}
