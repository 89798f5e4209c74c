//! Credit risk diagnostics

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use super::{latest_order_date, ratio, round2, round_to};
use crate::app::analytics_config::{CREDIT_RATIO_THRESHOLD, RECENCY_THRESHOLD_DAYS};
use crate::domain::entities::{
    ActivityFlag, CreditImbalance, CreditMisalignment, DiagnosticSummary, HighRiskCustomer,
    SalesLine,
};

/// Sales and credit of one customer
struct CustomerCredit {
    customer_number: i64,
    customer_name: String,
    country: String,
    credit_limit: f64,
    total_sales: f64,
    last_order_date: Option<NaiveDate>,
}

impl CustomerCredit {
    fn credit_to_sales(&self) -> Option<f64> {
        if self.total_sales > 0.0 {
            ratio(self.credit_limit, self.total_sales)
        } else {
            None
        }
    }

    fn sales_to_credit(&self) -> Option<f64> {
        if self.credit_limit > 0.0 {
            ratio(self.total_sales, self.credit_limit)
        } else {
            None
        }
    }

    fn imbalance(&self) -> Option<CreditImbalance> {
        if self
            .credit_to_sales()
            .is_some_and(|r| r >= CREDIT_RATIO_THRESHOLD)
        {
            Some(CreditImbalance::HighCreditLowSales)
        } else if self
            .sales_to_credit()
            .is_some_and(|r| r >= CREDIT_RATIO_THRESHOLD)
        {
            Some(CreditImbalance::LowCreditHighSales)
        } else {
            None
        }
    }
}

fn customer_credit(lines: &[SalesLine]) -> Vec<CustomerCredit> {
    let mut customers: BTreeMap<i64, CustomerCredit> = BTreeMap::new();
    for line in lines {
        let (Some(name), Some(country), Some(credit)) =
            (&line.customer_name, &line.country, line.credit_limit)
        else {
            continue;
        };
        let entry = customers
            .entry(line.customer_number)
            .or_insert_with(|| CustomerCredit {
                customer_number: line.customer_number,
                customer_name: name.clone(),
                country: country.clone(),
                credit_limit: credit,
                total_sales: 0.0,
                last_order_date: None,
            });
        entry.total_sales += line.line_sales;
        entry.last_order_date = entry.last_order_date.max(line.order_date);
    }
    customers.into_values().collect()
}

/// Customers with a credit imbalance, stale activity or no dated order
pub fn high_risk_customers(lines: &[SalesLine]) -> Vec<HighRiskCustomer> {
    let reference = latest_order_date(lines);

    customer_credit(lines)
        .into_iter()
        .filter_map(|c| {
            let days = match (reference, c.last_order_date) {
                (Some(reference), Some(last)) => Some((reference - last).num_days()),
                _ => None,
            };
            let activity_flag = match (c.last_order_date, days) {
                (None, _) | (_, None) => ActivityFlag::NoOrders,
                (_, Some(d)) if d >= RECENCY_THRESHOLD_DAYS => ActivityFlag::Stale,
                _ => ActivityFlag::Recent,
            };
            let ratio_flag = c.imbalance();

            if ratio_flag.is_none() && activity_flag == ActivityFlag::Recent {
                return None;
            }

            let amount_at_risk = match ratio_flag {
                Some(CreditImbalance::HighCreditLowSales) => c.credit_limit,
                _ => c.total_sales,
            };

            Some(HighRiskCustomer {
                credit_to_sales_ratio: c.credit_to_sales().map(round2),
                sales_to_credit_ratio: c.sales_to_credit().map(round2),
                customer_number: c.customer_number,
                customer_name: c.customer_name,
                country: c.country,
                credit_limit: round2(c.credit_limit),
                total_sales: round2(c.total_sales),
                last_order_date: c.last_order_date,
                days_since_last_order: days,
                activity_flag,
                ratio_flag,
                risk_category: "HIGH RISK CUSTOMER".to_string(),
                amount_at_risk: round2(amount_at_risk),
            })
        })
        .collect()
}

/// Customers whose credit limit and sales differ by the ratio threshold
pub fn credit_misalignment(lines: &[SalesLine]) -> Vec<CreditMisalignment> {
    customer_credit(lines)
        .into_iter()
        .filter_map(|c| {
            let imbalance = c.imbalance()?;
            Some(CreditMisalignment {
                credit_to_sales_ratio: c.credit_to_sales().map(round2),
                sales_to_credit_ratio: c.sales_to_credit().map(round2),
                customer_number: c.customer_number,
                customer_name: c.customer_name,
                country: c.country,
                credit_limit: round2(c.credit_limit),
                total_sales: round2(c.total_sales),
                imbalance,
                misalignment_category: imbalance.misalignment_label().to_string(),
            })
        })
        .collect()
}

pub fn diagnostic_summary(
    high_risk: &[HighRiskCustomer],
    misalignment: &[CreditMisalignment],
) -> DiagnosticSummary {
    let misaligned_customers = misalignment
        .iter()
        .map(|m| m.customer_number)
        .collect::<HashSet<_>>()
        .len();
    let over_credited = misalignment
        .iter()
        .filter(|m| m.imbalance.is_over_credited())
        .count();

    DiagnosticSummary {
        high_risk_customers_count: high_risk.len(),
        high_risk_customers_pct: ratio(high_risk.len() as f64, misaligned_customers as f64)
            .map(|r| round_to(r * 100.0, 1))
            .unwrap_or(0.0),
        amount_at_risk: round2(high_risk.iter().map(|h| h.amount_at_risk).sum()),
        misalignment_count: misalignment.len(),
        over_credited_count: over_credited,
        under_credited_count: misalignment.len() - over_credited,
    }
}
