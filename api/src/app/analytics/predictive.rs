//! Predictive reports
//!
//! Demand trend, RFM scoring, next-order estimates and cross-sell pairs.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};

use super::{latest_order_date, mean, ratio, round2, round_to};
use crate::app::analytics_config::{
    DEMAND_DECLINE_THRESHOLD, DEMAND_GROWTH_THRESHOLD, DUE_SOON_DAYS, PREVIOUS_WINDOW_MONTHS,
    RECENT_WINDOW_MONTHS, RFM_MAX_BINS, RFM_NEUTRAL_SCORE,
};
use crate::domain::entities::{
    CrossSellPair, CustomerRfm, DemandTrend, NextOrderPrediction, NextOrderStatus,
    ProductDemandTrend, RfmSegment, SalesLine,
};

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Growth classification for a recent-versus-previous growth rate
pub fn classify_growth(growth_rate: Option<f64>) -> DemandTrend {
    match growth_rate {
        None => DemandTrend::InsufficientData,
        Some(g) if g >= DEMAND_GROWTH_THRESHOLD => DemandTrend::Growing,
        Some(g) if g <= DEMAND_DECLINE_THRESHOLD => DemandTrend::Declining,
        Some(_) => DemandTrend::Stable,
    }
}

/// Compare the average monthly sales of the last three months with the
/// three before, counting months back from the latest month in the data
pub fn product_demand_trend(lines: &[SalesLine]) -> Vec<ProductDemandTrend> {
    let mut monthly: BTreeMap<(&str, &str), BTreeMap<i32, f64>> = BTreeMap::new();
    for line in lines {
        let (Some(date), Some(name)) = (line.order_date, line.product_name.as_deref()) else {
            continue;
        };
        *monthly
            .entry((line.product_code.as_str(), name))
            .or_default()
            .entry(month_index(date))
            .or_default() += line.line_sales;
    }

    let Some(max_month) = monthly.values().filter_map(|m| m.keys().max()).max().copied() else {
        return Vec::new();
    };

    let window_avg = |months: &BTreeMap<i32, f64>, (from, to): (i32, i32)| {
        let values: Vec<f64> = months
            .iter()
            .filter(|(m, _)| (from..=to).contains(&(max_month - **m)))
            .map(|(_, s)| *s)
            .collect();
        mean(&values)
    };

    monthly
        .iter()
        .map(|((code, name), months)| {
            let recent_avg = window_avg(months, RECENT_WINDOW_MONTHS);
            let prev_avg = window_avg(months, PREVIOUS_WINDOW_MONTHS);
            let growth_rate = match (recent_avg, prev_avg) {
                (Some(recent), Some(prev)) if prev > 0.0 => Some((recent - prev) / prev),
                _ => None,
            };

            ProductDemandTrend {
                product_code: code.to_string(),
                product_name: name.to_string(),
                recent_avg: recent_avg.map(round2),
                prev_avg: prev_avg.map(round2),
                growth_rate: growth_rate.map(round2),
                growth_rate_pct: growth_rate.map(|g| round2(g * 100.0)),
                demand_trend_flag: classify_growth(growth_rate),
            }
        })
        .collect()
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

/// Score values 1..=n by quantile bin.
///
/// Uses up to five equal-frequency bins, merging bins whose edges coincide.
/// With `reverse` the smallest values get the highest score. A series with
/// a single distinct value scores 3 everywhere; missing values stay `None`.
pub fn quantile_scores(values: &[Option<f64>], reverse: bool) -> Vec<Option<f64>> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    let mut distinct = present.clone();
    distinct.dedup();

    if distinct.len() <= 1 {
        return vec![Some(RFM_NEUTRAL_SCORE); values.len()];
    }

    let bins = RFM_MAX_BINS.min(distinct.len());
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| quantile(&present, i as f64 / bins as f64))
        .collect();
    edges.dedup();

    let scores: Vec<Option<f64>> = values
        .iter()
        .map(|v| {
            v.map(|x| {
                let code = edges[1..]
                    .iter()
                    .position(|edge| x <= *edge)
                    .unwrap_or(edges.len() - 2);
                code as f64 + 1.0
            })
        })
        .collect();

    if !reverse {
        return scores;
    }

    let n_bins = scores.iter().flatten().copied().fold(0.0, f64::max);
    scores
        .into_iter()
        .map(|s| s.map(|score| n_bins + 1.0 - score))
        .collect()
}

#[derive(Default)]
struct CustomerOrders {
    orders: HashSet<i64>,
    monetary: f64,
    last_order_date: Option<NaiveDate>,
}

pub fn customer_rfm(lines: &[SalesLine]) -> Vec<CustomerRfm> {
    let reference = latest_order_date(lines);

    let mut customers: BTreeMap<(i64, &str, &str), CustomerOrders> = BTreeMap::new();
    for line in lines {
        let (Some(name), Some(country)) = (line.customer_name.as_deref(), line.country.as_deref())
        else {
            continue;
        };
        let entry = customers
            .entry((line.customer_number, name, country))
            .or_default();
        entry.orders.insert(line.order_number);
        entry.monetary += line.line_sales;
        entry.last_order_date = entry.last_order_date.max(line.order_date);
    }

    let days: Vec<Option<i64>> = customers
        .values()
        .map(|c| match (reference, c.last_order_date) {
            (Some(reference), Some(last)) => Some((reference - last).num_days()),
            _ => None,
        })
        .collect();

    let r_scores = quantile_scores(
        &days.iter().map(|d| d.map(|d| d as f64)).collect::<Vec<_>>(),
        true,
    );
    let f_scores = quantile_scores(
        &customers
            .values()
            .map(|c| Some(c.orders.len() as f64))
            .collect::<Vec<_>>(),
        false,
    );
    let m_scores = quantile_scores(
        &customers
            .values()
            .map(|c| Some(c.monetary))
            .collect::<Vec<_>>(),
        false,
    );

    customers
        .into_iter()
        .enumerate()
        .map(|(i, ((number, name, country), c))| {
            let f_score = f_scores[i].unwrap_or(RFM_NEUTRAL_SCORE);
            let m_score = m_scores[i].unwrap_or(RFM_NEUTRAL_SCORE);
            let rfm_score = r_scores[i].map(|r| r + f_score + m_score);

            CustomerRfm {
                customer_number: number,
                customer_name: name.to_string(),
                country: country.to_string(),
                freq_orders: c.orders.len() as i64,
                monetary: round2(c.monetary),
                last_order_date: c.last_order_date,
                days_since_last_order: days[i],
                r_score: r_scores[i],
                f_score,
                m_score,
                rfm_score,
                rfm_segment: rfm_score
                    .map(RfmSegment::from_score)
                    .unwrap_or(RfmSegment::AtRisk),
            }
        })
        .collect()
}

/// Status of an expected order date relative to the reference date
pub fn next_order_status(expected: NaiveDate, reference: NaiveDate) -> NextOrderStatus {
    let days_ahead = (expected - reference).num_days();
    if days_ahead < 0 {
        NextOrderStatus::Overdue
    } else if days_ahead <= DUE_SOON_DAYS {
        NextOrderStatus::DueSoon
    } else {
        NextOrderStatus::OnTrack
    }
}

/// Expected next order from the mean gap between consecutive orders
pub fn next_order_predictions(lines: &[SalesLine]) -> Vec<NextOrderPrediction> {
    let reference = latest_order_date(lines);

    let mut customers: BTreeMap<(i64, &str, &str), HashMap<i64, NaiveDate>> = BTreeMap::new();
    for line in lines {
        let (Some(name), Some(country)) = (line.customer_name.as_deref(), line.country.as_deref())
        else {
            continue;
        };
        let orders = customers
            .entry((line.customer_number, name, country))
            .or_default();
        if let Some(date) = line.order_date {
            orders.entry(line.order_number).or_insert(date);
        }
    }

    customers
        .into_iter()
        .map(|((number, name, country), orders)| {
            let mut dates: Vec<NaiveDate> = orders.into_values().collect();
            dates.sort();

            let gaps: Vec<f64> = dates
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).num_days() as f64)
                .collect();
            let avg_gap_days = mean(&gaps);
            let last_order_date = dates.last().copied();
            let expected_next_order_date = match (last_order_date, avg_gap_days) {
                (Some(last), Some(gap)) => Some(last + Duration::days(gap.round() as i64)),
                _ => None,
            };
            let next_order_status = expected_next_order_date
                .zip(reference)
                .map(|(expected, reference)| next_order_status(expected, reference));

            NextOrderPrediction {
                customer_number: number,
                customer_name: name.to_string(),
                country: country.to_string(),
                last_order_date,
                avg_gap_days: avg_gap_days.map(|g| round_to(g, 1)),
                expected_next_order_date,
                next_order_status,
            }
        })
        .collect()
}

/// Product pairs bought in the same order at least `min_cooccurrence` times
pub fn cross_sell_pairs(lines: &[SalesLine], min_cooccurrence: u32) -> Vec<CrossSellPair> {
    let mut order_products: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
    let mut product_orders: HashMap<&str, HashSet<i64>> = HashMap::new();
    let mut names: HashMap<&str, &str> = HashMap::new();

    for line in lines {
        let code = line.product_code.as_str();
        product_orders
            .entry(code)
            .or_default()
            .insert(line.order_number);
        let products = order_products.entry(line.order_number).or_default();
        if let Some(name) = line.product_name.as_deref() {
            products.insert(code);
            names.entry(code).or_insert(name);
        }
    }

    let total_orders = order_products.len() as f64;

    let mut counts: BTreeMap<(&str, &str), i64> = BTreeMap::new();
    for products in order_products.values() {
        let products: Vec<&str> = products.iter().copied().collect();
        for (i, first) in products.iter().enumerate() {
            for second in &products[i + 1..] {
                *counts.entry((*first, *second)).or_default() += 1;
            }
        }
    }

    let orders_of = |code: &str| product_orders.get(code).map_or(0, |o| o.len()) as f64;

    let mut pairs: Vec<CrossSellPair> = counts
        .into_iter()
        .filter(|(_, count)| *count >= i64::from(min_cooccurrence))
        .map(|((code_1, code_2), count)| {
            let p1 = orders_of(code_1);
            let p2 = orders_of(code_2);
            let count_f = count as f64;
            let expected = p1 * p2 / total_orders;

            CrossSellPair {
                product_code_1: code_1.to_string(),
                product_name_1: names.get(code_1).copied().unwrap_or_default().to_string(),
                product_code_2: code_2.to_string(),
                product_name_2: names.get(code_2).copied().unwrap_or_default().to_string(),
                cooccurrence_count: count,
                product1_orders: p1 as i64,
                product2_orders: p2 as i64,
                total_orders: total_orders as i64,
                support: round_to(count_f / total_orders, 4),
                confidence_from_p1: round_to(count_f / p1, 4),
                confidence_from_p2: round_to(count_f / p2, 4),
                expected_cooccurrence: round_to(expected, 4),
                lift: round_to(ratio(count_f, expected).unwrap_or(0.0), 4),
            }
        })
        .collect();

    pairs.sort_by(|a, b| b.support.total_cmp(&a.support));
    pairs
}
