//! Enriched sales line
//!
//! One row per order line, joined with its order, customer, product and the
//! customer's sales rep. Every aggregation starts from a slice of these.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SalesLine {
    pub order_number: i64,
    pub order_date: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
    pub shipped_date: Option<NaiveDate>,
    pub status: String,
    pub customer_number: i64,
    pub product_code: String,
    pub quantity_ordered: i64,
    pub price_each: f64,
    pub customer_name: Option<String>,
    /// Normalized country name (see [`normalize_country`])
    pub country: Option<String>,
    pub city: Option<String>,
    pub credit_limit: Option<f64>,
    pub sales_rep_employee_number: Option<i64>,
    pub product_name: Option<String>,
    pub product_line: Option<String>,
    pub employee_name: Option<String>,
    pub job_title: Option<String>,
    pub office_code: Option<String>,
    pub line_sales: f64,
}

impl SalesLine {
    /// True when any of the three order dates is missing or malformed
    pub fn has_invalid_dates(&self) -> bool {
        self.order_date.is_none() || self.shipped_date.is_none() || self.required_date.is_none()
    }

    /// Shipped on or before the required date
    pub fn is_on_time(&self) -> bool {
        match (self.shipped_date, self.required_date) {
            (Some(shipped), Some(required)) => shipped <= required,
            _ => false,
        }
    }
}

/// Map country spellings to the names a world map understands
pub fn normalize_country(country: &str) -> String {
    match country {
        "USA" => "United States".to_string(),
        "UK" | "England" => "United Kingdom".to_string(),
        other => other.to_string(),
    }
}

/// Sales region for a (raw or normalized) country name
pub fn region_for_country(country: &str) -> &'static str {
    match country {
        "USA" | "United States" | "Canada" => "North America",
        "France" | "UK" | "England" | "United Kingdom" | "Germany" | "Spain" | "Norway"
        | "Denmark" | "Sweden" | "Finland" | "Italy" | "Belgium" | "Ireland" | "Switzerland"
        | "Austria" => "Europe",
        "Australia" | "Japan" | "Singapore" | "Hong Kong" | "Philippines" | "New Zealand" => {
            "Asia-Pacific"
        }
        "Brazil" | "Argentina" | "Chile" | "Mexico" | "Venezuela" => "Latin America",
        _ => "Other",
    }
}
