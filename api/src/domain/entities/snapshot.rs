//! Snapshot records
//!
//! Rows of the Classic Models sample schema, as read from the SQLite file.
//! Dates are parsed once here; anything malformed becomes `None`.

use chrono::NaiveDate;
use serde::Serialize;

/// Parse a date column (`YYYY-MM-DD`, optionally followed by a time part)
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_number: i64,
    pub order_date: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
    pub shipped_date: Option<NaiveDate>,
    pub status: String,
    pub customer_number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub order_number: i64,
    pub product_code: String,
    pub quantity_ordered: i64,
    pub price_each: f64,
    pub order_line_number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub customer_number: i64,
    pub customer_name: Option<String>,
    /// Raw spelling as stored; NULL stays `None` so the customer joins no country
    pub country: Option<String>,
    pub city: Option<String>,
    pub credit_limit: Option<f64>,
    pub sales_rep_employee_number: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub product_code: String,
    pub product_name: String,
    pub product_line: String,
    pub quantity_in_stock: i64,
    pub buy_price: f64,
    pub msrp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub employee_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub office_code: String,
    pub reports_to: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub customer_number: i64,
    pub check_number: String,
    pub payment_date: Option<NaiveDate>,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Office {
    pub office_code: String,
    pub city: String,
    pub country: String,
    pub territory: Option<String>,
}

/// Every input table the dashboard needs, loaded in one pass
#[derive(Debug, Clone, Default)]
pub struct SalesSnapshot {
    pub orders: Vec<Order>,
    pub order_lines: Vec<OrderLine>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub employees: Vec<Employee>,
    pub payments: Vec<Payment>,
    pub offices: Vec<Office>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_date() {
        assert_eq!(
            parse_date(Some("2005-05-31")),
            NaiveDate::from_ymd_opt(2005, 5, 31)
        );
    }

    #[test]
    fn parse_date_with_time_part() {
        assert_eq!(
            parse_date(Some("2003-01-06 00:00:00")),
            NaiveDate::from_ymd_opt(2003, 1, 6)
        );
    }

    #[test]
    fn malformed_dates_are_dropped() {
        assert_eq!(parse_date(Some("0000-00-00")), None);
        assert_eq!(parse_date(Some("not a date")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn employee_full_name() {
        let employee = Employee {
            employee_number: 1370,
            first_name: "Gerard".to_string(),
            last_name: "Hernandez".to_string(),
            job_title: "Sales Rep".to_string(),
            office_code: "4".to_string(),
            reports_to: Some(1102),
        };
        assert_eq!(employee.full_name(), "Gerard Hernandez");
    }
}
