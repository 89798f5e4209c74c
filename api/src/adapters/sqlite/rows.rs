//! Query result rows
//!
//! Column aliases match the field names; every numeric column is cast in SQL
//! so SQLite type affinity never reaches the decoder.

use sea_orm::FromQueryResult;

use crate::domain::entities::{
    parse_date, Customer, Employee, Office, Order, OrderLine, Payment, Product,
};

#[derive(Debug, FromQueryResult)]
pub struct OrderRow {
    pub order_number: i64,
    pub order_date: Option<String>,
    pub required_date: Option<String>,
    pub shipped_date: Option<String>,
    pub status: Option<String>,
    pub customer_number: i64,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            order_number: row.order_number,
            order_date: parse_date(row.order_date.as_deref()),
            required_date: parse_date(row.required_date.as_deref()),
            shipped_date: parse_date(row.shipped_date.as_deref()),
            status: row.status.unwrap_or_default(),
            customer_number: row.customer_number,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct OrderLineRow {
    pub order_number: i64,
    pub product_code: String,
    pub quantity_ordered: Option<i64>,
    pub price_each: Option<f64>,
    pub order_line_number: Option<i64>,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            order_number: row.order_number,
            product_code: row.product_code,
            quantity_ordered: row.quantity_ordered.unwrap_or(0),
            price_each: row.price_each.unwrap_or(0.0),
            order_line_number: row.order_line_number.unwrap_or(0),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct CustomerRow {
    pub customer_number: i64,
    pub customer_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub credit_limit: Option<f64>,
    pub sales_rep_employee_number: Option<i64>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_number: row.customer_number,
            customer_name: row.customer_name,
            country: row.country,
            city: row.city,
            credit_limit: row.credit_limit,
            sales_rep_employee_number: row.sales_rep_employee_number,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct ProductRow {
    pub product_code: String,
    pub product_name: Option<String>,
    pub product_line: Option<String>,
    pub quantity_in_stock: Option<i64>,
    pub buy_price: Option<f64>,
    pub msrp: Option<f64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            product_code: row.product_code,
            product_name: row.product_name.unwrap_or_default(),
            product_line: row.product_line.unwrap_or_default(),
            quantity_in_stock: row.quantity_in_stock.unwrap_or(0),
            buy_price: row.buy_price.unwrap_or(0.0),
            msrp: row.msrp.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct EmployeeRow {
    pub employee_number: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub office_code: Option<String>,
    pub reports_to: Option<i64>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            employee_number: row.employee_number,
            first_name: row.first_name.unwrap_or_default(),
            last_name: row.last_name.unwrap_or_default(),
            job_title: row.job_title.unwrap_or_default(),
            office_code: row.office_code.unwrap_or_default(),
            reports_to: row.reports_to,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct PaymentRow {
    pub customer_number: i64,
    pub check_number: Option<String>,
    pub payment_date: Option<String>,
    pub amount: Option<f64>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            customer_number: row.customer_number,
            check_number: row.check_number.unwrap_or_default(),
            payment_date: parse_date(row.payment_date.as_deref()),
            amount: row.amount.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct OfficeRow {
    pub office_code: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub territory: Option<String>,
}

impl From<OfficeRow> for Office {
    fn from(row: OfficeRow) -> Self {
        Self {
            office_code: row.office_code,
            city: row.city.unwrap_or_default(),
            country: row.country.unwrap_or_default(),
            territory: row.territory.filter(|t| !t.is_empty() && t != "NA"),
        }
    }
}
