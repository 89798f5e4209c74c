//! Test fixtures
//!
//! A small Classic Models snapshot with hand-checked totals, a sales line
//! factory and an in-memory SQLite database seeded with the same tables.

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::domain::entities::{
    parse_date, Customer, Employee, Office, Order, OrderLine, Payment, Product, SalesLine,
    SalesSnapshot,
};

/// Schema and rows loaded by [`seeded_db`]
pub const SAMPLE_SCHEMA: &str = include_str!("sample_schema.sql");

fn date(raw: &str) -> Option<NaiveDate> {
    parse_date(Some(raw))
}

fn order(number: i64, ordered: &str, required: &str, shipped: Option<&str>, customer: i64) -> Order {
    Order {
        order_number: number,
        order_date: date(ordered),
        required_date: date(required),
        shipped_date: shipped.and_then(date),
        status: if shipped.is_some() { "Shipped" } else { "In Process" }.to_string(),
        customer_number: customer,
    }
}

fn order_line(number: i64, product: &str, quantity: i64, price: f64, line: i64) -> OrderLine {
    OrderLine {
        order_number: number,
        product_code: product.to_string(),
        quantity_ordered: quantity,
        price_each: price,
        order_line_number: line,
    }
}

fn customer(number: i64, name: &str, city: &str, country: &str, credit: f64, rep: Option<i64>) -> Customer {
    Customer {
        customer_number: number,
        customer_name: Some(name.to_string()),
        country: Some(country.to_string()),
        city: Some(city.to_string()),
        credit_limit: Some(credit),
        sales_rep_employee_number: rep,
    }
}

fn product(code: &str, name: &str, line: &str) -> Product {
    Product {
        product_code: code.to_string(),
        product_name: name.to_string(),
        product_line: line.to_string(),
        quantity_in_stock: 1000,
        buy_price: 50.0,
        msrp: 120.0,
    }
}

fn employee(number: i64, first: &str, last: &str, title: &str, office: &str, reports_to: Option<i64>) -> Employee {
    Employee {
        employee_number: number,
        first_name: first.to_string(),
        last_name: last.to_string(),
        job_title: title.to_string(),
        office_code: office.to_string(),
        reports_to,
    }
}

fn payment(customer: i64, check: &str, paid_on: &str, amount: f64) -> Payment {
    Payment {
        customer_number: customer,
        check_number: check.to_string(),
        payment_date: date(paid_on),
        amount,
    }
}

/// Sample snapshot.
///
/// Base sales total 30 800 over eight orders (2003-01 .. 2004-03). Customer
/// 999 has orders but no master data, 141 has master data but no orders, one
/// order line points at a missing order and order 10106 is not shipped yet.
pub fn sample_snapshot() -> SalesSnapshot {
    SalesSnapshot {
        orders: vec![
            order(10100, "2003-01-06", "2003-01-13", Some("2003-01-10"), 103),
            order(10101, "2003-01-09", "2003-01-18", Some("2003-01-11"), 112),
            order(10102, "2003-02-10", "2003-02-18", Some("2003-02-20"), 119),
            order(10103, "2003-06-15", "2003-06-22", Some("2003-06-20"), 103),
            order(10104, "2004-01-20", "2004-01-29", Some("2004-01-25"), 112),
            order(10105, "2004-02-11", "2004-02-21", Some("2004-02-12"), 121),
            order(10106, "2004-03-15", "2004-03-25", None, 119),
            order(10107, "2004-03-20", "2004-03-30", Some("2004-03-22"), 999),
        ],
        order_lines: vec![
            order_line(10100, "S10_1678", 30, 100.0, 1),
            order_line(10100, "S10_1949", 20, 200.0, 2),
            order_line(10101, "S10_1678", 10, 100.0, 1),
            order_line(10101, "S10_2016", 25, 80.0, 2),
            order_line(10102, "S10_1949", 10, 200.0, 1),
            order_line(10103, "S10_1678", 20, 100.0, 1),
            order_line(10103, "S12_1099", 5, 300.0, 2),
            order_line(10104, "S10_1678", 40, 100.0, 1),
            order_line(10104, "S10_1949", 10, 250.0, 2),
            order_line(10105, "S10_2016", 50, 80.0, 1),
            order_line(10106, "S12_1099", 10, 300.0, 1),
            order_line(10106, "S10_1678", 10, 100.0, 2),
            order_line(10107, "S10_2016", 10, 80.0, 1),
            order_line(99999, "S10_1678", 1, 100.0, 1),
        ],
        customers: vec![
            customer(103, "Atelier graphique", "Nantes", "France", 21000.0, Some(1370)),
            customer(112, "Signal Gift Stores", "Las Vegas", "USA", 10000.0, Some(1165)),
            customer(119, "La Rochelle Gifts", "Nantes", "France", 118200.0, Some(1370)),
            customer(121, "Baane Mini Imports", "Stavern", "Norway", 1500.0, None),
            customer(141, "Euro+ Shopping Channel", "Madrid", "Spain", 227600.0, Some(1370)),
        ],
        products: vec![
            product("S10_1678", "1969 Harley Davidson Ultimate Chopper", "Motorcycles"),
            product("S10_1949", "1952 Alpine Renault 1300", "Classic Cars"),
            product("S10_2016", "1996 Moto Guzzi 1100i", "Motorcycles"),
            product("S12_1099", "1968 Ford Mustang", "Classic Cars"),
        ],
        employees: vec![
            employee(1002, "Diane", "Murphy", "President", "1", None),
            employee(1165, "Leslie", "Jennings", "Sales Rep", "1", Some(1002)),
            employee(1370, "Gerard", "Hernandez", "Sales Rep", "4", Some(1002)),
        ],
        payments: vec![
            payment(103, "HQ336336", "2003-02-01", 5000.0),
            payment(112, "BO864823", "2003-02-15", 6000.0),
            payment(119, "DB933704", "2003-03-01", 1000.0),
            payment(121, "KI831359", "2004-02-20", 4000.0),
        ],
        offices: vec![
            Office {
                office_code: "1".to_string(),
                city: "San Francisco".to_string(),
                country: "USA".to_string(),
                territory: None,
            },
            Office {
                office_code: "4".to_string(),
                city: "Paris".to_string(),
                country: "France".to_string(),
                territory: Some("EMEA".to_string()),
            },
        ],
    }
}

/// A shipped-on-time sales line for a known customer and product
pub fn sales_line(
    order_number: i64,
    order_date: &str,
    customer_number: i64,
    product_code: &str,
    quantity: i64,
    price: f64,
) -> SalesLine {
    let ordered = date(order_date);
    SalesLine {
        order_number,
        order_date: ordered,
        required_date: ordered,
        shipped_date: ordered,
        status: "Shipped".to_string(),
        customer_number,
        product_code: product_code.to_string(),
        quantity_ordered: quantity,
        price_each: price,
        customer_name: Some(format!("Customer {}", customer_number)),
        country: Some("France".to_string()),
        city: Some("Paris".to_string()),
        credit_limit: Some(10000.0),
        sales_rep_employee_number: Some(1370),
        product_name: Some(format!("Product {}", product_code)),
        product_line: Some("Classic Cars".to_string()),
        employee_name: Some("Gerard Hernandez".to_string()),
        job_title: Some("Sales Rep".to_string()),
        office_code: Some("4".to_string()),
        line_sales: quantity as f64 * price,
    }
}

/// In-memory SQLite with [`SAMPLE_SCHEMA`] applied
pub async fn seeded_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    db.execute_unprepared(SAMPLE_SCHEMA)
        .await
        .expect("Failed to seed sample schema");
    db
}
