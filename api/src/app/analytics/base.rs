//! Enriched base
//!
//! Joins order lines with their order, customer, product and the customer's
//! sales rep. Order lines without an order are dropped; everything else is a
//! left join.

use std::collections::HashMap;

use crate::domain::entities::{normalize_country, SalesLine, SalesSnapshot};

pub fn build_enriched_base(snapshot: &SalesSnapshot) -> Vec<SalesLine> {
    let orders: HashMap<i64, _> = snapshot
        .orders
        .iter()
        .map(|o| (o.order_number, o))
        .collect();
    let customers: HashMap<i64, _> = snapshot
        .customers
        .iter()
        .map(|c| (c.customer_number, c))
        .collect();
    let products: HashMap<&str, _> = snapshot
        .products
        .iter()
        .map(|p| (p.product_code.as_str(), p))
        .collect();
    let employees: HashMap<i64, _> = snapshot
        .employees
        .iter()
        .map(|e| (e.employee_number, e))
        .collect();

    snapshot
        .order_lines
        .iter()
        .filter_map(|line| {
            let order = orders.get(&line.order_number)?;
            let customer = customers.get(&order.customer_number);
            let product = products.get(line.product_code.as_str());
            let rep = customer
                .and_then(|c| c.sales_rep_employee_number)
                .and_then(|n| employees.get(&n));

            Some(SalesLine {
                order_number: order.order_number,
                order_date: order.order_date,
                required_date: order.required_date,
                shipped_date: order.shipped_date,
                status: order.status.clone(),
                customer_number: order.customer_number,
                product_code: line.product_code.clone(),
                quantity_ordered: line.quantity_ordered,
                price_each: line.price_each,
                customer_name: customer.and_then(|c| c.customer_name.clone()),
                country: customer
                    .and_then(|c| c.country.as_deref())
                    .map(normalize_country),
                city: customer.and_then(|c| c.city.clone()),
                credit_limit: customer.and_then(|c| c.credit_limit),
                sales_rep_employee_number: customer.and_then(|c| c.sales_rep_employee_number),
                product_name: product.map(|p| p.product_name.clone()),
                product_line: product.map(|p| p.product_line.clone()),
                employee_name: rep.map(|e| e.full_name()),
                job_title: rep.map(|e| e.job_title.clone()),
                office_code: rep.map(|e| e.office_code.clone()),
                line_sales: line.quantity_ordered as f64 * line.price_each,
            })
        })
        .collect()
}
