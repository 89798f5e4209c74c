//! SQLite adapter for SalesRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use super::rows::{
    CustomerRow, EmployeeRow, OfficeRow, OrderLineRow, OrderRow, PaymentRow, ProductRow,
};
use crate::domain::entities::SalesSnapshot;
use crate::domain::ports::SalesRepository;
use crate::error::DomainError;

const ORDERS_SQL: &str = r#"
SELECT CAST(orderNumber AS INTEGER) AS order_number,
       CAST(orderDate AS TEXT) AS order_date,
       CAST(requiredDate AS TEXT) AS required_date,
       CAST(shippedDate AS TEXT) AS shipped_date,
       status,
       CAST(customerNumber AS INTEGER) AS customer_number
FROM orders
"#;

const ORDER_LINES_SQL: &str = r#"
SELECT CAST(orderNumber AS INTEGER) AS order_number,
       productCode AS product_code,
       CAST(quantityOrdered AS INTEGER) AS quantity_ordered,
       CAST(priceEach AS REAL) AS price_each,
       CAST(orderLineNumber AS INTEGER) AS order_line_number
FROM orderdetails
"#;

const CUSTOMERS_SQL: &str = r#"
SELECT CAST(customerNumber AS INTEGER) AS customer_number,
       customerName AS customer_name,
       country,
       city,
       CAST(creditLimit AS REAL) AS credit_limit,
       CAST(salesRepEmployeeNumber AS INTEGER) AS sales_rep_employee_number
FROM customers
"#;

const PRODUCTS_SQL: &str = r#"
SELECT productCode AS product_code,
       productName AS product_name,
       productLine AS product_line,
       CAST(quantityInStock AS INTEGER) AS quantity_in_stock,
       CAST(buyPrice AS REAL) AS buy_price,
       CAST(MSRP AS REAL) AS msrp
FROM products
"#;

const EMPLOYEES_SQL: &str = r#"
SELECT CAST(employeeNumber AS INTEGER) AS employee_number,
       firstName AS first_name,
       lastName AS last_name,
       jobTitle AS job_title,
       CAST(officeCode AS TEXT) AS office_code,
       CAST(reportsTo AS INTEGER) AS reports_to
FROM employees
"#;

const PAYMENTS_SQL: &str = r#"
SELECT CAST(customerNumber AS INTEGER) AS customer_number,
       checkNumber AS check_number,
       CAST(paymentDate AS TEXT) AS payment_date,
       CAST(amount AS REAL) AS amount
FROM payments
"#;

const OFFICES_SQL: &str = r#"
SELECT CAST(officeCode AS TEXT) AS office_code,
       city,
       country,
       territory
FROM offices
"#;

/// SQLite implementation of SalesRepository
pub struct SqliteSalesRepository {
    db: DatabaseConnection,
}

impl SqliteSalesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch<T, E>(&self, table: &str, sql: &str) -> Result<Vec<E>, DomainError>
    where
        T: FromQueryResult + Into<E>,
    {
        let rows = T::find_by_statement(Statement::from_string(DbBackend::Sqlite, sql))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(format!("{}: {}", table, e)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl SalesRepository for SqliteSalesRepository {
    async fn load_snapshot(&self) -> Result<SalesSnapshot, DomainError> {
        let snapshot = SalesSnapshot {
            orders: self.fetch::<OrderRow, _>("orders", ORDERS_SQL).await?,
            order_lines: self
                .fetch::<OrderLineRow, _>("orderdetails", ORDER_LINES_SQL)
                .await?,
            customers: self
                .fetch::<CustomerRow, _>("customers", CUSTOMERS_SQL)
                .await?,
            products: self.fetch::<ProductRow, _>("products", PRODUCTS_SQL).await?,
            employees: self
                .fetch::<EmployeeRow, _>("employees", EMPLOYEES_SQL)
                .await?,
            payments: self.fetch::<PaymentRow, _>("payments", PAYMENTS_SQL).await?,
            offices: self.fetch::<OfficeRow, _>("offices", OFFICES_SQL).await?,
        };

        tracing::debug!(
            orders = snapshot.orders.len(),
            order_lines = snapshot.order_lines.len(),
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }
}
