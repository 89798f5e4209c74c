//! SQLite adapters
//!
//! Implementations of the domain ports using SeaORM over a read-only
//! SQLite snapshot.

pub mod report_runner;
pub mod rows;
pub mod sales_repo;

pub use report_runner::SqliteReportRunner;
pub use sales_repo::SqliteSalesRepository;
