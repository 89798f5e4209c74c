//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod reports;
pub mod repositories;

pub use reports::{ReportRunner, ReportTable};
pub use repositories::SalesRepository;
