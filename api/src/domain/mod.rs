//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Snapshot records, sales lines and report rows
//! - `ports`: Trait definitions for the data source

pub mod entities;
pub mod ports;
