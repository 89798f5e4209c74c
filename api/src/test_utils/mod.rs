//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks keep the port traits free of macro attributes and let tests
//! flip a failure switch or swap data between calls.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
