//! Authentication

pub mod admin_token;

pub use admin_token::{admin_middleware, hash_token};
