//! Repository port traits
//!
//! These traits define how the dashboard reads its data.
//! Implementations are provided by adapters (e.g., SQLite).

use async_trait::async_trait;

use crate::domain::entities::SalesSnapshot;
use crate::error::DomainError;

/// Read-only access to the Classic Models tables
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Load every input table in one pass
    async fn load_snapshot(&self) -> Result<SalesSnapshot, DomainError>;
}
