//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing. They keep
//! their data behind `Arc<RwLock<..>>` so tests can swap it mid-run and
//! inspect what was asked of them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::SalesSnapshot;
use crate::domain::ports::{ReportRunner, ReportTable, SalesRepository};
use crate::error::{DomainError, ReportError};

// ============================================================================
// In-Memory Sales Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySalesRepository {
    snapshot: Arc<RwLock<SalesSnapshot>>,
    pub should_fail: Arc<RwLock<bool>>,
    pub loads: Arc<RwLock<usize>>,
}

impl InMemorySalesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a snapshot for testing
    pub fn with_snapshot(self, snapshot: SalesSnapshot) -> Self {
        *self.snapshot.write().unwrap() = snapshot;
        self
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        *repo.should_fail.write().unwrap() = true;
        repo
    }

    /// Replace the data returned by the next load
    pub fn set_snapshot(&self, snapshot: SalesSnapshot) {
        *self.snapshot.write().unwrap() = snapshot;
    }

    pub fn load_count(&self) -> usize {
        *self.loads.read().unwrap()
    }
}

#[async_trait]
impl SalesRepository for InMemorySalesRepository {
    async fn load_snapshot(&self) -> Result<SalesSnapshot, DomainError> {
        *self.loads.write().unwrap() += 1;
        if *self.should_fail.read().unwrap() {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(self.snapshot.read().unwrap().clone())
    }
}

// ============================================================================
// Mock Report Runner
// ============================================================================

/// A report runner that returns canned tables and records the SQL and
/// bound params it was given
#[derive(Default)]
pub struct MockReportRunner {
    tables: Arc<RwLock<HashMap<String, ReportTable>>>,
    pub executed: Arc<RwLock<Vec<(String, String, Vec<i64>)>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl MockReportRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let runner = Self::default();
        *runner.should_fail.write().unwrap() = true;
        runner
    }

    pub fn with_table(self, table: ReportTable) -> Self {
        self.tables
            .write()
            .unwrap()
            .insert(table.id.clone(), table);
        self
    }

    /// Report ids in the order they were run
    pub fn executed_ids(&self) -> Vec<String> {
        self.executed
            .read()
            .unwrap()
            .iter()
            .map(|(id, _, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl ReportRunner for MockReportRunner {
    async fn run(&self, id: &str, sql: &str, params: &[i64]) -> Result<ReportTable, ReportError> {
        self.executed
            .write()
            .unwrap()
            .push((id.to_string(), sql.to_string(), params.to_vec()));

        if *self.should_fail.read().unwrap() {
            return Err(ReportError::Execution {
                id: id.to_string(),
                message: "Mock failure".to_string(),
            });
        }

        Ok(self
            .tables
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| ReportTable {
                id: id.to_string(),
                ..Default::default()
            }))
    }
}
