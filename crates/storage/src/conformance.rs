//! Conformance test suite for `ExpressionStorage` implementations.
//!
//! A backend-agnostic suite that any `ExpressionStorage` implementation can
//! run to verify correctness. It covers:
//!
//! - **Create**: id assignment, monotonic ids
//! - **Read**: stored string round-trips, not-found error variant
//! - **List**: ordering by id, empty backend
//! - **Update**: in-place replacement, not-found error variant
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function
//! that creates a fresh, empty storage instance for each test:
//!
//! ```ignore
//! use boolex_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn memory_conformance() {
//!     let report = run_conformance_suite(|| async { MemoryStorage::new() }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

use std::fmt;
use std::future::Future;

use crate::error::StorageError;
use crate::traits::ExpressionStorage;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test name (e.g. "create_assigns_monotonic_ids").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                name: name.to_string(),
                passed: true,
                message: None,
            },
            Err(msg) => Self {
                name: name.to_string(),
                passed: false,
                message: Some(msg),
            },
        }
    }
}

/// Aggregate outcome of a conformance run.
#[derive(Debug, Clone, Default)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
}

impl ConformanceReport {
    fn push(&mut self, result: TestResult) {
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "conformance: {} passed, {} failed", self.passed, self.failed)?;
        for result in &self.results {
            if !result.passed {
                writeln!(
                    f,
                    "  FAIL {}: {}",
                    result.name,
                    result.message.as_deref().unwrap_or("")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a backend.
///
/// `factory` must return a fresh, empty storage instance on each call.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: ExpressionStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut report = ConformanceReport::default();

    report.push(TestResult::from_result(
        "create_assigns_monotonic_ids",
        create_assigns_monotonic_ids(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "get_round_trips_stored_string",
        get_round_trips_stored_string(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "get_unknown_id_is_not_found",
        get_unknown_id_is_not_found(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "list_is_ordered_by_id",
        list_is_ordered_by_id(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "list_on_empty_backend_is_empty",
        list_on_empty_backend_is_empty(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "update_replaces_in_place",
        update_replaces_in_place(factory().await).await,
    ));
    report.push(TestResult::from_result(
        "update_unknown_id_is_not_found",
        update_unknown_id_is_not_found(factory().await).await,
    ));

    report
}

async fn create_assigns_monotonic_ids<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    let first = storage
        .create_expression("x AND y")
        .await
        .map_err(|e| e.to_string())?;
    let second = storage
        .create_expression("x OR y")
        .await
        .map_err(|e| e.to_string())?;
    if second.id <= first.id {
        return Err(format!(
            "expected ids to grow, got {} then {}",
            first.id, second.id
        ));
    }
    Ok(())
}

async fn get_round_trips_stored_string<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    let created = storage
        .create_expression("(x OR y) AND z")
        .await
        .map_err(|e| e.to_string())?;
    let fetched = storage
        .get_expression(created.id)
        .await
        .map_err(|e| e.to_string())?;
    if fetched != created {
        return Err(format!("expected {created:?}, got {fetched:?}"));
    }
    Ok(())
}

async fn get_unknown_id_is_not_found<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    match storage.get_expression(42).await {
        Err(StorageError::ExpressionNotFound { id: 42 }) => Ok(()),
        other => Err(format!("expected ExpressionNotFound, got {other:?}")),
    }
}

async fn list_is_ordered_by_id<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    for src in ["a", "b AND c", "d OR e"] {
        storage
            .create_expression(src)
            .await
            .map_err(|e| e.to_string())?;
    }
    let rows = storage.list_expressions().await.map_err(|e| e.to_string())?;
    if rows.len() != 3 {
        return Err(format!("expected 3 rows, got {}", rows.len()));
    }
    if !rows.windows(2).all(|w| w[0].id < w[1].id) {
        return Err(format!("rows not ordered by id: {rows:?}"));
    }
    Ok(())
}

async fn list_on_empty_backend_is_empty<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    let rows = storage.list_expressions().await.map_err(|e| e.to_string())?;
    if !rows.is_empty() {
        return Err(format!("expected no rows, got {rows:?}"));
    }
    Ok(())
}

async fn update_replaces_in_place<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    let created = storage
        .create_expression("x")
        .await
        .map_err(|e| e.to_string())?;
    let updated = storage
        .update_expression(created.id, "x AND y")
        .await
        .map_err(|e| e.to_string())?;
    if updated.id != created.id || updated.expression != "x AND y" {
        return Err(format!("unexpected updated record: {updated:?}"));
    }
    let fetched = storage
        .get_expression(created.id)
        .await
        .map_err(|e| e.to_string())?;
    if fetched.expression != "x AND y" {
        return Err(format!("update not visible on read: {fetched:?}"));
    }
    Ok(())
}

async fn update_unknown_id_is_not_found<S: ExpressionStorage>(storage: S) -> Result<(), String> {
    match storage.update_expression(7, "x").await {
        Err(StorageError::ExpressionNotFound { id: 7 }) => Ok(()),
        other => Err(format!("expected ExpressionNotFound, got {other:?}")),
    }
}
