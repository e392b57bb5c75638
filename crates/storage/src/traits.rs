use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::ExpressionRecord;

/// The storage trait for expression backends.
///
/// An `ExpressionStorage` implementation provides durable storage for raw
/// expression strings keyed by a backend-assigned id. Ids start at 1 and
/// are never reused within one backend instance.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait ExpressionStorage: Send + Sync + 'static {
    /// Store a new expression, returning the record with its assigned id.
    async fn create_expression(&self, expression: &str)
        -> Result<ExpressionRecord, StorageError>;

    /// Read a stored expression by id.
    ///
    /// Returns `Err(StorageError::ExpressionNotFound)` if no record exists.
    async fn get_expression(&self, id: i64) -> Result<ExpressionRecord, StorageError>;

    /// List all stored expressions, ordered by id.
    async fn list_expressions(&self) -> Result<Vec<ExpressionRecord>, StorageError>;

    /// Replace the expression stored under `id`, returning the updated record.
    ///
    /// Returns `Err(StorageError::ExpressionNotFound)` if no record exists.
    async fn update_expression(
        &self,
        id: i64,
        expression: &str,
    ) -> Result<ExpressionRecord, StorageError>;
}
