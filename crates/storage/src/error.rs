/// All errors that can be returned by an ExpressionStorage implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No stored expression with the given id.
    #[error("expression not found: {id}")]
    ExpressionNotFound { id: i64 },

    /// A backend-specific storage error (connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
