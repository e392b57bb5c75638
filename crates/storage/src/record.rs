use serde::{Deserialize, Serialize};

/// A stored expression as held by the backend.
///
/// The stored form is the raw source string; the parsed AST is never
/// persisted. Validation happens in the service layer before a record
/// reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    pub id: i64,
    pub expression: String,
}
