//! Expression service: the seam between the engine and storage.
//!
//! The service owns policy -- what may be stored, which bindings an
//! evaluation requires -- while the engine stays a pure function of strings
//! and maps and storage only ever sees validated raw strings.

use std::collections::{BTreeMap, BTreeSet};

use boolex_core::error::{EvalError, ValidationError};
use boolex_storage::{ExpressionRecord, ExpressionStorage, StorageError};

/// Errors surfaced to the HTTP and CLI layers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("expression value can't be empty")]
    EmptyExpression,

    #[error("invalid expression")]
    InvalidExpression(#[source] ValidationError),

    #[error("expression not found: {id}")]
    NotFound { id: i64 },

    /// A required binding was absent at evaluation time. Carries the
    /// original expression text so the caller can show both.
    #[error("missing parameter \"{name}\" for the logical expression \"{expression}\"")]
    MissingParameter { name: String, expression: String },

    #[error(transparent)]
    Storage(StorageError),
}

fn storage_error(err: StorageError) -> ServiceError {
    match err {
        StorageError::ExpressionNotFound { id } => ServiceError::NotFound { id },
        other => ServiceError::Storage(other),
    }
}

pub struct ExpressionService<S> {
    storage: S,
}

impl<S: ExpressionStorage> ExpressionService<S> {
    pub fn new(storage: S) -> Self {
        ExpressionService { storage }
    }

    fn validate(expression: &str) -> Result<(), ServiceError> {
        if expression.trim().is_empty() {
            return Err(ServiceError::EmptyExpression);
        }
        boolex_core::parse_and_validate(expression).map_err(ServiceError::InvalidExpression)
    }

    /// Validate and store a new expression.
    pub async fn create(&self, expression: &str) -> Result<ExpressionRecord, ServiceError> {
        Self::validate(expression)?;
        self.storage
            .create_expression(expression)
            .await
            .map_err(storage_error)
    }

    /// List all stored expressions.
    pub async fn list(&self) -> Result<Vec<ExpressionRecord>, ServiceError> {
        self.storage.list_expressions().await.map_err(storage_error)
    }

    /// Validate and replace the expression stored under `id`.
    pub async fn update(&self, id: i64, expression: &str) -> Result<ExpressionRecord, ServiceError> {
        Self::validate(expression)?;
        self.storage
            .update_expression(id, expression)
            .await
            .map_err(storage_error)
    }

    /// The parameter set of a stored expression.
    pub async fn parameters(&self, id: i64) -> Result<BTreeSet<String>, ServiceError> {
        let record = self.storage.get_expression(id).await.map_err(storage_error)?;
        boolex_core::required_parameters(&record.expression)
            .map_err(ServiceError::InvalidExpression)
    }

    /// Evaluate a stored expression against integer bindings.
    ///
    /// The full parameter set is checked against the supplied keys before
    /// evaluation, so the reported missing name is the alphabetically first
    /// absent one rather than whichever the tree walk hits first.
    pub async fn evaluate(
        &self,
        id: i64,
        params: &BTreeMap<String, i64>,
    ) -> Result<bool, ServiceError> {
        let record = self.storage.get_expression(id).await.map_err(storage_error)?;

        let expected = boolex_core::required_parameters(&record.expression)
            .map_err(ServiceError::InvalidExpression)?;
        for name in &expected {
            if !params.contains_key(name) {
                return Err(ServiceError::MissingParameter {
                    name: name.clone(),
                    expression: record.expression.clone(),
                });
            }
        }

        boolex_core::evaluate(&record.expression, params).map_err(|err| match err {
            EvalError::Invalid(cause) => ServiceError::InvalidExpression(cause),
            EvalError::MissingParameter { name } => ServiceError::MissingParameter {
                name,
                expression: record.expression.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boolex_storage::MemoryStorage;

    fn service() -> ExpressionService<MemoryStorage> {
        ExpressionService::new(MemoryStorage::new())
    }

    fn params(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn create_validates_before_storing() {
        let svc = service();
        let record = svc.create("x AND y").await.unwrap();
        assert_eq!(record.expression, "x AND y");

        assert!(matches!(
            svc.create("x AND").await,
            Err(ServiceError::InvalidExpression(_))
        ));
        assert!(matches!(
            svc.create("   ").await,
            Err(ServiceError::EmptyExpression)
        ));

        // The rejected expressions never reached storage.
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_the_id_and_validates() {
        let svc = service();
        let record = svc.create("x").await.unwrap();

        let updated = svc.update(record.id, "x OR y").await.unwrap();
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.expression, "x OR y");

        assert!(matches!(
            svc.update(record.id, "OR").await,
            Err(ServiceError::InvalidExpression(_))
        ));
        assert!(matches!(
            svc.update(999, "x").await,
            Err(ServiceError::NotFound { id: 999 })
        ));
    }

    #[tokio::test]
    async fn evaluate_reports_first_missing_parameter() {
        let svc = service();
        let record = svc.create("z AND a").await.unwrap();

        let err = svc.evaluate(record.id, &params(&[])).await.unwrap_err();
        match err {
            ServiceError::MissingParameter { name, expression } => {
                assert_eq!(name, "a");
                assert_eq!(expression, "z AND a");
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn evaluate_applies_truthiness() {
        let svc = service();
        let record = svc.create("x AND z").await.unwrap();
        assert!(!svc
            .evaluate(record.id, &params(&[("x", 1), ("z", 0)]))
            .await
            .unwrap());
        assert!(svc
            .evaluate(record.id, &params(&[("x", 5), ("z", 3)]))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn evaluate_unknown_id_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.evaluate(1, &params(&[])).await,
            Err(ServiceError::NotFound { id: 1 })
        ));
    }

    #[tokio::test]
    async fn parameters_projects_the_stored_expression() {
        let svc = service();
        let record = svc.create("(x OR y) AND x").await.unwrap();
        let names: Vec<String> = svc
            .parameters(record.id)
            .await
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }
}
