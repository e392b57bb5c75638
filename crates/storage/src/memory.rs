//! In-memory expression storage.
//!
//! The default backend for the workspace: expressions are raw strings, so
//! a `BTreeMap` behind a `tokio::sync::RwLock` is sufficient. Reads share
//! the lock; writes hold it only for the map mutation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::ExpressionRecord;
use crate::traits::ExpressionStorage;

struct MemoryInner {
    rows: BTreeMap<i64, String>,
    next_id: i64,
}

/// In-memory `ExpressionStorage` backend.
pub struct MemoryStorage {
    inner: RwLock<MemoryInner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            inner: RwLock::new(MemoryInner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpressionStorage for MemoryStorage {
    async fn create_expression(
        &self,
        expression: &str,
    ) -> Result<ExpressionRecord, StorageError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.rows.insert(id, expression.to_string());
        Ok(ExpressionRecord {
            id,
            expression: expression.to_string(),
        })
    }

    async fn get_expression(&self, id: i64) -> Result<ExpressionRecord, StorageError> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(&id)
            .map(|expression| ExpressionRecord {
                id,
                expression: expression.clone(),
            })
            .ok_or(StorageError::ExpressionNotFound { id })
    }

    async fn list_expressions(&self) -> Result<Vec<ExpressionRecord>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .map(|(id, expression)| ExpressionRecord {
                id: *id,
                expression: expression.clone(),
            })
            .collect())
    }

    async fn update_expression(
        &self,
        id: i64,
        expression: &str,
    ) -> Result<ExpressionRecord, StorageError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(slot) => {
                *slot = expression.to_string();
                Ok(ExpressionRecord {
                    id,
                    expression: expression.to_string(),
                })
            }
            None => Err(StorageError::ExpressionNotFound { id }),
        }
    }
}
