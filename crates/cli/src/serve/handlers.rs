//! HTTP route handlers for the expression CRUD and evaluation API.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::json_error;
use super::state::AppState;
use crate::service::ServiceError;

#[derive(Debug, Deserialize)]
pub(crate) struct ExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpressionResponse {
    pub id: i64,
    pub expression: String,
}

impl From<boolex_storage::ExpressionRecord> for ExpressionResponse {
    fn from(record: boolex_storage::ExpressionRecord) -> Self {
        ExpressionResponse {
            id: record.id,
            expression: record.expression,
        }
    }
}

/// Translate a service error into an HTTP response.
///
/// The client-fault variants keep their detail; anything from the storage
/// backend collapses into a generic 500.
fn service_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::EmptyExpression => {
            json_error(StatusCode::BAD_REQUEST, "expression value can't be empty").into_response()
        }
        ServiceError::InvalidExpression(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid expression provided").into_response()
        }
        ServiceError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "expression not found").into_response()
        }
        err @ ServiceError::MissingParameter { .. } => {
            json_error(StatusCode::BAD_REQUEST, &err.to_string()).into_response()
        }
        ServiceError::Storage(err) => {
            eprintln!("storage error: {}", err);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "an internal server error occurred")
                .into_response()
        }
    }
}

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// POST /expressions
pub(crate) async fn handle_create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExpressionRequest>,
) -> Response {
    match state.service.create(&body.expression).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ExpressionResponse::from(record)),
        )
            .into_response(),
        Err(err) => service_error_response(err),
    }
}

/// GET /expressions
pub(crate) async fn handle_list(State(state): State<Arc<AppState>>) -> Response {
    match state.service.list().await {
        Ok(records) => {
            let body: Vec<ExpressionResponse> =
                records.into_iter().map(ExpressionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

/// PUT /expressions/{id}
pub(crate) async fn handle_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<ExpressionRequest>,
) -> Response {
    match state.service.update(id, &body.expression).await {
        Ok(record) => (StatusCode::OK, Json(ExpressionResponse::from(record))).into_response(),
        Err(err) => service_error_response(err),
    }
}

/// GET /expressions/{id}/parameters
pub(crate) async fn handle_parameters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    match state.service.parameters(id).await {
        Ok(names) => {
            let names: Vec<String> = names.into_iter().collect();
            (StatusCode::OK, Json(serde_json::json!({ "parameters": names }))).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

/// GET /evaluate/{id}?x=1&y=0
///
/// Every query value must be a single integer; the truthiness coercion
/// (value > 0) happens in the engine facade.
pub(crate) async fn handle_evaluate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let mut params = BTreeMap::new();
    for (key, value) in &query {
        match value.parse::<i64>() {
            Ok(n) => {
                params.insert(key.clone(), n);
            }
            Err(_) => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    &format!(
                        "error converting to integer value \"{}\" of the key \"{}\"",
                        value, key
                    ),
                )
                .into_response();
            }
        }
    }

    match state.service.evaluate(id, &params).await {
        Ok(result) => {
            (StatusCode::OK, Json(serde_json::json!({ "result": result }))).into_response()
        }
        Err(err) => service_error_response(err),
    }
}
