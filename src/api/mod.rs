pub mod summaries;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::error::QueryError;
use crate::infra::db_external::QueryExecutor;

pub struct AppState<E> {
    pub warehouse: E,
}

pub fn router<E>(state: Arc<AppState<E>>) -> Router
where
    E: QueryExecutor + Send + Sync + 'static,
{
    Router::new()
        .route("/api/health", get(summaries::health::<E>))
        .route("/api/skaters", post(summaries::skaters::<E>))
        .route("/api/goalies", post(summaries::goalies::<E>))
        .route("/api/teams", post(summaries::teams::<E>))
        .route("/api/team_games", post(summaries::team_games::<E>))
        .route("/api/skater_games", post(summaries::skater_games::<E>))
        .route("/api/goalie_games", post(summaries::goalie_games::<E>))
        .with_state(state)
}

/// Maps query failures onto HTTP status codes.
pub struct ApiError(pub QueryError);

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            QueryError::Execution(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status != StatusCode::BAD_REQUEST {
            warn!(error = %self.0, "query failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
