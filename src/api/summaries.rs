use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::{ApiError, AppState};
use crate::core::accessors;
use crate::infra::db_external::QueryExecutor;
use crate::models::context::{
    GameLogRequest, GoalieSummaryRequest, QueryOutcome, SkaterSummaryRequest, TeamSummaryRequest,
};

type Reply = Result<Json<Value>, ApiError>;

fn success(outcome: QueryOutcome) -> Json<Value> {
    let row_count = outcome.rows.len();
    Json(json!({
        "status": "success",
        "data": outcome.rows,
        "meta": {
            "sql": outcome.sql,
            "row_count": row_count,
            "notices": outcome.notices,
            "source": outcome.disclaimer,
        }
    }))
}

pub async fn health<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
) -> impl IntoResponse {
    match state.warehouse.execute("SELECT 1").await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": e.to_string() })),
        ),
    }
}

pub async fn skaters<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<SkaterSummaryRequest>,
) -> Reply {
    let outcome = accessors::skater_summary(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}

pub async fn goalies<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<GoalieSummaryRequest>,
) -> Reply {
    let outcome = accessors::goalie_summary(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}

pub async fn teams<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<TeamSummaryRequest>,
) -> Reply {
    let outcome = accessors::team_summary(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}

pub async fn team_games<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<GameLogRequest>,
) -> Reply {
    let outcome = accessors::team_games(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}

pub async fn skater_games<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<GameLogRequest>,
) -> Reply {
    let outcome = accessors::skater_games(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}

pub async fn goalie_games<E: QueryExecutor + Send + Sync>(
    State(state): State<Arc<AppState<E>>>,
    Json(payload): Json<GameLogRequest>,
) -> Reply {
    let outcome = accessors::goalie_games(&state.warehouse, &payload).await?;
    Ok(success(outcome))
}
