use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{ExerciseHistory, ProgressionRecommendation};
use crate::services::ProgressionService;

#[derive(Clone)]
pub struct RecommendationAppState {
    pub service: ProgressionService,
}

pub fn recommendation_routes(service: ProgressionService) -> Router {
    Router::new()
        .route(
            "/api/users/:user_id/exercises/:exercise_id/recommendation",
            get(recommend_next_load),
        )
        .route(
            "/api/users/:user_id/exercises/:exercise_id/history",
            get(exercise_history),
        )
        .with_state(RecommendationAppState { service })
}

async fn recommend_next_load(
    State(state): State<RecommendationAppState>,
    Path((user_id, exercise_id)): Path<(i64, i64)>,
) -> AppResult<Json<ProgressionRecommendation>> {
    let recommendation = state.service.recommend_next_load(user_id, exercise_id).await?;
    Ok(Json(recommendation))
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
}

async fn exercise_history(
    State(state): State<RecommendationAppState>,
    Path((user_id, exercise_id)): Path<(i64, i64)>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<ExerciseHistory>> {
    let history = state
        .service
        .fetch_exercise_history(user_id, exercise_id, query.limit.unwrap_or(5))
        .await?;
    Ok(Json(history))
}
