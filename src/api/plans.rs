use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{ApplySwapRequest, GeneratePlanRequest, PlanCreated, SwapOption};
use crate::services::{PlanService, SwapService};

#[derive(Clone)]
pub struct PlanAppState {
    pub plan_service: PlanService,
    pub swap_service: SwapService,
}

pub fn plan_routes(plan_service: PlanService, swap_service: SwapService) -> Router {
    Router::new()
        .route("/api/plans", post(generate_plan))
        .route(
            "/api/plans/:plan_id/days/:day_index/slots/:sequence/swap-options",
            axum::routing::get(list_swap_options),
        )
        .route("/api/plans/swap", put(apply_swap))
        .with_state(PlanAppState {
            plan_service,
            swap_service,
        })
}

async fn generate_plan(
    State(state): State<PlanAppState>,
    Json(payload): Json<GeneratePlanRequest>,
) -> AppResult<Json<PlanCreated>> {
    let created = state.plan_service.generate_plan(payload).await?;
    Ok(Json(created))
}

#[derive(Serialize)]
struct SwapOptionsResponse {
    options: Vec<SwapOption>,
}

async fn list_swap_options(
    State(state): State<PlanAppState>,
    Path((plan_id, day_index, sequence)): Path<(i64, i64, i64)>,
) -> AppResult<Json<SwapOptionsResponse>> {
    let options = state
        .swap_service
        .list_swap_options(plan_id, day_index, sequence)
        .await?;
    Ok(Json(SwapOptionsResponse { options }))
}

async fn apply_swap(
    State(state): State<PlanAppState>,
    Json(payload): Json<ApplySwapRequest>,
) -> AppResult<Json<serde_json::Value>> {
    state.swap_service.apply_swap(payload).await?;
    Ok(Json(serde_json::json!({ "status": "swapped" })))
}
