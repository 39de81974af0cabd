use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppResult;
use crate::models::{CreateSessionRequest, SessionCreated};
use crate::services::SessionService;

#[derive(Clone)]
pub struct SessionAppState {
    pub service: SessionService,
}

pub fn session_routes(service: SessionService) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session))
        .with_state(SessionAppState { service })
}

async fn create_session(
    State(state): State<SessionAppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> AppResult<Json<SessionCreated>> {
    let created = state.service.create_session(payload).await?;
    Ok(Json(created))
}
