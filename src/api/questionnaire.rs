use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppResult;
use crate::models::{CreateQuestionnaireRequest, QuestionnaireCreated};
use crate::services::QuestionnaireService;

#[derive(Clone)]
pub struct QuestionnaireAppState {
    pub service: QuestionnaireService,
}

pub fn questionnaire_routes(service: QuestionnaireService) -> Router {
    Router::new()
        .route("/api/questionnaires", post(create_questionnaire))
        .with_state(QuestionnaireAppState { service })
}

async fn create_questionnaire(
    State(state): State<QuestionnaireAppState>,
    Json(payload): Json<CreateQuestionnaireRequest>,
) -> AppResult<Json<QuestionnaireCreated>> {
    let created = state.service.create_questionnaire(payload).await?;
    Ok(Json(created))
}
