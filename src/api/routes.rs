use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{
    health::health_routes, plans::plan_routes, questionnaire::questionnaire_routes,
    recommendations::recommendation_routes, sessions::session_routes,
};
use crate::services::{PlanService, ProgressionService, QuestionnaireService, SessionService, SwapService};

/// Assembles every resource router onto a shared `SqlitePool`, mirroring
/// the teacher's one-builder-function-per-module convention.
pub fn create_routes(db: SqlitePool) -> Router {
    let questionnaire_service = QuestionnaireService::new(db.clone());
    let plan_service = PlanService::new(db.clone());
    let swap_service = SwapService::new(db.clone());
    let session_service = SessionService::new(db.clone());
    let progression_service = ProgressionService::new(db);

    Router::new()
        .merge(health_routes())
        .merge(questionnaire_routes(questionnaire_service))
        .merge(plan_routes(plan_service, swap_service))
        .merge(session_routes(session_service))
        .merge(recommendation_routes(progression_service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
