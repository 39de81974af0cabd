use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::db;
use crate::domain::auditor::audit_plan;
use crate::domain::composer::{compose_plan, required_patterns};
use crate::domain::library::equipment_ids_for;
use crate::error::AppError;
use crate::models::{Exercise, GeneratePlanRequest, PlanCreated};

#[derive(Clone)]
pub struct PlanService {
    db: SqlitePool,
}

impl PlanService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request))]
    pub async fn generate_plan(&self, request: GeneratePlanRequest) -> Result<PlanCreated, AppError> {
        if request.questionnaire_id <= 0 {
            return Err(AppError::Validation("questionnaire_id must be positive".into()));
        }
        let weeks = request.weeks.unwrap_or(4);
        if weeks <= 0 {
            return Err(AppError::Validation("weeks must be positive".into()));
        }
        let start_date = request.start_date.unwrap_or_else(|| Utc::now().date_naive());
        let name = request.name.unwrap_or_else(|| "Generated Plan".to_string());

        let questionnaire =
            db::questionnaires::fetch_questionnaire_response(&self.db, request.questionnaire_id)
                .await?;
        let smallest_increment = db::users::fetch_smallest_increment(&self.db, questionnaire.user_id).await?;

        let patterns = required_patterns(&questionnaire)?;
        let allowed_equipment = equipment_ids_for(&questionnaire.equipment_available)?;
        let equipment_ids: Vec<String> = allowed_equipment.into_iter().map(|s| s.to_string()).collect();
        let pool = db::exercises::fetch_pool(&self.db, &patterns, &equipment_ids).await?;

        // Materialise the latest-performance snapshot before composition;
        // composer output is never re-read against a concurrent write (§9).
        let candidate_ids: Vec<i64> = pool.iter().map(|e| e.id).collect();
        let latest = db::plans::fetch_latest_performances(&self.db, questionnaire.user_id, &candidate_ids).await?;
        let latest_lookup = |exercise_id: i64| -> Option<f64> { latest.get(&exercise_id).copied() };

        let days = compose_plan(&questionnaire, &pool, smallest_increment, &latest_lookup)?;

        let exercises_by_id: HashMap<i64, Exercise> = pool.into_iter().map(|e| (e.id, e)).collect();
        audit_plan(&days, &questionnaire, &exercises_by_id)?;

        let plan_id = db::plans::create_workout_plan(
            &self.db,
            questionnaire.user_id,
            &name,
            start_date,
            weeks,
            questionnaire.id,
            &days,
        )
        .await?;

        Ok(PlanCreated { plan_id })
    }

    pub fn start_date_today() -> NaiveDate {
        Utc::now().date_naive()
    }
}
