use sqlx::SqlitePool;
use tracing::instrument;

use crate::db;
use crate::domain::swap::{apply_swap, list_swap_options};
use crate::error::AppError;
use crate::models::{ApplySwapRequest, SwapOption};

#[derive(Clone)]
pub struct SwapService {
    db: SqlitePool,
}

impl SwapService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_swap_options(
        &self,
        plan_id: i64,
        day_index: i64,
        sequence: i64,
    ) -> Result<Vec<SwapOption>, AppError> {
        if plan_id <= 0 {
            return Err(AppError::Validation("plan_id must be positive".into()));
        }
        if day_index < 0 {
            return Err(AppError::Validation("day_index must be non-negative".into()));
        }
        if sequence <= 0 {
            return Err(AppError::Validation("sequence must be positive".into()));
        }

        let planned = db::plans::fetch_planned_exercise_detail(&self.db, plan_id, day_index, sequence).await?;
        let context = db::plans::fetch_plan_context(&self.db, plan_id).await?;
        let questionnaire = db::questionnaires::fetch_questionnaire_response(
            &self.db,
            context.generated_from_questionnaire_id,
        )
        .await?;

        let pool = db::exercises::fetch_pool(
            &self.db,
            &[planned.movement_pattern.clone()],
            &equipment_ids(&questionnaire.equipment_available)?,
        )
        .await?;

        list_swap_options(&planned, &questionnaire, &pool)
    }

    #[instrument(skip(self, request))]
    pub async fn apply_swap(&self, request: ApplySwapRequest) -> Result<(), AppError> {
        if request.plan_id <= 0 || request.day_index < 0 || request.sequence <= 0 || request.exercise_id <= 0 {
            return Err(AppError::Validation(
                "plan_id, day_index, sequence and exercise_id must be valid".into(),
            ));
        }

        let planned = db::plans::fetch_planned_exercise_detail(
            &self.db,
            request.plan_id,
            request.day_index,
            request.sequence,
        )
        .await?;
        let context = db::plans::fetch_plan_context(&self.db, request.plan_id).await?;
        let questionnaire = db::questionnaires::fetch_questionnaire_response(
            &self.db,
            context.generated_from_questionnaire_id,
        )
        .await?;

        let pool = db::exercises::fetch_pool(
            &self.db,
            &[planned.movement_pattern.clone()],
            &equipment_ids(&questionnaire.equipment_available)?,
        )
        .await?;

        let smallest_increment = db::users::fetch_smallest_increment(&self.db, context.user_id).await?;
        let latest_weight =
            db::plans::fetch_latest_performance(&self.db, context.user_id, request.exercise_id).await?;

        let result = apply_swap(
            &planned,
            &questionnaire,
            &pool,
            request.exercise_id,
            latest_weight,
            smallest_increment,
        )?;

        db::plans::apply_swap_transaction(
            &self.db,
            request.plan_id,
            request.day_index,
            request.sequence,
            planned.exercise_id,
            result.new_exercise_id,
            result.starting_weight,
            result.is_initial_load,
        )
        .await
    }
}

fn equipment_ids(equipment_available: &str) -> Result<Vec<String>, AppError> {
    Ok(crate::domain::library::equipment_ids_for(equipment_available)?
        .into_iter()
        .map(|s| s.to_string())
        .collect())
}
