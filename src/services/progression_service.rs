use sqlx::SqlitePool;
use tracing::instrument;

use crate::db;
use crate::domain::progression::recommend_progression;
use crate::error::AppError;
use crate::models::{ExerciseHistory, ProgressionRecommendation};

#[derive(Clone)]
pub struct ProgressionService {
    db: SqlitePool,
}

impl ProgressionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn recommend_next_load(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<ProgressionRecommendation, AppError> {
        let smallest_increment = db::users::fetch_smallest_increment(&self.db, user_id).await?;
        let exercises = db::exercises::fetch_by_ids(&self.db, &[exercise_id]).await?;
        let exercise = exercises.into_iter().next().ok_or(AppError::InvalidExerciseId)?;

        let history = db::history::fetch_progression_history(&self.db, user_id, exercise_id).await?;
        recommend_progression(&history, &exercise, smallest_increment)
    }

    #[instrument(skip(self))]
    pub async fn fetch_exercise_history(
        &self,
        user_id: i64,
        exercise_id: i64,
        limit: i64,
    ) -> Result<ExerciseHistory, AppError> {
        db::history::fetch_exercise_history(&self.db, user_id, exercise_id, limit).await
    }
}
