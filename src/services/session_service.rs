use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::instrument;

use crate::db;
use crate::domain::session_validator::validate_session;
use crate::error::AppError;
use crate::models::{CreateSessionRequest, SessionCreated};

#[derive(Clone)]
pub struct SessionService {
    db: SqlitePool,
}

impl SessionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request))]
    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<SessionCreated, AppError> {
        let exercise_ids: Vec<i64> = request.set_logs.iter().map(|s| s.exercise_id).collect();
        if !db::exercises::exists_all(&self.db, &exercise_ids).await? {
            return Err(AppError::InvalidExerciseId);
        }

        let bodyweight_ids: HashSet<i64> = db::exercises::bodyweight_ids(&self.db, &exercise_ids).await?;
        validate_session(&request, &bodyweight_ids)?;

        let session_id = db::sessions::create_session(&self.db, &request).await?;
        Ok(SessionCreated { session_id })
    }
}
