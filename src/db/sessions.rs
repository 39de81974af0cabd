use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::CreateSessionRequest;

/// Inserts the session row, an optional plan-link row, and every set-log
/// row in one transaction (§5).
pub async fn create_session(db: &SqlitePool, payload: &CreateSessionRequest) -> Result<i64, AppError> {
    let mut tx = db.begin().await?;

    let session_insert = sqlx::query(
        "INSERT INTO workout_sessions \
            (user_id, performed_at, duration_minutes, notes, completion_status, manual_audit_flag) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.user_id)
    .bind(&payload.performed_at)
    .bind(payload.duration_minutes)
    .bind(&payload.notes)
    .bind(&payload.completion_status)
    .bind(payload.manual_audit_flag)
    .execute(&mut *tx)
    .await?;
    let session_id = session_insert.last_insert_rowid();

    if let (Some(plan_id), Some(day_index)) = (payload.plan_id, payload.day_index) {
        sqlx::query(
            "INSERT INTO workout_session_plans (session_id, plan_id, day_index) VALUES (?, ?, ?)",
        )
        .bind(session_id)
        .bind(plan_id)
        .bind(day_index)
        .execute(&mut *tx)
        .await?;
    }

    for set_log in &payload.set_logs {
        sqlx::query(
            "INSERT INTO set_logs \
                (session_id, exercise_id, set_number, reps, weight, rpe, rest_seconds, is_initial_load) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(set_log.exercise_id)
        .bind(set_log.set_number)
        .bind(set_log.reps)
        .bind(set_log.weight)
        .bind(set_log.rpe)
        .bind(set_log.rest_seconds)
        .bind(set_log.is_initial_load)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(session_id)
}
