use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::domain::progression::HistorySession;
use crate::error::AppError;
use crate::models::{BestSet, ExerciseHistory, SessionSummary, SetLogRow};

#[derive(sqlx::FromRow)]
struct RecentSessionRow {
    id: i64,
    performed_at: String,
    duration_minutes: Option<i64>,
    notes: Option<String>,
    completion_status: String,
    manual_audit_flag: bool,
}

async fn fetch_recent_session_rows(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
    limit_sessions: i64,
) -> Result<Vec<RecentSessionRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT ws.id, ws.performed_at, ws.duration_minutes, ws.notes, ws.completion_status, ws.manual_audit_flag \
         FROM workout_sessions ws \
         JOIN set_logs sl ON sl.session_id = ws.id \
         WHERE ws.user_id = ? AND sl.exercise_id = ? \
         GROUP BY ws.id \
         ORDER BY ws.performed_at DESC \
         LIMIT ?",
    )
    .bind(user_id)
    .bind(exercise_id)
    .bind(limit_sessions)
    .fetch_all(db)
    .await?)
}

async fn fetch_set_logs_for_sessions(
    db: &SqlitePool,
    session_ids: &[i64],
    exercise_id: i64,
) -> Result<Vec<SetLogRow>, AppError> {
    if session_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = session_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT session_id, exercise_id, set_number, reps, weight, rpe, rest_seconds, is_initial_load \
         FROM set_logs \
         WHERE exercise_id = ? AND session_id IN ({placeholders}) \
         ORDER BY session_id DESC, set_number ASC"
    );
    let mut query = sqlx::query_as::<_, SetLogRow>(&sql);
    query = query.bind(exercise_id);
    for id in session_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db).await?)
}

async fn fetch_best_sets(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
    limit_sets: i64,
) -> Result<Vec<BestSet>, AppError> {
    Ok(sqlx::query_as(
        "SELECT ws.id AS session_id, ws.performed_at, sl.set_number, sl.reps, sl.weight, sl.rpe, sl.rest_seconds \
         FROM set_logs sl \
         JOIN workout_sessions ws ON ws.id = sl.session_id \
         WHERE ws.user_id = ? AND sl.exercise_id = ? \
         ORDER BY sl.weight DESC, sl.reps DESC, sl.rpe DESC \
         LIMIT ?",
    )
    .bind(user_id)
    .bind(exercise_id)
    .bind(limit_sets)
    .fetch_all(db)
    .await?)
}

async fn fetch_baseline_established(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
) -> Result<bool, AppError> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 \
         FROM set_logs sl \
         JOIN workout_sessions ws ON ws.id = sl.session_id \
         WHERE ws.user_id = ? AND sl.exercise_id = ? AND sl.is_initial_load = 1 \
         LIMIT 1",
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_optional(db)
    .await?;
    Ok(row.is_some())
}

pub async fn fetch_exercise_history(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
    limit_sessions: i64,
) -> Result<ExerciseHistory, AppError> {
    let recent_rows = fetch_recent_session_rows(db, user_id, exercise_id, limit_sessions).await?;
    let session_ids: Vec<i64> = recent_rows.iter().map(|r| r.id).collect();
    let set_rows = fetch_set_logs_for_sessions(db, &session_ids, exercise_id).await?;

    let mut sets_by_session: HashMap<i64, Vec<SetLogRow>> = HashMap::new();
    for row in set_rows {
        sets_by_session.entry(row.session_id).or_default().push(row);
    }

    let recent_sessions = recent_rows
        .into_iter()
        .map(|row| SessionSummary {
            session_id: row.id,
            performed_at: row.performed_at,
            duration_minutes: row.duration_minutes,
            notes: row.notes,
            completion_status: row.completion_status,
            sets: sets_by_session.remove(&row.id).unwrap_or_default(),
        })
        .collect();

    let best_sets = fetch_best_sets(db, user_id, exercise_id, 3).await?;
    let baseline_established = fetch_baseline_established(db, user_id, exercise_id).await?;

    Ok(ExerciseHistory {
        recent_sessions,
        best_sets,
        baseline_established,
        baseline_status: baseline_established.then(|| "Baseline established".to_string()),
    })
}

/// Assembles `HistorySession`s (newest first, with `manual_audit_flag`)
/// for the progression engine, up to the most recent 3 sessions (§4.7).
pub async fn fetch_progression_history(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
) -> Result<Vec<HistorySession>, AppError> {
    let recent_rows = fetch_recent_session_rows(db, user_id, exercise_id, 3).await?;
    let session_ids: Vec<i64> = recent_rows.iter().map(|r| r.id).collect();
    let set_rows = fetch_set_logs_for_sessions(db, &session_ids, exercise_id).await?;

    let mut sets_by_session: HashMap<i64, Vec<SetLogRow>> = HashMap::new();
    for row in set_rows {
        sets_by_session.entry(row.session_id).or_default().push(row);
    }

    Ok(recent_rows
        .into_iter()
        .map(|row| HistorySession {
            summary: SessionSummary {
                session_id: row.id,
                performed_at: row.performed_at,
                duration_minutes: row.duration_minutes,
                notes: row.notes,
                completion_status: row.completion_status,
                sets: sets_by_session.remove(&row.id).unwrap_or_default(),
            },
            manual_audit_flag: row.manual_audit_flag,
        })
        .collect())
}
