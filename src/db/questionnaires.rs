use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{CreateQuestionnaireRequest, QuestionnaireResponse};

fn join_days(days: &Option<Vec<i64>>) -> Option<String> {
    days.as_ref()
        .map(|d| d.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(","))
}

fn parse_days(value: &Option<String>) -> Option<Vec<i64>> {
    value.as_ref().map(|raw| {
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    })
}

fn join_focus_areas(areas: &Option<Vec<String>>) -> Option<String> {
    areas.as_ref().map(|a| a.join(","))
}

fn parse_focus_areas(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[derive(sqlx::FromRow)]
struct QuestionnaireRow {
    id: i64,
    user_id: i64,
    goals: String,
    experience_level: String,
    schedule_days: i64,
    equipment_available: String,
    training_days_of_week: Option<String>,
    split_variant: Option<String>,
    session_duration_minutes: Option<i64>,
    focus_areas: Option<String>,
    excluded_patterns: Option<String>,
    injuries_constraints: Option<String>,
}

impl From<QuestionnaireRow> for QuestionnaireResponse {
    fn from(row: QuestionnaireRow) -> Self {
        QuestionnaireResponse {
            id: row.id,
            user_id: row.user_id,
            goals: row.goals,
            experience_level: row.experience_level,
            schedule_days: row.schedule_days,
            equipment_available: row.equipment_available,
            training_days_of_week: parse_days(&row.training_days_of_week),
            split_variant: row.split_variant,
            session_duration_minutes: row.session_duration_minutes,
            focus_areas: parse_focus_areas(&row.focus_areas),
            excluded_patterns: row.excluded_patterns,
            injuries_constraints: row.injuries_constraints,
        }
    }
}

pub async fn fetch_questionnaire_response(
    db: &SqlitePool,
    id: i64,
) -> Result<QuestionnaireResponse, AppError> {
    let row: Option<QuestionnaireRow> = sqlx::query_as(
        "SELECT id, user_id, goals, experience_level, schedule_days, equipment_available, \
                training_days_of_week, split_variant, session_duration_minutes, focus_areas, \
                excluded_patterns, injuries_constraints \
         FROM questionnaire_responses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    row.map(Into::into).ok_or(AppError::QuestionnaireNotFound)
}

/// Updates the user's `smallest_increment` and inserts the questionnaire
/// row inside one transaction (§5).
pub async fn create_questionnaire(
    db: &SqlitePool,
    payload: &CreateQuestionnaireRequest,
) -> Result<i64, AppError> {
    let mut tx = db.begin().await?;

    let updated = sqlx::query("UPDATE users SET smallest_increment = ? WHERE id = ?")
        .bind(payload.smallest_increment)
        .bind(payload.user_id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO users (id, smallest_increment) VALUES (?, ?)")
            .bind(payload.user_id)
            .bind(payload.smallest_increment)
            .execute(&mut *tx)
            .await?;
    }

    let training_days = join_days(&payload.training_days_of_week);
    let focus_areas = join_focus_areas(&payload.focus_areas);

    let inserted = sqlx::query(
        "INSERT INTO questionnaire_responses \
            (user_id, goals, experience_level, schedule_days, equipment_available, \
             training_days_of_week, split_variant, session_duration_minutes, focus_areas, \
             excluded_patterns, injuries_constraints) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.user_id)
    .bind(&payload.goals)
    .bind(&payload.experience_level)
    .bind(payload.schedule_days)
    .bind(&payload.equipment_available)
    .bind(training_days)
    .bind(&payload.split_variant)
    .bind(payload.session_duration_minutes)
    .bind(focus_areas)
    .bind(&payload.excluded_patterns)
    .bind(&payload.injuries_constraints)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(inserted.last_insert_rowid())
}
