use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{Plan, PlanDay, PlannedExerciseDetail};

pub struct PlanContext {
    pub user_id: i64,
    pub generated_from_questionnaire_id: i64,
}

pub async fn fetch_plan_context(db: &SqlitePool, plan_id: i64) -> Result<PlanContext, AppError> {
    let row: Option<(i64, i64)> = sqlx::query_as(
        "SELECT user_id, generated_from_questionnaire_id FROM plans WHERE id = ?",
    )
    .bind(plan_id)
    .fetch_optional(db)
    .await?;
    row.map(|(user_id, generated_from_questionnaire_id)| PlanContext {
        user_id,
        generated_from_questionnaire_id,
    })
    .ok_or(AppError::PlanNotFound)
}

pub async fn fetch_planned_exercise_detail(
    db: &SqlitePool,
    plan_id: i64,
    day_index: i64,
    sequence: i64,
) -> Result<PlannedExerciseDetail, AppError> {
    let row: Option<PlannedExerciseDetail> = sqlx::query_as(
        "SELECT pe.plan_id, pe.day_index, pe.sequence, pe.session_type, pe.exercise_id, \
                e.movement_pattern, e.category, e.equipment_id, e.primary_muscle \
         FROM planned_exercises pe \
         JOIN exercises e ON e.id = pe.exercise_id \
         WHERE pe.plan_id = ? AND pe.day_index = ? AND pe.sequence = ?",
    )
    .bind(plan_id)
    .bind(day_index)
    .bind(sequence)
    .fetch_optional(db)
    .await?;
    row.ok_or(AppError::PlannedExerciseNotFound)
}

/// Most recent non-skipped set's weight for a (user, exercise) pair.
pub async fn fetch_latest_performance(
    db: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
) -> Result<Option<f64>, AppError> {
    let row: Option<(f64,)> = sqlx::query_as(
        "SELECT sl.weight \
         FROM set_logs sl \
         JOIN workout_sessions ws ON ws.id = sl.session_id \
         WHERE ws.user_id = ? AND sl.exercise_id = ? \
           AND ws.completion_status != 'skipped' AND sl.weight IS NOT NULL \
         ORDER BY ws.performed_at DESC, sl.set_number ASC \
         LIMIT 1",
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(w,)| w))
}

/// Bulk fetch of latest performance for several exercise ids, used by the
/// composer's starting-load step so it only needs one read snapshot (§9).
pub async fn fetch_latest_performances(
    db: &SqlitePool,
    user_id: i64,
    exercise_ids: &[i64],
) -> Result<std::collections::HashMap<i64, f64>, AppError> {
    let mut out = std::collections::HashMap::new();
    let unique: HashSet<i64> = exercise_ids.iter().copied().collect();
    for exercise_id in unique {
        if let Some(weight) = fetch_latest_performance(db, user_id, exercise_id).await? {
            out.insert(exercise_id, weight);
        }
    }
    Ok(out)
}

/// Inserts the plan row, its per-day workout rows, and every planned
/// exercise slot in one transaction (§5). Slot order is deterministic:
/// `(day_index asc, sequence asc)`.
pub async fn create_workout_plan(
    db: &SqlitePool,
    user_id: i64,
    name: &str,
    start_date: NaiveDate,
    weeks: i64,
    questionnaire_id: i64,
    days: &[PlanDay],
) -> Result<i64, AppError> {
    let mut tx = db.begin().await?;

    let plan_insert = sqlx::query(
        "INSERT INTO plans (user_id, name, start_date, weeks, generated_from_questionnaire_id) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(name)
    .bind(start_date.to_string())
    .bind(weeks)
    .bind(questionnaire_id)
    .execute(&mut *tx)
    .await?;
    let plan_id = plan_insert.last_insert_rowid();

    let mut sorted_days: Vec<&PlanDay> = days.iter().collect();
    sorted_days.sort_by_key(|d| d.day_index);

    for day in &sorted_days {
        sqlx::query("INSERT INTO plan_workouts (plan_id, day_index) VALUES (?, ?)")
            .bind(plan_id)
            .bind(day.day_index)
            .execute(&mut *tx)
            .await?;

        let mut slots = day.slots.clone();
        slots.sort_by_key(|s| s.sequence);

        for slot in &slots {
            sqlx::query(
                "INSERT INTO planned_exercises \
                    (plan_id, day_index, sequence, session_type, exercise_id, \
                     target_sets, target_reps_min, target_reps_max, starting_weight, is_initial_load) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(plan_id)
            .bind(slot.day_index)
            .bind(slot.sequence)
            .bind(&slot.session_type)
            .bind(slot.exercise_id)
            .bind(slot.target_sets)
            .bind(slot.target_reps_min)
            .bind(slot.target_reps_max)
            .bind(slot.starting_weight)
            .bind(slot.is_initial_load)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(plan_id)
}

pub async fn fetch_plan(db: &SqlitePool, plan_id: i64) -> Result<Plan, AppError> {
    let row: Option<(i64, i64, String, String, i64, i64)> = sqlx::query_as(
        "SELECT id, user_id, name, start_date, weeks, generated_from_questionnaire_id \
         FROM plans WHERE id = ?",
    )
    .bind(plan_id)
    .fetch_optional(db)
    .await?;
    let (id, user_id, name, start_date, weeks, generated_from_questionnaire_id) =
        row.ok_or(AppError::PlanNotFound)?;
    Ok(Plan {
        id,
        user_id,
        name,
        start_date: start_date.parse().map_err(|_| AppError::Internal(anyhow::anyhow!("corrupt start_date")))?,
        weeks,
        generated_from_questionnaire_id,
    })
}

/// Updates a slot's exercise/starting-weight and appends a swap-audit row
/// in one transaction (§4.6).
pub async fn apply_swap_transaction(
    db: &SqlitePool,
    plan_id: i64,
    day_index: i64,
    sequence: i64,
    previous_exercise_id: i64,
    new_exercise_id: i64,
    starting_weight: f64,
    is_initial_load: bool,
) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    sqlx::query(
        "UPDATE planned_exercises \
         SET exercise_id = ?, starting_weight = ?, is_initial_load = ? \
         WHERE plan_id = ? AND day_index = ? AND sequence = ?",
    )
    .bind(new_exercise_id)
    .bind(starting_weight)
    .bind(is_initial_load)
    .bind(plan_id)
    .bind(day_index)
    .bind(sequence)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO planned_exercise_swaps \
            (plan_id, day_index, sequence, previous_exercise_id, new_exercise_id) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(plan_id)
    .bind(day_index)
    .bind(sequence)
    .bind(previous_exercise_id)
    .bind(new_exercise_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
