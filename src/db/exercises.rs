use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Exercise;

/// Every exercise whose pattern is in `patterns` AND whose equipment id is
/// in `equipment_ids`, ordered by name ascending. Empty inputs yield an
/// empty result without touching the store (§4.2).
pub async fn fetch_pool(
    db: &SqlitePool,
    patterns: &[String],
    equipment_ids: &[String],
) -> Result<Vec<Exercise>, AppError> {
    if patterns.is_empty() || equipment_ids.is_empty() {
        return Ok(Vec::new());
    }

    let pattern_placeholders = patterns.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let equipment_placeholders = equipment_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT id, name, movement_pattern, category, equipment_id, primary_muscle \
         FROM exercises \
         WHERE movement_pattern IN ({pattern_placeholders}) \
           AND equipment_id IN ({equipment_placeholders}) \
         ORDER BY name ASC"
    );

    let mut query = sqlx::query_as::<_, Exercise>(&sql);
    for pattern in patterns {
        query = query.bind(pattern);
    }
    for equipment_id in equipment_ids {
        query = query.bind(equipment_id);
    }

    Ok(query.fetch_all(db).await?)
}

pub async fn fetch_by_ids(db: &SqlitePool, ids: &[i64]) -> Result<Vec<Exercise>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT id, name, movement_pattern, category, equipment_id, primary_muscle \
         FROM exercises WHERE id IN ({placeholders})"
    );
    let mut query = sqlx::query_as::<_, Exercise>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db).await?)
}

/// Ids among `ids` whose equipment is `bodyweight` (used by the session
/// validator's weight-zero allowance).
pub async fn bodyweight_ids(db: &SqlitePool, ids: &[i64]) -> Result<HashSet<i64>, AppError> {
    if ids.is_empty() {
        return Ok(HashSet::new());
    }
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT id FROM exercises WHERE equipment_id = 'bodyweight' AND id IN ({placeholders})"
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows: Vec<i64> = query.fetch_all(db).await?;
    Ok(rows.into_iter().collect())
}

pub async fn exists_all(db: &SqlitePool, ids: &[i64]) -> Result<bool, AppError> {
    if ids.is_empty() {
        return Ok(true);
    }
    let unique: HashSet<i64> = ids.iter().copied().collect();
    let found = fetch_by_ids(db, ids).await?;
    Ok(found.len() == unique.len())
}

/// Deletes every row then bulk-inserts `rows` in batches of `batch_size`,
/// mirroring the original seeder's delete-then-batch-insert behaviour.
pub async fn reseed(db: &SqlitePool, rows: &[Exercise], batch_size: usize) -> Result<(), AppError> {
    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM exercises").execute(&mut *tx).await?;

    for chunk in rows.chunks(batch_size.max(1)) {
        for exercise in chunk {
            sqlx::query(
                "INSERT INTO exercises (name, movement_pattern, category, equipment_id, primary_muscle) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&exercise.name)
            .bind(&exercise.movement_pattern)
            .bind(&exercise.category)
            .bind(&exercise.equipment_id)
            .bind(&exercise.primary_muscle)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
