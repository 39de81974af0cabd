use sqlx::SqlitePool;

use crate::error::AppError;

pub async fn fetch_smallest_increment(db: &SqlitePool, user_id: i64) -> Result<f64, AppError> {
    let row: Option<(f64,)> = sqlx::query_as("SELECT smallest_increment FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(db)
        .await?;
    row.map(|(v,)| v).ok_or(AppError::InvalidUserId)
}

pub async fn set_smallest_increment(
    db: &SqlitePool,
    user_id: i64,
    smallest_increment: f64,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE users SET smallest_increment = ? WHERE id = ?")
        .bind(smallest_increment)
        .bind(user_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        sqlx::query("INSERT INTO users (id, smallest_increment) VALUES (?, ?)")
            .bind(user_id)
            .bind(smallest_increment)
            .execute(db)
            .await?;
    }
    Ok(())
}

pub async fn user_exists(db: &SqlitePool, user_id: i64) -> Result<bool, AppError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}
