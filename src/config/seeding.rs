use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::db;
use crate::models::Exercise;

const DEFAULT_BATCH_SIZE: usize = 50;
const HEADER_FIELD: &str = "Exercise";

/// Parses the pipe-delimited exercise library text file: `name |
/// primary_muscle | equipment | movement_pattern | difficulty |
/// alternatives | category | equipment_id`. Blank lines and `#`-prefixed
/// lines are skipped; the first non-skipped row whose first field is the
/// literal header is also skipped.
pub fn parse_exercise_rows(contents: &str) -> Vec<Exercise> {
    let mut rows = Vec::new();
    let mut next_id = 1i64;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split('|').map(|p| p.trim()).collect();
        if parts.len() < 8 {
            continue;
        }
        if parts[0] == HEADER_FIELD {
            continue;
        }

        let name = parts[0].to_string();
        let primary_muscle = parts[1].to_string();
        let equipment = parts[2];
        let movement_pattern = parts[3].to_string();
        let category = parts[6].to_string();
        let equipment_id = if parts[7].is_empty() {
            equipment.to_lowercase()
        } else {
            parts[7].to_lowercase()
        };

        rows.push(Exercise {
            id: next_id,
            name,
            movement_pattern,
            category,
            equipment_id,
            primary_muscle,
        });
        next_id += 1;
    }

    rows
}

pub struct ExerciseLibrarySeeder {
    pool: SqlitePool,
}

impl ExerciseLibrarySeeder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Deletes all existing exercise rows, then bulk-inserts the parsed
    /// rows in batches of `batch_size` (default 50). Not part of the core;
    /// run once at startup or via an operator command (§4.8).
    pub async fn seed_from_file(&self, path: impl AsRef<Path>, batch_size: Option<usize>) -> Result<usize> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading exercise library file {:?}", path.as_ref()))?;
        let rows = parse_exercise_rows(&contents);
        tracing::info!(count = rows.len(), "seeding exercise library");
        db::exercises::reseed(&self.pool, &rows, batch_size.unwrap_or(DEFAULT_BATCH_SIZE)).await?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_blank_and_comment_lines() {
        let contents = "\
Exercise | primary_muscle | equipment | movement_pattern | difficulty | alternatives | category | equipment_id

# a comment
Back Squat | quadriceps,glutes | barbell | squat | intermediate | front squat | compound | barbell
";
        let rows = parse_exercise_rows(contents);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Back Squat");
        assert_eq!(rows[0].movement_pattern, "squat");
        assert_eq!(rows[0].equipment_id, "barbell");
    }

    #[test]
    fn skips_short_rows() {
        let contents = "Too Short | only | three | fields\n";
        assert!(parse_exercise_rows(contents).is_empty());
    }
}
