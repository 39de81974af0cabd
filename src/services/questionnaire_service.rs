use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::db;
use crate::error::AppError;
use crate::models::{CreateQuestionnaireRequest, QuestionnaireCreated};

static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+(_[a-z]+)*$").unwrap());

const KNOWN_GOALS: [&str; 4] = ["general_fitness", "muscle_gain", "strength", "weight_loss"];
const KNOWN_EXPERIENCE_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];
const KNOWN_EQUIPMENT: [&str; 4] = ["none", "dumbbells_only", "home_gym", "full_gym"];

fn ensure_snake_case(field: &str, value: &str) -> Result<(), AppError> {
    if SNAKE_CASE.is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{field} must be snake_case")))
    }
}

fn validate_payload(payload: &CreateQuestionnaireRequest) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if payload.user_id == 0 {
        missing.push("user_id");
    }
    if payload.goals.trim().is_empty() {
        missing.push("goals");
    }
    if payload.experience_level.trim().is_empty() {
        missing.push("experience_level");
    }
    if payload.schedule_days == 0 {
        missing.push("schedule_days");
    }
    if payload.equipment_available.trim().is_empty() {
        missing.push("equipment_available");
    }
    if payload.smallest_increment == 0.0 {
        missing.push("smallest_increment");
    }

    if missing.contains(&"equipment_available") {
        return Err(AppError::EquipmentRequired);
    }
    if !missing.is_empty() {
        let mut sorted = missing;
        sorted.sort_unstable();
        return Err(AppError::MissingFields(sorted.join(", ")));
    }

    if payload.user_id <= 0 {
        return Err(AppError::Validation("user_id must be positive".into()));
    }
    if payload.schedule_days <= 0 {
        return Err(AppError::Validation("schedule_days must be positive".into()));
    }
    if payload.smallest_increment <= 0.0 {
        return Err(AppError::Validation("smallest_increment must be positive".into()));
    }

    ensure_snake_case("goals", &payload.goals)?;
    ensure_snake_case("experience_level", &payload.experience_level)?;
    ensure_snake_case("equipment_available", &payload.equipment_available)?;

    if !KNOWN_GOALS.contains(&payload.goals.as_str()) {
        return Err(AppError::UnknownGoal);
    }
    if !KNOWN_EXPERIENCE_LEVELS.contains(&payload.experience_level.as_str()) {
        return Err(AppError::UnknownExperienceLevel);
    }
    if !KNOWN_EQUIPMENT.contains(&payload.equipment_available.as_str()) {
        return Err(AppError::UnknownEquipment);
    }

    Ok(())
}

#[derive(Clone)]
pub struct QuestionnaireService {
    db: SqlitePool,
}

impl QuestionnaireService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    #[instrument(skip(self, payload))]
    pub async fn create_questionnaire(
        &self,
        payload: CreateQuestionnaireRequest,
    ) -> Result<QuestionnaireCreated, AppError> {
        validate_payload(&payload)?;
        let questionnaire_id = db::questionnaires::create_questionnaire(&self.db, &payload).await?;
        Ok(QuestionnaireCreated { questionnaire_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CreateQuestionnaireRequest {
        CreateQuestionnaireRequest {
            user_id: 1,
            goals: "general_fitness".to_string(),
            experience_level: "beginner".to_string(),
            schedule_days: 3,
            equipment_available: "none".to_string(),
            smallest_increment: 2.5,
            training_days_of_week: None,
            split_variant: None,
            session_duration_minutes: None,
            focus_areas: None,
            excluded_patterns: None,
            injuries_constraints: None,
        }
    }

    #[test]
    fn missing_equipment_available_is_specific() {
        let mut payload = base();
        payload.equipment_available = String::new();
        assert!(matches!(validate_payload(&payload), Err(AppError::EquipmentRequired)));
    }

    #[test]
    fn rejects_non_snake_case() {
        let mut payload = base();
        payload.goals = "GeneralFitness".to_string();
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(validate_payload(&base()).is_ok());
    }
}
