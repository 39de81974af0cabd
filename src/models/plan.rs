use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub weeks: i64,
    pub generated_from_questionnaire_id: i64,
}

/// A single planned slot, `(day_index, sequence)` within a composed (not yet
/// persisted) plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSlot {
    pub day_index: i64,
    pub sequence: i64,
    pub session_type: String,
    pub pattern: String,
    pub exercise_id: i64,
    pub target_sets: i64,
    pub target_reps_min: i64,
    pub target_reps_max: i64,
    pub starting_weight: Option<f64>,
    pub is_initial_load: bool,
}

/// One composed training day, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day_index: i64,
    pub session_type: String,
    pub slots: Vec<PlannedSlot>,
}

/// The full in-memory output of the composer, ready for audit and persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPlan {
    pub days: Vec<PlanDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanRequest {
    pub questionnaire_id: i64,
    #[serde(default)]
    pub weeks: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanCreated {
    pub plan_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlannedExerciseDetail {
    pub plan_id: i64,
    pub day_index: i64,
    pub sequence: i64,
    pub session_type: String,
    pub exercise_id: i64,
    pub movement_pattern: String,
    pub category: String,
    pub equipment_id: String,
    pub primary_muscle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapOption {
    pub id: i64,
    pub name: String,
    pub movement_pattern: String,
    pub category: String,
    pub equipment_id: String,
    pub primary_muscle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplySwapRequest {
    pub plan_id: i64,
    pub day_index: i64,
    pub sequence: i64,
    pub exercise_id: i64,
}
