use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SetLogInput {
    pub exercise_id: i64,
    pub set_number: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub rpe: Option<f64>,
    pub rest_seconds: i64,
    #[serde(default)]
    pub is_initial_load: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: i64,
    pub performed_at: String,
    pub completion_status: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub manual_audit_flag: bool,
    #[serde(default)]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub day_index: Option<i64>,
    #[serde(default)]
    pub set_logs: Vec<SetLogInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub session_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetLogRow {
    pub session_id: i64,
    pub exercise_id: i64,
    pub set_number: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub rpe: Option<f64>,
    pub rest_seconds: i64,
    pub is_initial_load: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: i64,
    pub performed_at: String,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub completion_status: String,
    pub sets: Vec<SetLogRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSet {
    pub session_id: i64,
    pub performed_at: String,
    pub set_number: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub rpe: Option<f64>,
    pub rest_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHistory {
    pub recent_sessions: Vec<SessionSummary>,
    pub best_sets: Vec<BestSet>,
    pub baseline_established: bool,
    pub baseline_status: Option<String>,
}
