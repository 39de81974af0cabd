use serde::Serialize;

/// Summary of one historical session for a single exercise, newest first
/// once collected by the history reader.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPerformance {
    pub min_reps: i64,
    pub first_set_reps: i64,
    pub last_set_reps: i64,
    pub weight: f64,
    pub all_sets_completed: bool,
    pub eligible: bool,
    pub increase_achieved: bool,
    pub missed_minimum: bool,
    pub manual_audit_flag: bool,
    pub has_initial_load_set: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionState {
    pub sessions: Vec<SessionPerformance>,
    pub has_prior_session: bool,
    pub consecutive_misses: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionAction {
    Start,
    Increase,
    Hold,
    Deload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionRecommendation {
    pub action: ProgressionAction,
    pub next_weight: f64,
    pub rep_range: (i64, i64),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increase_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deload_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}
