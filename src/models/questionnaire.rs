use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: i64,
    pub user_id: i64,
    pub goals: String,
    pub experience_level: String,
    pub schedule_days: i64,
    pub equipment_available: String,
    pub training_days_of_week: Option<Vec<i64>>,
    pub split_variant: Option<String>,
    pub session_duration_minutes: Option<i64>,
    pub focus_areas: Option<Vec<String>>,
    pub excluded_patterns: Option<String>,
    pub injuries_constraints: Option<String>,
}

impl QuestionnaireResponse {
    pub fn excluded_pattern_set(&self) -> std::collections::HashSet<String> {
        match &self.excluded_patterns {
            None => std::collections::HashSet::new(),
            Some(value) if value.trim().is_empty() => std::collections::HashSet::new(),
            Some(value) => value
                .split(',')
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

/// Raw inbound payload; fields arrive as loosely typed JSON before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionnaireRequest {
    pub user_id: i64,
    pub goals: String,
    pub experience_level: String,
    pub schedule_days: i64,
    pub equipment_available: String,
    pub smallest_increment: f64,
    #[serde(default)]
    pub training_days_of_week: Option<Vec<i64>>,
    #[serde(default)]
    pub split_variant: Option<String>,
    #[serde(default)]
    pub session_duration_minutes: Option<i64>,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    #[serde(default)]
    pub excluded_patterns: Option<String>,
    #[serde(default)]
    pub injuries_constraints: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireCreated {
    pub questionnaire_id: i64,
}
