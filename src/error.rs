use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The single boundary error type. Every stable code from the external
/// interface contract surfaces as a variant here; the domain layer never
/// constructs an HTTP status directly.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("equipment_available is required")]
    EquipmentRequired,
    #[error("missing fields: {0}")]
    MissingFields(String),
    #[error("invalid exercise id")]
    InvalidExerciseId,
    #[error("invalid swap exercise")]
    InvalidSwapExercise,
    #[error("invalid user id")]
    InvalidUserId,
    #[error("unknown goal")]
    UnknownGoal,
    #[error("unknown equipment")]
    UnknownEquipment,
    #[error("unknown experience level")]
    UnknownExperienceLevel,
    #[error("invalid split variant")]
    InvalidSplitVariant,
    #[error("exercise library does not have enough exercises for this plan")]
    MinimumLibraryRequirements,
    #[error("plan has fewer exercises than pattern slots")]
    PlanSelectionMismatch,
    #[error("planned exercise uses disallowed equipment")]
    PlanEquipmentMismatch,
    #[error("planned exercise does not match its assigned pattern")]
    PlanPatternMismatch,
    #[error("beginner accessory limit exceeded")]
    PlanAccessoryLimit,
    #[error("accessory slot does not hold an accessory exercise")]
    PlanAccessoryMismatch,
    #[error("plan not found")]
    PlanNotFound,
    #[error("planned exercise not found")]
    PlannedExerciseNotFound,
    #[error("questionnaire not found")]
    QuestionnaireNotFound,
    #[error("movement pattern is excluded for this user")]
    ExcludedPattern,
    #[error("training day count does not match schedule_days")]
    TrainingDayCountMismatch,
    #[error("training days leave no rest in three consecutive days")]
    TrainingDaysTooConsecutive,
    #[error("training day index out of range")]
    TrainingDaysOutOfRange,
    #[error("training days contains a duplicate")]
    TrainingDaysDuplicate,
    #[error("training_days_of_week is required")]
    TrainingDaysRequired,
    #[error("weekly frequency too high")]
    WeeklyFrequencyTooHigh,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EquipmentRequired => "EQUIPMENT_REQUIRED",
            AppError::MissingFields(_) => "MISSING_FIELDS",
            AppError::InvalidExerciseId => "INVALID_EXERCISE_ID",
            AppError::InvalidSwapExercise => "INVALID_SWAP_EXERCISE",
            AppError::InvalidUserId => "INVALID_USER_ID",
            AppError::UnknownGoal => "UNKNOWN_GOAL",
            AppError::UnknownEquipment => "UNKNOWN_EQUIPMENT",
            AppError::UnknownExperienceLevel => "UNKNOWN_EXPERIENCE_LEVEL",
            AppError::InvalidSplitVariant => "INVALID_SPLIT_VARIANT",
            AppError::MinimumLibraryRequirements => "MINIMUM_LIBRARY_REQUIREMENTS",
            AppError::PlanSelectionMismatch => "PLAN_SELECTION_MISMATCH",
            AppError::PlanEquipmentMismatch => "PLAN_EQUIPMENT_MISMATCH",
            AppError::PlanPatternMismatch => "PLAN_PATTERN_MISMATCH",
            AppError::PlanAccessoryLimit => "PLAN_ACCESSORY_LIMIT",
            AppError::PlanAccessoryMismatch => "PLAN_ACCESSORY_MISMATCH",
            AppError::PlanNotFound => "PLAN_NOT_FOUND",
            AppError::PlannedExerciseNotFound => "PLANNED_EXERCISE_NOT_FOUND",
            AppError::QuestionnaireNotFound => "QUESTIONNAIRE_NOT_FOUND",
            AppError::ExcludedPattern => "EXCLUDED_PATTERN",
            AppError::TrainingDayCountMismatch => "TRAINING_DAY_COUNT_MISMATCH",
            AppError::TrainingDaysTooConsecutive => "TRAINING_DAYS_TOO_CONSECUTIVE",
            AppError::TrainingDaysOutOfRange => "TRAINING_DAYS_OUT_OF_RANGE",
            AppError::TrainingDaysDuplicate => "TRAINING_DAYS_DUPLICATE",
            AppError::TrainingDaysRequired => "TRAINING_DAYS_REQUIRED",
            AppError::WeeklyFrequencyTooHigh => "WEEKLY_FREQUENCY_TOO_HIGH",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "INTERNAL",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::EquipmentRequired
            | AppError::MissingFields(_)
            | AppError::InvalidExerciseId
            | AppError::InvalidSwapExercise
            | AppError::InvalidUserId
            | AppError::UnknownGoal
            | AppError::UnknownEquipment
            | AppError::UnknownExperienceLevel
            | AppError::InvalidSplitVariant
            | AppError::MinimumLibraryRequirements
            | AppError::PlanSelectionMismatch
            | AppError::PlanEquipmentMismatch
            | AppError::PlanPatternMismatch
            | AppError::PlanAccessoryLimit
            | AppError::PlanAccessoryMismatch
            | AppError::ExcludedPattern
            | AppError::TrainingDayCountMismatch
            | AppError::TrainingDaysTooConsecutive
            | AppError::TrainingDaysOutOfRange
            | AppError::TrainingDaysDuplicate
            | AppError::TrainingDaysRequired
            | AppError::WeeklyFrequencyTooHigh
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PlanNotFound
            | AppError::PlannedExerciseNotFound
            | AppError::QuestionnaireNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
            tracing::error!(error = %self, "internal error at API boundary");
        }

        let status = self.status();
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
