use std::collections::HashSet;

use crate::error::AppError;
use crate::models::{CreateSessionRequest, SetLogInput};

pub const COMPLETION_STATUSES: [&str; 3] = ["completed", "partial", "skipped"];
pub const REPS_MIN: i64 = 6;
pub const REPS_MAX: i64 = 12;

fn validate_set_log(
    set_log: &SetLogInput,
    bodyweight_exercise_ids: &HashSet<i64>,
) -> Result<(), AppError> {
    if set_log.set_number <= 0 {
        return Err(AppError::Validation("set_number must be positive".into()));
    }
    if set_log.reps <= 0 || set_log.reps < REPS_MIN || set_log.reps > REPS_MAX {
        return Err(AppError::Validation(format!(
            "reps must be within [{REPS_MIN},{REPS_MAX}]"
        )));
    }
    if set_log.rest_seconds < 0 {
        return Err(AppError::Validation("rest_seconds must be >= 0".into()));
    }
    if set_log.rpe.is_none() {
        return Err(AppError::Validation("rpe is required".into()));
    }

    let is_bodyweight = bodyweight_exercise_ids.contains(&set_log.exercise_id);
    match set_log.weight {
        Some(w) if is_bodyweight && w >= 0.0 => Ok(()),
        Some(w) if !is_bodyweight && w > 0.0 => Ok(()),
        _ => Err(AppError::Validation(
            "weight must be positive unless the exercise is bodyweight".into(),
        )),
    }
}

/// Validates a proposed session (with its set logs) against completion
/// status invariants before persistence. Unknown exercise ids must be
/// checked by the caller beforehand (`INVALID_EXERCISE_ID`).
pub fn validate_session(
    session: &CreateSessionRequest,
    bodyweight_exercise_ids: &HashSet<i64>,
) -> Result<(), AppError> {
    if !COMPLETION_STATUSES.contains(&session.completion_status.as_str()) {
        return Err(AppError::Validation(
            "completion_status must be one of completed, partial, skipped".into(),
        ));
    }
    if session.user_id <= 0 {
        return Err(AppError::InvalidUserId);
    }
    if session.performed_at.trim().is_empty() {
        return Err(AppError::Validation("performed_at must not be empty".into()));
    }

    match session.completion_status.as_str() {
        "skipped" => {
            if !session.set_logs.is_empty() {
                return Err(AppError::Validation("set_logs must be empty".into()));
            }
        }
        _ => {
            if session.set_logs.is_empty() {
                return Err(AppError::Validation("set_logs must not be empty".into()));
            }
        }
    }

    for set_log in &session.set_logs {
        validate_set_log(set_log, bodyweight_exercise_ids)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(status: &str, set_logs: Vec<SetLogInput>) -> CreateSessionRequest {
        CreateSessionRequest {
            user_id: 1,
            performed_at: "2026-07-31T10:00:00Z".to_string(),
            completion_status: status.to_string(),
            duration_minutes: None,
            notes: None,
            manual_audit_flag: false,
            plan_id: None,
            day_index: None,
            set_logs,
        }
    }

    fn set_log(exercise_id: i64, weight: Option<f64>) -> SetLogInput {
        SetLogInput {
            exercise_id,
            set_number: 1,
            reps: 8,
            weight,
            rpe: Some(7.5),
            rest_seconds: 90,
            is_initial_load: false,
        }
    }

    #[test]
    fn skipped_requires_empty_set_logs() {
        let req = base_request("skipped", vec![set_log(1, Some(100.0))]);
        assert!(validate_session(&req, &HashSet::new()).is_err());

        let req = base_request("skipped", vec![]);
        assert!(validate_session(&req, &HashSet::new()).is_ok());
    }

    #[test]
    fn completed_requires_nonempty_set_logs() {
        let req = base_request("completed", vec![]);
        assert!(validate_session(&req, &HashSet::new()).is_err());
    }

    #[test]
    fn bodyweight_allows_zero_weight() {
        let mut bodyweight = HashSet::new();
        bodyweight.insert(1);
        let req = base_request("completed", vec![set_log(1, Some(0.0))]);
        assert!(validate_session(&req, &bodyweight).is_ok());

        let req = base_request("completed", vec![set_log(2, Some(0.0))]);
        assert!(validate_session(&req, &bodyweight).is_err());
    }

    #[test]
    fn rejects_reps_outside_range() {
        let mut log = set_log(1, Some(50.0));
        log.reps = 20;
        let req = base_request("completed", vec![log]);
        assert!(validate_session(&req, &HashSet::new()).is_err());
    }
}
