use crate::domain::library::{is_lower_body, EQUIPMENT_DEFAULTS};
use crate::domain::rounding::round_down;
use crate::error::AppError;
use crate::models::{
    Exercise, ProgressionAction, ProgressionRecommendation, ProgressionState, SessionPerformance,
    SessionSummary,
};

const FIRST_SET_TARGET: i64 = 12;
const LAST_SET_TARGET: i64 = 10;
const MIN_ELIGIBLE_REPS: i64 = 6;

/// Input: one historical session (completed/partial/skipped) with its set
/// logs, newest session first. `manual_audit_flag` is carried per session.
#[derive(Clone)]
pub struct HistorySession {
    pub summary: SessionSummary,
    pub manual_audit_flag: bool,
}

fn summarize_session(session: &HistorySession) -> SessionPerformance {
    let mut sets = session.summary.sets.clone();
    sets.sort_by_key(|s| s.set_number);

    let min_reps = sets.iter().map(|s| s.reps).min().unwrap_or(0);
    let first_set_reps = sets.first().map(|s| s.reps).unwrap_or(0);
    let last_set_reps = sets.last().map(|s| s.reps).unwrap_or(0);
    let weight = sets
        .first()
        .and_then(|s| s.weight)
        .unwrap_or_else(|| sets.iter().filter_map(|s| s.weight).fold(0.0, f64::max));

    let all_sets_completed =
        session.summary.completion_status == "completed" && !sets.is_empty();
    let eligible = all_sets_completed && min_reps >= MIN_ELIGIBLE_REPS;
    let increase_achieved =
        eligible && first_set_reps >= FIRST_SET_TARGET && last_set_reps >= LAST_SET_TARGET;
    let missed_minimum = !all_sets_completed || min_reps < MIN_ELIGIBLE_REPS;
    let has_initial_load_set = sets.iter().any(|s| s.is_initial_load);

    SessionPerformance {
        min_reps,
        first_set_reps,
        last_set_reps,
        weight,
        all_sets_completed,
        eligible,
        increase_achieved,
        missed_minimum,
        manual_audit_flag: session.manual_audit_flag,
        has_initial_load_set,
    }
}

fn session_has_initial_load(perf: &SessionPerformance) -> bool {
    perf.has_initial_load_set
}

/// Scans newest-to-oldest, keeping the first session that contains an
/// initial-load set and dropping everything older than it.
fn truncate_at_initial_load(sessions: Vec<SessionPerformance>) -> Vec<SessionPerformance> {
    let mut out = Vec::new();
    for session in sessions {
        let stop = session_has_initial_load(&session);
        out.push(session);
        if stop {
            break;
        }
    }
    out
}

fn consecutive_misses(sessions: &[SessionPerformance]) -> i64 {
    let mut count = 0;
    for session in sessions {
        if session_has_initial_load(session) {
            break;
        }
        if session.missed_minimum {
            count += 1;
        } else {
            break;
        }
    }
    count
}

pub fn evaluate_progression_state(history: &[HistorySession]) -> ProgressionState {
    let summarized: Vec<SessionPerformance> = history.iter().map(summarize_session).collect();
    let truncated = truncate_at_initial_load(summarized);

    let has_prior_session = truncated.len() >= 2
        && truncated
            .iter()
            .any(|s| !session_has_initial_load(s));
    let misses = consecutive_misses(&truncated);

    ProgressionState {
        sessions: truncated,
        has_prior_session,
        consecutive_misses: misses,
    }
}

fn default_starting_weight(exercise: &Exercise, smallest_increment: f64) -> Result<f64, AppError> {
    let base = EQUIPMENT_DEFAULTS
        .get(exercise.equipment_id.trim().to_lowercase().as_str())
        .copied()
        .unwrap_or(smallest_increment);
    round_down(base, smallest_increment)
}

/// `(raw increase, metric applied)` for the exercise's category/pattern.
fn select_raw_increase(exercise: &Exercise, smallest_increment: f64) -> f64 {
    let tight_increment = smallest_increment <= 1.25;

    if exercise.is_accessory() {
        return if tight_increment { 1.25 } else { 2.5 };
    }
    if is_lower_body(exercise) {
        return if tight_increment { 2.5 } else { 5.0 };
    }
    if tight_increment {
        1.25
    } else {
        2.5
    }
}

pub fn recommend_progression(
    history: &[HistorySession],
    exercise: &Exercise,
    smallest_increment: f64,
) -> Result<ProgressionRecommendation, AppError> {
    let state = evaluate_progression_state(history);

    if state.sessions.is_empty() {
        return Ok(ProgressionRecommendation {
            action: ProgressionAction::Start,
            next_weight: default_starting_weight(exercise, smallest_increment)?,
            rep_range: (6, 12),
            increase_amount: None,
            deload_percentage: None,
            reason: None,
        });
    }

    let last = &state.sessions[0];
    let w = last.weight;

    if last.manual_audit_flag {
        return Ok(ProgressionRecommendation {
            action: ProgressionAction::Deload,
            next_weight: round_down(w * 0.90, smallest_increment)?,
            rep_range: (6, 12),
            increase_amount: None,
            deload_percentage: Some(0.10),
            reason: None,
        });
    }

    if state.consecutive_misses >= 3 {
        return Ok(ProgressionRecommendation {
            action: ProgressionAction::Deload,
            next_weight: round_down(w * 0.90, smallest_increment)?,
            rep_range: (6, 12),
            increase_amount: None,
            deload_percentage: Some(0.10),
            reason: None,
        });
    }

    if state.consecutive_misses >= 2 {
        return Ok(ProgressionRecommendation {
            action: ProgressionAction::Deload,
            next_weight: round_down(w * 0.95, smallest_increment)?,
            rep_range: (6, 12),
            increase_amount: None,
            deload_percentage: Some(0.05),
            reason: None,
        });
    }

    if last.eligible && last.increase_achieved && state.has_prior_session {
        let raw = select_raw_increase(exercise, smallest_increment);
        let rounded = round_down(w + raw, smallest_increment)?;
        if rounded <= w {
            return Ok(ProgressionRecommendation {
                action: ProgressionAction::Hold,
                next_weight: w,
                rep_range: (6, 12),
                increase_amount: None,
                deload_percentage: None,
                reason: Some("increase below increment"),
            });
        }
        return Ok(ProgressionRecommendation {
            action: ProgressionAction::Increase,
            next_weight: rounded,
            rep_range: (6, 8),
            increase_amount: Some(raw),
            deload_percentage: None,
            reason: None,
        });
    }

    let reason = if last.missed_minimum {
        "reps missed but minimum met"
    } else if !state.has_prior_session {
        "baseline session required before increasing"
    } else {
        "hold until targets met"
    };

    Ok(ProgressionRecommendation {
        action: ProgressionAction::Hold,
        next_weight: w,
        rep_range: (6, 12),
        increase_amount: None,
        deload_percentage: None,
        reason: Some(reason),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionSummary, SetLogRow};

    fn exercise() -> Exercise {
        Exercise {
            id: 1,
            name: "Back Squat".to_string(),
            movement_pattern: "squat".to_string(),
            category: "compound".to_string(),
            equipment_id: "barbell".to_string(),
            primary_muscle: "quadriceps,glutes".to_string(),
        }
    }

    fn set(set_number: i64, reps: i64, weight: f64, is_initial_load: bool) -> SetLogRow {
        SetLogRow {
            session_id: 1,
            exercise_id: 1,
            set_number,
            reps,
            weight: Some(weight),
            rpe: Some(8.0),
            rest_seconds: 90,
            is_initial_load,
        }
    }

    fn session(status: &str, sets: Vec<SetLogRow>, manual_audit_flag: bool) -> HistorySession {
        HistorySession {
            summary: SessionSummary {
                session_id: 1,
                performed_at: "2026-07-30T00:00:00Z".to_string(),
                duration_minutes: None,
                notes: None,
                completion_status: status.to_string(),
                sets,
            },
            manual_audit_flag,
        }
    }

    #[test]
    fn no_history_starts_at_default() {
        let rec = recommend_progression(&[], &exercise(), 2.5).unwrap();
        assert_eq!(rec.action, ProgressionAction::Start);
        assert_eq!(rec.next_weight, 45.0);
    }

    #[test]
    fn increase_when_targets_hit_with_prior_session() {
        let newest = session(
            "completed",
            vec![set(1, 12, 100.0, false), set(2, 11, 100.0, false), set(3, 10, 100.0, false)],
            false,
        );
        let older = session(
            "completed",
            vec![set(1, 10, 97.5, false), set(2, 9, 97.5, false), set(3, 8, 97.5, false)],
            false,
        );
        let rec = recommend_progression(&[newest, older], &exercise(), 2.5).unwrap();
        assert_eq!(rec.action, ProgressionAction::Increase);
        assert_eq!(rec.next_weight, 105.0);
        assert_eq!(rec.rep_range, (6, 8));
        assert_eq!(rec.increase_amount, Some(5.0));
    }

    #[test]
    fn two_consecutive_misses_deload_five_percent() {
        let newest = session("completed", vec![set(1, 5, 100.0, false)], false);
        let older = session("completed", vec![set(1, 5, 100.0, false)], false);
        let rec = recommend_progression(&[newest, older], &exercise(), 2.5).unwrap();
        assert_eq!(rec.action, ProgressionAction::Deload);
        assert_eq!(rec.next_weight, 95.0);
        assert_eq!(rec.deload_percentage, Some(0.05));
    }

    #[test]
    fn manual_audit_flag_forces_ten_percent_deload() {
        let newest = session("completed", vec![set(1, 12, 80.0, false)], true);
        let rec = recommend_progression(&[newest], &exercise(), 2.5).unwrap();
        assert_eq!(rec.action, ProgressionAction::Deload);
        assert_eq!(rec.next_weight, 72.5);
        assert_eq!(rec.deload_percentage, Some(0.10));
    }

    #[test]
    fn single_session_without_prior_holds_for_baseline() {
        let newest = session(
            "completed",
            vec![set(1, 12, 100.0, false), set(2, 11, 100.0, false), set(3, 10, 100.0, false)],
            false,
        );
        let rec = recommend_progression(&[newest], &exercise(), 2.5).unwrap();
        assert_eq!(rec.action, ProgressionAction::Hold);
        assert_eq!(rec.reason, Some("baseline session required before increasing"));
    }

    #[test]
    fn idempotent_on_same_input() {
        let newest = session("completed", vec![set(1, 5, 100.0, false)], false);
        let older = session("completed", vec![set(1, 5, 100.0, false)], false);
        let a = recommend_progression(&[newest.clone(), older.clone()], &exercise(), 2.5).unwrap();
        let b = recommend_progression(&[newest, older], &exercise(), 2.5).unwrap();
        assert_eq!(a, b);
    }
}
