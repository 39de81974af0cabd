use strength_coach::domain::swap::{apply_swap, list_swap_options};
use strength_coach::error::AppError;
use strength_coach::models::{Exercise, PlannedExerciseDetail, QuestionnaireResponse};

fn exercise(id: i64, name: &str, pattern: &str, category: &str, equipment_id: &str, muscle: &str) -> Exercise {
    Exercise {
        id,
        name: name.to_string(),
        movement_pattern: pattern.to_string(),
        category: category.to_string(),
        equipment_id: equipment_id.to_string(),
        primary_muscle: muscle.to_string(),
    }
}

fn questionnaire(excluded_patterns: Option<&str>) -> QuestionnaireResponse {
    QuestionnaireResponse {
        id: 1,
        user_id: 1,
        goals: "general_fitness".to_string(),
        experience_level: "intermediate".to_string(),
        schedule_days: 4,
        equipment_available: "full_gym".to_string(),
        training_days_of_week: None,
        split_variant: None,
        session_duration_minutes: None,
        focus_areas: None,
        excluded_patterns: excluded_patterns.map(|s| s.to_string()),
        injuries_constraints: None,
    }
}

fn planned_slot() -> PlannedExerciseDetail {
    PlannedExerciseDetail {
        plan_id: 1,
        day_index: 0,
        sequence: 1,
        session_type: "pull".to_string(),
        exercise_id: 1,
        movement_pattern: "vertical pull".to_string(),
        category: "compound".to_string(),
        equipment_id: "machine".to_string(),
        primary_muscle: "back,biceps".to_string(),
    }
}

fn pool() -> Vec<Exercise> {
    vec![
        exercise(1, "Lat Pulldown", "vertical pull", "compound", "machine", "back,biceps"),
        exercise(2, "Pull Up", "vertical pull", "compound", "bodyweight", "back,biceps"),
        exercise(3, "Band Pulldown", "vertical pull", "compound", "band", "back,biceps"),
    ]
}

#[test]
fn swap_blocked_by_excluded_pattern() {
    let q = questionnaire(Some("vertical pull"));
    let planned = planned_slot();
    let pool = pool();

    let options = list_swap_options(&planned, &q, &pool).unwrap();
    assert!(options.is_empty());

    let result = apply_swap(&planned, &q, &pool, 2, None, 2.5);
    assert!(matches!(result, Err(AppError::ExcludedPattern)));
}

#[test]
fn swap_lists_other_exercises_with_same_pattern() {
    let q = questionnaire(None);
    let planned = planned_slot();
    let pool = pool();

    let options = list_swap_options(&planned, &q, &pool).unwrap();
    let ids: Vec<i64> = options.iter().map(|o| o.id).collect();
    assert!(!ids.contains(&1), "current exercise excluded from its own options");
    assert!(ids.contains(&2));
    assert!(ids.contains(&3));
}

#[test]
fn apply_swap_rejects_unknown_replacement() {
    let q = questionnaire(None);
    let planned = planned_slot();
    let pool = pool();

    let result = apply_swap(&planned, &q, &pool, 999, None, 2.5);
    assert!(matches!(result, Err(AppError::InvalidSwapExercise)));
}

#[test]
fn apply_swap_uses_latest_weight_when_present() {
    let q = questionnaire(None);
    let planned = planned_slot();
    let pool = pool();

    let result = apply_swap(&planned, &q, &pool, 2, Some(47.5), 2.5).unwrap();
    assert_eq!(result.new_exercise_id, 2);
    assert_eq!(result.starting_weight, 47.5);
    assert!(!result.is_initial_load);
}

#[test]
fn apply_swap_falls_back_to_equipment_default_without_history() {
    let q = questionnaire(None);
    let planned = planned_slot();
    let pool = pool();

    let result = apply_swap(&planned, &q, &pool, 2, None, 2.5).unwrap();
    assert_eq!(result.new_exercise_id, 2);
    assert_eq!(result.starting_weight, 0.0);
    assert!(result.is_initial_load);
}
