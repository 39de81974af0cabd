use std::collections::HashMap;

use strength_coach::domain::auditor::audit_plan;
use strength_coach::domain::composer::compose_plan;
use strength_coach::models::{Exercise, QuestionnaireResponse};

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

fn no_equipment_pool() -> Vec<Exercise> {
    vec![
        exercise(1, "Bodyweight Squat", "squat", "compound", "bodyweight", "quadriceps,glutes"),
        exercise(2, "Glute Bridge", "hinge", "compound", "bodyweight", "glutes,hamstrings"),
        exercise(3, "Walking Lunge", "single-leg", "compound", "bodyweight", "quadriceps,glutes"),
        exercise(4, "Push Up", "horizontal push", "compound", "bodyweight", "chest,triceps,shoulders"),
        exercise(5, "Pike Push Up", "vertical push", "compound", "bodyweight", "shoulders,triceps"),
        exercise(6, "Inverted Row", "horizontal pull", "compound", "bodyweight", "back,biceps"),
        exercise(7, "Band Pulldown", "vertical pull", "compound", "band", "back,biceps"),
        exercise(8, "Plank", "core", "accessory", "bodyweight", "core"),
        exercise(9, "Dead Bug", "core", "accessory", "bodyweight", "core"),
        exercise(10, "Bench Dip", "accessory", "accessory", "bodyweight", "triceps"),
        exercise(11, "Calf Raise", "accessory", "accessory", "bodyweight", "calves"),
        exercise(12, "Band Bicep Curl", "accessory", "accessory", "band", "biceps"),
        exercise(13, "Band Lateral Raise", "accessory", "accessory", "band", "shoulders"),
        exercise(14, "Band Leg Curl", "accessory", "accessory", "band", "hamstrings"),
    ]
}

fn base_questionnaire() -> QuestionnaireResponse {
    QuestionnaireResponse {
        id: 1,
        user_id: 1,
        goals: "general_fitness".to_string(),
        experience_level: "beginner".to_string(),
        schedule_days: 3,
        equipment_available: "none".to_string(),
        training_days_of_week: None,
        split_variant: None,
        session_duration_minutes: None,
        focus_areas: None,
        excluded_patterns: None,
        injuries_constraints: None,
    }
}

#[test]
fn beginner_full_body_no_equipment_three_days() {
    let questionnaire = base_questionnaire();
    let pool = no_equipment_pool();
    let no_history = |_: i64| -> Option<f64> { None };

    let days = compose_plan(&questionnaire, &pool, 2.5, &no_history).unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days.iter().map(|d| d.day_index).collect::<Vec<_>>(), vec![0, 2, 4]);

    let exercises_by_id: HashMap<i64, Exercise> = pool.into_iter().map(|e| (e.id, e)).collect();
    audit_plan(&days, &questionnaire, &exercises_by_id).unwrap();

    for day in &days {
        assert_eq!(day.session_type, "full_body");
        assert!(day.slots.len() <= 4, "beginner budget is 4 exercises");

        for slot in &day.slots {
            let exercise = &exercises_by_id[&slot.exercise_id];
            assert!(
                matches!(exercise.equipment_id.as_str(), "bodyweight" | "band"),
                "equipment must be allowed for equipment_available=none"
            );
            let weight = slot.starting_weight.expect("starting weight computed");
            assert!((weight / 2.5).fract().abs() < 1e-9, "weight divisible by increment");
            assert!(slot.is_initial_load, "no history means every load is initial");
        }

        let mut per_muscle: HashMap<String, i64> = HashMap::new();
        for slot in day.slots.iter().filter(|s| s.pattern == "accessory") {
            let exercise = &exercises_by_id[&slot.exercise_id];
            for muscle in exercise.primary_muscles() {
                let count = per_muscle.entry(muscle).or_insert(0);
                *count += 1;
                assert!(*count <= 2, "beginner accessory limit per muscle");
            }
        }
    }
}

#[test]
fn intermediate_five_day_push_pull_variant_orders_sessions() {
    let mut questionnaire = base_questionnaire();
    questionnaire.experience_level = "intermediate".to_string();
    questionnaire.equipment_available = "full_gym".to_string();
    questionnaire.schedule_days = 5;
    questionnaire.split_variant = Some("ppl_push_pull".to_string());

    let mut pool = no_equipment_pool();
    pool.extend(vec![
        exercise(20, "Back Squat", "squat", "compound", "barbell", "quadriceps,glutes"),
        exercise(21, "Romanian Deadlift", "hinge", "compound", "barbell", "hamstrings,glutes"),
        exercise(22, "Barbell Bench Press", "horizontal push", "compound", "barbell", "chest,triceps,shoulders"),
        exercise(23, "Overhead Press", "vertical push", "compound", "barbell", "shoulders,triceps"),
        exercise(24, "Barbell Row", "horizontal pull", "compound", "barbell", "back,biceps"),
        exercise(25, "Lat Pulldown", "vertical pull", "compound", "machine", "back,biceps"),
        exercise(26, "Bulgarian Split Squat", "single-leg", "compound", "dumbbell", "quadriceps,glutes"),
    ]);

    let no_history = |_: i64| -> Option<f64> { None };
    let days = compose_plan(&questionnaire, &pool, 2.5, &no_history).unwrap();

    let session_types: Vec<String> = days.iter().map(|d| d.session_type.clone()).collect();
    assert_eq!(session_types, vec!["push", "pull", "legs", "push", "pull"]);
}

#[test]
fn unknown_goal_is_rejected() {
    let mut questionnaire = base_questionnaire();
    questionnaire.goals = "not_a_real_goal".to_string();
    let pool = no_equipment_pool();
    let no_history = |_: i64| -> Option<f64> { None };

    let result = compose_plan(&questionnaire, &pool, 2.5, &no_history);
    assert!(result.is_err());
}
