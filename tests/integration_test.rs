use serial_test::serial;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use strength_coach::config::run_migrations;
use strength_coach::db;
use strength_coach::models::{CreateQuestionnaireRequest, CreateSessionRequest, Exercise, GeneratePlanRequest, SetLogInput};
use strength_coach::services::{PlanService, ProgressionService, QuestionnaireService, SessionService};

async fn fresh_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

fn seed_exercise(name: &str, pattern: &str, category: &str, equipment_id: &str, muscle: &str) -> Exercise {
    Exercise {
        id: 0,
        name: name.to_string(),
        movement_pattern: pattern.to_string(),
        category: category.to_string(),
        equipment_id: equipment_id.to_string(),
        primary_muscle: muscle.to_string(),
    }
}

async fn seed_minimal_library(db: &SqlitePool) {
    let rows = vec![
        seed_exercise("Bodyweight Squat", "squat", "compound", "bodyweight", "quadriceps,glutes"),
        seed_exercise("Glute Bridge", "hinge", "compound", "bodyweight", "glutes,hamstrings"),
        seed_exercise("Walking Lunge", "single-leg", "compound", "bodyweight", "quadriceps,glutes"),
        seed_exercise("Push Up", "horizontal push", "compound", "bodyweight", "chest,triceps,shoulders"),
        seed_exercise("Pike Push Up", "vertical push", "compound", "bodyweight", "shoulders,triceps"),
        seed_exercise("Inverted Row", "horizontal pull", "compound", "bodyweight", "back,biceps"),
        seed_exercise("Band Pulldown", "vertical pull", "compound", "band", "back,biceps"),
        seed_exercise("Plank", "core", "accessory", "bodyweight", "core"),
        seed_exercise("Bench Dip", "accessory", "accessory", "bodyweight", "triceps"),
        seed_exercise("Calf Raise", "accessory", "accessory", "bodyweight", "calves"),
    ];
    db::exercises::reseed(db, &rows, 50).await.expect("seed library");
}

#[tokio::test]
#[serial]
async fn questionnaire_to_plan_generation_round_trip() {
    let pool = fresh_db().await;
    seed_minimal_library(&pool).await;

    let questionnaire_service = QuestionnaireService::new(pool.clone());
    let created = questionnaire_service
        .create_questionnaire(CreateQuestionnaireRequest {
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
        })
        .await
        .expect("questionnaire is valid");

    let plan_service = PlanService::new(pool.clone());
    let plan = plan_service
        .generate_plan(GeneratePlanRequest {
            questionnaire_id: created.questionnaire_id,
            weeks: Some(4),
            start_date: None,
            name: None,
        })
        .await
        .expect("plan composes and persists");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM planned_exercises WHERE plan_id = ?")
        .bind(plan.plan_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(row.0 > 0, "plan persisted with at least one planned exercise");
}

#[tokio::test]
#[serial]
async fn session_then_recommendation_reflects_logged_performance() {
    let pool = fresh_db().await;
    seed_minimal_library(&pool).await;
    db::users::set_smallest_increment(&pool, 1, 2.5).await.unwrap();

    let session_service = SessionService::new(pool.clone());
    session_service
        .create_session(CreateSessionRequest {
            user_id: 1,
            performed_at: "2026-07-20T09:00:00Z".to_string(),
            completion_status: "completed".to_string(),
            duration_minutes: Some(45),
            notes: None,
            manual_audit_flag: false,
            plan_id: None,
            day_index: None,
            set_logs: vec![
                SetLogInput {
                    exercise_id: 1,
                    set_number: 1,
                    reps: 12,
                    weight: Some(100.0),
                    rpe: Some(7.0),
                    rest_seconds: 90,
                    is_initial_load: false,
                },
                SetLogInput {
                    exercise_id: 1,
                    set_number: 2,
                    reps: 11,
                    weight: Some(100.0),
                    rpe: Some(7.5),
                    rest_seconds: 90,
                    is_initial_load: false,
                },
                SetLogInput {
                    exercise_id: 1,
                    set_number: 3,
                    reps: 10,
                    weight: Some(100.0),
                    rpe: Some(8.0),
                    rest_seconds: 90,
                    is_initial_load: false,
                },
            ],
        })
        .await
        .expect("session is valid");

    let progression_service = ProgressionService::new(pool.clone());
    let history = progression_service
        .fetch_exercise_history(1, 1, 5)
        .await
        .expect("history reads back");
    assert_eq!(history.recent_sessions.len(), 1);
    assert!(history.baseline_established);
}

#[tokio::test]
#[serial]
async fn skipped_session_with_set_logs_is_rejected() {
    let pool = fresh_db().await;
    seed_minimal_library(&pool).await;

    let session_service = SessionService::new(pool.clone());
    let result = session_service
        .create_session(CreateSessionRequest {
            user_id: 1,
            performed_at: "2026-07-20T09:00:00Z".to_string(),
            completion_status: "skipped".to_string(),
            duration_minutes: None,
            notes: None,
            manual_audit_flag: false,
            plan_id: None,
            day_index: None,
            set_logs: vec![SetLogInput {
                exercise_id: 1,
                set_number: 1,
                reps: 8,
                weight: Some(50.0),
                rpe: Some(7.0),
                rest_seconds: 60,
                is_initial_load: false,
            }],
        })
        .await;

    assert!(result.is_err());
}
