use crate::domain::library::{eligible_by_experience, equipment_ids_for, filter_by_equipment};
use crate::domain::rounding::round_down;
use crate::domain::library::EQUIPMENT_DEFAULTS;
use crate::error::AppError;
use crate::models::{Exercise, PlannedExerciseDetail, QuestionnaireResponse, SwapOption};

fn to_option(exercise: &Exercise) -> SwapOption {
    SwapOption {
        id: exercise.id,
        name: exercise.name.clone(),
        movement_pattern: exercise.movement_pattern.clone(),
        category: exercise.category.clone(),
        equipment_id: exercise.equipment_id.clone(),
        primary_muscle: exercise.primary_muscle.clone(),
    }
}

fn eligible_replacements(
    planned: &PlannedExerciseDetail,
    questionnaire: &QuestionnaireResponse,
    pool: &[Exercise],
) -> Result<Vec<Exercise>, AppError> {
    let allowed_equipment = equipment_ids_for(&questionnaire.equipment_available)?;
    let pattern_pool: Vec<Exercise> = pool
        .iter()
        .filter(|e| {
            e.movement_pattern
                .trim()
                .eq_ignore_ascii_case(&planned.movement_pattern)
        })
        .cloned()
        .collect();
    let equipment_filtered = filter_by_equipment(&pattern_pool, &allowed_equipment);
    eligible_by_experience(&equipment_filtered, &questionnaire.experience_level)
}

/// Lists conforming replacements for a planned slot; empty if its pattern
/// is excluded by the questionnaire.
pub fn list_swap_options(
    planned: &PlannedExerciseDetail,
    questionnaire: &QuestionnaireResponse,
    pool: &[Exercise],
) -> Result<Vec<SwapOption>, AppError> {
    if questionnaire
        .excluded_pattern_set()
        .contains(&planned.movement_pattern.trim().to_lowercase())
    {
        return Ok(Vec::new());
    }

    let eligible = eligible_replacements(planned, questionnaire, pool)?;
    let options = eligible
        .iter()
        .filter(|e| e.id != planned.exercise_id)
        .map(to_option)
        .collect();
    Ok(options)
}

pub struct SwapResult {
    pub new_exercise_id: i64,
    pub starting_weight: f64,
    pub is_initial_load: bool,
}

/// Validates the proposed replacement and recomputes its starting load.
/// Persistence (slot update + audit insert) is the caller's responsibility,
/// executed as a single transaction (§4.6).
pub fn apply_swap(
    planned: &PlannedExerciseDetail,
    questionnaire: &QuestionnaireResponse,
    pool: &[Exercise],
    new_exercise_id: i64,
    latest_weight: Option<f64>,
    smallest_increment: f64,
) -> Result<SwapResult, AppError> {
    if questionnaire
        .excluded_pattern_set()
        .contains(&planned.movement_pattern.trim().to_lowercase())
    {
        return Err(AppError::ExcludedPattern);
    }

    let eligible = eligible_replacements(planned, questionnaire, pool)?;
    let replacement = eligible
        .iter()
        .find(|e| e.id == new_exercise_id)
        .ok_or(AppError::InvalidSwapExercise)?;

    let (starting_weight, is_initial_load) = match latest_weight {
        Some(w) => (w, false),
        None => {
            let default = EQUIPMENT_DEFAULTS
                .get(replacement.equipment_id.trim().to_lowercase().as_str())
                .copied()
                .unwrap_or(smallest_increment);
            (round_down(default, smallest_increment)?, true)
        }
    };

    Ok(SwapResult {
        new_exercise_id: replacement.id,
        starting_weight,
        is_initial_load,
    })
}
