use std::collections::{HashMap, HashSet};

use crate::domain::library::equipment_ids_for;
use crate::error::AppError;
use crate::models::{Exercise, PlanDay, QuestionnaireResponse};

const MAX_BEGINNER_ACCESSORY_PER_MUSCLE: i64 = 2;

/// Walks a composed plan and refuses to let a non-conformant plan reach
/// persistence. Runs after composition, before the write transaction.
pub fn audit_plan(
    days: &[PlanDay],
    questionnaire: &QuestionnaireResponse,
    exercises_by_id: &HashMap<i64, Exercise>,
) -> Result<(), AppError> {
    let allowed_equipment = equipment_ids_for(&questionnaire.equipment_available)?;
    let beginner = questionnaire.experience_level == "beginner";

    for day in days {
        let mut muscle_counts: HashMap<String, i64> = HashMap::new();

        for slot in &day.slots {
            let exercise = exercises_by_id
                .get(&slot.exercise_id)
                .ok_or(AppError::PlannedExerciseNotFound)?;

            if !allowed_equipment.contains(exercise.equipment_id.trim().to_lowercase().as_str()) {
                return Err(AppError::PlanEquipmentMismatch);
            }

            if slot.pattern == "accessory" {
                if !exercise.is_accessory() {
                    return Err(AppError::PlanAccessoryMismatch);
                }
            } else if !exercise
                .movement_pattern
                .trim()
                .eq_ignore_ascii_case(slot.pattern.trim())
            {
                return Err(AppError::PlanPatternMismatch);
            }

            if beginner && exercise.is_accessory() {
                for muscle in exercise.primary_muscles() {
                    let count = muscle_counts.entry(muscle).or_insert(0);
                    *count += 1;
                    if *count > MAX_BEGINNER_ACCESSORY_PER_MUSCLE {
                        return Err(AppError::PlanAccessoryLimit);
                    }
                }
            }
        }

        let pattern_slot_count = day.slots.iter().filter(|s| s.pattern != "accessory").count();
        let distinct_exercises: HashSet<i64> = day.slots.iter().map(|s| s.exercise_id).collect();
        if pattern_slot_count > distinct_exercises.len() {
            return Err(AppError::PlanSelectionMismatch);
        }
    }

    Ok(())
}
