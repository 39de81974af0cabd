use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::error::AppError;
use crate::models::Exercise;

/// Equipment ids allowed for each `equipment_available` questionnaire value.
pub static EQUIPMENT_ALLOWED: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("none", ["bodyweight", "band"].into_iter().collect());
    m.insert(
        "dumbbells_only",
        ["bodyweight", "band", "dumbbell"].into_iter().collect(),
    );
    m.insert(
        "home_gym",
        ["bodyweight", "band", "dumbbell", "barbell"]
            .into_iter()
            .collect(),
    );
    m.insert(
        "full_gym",
        ["bodyweight", "band", "dumbbell", "barbell", "cable", "machine"]
            .into_iter()
            .collect(),
    );
    m
});

pub static EQUIPMENT_DEFAULTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("barbell", 45.0),
        ("dumbbell", 10.0),
        ("kettlebell", 8.0),
        ("machine", 10.0),
        ("cable", 10.0),
        ("band", 5.0),
        ("bodyweight", 0.0),
        ("weighted vest", 10.0),
    ]
    .into_iter()
    .collect()
});

pub static LOWER_BODY_PATTERNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["squat", "hinge", "single-leg", "carry"].into_iter().collect());

pub static LOWER_BODY_MUSCLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "quadriceps",
        "glutes",
        "hamstrings",
        "calves",
        "adductors",
        "abductors",
        "hip flexors",
    ]
    .into_iter()
    .collect()
});

pub fn equipment_ids_for(equipment_available: &str) -> Result<HashSet<&'static str>, AppError> {
    EQUIPMENT_ALLOWED
        .get(equipment_available)
        .cloned()
        .ok_or(AppError::UnknownEquipment)
}

/// In-process filter over an already-fetched pool. The SQL-level filter by
/// `(movement_pattern, equipment_id)` lives in the db layer; this is the
/// pure predicate both composer and swap reuse once exercises are in hand.
pub fn filter_by_equipment(pool: &[Exercise], allowed: &HashSet<&'static str>) -> Vec<Exercise> {
    pool.iter()
        .filter(|e| allowed.contains(e.equipment_id.trim().to_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Splits a pool into eligible exercises given the user's experience level.
/// Beginners only ever see compounds, falling back to accessories if no
/// compound exists. Intermediate/advanced see compound+accessory when any
/// compound exists, else accessories only.
pub fn eligible_by_experience(
    pool: &[Exercise],
    experience_level: &str,
) -> Result<Vec<Exercise>, AppError> {
    let compound: Vec<Exercise> = pool.iter().filter(|e| e.is_compound()).cloned().collect();
    let accessory: Vec<Exercise> = pool.iter().filter(|e| e.is_accessory()).cloned().collect();

    match experience_level {
        "beginner" => {
            if !compound.is_empty() {
                Ok(compound)
            } else {
                Ok(accessory)
            }
        }
        "intermediate" | "advanced" => {
            if !compound.is_empty() {
                let mut combined = compound;
                combined.extend(accessory);
                Ok(combined)
            } else {
                Ok(accessory)
            }
        }
        _ => Err(AppError::UnknownExperienceLevel),
    }
}

pub fn compound_only(pool: &[Exercise]) -> Vec<Exercise> {
    pool.iter().filter(|e| e.is_compound()).cloned().collect()
}

pub fn is_lower_body(exercise: &Exercise) -> bool {
    LOWER_BODY_PATTERNS.contains(exercise.movement_pattern.trim().to_lowercase().as_str())
        || exercise
            .primary_muscles()
            .iter()
            .any(|m| LOWER_BODY_MUSCLES.contains(m.as_str()))
}
