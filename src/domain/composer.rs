use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::domain::library::{
    compound_only, eligible_by_experience, equipment_ids_for, filter_by_equipment, EQUIPMENT_DEFAULTS,
};
use crate::domain::rounding::round_down;
use crate::error::AppError;
use crate::models::{Exercise, PlanDay, PlannedSlot, QuestionnaireResponse};

const TARGET_SETS: i64 = 3;
const TARGET_REPS_MIN: i64 = 6;
const TARGET_REPS_MAX: i64 = 12;
const MAX_BEGINNER_ACCESSORY_PER_SESSION: i64 = 2;

static SESSION_PATTERNS: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    [
        ("push", vec!["horizontal push", "vertical push", "core"]),
        ("pull", vec!["horizontal pull", "vertical pull", "core"]),
        ("legs", vec!["squat", "hinge", "single-leg", "core"]),
        ("lower", vec!["squat", "hinge", "single-leg", "core"]),
        (
            "upper",
            vec![
                "horizontal push",
                "horizontal pull",
                "vertical push",
                "vertical pull",
                "core",
            ],
        ),
        (
            "full_body",
            vec![
                "horizontal pull",
                "horizontal push",
                "squat",
                "hinge",
                "vertical push",
                "vertical pull",
                "core",
            ],
        ),
    ]
    .into_iter()
    .collect()
});

static ACCESSORY_MUSCLES_BY_SESSION: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    [
        ("push", ["chest", "shoulders", "triceps"].into_iter().collect()),
        ("pull", ["back", "biceps"].into_iter().collect()),
        (
            "legs",
            ["quadriceps", "hamstrings", "glutes", "calves"].into_iter().collect(),
        ),
        (
            "lower",
            ["quadriceps", "hamstrings", "glutes", "calves"].into_iter().collect(),
        ),
        (
            "upper",
            ["chest", "back", "shoulders", "biceps", "triceps"].into_iter().collect(),
        ),
        (
            "full_body",
            ["quadriceps", "hamstrings", "glutes", "chest", "back", "shoulders"]
                .into_iter()
                .collect(),
        ),
    ]
    .into_iter()
    .collect()
});

static FOCUS_AREA_MUSCLES: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    [
        ("chest", ["chest"].into_iter().collect()),
        ("back", ["back"].into_iter().collect()),
        ("shoulders", ["shoulders"].into_iter().collect()),
        ("arms", ["biceps", "triceps", "forearms"].into_iter().collect()),
        (
            "legs",
            ["quadriceps", "hamstrings", "glutes", "calves", "adductors", "abductors"]
                .into_iter()
                .collect(),
        ),
        ("core", ["core", "abdominals"].into_iter().collect()),
        ("glutes", ["glutes"].into_iter().collect()),
    ]
    .into_iter()
    .collect()
});

fn default_training_days(schedule_days: i64) -> Vec<i64> {
    match schedule_days {
        1 => vec![0],
        2 => vec![0, 3],
        3 => vec![0, 2, 4],
        4 => vec![0, 2, 4, 6],
        5 => vec![0, 2, 3, 5, 6],
        6 => vec![0, 1, 2, 4, 5, 6],
        7 => (0..7).collect(),
        _ => unreachable!("schedule_days validated to [1,7] before this point"),
    }
}

fn resolve_training_days(questionnaire: &QuestionnaireResponse) -> Result<Vec<i64>, AppError> {
    let schedule_days = questionnaire.schedule_days;
    if schedule_days < 1 {
        return Err(AppError::TrainingDaysRequired);
    }
    if schedule_days > 7 {
        return Err(AppError::WeeklyFrequencyTooHigh);
    }

    let (mut days, was_explicit) = match &questionnaire.training_days_of_week {
        Some(given) => {
            if given.len() as i64 != schedule_days {
                return Err(AppError::TrainingDayCountMismatch);
            }
            if given.iter().any(|d| !(0..=6).contains(d)) {
                return Err(AppError::TrainingDaysOutOfRange);
            }
            let unique: HashSet<i64> = given.iter().copied().collect();
            if unique.len() != given.len() {
                return Err(AppError::TrainingDaysDuplicate);
            }
            let mut sorted = given.clone();
            sorted.sort_unstable();
            (sorted, true)
        }
        None => (default_training_days(schedule_days), false),
    };
    days.sort_unstable();

    // The curated default sets (§4.4 Step 1) are allowed to contain the
    // 6->0 weekly wrap triple (e.g. the 5-day default's Fri/Sat/Sun run);
    // the spacing rule only constrains explicitly supplied schedules.
    if was_explicit && schedule_days < 6 {
        let training: HashSet<i64> = days.iter().copied().collect();
        for start in 0..7i64 {
            let a = start % 7;
            let b = (start + 1) % 7;
            let c = (start + 2) % 7;
            if training.contains(&a) && training.contains(&b) && training.contains(&c) {
                return Err(AppError::TrainingDaysTooConsecutive);
            }
        }
    }

    Ok(days)
}

fn select_split(goals: &str, schedule_days: i64) -> Result<&'static str, AppError> {
    const KNOWN_GOALS: [&str; 4] = ["general_fitness", "muscle_gain", "strength", "weight_loss"];
    if !KNOWN_GOALS.contains(&goals) {
        return Err(AppError::UnknownGoal);
    }

    Ok(match schedule_days {
        d if d <= 3 => "full_body",
        4 => "upper_lower",
        5 | 6 => "push_pull_legs",
        _ => "push_pull_legs",
    })
}

fn build_week_structure(
    split: &str,
    schedule_days: i64,
    split_variant: Option<&str>,
) -> Result<Vec<&'static str>, AppError> {
    match (split, schedule_days) {
        ("full_body", d) => Ok(vec!["full_body"; d as usize]),
        ("upper_lower", 4) => Ok(vec!["upper", "lower", "upper", "lower"]),
        ("push_pull_legs", 5) => {
            let variant = split_variant.unwrap_or("ppl_upper_lower");
            match variant {
                "ppl_upper_lower" => Ok(vec!["push", "pull", "legs", "upper", "lower"]),
                "ppl_push_pull" => Ok(vec!["push", "pull", "legs", "push", "pull"]),
                _ => Err(AppError::InvalidSplitVariant),
            }
        }
        ("push_pull_legs", 6) => Ok(vec!["push", "pull", "legs", "push", "pull", "legs"]),
        ("push_pull_legs", d) if d >= 7 => {
            let mut structure = vec!["push", "pull", "legs", "push", "pull", "legs"];
            for _ in 6..d {
                structure.push("full_body");
            }
            Ok(structure)
        }
        _ => Ok(vec!["full_body"; schedule_days as usize]),
    }
}

fn session_budget(experience_level: &str, session_duration_minutes: Option<i64>) -> i64 {
    match session_duration_minutes {
        None => match experience_level {
            "beginner" => 4,
            "intermediate" => 5,
            _ => 6,
        },
        Some(minutes) => {
            if minutes <= 30 {
                3
            } else if minutes <= 45 {
                4
            } else if minutes <= 60 {
                5
            } else if minutes <= 75 {
                6
            } else {
                7
            }
        }
    }
}

fn accessory_slot_cap(experience_level: &str) -> i64 {
    match experience_level {
        "beginner" => 1,
        "intermediate" => 2,
        _ => 3,
    }
}

fn pick_first_by_name(candidates: &[Exercise]) -> Option<Exercise> {
    candidates.iter().min_by(|a, b| a.name.cmp(&b.name)).cloned()
}

struct DaySelectionState {
    selected_ids: HashSet<i64>,
    beginner_muscle_counts: HashMap<String, i64>,
}

fn select_exercise_for_pattern(
    pattern: &str,
    pool: &[Exercise],
    experience_level: &str,
    state: &mut DaySelectionState,
) -> Result<Exercise, AppError> {
    let pattern_pool: Vec<Exercise> = pool
        .iter()
        .filter(|e| e.movement_pattern.trim().eq_ignore_ascii_case(pattern))
        .filter(|e| !state.selected_ids.contains(&e.id))
        .cloned()
        .collect();

    let eligible = eligible_by_experience(&pattern_pool, experience_level)?;
    if eligible.is_empty() {
        return Err(AppError::MinimumLibraryRequirements);
    }

    let mut candidate = pick_first_by_name(&eligible).expect("non-empty eligible pool");

    if experience_level == "beginner" && pattern != "core" && candidate.is_accessory() {
        let blocked = candidate
            .primary_muscles()
            .iter()
            .any(|m| *state.beginner_muscle_counts.get(m).unwrap_or(&0) >= MAX_BEGINNER_ACCESSORY_PER_SESSION);
        if blocked {
            let compounds = compound_only(&pattern_pool);
            match pick_first_by_name(&compounds) {
                Some(replacement) => candidate = replacement,
                None => return Err(AppError::MinimumLibraryRequirements),
            }
        }
    }

    if experience_level == "beginner" && pattern != "core" && candidate.is_accessory() {
        for muscle in candidate.primary_muscles() {
            *state.beginner_muscle_counts.entry(muscle).or_insert(0) += 1;
        }
    }

    state.selected_ids.insert(candidate.id);
    Ok(candidate)
}

fn select_accessory_slots(
    pool: &[Exercise],
    session_type: &str,
    experience_level: &str,
    focus_areas: &[String],
    remaining_budget: i64,
    state: &mut DaySelectionState,
) -> Vec<Exercise> {
    let cap = remaining_budget.min(accessory_slot_cap(experience_level));
    if cap <= 0 {
        return Vec::new();
    }

    let accessory_pool: Vec<Exercise> = pool
        .iter()
        .filter(|e| e.is_accessory())
        .filter(|e| !state.selected_ids.contains(&e.id))
        .cloned()
        .collect();

    let mut focus_target_muscles: HashSet<&str> = HashSet::new();
    for area in focus_areas {
        if let Some(muscles) = FOCUS_AREA_MUSCLES.get(area.trim().to_lowercase().as_str()) {
            focus_target_muscles.extend(muscles.iter().copied());
        }
    }

    let focus_group: Vec<Exercise> = if !focus_target_muscles.is_empty() {
        accessory_pool
            .iter()
            .filter(|e| e.primary_muscles().iter().any(|m| focus_target_muscles.contains(m.as_str())))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let session_muscles = ACCESSORY_MUSCLES_BY_SESSION
        .get(session_type)
        .cloned()
        .unwrap_or_default();
    let fallback_group: Vec<Exercise> = accessory_pool
        .iter()
        .filter(|e| !focus_group.iter().any(|f| f.id == e.id))
        .filter(|e| e.primary_muscles().iter().any(|m| session_muscles.contains(m.as_str())))
        .cloned()
        .collect();

    let mut combined = focus_group;
    combined.extend(fallback_group);
    combined.sort_by(|a, b| a.name.cmp(&b.name));
    combined.dedup_by(|a, b| a.id == b.id);

    let mut chosen = Vec::new();
    for exercise in combined.into_iter() {
        if chosen.len() as i64 >= cap {
            break;
        }
        if experience_level == "beginner" {
            let blocked = exercise.primary_muscles().iter().any(|m| {
                *state.beginner_muscle_counts.get(m).unwrap_or(&0) >= MAX_BEGINNER_ACCESSORY_PER_SESSION
            });
            if blocked {
                continue;
            }
            for muscle in exercise.primary_muscles() {
                *state.beginner_muscle_counts.entry(muscle).or_insert(0) += 1;
            }
        }
        state.selected_ids.insert(exercise.id);
        chosen.push(exercise);
    }
    chosen
}

fn starting_weight_for(
    exercise: &Exercise,
    latest_performance: &dyn Fn(i64) -> Option<f64>,
    smallest_increment: f64,
) -> Result<(f64, bool), AppError> {
    match latest_performance(exercise.id) {
        Some(latest) => Ok((latest, false)),
        None => {
            let default = EQUIPMENT_DEFAULTS
                .get(exercise.equipment_id.trim().to_lowercase().as_str())
                .copied()
                .unwrap_or(smallest_increment);
            Ok((round_down(default, smallest_increment)?, true))
        }
    }
}

/// Composes an in-memory plan from a questionnaire and an already-fetched
/// exercise pool (every exercise matching the union of required patterns
/// under the questionnaire's allowed equipment). Pure aside from the
/// `latest_performance` lookup, which the caller materialises as a
/// read-only snapshot before composition begins (see DESIGN.md).
pub fn compose_plan(
    questionnaire: &QuestionnaireResponse,
    pool: &[Exercise],
    smallest_increment: f64,
    latest_performance: &dyn Fn(i64) -> Option<f64>,
) -> Result<Vec<PlanDay>, AppError> {
    let training_days = resolve_training_days(questionnaire)?;
    let split = select_split(&questionnaire.goals, questionnaire.schedule_days)?;
    let week_structure = build_week_structure(
        split,
        questionnaire.schedule_days,
        questionnaire.split_variant.as_deref(),
    )?;

    let allowed_equipment = equipment_ids_for(&questionnaire.equipment_available)?;
    let equipment_pool = filter_by_equipment(pool, &allowed_equipment);

    let focus_areas = questionnaire.focus_areas.clone().unwrap_or_default();
    let budget = session_budget(
        &questionnaire.experience_level,
        questionnaire.session_duration_minutes,
    );

    let mut days = Vec::new();

    for (day_index, session_type) in training_days.iter().zip(week_structure.iter()) {
        let mut state = DaySelectionState {
            selected_ids: HashSet::new(),
            beginner_muscle_counts: HashMap::new(),
        };

        let patterns: Vec<&str> = SESSION_PATTERNS
            .get(*session_type)
            .cloned()
            .unwrap_or_default();
        let truncated_patterns: Vec<&str> = patterns.into_iter().take(budget as usize).collect();

        let mut slots = Vec::new();
        for pattern in &truncated_patterns {
            let exercise = select_exercise_for_pattern(
                pattern,
                &equipment_pool,
                &questionnaire.experience_level,
                &mut state,
            )?;
            let (starting_weight, is_initial_load) =
                starting_weight_for(&exercise, latest_performance, smallest_increment)?;
            slots.push(PlannedSlot {
                day_index: *day_index,
                sequence: slots.len() as i64 + 1,
                session_type: session_type.to_string(),
                pattern: pattern.to_string(),
                exercise_id: exercise.id,
                target_sets: TARGET_SETS,
                target_reps_min: TARGET_REPS_MIN,
                target_reps_max: TARGET_REPS_MAX,
                starting_weight: Some(starting_weight),
                is_initial_load,
            });
        }

        let remaining_budget = budget - slots.len() as i64;
        let accessories = select_accessory_slots(
            &equipment_pool,
            session_type,
            &questionnaire.experience_level,
            &focus_areas,
            remaining_budget,
            &mut state,
        );
        for exercise in accessories {
            let (starting_weight, is_initial_load) =
                starting_weight_for(&exercise, latest_performance, smallest_increment)?;
            slots.push(PlannedSlot {
                day_index: *day_index,
                sequence: slots.len() as i64 + 1,
                session_type: session_type.to_string(),
                pattern: "accessory".to_string(),
                exercise_id: exercise.id,
                target_sets: TARGET_SETS,
                target_reps_min: TARGET_REPS_MIN,
                target_reps_max: TARGET_REPS_MAX,
                starting_weight: Some(starting_weight),
                is_initial_load,
            });
        }

        days.push(PlanDay {
            day_index: *day_index,
            session_type: session_type.to_string(),
            slots,
        });
    }

    Ok(days)
}

/// Union of every movement pattern this questionnaire's split will need,
/// plus `accessory`, for the single upfront library pool fetch (§4.2/§9).
pub fn required_patterns(questionnaire: &QuestionnaireResponse) -> Result<Vec<String>, AppError> {
    let split = select_split(&questionnaire.goals, questionnaire.schedule_days)?;
    let week_structure = build_week_structure(
        split,
        questionnaire.schedule_days,
        questionnaire.split_variant.as_deref(),
    )?;
    let mut patterns: HashSet<String> = HashSet::new();
    for session_type in &week_structure {
        if let Some(list) = SESSION_PATTERNS.get(session_type) {
            patterns.extend(list.iter().map(|p| p.to_string()));
        }
    }
    patterns.insert("accessory".to_string());
    let mut result: Vec<String> = patterns.into_iter().collect();
    result.sort();
    Ok(result)
}
