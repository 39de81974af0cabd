use serde::{Deserialize, Serialize};

/// Immutable reference row from the exercise library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub movement_pattern: String,
    pub category: String,
    pub equipment_id: String,
    pub primary_muscle: String,
}

impl Exercise {
    pub fn primary_muscles(&self) -> Vec<String> {
        self.primary_muscle
            .split(',')
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    }

    pub fn is_compound(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case("compound")
    }

    pub fn is_accessory(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case("accessory")
    }
}
