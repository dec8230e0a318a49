//! Floor Model
//!
//! Storage column names (`floor_name`, `floor_number`) differ from the
//! external API shape (`name`, `level`); [`FloorResponse`] maps between
//! the two.

use serde::{Deserialize, Serialize};

use super::double_option;
use crate::utils::validation::{self, MAX_NAME_LEN, MAX_NOTE_LEN};

/// Floor entity (楼层) — storage shape
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Floor {
    pub id: i64,
    pub floor_name: String,
    pub floor_number: i64,
    pub description: Option<String>,
    /// Unix millis
    pub created_at: i64,
}

/// Create floor payload — external field names.
///
/// All fields are optional at the serde boundary so that missing input
/// reaches `validate()` and produces field-level messages instead of a
/// deserialization reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorCreate {
    pub name: Option<String>,
    pub level: Option<i64>,
    pub description: Option<String>,
}

impl FloorCreate {
    /// Validate the candidate. All rules run independently and every
    /// failure is collected; nothing short-circuits.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        validation::require_text(self.name.as_deref(), "floor_name", &mut errors);
        validation::check_text_len(self.name.as_deref(), "floor_name", MAX_NAME_LEN, &mut errors);

        match self.level {
            None => errors.push("floor_number is required".to_string()),
            Some(level) if level < 0 => {
                errors.push("floor_number must be a non-negative number".to_string())
            }
            Some(_) => {}
        }

        validation::check_text_len(
            self.description.as_deref(),
            "description",
            MAX_NOTE_LEN,
            &mut errors,
        );

        errors
    }
}

/// Update floor payload — partial patch.
///
/// `description` uses a double option: absent means "keep", an explicit
/// `null` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FloorUpdate {
    pub name: Option<String>,
    pub level: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// External API shape for a floor: `{id, name, level, description}`.
/// Storage-only columns (`created_at`) are not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorResponse {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub description: String,
}

impl From<Floor> for FloorResponse {
    fn from(floor: Floor) -> Self {
        Self {
            id: floor.id,
            name: floor.floor_name,
            level: floor.floor_number,
            description: floor.description.unwrap_or_default(),
        }
    }
}
