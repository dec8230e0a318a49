//! Location Model
//!
//! Locations (tills, seating areas, storage rooms) belong to a floor.
//! A floor that still has locations attached cannot be deleted.

use serde::{Deserialize, Serialize};

/// Location entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub floor_id: i64,
    pub name: String,
    /// Unix millis
    pub created_at: i64,
}
