//! Data models
//!
//! DB row types derive `sqlx::FromRow`.
//! All IDs are `i64` (snowflake, SQLite INTEGER PRIMARY KEY).

pub mod floor;
pub mod invoice;
pub mod location;

// Re-exports
pub use floor::*;
pub use invoice::*;
pub use location::*;

use serde::{Deserialize, Deserializer};

/// Deserialize helper distinguishing an absent field from an explicit `null`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]`:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
