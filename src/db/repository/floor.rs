//! Floor Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::Floor;

const COLUMNS: &str = "id, floor_name, floor_number, description, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Floor>> {
    let floors = sqlx::query_as::<_, Floor>(&format!(
        "SELECT {COLUMNS} FROM floor ORDER BY floor_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(floors)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Floor>> {
    let floor = sqlx::query_as::<_, Floor>(&format!("SELECT {COLUMNS} FROM floor WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(floor)
}

/// Duplicate check on `floor_name`, optionally excluding one record
/// (used during update so a floor does not conflict with itself).
pub async fn name_exists(
    pool: &SqlitePool,
    name: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM floor WHERE floor_name = ? AND (? IS NULL OR id != ?)",
    )
    .bind(name)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Duplicate check on `floor_number`, optionally excluding one record.
pub async fn number_exists(
    pool: &SqlitePool,
    number: i64,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM floor WHERE floor_number = ? AND (? IS NULL OR id != ?)",
    )
    .bind(number)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn insert(pool: &SqlitePool, floor: &Floor) -> RepoResult<Floor> {
    sqlx::query(
        "INSERT INTO floor (id, floor_name, floor_number, description, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(floor.id)
    .bind(&floor.floor_name)
    .bind(floor.floor_number)
    .bind(&floor.description)
    .bind(floor.created_at)
    .execute(pool)
    .await?;
    find_by_id(pool, floor.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create floor".into()))
}

/// Write the merged row produced by the service's patch logic.
pub async fn update(pool: &SqlitePool, floor: &Floor) -> RepoResult<Floor> {
    let rows = sqlx::query(
        "UPDATE floor SET floor_name = ?, floor_number = ?, description = ? WHERE id = ?",
    )
    .bind(&floor.floor_name)
    .bind(floor.floor_number)
    .bind(&floor.description)
    .bind(floor.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Floor {} not found", floor.id)));
    }
    find_by_id(pool, floor.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Floor {} not found", floor.id)))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM floor WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
