//! Location Repository

use sqlx::SqlitePool;

use super::RepoResult;
use crate::db::models::Location;

/// Number of locations attached to a floor (delete guard for floors).
pub async fn count_by_floor(pool: &SqlitePool, floor_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM location WHERE floor_id = ?")
        .bind(floor_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn find_by_floor(pool: &SqlitePool, floor_id: i64) -> RepoResult<Vec<Location>> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT id, floor_id, name, created_at FROM location WHERE floor_id = ? ORDER BY name",
    )
    .bind(floor_id)
    .fetch_all(pool)
    .await?;
    Ok(locations)
}
