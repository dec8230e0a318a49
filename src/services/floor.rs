//! Floor Service
//!
//! Validation, uniqueness and the dependent-location delete guard.

use sqlx::SqlitePool;

use crate::db::models::{Floor, FloorCreate, FloorResponse, FloorUpdate, Location};
use crate::db::repository::{floor as floor_repo, location as location_repo};
use crate::utils::{AppError, AppResult, id, time};

#[derive(Clone)]
pub struct FloorService {
    pool: SqlitePool,
}

impl FloorService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<FloorResponse>> {
        let floors = floor_repo::find_all(&self.pool).await?;
        Ok(floors.into_iter().map(FloorResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<FloorResponse> {
        let floor = floor_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Floor"))?;
        Ok(FloorResponse::from(floor))
    }

    /// Locations attached to a floor (the records that block deletion).
    pub async fn list_locations(&self, id: i64) -> AppResult<Vec<Location>> {
        floor_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Floor"))?;
        Ok(location_repo::find_by_floor(&self.pool, id).await?)
    }

    pub async fn create(&self, payload: FloorCreate) -> AppResult<FloorResponse> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(AppError::validation(errors.join(", ")));
        }

        // validate() guarantees both are present
        let name = payload.name.unwrap_or_default();
        let name = name.trim().to_string();
        let level = payload.level.unwrap_or_default();

        if floor_repo::name_exists(&self.pool, &name, None).await? {
            return Err(AppError::conflict(format!(
                "Floor with name '{name}' already exists"
            )));
        }
        if floor_repo::number_exists(&self.pool, level, None).await? {
            return Err(AppError::conflict(format!(
                "Floor with level {level} already exists"
            )));
        }

        let floor = Floor {
            id: id::snowflake_id(),
            floor_name: name,
            floor_number: level,
            description: payload.description,
            created_at: time::now_millis(),
        };
        let created = floor_repo::insert(&self.pool, &floor).await?;
        tracing::info!(floor = %created.floor_name, level = created.floor_number, "Floor created");
        Ok(FloorResponse::from(created))
    }

    /// Partial update: patch fields override the existing record, the
    /// merged candidate is re-validated in full, and duplicate checks
    /// run only for fields that actually change.
    pub async fn update(&self, id: i64, patch: FloorUpdate) -> AppResult<FloorResponse> {
        let existing = floor_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Floor"))?;

        let merged = FloorCreate {
            name: patch.name.clone().or_else(|| Some(existing.floor_name.clone())),
            level: patch.level.or(Some(existing.floor_number)),
            description: match &patch.description {
                Some(value) => value.clone(),
                None => existing.description.clone(),
            },
        };

        let errors = merged.validate();
        if !errors.is_empty() {
            return Err(AppError::validation(errors.join(", ")));
        }

        let name = merged.name.unwrap_or_default().trim().to_string();
        let level = merged.level.unwrap_or_default();

        if name != existing.floor_name
            && floor_repo::name_exists(&self.pool, &name, Some(id)).await?
        {
            return Err(AppError::conflict(format!(
                "Floor with name '{name}' already exists"
            )));
        }
        if level != existing.floor_number
            && floor_repo::number_exists(&self.pool, level, Some(id)).await?
        {
            return Err(AppError::conflict(format!(
                "Floor with level {level} already exists"
            )));
        }

        let candidate = Floor {
            id,
            floor_name: name,
            floor_number: level,
            description: merged.description,
            created_at: existing.created_at,
        };
        let updated = floor_repo::update(&self.pool, &candidate).await?;
        Ok(FloorResponse::from(updated))
    }

    /// Delete a floor; blocked while any location still references it.
    /// Returns the deleted record.
    pub async fn delete(&self, id: i64) -> AppResult<FloorResponse> {
        let existing = floor_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Floor"))?;

        let locations = location_repo::count_by_floor(&self.pool, id).await?;
        if locations > 0 {
            return Err(AppError::business_rule(format!(
                "Cannot delete floor with {locations} location(s) attached"
            )));
        }

        floor_repo::delete(&self.pool, id).await?;
        tracing::info!(floor = %existing.floor_name, "Floor deleted");
        Ok(FloorResponse::from(existing))
    }
}
