//! Floor API Handlers
//!
//! Pure translation layer: extract parameters, call exactly one service
//! operation, wrap the result in the `{success, data, message?}`
//! envelope. Status codes come from the `AppError` kind.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{FloorCreate, FloorResponse, FloorUpdate, Location};
use crate::utils::{ApiResponse, AppResult, created, ok, ok_with_count, ok_with_message};

/// GET /api/floors - 获取所有楼层
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<FloorResponse>>>> {
    let floors = state.floors.list().await?;
    Ok(ok_with_count(floors))
}

/// GET /api/floors/:id - 获取单个楼层
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<FloorResponse>>> {
    let floor = state.floors.get(id).await?;
    Ok(ok(floor))
}

/// GET /api/floors/:id/locations - 楼层下的所有位置
pub async fn list_locations(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Location>>>> {
    let locations = state.floors.list_locations(id).await?;
    Ok(ok_with_count(locations))
}

/// POST /api/floors - 创建楼层
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FloorCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<FloorResponse>>)> {
    let floor = state.floors.create(payload).await?;
    Ok(created(floor))
}

/// PUT /api/floors/:id - 更新楼层 (部分更新)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FloorUpdate>,
) -> AppResult<Json<ApiResponse<FloorResponse>>> {
    let floor = state.floors.update(id, payload).await?;
    Ok(ok(floor))
}

/// DELETE /api/floors/:id - 删除楼层，返回被删除的记录
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<FloorResponse>>> {
    let floor = state.floors.delete(id).await?;
    Ok(ok_with_message(floor, "Floor deleted"))
}
