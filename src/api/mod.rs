//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`floors`] - 楼层管理接口
//! - [`invoices`] - 发票管理接口

pub mod floors;
pub mod health;
pub mod invoices;

use axum::Router;

use crate::core::ServerState;

/// Assemble every resource router under `/api`
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(floors::router())
        .merge(invoices::router())
}
