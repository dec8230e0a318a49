//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`ApiResponse`] - API 响应结构
//!
//! # 错误分类
//!
//! | 分类 | HTTP | 说明 |
//! |------|------|------|
//! | Validation | 400 | 字段验证失败 (多条错误合并为一条消息) |
//! | BusinessRule | 400 | 业务规则违反 (禁止删除、非法状态转换) |
//! | NotFound | 404 | 资源不存在 |
//! | Conflict | 409 | 唯一字段重复 |
//! | Database | 500 | 数据库错误 |
//! | Internal | 500 | 内部错误 |
//!
//! 状态码由错误分类决定，而不是消息内容匹配。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API 统一响应结构
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "optional",
///   "count": 3
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 消息 (错误时必填)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 列表响应的记录数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Business rule violation: {0}")]
    /// 业务规则违反 (400)
    BusinessRule(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

// ========== Helper Constructors ==========

impl AppError {
    /// Create a validation error from already-joined field messages
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with the sentinel message `"<resource> not found"`
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a business rule error
    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this error kind
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BusinessRule(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message (bare, without the enum display prefix)
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::BusinessRule(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg.as_str(),
            // Database details stay in the logs
            AppError::Database(_) => "Database error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Database(msg) = &self {
            error!(target: "database", error = %msg, "Database error occurred");
        }
        if let AppError::Internal(msg) = &self {
            error!(target: "internal", error = %msg, "Internal error occurred");
        }

        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(self.message().to_string()),
            count: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        message: None,
        count: None,
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
        count: None,
    })
}

/// Create a successful list response carrying the record count
pub fn ok_with_count<T: Serialize>(data: Vec<T>) -> Json<ApiResponse<Vec<T>>> {
    let count = data.len();
    Json(ApiResponse {
        success: true,
        data: Some(data),
        message: None,
        count: Some(count),
    })
}

/// Create a 201 Created response
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(data))
}
