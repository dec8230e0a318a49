//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`ApiResponse`] - API 响应结构
//! - 日志、时间、ID 等工具

pub mod error;
pub mod id;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError};
pub use error::{created, ok, ok_with_count, ok_with_message};
pub use result::AppResult;
