//! 服务器级错误
//!
//! 启动和运行时基础设施的错误；请求级错误用
//! [`crate::utils::AppError`]。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器启动/运行的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
