//! POS Server - 楼层与发票管理 REST API
//!
//! # 架构概述
//!
//! Router → Handler → Service → Repository → SQLite。
//! 每个请求独立处理，进程内不保留请求间共享的可变状态，
//! 并发正确性由数据库 UNIQUE 约束兜底。
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 业务规则 (验证、唯一性、生命周期)
//! ├── db/            # 连接池、模型、repository
//! └── utils/         # 错误、日志、时间、ID 等工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    init_logger_with_file(Some(&log_level), None);
}
