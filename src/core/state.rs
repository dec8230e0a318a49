//! 服务器状态
//!
//! ServerState 持有所有服务的共享引用，通过显式构造注入
//! (repository → service → handler)，不使用模块级单例。

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::services::{FloorService, InvoiceService};

/// 服务器状态 - 持有所有服务的引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | floors | FloorService | 楼层业务逻辑 |
/// | invoices | InvoiceService | 发票业务逻辑 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// 楼层服务
    pub floors: FloorService,
    /// 发票服务
    pub invoices: InvoiceService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 数据库 (连接池 + 迁移)
    /// 3. 各服务 (Floor, Invoice)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// 从已有数据库服务构造状态 (测试场景)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let floors = FloorService::new(db.pool.clone());
        let invoices = InvoiceService::new(db.pool.clone());
        Self {
            config,
            db,
            floors,
            invoices,
        }
    }
}
