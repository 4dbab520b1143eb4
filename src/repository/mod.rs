// ==========================================
// 工厂管理后台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽存储细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod action_log_repo;
pub mod entity_repo;
pub mod error;
pub mod memory_repo;
pub mod repositories;
pub mod sqlite_repo;

// 重导出核心仓储
pub use action_log_repo::ActionLogRepository;
pub use entity_repo::Repository;
pub use error::{RepositoryError, RepositoryResult};
pub use memory_repo::MemoryRepository;
pub use repositories::FactoryRepositories;
pub use sqlite_repo::SqliteRepository;
