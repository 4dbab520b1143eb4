// ==========================================
// 工厂管理后台 - 仓储聚合
// ==========================================
// 职责: 聚合页面 API 所需的所有 Repository
// 目标: 统一切换存储后端 (进程内 / SQLite)
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::domain::{
    ActionLog, ArticleVariant, InwardEntry, OutwardDelivery, ProductionTask, ProviderQcIssue,
    QcItem, WorkHistoryEntry, Worker,
};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::repository::error::RepositoryResult;
use crate::repository::memory_repo::MemoryRepository;
use crate::repository::sqlite_repo::SqliteRepository;
use crate::seed::SeedData;

/// 工厂仓储集合
///
/// 各 API 只持有自己需要的 `Arc<dyn Repository<T>>`,
/// 后端选择集中在这里完成。
#[derive(Clone)]
pub struct FactoryRepositories {
    /// 工人
    pub workers: Arc<dyn Repository<Worker>>,
    /// 工作记录
    pub work_history: Arc<dyn Repository<WorkHistoryEntry>>,
    /// 款式变体
    pub article_variants: Arc<dyn Repository<ArticleVariant>>,
    /// 入库记录
    pub inward_entries: Arc<dyn Repository<InwardEntry>>,
    /// 出库交付
    pub outward_deliveries: Arc<dyn Repository<OutwardDelivery>>,
    /// 客户质量问题
    pub provider_qc_issues: Arc<dyn Repository<ProviderQcIssue>>,
    /// 生产任务
    pub production_tasks: Arc<dyn Repository<ProductionTask>>,
    /// 厂内质检条目
    pub qc_items: Arc<dyn Repository<QcItem>>,
    /// 操作日志
    pub action_log: Arc<ActionLogRepository>,
}

impl FactoryRepositories {
    /// 进程内仓储,以样例数据初始化
    pub fn in_memory(seed: &SeedData) -> Self {
        Self {
            workers: Arc::new(MemoryRepository::seeded(seed.workers.clone())),
            work_history: Arc::new(MemoryRepository::seeded(seed.work_history.clone())),
            article_variants: Arc::new(MemoryRepository::seeded(seed.article_variants.clone())),
            inward_entries: Arc::new(MemoryRepository::seeded(seed.inward_entries.clone())),
            outward_deliveries: Arc::new(MemoryRepository::seeded(seed.outward_deliveries.clone())),
            provider_qc_issues: Arc::new(MemoryRepository::seeded(seed.provider_qc_issues.clone())),
            production_tasks: Arc::new(MemoryRepository::seeded(seed.production_tasks.clone())),
            qc_items: Arc::new(MemoryRepository::seeded(seed.qc_items.clone())),
            action_log: Arc::new(ActionLogRepository::new(Arc::new(MemoryRepository::<ActionLog>::new()))),
        }
    }

    /// SQLite 仓储 (共享连接,自动建表)
    pub fn sqlite(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let action_log: Arc<dyn Repository<ActionLog>> =
            Arc::new(SqliteRepository::<ActionLog>::from_connection(conn.clone())?);

        Ok(Self {
            workers: Arc::new(SqliteRepository::<Worker>::from_connection(conn.clone())?),
            work_history: Arc::new(SqliteRepository::<WorkHistoryEntry>::from_connection(conn.clone())?),
            article_variants: Arc::new(SqliteRepository::<ArticleVariant>::from_connection(conn.clone())?),
            inward_entries: Arc::new(SqliteRepository::<InwardEntry>::from_connection(conn.clone())?),
            outward_deliveries: Arc::new(SqliteRepository::<OutwardDelivery>::from_connection(conn.clone())?),
            provider_qc_issues: Arc::new(SqliteRepository::<ProviderQcIssue>::from_connection(conn.clone())?),
            production_tasks: Arc::new(SqliteRepository::<ProductionTask>::from_connection(conn.clone())?),
            qc_items: Arc::new(SqliteRepository::<QcItem>::from_connection(conn)?),
            action_log: Arc::new(ActionLogRepository::new(action_log)),
        })
    }

    /// 写入样例数据 (仅对空表生效)
    ///
    /// # 返回
    /// - Ok(usize): 新写入的记录数
    pub fn seed_if_empty(&self, seed: &SeedData) -> RepositoryResult<usize> {
        let mut written = 0;
        written += seed_one(self.workers.as_ref(), &seed.workers)?;
        written += seed_one(self.work_history.as_ref(), &seed.work_history)?;
        written += seed_one(self.article_variants.as_ref(), &seed.article_variants)?;
        written += seed_one(self.inward_entries.as_ref(), &seed.inward_entries)?;
        written += seed_one(self.outward_deliveries.as_ref(), &seed.outward_deliveries)?;
        written += seed_one(self.provider_qc_issues.as_ref(), &seed.provider_qc_issues)?;
        written += seed_one(self.production_tasks.as_ref(), &seed.production_tasks)?;
        written += seed_one(self.qc_items.as_ref(), &seed.qc_items)?;
        Ok(written)
    }
}

fn seed_one<T: crate::domain::Entity>(repo: &dyn Repository<T>, records: &[T]) -> RepositoryResult<usize> {
    if repo.count()? > 0 {
        return Ok(0);
    }
    repo.create_all(records.to_vec())
}
