// ==========================================
// 工厂管理后台 - 操作日志数据仓储
// ==========================================
// 红线: 所有写入必须记录
// 存储: 复用通用 Repository<ActionLog> 后端
// ==========================================

use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::entity_repo::Repository;
use crate::repository::error::RepositoryResult;
use std::sync::Arc;

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
pub struct ActionLogRepository {
    store: Arc<dyn Repository<ActionLog>>,
}

impl ActionLogRepository {
    /// 创建新的操作日志仓储
    pub fn new(store: Arc<dyn Repository<ActionLog>>) -> Self {
        Self { store }
    }

    /// 插入操作日志
    ///
    /// # 返回
    /// - `Ok(action_id)`: 成功插入,返回action_id
    pub fn insert(&self, log: ActionLog) -> RepositoryResult<String> {
        let action_id = log.action_id.clone();
        tracing::debug!(
            action_type = log.action_type.as_str(),
            entity = %log.entity,
            "记录操作日志"
        );
        self.store.create(log)?;
        Ok(action_id)
    }

    /// 最近 N 条 (时间倒序)
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ActionLog>> {
        let mut logs = self.store.list()?;
        logs.sort_by(|a, b| b.action_ts.cmp(&a.action_ts));
        logs.truncate(limit);
        Ok(logs)
    }

    /// 按目标记录查询 (时间正序)
    pub fn list_by_entity(&self, entity: &str, entity_id: &str) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.store.list()?;
        Ok(logs
            .into_iter()
            .filter(|l| l.entity == entity && l.entity_id.as_deref() == Some(entity_id))
            .collect())
    }

    /// 按操作类型查询
    pub fn list_by_type(&self, action_type: ActionType) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.store.list()?;
        Ok(logs.into_iter().filter(|l| l.action_type == action_type).collect())
    }

    /// 日志总数
    pub fn count(&self) -> RepositoryResult<usize> {
        self.store.count()
    }
}
