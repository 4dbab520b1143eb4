// ==========================================
// 工厂管理后台 - 进程内仓储
// ==========================================
// 职责: 会话级存储,进程退出即丢失
// 存储: Mutex<Vec<T>>,保持插入顺序
// ==========================================

use crate::domain::entity::Entity;
use crate::repository::entity_repo::Repository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Mutex, MutexGuard};

/// 进程内仓储
pub struct MemoryRepository<T: Entity> {
    records: Mutex<Vec<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    /// 创建空仓储
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// 以样例数据初始化
    pub fn seeded(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn guard(&self) -> RepositoryResult<MutexGuard<'_, Vec<T>>> {
        self.records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
    fn find(&self, id: &str) -> RepositoryResult<Option<T>> {
        let records = self.guard()?;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    fn list(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.guard()?.clone())
    }

    fn create(&self, record: T) -> RepositoryResult<()> {
        RepositoryError::check(&record)?;
        let mut records = self.guard()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(RepositoryError::duplicate(T::ENTITY, record.id()));
        }
        records.push(record);
        Ok(())
    }

    fn update(&self, record: T) -> RepositoryResult<()> {
        RepositoryError::check(&record)?;
        let mut records = self.guard()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::not_found(T::ENTITY, record.id())),
        }
    }

    fn delete(&self, id: &str) -> RepositoryResult<T> {
        let mut records = self.guard()?;
        match records.iter().position(|r| r.id() == id) {
            Some(idx) => Ok(records.remove(idx)),
            None => Err(RepositoryError::not_found(T::ENTITY, id)),
        }
    }

    fn count(&self) -> RepositoryResult<usize> {
        Ok(self.guard()?.len())
    }
}
