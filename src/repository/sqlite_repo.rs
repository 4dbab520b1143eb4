// ==========================================
// 工厂管理后台 - SQLite 仓储
// ==========================================
// 存储: 每个实体一张表 (seq, id, payload JSON)
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::db::ensure_entity_table;
use crate::domain::entity::Entity;
use crate::repository::entity_repo::Repository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SqliteRepository - 通用 SQLite 仓储
// ==========================================
pub struct SqliteRepository<T: Entity> {
    conn: Arc<Mutex<Connection>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteRepository<T> {
    /// 从已有连接创建仓储实例 (自动建表)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_entity_table(&guard, T::ENTITY)?;
        }
        Ok(Self {
            conn,
            _marker: PhantomData,
        })
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn decode(payload: &str) -> RepositoryResult<T> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl<T: Entity> Repository<T> for SqliteRepository<T> {
    fn find(&self, id: &str) -> RepositoryResult<Option<T>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                &format!("SELECT payload FROM {} WHERE id = ?1", T::ENTITY),
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        payload.as_deref().map(Self::decode).transpose()
    }

    fn list(&self) -> RepositoryResult<Vec<T>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT payload FROM {} ORDER BY seq", T::ENTITY))?;
        let payloads = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        payloads.iter().map(|p| Self::decode(p)).collect()
    }

    fn create(&self, record: T) -> RepositoryResult<()> {
        RepositoryError::check(&record)?;
        let payload = serde_json::to_string(&record)?;
        let conn = self.get_conn()?;
        let inserted = conn.execute(
            &format!("INSERT OR IGNORE INTO {} (id, payload) VALUES (?1, ?2)", T::ENTITY),
            params![record.id(), payload],
        )?;

        if inserted == 0 {
            return Err(RepositoryError::duplicate(T::ENTITY, record.id()));
        }
        Ok(())
    }

    fn update(&self, record: T) -> RepositoryResult<()> {
        RepositoryError::check(&record)?;
        let payload = serde_json::to_string(&record)?;
        let conn = self.get_conn()?;
        let updated = conn.execute(
            &format!(
                "UPDATE {} SET payload = ?2, updated_at = datetime('now') WHERE id = ?1",
                T::ENTITY
            ),
            params![record.id(), payload],
        )?;

        if updated == 0 {
            return Err(RepositoryError::not_found(T::ENTITY, record.id()));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> RepositoryResult<T> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let payload: Option<String> = tx
            .query_row(
                &format!("SELECT payload FROM {} WHERE id = ?1", T::ENTITY),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let payload = payload.ok_or_else(|| RepositoryError::not_found(T::ENTITY, id))?;

        tx.execute(&format!("DELETE FROM {} WHERE id = ?1", T::ENTITY), params![id])?;
        tx.commit()?;

        Self::decode(&payload)
    }

    fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", T::ENTITY), [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn create_all(&self, records: Vec<T>) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for record in &records {
            RepositoryError::check(record)?;
            let payload = serde_json::to_string(record)?;
            let inserted = tx.execute(
                &format!("INSERT OR IGNORE INTO {} (id, payload) VALUES (?1, ?2)", T::ENTITY),
                params![record.id(), payload],
            )?;
            if inserted == 0 {
                // tx 未提交,整体回滚
                return Err(RepositoryError::duplicate(T::ENTITY, record.id()));
            }
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::domain::{QcIssueStatus, ProviderQcIssue, WorkHistoryEntry};
    use crate::seed::SeedData;

    fn repo() -> SqliteRepository<ProviderQcIssue> {
        let conn = Arc::new(Mutex::new(open_in_memory().unwrap()));
        SqliteRepository::from_connection(conn).unwrap()
    }

    #[test]
    fn test_create_find_update_delete() {
        let repo = repo();
        let seed = SeedData::sample();
        assert_eq!(repo.create_all(seed.provider_qc_issues.clone()).unwrap(), 3);

        let mut issue = repo.find("PQC001").unwrap().unwrap();
        assert_eq!(issue.defects, vec!["Poor stitching", "Color mismatch"]);

        issue.status = QcIssueStatus::ReworkComplete;
        repo.update(issue).unwrap();
        assert_eq!(repo.find("PQC001").unwrap().unwrap().status, QcIssueStatus::ReworkComplete);

        let removed = repo.delete("PQC003").unwrap();
        assert_eq!(removed.id, "PQC003");
        assert_eq!(repo.count().unwrap(), 2);
        assert!(repo.find("PQC003").unwrap().is_none());
    }

    #[test]
    fn test_batch_with_duplicate_rolls_back() {
        let repo = repo();
        let seed = SeedData::sample();
        let mut batch = seed.provider_qc_issues.clone();
        batch.push(seed.provider_qc_issues[0].clone());

        assert!(repo.create_all(batch).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let repo = repo();
        let seed = SeedData::sample();
        let err = repo.update(seed.provider_qc_issues[1].clone()).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_paid_rework_rejected_before_write() {
        let conn = Arc::new(Mutex::new(open_in_memory().unwrap()));
        let repo: SqliteRepository<WorkHistoryEntry> = SqliteRepository::from_connection(conn).unwrap();
        let seed = SeedData::sample();

        let mut batch = seed.work_history.clone();
        batch[1].is_rework = true;
        batch[1].payable_amount = 80.0;
        let err = repo.create_all(batch).unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));
        assert_eq!(repo.count().unwrap(), 0);

        assert_eq!(repo.create_all(seed.work_history.clone()).unwrap(), 3);
        let mut entry = seed.work_history[0].clone();
        entry.is_rework = true;
        entry.payable_amount = 1.0;
        assert!(matches!(repo.update(entry).unwrap_err(), RepositoryError::ValidationError(_)));
    }
}
