// ==========================================
// 工厂管理后台 - 通用仓储 Trait
// ==========================================
// 职责: 定义实体的增删改查接口（不包含业务逻辑）
// 实现者: MemoryRepository（进程内）、SqliteRepository（rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::entity::Entity;
use crate::repository::error::RepositoryResult;

// ==========================================
// Repository Trait
// ==========================================
// 约定:
// - find 未命中返回 Ok(None),不是错误
// - create 遇到重复ID返回 UniqueConstraintViolation
// - update/delete 目标不存在返回 NotFound
// - list 保持插入顺序
pub trait Repository<T: Entity>: Send + Sync {
    /// 按ID查询
    fn find(&self, id: &str) -> RepositoryResult<Option<T>>;

    /// 查询全部
    fn list(&self) -> RepositoryResult<Vec<T>>;

    /// 新建
    fn create(&self, record: T) -> RepositoryResult<()>;

    /// 整条覆盖更新
    fn update(&self, record: T) -> RepositoryResult<()>;

    /// 删除,返回被删除的记录
    fn delete(&self, id: &str) -> RepositoryResult<T>;

    /// 记录数
    fn count(&self) -> RepositoryResult<usize> {
        Ok(self.list()?.len())
    }

    /// 批量新建 (遇到第一条失败即返回)
    fn create_all(&self, records: Vec<T>) -> RepositoryResult<usize> {
        let total = records.len();
        for record in records {
            self.create(record)?;
        }
        Ok(total)
    }
}
