// ==========================================
// 工厂管理后台 - 实体标识
// ==========================================
// 职责: 可存储记录的统一标识约定
// 说明: 记录之间通过字符串 ID 关联,不做外键校验
// ==========================================

use serde::de::DeserializeOwned;
use serde::Serialize;

/// 可存储实体
///
/// 仓储层只依赖此 trait,不关心具体字段
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 实体名 (用于错误信息、操作日志、SQLite 表名)
    const ENTITY: &'static str;

    /// 主键
    fn id(&self) -> &str;

    /// 写入前的记录级校验,返回违反的约束
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
