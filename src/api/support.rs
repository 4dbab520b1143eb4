// ==========================================
// 工厂管理后台 - API 公共辅助
// ==========================================

use crate::domain::action_log::ActionLog;
use crate::domain::Entity;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::api::error::ApiResult;
use tracing::warn;

/// 生成下一个顺序ID (前缀 + 至少 3 位序号),如 OUT003 之后为 OUT004
///
/// 只识别 "前缀 + 纯数字" 形式的已有ID
pub fn next_sequential_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    // 序号到顶时不再递增,由仓储的唯一约束拒绝重复ID
    format!("{}{:03}", prefix, max.saturating_add(1))
}

/// 取某仓储的下一个ID
pub fn next_id_for<T: Entity>(repo: &dyn Repository<T>, prefix: &str) -> ApiResult<String> {
    let records = repo.list()?;
    Ok(next_sequential_id(prefix, records.iter().map(|r| r.id())))
}

/// 记录操作日志
///
/// 写入失败只记录警告，不影响主要操作
pub fn record_action(action_log_repo: &ActionLogRepository, log: ActionLog) {
    if let Err(e) = action_log_repo.insert(log) {
        warn!(error = %e, "记录操作日志失败");
    }
}
