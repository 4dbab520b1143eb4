// ==========================================
// 工厂管理后台 - 薪资 API
// ==========================================
// 职责: 工作记录筛选、工人汇总、薪资合计
// 红线: 返工记录不计薪 (由数据保证,这里只读)
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{WorkHistoryEntry, Worker};
use crate::engine::{PayrollSummary, StatusTag, WorkHistoryFilter, WorkerStats, WorkerStatsEngine};
use crate::repository::entity_repo::Repository;

/// 工作记录行
#[derive(Debug, Clone, Serialize)]
pub struct WorkHistoryRow {
    #[serde(flatten)]
    pub entry: WorkHistoryEntry,
    pub tag: StatusTag,
}

/// 工人及其汇总
#[derive(Debug, Clone, Serialize)]
pub struct WorkerWithStats {
    #[serde(flatten)]
    pub worker: Worker,
    pub stats: WorkerStats,
    pub tag: StatusTag,
}

pub struct PayrollApi {
    workers: Arc<dyn Repository<Worker>>,
    work_history: Arc<dyn Repository<WorkHistoryEntry>>,
    stats_engine: WorkerStatsEngine,
}

impl PayrollApi {
    /// # 参数
    /// - stats_engine: 工人统计引擎 (携带效率系数)
    pub fn new(
        workers: Arc<dyn Repository<Worker>>,
        work_history: Arc<dyn Repository<WorkHistoryEntry>>,
        stats_engine: WorkerStatsEngine,
    ) -> Self {
        Self {
            workers,
            work_history,
            stats_engine,
        }
    }

    /// 工人列表 (含汇总)
    pub fn workers(&self) -> ApiResult<Vec<WorkerWithStats>> {
        let history = self.work_history.list()?;
        Ok(self
            .workers
            .list()?
            .into_iter()
            .map(|worker| WorkerWithStats {
                stats: self.stats_engine.worker_stats(&worker.id, &history),
                tag: StatusTag::from(worker.status),
                worker,
            })
            .collect())
    }

    /// 单个工人汇总 (未知工人为全 0)
    pub fn worker_stats(&self, worker_id: &str) -> ApiResult<WorkerStats> {
        Ok(self.stats_engine.worker_stats(worker_id, &self.work_history.list()?))
    }

    pub fn worker(&self, worker_id: &str) -> ApiResult<Worker> {
        self.workers
            .find(worker_id)?
            .ok_or_else(|| ApiError::NotFound(format!("工人(id={})不存在", worker_id)))
    }

    /// 筛选后的工作记录
    pub fn history(&self, filter: &WorkHistoryFilter) -> ApiResult<Vec<WorkHistoryRow>> {
        let history = self.work_history.list()?;
        let rows: Vec<WorkHistoryRow> = filter
            .apply(&history)
            .into_iter()
            .map(|entry| WorkHistoryRow {
                tag: StatusTag::from(entry.status),
                entry: entry.clone(),
            })
            .collect();
        debug!(count = rows.len(), "查询工作记录");
        Ok(rows)
    }

    /// 筛选范围内的薪资合计
    pub fn summary(&self, filter: &WorkHistoryFilter) -> ApiResult<PayrollSummary> {
        let history = self.work_history.list()?;
        let filtered: Vec<WorkHistoryEntry> = filter.apply(&history).into_iter().cloned().collect();
        Ok(PayrollSummary::from_history(&filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductionStage;
    use crate::repository::FactoryRepositories;
    use crate::seed::SeedData;

    fn api() -> PayrollApi {
        let repos = FactoryRepositories::in_memory(&SeedData::sample());
        PayrollApi::new(repos.workers, repos.work_history, WorkerStatsEngine::default())
    }

    #[test]
    fn test_summary_all_and_filtered() {
        let api = api();
        let all = api.summary(&WorkHistoryFilter::new()).unwrap();
        assert_eq!((all.total_payroll, all.total_hours, all.rework_count), (600.0, 48.0, 1));

        let cutting = api.summary(&WorkHistoryFilter::new().stage(ProductionStage::Cutting)).unwrap();
        assert_eq!(cutting.total_payroll, 240.0);
        assert_eq!(cutting.rework_count, 1);
    }

    #[test]
    fn test_history_rows_tagged() {
        let rows = api().history(&WorkHistoryFilter::new().search("maria")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag, StatusTag::Green);
    }

    #[test]
    fn test_worker_stats() {
        let api = api();
        let workers = api.workers().unwrap();
        assert_eq!(workers.len(), 5);
        assert_eq!(workers[0].stats.total_earnings, 240.0);
        assert_eq!(workers[1].tag, StatusTag::Red);

        assert_eq!(api.worker_stats("W999").unwrap().completed_tasks, 0);
        assert!(matches!(api.worker("W999"), Err(ApiError::NotFound(_))));
    }
}
