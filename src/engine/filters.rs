// ==========================================
// 工厂管理后台 - 列表筛选
// ==========================================
// 未设置的条件视为"全部"; 搜索不区分大小写
// ==========================================

use crate::domain::{
    ArticleVariant, ProductionStage, ProductionTask, TaskStatus, WorkHistoryEntry, Worker,
    WorkerStatus,
};
use chrono::NaiveDate;

// ==========================================
// WorkHistoryFilter - 薪资页工作记录筛选
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkHistoryFilter {
    pub worker_id: Option<String>,
    pub stage: Option<ProductionStage>,
    pub search: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl WorkHistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worker(mut self, worker_id: impl Into<String>) -> Self {
        self.worker_id = Some(worker_id.into());
        self
    }

    pub fn stage(mut self, stage: ProductionStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// 开工日期范围 (两端包含)
    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn matches(&self, entry: &WorkHistoryEntry) -> bool {
        let matches_worker = self.worker_id.as_deref().map_or(true, |id| entry.worker_id == id);
        let matches_stage = self.stage.map_or(true, |s| entry.stage == s);
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || entry.worker_name.to_lowercase().contains(&term)
            || entry.article_name.to_lowercase().contains(&term);

        matches_worker
            && matches_stage
            && matches_search
            && entry.started_within(self.date_from, self.date_to)
    }

    pub fn apply<'a>(&self, history: &'a [WorkHistoryEntry]) -> Vec<&'a WorkHistoryEntry> {
        history.iter().filter(|e| self.matches(e)).collect()
    }
}

/// 款式变体搜索 (完整名称或ID)
pub fn search_variants<'a>(variants: &'a [ArticleVariant], term: &str) -> Vec<&'a ArticleVariant> {
    variants.iter().filter(|v| v.matches_search(term)).collect()
}

// ==========================================
// TaskFilter - 生产任务筛选
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub worker: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &ProductionTask) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self
                .worker
                .as_deref()
                .map_or(true, |w| task.worker.eq_ignore_ascii_case(w))
    }

    pub fn apply<'a>(&self, tasks: &'a [ProductionTask]) -> Vec<&'a ProductionTask> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// 可分派的工人
pub fn available_workers(workers: &[Worker]) -> Vec<&Worker> {
    workers
        .iter()
        .filter(|w| w.status == WorkerStatus::Available)
        .collect()
}
