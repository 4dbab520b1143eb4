// ==========================================
// 工厂管理后台 - 引擎层
// ==========================================
// 职责: 统计聚合、状态色标、筛选与对账
// 红线: Engine 不访问存储,只对传入的切片做纯计算
// ==========================================

pub mod article_stats;
pub mod delivery;
pub mod filters;
pub mod number_format;
pub mod status_tag;
pub mod summary;
pub mod worker_stats;

// 重导出核心引擎
pub use article_stats::{defect_rate, ArticleProduction, ArticleStatsEngine};
pub use delivery::{delivery_rate, derive_delivery_status, reconcile, ReconciliationIssue};
pub use filters::{available_workers, search_variants, TaskFilter, WorkHistoryFilter};
pub use status_tag::StatusTag;
pub use summary::{
    DeliverySummary, PayrollSummary, ProviderQcSummary, QcReviewSummary, ReportSummary,
};
pub use worker_stats::{WorkerPerformance, WorkerStats, WorkerStatsEngine, DEFAULT_EFFICIENCY_FACTOR};
