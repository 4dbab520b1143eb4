// ==========================================
// 工厂管理后台 - API 层
// ==========================================
// 职责: 按页面提供业务接口,供命令行及上层界面调用
// 红线: 所有写入经由 Repository 并记录 ActionLog
// ==========================================

pub mod article_api;
pub mod dashboard_api;
pub mod error;
pub mod inward_api;
pub mod outward_api;
pub mod payroll_api;
pub mod production_api;
pub mod quality_api;
pub mod report_api;
pub mod support;

// 重导出核心类型
pub use article_api::ArticleApi;
pub use dashboard_api::{CompanyOverview, DashboardApi, DashboardStats, FactoryCard, FactoryDashboard, ModuleTile};
pub use error::{ApiError, ApiResult};
pub use inward_api::InwardApi;
pub use outward_api::{DeliveryReconciliation, OutwardApi, OutwardRow, OutwardSubmission};
pub use payroll_api::{PayrollApi, WorkHistoryRow, WorkerWithStats};
pub use production_api::{ProductionApi, TaskAssignment};
pub use quality_api::{ProviderQcRow, QualityApi};
pub use report_api::{FactoryProductionRow, PayrollRow, QualityRow, ReportApi};
