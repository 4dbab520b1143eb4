// ==========================================
// 工厂管理后台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含聚合逻辑
// ==========================================

pub mod action_log;
pub mod article;
pub mod entity;
pub mod factory;
pub mod logistics;
pub mod production;
pub mod quality;
pub mod report;
pub mod types;
pub mod worker;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use article::{ArticleBase, ArticleVariant, ColorOption, NamedOption, VariantAttributes};
pub use entity::Entity;
pub use factory::{CompanyProfile, Factory, ReportTemplate};
pub use logistics::{InwardEntry, MaterialLine, OutwardDelivery, ProviderCompany, PurchaseOrder};
pub use production::ProductionTask;
pub use quality::{ProviderQcIssue, QcItem};
pub use report::ReportRequest;
pub use types::{
    DeliveryStatus, ExportFormat, FactoryStatus, InwardStatus, Priority, ProductionStage,
    PurchaseOrderStatus, QcIssueStatus, QcReviewStatus, ReportKind, TaskStatus, WorkStatus,
    WorkerStatus,
};
pub use worker::{WorkHistoryEntry, Worker};
