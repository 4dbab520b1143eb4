// ==========================================
// 工厂管理后台 - 核心库
// ==========================================
// 系统定位: 多工厂制鞋企业的管理后台
// 技术栈: Rust + SQLite (可选) + 命令行
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 静态样例数据
pub mod seed;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 统计与规则
pub mod engine;

// 表单层 - 页面表单状态
pub mod forms;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配与会话
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DeliveryStatus, ExportFormat, Priority, ProductionStage, QcIssueStatus, QcReviewStatus,
    ReportKind, TaskStatus, WorkStatus, WorkerStatus,
};

// 领域实体
pub use domain::{
    ActionLog, ActionType, ArticleVariant, Factory, OutwardDelivery, ProviderQcIssue,
    ReportRequest, WorkHistoryEntry, Worker,
};

// 引擎
pub use engine::{ArticleStatsEngine, StatusTag, WorkerStatsEngine};

// API
pub use api::{ApiError, ApiResult, DashboardApi, PayrollApi, ReportApi};

// 应用
pub use app::{AppState, SessionContext};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工厂管理后台";
