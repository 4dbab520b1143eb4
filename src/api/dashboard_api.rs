// ==========================================
// 工厂管理后台 - 驾驶舱 API
// ==========================================
// 职责: 公司总览 (工厂选择页) 与单工厂驾驶舱
// 未选择工厂时驾驶舱返回 None
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::app::session::SessionContext;
use crate::config::ConfigManager;
use crate::domain::{CompanyProfile, Factory, QcIssueStatus, QcReviewStatus, TaskStatus};
use crate::engine::number_format::{currency, fixed, thousands};
use crate::i18n;
use crate::repository::FactoryRepositories;
use crate::seed::SeedData;

// 功能模块 (路由, 文案键)
const MODULES: [(&str, &str); 8] = [
    ("articles", "articles"),
    ("inward", "inward"),
    ("production", "production"),
    ("quality-check", "quality_check"),
    ("outward", "outward"),
    ("provider-qc", "provider_qc"),
    ("payroll", "payroll"),
    ("reports", "reports"),
];

// ==========================================
// 返回结构
// ==========================================

/// 工厂卡片
#[derive(Debug, Clone, Serialize)]
pub struct FactoryCard {
    pub id: String,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub current_production: u32,
    pub utilization: String, // 一位小数
    pub efficiency: f64,
    pub quality_score: f64,
    pub employee_count: u32,
    pub monthly_revenue: String,
}

/// 公司总览
#[derive(Debug, Clone, Serialize)]
pub struct CompanyOverview {
    pub company: CompanyProfile,
    pub total_revenue: String,
    pub total_profit: String,
    pub total_items_produced: String,
    pub factories: Vec<FactoryCard>,
}

/// 驾驶舱统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub active_production: usize, // 未完成任务数
    pub pending_qc: usize,        // 待审质检条目
    pub quality_issues: usize,    // 待返工/审核中的客户问题
    pub completed_qty: u64,       // 已完成任务数量合计
}

/// 功能入口
#[derive(Debug, Clone, Serialize)]
pub struct ModuleTile {
    pub route: String,
    pub title: String,
    pub description: String,
}

/// 单工厂驾驶舱
#[derive(Debug, Clone, Serialize)]
pub struct FactoryDashboard {
    pub factory: Factory,
    pub user: String,
    pub stats: DashboardStats,
    pub modules: Vec<ModuleTile>,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    repos: FactoryRepositories,
    catalog: Arc<SeedData>,
    config: Arc<ConfigManager>,
}

impl DashboardApi {
    /// # 参数
    /// - repos: 仓储集合
    /// - catalog: 静态数据 (公司/工厂)
    /// - config: 配置管理器 (货币符号)
    pub fn new(repos: FactoryRepositories, catalog: Arc<SeedData>, config: Arc<ConfigManager>) -> Self {
        Self { repos, catalog, config }
    }

    /// 公司总览
    pub fn company_overview(&self) -> ApiResult<CompanyOverview> {
        let symbol = self
            .config
            .get_currency_symbol()
            .map_err(|e| ApiError::InternalError(format!("读取货币配置失败: {}", e)))?;
        let company = self.catalog.company.clone();

        let factories = self
            .catalog
            .factories
            .iter()
            .map(|f| FactoryCard {
                id: f.id.clone(),
                name: f.name.clone(),
                location: f.location.clone(),
                capacity: f.capacity,
                current_production: f.current_production,
                utilization: fixed(f.utilization(), 1),
                efficiency: f.efficiency,
                quality_score: f.quality_score,
                employee_count: f.employee_count,
                monthly_revenue: currency(f.monthly_revenue, &symbol),
            })
            .collect();

        Ok(CompanyOverview {
            total_revenue: currency(company.total_revenue, &symbol),
            total_profit: currency(company.total_profit, &symbol),
            total_items_produced: thousands(company.total_items_produced),
            company,
            factories,
        })
    }

    /// 当前工厂驾驶舱
    ///
    /// # 返回
    /// - Ok(None): 未选择工厂
    pub fn factory_dashboard(&self, session: &SessionContext) -> ApiResult<Option<FactoryDashboard>> {
        let Some(factory) = session.current_factory() else {
            debug!("未选择工厂,驾驶舱为空");
            return Ok(None);
        };

        Ok(Some(FactoryDashboard {
            factory: factory.clone(),
            user: session.actor().to_string(),
            stats: self.stats()?,
            modules: module_tiles(),
        }))
    }

    /// 驾驶舱统计
    pub fn stats(&self) -> ApiResult<DashboardStats> {
        let tasks = self.repos.production_tasks.list()?;
        let qc_items = self.repos.qc_items.list()?;
        let issues = self.repos.provider_qc_issues.list()?;

        Ok(DashboardStats {
            active_production: tasks.iter().filter(|t| t.status != TaskStatus::Completed).count(),
            pending_qc: qc_items
                .iter()
                .filter(|i| i.status == QcReviewStatus::PendingReview)
                .count(),
            quality_issues: issues
                .iter()
                .filter(|i| matches!(i.status, QcIssueStatus::PendingRework | QcIssueStatus::UnderReview))
                .count(),
            completed_qty: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .map(|t| u64::from(t.quantity))
                .sum(),
        })
    }
}

/// 本地化功能入口
pub fn module_tiles() -> Vec<ModuleTile> {
    MODULES
        .iter()
        .map(|(route, key)| ModuleTile {
            route: format!("/{}", route),
            title: i18n::t(&format!("modules.{}.title", key)),
            description: i18n::t(&format!("modules.{}.description", key)),
        })
        .collect()
}
