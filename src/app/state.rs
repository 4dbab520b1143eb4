// ==========================================
// 工厂管理后台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 后端: SQLite 文件 (共享连接) 或进程内存储
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    ArticleApi, DashboardApi, InwardApi, OutwardApi, PayrollApi, ProductionApi, QualityApi,
    ReportApi,
};
use crate::app::session::{SessionContext, SimulatedAuthenticator};
use crate::config::{defaults, ConfigManager};
use crate::db::open_sqlite_connection;
use crate::engine::WorkerStatsEngine;
use crate::repository::{ActionLogRepository, FactoryRepositories};
use crate::seed::SeedData;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径 (进程内存储时为 None)
    pub db_path: Option<String>,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 静态目录数据
    pub catalog: Arc<SeedData>,

    /// 仓储集合
    pub repos: FactoryRepositories,

    pub dashboard_api: Arc<DashboardApi>,
    pub article_api: Arc<ArticleApi>,
    pub inward_api: Arc<InwardApi>,
    pub outward_api: Arc<OutwardApi>,
    pub production_api: Arc<ProductionApi>,
    pub quality_api: Arc<QualityApi>,
    pub payroll_api: Arc<PayrollApi>,
    pub report_api: Arc<ReportApi>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    /// 创建基于 SQLite 的 AppState
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 空库写入样例数据
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let repos = FactoryRepositories::sqlite(conn).map_err(|e| format!("无法创建仓储: {}", e))?;

        let catalog = SeedData::sample();
        let seeded = repos
            .seed_if_empty(&catalog)
            .map_err(|e| format!("写入样例数据失败: {}", e))?;
        if seeded > 0 {
            tracing::info!(records = seeded, "空库已写入样例数据");
        }

        Ok(Self::assemble(Some(db_path), config, Arc::new(catalog), repos))
    }

    /// 进程内 AppState (会话结束即丢失)
    pub fn in_memory() -> Self {
        let catalog = SeedData::sample();
        let repos = FactoryRepositories::in_memory(&catalog);
        Self::assemble(None, Arc::new(ConfigManager::in_memory()), Arc::new(catalog), repos)
    }

    fn assemble(
        db_path: Option<String>,
        config: Arc<ConfigManager>,
        catalog: Arc<SeedData>,
        repos: FactoryRepositories,
    ) -> Self {
        let efficiency_factor = config.get_efficiency_factor().unwrap_or_else(|e| {
            tracing::warn!("读取效率系数失败,使用默认值: {}", e);
            defaults::EFFICIENCY_FACTOR
        });
        let stats_engine = WorkerStatsEngine::new(efficiency_factor);
        let action_log_repo = repos.action_log.clone();

        let dashboard_api = Arc::new(DashboardApi::new(repos.clone(), catalog.clone(), config.clone()));
        let article_api = Arc::new(ArticleApi::new(
            repos.article_variants.clone(),
            catalog.clone(),
            action_log_repo.clone(),
        ));
        let inward_api = Arc::new(InwardApi::new(
            repos.inward_entries.clone(),
            repos.article_variants.clone(),
            catalog.clone(),
            action_log_repo.clone(),
        ));
        let outward_api = Arc::new(OutwardApi::new(
            repos.outward_deliveries.clone(),
            repos.article_variants.clone(),
            catalog.clone(),
            action_log_repo.clone(),
        ));
        let production_api = Arc::new(ProductionApi::new(
            repos.production_tasks.clone(),
            repos.workers.clone(),
            repos.article_variants.clone(),
            action_log_repo.clone(),
        ));
        let quality_api = Arc::new(QualityApi::new(
            repos.provider_qc_issues.clone(),
            repos.qc_items.clone(),
            repos.article_variants.clone(),
            catalog.clone(),
            action_log_repo.clone(),
        ));
        let payroll_api = Arc::new(PayrollApi::new(
            repos.workers.clone(),
            repos.work_history.clone(),
            stats_engine,
        ));
        let report_api = Arc::new(ReportApi::new(
            repos.workers.clone(),
            repos.work_history.clone(),
            repos.article_variants.clone(),
            catalog.clone(),
            action_log_repo.clone(),
            stats_engine,
        ));

        tracing::info!("AppState初始化完成");

        Self {
            db_path,
            config,
            catalog,
            repos,
            dashboard_api,
            article_api,
            inward_api,
            outward_api,
            production_api,
            quality_api,
            payroll_api,
            report_api,
            action_log_repo,
        }
    }

    /// 新会话 (未登录)
    pub fn new_session(&self) -> SessionContext {
        SessionContext::new(self.catalog.factories.clone(), self.action_log_repo.clone())
    }

    /// 按配置的延迟构造模拟校验器
    pub fn authenticator(&self) -> SimulatedAuthenticator {
        let delay = self.config.get_login_delay_ms().unwrap_or_else(|e| {
            tracing::warn!("读取登录延迟失败,使用默认值: {}", e);
            defaults::LOGIN_DELAY_MS
        });
        SimulatedAuthenticator::from_millis(delay)
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 FACTORY_ADMIN_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("FACTORY_ADMIN_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./factory_admin.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("factory-admin-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("factory-admin");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("factory_admin.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_keys;

    #[test]
    fn test_in_memory_state_wires_apis() {
        let state = AppState::in_memory();
        assert!(state.db_path.is_none());
        assert_eq!(state.article_api.list("").unwrap().len(), 5);
        assert_eq!(state.outward_api.list().unwrap().len(), 3);
        assert!(state.new_session().current_user().is_none());
    }

    #[test]
    fn test_sqlite_state_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.db").to_string_lossy().to_string();

        let state = AppState::new(path.clone()).unwrap();
        assert_eq!(state.payroll_api.workers().unwrap().len(), 5);
        state.config.set_global_config_value(config_keys::LOGIN_DELAY_MS, "0").unwrap();
        drop(state);

        let reopened = AppState::new(path).unwrap();
        assert_eq!(reopened.payroll_api.workers().unwrap().len(), 5);
        assert_eq!(reopened.config.get_login_delay_ms().unwrap(), 0);
    }
}
