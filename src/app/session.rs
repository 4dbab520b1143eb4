// ==========================================
// 工厂管理后台 - 会话上下文
// ==========================================
// 状态: 未登录 -> 已登录(未选工厂) -> 已登录(已选工厂)
// 登录成功会清除之前的工厂选择; 登出清空全部
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::support::record_action;
use crate::domain::{ActionLog, ActionType, Factory};
use crate::repository::action_log_repo::ActionLogRepository;

const SESSION_ENTITY: &str = "session";

// ==========================================
// Authenticator - 身份校验
// ==========================================
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 校验凭据; 拒绝时返回 InvalidInput
    async fn authenticate(&self, username: &str, password: &str) -> ApiResult<()>;
}

/// 模拟校验: 固定延迟后接受任何非空凭据
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, _username: &str, _password: &str) -> ApiResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

// ==========================================
// SessionContext
// ==========================================
pub struct SessionContext {
    user: Option<String>,
    factory: Option<Factory>,
    factories: Vec<Factory>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl SessionContext {
    /// # 参数
    /// - factories: 可选择的工厂列表
    /// - action_log_repo: 操作日志仓储
    pub fn new(factories: Vec<Factory>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            user: None,
            factory: None,
            factories,
            action_log_repo,
        }
    }

    /// 登录
    ///
    /// # 错误
    /// - 用户名或密码为空: InvalidInput (不调用校验器)
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        authenticator: &dyn Authenticator,
    ) -> ApiResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput("用户名和密码不能为空".to_string()));
        }

        if let Err(e) = authenticator.authenticate(username, password).await {
            warn!(username = username, error = %e, "登录被拒绝");
            return Err(e);
        }

        self.user = Some(username.to_string());
        self.factory = None;
        info!(username = username, "登录成功");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Login, SESSION_ENTITY, username),
        );
        Ok(())
    }

    /// 选择工厂
    ///
    /// # 错误
    /// - 未登录: BusinessRuleViolation
    /// - 工厂不存在: NotFound
    pub fn select_factory(&mut self, factory_id: &str) -> ApiResult<&Factory> {
        let Some(user) = self.user.clone() else {
            return Err(ApiError::BusinessRuleViolation("请先登录".to_string()));
        };

        let factory = self
            .factories
            .iter()
            .find(|f| f.id == factory_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("factory(id={})不存在", factory_id)))?;

        info!(factory_id = factory_id, user = %user, "切换工厂");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::SelectFactory, "factory", &user).with_entity_id(factory_id),
        );
        Ok(self.factory.insert(factory))
    }

    /// 登出 (清空用户与工厂选择)
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user, "登出");
            record_action(
                &self.action_log_repo,
                ActionLog::new(ActionType::Logout, SESSION_ENTITY, &user),
            );
        }
        self.factory = None;
    }

    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// 当前工厂; 未选择时为 None
    pub fn current_factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// 操作人 (未登录时为 "anonymous")
    pub fn actor(&self) -> &str {
        self.user.as_deref().unwrap_or("anonymous")
    }
}
