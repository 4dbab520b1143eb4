// ==========================================
// 工厂管理后台 - 款式 API
// ==========================================
// 职责: 款式变体查询、新建、编辑、删除
// 红线: 所有写入记录 ActionLog
// ==========================================

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::support::{next_id_for, record_action};
use crate::domain::{ActionLog, ActionType, ArticleVariant, Entity};
use crate::engine::search_variants;
use crate::forms::{ArticleForm, ArticleSubmission, FormContext};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::seed::SeedData;

const ID_PREFIX: &str = "AV";

pub struct ArticleApi {
    variants: Arc<dyn Repository<ArticleVariant>>,
    catalog: Arc<SeedData>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ArticleApi {
    /// # 参数
    /// - variants: 款式变体仓储
    /// - catalog: 属性目录 (基础款/颜色/性别/左右脚)
    /// - action_log_repo: 操作日志仓储
    pub fn new(
        variants: Arc<dyn Repository<ArticleVariant>>,
        catalog: Arc<SeedData>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            variants,
            catalog,
            action_log_repo,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 搜索款式 (完整名称或ID,空串返回全部)
    pub fn list(&self, search: &str) -> ApiResult<Vec<ArticleVariant>> {
        let all = self.variants.list()?;
        let found: Vec<ArticleVariant> = search_variants(&all, search).into_iter().cloned().collect();
        debug!(search = search, count = found.len(), "查询款式");
        Ok(found)
    }

    pub fn get(&self, id: &str) -> ApiResult<ArticleVariant> {
        self.variants
            .find(id)?
            .ok_or_else(|| ApiError::NotFound(format!("款式(id={})不存在", id)))
    }

    /// 载入编辑
    pub fn edit(&self, id: &str, form: &mut ArticleForm) -> ApiResult<()> {
        let variant = self.get(id)?;
        form.load(&variant);
        Ok(())
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 提交表单 (新建或保存编辑)
    ///
    /// # 错误
    /// - 未选择基础款: InvalidInput (表单保留输入)
    /// - 编辑的款式已被删除: NotFound
    pub fn submit(&self, form: &mut ArticleForm, actor: &str) -> ApiResult<ArticleVariant> {
        let new_id = next_id_for(self.variants.as_ref(), ID_PREFIX)?;
        let existing = self.variants.list()?;
        let ctx = FormContext::new(&self.catalog, &existing, Local::now().date_naive());

        let submission = form.submit(&ctx, &new_id)?;
        let action = match &submission {
            ArticleSubmission::Create(v) => {
                self.variants.create(v.clone())?;
                ActionType::Create
            }
            ArticleSubmission::Update(v) => {
                self.variants.update(v.clone())?;
                ActionType::Update
            }
        };

        let variant = submission.variant().clone();
        info!(id = %variant.id, action = action.as_str(), actor = actor, "款式已保存");
        record_action(
            &self.action_log_repo,
            ActionLog::new(action, ArticleVariant::ENTITY, actor)
                .with_entity_id(&variant.id)
                .with_payload(&variant),
        );
        Ok(variant)
    }

    pub fn delete(&self, id: &str, actor: &str) -> ApiResult<ArticleVariant> {
        let removed = self.variants.delete(id)?;
        info!(id = id, actor = actor, "款式已删除");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Delete, ArticleVariant::ENTITY, actor)
                .with_entity_id(id)
                .with_detail(removed.full_name.clone()),
        );
        Ok(removed)
    }
}
