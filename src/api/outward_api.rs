// ==========================================
// 工厂管理后台 - 出库 API
// ==========================================
// 职责: 出库交付登记、列表 (交付率 + 色标)、对账提示
// 对账只告警,不拒绝写入
// ==========================================

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::error::ApiResult;
use crate::api::support::{next_id_for, record_action};
use crate::domain::{ActionLog, ActionType, ArticleVariant, Entity, OutwardDelivery, ProviderCompany};
use crate::engine::{delivery_rate, reconcile, DeliverySummary, ReconciliationIssue, StatusTag};
use crate::forms::{FormContext, OutwardForm};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::seed::SeedData;

const ID_PREFIX: &str = "OUT";

/// 出库列表行
#[derive(Debug, Clone, Serialize)]
pub struct OutwardRow {
    #[serde(flatten)]
    pub delivery: OutwardDelivery,
    pub delivery_rate: String,
    pub tag: StatusTag,
}

/// 登记结果 (含对账提示)
#[derive(Debug, Clone, Serialize)]
pub struct OutwardSubmission {
    pub delivery: OutwardDelivery,
    pub issues: Vec<ReconciliationIssue>,
}

/// 单条交付的对账结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReconciliation {
    pub delivery_id: String,
    pub issues: Vec<ReconciliationIssue>,
}

pub struct OutwardApi {
    deliveries: Arc<dyn Repository<OutwardDelivery>>,
    variants: Arc<dyn Repository<ArticleVariant>>,
    catalog: Arc<SeedData>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl OutwardApi {
    pub fn new(
        deliveries: Arc<dyn Repository<OutwardDelivery>>,
        variants: Arc<dyn Repository<ArticleVariant>>,
        catalog: Arc<SeedData>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            deliveries,
            variants,
            catalog,
            action_log_repo,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn list(&self) -> ApiResult<Vec<OutwardRow>> {
        Ok(self
            .deliveries
            .list()?
            .into_iter()
            .map(|delivery| OutwardRow {
                delivery_rate: delivery_rate(delivery.delivered_qty, delivery.ordered_qty),
                tag: StatusTag::from(delivery.status),
                delivery,
            })
            .collect())
    }

    pub fn summary(&self) -> ApiResult<DeliverySummary> {
        Ok(DeliverySummary::from_deliveries(&self.deliveries.list()?))
    }

    /// 客户公司下拉
    pub fn providers(&self) -> Vec<ProviderCompany> {
        self.catalog.provider_companies.clone()
    }

    /// 全量对账 (只返回有问题的交付)
    pub fn reconcile_all(&self) -> ApiResult<Vec<DeliveryReconciliation>> {
        Ok(self
            .deliveries
            .list()?
            .iter()
            .filter_map(|d| {
                let issues = reconcile(d);
                (!issues.is_empty()).then(|| DeliveryReconciliation {
                    delivery_id: d.id.clone(),
                    issues,
                })
            })
            .collect())
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 登记出库
    ///
    /// 状态由数量推导; 数量不平衡时记录告警并随结果返回
    pub fn submit(&self, form: &mut OutwardForm, actor: &str) -> ApiResult<OutwardSubmission> {
        let id = next_id_for(self.deliveries.as_ref(), ID_PREFIX)?;
        let variants = self.variants.list()?;
        let ctx = FormContext::new(&self.catalog, &variants, Local::now().date_naive());

        let delivery = form.submit(&ctx, &id)?;
        let issues = reconcile(&delivery);
        for issue in &issues {
            warn!(id = %delivery.id, issue = %issue, "出库对账不一致");
        }

        self.deliveries.create(delivery.clone())?;
        info!(
            id = %delivery.id,
            provider = %delivery.provider,
            status = delivery.status.as_str(),
            "出库已登记"
        );
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Create, OutwardDelivery::ENTITY, actor)
                .with_entity_id(&delivery.id)
                .with_payload(&delivery),
        );

        Ok(OutwardSubmission { delivery, issues })
    }
}
