// ==========================================
// 工厂管理后台 - 入库 API
// ==========================================
// 职责: 采购到料登记与查询
// ==========================================

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::support::{next_id_for, record_action};
use crate::domain::{
    ActionLog, ActionType, ArticleVariant, Entity, InwardEntry, InwardStatus, PurchaseOrder,
};
use crate::forms::{FormContext, InwardForm};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::repository::error::RepositoryError;
use crate::seed::SeedData;

const ID_PREFIX: &str = "IN";

pub struct InwardApi {
    entries: Arc<dyn Repository<InwardEntry>>,
    variants: Arc<dyn Repository<ArticleVariant>>,
    catalog: Arc<SeedData>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl InwardApi {
    pub fn new(
        entries: Arc<dyn Repository<InwardEntry>>,
        variants: Arc<dyn Repository<ArticleVariant>>,
        catalog: Arc<SeedData>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            entries,
            variants,
            catalog,
            action_log_repo,
        }
    }

    pub fn list(&self) -> ApiResult<Vec<InwardEntry>> {
        Ok(self.entries.list()?)
    }

    /// 采购单下拉
    pub fn purchase_orders(&self) -> Vec<PurchaseOrder> {
        self.catalog.purchase_orders.clone()
    }

    /// 可登记的原材料
    pub fn raw_materials(&self) -> Vec<String> {
        self.catalog.raw_materials.clone()
    }

    /// 登记入库 (新记录为 Pending)
    pub fn submit(&self, form: &mut InwardForm, actor: &str) -> ApiResult<InwardEntry> {
        let id = next_id_for(self.entries.as_ref(), ID_PREFIX)?;
        let variants = self.variants.list()?;
        let ctx = FormContext::new(&self.catalog, &variants, Local::now().date_naive());

        let entry = form.submit(&ctx, &id)?;
        self.entries.create(entry.clone())?;

        info!(id = %entry.id, po = %entry.po_number, lines = entry.materials.len(), "入库已登记");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Create, InwardEntry::ENTITY, actor)
                .with_entity_id(&entry.id)
                .with_payload(&entry),
        );
        Ok(entry)
    }

    /// 确认到料 (Pending -> Completed)
    pub fn mark_completed(&self, id: &str, actor: &str) -> ApiResult<InwardEntry> {
        let mut entry = self
            .entries
            .find(id)?
            .ok_or_else(|| RepositoryError::not_found(InwardEntry::ENTITY, id))?;
        if entry.status == InwardStatus::Completed {
            return Ok(entry);
        }

        entry.status = InwardStatus::Completed;
        self.entries.update(entry.clone())?;
        info!(id = id, actor = actor, "入库已确认");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::StatusChange, InwardEntry::ENTITY, actor)
                .with_entity_id(id)
                .with_detail("Pending -> Completed"),
        );
        Ok(entry)
    }
}
