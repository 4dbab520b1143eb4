// ==========================================
// 工厂管理后台 - 质量 API
// ==========================================
// 客户质量问题: 登记、状态流转
// 厂内质检: 待审条目通过/驳回
// 红线: 只有 Pending Review 的条目可以下结论
// ==========================================

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::support::{next_id_for, record_action};
use crate::domain::{
    ActionLog, ActionType, ArticleVariant, Entity, ProviderQcIssue, QcIssueStatus, QcItem,
    QcReviewStatus,
};
use crate::engine::{ProviderQcSummary, QcReviewSummary, StatusTag};
use crate::forms::{FormContext, ProviderQcForm, QcDecision};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::seed::SeedData;

const ID_PREFIX: &str = "PQC";

/// 客户问题列表行
#[derive(Debug, Clone, Serialize)]
pub struct ProviderQcRow {
    #[serde(flatten)]
    pub issue: ProviderQcIssue,
    pub status_tag: StatusTag,
    pub priority_tag: StatusTag,
}

pub struct QualityApi {
    issues: Arc<dyn Repository<ProviderQcIssue>>,
    qc_items: Arc<dyn Repository<QcItem>>,
    variants: Arc<dyn Repository<ArticleVariant>>,
    catalog: Arc<SeedData>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl QualityApi {
    pub fn new(
        issues: Arc<dyn Repository<ProviderQcIssue>>,
        qc_items: Arc<dyn Repository<QcItem>>,
        variants: Arc<dyn Repository<ArticleVariant>>,
        catalog: Arc<SeedData>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            issues,
            qc_items,
            variants,
            catalog,
            action_log_repo,
        }
    }

    /// 缺陷类型目录
    pub fn defect_types(&self) -> Vec<String> {
        self.catalog.defect_types.clone()
    }

    // ==========================================
    // 客户质量问题
    // ==========================================

    pub fn list_provider_issues(&self) -> ApiResult<Vec<ProviderQcRow>> {
        Ok(self
            .issues
            .list()?
            .into_iter()
            .map(|issue| ProviderQcRow {
                status_tag: StatusTag::from(issue.status),
                priority_tag: StatusTag::from(issue.priority),
                issue,
            })
            .collect())
    }

    pub fn provider_summary(&self) -> ApiResult<ProviderQcSummary> {
        Ok(ProviderQcSummary::from_issues(&self.issues.list()?))
    }

    /// 登记客户问题 (新问题为 Pending Rework)
    pub fn submit_provider_issue(&self, form: &mut ProviderQcForm, actor: &str) -> ApiResult<ProviderQcIssue> {
        let id = next_id_for(self.issues.as_ref(), ID_PREFIX)?;
        let variants = self.variants.list()?;
        let ctx = FormContext::new(&self.catalog, &variants, Local::now().date_naive());

        let issue = form.submit(&ctx, &id)?;
        self.issues.create(issue.clone())?;

        info!(id = %issue.id, provider = %issue.provider, priority = issue.priority.as_str(), "客户质量问题已登记");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Create, ProviderQcIssue::ENTITY, actor)
                .with_entity_id(&issue.id)
                .with_payload(&issue),
        );
        Ok(issue)
    }

    /// 问题状态流转
    pub fn update_issue_status(&self, id: &str, status: QcIssueStatus, actor: &str) -> ApiResult<ProviderQcIssue> {
        let mut issue = self
            .issues
            .find(id)?
            .ok_or_else(|| ApiError::NotFound(format!("客户质量问题(id={})不存在", id)))?;
        let before = issue.status;
        issue.status = status;
        self.issues.update(issue.clone())?;

        info!(id = id, from = before.as_str(), to = status.as_str(), "客户质量问题状态变更");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::StatusChange, ProviderQcIssue::ENTITY, actor)
                .with_entity_id(id)
                .with_detail(format!("{} -> {}", before, status)),
        );
        Ok(issue)
    }

    // ==========================================
    // 厂内质检
    // ==========================================

    /// 质检条目 (按款式/工人/任务号搜索)
    pub fn list_items(&self, search: &str) -> ApiResult<Vec<QcItem>> {
        let items: Vec<QcItem> = self
            .qc_items
            .list()?
            .into_iter()
            .filter(|i| i.matches_search(search))
            .collect();
        debug!(search = search, count = items.len(), "查询质检条目");
        Ok(items)
    }

    pub fn review_summary(&self) -> ApiResult<QcReviewSummary> {
        Ok(QcReviewSummary::from_items(&self.qc_items.list()?))
    }

    /// 下质检结论
    ///
    /// # 错误
    /// - 条目不存在: NotFound
    /// - 条目已审: BusinessRuleViolation
    pub fn decide(&self, decision: QcDecision, actor: &str) -> ApiResult<QcItem> {
        let item_id = decision.item_id().to_string();
        let mut item = self
            .qc_items
            .find(&item_id)?
            .ok_or_else(|| ApiError::NotFound(format!("质检条目(id={})不存在", item_id)))?;
        if !item.is_pending() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "质检条目{}已是{},不能重复审核",
                item_id, item.status
            )));
        }

        let action = match decision {
            QcDecision::Approve { .. } => {
                item.status = QcReviewStatus::Approved;
                ActionType::Approve
            }
            QcDecision::Reject { defects, notes, .. } => {
                item.status = QcReviewStatus::Rejected;
                item.defects = defects;
                item.notes = notes;
                ActionType::Reject
            }
        };
        self.qc_items.update(item.clone())?;

        info!(id = %item_id, result = item.status.as_str(), actor = actor, "质检结论已记录");
        record_action(
            &self.action_log_repo,
            ActionLog::new(action, QcItem::ENTITY, actor)
                .with_entity_id(&item_id)
                .with_payload(&item.defects),
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::forms::QualityCheckForm;
    use crate::repository::FactoryRepositories;

    fn api() -> (QualityApi, Arc<ActionLogRepository>) {
        let seed = SeedData::sample();
        let repos = FactoryRepositories::in_memory(&seed);
        let log = repos.action_log.clone();
        (
            QualityApi::new(
                repos.provider_qc_issues,
                repos.qc_items,
                repos.article_variants,
                Arc::new(seed),
                log.clone(),
            ),
            log,
        )
    }

    #[test]
    fn test_provider_rows_and_summary() {
        let (api, _) = api();
        let rows = api.list_provider_issues().unwrap();
        assert_eq!(rows[0].status_tag, StatusTag::Yellow);
        assert_eq!(rows[1].priority_tag, StatusTag::Red);
        assert_eq!(rows[2].status_tag, StatusTag::Blue);

        let summary = api.provider_summary().unwrap();
        assert_eq!((summary.total, summary.pending_rework, summary.high_priority), (3, 1, 1));
    }

    #[test]
    fn test_submit_and_resolve_issue() {
        let (api, log) = api();
        let mut form = ProviderQcForm::new();
        form.set_provider("Sports Gear Ltd");
        form.set_variant("AV004");
        form.set_delivery("OUT003");
        form.toggle_defect("Sole detachment");
        form.set_issue_qty("2");
        form.set_priority(Priority::High);

        let issue = api.submit_provider_issue(&mut form, "qc-lead").unwrap();
        assert_eq!(issue.id, "PQC004");
        assert_eq!(issue.status, QcIssueStatus::PendingRework);

        let resolved = api
            .update_issue_status("PQC004", QcIssueStatus::ReworkComplete, "qc-lead")
            .unwrap();
        assert_eq!(resolved.status, QcIssueStatus::ReworkComplete);
        assert_eq!(log.list_by_entity(ProviderQcIssue::ENTITY, "PQC004").unwrap().len(), 2);
    }

    #[test]
    fn test_reject_pending_item() {
        let (api, log) = api();
        let mut form = QualityCheckForm::new();
        form.select("QC001");
        form.toggle_defect("Uneven cutting");
        form.set_notes("edges frayed");

        let item = api.decide(form.reject().unwrap(), "inspector").unwrap();
        assert_eq!(item.status, QcReviewStatus::Rejected);
        assert_eq!(item.defects, vec!["Uneven cutting".to_string()]);
        assert_eq!(item.notes, "edges frayed");
        assert_eq!(log.list_by_type(ActionType::Reject).unwrap().len(), 1);

        let summary = api.review_summary().unwrap();
        assert_eq!((summary.pending_review, summary.rejected), (0, 2));
    }

    #[test]
    fn test_decided_item_cannot_be_reviewed_again() {
        let (api, _) = api();
        let decision = QcDecision::Approve {
            item_id: "QC002".to_string(),
        };
        assert!(matches!(api.decide(decision, "inspector"), Err(ApiError::BusinessRuleViolation(_))));

        let missing = QcDecision::Approve {
            item_id: "QC404".to_string(),
        };
        assert!(matches!(api.decide(missing, "inspector"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_search_items() {
        let (api, _) = api();
        assert_eq!(api.list_items("oxford").unwrap().len(), 2);
        assert_eq!(api.list_items("task002").unwrap().len(), 1);
    }
}
