// ==========================================
// 工厂管理后台 - 质量领域模型
// ==========================================
// ProviderQcIssue: 客户公司反馈的质量问题 (需返工)
// QcItem: 厂内完工质检条目 (通过/驳回)
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::types::{Priority, ProductionStage, QcIssueStatus, QcReviewStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProviderQcIssue - 客户质量问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderQcIssue {
    pub id: String, // PQC001
    pub date: NaiveDate,
    pub provider: String,
    pub article_variant_id: String,
    pub article_name: String,
    pub delivery_id: String, // 关联 OutwardDelivery.id
    pub issue_qty: u32,
    pub defects: Vec<String>,
    pub description: String,
    pub status: QcIssueStatus,
    pub priority: Priority,
    pub reported_by: String,
}

impl Entity for ProviderQcIssue {
    const ENTITY: &'static str = "provider_qc_issue";

    fn id(&self) -> &str {
        &self.id
    }
}

// ==========================================
// QcItem - 厂内质检条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcItem {
    pub id: String, // QC001
    pub task_id: String,
    pub article: String,
    pub worker: String,
    pub stage: ProductionStage,
    pub quantity: u32,
    pub completed_date: NaiveDate,
    pub status: QcReviewStatus,
    pub defects: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl QcItem {
    /// 是否待审
    pub fn is_pending(&self) -> bool {
        self.status == QcReviewStatus::PendingReview
    }

    /// 搜索匹配 (款式、工人、任务号)
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.article.to_lowercase().contains(&term)
            || self.worker.to_lowercase().contains(&term)
            || self.task_id.to_lowercase().contains(&term)
    }
}

impl Entity for QcItem {
    const ENTITY: &'static str = "qc_item";

    fn id(&self) -> &str {
        &self.id
    }
}
