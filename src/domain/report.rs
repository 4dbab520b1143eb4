// ==========================================
// 工厂管理后台 - 报表请求
// ==========================================

use crate::domain::types::{ExportFormat, ReportKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 报表导出请求
///
/// 未设置的筛选条件表示"全部"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub article_variant_id: Option<String>,
    pub worker_id: Option<String>,
    pub factory_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub format: ExportFormat,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, format: ExportFormat) -> Self {
        Self {
            kind,
            article_variant_id: None,
            worker_id: None,
            factory_id: None,
            date_from: None,
            date_to: None,
            format,
        }
    }
}
