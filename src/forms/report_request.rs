// ==========================================
// 工厂管理后台 - 报表生成表单
// ==========================================
// 款式/工人/工厂选择 "all-*" 或留空均表示全部
// ==========================================

use super::{FormError, FormPhase, FormResult};
use crate::domain::{ExportFormat, ReportKind, ReportRequest};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequestForm {
    phase: FormPhase,
    pub kind: Option<ReportKind>,
    pub article_variant_id: Option<String>,
    pub worker_id: Option<String>,
    pub factory_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// 下拉框里的"全部"选项
fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with("all-") {
        None
    } else {
        Some(value.to_string())
    }
}

impl ReportRequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn set_kind(&mut self, kind: ReportKind) {
        self.phase = FormPhase::Editing;
        self.kind = Some(kind);
    }

    pub fn set_article(&mut self, value: &str) {
        self.phase = FormPhase::Editing;
        self.article_variant_id = selection(value);
    }

    pub fn set_worker(&mut self, value: &str) {
        self.phase = FormPhase::Editing;
        self.worker_id = selection(value);
    }

    pub fn set_factory(&mut self, value: &str) {
        self.phase = FormPhase::Editing;
        self.factory_id = selection(value);
    }

    pub fn set_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.phase = FormPhase::Editing;
        self.date_from = from;
        self.date_to = to;
    }

    /// 按指定格式生成请求
    pub fn submit(&mut self, format: ExportFormat) -> FormResult<ReportRequest> {
        let kind = self
            .kind
            .ok_or_else(|| FormError::MissingField("report_type".to_string()))?;

        let request = ReportRequest {
            kind,
            article_variant_id: self.article_variant_id.take(),
            worker_id: self.worker_id.take(),
            factory_id: self.factory_id.take(),
            date_from: self.date_from,
            date_to: self.date_to,
            format,
        };

        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selection_means_none() {
        let mut form = ReportRequestForm::new();
        form.set_kind(ReportKind::WorkerPerformance);
        form.set_worker("all-workers");
        form.set_factory("factory-2");

        let request = form.submit(ExportFormat::Csv).unwrap();
        assert_eq!(request.worker_id, None);
        assert_eq!(request.factory_id.as_deref(), Some("factory-2"));
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert_eq!(form.kind, None);
    }

    #[test]
    fn test_missing_report_type() {
        let mut form = ReportRequestForm::new();
        assert_eq!(
            form.submit(ExportFormat::Json),
            Err(FormError::MissingField("report_type".to_string()))
        );
    }
}
