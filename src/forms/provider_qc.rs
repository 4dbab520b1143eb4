// ==========================================
// 工厂管理后台 - 客户质量问题表单
// ==========================================

use super::{parse_quantity, toggle, FormContext, FormPhase, FormResult};
use crate::domain::{Priority, ProviderQcIssue, QcIssueStatus};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQcForm {
    phase: FormPhase,
    pub date: Option<NaiveDate>,
    pub provider: String,
    pub article_variant_id: String,
    pub defects: Vec<String>,
    pub delivery_id: String,
    pub issue_qty: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub reported_by: String,
}

impl ProviderQcForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.touch();
        self.date = Some(date);
    }

    pub fn set_provider(&mut self, provider: &str) {
        self.touch();
        self.provider = provider.to_string();
    }

    pub fn set_variant(&mut self, variant_id: &str) {
        self.touch();
        self.article_variant_id = variant_id.to_string();
    }

    pub fn toggle_defect(&mut self, defect: &str) {
        self.touch();
        toggle(&mut self.defects, defect.to_string());
    }

    pub fn set_delivery(&mut self, delivery_id: &str) {
        self.touch();
        self.delivery_id = delivery_id.to_string();
    }

    pub fn set_issue_qty(&mut self, qty: &str) {
        self.touch();
        self.issue_qty = qty.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.touch();
        self.description = description.to_string();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.touch();
        self.priority = Some(priority);
    }

    pub fn set_reported_by(&mut self, reporter: &str) {
        self.touch();
        self.reported_by = reporter.to_string();
    }

    /// 组装问题记录 (新问题为 Pending Rework,未选优先级按 Medium)
    pub fn submit(&mut self, ctx: &FormContext<'_>, id: &str) -> FormResult<ProviderQcIssue> {
        let issue_qty = parse_quantity("issue_qty", &self.issue_qty)?;

        let issue = ProviderQcIssue {
            id: id.to_string(),
            date: self.date.unwrap_or(ctx.today),
            provider: self.provider.clone(),
            article_variant_id: self.article_variant_id.clone(),
            article_name: ctx.variant_name(&self.article_variant_id),
            delivery_id: self.delivery_id.clone(),
            issue_qty,
            defects: self.defects.clone(),
            description: self.description.clone(),
            status: QcIssueStatus::PendingRework,
            priority: self.priority.unwrap_or(Priority::Medium),
            reported_by: self.reported_by.clone(),
        };

        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        Ok(issue)
    }

    fn touch(&mut self) {
        self.phase = FormPhase::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_submit_issue() {
        let seed = SeedData::sample();
        let ctx = FormContext::new(&seed, &seed.article_variants, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

        let mut form = ProviderQcForm::new();
        form.set_provider("Global Shoe Distributors");
        form.set_variant("AV001");
        form.set_delivery("OUT001");
        form.toggle_defect("Poor stitching");
        form.toggle_defect("Loose threads");
        form.toggle_defect("Poor stitching");
        form.set_issue_qty("4");
        form.set_reported_by("John Doe");

        let issue = form.submit(&ctx, "PQC004").unwrap();
        assert_eq!(issue.defects, vec!["Loose threads".to_string()]);
        assert_eq!(issue.issue_qty, 4);
        assert_eq!(issue.priority, Priority::Medium);
        assert_eq!(issue.status, QcIssueStatus::PendingRework);
        assert!(form.defects.is_empty());
        assert_eq!(form.phase(), FormPhase::Submitted);
    }
}
