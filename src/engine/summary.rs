// ==========================================
// 工厂管理后台 - 页面汇总卡片
// ==========================================
// 薪资 / 报表 / 出库 / 客户质量 / 厂内质检 各页顶部的统计
// 全部为纯函数,空输入得到全 0
// ==========================================

use crate::domain::{
    DeliveryStatus, OutwardDelivery, Priority, ProviderQcIssue, QcIssueStatus, QcItem,
    QcReviewStatus, WorkHistoryEntry, WorkStatus,
};
use crate::engine::number_format::fixed;
use serde::Serialize;

// ==========================================
// PayrollSummary - 薪资页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PayrollSummary {
    pub total_payroll: f64,
    pub total_hours: f64,
    pub rework_count: usize,
}

impl PayrollSummary {
    pub fn from_history(history: &[WorkHistoryEntry]) -> Self {
        Self {
            total_payroll: history.iter().map(|w| w.payable_amount).sum(),
            total_hours: history.iter().map(|w| w.hours_worked).sum(),
            rework_count: history.iter().filter(|w| w.is_rework).count(),
        }
    }
}

// ==========================================
// ReportSummary - 报表页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReportSummary {
    pub total_produced: u64,
    pub total_defects: usize,
    pub total_payroll: f64,
    pub avg_quality: f64,
}

impl ReportSummary {
    pub fn from_history(history: &[WorkHistoryEntry]) -> Self {
        let avg_quality = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|w| w.quality_score).sum::<f64>() / history.len() as f64
        };

        Self {
            total_produced: history
                .iter()
                .filter(|w| w.status == WorkStatus::Completed)
                .map(|w| u64::from(w.quantity))
                .sum(),
            total_defects: history.iter().filter(|w| w.is_rework).count(),
            total_payroll: history.iter().map(|w| w.payable_amount).sum(),
            avg_quality,
        }
    }

    /// 平均质量分 (一位小数)
    pub fn avg_quality_display(&self) -> String {
        fixed(self.avg_quality, 1)
    }
}

// ==========================================
// DeliverySummary - 出库页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeliverySummary {
    pub total: usize,
    pub complete: usize,
    pub non_complete: usize,
    pub total_spoilt: u64,
}

impl DeliverySummary {
    pub fn from_deliveries(deliveries: &[OutwardDelivery]) -> Self {
        let complete = deliveries
            .iter()
            .filter(|d| d.status == DeliveryStatus::Complete)
            .count();
        Self {
            total: deliveries.len(),
            complete,
            non_complete: deliveries.len() - complete,
            total_spoilt: deliveries.iter().map(|d| u64::from(d.spoilt_qty)).sum(),
        }
    }
}

// ==========================================
// ProviderQcSummary - 客户质量问题页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProviderQcSummary {
    pub total: usize,
    pub pending_rework: usize,
    pub rework_complete: usize,
    pub high_priority: usize,
}

impl ProviderQcSummary {
    pub fn from_issues(issues: &[ProviderQcIssue]) -> Self {
        Self {
            total: issues.len(),
            pending_rework: issues.iter().filter(|i| i.status == QcIssueStatus::PendingRework).count(),
            rework_complete: issues.iter().filter(|i| i.status == QcIssueStatus::ReworkComplete).count(),
            high_priority: issues.iter().filter(|i| i.priority == Priority::High).count(),
        }
    }
}

// ==========================================
// QcReviewSummary - 厂内质检页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QcReviewSummary {
    pub total: usize,
    pub pending_review: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl QcReviewSummary {
    pub fn from_items(items: &[QcItem]) -> Self {
        let count = |status: QcReviewStatus| items.iter().filter(|i| i.status == status).count();
        Self {
            total: items.len(),
            pending_review: count(QcReviewStatus::PendingReview),
            approved: count(QcReviewStatus::Approved),
            rejected: count(QcReviewStatus::Rejected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_payroll_summary_on_sample() {
        let seed = SeedData::sample();
        let summary = PayrollSummary::from_history(&seed.work_history);
        assert_eq!(summary.total_payroll, 600.0);
        assert_eq!(summary.total_hours, 48.0);
        assert_eq!(summary.rework_count, 1);
    }

    #[test]
    fn test_report_summary_on_sample() {
        let seed = SeedData::sample();
        let summary = ReportSummary::from_history(&seed.work_history);
        assert_eq!(summary.total_produced, 80);
        assert_eq!(summary.total_defects, 1);
        assert_eq!(summary.total_payroll, 600.0);
        // (95 + 92 + 70) / 3
        assert_eq!(summary.avg_quality_display(), "85.7");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(ReportSummary::from_history(&[]), ReportSummary::default());
        assert_eq!(DeliverySummary::from_deliveries(&[]), DeliverySummary::default());
    }

    #[test]
    fn test_large_quantities_do_not_overflow() {
        let seed = SeedData::sample();

        let mut delivery = seed.outward_deliveries[0].clone();
        delivery.spoilt_qty = u32::MAX;
        let summary = DeliverySummary::from_deliveries(&[delivery.clone(), delivery]);
        assert_eq!(summary.total_spoilt, 2 * u64::from(u32::MAX));

        let mut entry = seed.work_history[0].clone();
        entry.quantity = u32::MAX;
        let report = ReportSummary::from_history(&[entry.clone(), entry]);
        assert_eq!(report.total_produced, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_delivery_and_qc_summaries() {
        let seed = SeedData::sample();

        let delivery = DeliverySummary::from_deliveries(&seed.outward_deliveries);
        assert_eq!(delivery.total, 3);
        assert_eq!(delivery.complete, 1);
        assert_eq!(delivery.non_complete, 2);
        assert_eq!(delivery.total_spoilt, 2);

        let provider = ProviderQcSummary::from_issues(&seed.provider_qc_issues);
        assert_eq!(provider.total, 3);
        assert_eq!(provider.pending_rework, 1);
        assert_eq!(provider.rework_complete, 1);
        assert_eq!(provider.high_priority, 1);

        let review = QcReviewSummary::from_items(&seed.qc_items);
        assert_eq!(review.total, 3);
        assert_eq!((review.pending_review, review.approved, review.rejected), (1, 1, 1));
    }
}
