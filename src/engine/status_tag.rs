// ==========================================
// 工厂管理后台 - 状态/优先级色标映射
// ==========================================
// 输入为页面文案 (字符串),全函数: 未知取值一律 Neutral
// ==========================================

use crate::domain::{
    DeliveryStatus, InwardStatus, Priority, QcIssueStatus, QcReviewStatus, TaskStatus,
    WorkStatus, WorkerStatus,
};
use crate::i18n;
use serde::Serialize;

// ==========================================
// StatusTag - 色标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Green,   // 完成/良好
    Yellow,  // 待处理/部分
    Red,     // 异常/短缺/驳回
    Blue,    // 进行中/审核中
    Neutral, // 未知
}

impl StatusTag {
    /// 样式类名
    pub fn class_name(&self) -> &'static str {
        match self {
            StatusTag::Green => "bg-green-600",
            StatusTag::Yellow => "bg-yellow-600",
            StatusTag::Red => "bg-red-600",
            StatusTag::Blue => "bg-blue-600",
            StatusTag::Neutral => "bg-gray-600",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            StatusTag::Green => "green",
            StatusTag::Yellow => "yellow",
            StatusTag::Red => "red",
            StatusTag::Blue => "blue",
            StatusTag::Neutral => "neutral",
        }
    }

    /// 本地化色标名称
    pub fn label(&self) -> String {
        i18n::t(&format!("status_tag.{}", self.key()))
    }

    // ==========================================
    // 文案查找 (全函数)
    // ==========================================

    /// 出库交付状态
    pub fn for_delivery(status: &str) -> Self {
        DeliveryStatus::from_label(status).map_or(StatusTag::Neutral, Self::from)
    }

    /// 客户质量问题状态
    pub fn for_provider_qc(status: &str) -> Self {
        QcIssueStatus::from_label(status).map_or(StatusTag::Neutral, Self::from)
    }

    /// 工作记录/生产任务/入库状态
    ///
    /// Completed、Rework、In Progress、Pending、Delayed 共用一张表
    pub fn for_work(status: &str) -> Self {
        if let Some(s) = WorkStatus::from_label(status) {
            return s.into();
        }
        TaskStatus::from_label(status).map_or(StatusTag::Neutral, Self::from)
    }

    /// 厂内质检审核状态
    pub fn for_qc_review(status: &str) -> Self {
        QcReviewStatus::from_label(status).map_or(StatusTag::Neutral, Self::from)
    }

    /// 工人状态
    pub fn for_worker(status: &str) -> Self {
        WorkerStatus::from_label(status).map_or(StatusTag::Neutral, Self::from)
    }

    /// 优先级
    pub fn for_priority(priority: &str) -> Self {
        Priority::from_label(priority).map_or(StatusTag::Neutral, Self::from)
    }
}

// ==========================================
// 类型化映射
// ==========================================

impl From<DeliveryStatus> for StatusTag {
    fn from(status: DeliveryStatus) -> Self {
        match status {
            DeliveryStatus::Complete => StatusTag::Green,
            DeliveryStatus::Partial => StatusTag::Yellow,
            DeliveryStatus::Shortage => StatusTag::Red,
        }
    }
}

impl From<QcIssueStatus> for StatusTag {
    fn from(status: QcIssueStatus) -> Self {
        match status {
            QcIssueStatus::ReworkComplete => StatusTag::Green,
            QcIssueStatus::PendingRework => StatusTag::Yellow,
            QcIssueStatus::UnderReview => StatusTag::Blue,
            QcIssueStatus::Rejected => StatusTag::Red,
        }
    }
}

impl From<WorkStatus> for StatusTag {
    fn from(status: WorkStatus) -> Self {
        match status {
            WorkStatus::Completed => StatusTag::Green,
            WorkStatus::Rework => StatusTag::Red,
            WorkStatus::InProgress => StatusTag::Blue,
        }
    }
}

impl From<TaskStatus> for StatusTag {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => StatusTag::Green,
            TaskStatus::InProgress => StatusTag::Blue,
            TaskStatus::Pending => StatusTag::Yellow,
            TaskStatus::Delayed => StatusTag::Red,
        }
    }
}

impl From<InwardStatus> for StatusTag {
    fn from(status: InwardStatus) -> Self {
        match status {
            InwardStatus::Completed => StatusTag::Green,
            InwardStatus::Pending => StatusTag::Yellow,
        }
    }
}

impl From<QcReviewStatus> for StatusTag {
    fn from(status: QcReviewStatus) -> Self {
        match status {
            QcReviewStatus::Approved => StatusTag::Green,
            QcReviewStatus::PendingReview => StatusTag::Yellow,
            QcReviewStatus::Rejected => StatusTag::Red,
        }
    }
}

impl From<WorkerStatus> for StatusTag {
    fn from(status: WorkerStatus) -> Self {
        match status {
            WorkerStatus::Available => StatusTag::Green,
            WorkerStatus::Busy => StatusTag::Red,
        }
    }
}

impl From<Priority> for StatusTag {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => StatusTag::Red,
            Priority::Medium => StatusTag::Yellow,
            Priority::Low => StatusTag::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_are_neutral() {
        assert_eq!(StatusTag::for_delivery("Lost"), StatusTag::Neutral);
        assert_eq!(StatusTag::for_provider_qc(""), StatusTag::Neutral);
        assert_eq!(StatusTag::for_work("Cancelled"), StatusTag::Neutral);
        assert_eq!(StatusTag::for_qc_review("pending review"), StatusTag::Neutral);
        assert_eq!(StatusTag::for_worker("On Leave"), StatusTag::Neutral);
        assert_eq!(StatusTag::for_priority("Urgent"), StatusTag::Neutral);
        assert_eq!(StatusTag::Neutral.class_name(), "bg-gray-600");
    }

    #[test]
    fn test_work_and_task_table() {
        assert_eq!(StatusTag::for_work("Completed"), StatusTag::Green);
        assert_eq!(StatusTag::for_work("Rework"), StatusTag::Red);
        assert_eq!(StatusTag::for_work("In Progress"), StatusTag::Blue);
        assert_eq!(StatusTag::for_work("Pending"), StatusTag::Yellow);
        assert_eq!(StatusTag::for_work("Delayed"), StatusTag::Red);
    }

    #[test]
    fn test_delivery_and_priority() {
        assert_eq!(StatusTag::for_delivery("Complete").class_name(), "bg-green-600");
        assert_eq!(StatusTag::for_delivery("Partial"), StatusTag::Yellow);
        assert_eq!(StatusTag::for_delivery("Shortage"), StatusTag::Red);
        assert_eq!(StatusTag::for_priority("High"), StatusTag::Red);
        assert_eq!(StatusTag::for_priority("Low"), StatusTag::Green);
        assert_eq!(StatusTag::for_provider_qc("Under Review"), StatusTag::Blue);
    }
}
