// ==========================================
// 工厂管理后台 - 领域类型定义
// ==========================================
// 职责: 生产工序、各类状态、优先级等有限枚举
// 序列化格式: 与页面展示文案一致 (如 "In Progress")
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// 为"标签枚举"生成 as_str / from_label / Display
// from_label 对未知文案返回 None,不报错
macro_rules! label_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// 全部取值 (按声明顺序)
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// 展示/存储文案
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// 从展示文案解析
            pub fn from_label(s: &str) -> Option<Self> {
                match s.trim() {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ==========================================
// 生产工序 (Production Stage)
// ==========================================
// 顺序即标准工艺顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductionStage {
    Cutting, // 裁断
    Stitching, // 针车
    Lasting, // 绷楦
    #[serde(rename = "Sole Attachment")]
    SoleAttachment, // 贴底
    Finishing, // 整理
    #[serde(rename = "Quality Check")]
    QualityCheck, // 质检
    Packaging, // 包装
}

label_enum!(ProductionStage {
    Cutting => "Cutting",
    Stitching => "Stitching",
    Lasting => "Lasting",
    SoleAttachment => "Sole Attachment",
    Finishing => "Finishing",
    QualityCheck => "Quality Check",
    Packaging => "Packaging",
});

// ==========================================
// 工人状态 (Worker Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerStatus {
    Available, // 空闲
    Busy,      // 忙碌
}

label_enum!(WorkerStatus {
    Available => "Available",
    Busy => "Busy",
});

// ==========================================
// 工作记录状态 (Work History Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    Completed, // 已完成
    Rework,    // 返工
    #[serde(rename = "In Progress")]
    InProgress, // 进行中
}

label_enum!(WorkStatus {
    Completed => "Completed",
    Rework => "Rework",
    InProgress => "In Progress",
});

// ==========================================
// 生产任务状态 (Production Task Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Pending,
    Delayed,
}

label_enum!(TaskStatus {
    Completed => "Completed",
    InProgress => "In Progress",
    Pending => "Pending",
    Delayed => "Delayed",
});

// ==========================================
// 出库交付状态 (Delivery Status)
// ==========================================
// 录入值,不由数量推导 (推导结果仅作核对提示)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Complete, // 全部交付
    Partial,  // 部分交付 (含损耗)
    Shortage, // 短缺
}

label_enum!(DeliveryStatus {
    Complete => "Complete",
    Partial => "Partial",
    Shortage => "Shortage",
});

// ==========================================
// 客户质量问题状态 (Provider QC Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcIssueStatus {
    #[serde(rename = "Pending Rework")]
    PendingRework,
    #[serde(rename = "Rework Complete")]
    ReworkComplete,
    #[serde(rename = "Under Review")]
    UnderReview,
    Rejected,
}

label_enum!(QcIssueStatus {
    PendingRework => "Pending Rework",
    ReworkComplete => "Rework Complete",
    UnderReview => "Under Review",
    Rejected => "Rejected",
});

// ==========================================
// 优先级 (Priority)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

label_enum!(Priority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

// ==========================================
// 厂内质检状态 (QC Review Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcReviewStatus {
    #[serde(rename = "Pending Review")]
    PendingReview,
    Approved,
    Rejected,
}

label_enum!(QcReviewStatus {
    PendingReview => "Pending Review",
    Approved => "Approved",
    Rejected => "Rejected",
});

// ==========================================
// 入库状态 (Inward Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InwardStatus {
    Completed,
    Pending,
}

label_enum!(InwardStatus {
    Completed => "Completed",
    Pending => "Pending",
});

// ==========================================
// 采购单状态 (Purchase Order Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOrderStatus {
    Active,
    Pending,
    Completed,
}

label_enum!(PurchaseOrderStatus {
    Active => "Active",
    Pending => "Pending",
    Completed => "Completed",
});

// ==========================================
// 工厂状态 (Factory Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactoryStatus {
    Active,
    Inactive,
}

label_enum!(FactoryStatus {
    Active => "Active",
    Inactive => "Inactive",
});

// ==========================================
// 报表类型 (Report Kind)
// ==========================================
// 与报表模板 RPT001..RPT005 一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    #[serde(rename = "Production Summary")]
    ProductionSummary,
    #[serde(rename = "Quality Analysis")]
    QualityAnalysis,
    #[serde(rename = "Worker Performance")]
    WorkerPerformance,
    #[serde(rename = "Article Performance")]
    ArticlePerformance,
    #[serde(rename = "Payroll Summary")]
    PayrollSummary,
}

label_enum!(ReportKind {
    ProductionSummary => "Production Summary",
    QualityAnalysis => "Quality Analysis",
    WorkerPerformance => "Worker Performance",
    ArticlePerformance => "Article Performance",
    PayrollSummary => "Payroll Summary",
});

impl ReportKind {
    /// 对应的模板ID
    pub fn template_id(&self) -> &'static str {
        match self {
            ReportKind::ProductionSummary => "RPT001",
            ReportKind::QualityAnalysis => "RPT002",
            ReportKind::WorkerPerformance => "RPT003",
            ReportKind::ArticlePerformance => "RPT004",
            ReportKind::PayrollSummary => "RPT005",
        }
    }

    pub fn from_template_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.template_id() == id.trim())
    }

    /// 命令行短名 (production-summary)
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_lowercase();
        Self::ALL.iter().copied().find(|k| k.slug() == slug)
    }
}

// ==========================================
// 导出格式 (Export Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf, // 不生成,请求时返回 Unsupported
}

label_enum!(ExportFormat {
    Csv => "csv",
    Json => "json",
    Pdf => "pdf",
});

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Csv
    }
}
