// ==========================================
// 工厂管理后台 - 公司与工厂
// ==========================================

use crate::domain::types::FactoryStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// CompanyProfile - 公司概况
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub total_revenue: f64,
    pub total_items_produced: u64,
    pub total_defects: u64,
    pub quality_score: f64,
    pub total_profit: f64,
    pub monthly_growth: f64, // 百分比
}

// ==========================================
// Factory - 工厂
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: String, // factory-1
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub current_production: u32,
    pub efficiency: f64,
    pub quality_score: f64,
    pub employee_count: u32,
    pub monthly_revenue: f64,
    pub status: FactoryStatus,
}

impl Factory {
    /// 产能利用率 (%),产能为 0 时为 0
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.current_production as f64 / self.capacity as f64 * 100.0
    }
}

// ==========================================
// ReportTemplate - 报表模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: String, // RPT001
    pub name: String,
    pub description: String,
}
