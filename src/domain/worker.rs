// ==========================================
// 工厂管理后台 - 工人与工作记录
// ==========================================
// 用途: 薪资页、报表页的聚合输入
// 红线: 返工记录不计薪 (is_rework ⇒ payable_amount == 0)
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::types::{ProductionStage, WorkStatus, WorkerStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Worker - 工人
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,              // 工人ID (W001)
    pub name: String,            // 姓名
    pub skill: ProductionStage,  // 技能工序 (单值)
    pub status: WorkerStatus,    // 当前状态
    pub hourly_rate: f64,        // 时薪
    pub employee_id: String,     // 工号 (EMP001)
    pub join_date: NaiveDate,    // 入职日期
    pub phone: String,
    pub address: String,
}

impl Entity for Worker {
    const ENTITY: &'static str = "worker";

    fn id(&self) -> &str {
        &self.id
    }
}

// ==========================================
// WorkHistoryEntry - 工作记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub id: String,
    pub worker_id: String,          // 关联 Worker.id
    pub worker_name: String,        // 冗余展示字段
    pub task_id: String,
    pub article_variant_id: String, // 关联 ArticleVariant.id
    pub article_name: String,       // 冗余展示字段
    pub stage: ProductionStage,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_worked: f64,
    pub quantity: u32,
    pub status: WorkStatus,
    pub is_rework: bool,
    pub quality_score: f64,         // 0-100
    pub payable_amount: f64,        // 返工记录为 0
}

impl WorkHistoryEntry {
    /// 返工不计薪约束是否成立
    pub fn payable_invariant_holds(&self) -> bool {
        !self.is_rework || self.payable_amount == 0.0
    }

    /// 开工日期是否落在 [from, to] 内 (两端可选)
    pub fn started_within(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        from.map_or(true, |d| self.start_date >= d) && to.map_or(true, |d| self.start_date <= d)
    }
}

impl Entity for WorkHistoryEntry {
    const ENTITY: &'static str = "work_history";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.payable_invariant_holds() {
            Ok(())
        } else {
            Err(format!(
                "返工记录{}不能计薪 (payable_amount={})",
                self.id, self.payable_amount
            ))
        }
    }
}
