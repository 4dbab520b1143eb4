// ==========================================
// 工厂管理后台 - 生产任务
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::types::{ProductionStage, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionTask - 生产任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTask {
    pub id: String, // TASK001
    pub article: String,
    pub stage: ProductionStage,
    pub worker: String,
    #[serde(default)]
    pub worker_id: String, // 关联 Worker.id,旧数据可能为空
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub progress: u8, // 0-100
    pub status: TaskStatus,
    pub quantity: u32,
}

impl ProductionTask {
    /// 截至 today 未完成且已过结束日期
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.end_date < today
    }

    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }
}

impl Entity for ProductionTask {
    const ENTITY: &'static str = "production_task";

    fn id(&self) -> &str {
        &self.id
    }
}
