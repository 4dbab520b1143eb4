// ==========================================
// 工厂管理后台 - 工人统计引擎
// ==========================================
// 职责: 按工人汇总工时、收入、完成数、返工数、平均质量分
// 输入: 工人ID + 全量工作记录
// 红线: 纯函数,未知工人返回全 0,不报错
// ==========================================

use crate::domain::{ProductionStage, WorkHistoryEntry, WorkStatus, Worker};
use crate::engine::number_format::fixed;
use serde::Serialize;

/// 默认效率系数 (完成数 / 工时 × 系数)
pub const DEFAULT_EFFICIENCY_FACTOR: f64 = 10.0;

// ==========================================
// WorkerStats - 单个工人的汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WorkerStats {
    pub total_hours: f64,
    pub total_earnings: f64,
    pub completed_tasks: usize,
    pub rework_tasks: usize,
    pub avg_quality: f64,
}

impl WorkerStats {
    /// 平均质量分 (一位小数)
    pub fn avg_quality_display(&self) -> String {
        fixed(self.avg_quality, 1)
    }
}

// ==========================================
// WorkerPerformance - 报表页工人绩效行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerPerformance {
    pub worker_id: String,
    pub name: String,
    pub skill: ProductionStage,
    pub completed: usize,
    pub rework: usize,
    pub total_hours: f64,
    pub earnings: f64,
    pub avg_quality: String,
    pub efficiency: String,
}

// ==========================================
// WorkerStatsEngine
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct WorkerStatsEngine {
    efficiency_factor: f64,
}

impl Default for WorkerStatsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_EFFICIENCY_FACTOR)
    }
}

impl WorkerStatsEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `efficiency_factor`: 效率系数 (配置项 efficiency_factor)
    pub fn new(efficiency_factor: f64) -> Self {
        Self { efficiency_factor }
    }

    /// 单个工人汇总
    ///
    /// 平均质量分在无记录时为 0 (不做除法)
    pub fn worker_stats(&self, worker_id: &str, history: &[WorkHistoryEntry]) -> WorkerStats {
        let tasks: Vec<&WorkHistoryEntry> = history.iter().filter(|e| e.worker_id == worker_id).collect();

        let total_hours = tasks.iter().map(|t| t.hours_worked).sum();
        let total_earnings = tasks.iter().map(|t| t.payable_amount).sum();
        let completed_tasks = tasks.iter().filter(|t| t.status == WorkStatus::Completed).count();
        let rework_tasks = tasks.iter().filter(|t| t.is_rework).count();
        let avg_quality = if tasks.is_empty() {
            0.0
        } else {
            tasks.iter().map(|t| t.quality_score).sum::<f64>() / tasks.len() as f64
        };

        WorkerStats {
            total_hours,
            total_earnings,
            completed_tasks,
            rework_tasks,
            avg_quality,
        }
    }

    /// 全部工人的绩效行 (保持工人列表顺序)
    pub fn worker_performance(&self, workers: &[Worker], history: &[WorkHistoryEntry]) -> Vec<WorkerPerformance> {
        workers
            .iter()
            .map(|worker| {
                let stats = self.worker_stats(&worker.id, history);
                WorkerPerformance {
                    worker_id: worker.id.clone(),
                    name: worker.name.clone(),
                    skill: worker.skill,
                    completed: stats.completed_tasks,
                    rework: stats.rework_tasks,
                    total_hours: stats.total_hours,
                    earnings: stats.total_earnings,
                    avg_quality: stats.avg_quality_display(),
                    efficiency: self.efficiency(stats.completed_tasks, stats.total_hours),
                }
            })
            .collect()
    }

    /// 效率 = 完成数 / 工时 × 系数,工时为 0 时为 "0"
    pub fn efficiency(&self, completed: usize, total_hours: f64) -> String {
        if total_hours > 0.0 {
            fixed(completed as f64 / total_hours * self.efficiency_factor, 1)
        } else {
            "0".to_string()
        }
    }
}
