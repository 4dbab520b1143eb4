// ==========================================
// 工厂管理后台 - 款式产量/不良统计引擎
// ==========================================
// 职责: 按款式变体汇总产量、不良数、不良率、产值
// 不良率分母: 产量 + 不良数 (为 0 时输出 "0")
// ==========================================

use crate::domain::{ArticleVariant, WorkHistoryEntry, WorkStatus};
use crate::engine::number_format::percent;
use serde::Serialize;

// ==========================================
// ArticleProduction - 单个变体的产量行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleProduction {
    pub article_variant_id: String,
    pub display_name: String,
    pub produced: u64,
    pub defects: u64,
    pub defect_rate: String,
    pub revenue: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleStatsEngine;

impl ArticleStatsEngine {
    pub fn new() -> Self {
        Self
    }

    /// 每个变体一行 (保持变体列表顺序)
    pub fn production_by_article(
        &self,
        variants: &[ArticleVariant],
        history: &[WorkHistoryEntry],
    ) -> Vec<ArticleProduction> {
        variants
            .iter()
            .map(|variant| {
                let (produced, defects) = self.totals_for(&variant.id, history);
                ArticleProduction {
                    article_variant_id: variant.id.clone(),
                    display_name: variant.display_name.clone(),
                    produced,
                    defects,
                    defect_rate: defect_rate(produced, defects),
                    revenue: produced as f64 * variant.price,
                }
            })
            .collect()
    }

    /// (产量, 不良数),按 u64 累加
    pub fn totals_for(&self, variant_id: &str, history: &[WorkHistoryEntry]) -> (u64, u64) {
        history
            .iter()
            .filter(|e| e.article_variant_id == variant_id)
            .fold((0u64, 0u64), |(produced, defects), e| {
                let produced = if e.status == WorkStatus::Completed {
                    produced.saturating_add(u64::from(e.quantity))
                } else {
                    produced
                };
                let defects = if e.is_rework { defects.saturating_add(1) } else { defects };
                (produced, defects)
            })
    }
}

/// 不良率 = 不良数 / (产量 + 不良数) × 100
pub fn defect_rate(produced: u64, defects: u64) -> String {
    percent(defects as f64, produced as f64 + defects as f64)
}
