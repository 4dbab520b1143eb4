// ==========================================
// 工厂管理后台 - 报表 API
// ==========================================
// 职责: 报表页汇总、款式产量、工人绩效、报表导出
// 导出: CSV (csv) / JSON (serde_json); PDF 不支持
// ==========================================

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::support::record_action;
use crate::domain::{
    ActionLog, ActionType, ArticleVariant, ExportFormat, ProductionStage, ReportKind,
    ReportRequest, ReportTemplate, WorkHistoryEntry, Worker,
};
use crate::engine::number_format::fixed;
use crate::engine::{
    defect_rate, ArticleProduction, ArticleStatsEngine, ReportSummary, WorkHistoryFilter,
    WorkerPerformance, WorkerStatsEngine,
};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;
use crate::seed::SeedData;

const REPORT_ENTITY: &str = "report";

// ==========================================
// 导出行
// ==========================================

/// 生产汇总 (按工厂)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryProductionRow {
    pub factory_id: String,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub current_production: u32,
    pub utilization: String,
    pub efficiency: f64,
    pub quality_score: f64,
    pub monthly_revenue: f64,
}

/// 质量分析 (按款式变体)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRow {
    pub article_variant_id: String,
    pub display_name: String,
    pub produced: u64,
    pub defects: u64,
    pub defect_rate: String,
    pub avg_quality: String,
}

/// 薪资明细
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollRow {
    pub entry_id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub article_name: String,
    pub stage: ProductionStage,
    pub start_date: NaiveDate,
    pub hours_worked: f64,
    pub quantity: u32,
    pub is_rework: bool,
    pub payable_amount: f64,
}

impl From<&WorkHistoryEntry> for PayrollRow {
    fn from(e: &WorkHistoryEntry) -> Self {
        Self {
            entry_id: e.id.clone(),
            worker_id: e.worker_id.clone(),
            worker_name: e.worker_name.clone(),
            article_name: e.article_name.clone(),
            stage: e.stage,
            start_date: e.start_date,
            hours_worked: e.hours_worked,
            quantity: e.quantity,
            is_rework: e.is_rework,
            payable_amount: e.payable_amount,
        }
    }
}

// ==========================================
// ReportApi
// ==========================================
pub struct ReportApi {
    workers: Arc<dyn Repository<Worker>>,
    work_history: Arc<dyn Repository<WorkHistoryEntry>>,
    variants: Arc<dyn Repository<ArticleVariant>>,
    catalog: Arc<SeedData>,
    action_log_repo: Arc<ActionLogRepository>,
    stats_engine: WorkerStatsEngine,
    article_engine: ArticleStatsEngine,
}

impl ReportApi {
    pub fn new(
        workers: Arc<dyn Repository<Worker>>,
        work_history: Arc<dyn Repository<WorkHistoryEntry>>,
        variants: Arc<dyn Repository<ArticleVariant>>,
        catalog: Arc<SeedData>,
        action_log_repo: Arc<ActionLogRepository>,
        stats_engine: WorkerStatsEngine,
    ) -> Self {
        Self {
            workers,
            work_history,
            variants,
            catalog,
            action_log_repo,
            stats_engine,
            article_engine: ArticleStatsEngine::new(),
        }
    }

    // ==========================================
    // 报表页
    // ==========================================

    pub fn summary(&self) -> ApiResult<ReportSummary> {
        Ok(ReportSummary::from_history(&self.work_history.list()?))
    }

    pub fn production_by_article(&self) -> ApiResult<Vec<ArticleProduction>> {
        let variants = self.variants.list()?;
        let history = self.work_history.list()?;
        Ok(self.article_engine.production_by_article(&variants, &history))
    }

    pub fn worker_performance(&self) -> ApiResult<Vec<WorkerPerformance>> {
        let workers = self.workers.list()?;
        let history = self.work_history.list()?;
        Ok(self.stats_engine.worker_performance(&workers, &history))
    }

    pub fn templates(&self) -> Vec<ReportTemplate> {
        self.catalog.report_templates.clone()
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出报表
    ///
    /// # 返回
    /// - Ok(usize): 写出的数据行数
    ///
    /// # 错误
    /// - PDF: Unsupported
    /// - 指定的工厂不存在: NotFound
    pub fn export<W: Write>(&self, request: &ReportRequest, writer: W, actor: &str) -> ApiResult<usize> {
        if request.format == ExportFormat::Pdf {
            return Err(ApiError::Unsupported("PDF 导出".to_string()));
        }

        let rows = match request.kind {
            ReportKind::ProductionSummary => write_rows(&self.factory_rows(request)?, request.format, writer)?,
            ReportKind::QualityAnalysis => write_rows(&self.quality_rows(request)?, request.format, writer)?,
            ReportKind::WorkerPerformance => {
                let history = self.filtered_history(request)?;
                let workers: Vec<Worker> = self
                    .workers
                    .list()?
                    .into_iter()
                    .filter(|w| request.worker_id.as_deref().map_or(true, |id| w.id == id))
                    .collect();
                let rows = self.stats_engine.worker_performance(&workers, &history);
                write_rows(&rows, request.format, writer)?
            }
            ReportKind::ArticlePerformance => {
                let history = self.filtered_history(request)?;
                let rows = self
                    .article_engine
                    .production_by_article(&self.filtered_variants(request)?, &history);
                write_rows(&rows, request.format, writer)?
            }
            ReportKind::PayrollSummary => {
                let rows: Vec<PayrollRow> = self.filtered_history(request)?.iter().map(PayrollRow::from).collect();
                write_rows(&rows, request.format, writer)?
            }
        };

        info!(
            report = request.kind.as_str(),
            format = request.format.as_str(),
            rows = rows,
            actor = actor,
            "报表已导出"
        );
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::ExportReport, REPORT_ENTITY, actor)
                .with_entity_id(request.kind.template_id())
                .with_payload(request),
        );
        Ok(rows)
    }

    fn factory_rows(&self, request: &ReportRequest) -> ApiResult<Vec<FactoryProductionRow>> {
        if let Some(id) = request.factory_id.as_deref() {
            if self.catalog.factory(id).is_none() {
                return Err(ApiError::NotFound(format!("工厂(id={})不存在", id)));
            }
        }

        Ok(self
            .catalog
            .factories
            .iter()
            .filter(|f| request.factory_id.as_deref().map_or(true, |id| f.id == id))
            .map(|f| FactoryProductionRow {
                factory_id: f.id.clone(),
                name: f.name.clone(),
                location: f.location.clone(),
                capacity: f.capacity,
                current_production: f.current_production,
                utilization: fixed(f.utilization(), 1),
                efficiency: f.efficiency,
                quality_score: f.quality_score,
                monthly_revenue: f.monthly_revenue,
            })
            .collect())
    }

    fn quality_rows(&self, request: &ReportRequest) -> ApiResult<Vec<QualityRow>> {
        let history = self.filtered_history(request)?;
        Ok(self
            .filtered_variants(request)?
            .iter()
            .map(|variant| {
                let (produced, defects) = self.article_engine.totals_for(&variant.id, &history);
                let scores: Vec<f64> = history
                    .iter()
                    .filter(|e| e.article_variant_id == variant.id)
                    .map(|e| e.quality_score)
                    .collect();
                let avg_quality = if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<f64>() / scores.len() as f64
                };
                QualityRow {
                    article_variant_id: variant.id.clone(),
                    display_name: variant.display_name.clone(),
                    produced,
                    defects,
                    defect_rate: defect_rate(produced, defects),
                    avg_quality: fixed(avg_quality, 1),
                }
            })
            .collect())
    }

    // 按请求中的款式/工人/日期筛选工作记录
    fn filtered_history(&self, request: &ReportRequest) -> ApiResult<Vec<WorkHistoryEntry>> {
        let mut filter = WorkHistoryFilter::new().between(request.date_from, request.date_to);
        filter.worker_id = request.worker_id.clone();

        let history = self.work_history.list()?;
        let found: Vec<WorkHistoryEntry> = filter
            .apply(&history)
            .into_iter()
            .filter(|e| {
                request
                    .article_variant_id
                    .as_deref()
                    .map_or(true, |id| e.article_variant_id == id)
            })
            .cloned()
            .collect();
        debug!(report = request.kind.as_str(), count = found.len(), "报表数据筛选");
        Ok(found)
    }

    fn filtered_variants(&self, request: &ReportRequest) -> ApiResult<Vec<ArticleVariant>> {
        Ok(self
            .variants
            .list()?
            .into_iter()
            .filter(|v| request.article_variant_id.as_deref().map_or(true, |id| v.id == id))
            .collect())
    }
}

// 写出数据行,返回行数
fn write_rows<T: Serialize, W: Write>(rows: &[T], format: ExportFormat, writer: W) -> ApiResult<usize> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => serde_json::to_writer_pretty(writer, rows)?,
        ExportFormat::Pdf => return Err(ApiError::Unsupported("PDF 导出".to_string())),
    }
    Ok(rows.len())
}
