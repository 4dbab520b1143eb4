// ==========================================
// 工厂管理后台 - 生产 API
// ==========================================
// 职责: 生产任务查询、派工、进度更新
// 派工约束: 工人必须空闲; 工序必须属于该款式的工艺路线
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::support::{next_id_for, record_action};
use crate::domain::{
    ActionLog, ActionType, ArticleVariant, Entity, ProductionStage, ProductionTask, TaskStatus,
    Worker, WorkerStatus,
};
use crate::engine::{available_workers, TaskFilter};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entity_repo::Repository;

const ID_PREFIX: &str = "TASK";

/// 派工请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub article_variant_id: String,
    pub stage: ProductionStage,
    pub worker_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub quantity: u32,
}

pub struct ProductionApi {
    tasks: Arc<dyn Repository<ProductionTask>>,
    workers: Arc<dyn Repository<Worker>>,
    variants: Arc<dyn Repository<ArticleVariant>>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ProductionApi {
    pub fn new(
        tasks: Arc<dyn Repository<ProductionTask>>,
        workers: Arc<dyn Repository<Worker>>,
        variants: Arc<dyn Repository<ArticleVariant>>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            tasks,
            workers,
            variants,
            action_log_repo,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn list_tasks(&self, filter: &TaskFilter) -> ApiResult<Vec<ProductionTask>> {
        let tasks = self.tasks.list()?;
        let found: Vec<ProductionTask> = filter.apply(&tasks).into_iter().cloned().collect();
        debug!(count = found.len(), "查询生产任务");
        Ok(found)
    }

    pub fn available_workers(&self) -> ApiResult<Vec<Worker>> {
        let workers = self.workers.list()?;
        Ok(available_workers(&workers).into_iter().cloned().collect())
    }

    /// 截至 today 逾期未完成的任务
    pub fn overdue(&self, today: NaiveDate) -> ApiResult<Vec<ProductionTask>> {
        Ok(self
            .tasks
            .list()?
            .into_iter()
            .filter(|t| t.is_overdue(today))
            .collect())
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 派工
    ///
    /// # 错误
    /// - 数量为 0 或结束早于开始: InvalidInput
    /// - 工人/款式不存在: NotFound
    /// - 工人忙碌或工序不在工艺路线内: BusinessRuleViolation
    pub fn assign_task(&self, request: &TaskAssignment, actor: &str) -> ApiResult<ProductionTask> {
        if request.quantity == 0 {
            return Err(ApiError::InvalidInput("派工数量必须大于0".to_string()));
        }
        if request.end_date < request.start_date {
            return Err(ApiError::InvalidInput("结束日期早于开始日期".to_string()));
        }

        let mut worker = self
            .workers
            .find(&request.worker_id)?
            .ok_or_else(|| ApiError::NotFound(format!("工人(id={})不存在", request.worker_id)))?;
        if worker.status != WorkerStatus::Available {
            return Err(ApiError::BusinessRuleViolation(format!(
                "工人{}当前忙碌,不能派工",
                worker.name
            )));
        }

        let variant = self
            .variants
            .find(&request.article_variant_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("款式(id={})不存在", request.article_variant_id))
            })?;
        if !variant.requires_stage(request.stage) {
            return Err(ApiError::BusinessRuleViolation(format!(
                "款式{}的工艺路线不含工序{}",
                variant.id, request.stage
            )));
        }

        let task = ProductionTask {
            id: next_id_for(self.tasks.as_ref(), ID_PREFIX)?,
            article: variant.display_name.clone(),
            stage: request.stage,
            worker: worker.name.clone(),
            worker_id: worker.id.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            progress: 0,
            status: TaskStatus::Pending,
            quantity: request.quantity,
        };
        self.tasks.create(task.clone())?;

        worker.status = WorkerStatus::Busy;
        self.workers.update(worker.clone())?;

        info!(id = %task.id, worker = %worker.id, stage = task.stage.as_str(), "已派工");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Create, ProductionTask::ENTITY, actor)
                .with_entity_id(&task.id)
                .with_payload(request),
        );
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::StatusChange, Worker::ENTITY, actor)
                .with_entity_id(&worker.id)
                .with_detail("Available -> Busy"),
        );
        Ok(task)
    }

    /// 更新进度 (100 即完成)
    ///
    /// 任务转为完成时释放工人 (该工人没有其他未完成任务时)
    pub fn update_progress(&self, task_id: &str, progress: u8, actor: &str) -> ApiResult<ProductionTask> {
        if progress > 100 {
            return Err(ApiError::InvalidInput(format!("进度超出范围: {}", progress)));
        }

        let mut task = self
            .tasks
            .find(task_id)?
            .ok_or_else(|| ApiError::NotFound(format!("生产任务(id={})不存在", task_id)))?;
        let before = task.status;
        task.progress = progress;
        task.status = match progress {
            100 => TaskStatus::Completed,
            0 if before == TaskStatus::Pending => TaskStatus::Pending,
            _ => TaskStatus::InProgress,
        };
        self.tasks.update(task.clone())?;

        info!(id = task_id, progress = progress, status = task.status.as_str(), "任务进度已更新");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::Update, ProductionTask::ENTITY, actor)
                .with_entity_id(task_id)
                .with_detail(format!("{} -> {} ({}%)", before, task.status, progress)),
        );

        if before != TaskStatus::Completed && task.status == TaskStatus::Completed {
            self.release_worker(&task, actor)?;
        }
        Ok(task)
    }

    // Busy -> Available
    fn release_worker(&self, task: &ProductionTask, actor: &str) -> ApiResult<()> {
        if task.worker_id.is_empty() {
            return Ok(());
        }
        let Some(mut worker) = self.workers.find(&task.worker_id)? else {
            warn!(task = %task.id, worker = %task.worker_id, "完成任务的工人不存在,跳过释放");
            return Ok(());
        };
        if worker.status != WorkerStatus::Busy {
            return Ok(());
        }

        let still_assigned = self
            .tasks
            .list()?
            .iter()
            .any(|t| t.id != task.id && t.worker_id == worker.id && t.is_open());
        if still_assigned {
            debug!(worker = %worker.id, "工人仍有未完成任务,保持忙碌");
            return Ok(());
        }

        worker.status = WorkerStatus::Available;
        self.workers.update(worker.clone())?;
        info!(worker = %worker.id, task = %task.id, "任务完成,工人已释放");
        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::StatusChange, Worker::ENTITY, actor)
                .with_entity_id(&worker.id)
                .with_detail("Busy -> Available"),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FactoryRepositories;
    use crate::seed::SeedData;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn api() -> ProductionApi {
        let repos = FactoryRepositories::in_memory(&SeedData::sample());
        ProductionApi::new(repos.production_tasks, repos.workers, repos.article_variants, repos.action_log)
    }

    fn request(worker_id: &str, stage: ProductionStage) -> TaskAssignment {
        TaskAssignment {
            article_variant_id: "AV001".to_string(),
            stage,
            worker_id: worker_id.to_string(),
            start_date: day(20),
            end_date: day(22),
            quantity: 40,
        }
    }

    #[test]
    fn test_filter_and_overdue() {
        let api = api();
        let in_progress = TaskFilter {
            status: Some(TaskStatus::InProgress),
            worker: None,
        };
        assert_eq!(api.list_tasks(&in_progress).unwrap().len(), 2);
        assert_eq!(api.available_workers().unwrap().len(), 3);

        let overdue = api.overdue(day(17)).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "TASK002");
    }

    #[test]
    fn test_assign_marks_worker_busy() {
        let api = api();
        let task = api.assign_task(&request("W004", ProductionStage::Finishing), "admin").unwrap();
        assert_eq!(task.id, "TASK004");
        assert_eq!(task.worker, "Sarah Johnson");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(api.available_workers().unwrap().len(), 2);

        let again = api.assign_task(&request("W004", ProductionStage::Finishing), "admin");
        assert!(matches!(again, Err(ApiError::BusinessRuleViolation(_))));
    }

    #[test]
    fn test_assign_rejects_stage_outside_route() {
        let api = api();
        // AV001 (Oxford) 不含质检工序
        let result = api.assign_task(&request("W001", ProductionStage::QualityCheck), "admin");
        assert!(matches!(result, Err(ApiError::BusinessRuleViolation(_))));
        assert!(matches!(
            api.assign_task(&request("W999", ProductionStage::Cutting), "admin"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_completed_task_releases_worker() {
        let api = api();
        let task = api.assign_task(&request("W004", ProductionStage::Finishing), "admin").unwrap();
        assert_eq!(task.worker_id, "W004");

        api.update_progress(&task.id, 60, "admin").unwrap();
        assert_eq!(api.available_workers().unwrap().len(), 2);

        api.update_progress(&task.id, 100, "admin").unwrap();
        assert_eq!(api.available_workers().unwrap().len(), 3);

        let again = api.assign_task(&request("W004", ProductionStage::Finishing), "admin").unwrap();
        assert_eq!(again.id, "TASK005");
    }

    #[test]
    fn test_release_skips_worker_with_open_task() {
        let api = api();
        // W002 (Maria) 仍有进行中的 TASK002
        let mut extra = api.tasks.find("TASK002").unwrap().unwrap();
        extra.id = "TASK010".to_string();
        api.tasks.create(extra).unwrap();

        api.update_progress("TASK010", 100, "admin").unwrap();
        assert_eq!(api.workers.find("W002").unwrap().unwrap().status, WorkerStatus::Busy);

        api.update_progress("TASK002", 100, "admin").unwrap();
        assert_eq!(api.workers.find("W002").unwrap().unwrap().status, WorkerStatus::Available);
    }

    #[test]
    fn test_update_progress() {
        let api = api();
        let task = api.update_progress("TASK001", 100, "admin").unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(matches!(api.update_progress("TASK001", 101, "admin"), Err(ApiError::InvalidInput(_))));
    }
}
