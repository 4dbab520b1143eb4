// ==========================================
// 车间操作流程集成测试
// ==========================================
// 测试范围:
// 1. 派工 -> 进度 -> 驾驶舱统计
// 2. 厂内质检结论
// 3. 客户问题状态流转
// 4. 入库确认与出库对账
// ==========================================

mod helpers;

use helpers::api_test_helper::{jan, ApiTestEnv};
use helpers::test_data_builder::DeliveryBuilder;

use factory_admin::api::TaskAssignment;
use factory_admin::domain::ActionType;
use factory_admin::forms::{InwardForm, OutwardForm, QcDecision, QualityCheckForm};
use factory_admin::repository::Repository;
use factory_admin::{ApiError, DeliveryStatus, ProductionStage, QcIssueStatus, TaskStatus};

// ==========================================
// 派工与进度
// ==========================================

#[test]
fn test_assignment_flows_into_dashboard() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    let before = state.dashboard_api.stats().unwrap();
    assert_eq!((before.active_production, before.completed_qty), (2, 25));

    let assignment = TaskAssignment {
        article_variant_id: "AV001".to_string(),
        stage: ProductionStage::Finishing,
        worker_id: "W004".to_string(),
        start_date: jan(20),
        end_date: jan(22),
        quantity: 40,
    };
    let task = state.production_api.assign_task(&assignment, "supervisor").unwrap();
    assert_eq!(state.dashboard_api.stats().unwrap().active_production, 3);

    // 工人已忙碌
    let busy = state.payroll_api.worker("W004").unwrap();
    assert_eq!(busy.status.as_str(), "Busy");

    let half = state.production_api.update_progress(&task.id, 50, "supervisor").unwrap();
    assert_eq!(half.status, TaskStatus::InProgress);

    state.production_api.update_progress(&task.id, 100, "supervisor").unwrap();
    let after = state.dashboard_api.stats().unwrap();
    assert_eq!(after.active_production, 2);
    assert_eq!(after.completed_qty, 65);

    // 派工置忙 + 完成释放
    let logs = state.action_log_repo.list_by_type(ActionType::StatusChange).unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(state.payroll_api.worker("W004").unwrap().status.as_str(), "Available");

    let next = state.production_api.assign_task(&assignment, "supervisor").unwrap();
    assert_eq!(next.worker_id, "W004");
}

#[test]
fn test_invalid_assignment_leaves_no_trace() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    let assignment = TaskAssignment {
        article_variant_id: "AV001".to_string(),
        stage: ProductionStage::Cutting,
        worker_id: "W004".to_string(),
        start_date: jan(22),
        end_date: jan(20),
        quantity: 10,
    };
    let result = state.production_api.assign_task(&assignment, "supervisor");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(state.repos.production_tasks.count().unwrap(), 3);
    assert_eq!(state.action_log_repo.count().unwrap(), 0);
}

// ==========================================
// 质检
// ==========================================

#[test]
fn test_qc_review_clears_pending() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;
    assert_eq!(state.dashboard_api.stats().unwrap().pending_qc, 1);

    let mut form = QualityCheckForm::new();
    form.select("QC001");
    let decision = form.approve().unwrap();
    assert_eq!(decision, QcDecision::Approve { item_id: "QC001".to_string() });

    let item = state.quality_api.decide(decision, "inspector").unwrap();
    assert_eq!(item.status.as_str(), "Approved");
    assert_eq!(state.dashboard_api.stats().unwrap().pending_qc, 0);

    // 已审条目不能再下结论
    form.select("QC001");
    let again = state.quality_api.decide(form.approve().unwrap(), "inspector");
    assert!(matches!(again, Err(ApiError::BusinessRuleViolation(_))));
}

#[test]
fn test_provider_issues_resolved() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;
    assert_eq!(state.dashboard_api.stats().unwrap().quality_issues, 2);

    for row in state.quality_api.list_provider_issues().unwrap() {
        state
            .quality_api
            .update_issue_status(&row.issue.id, QcIssueStatus::ReworkComplete, "qc-lead")
            .unwrap();
    }

    assert_eq!(state.dashboard_api.stats().unwrap().quality_issues, 0);
    assert_eq!(state.quality_api.provider_summary().unwrap().rework_complete, 3);
    assert!(matches!(
        state.quality_api.update_issue_status("PQC404", QcIssueStatus::UnderReview, "qc-lead"),
        Err(ApiError::NotFound(_))
    ));
}

// ==========================================
// 入库/出库
// ==========================================

#[test]
fn test_inward_entry_completed() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    let mut form = InwardForm::new();
    form.set_date(jan(21));
    form.set_po("PO002");
    form.set_variant("AV002");
    form.set_material("Rubber Outsole", "120", "pairs");

    let entry = state.inward_api.submit(&mut form, "store").unwrap();
    assert_eq!(entry.supplier, "Sole Manufacturing Co");
    assert_eq!(entry.status.as_str(), "Pending");

    let done = state.inward_api.mark_completed(&entry.id, "store").unwrap();
    assert_eq!(done.status.as_str(), "Completed");
}

#[test]
fn test_outward_summary_with_max_quantities() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;
    let max = u32::MAX.to_string();

    for _ in 0..2 {
        let mut form = OutwardForm::new();
        form.set_provider("Global Shoe Distributors");
        form.set_variant("AV001");
        form.set_quantities(&max, "0", "0", &max);
        let submitted = state.outward_api.submit(&mut form, "dispatch").unwrap();
        assert!(submitted.issues.is_empty());
    }

    let summary = state.outward_api.summary().unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.total_spoilt, 2 + 2 * u64::from(u32::MAX));
}

#[test]
fn test_reconcile_flags_inconsistent_rows() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    // 数量平衡但状态与推导不符
    let stale = DeliveryBuilder::new("OUT050")
        .quantities(100, 90, 10, 0)
        .status(DeliveryStatus::Complete)
        .build();
    state.repos.outward_deliveries.create(stale).unwrap();

    let mut form = OutwardForm::new();
    form.set_provider("Sports Gear Ltd");
    form.set_variant("AV004");
    form.set_quantities("40", "40", "", "");
    let submitted = state.outward_api.submit(&mut form, "dispatch").unwrap();
    assert!(submitted.issues.is_empty());
    assert_eq!(submitted.delivery.status, DeliveryStatus::Complete);

    let flagged = state.outward_api.reconcile_all().unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].delivery_id, "OUT050");
}
