// ==========================================
// 薪资与报表集成测试
// ==========================================
// 测试范围:
// 1. 薪资合计与筛选 (返工不计薪)
// 2. 工人绩效 (效率系数)
// 3. 报表导出 (CSV/JSON/PDF)
// ==========================================

mod helpers;

use helpers::api_test_helper::{jan, ApiTestEnv};
use helpers::test_data_builder::WorkHistoryBuilder;

use factory_admin::domain::ActionType;
use factory_admin::engine::WorkHistoryFilter;
use factory_admin::forms::ReportRequestForm;
use factory_admin::repository::Repository;
use factory_admin::{ApiError, ExportFormat, ProductionStage, ReportKind, ReportRequest};

// ==========================================
// 薪资
// ==========================================

#[test]
fn test_rework_adds_hours_not_pay() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    let rework = WorkHistoryBuilder::new("WH010")
        .worker("W002", "Maria Garcia")
        .variant("AV003")
        .stage(ProductionStage::Stitching)
        .hours(4.0)
        .quantity(5)
        .rework()
        .build();
    state.repos.work_history.create(rework).unwrap();

    let summary = state.payroll_api.summary(&WorkHistoryFilter::new()).unwrap();
    assert_eq!(summary.total_payroll, 600.0);
    assert_eq!(summary.total_hours, 52.0);
    assert_eq!(summary.rework_count, 2);

    let maria = state.payroll_api.worker_stats("W002").unwrap();
    assert_eq!(maria.total_earnings, 360.0);
    assert_eq!(maria.rework_tasks, 1);
    assert_eq!(maria.total_hours, 24.0);
}

#[test]
fn test_paid_rework_entry_never_stored() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;

    let paid_rework = WorkHistoryBuilder::new("WH011")
        .worker("W002", "Maria Garcia")
        .rework()
        .payable(50.0)
        .build();
    let err = state.repos.work_history.create(paid_rework).unwrap_err();
    assert!(matches!(ApiError::from(err), ApiError::InvalidInput(_)));

    assert!(state.repos.work_history.find("WH011").unwrap().is_none());
    let summary = state.payroll_api.summary(&WorkHistoryFilter::new()).unwrap();
    assert_eq!(summary.total_payroll, 600.0);
    assert_eq!(summary.rework_count, 1);
}

#[test]
fn test_filters_combine() {
    let env = ApiTestEnv::in_memory();
    let filter = WorkHistoryFilter::new()
        .worker("W001")
        .stage(ProductionStage::Cutting)
        .search("black");

    let rows = env.state.payroll_api.history(&filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entry.id, "WH001");

    let summary = env.state.payroll_api.summary(&filter).unwrap();
    assert_eq!(summary.total_payroll, 240.0);
    assert_eq!(summary.rework_count, 0);
}

#[test]
fn test_worker_performance_efficiency() {
    let env = ApiTestEnv::in_memory();
    let rows = env.state.report_api.worker_performance().unwrap();

    let john = rows.iter().find(|r| r.worker_id == "W001").unwrap();
    assert_eq!((john.completed, john.rework), (1, 1));
    assert_eq!(john.efficiency, "0.4");
    assert_eq!(john.avg_quality, "82.5");

    let maria = rows.iter().find(|r| r.worker_id == "W002").unwrap();
    assert_eq!(maria.efficiency, "0.5");

    // 无工时的工人效率为 "0"
    let idle = rows.iter().find(|r| r.worker_id == "W004").unwrap();
    assert_eq!(idle.efficiency, "0");
}

// ==========================================
// 导出
// ==========================================

#[test]
fn test_payroll_csv_with_date_range() {
    let env = ApiTestEnv::in_memory();
    let mut form = ReportRequestForm::new();
    form.set_kind(ReportKind::PayrollSummary);
    form.set_range(Some(jan(14)), Some(jan(15)));
    let request = form.submit(ExportFormat::Csv).unwrap();

    let mut out = Vec::new();
    let rows = env.state.report_api.export(&request, &mut out, "accountant").unwrap();
    assert_eq!(rows, 2);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("WH001"));
    assert!(text.contains("WH002"));
    assert!(!text.contains("WH003"));

    let exports = env.state.action_log_repo.list_by_type(ActionType::ExportReport).unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].entity_id.as_deref(), Some("RPT005"));
}

#[test]
fn test_article_performance_json() {
    let env = ApiTestEnv::in_memory();
    let mut request = ReportRequest::new(ReportKind::ArticlePerformance, ExportFormat::Json);
    request.article_variant_id = Some("AV001".to_string());

    let mut out = Vec::new();
    assert_eq!(env.state.report_api.export(&request, &mut out, "analyst").unwrap(), 1);

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["article_variant_id"], "AV001");
    assert_eq!(value[0]["produced"], 50);
    assert_eq!(value[0]["defect_rate"], "0.0");
}

#[test]
fn test_pdf_and_unknown_factory_rejected() {
    let env = ApiTestEnv::in_memory();
    let pdf = ReportRequest::new(ReportKind::PayrollSummary, ExportFormat::Pdf);
    assert!(matches!(
        env.state.report_api.export(&pdf, Vec::<u8>::new(), "analyst"),
        Err(ApiError::Unsupported(_))
    ));

    let mut request = ReportRequest::new(ReportKind::ProductionSummary, ExportFormat::Csv);
    request.factory_id = Some("factory-42".to_string());
    assert!(matches!(
        env.state.report_api.export(&request, Vec::<u8>::new(), "analyst"),
        Err(ApiError::NotFound(_))
    ));
    assert_eq!(env.state.action_log_repo.count().unwrap(), 0);
}
