// ==========================================
// 会话流程集成测试
// ==========================================
// 登录 -> 选择工厂 -> 驾驶舱 -> 登出
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;

use factory_admin::app::SimulatedAuthenticator;
use factory_admin::domain::ActionType;
use factory_admin::ApiError;

#[tokio::test]
async fn test_login_select_factory_dashboard() {
    let env = ApiTestEnv::in_memory();
    let state = &env.state;
    let auth = SimulatedAuthenticator::from_millis(0);

    let mut session = state.new_session();
    assert!(state.dashboard_api.factory_dashboard(&session).unwrap().is_none());

    session.login("manager", "secret", &auth).await.unwrap();
    assert_eq!(session.current_user(), Some("manager"));
    // 未选工厂时驾驶舱为空
    assert!(state.dashboard_api.factory_dashboard(&session).unwrap().is_none());

    let target = state.catalog.factories[1].clone();
    session.select_factory(&target.id).unwrap();

    let dashboard = state.dashboard_api.factory_dashboard(&session).unwrap().unwrap();
    assert_eq!(dashboard.factory.id, target.id);
    assert_eq!(dashboard.user, "manager");
    assert_eq!(dashboard.modules.len(), 8);
    assert_eq!(dashboard.modules[3].route, "/quality-check");

    session.logout();
    assert!(!session.is_logged_in());
    assert!(session.current_factory().is_none());

    let trail: Vec<ActionType> = state
        .action_log_repo
        .list_recent(10)
        .unwrap()
        .into_iter()
        .map(|log| log.action_type)
        .collect();
    assert!(trail.contains(&ActionType::Login));
    assert!(trail.contains(&ActionType::SelectFactory));
    assert!(trail.contains(&ActionType::Logout));
}

#[tokio::test]
async fn test_relogin_clears_factory() {
    let env = ApiTestEnv::in_memory();
    let auth = SimulatedAuthenticator::from_millis(0);
    let mut session = env.state.new_session();

    session.login("manager", "secret", &auth).await.unwrap();
    session.select_factory("factory-1").unwrap();
    assert!(session.current_factory().is_some());

    session.login("auditor", "secret", &auth).await.unwrap();
    assert!(session.current_factory().is_none());
    assert_eq!(session.actor(), "auditor");
}

#[tokio::test]
async fn test_rejected_inputs() {
    let env = ApiTestEnv::in_memory();
    let auth = SimulatedAuthenticator::from_millis(0);
    let mut session = env.state.new_session();

    // 未登录不能选工厂
    assert!(matches!(
        session.select_factory("factory-1"),
        Err(ApiError::BusinessRuleViolation(_))
    ));

    assert!(matches!(
        session.login("", "secret", &auth).await,
        Err(ApiError::InvalidInput(_))
    ));
    assert!(!session.is_logged_in());

    session.login("manager", "secret", &auth).await.unwrap();
    assert!(matches!(session.select_factory("factory-99"), Err(ApiError::NotFound(_))));
    assert_eq!(env.state.action_log_repo.list_by_type(ActionType::Login).unwrap().len(), 1);
}
