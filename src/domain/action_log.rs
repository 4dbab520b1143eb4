// ==========================================
// 工厂管理后台 - 操作日志领域模型
// ==========================================
// 红线: 所有写入必须记录
// 用途: 取代页面层的 console 输出,作为可查询的审计轨迹
// ==========================================

use crate::domain::entity::Entity;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,              // 日志ID (UUID)
    pub action_type: ActionType,        // 操作类型
    pub entity: String,                 // 目标实体名 (Entity::ENTITY)
    pub entity_id: Option<String>,      // 目标记录ID
    pub action_ts: NaiveDateTime,       // 操作时间戳 (UTC)
    pub actor: String,                  // 操作人
    pub payload_json: Option<JsonValue>, // 操作参数
    pub detail: Option<String>,         // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Create,        // 新建记录
    Update,        // 修改记录
    Delete,        // 删除记录
    StatusChange,  // 状态变更
    Approve,       // 质检通过
    Reject,        // 质检驳回
    Login,         // 登录
    Logout,        // 登出
    SelectFactory, // 切换工厂
    ExportReport,  // 导出报表
}

impl ActionType {
    /// 转换为字符串 (用于展示/过滤)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "Create",
            ActionType::Update => "Update",
            ActionType::Delete => "Delete",
            ActionType::StatusChange => "StatusChange",
            ActionType::Approve => "Approve",
            ActionType::Reject => "Reject",
            ActionType::Login => "Login",
            ActionType::Logout => "Logout",
            ActionType::SelectFactory => "SelectFactory",
            ActionType::ExportReport => "ExportReport",
        }
    }
}

impl ActionLog {
    /// 创建新的操作日志
    ///
    /// # 参数
    /// - `action_type`: 操作类型
    /// - `entity`: 目标实体名
    /// - `actor`: 操作人
    pub fn new(action_type: ActionType, entity: &str, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            entity: entity.to_string(),
            entity_id: None,
            action_ts: chrono::Utc::now().naive_utc(),
            actor: actor.to_string(),
            payload_json: None,
            detail: None,
        }
    }

    /// 设置目标记录ID
    pub fn with_entity_id(mut self, id: &str) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// 设置操作负载 (转换为JSON)
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        self.payload_json = serde_json::to_value(payload).ok();
        self
    }

    /// 设置详细描述
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl Entity for ActionLog {
    const ENTITY: &'static str = "action_log";

    fn id(&self) -> &str {
        &self.action_id
    }
}
