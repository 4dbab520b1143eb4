// ==========================================
// 工厂管理后台 - 配置层
// ==========================================
// 职责: 系统配置管理 (登录延迟、语言、货币、效率系数)
// 存储: config_kv 表 / 进程内表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, defaults, ConfigManager};
