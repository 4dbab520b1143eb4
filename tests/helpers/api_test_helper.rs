// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 基于临时 SQLite 文件或进程内存储构建 AppState
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use tempfile::NamedTempFile;

use factory_admin::app::AppState;

pub use test_helpers::jan;

/// API测试环境
pub struct ApiTestEnv {
    pub state: AppState,
    pub db_path: Option<String>,

    // 临时文件（确保生命周期）
    _temp_file: Option<NamedTempFile>,
}

impl ApiTestEnv {
    /// SQLite 后端 (空库自动写入样例数据)
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let state = AppState::new(db_path.clone())?;
        Ok(Self {
            state,
            db_path: Some(db_path),
            _temp_file: Some(temp_file),
        })
    }

    /// 进程内后端
    pub fn in_memory() -> Self {
        Self {
            state: AppState::in_memory(),
            db_path: None,
            _temp_file: None,
        }
    }

    /// 在同一数据库文件上重新打开 (模拟重启)
    pub fn reopen(&self) -> Result<AppState, String> {
        let path = self.db_path.clone().ok_or("进程内环境不能重新打开")?;
        AppState::new(path)
    }
}
