// ==========================================
// 工厂管理后台 - 应用层
// ==========================================
// 职责: 装配仓储与 API,管理会话
// ==========================================

pub mod session;
pub mod state;

// 重导出
pub use session::{Authenticator, SessionContext, SimulatedAuthenticator};
pub use state::{get_default_db_path, AppState};
