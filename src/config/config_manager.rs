// ==========================================
// 工厂管理后台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (scope_id='global'),无数据库时使用进程内表
// ==========================================

use crate::db::{ensure_base_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// 配置后端
enum ConfigStore {
    Sqlite(Arc<Mutex<Connection>>),
    Memory(Mutex<BTreeMap<String, String>>),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    store: ConfigStore,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会确保 config_kv 表存在（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            ensure_base_schema(&conn_guard)?;
        }

        Ok(Self {
            store: ConfigStore::Sqlite(conn),
        })
    }

    /// 进程内配置 (无数据库运行)
    pub fn in_memory() -> Self {
        Self {
            store: ConfigStore::Memory(Mutex::new(BTreeMap::new())),
        }
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        match &self.store {
            ConfigStore::Sqlite(conn) => {
                let conn = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                let result = conn.query_row(
                    "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                );

                match result {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(Box::new(e)),
                }
            }
            ConfigStore::Memory(map) => {
                let map = map.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                Ok(map.get(key).cloned())
            }
        }
    }

    /// 写入 global scope 的配置值 (UPSERT)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match &self.store {
            ConfigStore::Sqlite(conn) => {
                let conn = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                conn.execute(
                    "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                     ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                    params![key, value],
                )?;
            }
            ConfigStore::Memory(map) => {
                let mut map = map.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                map.insert(key.to_string(), value.to_string());
            }
        }
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_global_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    // 数值型配置: 格式错误时记录告警并回落到默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + Copy + std::fmt::Display,
    {
        let Some(raw) = self.get_global_config_value(key)? else {
            return Ok(default);
        };
        Ok(raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = key,
                raw_value = %raw,
                default = %default,
                "配置格式错误，使用默认值"
            );
            default
        }))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let config_map: BTreeMap<String, String> = match &self.store {
            ConfigStore::Sqlite(conn) => {
                let conn = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                let mut stmt = conn.prepare(
                    "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?;
                let map = rows.collect::<Result<BTreeMap<_, _>, _>>()?;
                map
            }
            ConfigStore::Memory(map) => map
                .lock()
                .map_err(|e| format!("锁获取失败: {}", e))?
                .clone(),
        };

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 覆盖同名的 global 配置,不删除快照中没有的键
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        match &self.store {
            ConfigStore::Sqlite(conn) => {
                let mut conn = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                let tx = conn.transaction()?;
                let mut count = 0;
                for (key, value) in &config_map {
                    count += tx.execute(
                        "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                         ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                        params![key, value],
                    )?;
                }
                tx.commit()?;
                Ok(count)
            }
            ConfigStore::Memory(map) => {
                let mut map = map.lock().map_err(|e| format!("锁获取失败: {}", e))?;
                let count = config_map.len();
                map.extend(config_map);
                Ok(count)
            }
        }
    }

    // ===== 会话 =====

    /// 模拟登录延迟 (毫秒,默认 1000)
    pub fn get_login_delay_ms(&self) -> Result<u64, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::LOGIN_DELAY_MS, defaults::LOGIN_DELAY_MS)
    }

    // ===== 展示 =====

    /// 界面语言 (默认 zh-CN)
    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, defaults::LOCALE)
    }

    /// 货币代码 (默认 USD)
    pub fn get_currency(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::CURRENCY, defaults::CURRENCY)
    }

    /// 货币符号,未知代码原样返回
    pub fn get_currency_symbol(&self) -> Result<String, Box<dyn Error>> {
        let code = self.get_currency()?;
        let symbol = match code.to_uppercase().as_str() {
            "USD" => "$",
            "EUR" => "€",
            "INR" => "₹",
            "CNY" => "¥",
            _ => return Ok(format!("{} ", code)),
        };
        Ok(symbol.to_string())
    }

    // ===== 统计 =====

    /// 效率系数 (默认 10.0)
    pub fn get_efficiency_factor(&self) -> Result<f64, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::EFFICIENCY_FACTOR, defaults::EFFICIENCY_FACTOR)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 会话
    pub const LOGIN_DELAY_MS: &str = "login_delay_ms";

    // 展示
    pub const LOCALE: &str = "locale";
    pub const CURRENCY: &str = "currency";

    // 统计
    pub const EFFICIENCY_FACTOR: &str = "efficiency_factor";
}

// 默认值
pub mod defaults {
    pub const LOGIN_DELAY_MS: u64 = 1_000;
    pub const LOCALE: &str = "zh-CN";
    pub const CURRENCY: &str = "USD";
    pub const EFFICIENCY_FACTOR: f64 = 10.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn sqlite_manager() -> ConfigManager {
        let conn = Arc::new(Mutex::new(open_in_memory().unwrap()));
        ConfigManager::from_connection(conn).unwrap()
    }

    #[test]
    fn test_defaults_when_empty() {
        for manager in [ConfigManager::in_memory(), sqlite_manager()] {
            assert_eq!(manager.get_login_delay_ms().unwrap(), 1_000);
            assert_eq!(manager.get_locale().unwrap(), "zh-CN");
            assert_eq!(manager.get_efficiency_factor().unwrap(), 10.0);
            assert_eq!(manager.get_currency_symbol().unwrap(), "$");
        }
    }

    #[test]
    fn test_set_and_bad_value_falls_back() {
        let manager = sqlite_manager();
        manager.set_global_config_value(config_keys::LOGIN_DELAY_MS, "0").unwrap();
        assert_eq!(manager.get_login_delay_ms().unwrap(), 0);

        manager.set_global_config_value(config_keys::EFFICIENCY_FACTOR, "fast").unwrap();
        assert_eq!(manager.get_efficiency_factor().unwrap(), 10.0);
    }

    #[test]
    fn test_snapshot_restore_between_backends() {
        let source = sqlite_manager();
        source.set_global_config_value(config_keys::LOCALE, "en").unwrap();
        source.set_global_config_value(config_keys::CURRENCY, "INR").unwrap();
        let snapshot = source.get_config_snapshot().unwrap();

        let target = ConfigManager::in_memory();
        assert_eq!(target.restore_config_from_snapshot(&snapshot).unwrap(), 2);
        assert_eq!(target.get_locale().unwrap(), "en");
        assert_eq!(target.get_currency_symbol().unwrap(), "₹");

        let back = sqlite_manager();
        assert_eq!(back.restore_config_from_snapshot(&target.get_config_snapshot().unwrap()).unwrap(), 2);
        assert_eq!(back.get_currency().unwrap(), "INR");
    }
}
