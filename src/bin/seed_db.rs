// ==========================================
// 重建样例数据库
// ==========================================
// 用法: seed_db [db_path] [locale]
// 已有数据库先备份为 <db_path>.bak.<时间戳> 再删除
// ==========================================

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::Local;

use factory_admin::app::{get_default_db_path, AppState};
use factory_admin::config::config_keys;
use factory_admin::db::read_schema_version;
use factory_admin::logging;
use factory_admin::repository::RepositoryResult;

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let locale = std::env::args().nth(2);

    backup_and_reset_db(&db_path)?;

    // 空库打开时写入样例数据
    let state = AppState::new(db_path.clone())?;
    if let Some(locale) = locale {
        state
            .config
            .set_global_config_value(config_keys::LOCALE, &locale)?;
    }

    print_quick_counts(&state)?;
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn print_quick_counts(state: &AppState) -> RepositoryResult<()> {
    let repos = &state.repos;
    let counts = [
        ("workers", repos.workers.count()?),
        ("work_history", repos.work_history.count()?),
        ("article_variants", repos.article_variants.count()?),
        ("inward_entries", repos.inward_entries.count()?),
        ("outward_deliveries", repos.outward_deliveries.count()?),
        ("provider_qc_issues", repos.provider_qc_issues.count()?),
        ("production_tasks", repos.production_tasks.count()?),
        ("qc_items", repos.qc_items.count()?),
        ("action_log", repos.action_log.count()?),
    ];

    println!("seeded {}", state.db_path.as_deref().unwrap_or("<memory>"));
    if let Some(db_path) = state.db_path.as_deref() {
        let conn = factory_admin::db::open_sqlite_connection(db_path)?;
        println!("  schema_version = {:?}", read_schema_version(&conn)?);
    }
    for (table, count) in counts {
        println!("  {:<20} {}", table, count);
    }
    Ok(())
}
