// ==========================================
// 工厂管理后台 - 命令行入口
// ==========================================
// 默认使用进程内存储; --db 指定 SQLite 文件
// (--db 不带参数时使用默认路径)
// ==========================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use factory_admin::api::dashboard_api::module_tiles;
use factory_admin::app::{get_default_db_path, AppState};
use factory_admin::engine::{TaskFilter, WorkHistoryFilter};
use factory_admin::api::TaskAssignment;
use factory_admin::forms::{LoginForm, OutwardForm, QualityCheckForm, ReportRequestForm};
use factory_admin::i18n::{self, t, t_with_args};
use factory_admin::{logging, ExportFormat, ProductionStage, QcIssueStatus, ReportKind, TaskStatus};

#[derive(Parser, Debug)]
#[command(name = "factory-admin", version, about = "鞋类工厂管理后台")]
struct Cli {
    /// SQLite 数据库文件 (不带值时使用默认路径)
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "")]
    db: Option<String>,

    /// 界面语言 (zh-CN / en)
    #[arg(long, global = true, env = "FACTORY_ADMIN_LOCALE")]
    locale: Option<String>,

    /// 操作人 (写入操作日志)
    #[arg(long, global = true, env = "FACTORY_ADMIN_USER", default_value = "cli")]
    user: String,

    /// JSON 格式日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 公司总览与工厂列表
    Factories,
    /// 工厂驾驶舱统计
    Dashboard {
        #[arg(long)]
        factory: Option<String>,
    },
    /// 款式列表
    Articles {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// 工作记录与薪资合计
    Payroll {
        #[arg(long)]
        worker: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// 报表页汇总
    Reports,
    /// 出库交付
    Outward,
    /// 客户质量问题
    ProviderQc,
    /// 厂内质检
    QualityCheck {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// 生产任务
    Production {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        worker: Option<String>,
    },
    /// 登记出库 (数量留空视为 0)
    AddDelivery {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        variant: String,
        #[arg(long)]
        ordered: String,
        #[arg(long)]
        delivered: String,
        #[arg(long, default_value = "")]
        shortage: String,
        #[arg(long, default_value = "")]
        spoilt: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// 派工
    AssignTask {
        #[arg(long)]
        variant: String,
        #[arg(long)]
        stage: String,
        #[arg(long)]
        worker: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        quantity: u32,
    },
    /// 更新任务进度 (100 即完成)
    TaskProgress {
        #[arg(long)]
        task: String,
        #[arg(long)]
        progress: u8,
    },
    /// 质检结论: 无缺陷为通过,有缺陷为驳回
    QcReview {
        #[arg(long)]
        item: String,
        #[arg(long = "defect")]
        defects: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// 客户质量问题状态流转
    IssueStatus {
        #[arg(long)]
        issue: String,
        /// Pending Rework / Rework Complete / Under Review / Rejected
        #[arg(long)]
        status: String,
    },
    /// 导出报表
    Export {
        /// 报表类型 (production-summary / RPT001 ...)
        #[arg(long)]
        report: String,
        #[arg(long, default_value = "csv")]
        format: String,
        /// 输出文件 (缺省写到标准输出)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        article: Option<String>,
        #[arg(long)]
        worker: Option<String>,
        #[arg(long)]
        factory: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// 登录并进入工厂驾驶舱
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        factory: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::info!("{} v{}", factory_admin::APP_NAME, factory_admin::VERSION);

    let state = match cli.db.as_deref() {
        None => AppState::in_memory(),
        Some("") => AppState::new(get_default_db_path()).map_err(|e| anyhow!(e))?,
        Some(path) => AppState::new(path.to_string()).map_err(|e| anyhow!(e))?,
    };

    let locale = match cli.locale.clone() {
        Some(locale) => locale,
        None => state
            .config
            .get_locale()
            .map_err(|e| anyhow!("读取语言配置失败: {}", e))?,
    };
    i18n::set_locale(&locale);

    run(&state, &cli).await
}

async fn run(state: &AppState, cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Factories => {
            print_section(&t("cli.company"), &state.dashboard_api.company_overview()?)
        }
        Command::Dashboard { factory } => {
            let Some(id) = factory else {
                println!("{}", t("common.none_selected"));
                return Ok(());
            };
            let factory = state
                .catalog
                .factory(id)
                .ok_or_else(|| anyhow!("工厂不存在: {}", id))?;
            println!("{}", t_with_args("cli.factory_selected", &[("name", factory.name.as_str())]));
            print_section(&t("cli.dashboard"), &state.dashboard_api.stats()?)?;
            print_section("", &module_tiles())
        }
        Command::Articles { search } => print_section(&t("cli.articles"), &state.article_api.list(search)?),
        Command::Payroll { worker, stage, search } => {
            let mut filter = WorkHistoryFilter::new().search(search.as_str());
            if let Some(worker) = worker {
                filter = filter.worker(worker.as_str());
            }
            if let Some(stage) = stage {
                let stage = ProductionStage::from_label(stage).ok_or_else(|| anyhow!("未知工序: {}", stage))?;
                filter = filter.stage(stage);
            }
            print_section(&t("cli.payroll"), &state.payroll_api.history(&filter)?)?;
            print_section(&t("cli.payroll_summary"), &state.payroll_api.summary(&filter)?)
        }
        Command::Reports => {
            print_section(&t("cli.reports"), &state.report_api.summary()?)?;
            print_section("", &state.report_api.production_by_article()?)?;
            print_section("", &state.report_api.worker_performance()?)
        }
        Command::Outward => {
            print_section(&t("cli.outward"), &state.outward_api.list()?)?;
            print_section("", &state.outward_api.summary()?)?;
            let mismatches = state.outward_api.reconcile_all()?;
            if !mismatches.is_empty() {
                print_section("", &mismatches)?;
            }
            Ok(())
        }
        Command::ProviderQc => {
            print_section(&t("cli.provider_qc"), &state.quality_api.list_provider_issues()?)?;
            print_section("", &state.quality_api.provider_summary()?)
        }
        Command::QualityCheck { search } => {
            print_section(&t("cli.quality_check"), &state.quality_api.list_items(search)?)?;
            print_section("", &state.quality_api.review_summary()?)
        }
        Command::Production { status, worker } => {
            let status = match status {
                Some(s) => Some(TaskStatus::from_label(s).ok_or_else(|| anyhow!("未知任务状态: {}", s))?),
                None => None,
            };
            let filter = TaskFilter {
                status,
                worker: worker.clone(),
            };
            print_section(&t("cli.production"), &state.production_api.list_tasks(&filter)?)
        }
        Command::AddDelivery {
            provider,
            variant,
            ordered,
            delivered,
            shortage,
            spoilt,
            notes,
        } => {
            let mut form = OutwardForm::new();
            form.set_provider(provider);
            form.set_variant(variant);
            form.set_quantities(ordered, delivered, shortage, spoilt);
            form.set_notes(notes);
            let submission = state.outward_api.submit(&mut form, &cli.user)?;
            print_saved(&submission.delivery.id);
            print_section("", &submission)
        }
        Command::AssignTask {
            variant,
            stage,
            worker,
            start,
            end,
            quantity,
        } => {
            let stage = ProductionStage::from_label(stage).ok_or_else(|| anyhow!("未知工序: {}", stage))?;
            let assignment = TaskAssignment {
                article_variant_id: variant.clone(),
                stage,
                worker_id: worker.clone(),
                start_date: *start,
                end_date: *end,
                quantity: *quantity,
            };
            let task = state.production_api.assign_task(&assignment, &cli.user)?;
            print_saved(&task.id);
            print_section("", &task)
        }
        Command::TaskProgress { task, progress } => {
            let task = state.production_api.update_progress(task, *progress, &cli.user)?;
            print_saved(&task.id);
            print_section("", &task)
        }
        Command::QcReview { item, defects, notes } => {
            let mut form = QualityCheckForm::new();
            form.select(item);
            for defect in defects {
                form.toggle_defect(defect);
            }
            form.set_notes(notes);
            let decision = if defects.is_empty() { form.approve()? } else { form.reject()? };
            let item = state.quality_api.decide(decision, &cli.user)?;
            print_saved(&item.id);
            print_section("", &item)
        }
        Command::IssueStatus { issue, status } => {
            let status = QcIssueStatus::from_label(status).ok_or_else(|| anyhow!("未知问题状态: {}", status))?;
            let issue = state.quality_api.update_issue_status(issue, status, &cli.user)?;
            print_saved(&issue.id);
            print_section("", &issue)
        }
        Command::Export {
            report,
            format,
            output,
            article,
            worker,
            factory,
            from,
            to,
        } => {
            let kind = ReportKind::from_slug(report)
                .or_else(|| ReportKind::from_template_id(report))
                .ok_or_else(|| anyhow!("未知报表类型: {}", report))?;
            let format = ExportFormat::from_label(&format.to_lowercase())
                .ok_or_else(|| anyhow!("未知导出格式: {}", format))?;

            let mut form = ReportRequestForm::new();
            form.set_kind(kind);
            form.set_article(article.as_deref().unwrap_or(""));
            form.set_worker(worker.as_deref().unwrap_or(""));
            form.set_factory(factory.as_deref().unwrap_or(""));
            form.set_range(*from, *to);
            let request = form.submit(format)?;

            let rows = match output {
                Some(path) => {
                    let file = File::create(path).with_context(|| format!("无法创建文件: {}", path.display()))?;
                    let rows = state.report_api.export(&request, BufWriter::new(file), &cli.user)?;
                    let rows_text = rows.to_string();
                    let path_text = path.display().to_string();
                    eprintln!(
                        "{}",
                        t_with_args("common.rows_exported", &[("rows", rows_text.as_str()), ("path", path_text.as_str())])
                    );
                    rows
                }
                None => state.report_api.export(&request, io::stdout().lock(), &cli.user)?,
            };
            tracing::debug!(rows = rows, "导出完成");
            Ok(())
        }
        Command::Login {
            username,
            password,
            factory,
        } => {
            let mut form = LoginForm::new();
            form.set_username(username);
            form.set_password(password);
            if !form.can_submit() {
                bail!("用户名和密码不能为空");
            }
            let credentials = form.submit()?;

            let mut session = state.new_session();
            session
                .login(&credentials.username, &credentials.password, &state.authenticator())
                .await?;
            println!("{}", t_with_args("cli.logged_in", &[("user", credentials.username.as_str())]));

            if let Some(id) = factory {
                let name = session.select_factory(id)?.name.clone();
                println!("{}", t_with_args("cli.factory_selected", &[("name", name.as_str())]));
            }

            match state.dashboard_api.factory_dashboard(&session)? {
                Some(dashboard) => print_section(&t("cli.dashboard"), &dashboard),
                None => print_section(&t("cli.factories"), &state.dashboard_api.company_overview()?),
            }
        }
    }
}

fn print_saved(id: &str) {
    println!("{}", t_with_args("common.record_saved", &[("id", id)]));
}

// 标题 + JSON 正文
fn print_section<T: Serialize>(title: &str, body: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    if !title.is_empty() {
        writeln!(out, "== {} ==", title)?;
    }
    serde_json::to_writer_pretty(&mut out, body)?;
    writeln!(out)?;
    Ok(())
}
