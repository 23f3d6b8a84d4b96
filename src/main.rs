// ==========================================
// 客车弹簧故障管理系统 - CLI 主入口
// ==========================================
// 用法:
//   coach-spring-ims dashboard [db_path]
//   coach-spring-ims report <coach_no> <out.pdf> [db_path]
// 说明: 报告字节由 API 返回,落盘动作在这里完成
// ==========================================

use anyhow::{bail, Context, Result};
use coach_spring_ims::api::{DashboardApi, ReportApi, ReportRequest};
use coach_spring_ims::config::AppConfig;
use coach_spring_ims::engine::MasterDataSnapshot;
use coach_spring_ims::repository::{MasterDataRepository, SpringFailureRepository};
use std::sync::Arc;

fn main() -> Result<()> {
    coach_spring_ims::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", coach_spring_ims::APP_NAME);
    tracing::info!("系统版本: {}", coach_spring_ims::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("dashboard") => {
            let config = match args.get(1) {
                Some(path) => AppConfig::with_db_path(path),
                None => AppConfig::resolve(),
            };
            run_dashboard(&config.db_path)
        }
        Some("report") => {
            let coach_no = args
                .get(1)
                .context("用法: coach-spring-ims report <coach_no> <out.pdf> [db_path]")?;
            let out_path = args
                .get(2)
                .context("用法: coach-spring-ims report <coach_no> <out.pdf> [db_path]")?;
            let config = match args.get(3) {
                Some(path) => AppConfig::with_db_path(path),
                None => AppConfig::resolve(),
            };
            run_report(coach_no, out_path, &config.db_path)
        }
        _ => {
            bail!(
                "用法: coach-spring-ims <dashboard|report> ...\n\
                 dashboard [db_path]            输出汇总统计 (JSON)\n\
                 report <coach_no> <out.pdf> [db_path]  生成检修报告"
            );
        }
    }
}

fn run_dashboard(db_path: &str) -> Result<()> {
    tracing::info!("使用数据库: {}", db_path);
    let failure_repo = Arc::new(SpringFailureRepository::new(db_path)?);
    let api = DashboardApi::new(failure_repo);
    let summary = api.summary()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_report(coach_no: &str, out_path: &str, db_path: &str) -> Result<()> {
    tracing::info!("使用数据库: {}", db_path);
    let master_repo = MasterDataRepository::new(db_path)?;
    let failure_repo = Arc::new(SpringFailureRepository::new(db_path)?);

    // 主数据加载失败降级为空快照,报告按空配置继续
    let snapshot = match MasterDataSnapshot::load(&master_repo) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "主数据加载失败,使用空快照降级运行");
            MasterDataSnapshot::empty()
        }
    };

    let api = ReportApi::new(failure_repo);
    let request = ReportRequest {
        coach_no: coach_no.to_string(),
        ..Default::default()
    };
    let generated = api.generate(&snapshot, request)?;

    std::fs::write(out_path, &generated.pdf)
        .with_context(|| format!("写出报告失败: {}", out_path))?;
    println!(
        "report_id={} defects={} bytes={} -> {}",
        generated.report_id,
        generated.defect_count,
        generated.pdf.len(),
        out_path
    );
    Ok(())
}
