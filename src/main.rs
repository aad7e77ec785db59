// ==========================================
// 活动经营预测系统 - 命令行入口
// ==========================================
// 用法:
//   event-forecast <plan.json> [--actuals <file.csv>] [--scenario <name|id>] [--export <out.csv>] [--json-logs]
// 输出: 逐期预测表 + 区间汇总 + 盈亏平衡期 (stdout),日志 (stderr)
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use event_forecast::api::ForecastApi;
use event_forecast::config::ConfigManager;
use event_forecast::engine::ReconciliationReport;
use event_forecast::exporter::export_blended_to_file;
use event_forecast::importer::{load_plan, ActualsParser, UniversalActualsParser};
use event_forecast::logging::{self, LogFormat};
use event_forecast::{DataSource, APP_NAME, VERSION};

const USAGE: &str = "用法: event-forecast <plan.json> [--actuals <file.csv>] \
                     [--scenario <name|id>] [--export <out.csv>] [--json-logs]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    plan_path: PathBuf,
    actuals_path: Option<PathBuf>,
    scenario: Option<String>,
    export_path: Option<PathBuf>,
    log_format: LogFormat,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut plan_path = None;
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--actuals" | "--scenario" | "--export" => {
                let value = args
                    .next()
                    .filter(|v| !v.trim().is_empty())
                    .with_context(|| format!("参数 {} 缺少取值\n{}", arg, USAGE))?;
                match arg.as_str() {
                    "--actuals" => cli.actuals_path = Some(PathBuf::from(value)),
                    "--scenario" => cli.scenario = Some(value),
                    _ => cli.export_path = Some(PathBuf::from(value)),
                }
            }
            "--json-logs" => cli.log_format = LogFormat::Json,
            "-h" | "--help" => bail!("{}", USAGE),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            other => {
                if plan_path.is_some() {
                    bail!("只能指定一个方案文件\n{}", USAGE);
                }
                plan_path = Some(PathBuf::from(other));
            }
        }
    }

    cli.plan_path = plan_path.with_context(|| format!("缺少方案文件\n{}", USAGE))?;
    Ok(cli)
}

fn print_report(report: &ReconciliationReport) {
    println!(
        "{:>6} {:>8} {:>12} {:>14} {:>14} {:>14} {:>16}",
        "period", "source", "foot_traffic", "revenue", "costs", "profit", "cumulative"
    );
    for period in &report.periods {
        let record = &period.record;
        let source = match period.source {
            DataSource::Actual => "actual",
            DataSource::Projected => "proj",
        };
        println!(
            "{:>6} {:>8} {:>12.1} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            period.period,
            source,
            record.foot_traffic,
            record.total_revenue,
            record.total_costs,
            record.weekly_profit,
            record.cumulative_profit
        );
    }

    let totals = &report.totals;
    println!();
    println!(
        "汇总 (第 {}-{} 期, 实绩 {} 期): 客流 {:.1}, 收入 {:.2}, 成本 {:.2}, 利润 {:.2}",
        totals.start,
        totals.end,
        totals.actual_count,
        totals.foot_traffic,
        totals.total_revenue,
        totals.total_costs,
        totals.total_profit
    );
    println!("盈亏平衡: {}", report.break_even);
}

fn run(cli: &CliArgs) -> Result<()> {
    let config = ConfigManager::load_default()?.engine_config()?;
    let api = ForecastApi::with_config(config);

    let mut plan = load_plan(&cli.plan_path)
        .with_context(|| format!("加载方案失败: {}", cli.plan_path.display()))?;

    if let Some(path) = &cli.actuals_path {
        let actuals = UniversalActualsParser
            .parse_actuals(path)
            .with_context(|| format!("加载实绩失败: {}", path.display()))?;
        plan.actuals.extend(actuals);
    }

    let report = api.reconcile_plan(&plan, cli.scenario.as_deref())?;
    print_report(&report);

    if let Some(path) = &cli.export_path {
        export_blended_to_file(path, &report.periods)?;
        println!("已导出: {}", path.display());
    }

    Ok(())
}

fn main() {
    // 参数先于日志解析,日志格式由参数决定
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("错误: {:#}", err);
            std::process::exit(1);
        }
    };

    logging::init(cli.log_format);
    tracing::info!(log_format = %cli.log_format, "{} v{}", APP_NAME, VERSION);

    if let Err(err) = run(&cli) {
        eprintln!("错误: {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args_full() {
        let cli = parse_args(args(&[
            "plan.json",
            "--actuals",
            "actuals.csv",
            "--scenario",
            "Price Cut",
            "--export",
            "out.csv",
        ]))
        .unwrap();
        assert_eq!(cli.plan_path, PathBuf::from("plan.json"));
        assert_eq!(cli.actuals_path, Some(PathBuf::from("actuals.csv")));
        assert_eq!(cli.scenario.as_deref(), Some("Price Cut"));
        assert_eq!(cli.export_path, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_parse_args_json_logs() {
        let cli = parse_args(args(&["--json-logs", "plan.json"])).unwrap();
        assert_eq!(cli.plan_path, PathBuf::from("plan.json"));
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["plan.json", "--scenario"])).is_err());
        assert!(parse_args(args(&["plan.json", "--verbose"])).is_err());
        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
    }
}
