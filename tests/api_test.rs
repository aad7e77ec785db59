// ==========================================
// API 层集成测试
// ==========================================
// 职责: 文件 → 校验 → 引擎 → 导出 的完整流程
// 场景: 方案文件、实绩 CSV、配置文件、情景查找、输入校验
// ==========================================


use std::io::Write;

use event_forecast::api::{ApiError, ForecastApi};
use event_forecast::config::ConfigManager;
use event_forecast::domain::types::{CostCategory, DataSource, RevenueStream};
use event_forecast::domain::{ScenarioModel, ScenarioModifiers};
use event_forecast::engine::BreakEven;
use event_forecast::exporter::export_blended_to_file;
use event_forecast::importer::{load_plan, save_plan, ActualsParser, UniversalActualsParser};
use tempfile::{Builder, TempDir};
use test_helpers::*;

#[test]
fn test_full_flow_from_files() {
    event_forecast::logging::init_test();
    let dir = TempDir::new().unwrap();

    // 1. 写出方案文件
    let mut plan = sample_plan();
    plan.scenarios.push(
        ScenarioModel::new(
            "Premium Tickets",
            ScenarioModifiers::default()
                .with_revenue(RevenueStream::Ticket, 25.0)
                .with_cost(CostCategory::Marketing, 50.0),
        )
        .for_product("P-001"),
    );
    let plan_path = dir.path().join("plan.json");
    save_plan(&plan, &plan_path).unwrap();

    // 2. 写出实绩 CSV
    let actuals_path = dir.path().join("actuals.csv");
    let mut file = std::fs::File::create(&actuals_path).unwrap();
    writeln!(file, "period,foot_traffic,events,ticket_revenue,marketing_costs").unwrap();
    writeln!(file, "1,180,2,\"2,400\",190").unwrap();
    writeln!(file, ",,,,").unwrap();
    drop(file);

    // 3. 加载并对账
    let mut loaded = load_plan(&plan_path).unwrap();
    assert_eq!(loaded.scenarios.len(), 1);
    loaded
        .actuals
        .extend(UniversalActualsParser.parse_actuals(&actuals_path).unwrap());
    assert_eq!(loaded.actuals.len(), 1);

    let api = ForecastApi::new();
    let report = api.reconcile_plan(&loaded, Some("premium tickets")).unwrap();
    assert_eq!(report.periods.len(), 12);
    assert_eq!(report.periods[0].source, DataSource::Actual);
    assert_eq!(report.periods[0].record.total_revenue, 2400.0);
    assert_eq!(report.periods[0].record.weekly_profit, 2210.0);
    assert_eq!(report.periods[1].source, DataSource::Projected);
    assert_eq!(report.break_even, BreakEven::Period(1));

    // 4. 导出
    let export_path = dir.path().join("report.csv");
    export_blended_to_file(&export_path, &report.periods).unwrap();
    let exported = std::fs::read_to_string(&export_path).unwrap();
    assert_eq!(exported.lines().count(), 13);
    assert!(exported.lines().nth(1).unwrap().starts_with("1,,ACTUAL,180.0"));
}

#[test]
fn test_totals_only_actuals_csv() {
    let dir = TempDir::new().unwrap();
    let actuals_path = dir.path().join("actuals.csv");
    std::fs::write(
        &actuals_path,
        "period,foot_traffic,total_revenue,total_costs\n1,80,5000,1200\n",
    )
    .unwrap();

    let mut plan = sample_plan();
    plan.actuals = UniversalActualsParser.parse_actuals(&actuals_path).unwrap();
    let report = ForecastApi::new().reconcile_plan(&plan, None).unwrap();

    let first = &report.periods[0].record;
    assert_eq!(report.periods[0].source, DataSource::Actual);
    assert_eq!(first.total_revenue, 5000.0);
    assert_eq!(first.total_costs, 1200.0);
    assert_eq!(first.weekly_profit, 3800.0);
    assert_eq!(first.cumulative_profit, 3800.0);
    assert_eq!(report.break_even, BreakEven::Period(1));
}

#[test]
fn test_scenario_projection_keeps_baseline() {
    let mut plan = sample_plan();
    let scenario = ScenarioModel::new(
        "Lean Staffing",
        ScenarioModifiers::default().with_cost(CostCategory::Staffing, -50.0),
    );
    let scenario_id = scenario.id.to_string();
    plan.scenarios.push(scenario);

    let api = ForecastApi::new();
    let projection = api.project_scenario(&plan, &scenario_id).unwrap();
    assert_eq!(projection.scenario.name, "Lean Staffing");
    assert_close(projection.baseline[0].staffing_costs, 640.0);
    assert_close(projection.records[0].staffing_costs, 320.0);

    let comparison = api.compare_scenario(&plan, "Lean Staffing").unwrap();
    assert_close(comparison.total_costs_delta, -320.0 * 12.0);

    assert!(matches!(
        api.compare_scenario(&plan, "unknown"),
        Err(ApiError::ScenarioNotFound(_))
    ));
}

#[test]
fn test_validation_rejects_bad_inputs() {
    let api = ForecastApi::new();

    let mut plan = sample_plan();
    plan.product.forecast_period = 0;
    assert!(matches!(
        api.project_baseline(&plan),
        Err(ApiError::InvalidForecastPeriod(0))
    ));

    let mut plan = sample_plan();
    plan.revenue.fb_conversion_rate = Some(2.0);
    plan.cost.merchandise_cog_per_unit = Some(-1.0);
    match api.project_baseline(&plan) {
        Err(ApiError::ValidationError { violations, .. }) => {
            assert_eq!(violations.len(), 2);
            assert_eq!(violations[0].field, "revenue.fb_conversion_rate");
            assert_eq!(violations[1].field, "cost.merchandise_cog_per_unit");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let mut plan = sample_plan();
    plan.scenarios.push(ScenarioModel::new(
        "Impossible",
        ScenarioModifiers::default().with_revenue(RevenueStream::Digital, -150.0),
    ));
    assert!(matches!(
        api.project_scenario(&plan, "Impossible"),
        Err(ApiError::ValidationError { .. })
    ));
}

#[test]
fn test_config_file_drives_api() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"trend_window": 2, "max_forecast_periods": 10}}"#).unwrap();

    let manager = ConfigManager::from_file(file.path()).unwrap();
    assert_eq!(manager.source(), Some(file.path()));
    let config = manager.engine_config().unwrap();
    assert_eq!(config.trend_window, 2);
    assert_eq!(config.weeks_per_quarter, 13);

    let api = ForecastApi::with_config(config);
    let plan = sample_plan();
    assert!(matches!(
        api.project_baseline(&plan),
        Err(ApiError::ValidationError { .. })
    ));

    let mut short_plan = sample_plan();
    short_plan.product.forecast_period = 4;
    let report = api.reconcile_plan(&short_plan, None).unwrap();
    assert_eq!(report.trend_window, 2);
    assert!(report.revenue_trend[0].is_none());
    assert!(report.revenue_trend[1].is_some());
}

#[test]
fn test_missing_plan_file() {
    let dir = TempDir::new().unwrap();
    let result = load_plan(&dir.path().join("absent.json"));
    assert!(result.is_err());

    let plan = sample_plan();
    let err = ForecastApi::new().reconcile_plan(&plan, Some("absent"));
    assert!(matches!(err, Err(ApiError::ScenarioNotFound(ref key)) if key == "absent"));
}
