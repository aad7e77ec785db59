// ==========================================
// 活动经营预测系统 - 预测 API
// ==========================================
// 职责: 校验输入 → 调用引擎,供命令行与调用方使用
// 红线: API 层不做计算,只负责校验、查找情景与组装结果
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::InputValidator;
use crate::config::EngineConfig;
use crate::domain::plan::ForecastPlan;
use crate::domain::projection::WeeklyProjection;
use crate::domain::scenario::ScenarioModel;
use crate::engine::{
    project_with_config, ActualsReconciler, ReconciliationReport, ScenarioComparison,
    ScenarioModifier,
};

/// 情景预测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: ScenarioModel,
    pub baseline: Vec<WeeklyProjection>,
    pub records: Vec<WeeklyProjection>,
}

// ==========================================
// ForecastApi - 预测 API
// ==========================================
pub struct ForecastApi {
    config: EngineConfig,
    validator: InputValidator,
}

impl ForecastApi {
    /// 使用默认引擎参数创建
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let validator = InputValidator::new(&config);
        Self { config, validator }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 基线预测
    // ==========================================

    /// 生成基线预测序列
    #[instrument(skip(self, plan), fields(product_id = %plan.product.product_id))]
    pub fn project_baseline(&self, plan: &ForecastPlan) -> ApiResult<Vec<WeeklyProjection>> {
        self.validator
            .validate_inputs(&plan.product, &plan.growth, &plan.revenue, &plan.cost)?;

        let records = project_with_config(
            &plan.product,
            &plan.growth,
            &plan.revenue,
            &plan.cost,
            &self.config,
        )?;

        tracing::info!(periods = records.len(), "基线预测完成");
        Ok(records)
    }

    // ==========================================
    // 情景推演
    // ==========================================

    fn find_scenario<'a>(&self, plan: &'a ForecastPlan, key: &str) -> ApiResult<&'a ScenarioModel> {
        let scenario = plan
            .find_scenario(key)
            .ok_or_else(|| ApiError::ScenarioNotFound(key.to_string()))?;

        if !scenario.baseline_product_id.is_empty()
            && scenario.baseline_product_id != plan.product.product_id
        {
            tracing::warn!(
                scenario = %scenario.name,
                baseline_product_id = %scenario.baseline_product_id,
                product_id = %plan.product.product_id,
                "情景关联的产品与当前方案不一致"
            );
        }

        self.validator.validate_modifiers(&scenario.modifiers)?;
        Ok(scenario)
    }

    /// 按情景名称或 ID 生成情景预测
    #[instrument(skip(self, plan), fields(product_id = %plan.product.product_id))]
    pub fn project_scenario(
        &self,
        plan: &ForecastPlan,
        scenario_key: &str,
    ) -> ApiResult<ScenarioProjection> {
        let scenario = self.find_scenario(plan, scenario_key)?;
        let baseline = self.project_baseline(plan)?;
        let records = ScenarioModifier::new().apply(&baseline, &scenario.modifiers);

        tracing::info!(scenario = %scenario.name, periods = records.len(), "情景预测完成");
        Ok(ScenarioProjection {
            scenario: scenario.clone(),
            baseline,
            records,
        })
    }

    /// 情景与基线对比
    pub fn compare_scenario(
        &self,
        plan: &ForecastPlan,
        scenario_key: &str,
    ) -> ApiResult<ScenarioComparison> {
        let projection = self.project_scenario(plan, scenario_key)?;
        Ok(ScenarioModifier::new().compare(&projection.baseline, &projection.records))
    }

    // ==========================================
    // 实绩对账
    // ==========================================

    /// 用方案内的实绩生成对账报告
    ///
    /// `scenario_key` 为 None 时以基线为预测序列
    #[instrument(skip(self, plan), fields(product_id = %plan.product.product_id, actuals = plan.actuals.len()))]
    pub fn reconcile_plan(
        &self,
        plan: &ForecastPlan,
        scenario_key: Option<&str>,
    ) -> ApiResult<ReconciliationReport> {
        self.validator.validate_actuals(&plan.actuals)?;

        let series = match scenario_key {
            Some(key) => self.project_scenario(plan, key)?.records,
            None => self.project_baseline(plan)?,
        };

        let report =
            ActualsReconciler::new().report(&series, &plan.actuals, self.config.trend_window)?;

        tracing::info!(
            actual_count = report.totals.actual_count,
            break_even = %report.break_even,
            "对账报告完成"
        );
        Ok(report)
    }
}

impl Default for ForecastApi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actuals::ActualRecord;
    use crate::domain::metrics::{CostMetrics, GrowthMetrics, RevenueMetrics};
    use crate::domain::product::ProductInfo;
    use crate::domain::scenario::ScenarioModifiers;
    use crate::domain::types::{DataSource, ForecastCadence, RevenueStream};
    use crate::engine::BreakEven;

    fn sample_plan() -> ForecastPlan {
        let growth = GrowthMetrics {
            weekly_visitors: Some(100.0),
            ..Default::default()
        };
        let revenue = RevenueMetrics {
            ticket_price: Some(10.0),
            ..Default::default()
        };
        let mut plan = ForecastPlan::new(
            ProductInfo::new(4, ForecastCadence::Weekly),
            growth,
            revenue,
            CostMetrics::default(),
        );
        plan.scenarios.push(ScenarioModel::new(
            "Price Cut",
            ScenarioModifiers::default().with_revenue(RevenueStream::Ticket, -50.0),
        ));
        plan
    }

    #[test]
    fn test_project_baseline() {
        let records = ForecastApi::new().project_baseline(&sample_plan()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].ticket_revenue, 1000.0);
        assert_eq!(records[3].cumulative_profit, 4000.0);
    }

    #[test]
    fn test_invalid_forecast_period() {
        let mut plan = sample_plan();
        plan.product.forecast_period = -1;
        let err = ForecastApi::new().project_baseline(&plan).unwrap_err();
        assert!(matches!(err, ApiError::InvalidForecastPeriod(-1)));
    }

    #[test]
    fn test_scenario_lookup_by_name_and_missing() {
        let api = ForecastApi::new();
        let plan = sample_plan();

        let projection = api.project_scenario(&plan, "price cut").unwrap();
        assert_eq!(projection.records[0].ticket_revenue, 500.0);
        assert_eq!(projection.baseline[0].ticket_revenue, 1000.0);

        let comparison = api.compare_scenario(&plan, "Price Cut").unwrap();
        assert_eq!(comparison.total_revenue_delta, -2000.0);

        let err = api.project_scenario(&plan, "missing").unwrap_err();
        assert!(matches!(err, ApiError::ScenarioNotFound(ref key) if key == "missing"));
    }

    #[test]
    fn test_reconcile_plan_uses_actuals() {
        let mut plan = sample_plan();
        plan.actuals.push(ActualRecord {
            ticket_revenue: Some(400.0),
            marketing_costs: Some(900.0),
            ..ActualRecord::new(1)
        });

        let report = ForecastApi::new().reconcile_plan(&plan, None).unwrap();
        assert_eq!(report.periods[0].source, DataSource::Actual);
        assert_eq!(report.periods[0].record.weekly_profit, -500.0);
        assert_eq!(report.periods[1].record.cumulative_profit, 500.0);
        assert_eq!(report.break_even, BreakEven::Period(2));
        assert_eq!(report.trend_window, 3);
        assert_eq!(report.variance.len(), 1);
    }
}
