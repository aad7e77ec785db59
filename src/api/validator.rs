// ==========================================
// 活动经营预测系统 - 输入校验器
// ==========================================
// 职责: 调用方输入层的校验,在进入引擎之前拒绝非法输入
// 规则:
// 1) forecast_period < 1 → InvalidForecastPeriod
// 2) 价格/预算/成本/人数等不得为负
// 3) 转化率 ∈ [0, 1],销货成本比例 ∈ [0, 100]
// 4) 情景调整不得低于 -100%
// 5) 所有数值必须是有限数
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::config::EngineConfig;
use crate::domain::actuals::ActualRecord;
use crate::domain::metrics::{
    CostMetrics, GrowthMetrics, MarketingCosting, RevenueMetrics, StaffingCosting,
};
use crate::domain::product::ProductInfo;
use crate::domain::scenario::ScenarioModifiers;

// ==========================================
// 违规收集器
// ==========================================
#[derive(Default)]
struct Violations(Vec<ValidationViolation>);

impl Violations {
    fn non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(v) = value {
            if !v.is_finite() {
                self.0.push(ValidationViolation::new(field, "必须是有限数值", Some(v)));
            } else if v < 0.0 {
                self.0.push(ValidationViolation::new(field, "不得为负数", Some(v)));
            }
        }
    }

    fn within(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(v) = value {
            if !v.is_finite() {
                self.0.push(ValidationViolation::new(field, "必须是有限数值", Some(v)));
            } else if v < min || v > max {
                self.0.push(ValidationViolation::new(
                    field,
                    format!("超出范围 [{}, {}]", min, max),
                    Some(v),
                ));
            }
        }
    }

    fn into_result(self, context: &str) -> ApiResult<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        let fields: Vec<&str> = self.0.iter().map(|v| v.field.as_str()).collect();
        Err(ApiError::ValidationError {
            reason: format!("{}: {} 项不合法 ({})", context, self.0.len(), fields.join(", ")),
            violations: self.0,
        })
    }
}

// ==========================================
// InputValidator - 输入校验器
// ==========================================
pub struct InputValidator {
    max_forecast_periods: u32,
}

impl InputValidator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_forecast_periods: config.max_forecast_periods,
        }
    }

    /// 校验预测输入
    pub fn validate_inputs(
        &self,
        product: &ProductInfo,
        growth: &GrowthMetrics,
        revenue: &RevenueMetrics,
        cost: &CostMetrics,
    ) -> ApiResult<()> {
        if product.forecast_period < 1 {
            return Err(ApiError::InvalidForecastPeriod(product.forecast_period));
        }

        let mut v = Violations::default();
        if product.forecast_period > self.max_forecast_periods as i64 {
            v.0.push(ValidationViolation::new(
                "product.forecast_period",
                format!("超出上限 {}", self.max_forecast_periods),
                Some(product.forecast_period as f64),
            ));
        }
        v.non_negative("product.events_per_period", product.events_per_period);

        self.check_growth(&mut v, growth);
        self.check_revenue(&mut v, revenue);
        self.check_cost(&mut v, cost);

        v.into_result("预测输入")
    }

    fn check_growth(&self, v: &mut Violations, growth: &GrowthMetrics) {
        v.non_negative("growth.weekly_visitors", growth.weekly_visitors);
        v.non_negative("growth.weekly_growth_rate", growth.weekly_growth_rate);
        v.non_negative("growth.return_visit_rate", growth.return_visit_rate);
        v.non_negative("growth.word_of_mouth_rate", growth.word_of_mouth_rate);
        v.within(
            "growth.social_conversion_rate",
            growth.social_conversion_rate,
            0.0,
            100.0,
        );
        v.non_negative("growth.social_reach", growth.social_reach);
        v.non_negative("growth.lifetime_audience_cap", growth.lifetime_audience_cap);
        if let Some(factors) = &growth.seasonal_factors {
            for (idx, factor) in factors.iter().enumerate() {
                v.non_negative(&format!("growth.seasonal_factors[{}]", idx), *factor);
            }
        }
    }

    fn check_revenue(&self, v: &mut Violations, revenue: &RevenueMetrics) {
        v.non_negative("revenue.ticket_price", revenue.ticket_price);
        v.within("revenue.ticket_sales_rate", revenue.ticket_sales_rate, 0.0, 1.0);
        v.non_negative("revenue.fb_spend", revenue.fb_spend);
        v.within("revenue.fb_conversion_rate", revenue.fb_conversion_rate, 0.0, 1.0);
        v.non_negative("revenue.merchandise_spend", revenue.merchandise_spend);
        v.within(
            "revenue.merchandise_conversion_rate",
            revenue.merchandise_conversion_rate,
            0.0,
            1.0,
        );
        v.non_negative("revenue.digital_price", revenue.digital_price);
        v.within(
            "revenue.digital_conversion_rate",
            revenue.digital_conversion_rate,
            0.0,
            1.0,
        );
    }

    fn check_cost(&self, v: &mut Violations, cost: &CostMetrics) {
        match &cost.marketing {
            MarketingCosting::Aggregate {
                weekly_budget,
                campaign_budget,
                campaign_duration_weeks,
            } => {
                v.non_negative("cost.marketing.weekly_budget", *weekly_budget);
                v.non_negative("cost.marketing.campaign_budget", *campaign_budget);
                v.non_negative(
                    "cost.marketing.campaign_duration_weeks",
                    *campaign_duration_weeks,
                );
            }
            MarketingCosting::PerChannel { channels } => {
                for (idx, channel) in channels.iter().enumerate() {
                    v.non_negative(&format!("cost.marketing.channels[{}].budget", idx), channel.budget);
                }
            }
            MarketingCosting::Unrecognized => {}
        }

        match &cost.staffing {
            StaffingCosting::FlatRate {
                additional_staff_per_event,
                cost_per_person,
            } => {
                v.non_negative(
                    "cost.staffing.additional_staff_per_event",
                    *additional_staff_per_event,
                );
                v.non_negative("cost.staffing.cost_per_person", *cost_per_person);
            }
            StaffingCosting::PerRole { roles } => {
                for (idx, role) in roles.iter().enumerate() {
                    v.non_negative(&format!("cost.staffing.roles[{}].count", idx), role.count);
                    v.non_negative(
                        &format!("cost.staffing.roles[{}].cost_per_person", idx),
                        role.cost_per_person,
                    );
                }
            }
            StaffingCosting::Unrecognized => {}
        }

        for (idx, item) in cost.event_costs.iter().enumerate() {
            v.non_negative(&format!("cost.event_costs[{}].amount", idx), item.amount);
        }
        for (idx, item) in cost.setup_costs.iter().enumerate() {
            v.non_negative(&format!("cost.setup_costs[{}].amount", idx), item.amount);
        }
        v.within("cost.fb_cog_percentage", cost.fb_cog_percentage, 0.0, 100.0);
        v.non_negative("cost.merchandise_cog_per_unit", cost.merchandise_cog_per_unit);
    }

    /// 校验情景调整
    pub fn validate_modifiers(&self, modifiers: &ScenarioModifiers) -> ApiResult<()> {
        let mut v = Violations::default();
        for (stream, pct) in &modifiers.revenue {
            v.within(&format!("modifiers.revenue.{}", stream), Some(*pct), -100.0, f64::MAX);
        }
        for (category, pct) in &modifiers.costs {
            v.within(&format!("modifiers.costs.{}", category), Some(*pct), -100.0, f64::MAX);
        }
        v.within("modifiers.attendance", modifiers.attendance, -100.0, f64::MAX);
        v.into_result("情景调整")
    }

    /// 校验实绩记录
    pub fn validate_actuals(&self, actuals: &[ActualRecord]) -> ApiResult<()> {
        let mut v = Violations::default();
        for actual in actuals {
            let prefix = format!("actuals[period={}]", actual.period);
            if actual.period < 1 {
                v.0.push(ValidationViolation::new(
                    format!("{}.period", prefix),
                    "期号必须 ≥ 1",
                    Some(actual.period as f64),
                ));
            }
            let fields = [
                ("foot_traffic", actual.foot_traffic),
                ("events", actual.events),
                ("ticket_revenue", actual.ticket_revenue),
                ("fb_revenue", actual.fb_revenue),
                ("merchandise_revenue", actual.merchandise_revenue),
                ("digital_revenue", actual.digital_revenue),
                ("marketing_costs", actual.marketing_costs),
                ("staffing_costs", actual.staffing_costs),
                ("event_costs", actual.event_costs),
                ("setup_costs", actual.setup_costs),
                ("fb_cogs", actual.fb_cogs),
                ("merchandise_cogs", actual.merchandise_cogs),
                ("total_revenue", actual.total_revenue),
                ("total_costs", actual.total_costs),
            ];
            for (name, value) in fields {
                v.non_negative(&format!("{}.{}", prefix, name), value);
            }
        }
        v.into_result("实绩记录")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::MarketingChannel;
    use crate::domain::types::{CostCategory, ForecastCadence, RevenueStream};

    fn validator() -> InputValidator {
        InputValidator::new(&EngineConfig::default())
    }

    #[test]
    fn test_rejects_non_positive_forecast_period() {
        let result = validator().validate_inputs(
            &ProductInfo::new(0, ForecastCadence::Weekly),
            &GrowthMetrics::default(),
            &RevenueMetrics::default(),
            &CostMetrics::default(),
        );
        assert!(matches!(result, Err(ApiError::InvalidForecastPeriod(0))));
    }

    #[test]
    fn test_collects_all_violations() {
        let revenue = RevenueMetrics {
            ticket_price: Some(-5.0),
            ticket_sales_rate: Some(1.5),
            ..Default::default()
        };
        let cost = CostMetrics {
            marketing: MarketingCosting::PerChannel {
                channels: vec![MarketingChannel {
                    name: "radio".to_string(),
                    budget: Some(-1.0),
                }],
            },
            fb_cog_percentage: Some(130.0),
            ..Default::default()
        };

        let result = validator().validate_inputs(
            &ProductInfo::new(10, ForecastCadence::Weekly),
            &GrowthMetrics::default(),
            &revenue,
            &cost,
        );
        match result {
            Err(ApiError::ValidationError { violations, .. }) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec![
                        "revenue.ticket_price",
                        "revenue.ticket_sales_rate",
                        "cost.marketing.channels[0].budget",
                        "cost.fb_cog_percentage",
                    ]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_horizon_limit() {
        let validator = InputValidator::new(&EngineConfig {
            max_forecast_periods: 52,
            ..Default::default()
        });
        let result = validator.validate_inputs(
            &ProductInfo::new(53, ForecastCadence::Weekly),
            &GrowthMetrics::default(),
            &RevenueMetrics::default(),
            &CostMetrics::default(),
        );
        assert!(matches!(result, Err(ApiError::ValidationError { .. })));
    }

    #[test]
    fn test_modifier_floor() {
        let ok = ScenarioModifiers::default()
            .with_revenue(RevenueStream::Ticket, -100.0)
            .with_cost(CostCategory::Staffing, 250.0);
        assert!(validator().validate_modifiers(&ok).is_ok());

        let bad = ScenarioModifiers::default().with_attendance(-120.0);
        assert!(validator().validate_modifiers(&bad).is_err());
    }

    #[test]
    fn test_actuals_validation() {
        let actuals = vec![ActualRecord {
            period: 0,
            ticket_revenue: Some(-10.0),
            ..Default::default()
        }];
        match validator().validate_actuals(&actuals) {
            Err(ApiError::ValidationError { violations, .. }) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }

        // 合计不得为负,本期利润允许为负
        let actuals = vec![ActualRecord {
            period: 1,
            total_costs: Some(-1.0),
            weekly_profit: Some(-500.0),
            ..Default::default()
        }];
        match validator().validate_actuals(&actuals) {
            Err(ApiError::ValidationError { violations, .. }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "actuals[period=1].total_costs");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
