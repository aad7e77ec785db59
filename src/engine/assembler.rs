// ==========================================
// 活动经营预测系统 - 预测组装引擎
// ==========================================
// 职责: 客流 + 收入 + 成本 → 有序的基线预测序列
// 红线: 确定性 (无隐藏状态/随机数/I/O),同输入必得同输出
// 复杂度: O(N),每次输入变化全量重算
// ==========================================

use crate::config::EngineConfig;
use crate::domain::projection::{link_cumulative_profit, WeeklyProjection};
use crate::engine::cost::CostProjector;
use crate::engine::growth::GrowthProjector;
use crate::engine::normalize::NormalizedInputs;
use crate::engine::revenue::RevenueProjector;
use tracing::instrument;

// ==========================================
// ProjectionAssembler - 预测组装引擎
// ==========================================
pub struct ProjectionAssembler {
    growth: GrowthProjector,
    revenue: RevenueProjector,
}

impl ProjectionAssembler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            growth: GrowthProjector::new(config),
            revenue: RevenueProjector::new(),
        }
    }

    /// 组装 1..N 期预测
    #[instrument(skip(self, inputs), fields(horizon = inputs.horizon, cadence = %inputs.cadence))]
    pub fn assemble(&self, inputs: &NormalizedInputs) -> Vec<WeeklyProjection> {
        let audience = self.growth.project(
            &inputs.growth,
            inputs.horizon,
            inputs.cadence,
            inputs.events_per_period,
            inputs.start_date,
        );
        let cost_projector =
            CostProjector::new(inputs.cadence, inputs.events_per_period, inputs.horizon);

        let mut records: Vec<WeeklyProjection> = audience
            .iter()
            .map(|point| {
                let revenue = self.revenue.project(point.attendance, &inputs.revenue);
                let costs =
                    cost_projector.project(point.period, &inputs.cost, &inputs.revenue, &revenue);

                let mut record = WeeklyProjection {
                    period: point.period,
                    period_start: point.period_start,
                    foot_traffic: point.foot_traffic,
                    events: point.events,
                    attendance: point.attendance,
                    average_event_attendance: point.average_event_attendance,
                    ticket_revenue: revenue.ticket,
                    fb_revenue: revenue.food_beverage,
                    merchandise_revenue: revenue.merchandise,
                    digital_revenue: revenue.digital,
                    marketing_costs: costs.marketing,
                    staffing_costs: costs.staffing,
                    event_costs: costs.event,
                    setup_costs: costs.setup,
                    fb_cogs: costs.fb_cogs,
                    merchandise_cogs: costs.merchandise_cogs,
                    ..Default::default()
                };
                record.recompute_totals();
                record
            })
            .collect();

        link_cumulative_profit(&mut records);

        if let Some(last) = records.last() {
            tracing::debug!(
                periods = records.len(),
                cumulative_profit = last.cumulative_profit,
                "基线预测组装完成"
            );
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{
        CostMetrics, GrowthMetrics, MarketingChannel, MarketingCosting, RevenueMetrics,
        SetupCostItem,
    };
    use crate::domain::product::ProductInfo;
    use crate::domain::types::{ForecastCadence, GrowthModel};
    use crate::engine::normalize::normalize;

    fn inputs() -> NormalizedInputs {
        let product = ProductInfo::new(6, ForecastCadence::Weekly).with_events_per_period(2.0);
        let growth = GrowthMetrics {
            growth_model: GrowthModel::Exponential,
            weekly_visitors: Some(100.0),
            weekly_growth_rate: Some(10.0),
            ..Default::default()
        };
        let revenue = RevenueMetrics {
            ticket_price: Some(20.0),
            ticket_sales_rate: Some(0.5),
            fb_spend: Some(8.0),
            fb_conversion_rate: Some(0.5),
            ..Default::default()
        };
        let cost = CostMetrics {
            marketing: MarketingCosting::PerChannel {
                channels: vec![
                    MarketingChannel {
                        name: "social".to_string(),
                        budget: Some(100.0),
                    },
                    MarketingChannel {
                        name: "print".to_string(),
                        budget: Some(50.0),
                    },
                ],
            },
            setup_costs: vec![SetupCostItem {
                name: "stage".to_string(),
                amount: Some(3000.0),
                amortize: false,
            }],
            fb_cog_percentage: Some(30.0),
            ..Default::default()
        };
        normalize(&product, &growth, &revenue, &cost, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_assemble_invariants() {
        let records = ProjectionAssembler::new(&EngineConfig::default()).assemble(&inputs());
        assert_eq!(records.len(), 6);

        let mut running = 0.0;
        for (idx, r) in records.iter().enumerate() {
            assert_eq!(r.period, idx as u32 + 1);
            assert_eq!(
                r.total_revenue,
                r.ticket_revenue + r.fb_revenue + r.merchandise_revenue + r.digital_revenue
            );
            assert_eq!(
                r.total_costs,
                r.marketing_costs
                    + r.staffing_costs
                    + r.event_costs
                    + r.setup_costs
                    + r.fb_cogs
                    + r.merchandise_cogs
            );
            assert_eq!(r.weekly_profit, r.total_revenue - r.total_costs);
            running += r.weekly_profit;
            assert!((r.cumulative_profit - running).abs() < 1e-9);
            assert_eq!(r.attendance, r.foot_traffic);
            assert_eq!(r.average_event_attendance, r.attendance / 2.0);
        }
        assert_eq!(records[0].cumulative_profit, records[0].weekly_profit);
        assert_eq!(records[0].setup_costs, 3000.0);
        assert_eq!(records[1].setup_costs, 0.0);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let assembler = ProjectionAssembler::new(&EngineConfig::default());
        let inputs = inputs();
        assert_eq!(assembler.assemble(&inputs), assembler.assemble(&inputs));
    }
}
