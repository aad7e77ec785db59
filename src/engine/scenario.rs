// ==========================================
// 活动经营预测系统 - 情景推演引擎
// ==========================================
// 职责: 基线序列 + 百分比调整 → 独立可比较的情景序列
// 公式: adjusted = baseline × (1 + pct / 100)
// 红线:
// 1) 基线永不被修改
// 2) 全零调整必须逐字段复现基线
// 3) 合计与利润由调整后的明细重算,不直接缩放基线合计
// ==========================================

use crate::domain::projection::{link_cumulative_profit, WeeklyProjection};
use crate::domain::scenario::ScenarioModifiers;
use crate::engine::reconcile::{find_break_even, BreakEven};
use serde::{Deserialize, Serialize};
use tracing::instrument;

fn factor(pct: f64) -> f64 {
    1.0 + pct / 100.0
}

/// 单期情景差异 (情景 - 基线)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodDelta {
    pub period: u32,
    pub revenue_delta: f64,
    pub costs_delta: f64,
    pub profit_delta: f64,
    pub cumulative_profit_delta: f64,
}

/// 情景对比结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub periods: Vec<PeriodDelta>,
    pub total_revenue_delta: f64,
    pub total_costs_delta: f64,
    pub total_profit_delta: f64,
    pub baseline_break_even: BreakEven,
    pub scenario_break_even: BreakEven,
}

// ==========================================
// ScenarioModifier - 情景推演引擎
// ==========================================
pub struct ScenarioModifier;

impl ScenarioModifier {
    pub fn new() -> Self {
        Self
    }

    /// 应用情景调整,返回新序列
    #[instrument(skip(self, baseline, modifiers), fields(periods = baseline.len()))]
    pub fn apply(
        &self,
        baseline: &[WeeklyProjection],
        modifiers: &ScenarioModifiers,
    ) -> Vec<WeeklyProjection> {
        let mut adjusted: Vec<WeeklyProjection> = baseline
            .iter()
            .map(|record| {
                let mut record = record.clone();

                if let Some(pct) = modifiers.attendance {
                    let f = factor(pct);
                    record.foot_traffic *= f;
                    record.attendance *= f;
                    record.average_event_attendance *= f;
                }
                for (stream, pct) in &modifiers.revenue {
                    *record.revenue_mut(*stream) *= factor(*pct);
                }
                for (category, pct) in &modifiers.costs {
                    *record.cost_mut(*category) *= factor(*pct);
                }

                record.recompute_totals();
                record
            })
            .collect();

        link_cumulative_profit(&mut adjusted);
        adjusted
    }

    /// 对比情景与基线 (按期号对齐,多余的期不参与)
    pub fn compare(
        &self,
        baseline: &[WeeklyProjection],
        scenario: &[WeeklyProjection],
    ) -> ScenarioComparison {
        let periods: Vec<PeriodDelta> = baseline
            .iter()
            .zip(scenario)
            .map(|(base, alt)| PeriodDelta {
                period: base.period,
                revenue_delta: alt.total_revenue - base.total_revenue,
                costs_delta: alt.total_costs - base.total_costs,
                profit_delta: alt.weekly_profit - base.weekly_profit,
                cumulative_profit_delta: alt.cumulative_profit - base.cumulative_profit,
            })
            .collect();

        ScenarioComparison {
            total_revenue_delta: periods.iter().map(|p| p.revenue_delta).sum(),
            total_costs_delta: periods.iter().map(|p| p.costs_delta).sum(),
            total_profit_delta: periods.iter().map(|p| p.profit_delta).sum(),
            periods,
            baseline_break_even: find_break_even(baseline),
            scenario_break_even: find_break_even(scenario),
        }
    }
}

impl Default for ScenarioModifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CostCategory, RevenueStream};

    fn baseline() -> Vec<WeeklyProjection> {
        let mut records: Vec<WeeklyProjection> = (1..=3)
            .map(|period| {
                let mut r = WeeklyProjection {
                    period,
                    foot_traffic: 100.0,
                    events: 2.0,
                    attendance: 100.0,
                    average_event_attendance: 50.0,
                    ticket_revenue: 1000.0,
                    fb_revenue: 300.0,
                    marketing_costs: 400.0,
                    fb_cogs: 90.0,
                    ..Default::default()
                };
                r.recompute_totals();
                r
            })
            .collect();
        link_cumulative_profit(&mut records);
        records
    }

    #[test]
    fn test_ticket_modifier() {
        let base = baseline();
        let modifiers = ScenarioModifiers::default().with_revenue(RevenueStream::Ticket, 10.0);
        let scenario = ScenarioModifier::new().apply(&base, &modifiers);

        assert!((scenario[0].ticket_revenue - 1100.0).abs() < 1e-9);
        assert_eq!(scenario[0].fb_revenue, 300.0);
        assert_eq!(
            scenario[0].total_revenue,
            scenario[0].ticket_revenue + scenario[0].fb_revenue
        );
        // 基线不变
        assert_eq!(base[0].ticket_revenue, 1000.0);
    }

    #[test]
    fn test_identity_law() {
        let base = baseline();
        let modifiers = ScenarioModifiers::default()
            .with_revenue(RevenueStream::Ticket, 0.0)
            .with_cost(CostCategory::Marketing, 0.0)
            .with_attendance(0.0);
        assert!(modifiers.is_identity());
        assert_eq!(ScenarioModifier::new().apply(&base, &modifiers), base);
        assert_eq!(
            ScenarioModifier::new().apply(&base, &ScenarioModifiers::default()),
            base
        );
    }

    #[test]
    fn test_totals_recomputed_from_fields() {
        let base = baseline();
        let modifiers = ScenarioModifiers::default()
            .with_cost(CostCategory::Marketing, -50.0)
            .with_attendance(20.0);
        let scenario = ScenarioModifier::new().apply(&base, &modifiers);

        assert_eq!(scenario[0].marketing_costs, 200.0);
        assert_eq!(scenario[0].total_costs, 290.0);
        assert_eq!(scenario[0].weekly_profit, 1300.0 - 290.0);
        assert_eq!(scenario[2].cumulative_profit, 3.0 * (1300.0 - 290.0));
        assert!((scenario[0].foot_traffic - 120.0).abs() < 1e-9);
        assert!((scenario[0].attendance - 120.0).abs() < 1e-9);
        assert!((scenario[0].average_event_attendance - 60.0).abs() < 1e-9);
        assert_eq!(scenario[0].events, 2.0);
    }

    #[test]
    fn test_compare() {
        let base = baseline();
        let modifiers = ScenarioModifiers::default().with_cost(CostCategory::Marketing, 25.0);
        let engine = ScenarioModifier::new();
        let scenario = engine.apply(&base, &modifiers);
        let comparison = engine.compare(&base, &scenario);

        assert_eq!(comparison.periods.len(), 3);
        assert_eq!(comparison.periods[0].costs_delta, 100.0);
        assert_eq!(comparison.total_profit_delta, -300.0);
        assert_eq!(comparison.periods[2].cumulative_profit_delta, -300.0);
        assert_eq!(comparison.baseline_break_even, BreakEven::Period(1));
    }
}
