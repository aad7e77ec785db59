// ==========================================
// 活动经营预测系统 - 成本引擎
// ==========================================
// 职责: 成本假设 → 每期成本
// 构成: 营销 + 人员 + 场次 + 筹备(本期分摊) + 餐饮销货成本 + 商品销货成本
// 红线: 所有除法都必须防零,分母为 0 时结果为 0
// ==========================================
// 筹备成本口径: 勾选 amortize 的项在全部 N 期平均分摊,
// 其余项全额计入第 1 期
// ==========================================

use crate::domain::types::ForecastCadence;
use crate::engine::normalize::{CostParams, MarketingPlan, RevenueParams, StaffingPlan};
use crate::engine::revenue::RevenueBreakdown;

/// 单期成本拆分
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostBreakdown {
    pub marketing: f64,
    pub staffing: f64,
    pub event: f64,
    pub setup: f64,
    pub fb_cogs: f64,
    pub merchandise_cogs: f64,
    pub total: f64,
}

/// 安全除法
fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 && denominator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

// ==========================================
// CostProjector - 成本引擎
// ==========================================
pub struct CostProjector {
    cadence: ForecastCadence,
    events_per_period: f64,
    horizon: u32,
}

impl CostProjector {
    pub fn new(cadence: ForecastCadence, events_per_period: f64, horizon: u32) -> Self {
        Self {
            cadence,
            events_per_period,
            horizon,
        }
    }

    /// 计算第 period 期成本
    pub fn project(
        &self,
        period: u32,
        params: &CostParams,
        revenue_params: &RevenueParams,
        revenue: &RevenueBreakdown,
    ) -> CostBreakdown {
        let marketing = self.marketing_per_period(&params.marketing);
        let staffing = self.staffing_per_period(&params.staffing);
        let event = self.event_per_period(params);
        let setup = self.setup_share(period, params);
        let fb_cogs = revenue.food_beverage * params.fb_cog_percentage / 100.0;
        let merchandise_units = safe_div(revenue.merchandise, revenue_params.merchandise_spend);
        let merchandise_cogs = merchandise_units * params.merchandise_cog_per_unit;

        CostBreakdown {
            marketing,
            staffing,
            event,
            setup,
            fb_cogs,
            merchandise_cogs,
            total: marketing + staffing + event + setup + fb_cogs + merchandise_cogs,
        }
    }

    // ==========================================
    // 分类计算
    // ==========================================

    /// 营销成本
    ///
    /// - 分渠道: Σ 渠道预算
    /// - 总预算 + 按周预测: 周预算
    /// - 总预算 + 其他周期: 活动预算 / 活动周数
    pub fn marketing_per_period(&self, plan: &MarketingPlan) -> f64 {
        match plan {
            MarketingPlan::PerChannel { budgets } => budgets.iter().sum(),
            MarketingPlan::Aggregate {
                weekly_budget,
                campaign_budget,
                campaign_duration_weeks,
            } => {
                if self.cadence == ForecastCadence::Weekly {
                    *weekly_budget
                } else {
                    safe_div(*campaign_budget, *campaign_duration_weeks)
                }
            }
        }
    }

    /// 人员成本
    ///
    /// - 按岗位: 全职 count × cost,兼职 count × cost × 每期场次
    /// - 统一费率: 每场增派人数 × 人均成本 × 每期场次
    pub fn staffing_per_period(&self, plan: &StaffingPlan) -> f64 {
        match plan {
            StaffingPlan::PerRole { roles } => roles
                .iter()
                .map(|role| {
                    let base = role.count * role.cost_per_person;
                    if role.full_time {
                        base
                    } else {
                        base * self.events_per_period
                    }
                })
                .sum(),
            StaffingPlan::FlatRate {
                additional_staff_per_event,
                cost_per_person,
            } => additional_staff_per_event * cost_per_person * self.events_per_period,
        }
    }

    /// 场次固定成本 (每期重复)
    pub fn event_per_period(&self, params: &CostParams) -> f64 {
        params.event_costs.iter().sum()
    }

    /// 第 period 期应计的筹备成本
    pub fn setup_share(&self, period: u32, params: &CostParams) -> f64 {
        params
            .setup_costs
            .iter()
            .map(|item| {
                if item.amortize {
                    safe_div(item.amount, self.horizon as f64)
                } else if period == 1 {
                    item.amount
                } else {
                    0.0
                }
            })
            .sum()
    }
}
