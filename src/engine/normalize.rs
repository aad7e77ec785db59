// ==========================================
// 活动经营预测系统 - 输入归一化
// ==========================================
// 职责: 引擎入口唯一的归一化步骤
// 规则:
// 1) 缺失/非有限数值 → 0
// 2) 转化率缺失 → 1 (100%)
// 3) 百分比 → 小数
// 4) 未识别的模型/计费标签 → 文档约定的默认值,并记录告警
// 5) forecast_period < 1 → InvalidForecastPeriod
// ==========================================

use crate::config::EngineConfig;
use crate::domain::metrics::{
    CostMetrics, GrowthMetrics, MarketingCosting, RevenueMetrics, StaffingCosting,
};
use crate::domain::product::ProductInfo;
use crate::domain::types::{EmploymentType, ForecastCadence, GrowthModel};
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDate;

/// 缺失或非有限数值取 0
pub fn num(value: Option<f64>) -> f64 {
    num_or(value, 0.0)
}

/// 缺失或非有限数值取默认值
pub fn num_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

// ==========================================
// 归一化后的引擎参数
// ==========================================

/// 已解析的增长曲线 (不含未识别分支)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthCurve {
    Exponential,
    Decay,
    Seasonal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthParams {
    pub curve: GrowthCurve,
    pub base_visitors: f64,
    pub growth_rate: f64,        // 小数
    pub return_rate: f64,        // 小数
    pub word_of_mouth_rate: f64, // 小数
    pub social_visitors: f64,    // 每期社媒带来的客流
    pub lifetime_cap: Option<f64>,
    pub seasonal_factors: [f64; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueParams {
    pub ticket_price: f64,
    pub ticket_sales_rate: f64,
    pub fb_spend: f64,
    pub fb_conversion_rate: f64,
    pub merchandise_spend: f64,
    pub merchandise_conversion_rate: f64,
    pub digital_price: f64,
    pub digital_conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarketingPlan {
    Aggregate {
        weekly_budget: f64,
        campaign_budget: f64,
        campaign_duration_weeks: f64,
    },
    PerChannel {
        budgets: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleParams {
    pub count: f64,
    pub cost_per_person: f64,
    pub full_time: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StaffingPlan {
    FlatRate {
        additional_staff_per_event: f64,
        cost_per_person: f64,
    },
    PerRole {
        roles: Vec<RoleParams>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetupParams {
    pub amount: f64,
    pub amortize: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostParams {
    pub marketing: MarketingPlan,
    pub staffing: StaffingPlan,
    pub event_costs: Vec<f64>,
    pub setup_costs: Vec<SetupParams>,
    pub fb_cog_percentage: f64,
    pub merchandise_cog_per_unit: f64,
}

/// 归一化后的全部输入
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInputs {
    pub horizon: u32,
    pub cadence: ForecastCadence,
    pub events_per_period: f64,
    pub start_date: Option<NaiveDate>,
    pub growth: GrowthParams,
    pub revenue: RevenueParams,
    pub cost: CostParams,
    /// 归一化过程中应用的回退说明
    pub notes: Vec<String>,
}

// ==========================================
// 归一化入口
// ==========================================

/// 校验预测期数
pub fn resolve_horizon(forecast_period: i64, config: &EngineConfig) -> EngineResult<u32> {
    if forecast_period < 1 {
        return Err(EngineError::InvalidForecastPeriod(forecast_period));
    }
    if forecast_period > config.max_forecast_periods as i64 {
        return Err(EngineError::HorizonTooLong {
            requested: forecast_period,
            max: config.max_forecast_periods,
        });
    }
    Ok(forecast_period as u32)
}

pub fn normalize(
    product: &ProductInfo,
    growth: &GrowthMetrics,
    revenue: &RevenueMetrics,
    cost: &CostMetrics,
    config: &EngineConfig,
) -> EngineResult<NormalizedInputs> {
    let horizon = resolve_horizon(product.forecast_period, config)?;
    let mut notes = Vec::new();

    let inputs = NormalizedInputs {
        horizon,
        cadence: product.cadence,
        events_per_period: num(product.events_per_period),
        start_date: product.start_date,
        growth: normalize_growth(growth, &mut notes),
        revenue: normalize_revenue(revenue),
        cost: normalize_cost(cost, &mut notes),
        notes,
    };

    for note in &inputs.notes {
        tracing::warn!(product_id = %product.product_id, note = %note, "输入归一化回退");
    }

    Ok(inputs)
}

fn normalize_growth(growth: &GrowthMetrics, notes: &mut Vec<String>) -> GrowthParams {
    let curve = match growth.growth_model {
        GrowthModel::Exponential => GrowthCurve::Exponential,
        GrowthModel::Decay => GrowthCurve::Decay,
        GrowthModel::Seasonal => GrowthCurve::Seasonal,
        GrowthModel::Unrecognized => {
            notes.push("growth_model 未识别，按 exponential 计算".to_string());
            GrowthCurve::Exponential
        }
    };

    let mut seasonal_factors = [1.0; 4];
    if let Some(factors) = &growth.seasonal_factors {
        for (slot, factor) in seasonal_factors.iter_mut().zip(factors.iter()) {
            *slot = num_or(*factor, 1.0);
        }
    }

    // 非正的上限视为未设置
    let lifetime_cap = growth
        .lifetime_audience_cap
        .filter(|cap| cap.is_finite() && *cap > 0.0);

    GrowthParams {
        curve,
        base_visitors: num(growth.weekly_visitors),
        growth_rate: num(growth.weekly_growth_rate) / 100.0,
        return_rate: num(growth.return_visit_rate) / 100.0,
        word_of_mouth_rate: num(growth.word_of_mouth_rate) / 100.0,
        social_visitors: num(growth.social_reach) * num(growth.social_conversion_rate) / 100.0,
        lifetime_cap,
        seasonal_factors,
    }
}

fn normalize_revenue(revenue: &RevenueMetrics) -> RevenueParams {
    RevenueParams {
        ticket_price: num(revenue.ticket_price),
        ticket_sales_rate: num_or(revenue.ticket_sales_rate, 1.0),
        fb_spend: num(revenue.fb_spend),
        fb_conversion_rate: num_or(revenue.fb_conversion_rate, 1.0),
        merchandise_spend: num(revenue.merchandise_spend),
        merchandise_conversion_rate: num_or(revenue.merchandise_conversion_rate, 1.0),
        digital_price: num(revenue.digital_price),
        digital_conversion_rate: num_or(revenue.digital_conversion_rate, 1.0),
    }
}

fn normalize_cost(cost: &CostMetrics, notes: &mut Vec<String>) -> CostParams {
    let marketing = match &cost.marketing {
        MarketingCosting::Aggregate {
            weekly_budget,
            campaign_budget,
            campaign_duration_weeks,
        } => MarketingPlan::Aggregate {
            weekly_budget: num(*weekly_budget),
            campaign_budget: num(*campaign_budget),
            campaign_duration_weeks: num(*campaign_duration_weeks),
        },
        MarketingCosting::PerChannel { channels } => MarketingPlan::PerChannel {
            budgets: channels.iter().map(|c| num(c.budget)).collect(),
        },
        MarketingCosting::Unrecognized => {
            notes.push("marketing 计费方式未识别，营销成本按 0 计算".to_string());
            MarketingPlan::Aggregate {
                weekly_budget: 0.0,
                campaign_budget: 0.0,
                campaign_duration_weeks: 0.0,
            }
        }
    };

    let staffing = match &cost.staffing {
        StaffingCosting::FlatRate {
            additional_staff_per_event,
            cost_per_person,
        } => StaffingPlan::FlatRate {
            additional_staff_per_event: num(*additional_staff_per_event),
            cost_per_person: num(*cost_per_person),
        },
        StaffingCosting::PerRole { roles } => StaffingPlan::PerRole {
            roles: roles
                .iter()
                .map(|r| RoleParams {
                    count: num(r.count),
                    cost_per_person: num(r.cost_per_person),
                    full_time: r.employment == EmploymentType::FullTime,
                })
                .collect(),
        },
        StaffingCosting::Unrecognized => {
            notes.push("staffing 计费方式未识别，人员成本按 0 计算".to_string());
            StaffingPlan::FlatRate {
                additional_staff_per_event: 0.0,
                cost_per_person: 0.0,
            }
        }
    };

    CostParams {
        marketing,
        staffing,
        event_costs: cost.event_costs.iter().map(|item| num(item.amount)).collect(),
        setup_costs: cost
            .setup_costs
            .iter()
            .map(|item| SetupParams {
                amount: num(item.amount),
                amortize: item.amortize,
            })
            .collect(),
        fb_cog_percentage: num(cost.fb_cog_percentage),
        merchandise_cog_per_unit: num(cost.merchandise_cog_per_unit),
    }
}
