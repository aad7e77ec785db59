// ==========================================
// 活动经营预测系统 - 假设指标领域模型
// ==========================================
// 职责: 增长假设、收入假设、成本假设
// 约定: 数值字段均为 Option,缺失值在引擎入口统一归一化为 0
// 红线: 成本计费方式用显式标签联合表达,同一类别只允许一种模式
// ==========================================

use crate::domain::types::{EmploymentType, GrowthModel};
use serde::{Deserialize, Serialize};

// ==========================================
// GrowthMetrics - 增长假设
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrowthMetrics {
    #[serde(default)]
    pub growth_model: GrowthModel,
    pub weekly_visitors: Option<f64>,       // 基准客流 count(0)
    pub weekly_growth_rate: Option<f64>,    // 每期增长率 (%)
    pub return_visit_rate: Option<f64>,     // 回访率 (%)
    pub word_of_mouth_rate: Option<f64>,    // 口碑传播率 (%)
    pub social_conversion_rate: Option<f64>, // 社媒转化率 (%)
    pub social_reach: Option<f64>,          // 社媒每期触达人数
    pub lifetime_audience_cap: Option<f64>, // 累计客流上限
    /// 季节系数 Q1..Q4,缺失取 1.0
    pub seasonal_factors: Option<[Option<f64>; 4]>,
}

// ==========================================
// RevenueMetrics - 收入假设
// ==========================================
// 转化率未设置时视为 1 (100%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RevenueMetrics {
    pub ticket_price: Option<f64>,
    pub ticket_sales_rate: Option<f64>,
    pub fb_spend: Option<f64>,
    pub fb_conversion_rate: Option<f64>,
    pub merchandise_spend: Option<f64>,
    pub merchandise_conversion_rate: Option<f64>,
    pub digital_price: Option<f64>,
    pub digital_conversion_rate: Option<f64>,
}

// ==========================================
// 营销计费方式
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarketingCosting {
    /// 总预算: 周预算 或 活动预算 / 活动周数
    Aggregate {
        #[serde(default)]
        weekly_budget: Option<f64>,
        #[serde(default)]
        campaign_budget: Option<f64>,
        #[serde(default)]
        campaign_duration_weeks: Option<f64>,
    },
    /// 分渠道预算
    PerChannel {
        #[serde(default)]
        channels: Vec<MarketingChannel>,
    },
    #[serde(other)]
    Unrecognized,
}

impl Default for MarketingCosting {
    fn default() -> Self {
        MarketingCosting::Aggregate {
            weekly_budget: None,
            campaign_budget: None,
            campaign_duration_weeks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingChannel {
    pub name: String,
    #[serde(default)]
    pub budget: Option<f64>,
}

// ==========================================
// 人员计费方式
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StaffingCosting {
    /// 统一费率: 每场增派人数 × 人均成本 × 每期场次
    FlatRate {
        #[serde(default)]
        additional_staff_per_event: Option<f64>,
        #[serde(default)]
        cost_per_person: Option<f64>,
    },
    /// 按岗位清单
    PerRole {
        #[serde(default)]
        roles: Vec<StaffRole>,
    },
    #[serde(other)]
    Unrecognized,
}

impl Default for StaffingCosting {
    fn default() -> Self {
        StaffingCosting::FlatRate {
            additional_staff_per_event: None,
            cost_per_person: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRole {
    pub role: String,
    #[serde(default)]
    pub count: Option<f64>,
    #[serde(default)]
    pub cost_per_person: Option<f64>,
    #[serde(default)]
    pub employment: EmploymentType,
}

// ==========================================
// 成本明细项
// ==========================================

/// 每期重复发生的场次成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCostItem {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// 一次性筹备成本
///
/// `amortize = true` 时在全部 N 期平均分摊,否则全额计入第 1 期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupCostItem {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub amortize: bool,
}

// ==========================================
// CostMetrics - 成本假设
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostMetrics {
    #[serde(default)]
    pub marketing: MarketingCosting,
    #[serde(default)]
    pub staffing: StaffingCosting,
    #[serde(default)]
    pub event_costs: Vec<EventCostItem>,
    #[serde(default)]
    pub setup_costs: Vec<SetupCostItem>,
    #[serde(default)]
    pub fb_cog_percentage: Option<f64>,       // 餐饮销货成本比例 (%)
    #[serde(default)]
    pub merchandise_cog_per_unit: Option<f64>, // 每件商品成本
}
