// ==========================================
// 活动经营预测系统 - 领域类型定义
// ==========================================
// 职责: 预测周期、增长模型、收入流、成本类别等标签
// 红线: 未识别的标签必须显式落入 Unrecognized,由归一化层决定默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 预测周期 (Forecast Cadence)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForecastCadence {
    #[default]
    Weekly,    // 按周
    Monthly,   // 按月
    Quarterly, // 按季度
    PerEvent,  // 按场次
}

impl ForecastCadence {
    /// 每个季度包含的周期数（按索引推算季度时使用）
    pub fn periods_per_quarter(&self, weeks_per_quarter: u32, months_per_quarter: u32) -> u32 {
        match self {
            ForecastCadence::Weekly | ForecastCadence::PerEvent => weeks_per_quarter.max(1),
            ForecastCadence::Monthly => months_per_quarter.max(1),
            ForecastCadence::Quarterly => 1,
        }
    }
}

impl fmt::Display for ForecastCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastCadence::Weekly => write!(f, "weekly"),
            ForecastCadence::Monthly => write!(f, "monthly"),
            ForecastCadence::Quarterly => write!(f, "quarterly"),
            ForecastCadence::PerEvent => write!(f, "per_event"),
        }
    }
}

// ==========================================
// 增长模型 (Growth Model)
// ==========================================
// Unrecognized: 输入中出现的未知标签,归一化时回落到 Exponential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrowthModel {
    #[default]
    Exponential, // 指数增长
    Decay,       // 衰减
    Seasonal,    // 季节性
    #[serde(other)]
    Unrecognized,
}

impl fmt::Display for GrowthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthModel::Exponential => write!(f, "exponential"),
            GrowthModel::Decay => write!(f, "decay"),
            GrowthModel::Seasonal => write!(f, "seasonal"),
            GrowthModel::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

// ==========================================
// 收入流 (Revenue Stream)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueStream {
    Ticket,      // 门票
    FoodBeverage, // 餐饮
    Merchandise, // 周边商品
    Digital,     // 数字产品
}

impl RevenueStream {
    pub const ALL: [RevenueStream; 4] = [
        RevenueStream::Ticket,
        RevenueStream::FoodBeverage,
        RevenueStream::Merchandise,
        RevenueStream::Digital,
    ];
}

impl fmt::Display for RevenueStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevenueStream::Ticket => write!(f, "ticket"),
            RevenueStream::FoodBeverage => write!(f, "food_beverage"),
            RevenueStream::Merchandise => write!(f, "merchandise"),
            RevenueStream::Digital => write!(f, "digital"),
        }
    }
}

// ==========================================
// 成本类别 (Cost Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Marketing,       // 营销
    Staffing,        // 人员
    Event,           // 场次固定成本
    Setup,           // 一次性筹备成本(分摊后)
    FoodBeverageCogs, // 餐饮销货成本
    MerchandiseCogs, // 商品销货成本
}

impl CostCategory {
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Marketing,
        CostCategory::Staffing,
        CostCategory::Event,
        CostCategory::Setup,
        CostCategory::FoodBeverageCogs,
        CostCategory::MerchandiseCogs,
    ];
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostCategory::Marketing => write!(f, "marketing"),
            CostCategory::Staffing => write!(f, "staffing"),
            CostCategory::Event => write!(f, "event"),
            CostCategory::Setup => write!(f, "setup"),
            CostCategory::FoodBeverageCogs => write!(f, "fb_cogs"),
            CostCategory::MerchandiseCogs => write!(f, "merchandise_cogs"),
        }
    }
}

// ==========================================
// 用工类型 (Employment Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime, // 全职: 按周期计费
    #[default]
    PartTime, // 兼职: 按场次计费
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::FullTime => write!(f, "full_time"),
            EmploymentType::PartTime => write!(f, "part_time"),
        }
    }
}

// ==========================================
// 数据来源 (Data Source)
// ==========================================
// 报表期: 实绩优先,缺失时使用预测
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    Actual,    // 实绩
    Projected, // 预测
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Actual => write!(f, "ACTUAL"),
            DataSource::Projected => write!(f, "PROJECTED"),
        }
    }
}

// ==========================================
// 季度 (Quarter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// 0 基索引 (Q1 = 0)
    pub fn index(&self) -> usize {
        match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 1,
            Quarter::Q3 => 2,
            Quarter::Q4 => 3,
        }
    }

    /// 由 0 基索引构造,超出范围取模
    pub fn from_index(idx: usize) -> Self {
        match idx % 4 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// 由日历月份 (1..=12) 推算季度
    pub fn from_month(month: u32) -> Self {
        Self::from_index((month.saturating_sub(1) / 3) as usize)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::Q1 => write!(f, "Q1"),
            Quarter::Q2 => write!(f, "Q2"),
            Quarter::Q3 => write!(f, "Q3"),
            Quarter::Q4 => write!(f, "Q4"),
        }
    }
}
