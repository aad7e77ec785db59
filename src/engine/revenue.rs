// ==========================================
// 活动经营预测系统 - 收入引擎
// ==========================================
// 职责: 客流 → 四类收入
// 公式: 收入 = 客流 × 单价(人均消费) × 转化率
// 说明: 负数输入由调用方输入层拦截,本引擎不做校验
// ==========================================

use crate::engine::normalize::RevenueParams;

/// 单期收入拆分
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueBreakdown {
    pub ticket: f64,
    pub food_beverage: f64,
    pub merchandise: f64,
    pub digital: f64,
    pub total: f64,
}

// ==========================================
// RevenueProjector - 收入引擎
// ==========================================
pub struct RevenueProjector;

impl RevenueProjector {
    pub fn new() -> Self {
        Self
    }

    /// 计算单期收入
    pub fn project(&self, foot_traffic: f64, params: &RevenueParams) -> RevenueBreakdown {
        let ticket = foot_traffic * params.ticket_price * params.ticket_sales_rate;
        let food_beverage = foot_traffic * params.fb_spend * params.fb_conversion_rate;
        let merchandise =
            foot_traffic * params.merchandise_spend * params.merchandise_conversion_rate;
        let digital = foot_traffic * params.digital_price * params.digital_conversion_rate;

        RevenueBreakdown {
            ticket,
            food_beverage,
            merchandise,
            digital,
            total: ticket + food_beverage + merchandise + digital,
        }
    }
}

impl Default for RevenueProjector {
    fn default() -> Self {
        Self::new()
    }
}
