// ==========================================
// 活动经营预测系统 - 周期预测记录
// ==========================================
// 红线: total_revenue = Σ 收入流
//       total_costs = Σ 成本类别
//       weekly_profit = total_revenue - total_costs
//       cumulative_profit[t] = cumulative_profit[t-1] + weekly_profit[t]
// ==========================================

use crate::domain::types::{CostCategory, RevenueStream};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WeeklyProjection - 单期预测记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeeklyProjection {
    // ===== 周期 =====
    pub period: u32,                     // 1..N
    #[serde(default)]
    pub period_start: Option<NaiveDate>, // 期初日期 (产品提供起始日期时)

    // ===== 客流 =====
    pub foot_traffic: f64, // 本期总客流
    pub events: f64,       // 本期场次
    pub attendance: f64,   // 本期到场人数 (增长序列输出,收入计算基数)
    #[serde(default)]
    pub average_event_attendance: f64, // 场均客流 = attendance / events,无场次为 0

    // ===== 收入 =====
    pub ticket_revenue: f64,
    pub fb_revenue: f64,
    pub merchandise_revenue: f64,
    pub digital_revenue: f64,
    pub total_revenue: f64,

    // ===== 成本 =====
    pub marketing_costs: f64,
    pub staffing_costs: f64,
    pub event_costs: f64,
    pub setup_costs: f64, // 本期分摊的一次性成本
    pub fb_cogs: f64,
    pub merchandise_cogs: f64,
    pub total_costs: f64,

    // ===== 利润 =====
    pub weekly_profit: f64,
    pub cumulative_profit: f64,
}

impl WeeklyProjection {
    pub fn revenue(&self, stream: RevenueStream) -> f64 {
        match stream {
            RevenueStream::Ticket => self.ticket_revenue,
            RevenueStream::FoodBeverage => self.fb_revenue,
            RevenueStream::Merchandise => self.merchandise_revenue,
            RevenueStream::Digital => self.digital_revenue,
        }
    }

    pub fn revenue_mut(&mut self, stream: RevenueStream) -> &mut f64 {
        match stream {
            RevenueStream::Ticket => &mut self.ticket_revenue,
            RevenueStream::FoodBeverage => &mut self.fb_revenue,
            RevenueStream::Merchandise => &mut self.merchandise_revenue,
            RevenueStream::Digital => &mut self.digital_revenue,
        }
    }

    pub fn cost(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Marketing => self.marketing_costs,
            CostCategory::Staffing => self.staffing_costs,
            CostCategory::Event => self.event_costs,
            CostCategory::Setup => self.setup_costs,
            CostCategory::FoodBeverageCogs => self.fb_cogs,
            CostCategory::MerchandiseCogs => self.merchandise_cogs,
        }
    }

    pub fn cost_mut(&mut self, category: CostCategory) -> &mut f64 {
        match category {
            CostCategory::Marketing => &mut self.marketing_costs,
            CostCategory::Staffing => &mut self.staffing_costs,
            CostCategory::Event => &mut self.event_costs,
            CostCategory::Setup => &mut self.setup_costs,
            CostCategory::FoodBeverageCogs => &mut self.fb_cogs,
            CostCategory::MerchandiseCogs => &mut self.merchandise_cogs,
        }
    }

    /// 由明细字段重算本期合计与利润
    ///
    /// 累计利润依赖前一期,由 [`link_cumulative_profit`] 负责
    pub fn recompute_totals(&mut self) {
        self.total_revenue = self.ticket_revenue
            + self.fb_revenue
            + self.merchandise_revenue
            + self.digital_revenue;
        self.total_costs = self.marketing_costs
            + self.staffing_costs
            + self.event_costs
            + self.setup_costs
            + self.fb_cogs
            + self.merchandise_cogs;
        self.weekly_profit = self.total_revenue - self.total_costs;
    }

    /// 按字段取值 (趋势/汇总使用)
    pub fn field(&self, field: ProjectionField) -> f64 {
        match field {
            ProjectionField::FootTraffic => self.foot_traffic,
            ProjectionField::Attendance => self.attendance,
            ProjectionField::AverageEventAttendance => self.average_event_attendance,
            ProjectionField::Revenue(stream) => self.revenue(stream),
            ProjectionField::TotalRevenue => self.total_revenue,
            ProjectionField::Cost(category) => self.cost(category),
            ProjectionField::TotalCosts => self.total_costs,
            ProjectionField::WeeklyProfit => self.weekly_profit,
            ProjectionField::CumulativeProfit => self.cumulative_profit,
        }
    }
}

/// 场均客流,场次为 0 时返回 0
pub fn average_event_attendance(attendance: f64, events: f64) -> f64 {
    if events > 0.0 {
        attendance / events
    } else {
        0.0
    }
}

/// 按期序重建累计利润: 第 1 期等于本期利润,其后逐期累加
pub fn link_cumulative_profit(records: &mut [WeeklyProjection]) {
    let mut running = 0.0;
    for (idx, record) in records.iter_mut().enumerate() {
        running = if idx == 0 {
            record.weekly_profit
        } else {
            running + record.weekly_profit
        };
        record.cumulative_profit = running;
    }
}

// ==========================================
// ProjectionField - 可汇总字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionField {
    FootTraffic,
    Attendance,
    AverageEventAttendance,
    Revenue(RevenueStream),
    TotalRevenue,
    Cost(CostCategory),
    TotalCosts,
    WeeklyProfit,
    CumulativeProfit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_totals_and_link() {
        let mut records = vec![
            WeeklyProjection {
                period: 1,
                ticket_revenue: 100.0,
                fb_revenue: 50.0,
                marketing_costs: 30.0,
                setup_costs: 200.0,
                ..Default::default()
            },
            WeeklyProjection {
                period: 2,
                ticket_revenue: 120.0,
                digital_revenue: 10.0,
                marketing_costs: 30.0,
                ..Default::default()
            },
        ];
        records.iter_mut().for_each(|r| r.recompute_totals());
        link_cumulative_profit(&mut records);

        assert_eq!(records[0].total_revenue, 150.0);
        assert_eq!(records[0].total_costs, 230.0);
        assert_eq!(records[0].weekly_profit, -80.0);
        assert_eq!(records[0].cumulative_profit, -80.0);
        assert_eq!(records[1].weekly_profit, 100.0);
        assert_eq!(records[1].cumulative_profit, 20.0);
    }

    #[test]
    fn test_field_accessors() {
        let mut record = WeeklyProjection::default();
        *record.revenue_mut(RevenueStream::Merchandise) = 42.0;
        *record.cost_mut(CostCategory::MerchandiseCogs) = 12.0;
        assert_eq!(record.field(ProjectionField::Revenue(RevenueStream::Merchandise)), 42.0);
        assert_eq!(record.field(ProjectionField::Cost(CostCategory::MerchandiseCogs)), 12.0);

        record.attendance = 90.0;
        record.average_event_attendance = 30.0;
        assert_eq!(record.field(ProjectionField::Attendance), 90.0);
        assert_eq!(record.field(ProjectionField::AverageEventAttendance), 30.0);
    }
}
