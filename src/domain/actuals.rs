// ==========================================
// 活动经营预测系统 - 实绩记录
// ==========================================
// 职责: 人工录入的单期实绩 (按期号稀疏存放)
// 红线: 存在实绩的期,报表字段一律取实绩
// ==========================================

use crate::domain::projection::{average_event_attendance, WeeklyProjection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ChannelPerformance - 渠道投放表现
// ==========================================
// 由外部导入适配器填充,引擎只做透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub channel: String,
    #[serde(default)]
    pub spend: Option<f64>,
    #[serde(default)]
    pub impressions: Option<f64>,
    #[serde(default)]
    pub clicks: Option<f64>,
    #[serde(default)]
    pub conversions: Option<f64>,
}

// ==========================================
// ActualRecord - 单期实绩
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActualRecord {
    pub period: u32,
    #[serde(default)]
    pub recorded_on: Option<NaiveDate>,

    // ===== 客流 =====
    #[serde(default)]
    pub foot_traffic: Option<f64>,
    #[serde(default)]
    pub events: Option<f64>,

    // ===== 收入 =====
    #[serde(default)]
    pub ticket_revenue: Option<f64>,
    #[serde(default)]
    pub fb_revenue: Option<f64>,
    #[serde(default)]
    pub merchandise_revenue: Option<f64>,
    #[serde(default)]
    pub digital_revenue: Option<f64>,

    // ===== 成本 =====
    #[serde(default)]
    pub marketing_costs: Option<f64>,
    #[serde(default)]
    pub staffing_costs: Option<f64>,
    #[serde(default)]
    pub event_costs: Option<f64>,
    #[serde(default)]
    pub setup_costs: Option<f64>,
    #[serde(default)]
    pub fb_cogs: Option<f64>,
    #[serde(default)]
    pub merchandise_cogs: Option<f64>,

    // ===== 合计 (只录合计时以录入值为准) =====
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub total_costs: Option<f64>,
    #[serde(default)]
    pub weekly_profit: Option<f64>,

    // ===== 附加信息 =====
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub channel_performance: Vec<ChannelPerformance>,
}

impl ActualRecord {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    /// 转为与预测同形的记录,缺失数值取 0
    ///
    /// 合计与本期利润优先取录入值,未录入时由明细重算;
    /// 只录了收入/成本合计时,本期利润 = 收入合计 - 成本合计。
    /// 累计利润不在此处计算 (依赖前序期)
    pub fn to_projection(&self, period_start: Option<NaiveDate>) -> WeeklyProjection {
        let recorded = |v: Option<f64>| v.filter(|x| x.is_finite());
        let num = |v: Option<f64>| recorded(v).unwrap_or(0.0);
        let foot_traffic = num(self.foot_traffic);
        let events = num(self.events);

        let mut record = WeeklyProjection {
            period: self.period,
            period_start,
            foot_traffic,
            events,
            attendance: foot_traffic,
            average_event_attendance: average_event_attendance(foot_traffic, events),
            ticket_revenue: num(self.ticket_revenue),
            fb_revenue: num(self.fb_revenue),
            merchandise_revenue: num(self.merchandise_revenue),
            digital_revenue: num(self.digital_revenue),
            marketing_costs: num(self.marketing_costs),
            staffing_costs: num(self.staffing_costs),
            event_costs: num(self.event_costs),
            setup_costs: num(self.setup_costs),
            fb_cogs: num(self.fb_cogs),
            merchandise_cogs: num(self.merchandise_cogs),
            ..Default::default()
        };
        record.recompute_totals();

        if let Some(total) = recorded(self.total_revenue) {
            record.total_revenue = total;
        }
        if let Some(total) = recorded(self.total_costs) {
            record.total_costs = total;
        }
        record.weekly_profit = recorded(self.weekly_profit)
            .unwrap_or(record.total_revenue - record.total_costs);
        record
    }
}
