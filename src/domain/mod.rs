// ==========================================
// 活动经营预测系统 - 领域模型层
// ==========================================
// 职责: 定义输入假设、预测记录、情景、实绩
// 红线: 不含计算逻辑,不含文件读写逻辑
// ==========================================

pub mod actuals;
pub mod metrics;
pub mod plan;
pub mod product;
pub mod projection;
pub mod scenario;
pub mod types;

// 重导出核心类型
pub use actuals::{ActualRecord, ChannelPerformance};
pub use metrics::{
    CostMetrics, EventCostItem, GrowthMetrics, MarketingChannel, MarketingCosting,
    RevenueMetrics, SetupCostItem, StaffRole, StaffingCosting,
};
pub use plan::ForecastPlan;
pub use product::ProductInfo;
pub use projection::{
    average_event_attendance, link_cumulative_profit, ProjectionField, WeeklyProjection,
};
pub use scenario::{ScenarioModel, ScenarioModifiers};
pub use types::{
    CostCategory, DataSource, EmploymentType, ForecastCadence, GrowthModel, Quarter,
    RevenueStream,
};
