// ==========================================
// 活动经营预测系统 - 预测方案文档
// ==========================================
// 职责: 一个产品的全部输入 (假设 + 情景 + 实绩) 的聚合体
// 用途: 文件导入/命令行;引擎本身只接收其中的各个部分
// ==========================================

use crate::domain::actuals::ActualRecord;
use crate::domain::metrics::{CostMetrics, GrowthMetrics, RevenueMetrics};
use crate::domain::product::ProductInfo;
use crate::domain::scenario::ScenarioModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPlan {
    pub product: ProductInfo,
    #[serde(default)]
    pub growth: GrowthMetrics,
    #[serde(default)]
    pub revenue: RevenueMetrics,
    #[serde(default)]
    pub cost: CostMetrics,
    #[serde(default)]
    pub scenarios: Vec<ScenarioModel>,
    #[serde(default)]
    pub actuals: Vec<ActualRecord>,
}

impl ForecastPlan {
    pub fn new(
        product: ProductInfo,
        growth: GrowthMetrics,
        revenue: RevenueMetrics,
        cost: CostMetrics,
    ) -> Self {
        Self {
            product,
            growth,
            revenue,
            cost,
            scenarios: Vec::new(),
            actuals: Vec::new(),
        }
    }

    /// 按名称或 ID 查找情景
    pub fn find_scenario(&self, key: &str) -> Option<&ScenarioModel> {
        self.scenarios.iter().find(|s| s.matches(key))
    }
}
