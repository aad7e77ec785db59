// ==========================================
// 活动经营预测系统 - 情景模型
// ==========================================
// 职责: 以百分比增减描述一个可比较的替代情景
// 红线: 情景只引用基线产品,永不修改基线
// ==========================================

use crate::domain::types::{CostCategory, RevenueStream};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// ScenarioModifiers - 情景调整百分比
// ==========================================
// adjusted = baseline × (1 + pct / 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioModifiers {
    #[serde(default)]
    pub revenue: BTreeMap<RevenueStream, f64>,
    #[serde(default)]
    pub costs: BTreeMap<CostCategory, f64>,
    #[serde(default)]
    pub attendance: Option<f64>,
}

impl ScenarioModifiers {
    pub fn with_revenue(mut self, stream: RevenueStream, pct: f64) -> Self {
        self.revenue.insert(stream, pct);
        self
    }

    pub fn with_cost(mut self, category: CostCategory, pct: f64) -> Self {
        self.costs.insert(category, pct);
        self
    }

    pub fn with_attendance(mut self, pct: f64) -> Self {
        self.attendance = Some(pct);
        self
    }

    /// 所有调整均为 0 (恒等情景)
    pub fn is_identity(&self) -> bool {
        self.revenue.values().all(|pct| *pct == 0.0)
            && self.costs.values().all(|pct| *pct == 0.0)
            && self.attendance.map_or(true, |pct| pct == 0.0)
    }
}

// ==========================================
// ScenarioModel - 命名情景
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioModel {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub baseline_product_id: String,
    #[serde(default)]
    pub modifiers: ScenarioModifiers,
    pub created_at: DateTime<Utc>,
}

impl ScenarioModel {
    pub fn new(name: impl Into<String>, modifiers: ScenarioModifiers) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            baseline_product_id: String::new(),
            modifiers,
            created_at: Utc::now(),
        }
    }

    pub fn for_product(mut self, product_id: impl Into<String>) -> Self {
        self.baseline_product_id = product_id.into();
        self
    }

    /// 按名称或 ID 匹配 (大小写不敏感)
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.name.eq_ignore_ascii_case(key) || self.id.to_string().eq_ignore_ascii_case(key)
    }
}
