// ==========================================
// 活动经营预测系统 - 产品信息领域模型
// ==========================================
// 职责: 预测期长度、预测周期、每期场次
// 生命周期: 由调用方构造,按值传入引擎,引擎不持有
// ==========================================

use crate::domain::types::ForecastCadence;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductInfo - 产品信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    // ===== 标识 =====
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,

    // ===== 预测范围 =====
    pub forecast_period: i64,           // 预测期数 N (必须 ≥ 1)
    #[serde(default)]
    pub cadence: ForecastCadence,       // 预测周期
    #[serde(default)]
    pub events_per_period: Option<f64>, // 每期场次
    #[serde(default)]
    pub start_date: Option<NaiveDate>,  // 第 1 期起始日期 (可选)
}

impl ProductInfo {
    /// 以最少字段构造
    pub fn new(forecast_period: i64, cadence: ForecastCadence) -> Self {
        Self {
            product_id: String::new(),
            product_name: String::new(),
            forecast_period,
            cadence,
            events_per_period: None,
            start_date: None,
        }
    }

    pub fn with_events_per_period(mut self, events: f64) -> Self {
        self.events_per_period = Some(events);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}
