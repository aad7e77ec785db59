use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// 引擎运行参数
///
/// 引擎本身无状态,此结构由调用方按值传入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 趋势滚动平均窗口 (期)
    pub trend_window: usize,

    /// 允许的最大预测期数
    pub max_forecast_periods: u32,

    /// 每季度周数 (周/场次周期按索引推算季度)
    pub weeks_per_quarter: u32,

    /// 每季度月数
    pub months_per_quarter: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_window: 3,
            max_forecast_periods: 520,
            weeks_per_quarter: 13,
            months_per_quarter: 3,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trend_window == 0 {
            bail!("trend_window 必须 ≥ 1");
        }
        if self.max_forecast_periods == 0 {
            bail!("max_forecast_periods 必须 ≥ 1");
        }
        if self.weeks_per_quarter == 0 || self.months_per_quarter == 0 {
            bail!("季度换算参数必须 ≥ 1");
        }
        Ok(())
    }
}
