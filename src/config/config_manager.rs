// ==========================================
// 活动经营预测系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值回退
// 存储: JSON 文件 (扁平 key-value 对象)
// 路径: 环境变量 EVENT_FORECAST_CONFIG > 用户配置目录 > 内置默认
// ==========================================

use crate::config::engine_config::EngineConfig;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "EVENT_FORECAST_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, JsonValue>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 空配置 (全部使用默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径,文件内容须为 JSON 对象
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let mut manager = Self::from_json_str(&raw)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        manager.source = Some(path.to_path_buf());
        Ok(manager)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let values: HashMap<String, JsonValue> =
            serde_json::from_str(raw).context("配置内容必须是 JSON 对象")?;
        Ok(Self {
            values,
            source: None,
        })
    }

    /// 按默认路径加载;文件不存在时回退到内置默认值
    pub fn load_default() -> Result<Self> {
        match get_default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "加载配置文件");
                Self::from_file(&path)
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
                Ok(Self::new())
            }
            None => Ok(Self::new()),
        }
    }

    /// 配置来源 (内置默认时为 None)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 读取非负整数配置,缺失或格式错误时返回默认值
    fn get_u64_or_default(&self, key: &str, default: u64) -> u64 {
        match self.values.get(key) {
            None => default,
            Some(value) => value.as_u64().unwrap_or_else(|| {
                tracing::warn!(
                    config_key = key,
                    raw_value = %value,
                    "配置格式错误，使用默认值"
                );
                default
            }),
        }
    }

    // ===== 报表配置 =====

    /// 趋势滚动窗口 (期)
    pub fn get_trend_window(&self) -> usize {
        let default = EngineConfig::default().trend_window as u64;
        self.get_u64_or_default(config_keys::TREND_WINDOW, default) as usize
    }

    // ===== 预测范围配置 =====

    /// 允许的最大预测期数
    pub fn get_max_forecast_periods(&self) -> u32 {
        let default = EngineConfig::default().max_forecast_periods as u64;
        let value = self.get_u64_or_default(config_keys::MAX_FORECAST_PERIODS, default);
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// 每季度周数 (按索引推算季度时使用)
    pub fn get_weeks_per_quarter(&self) -> u32 {
        let default = EngineConfig::default().weeks_per_quarter as u64;
        let value = self.get_u64_or_default(config_keys::WEEKS_PER_QUARTER, default);
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// 每季度月数
    pub fn get_months_per_quarter(&self) -> u32 {
        let default = EngineConfig::default().months_per_quarter as u64;
        let value = self.get_u64_or_default(config_keys::MONTHS_PER_QUARTER, default);
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// 汇总为引擎配置并校验
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let config = EngineConfig {
            trend_window: self.get_trend_window(),
            max_forecast_periods: self.get_max_forecast_periods(),
            weeks_per_quarter: self.get_weeks_per_quarter(),
            months_per_quarter: self.get_months_per_quarter(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// 获取默认配置文件路径
///
/// 优先使用环境变量 EVENT_FORECAST_CONFIG,否则为用户配置目录下的
/// `event-forecast/config.json`
pub fn get_default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("event-forecast").join("config.json"))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 报表
    pub const TREND_WINDOW: &str = "trend_window";

    // 预测范围
    pub const MAX_FORECAST_PERIODS: &str = "max_forecast_periods";
    pub const WEEKS_PER_QUARTER: &str = "weeks_per_quarter";
    pub const MONTHS_PER_QUARTER: &str = "months_per_quarter";
}
