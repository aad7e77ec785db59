// ==========================================
// 活动经营预测系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换引擎/导入错误为可读的错误消息
// 约定: 所有错误信息必须包含显式原因
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("预测期数无效: {0}（必须 ≥ 1）")]
    InvalidForecastPeriod(i64),

    #[error("输入校验失败: {reason}")]
    ValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 业务查找错误
    // ==========================================
    #[error("情景未找到: {0}")]
    ScenarioNotFound(String),

    // ==========================================
    // 下游错误
    // ==========================================
    #[error("引擎错误: {0}")]
    Engine(EngineError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// 目的: 预测期数错误在 API 层保持同一语义
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidForecastPeriod(n) => ApiError::InvalidForecastPeriod(n),
            other => ApiError::Engine(other),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 字段路径（例如 revenue.ticket_price）
    pub field: String,
    /// 违规原因
    pub reason: String,
    /// 原始值（可选）
    pub value: Option<f64>,
}

impl ValidationViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            value,
        }
    }
}
